/* Copyright © 2025 The freightcalc authors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::pricing::route::RouteBatch;
use anyhow::{bail, Error};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Client for the quoting backend. Everything it returns is handed to
/// the pricing engine as-is; the backend stays the source of truth for
/// raw segment prices.
pub struct Client {
	client: reqwest::blocking::Client,
	base_url: String,
}

/// Body of the calculate endpoint; field names follow the backend's
/// wire convention.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
	pub dispatch_date: NaiveDate,
	pub only_in_selected_date_range: bool,
	pub departure_id: i64,
	pub destination_id: i64,
	pub cargo_weight: f64,
	pub container_type: String,
}

impl Client {
	pub fn new(base_url: &str) -> Self {
		Client {
			client: reqwest::blocking::Client::new(),
			base_url: base_url.trim_end_matches('/').to_string(),
		}
	}

	/// Fetches the session rate table: currency code -> rubles per unit.
	pub fn fetch_rates(&self) -> Result<BTreeMap<String, f64>, Error> {
		let url = format!("{}/api/rates/", self.base_url);
		let response = self.client.get(&url).send()?;

		if !response.status().is_success() {
			bail!("rates request failed with status: {}", response.status());
		}

		Ok(response.json()?)
	}

	/// Asks the backend for route candidates between two points.
	pub fn calculate(
		&self,
		request: &CalculateRequest,
	) -> Result<RouteBatch, Error> {
		let url = format!("{}/api/routes/calculate", self.base_url);
		let response = self.client.post(&url).json(request).send()?;

		if !response.status().is_success() {
			bail!(
				"route calculation failed with status: {}",
				response.status()
			);
		}

		Ok(response.json()?)
	}
}
