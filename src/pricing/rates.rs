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
use crate::pricing::error::PricingError;
use std::collections::BTreeMap;

/// Currency all rates are quoted against, i.e. every rate in the table is
/// "units of this currency per one unit of the keyed currency".
pub const PIVOT_CURRENCY: &str = "RUB";

/// Maps any spelling of the Russian ruble (the legacy "RUR" code and the
/// localized Cyrillic label, in any case) onto the canonical "RUB", and
/// uppercases everything else. Segment data and user input both arrive
/// with inconsistent casing.
pub fn normalize_currency(code: &str) -> String {
	let upper = code.trim().to_uppercase();
	match upper.as_str() {
		"RUR" | "РУБ" => PIVOT_CURRENCY.to_string(),
		_ => upper,
	}
}

/// Table of exchange rates for one session, replaced wholesale whenever
/// the backend is re-queried. Immutable between refreshes; conversions
/// are pure lookups against it.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
	rates: BTreeMap<String, f64>,
}

impl RateTable {
	/// Builds a table from raw backend rates. The pivot currency is pinned
	/// to 1 here; the backend is not trusted to supply it.
	pub fn new(raw: BTreeMap<String, f64>) -> Self {
		let mut rates: BTreeMap<String, f64> = raw
			.into_iter()
			.map(|(code, rate)| (normalize_currency(&code), rate))
			.collect();

		rates.insert(PIVOT_CURRENCY.to_string(), 1.0);

		Self { rates }
	}

	/// Rate of one unit of the given currency in pivot units.
	pub fn rate(&self, code: &str) -> Result<f64, PricingError> {
		let code = normalize_currency(code);
		self.rates
			.get(&code)
			.copied()
			.ok_or(PricingError::UnknownCurrency(code))
	}

	/// Converts an amount between two currencies via the pivot.
	///
	/// Equal currencies (after normalization) return the amount untouched;
	/// running the divide-multiply round trip anyway would introduce float
	/// drift where the caller is entitled to an exact identity.
	pub fn convert(
		&self,
		amount: f64,
		from: &str,
		to: &str,
	) -> Result<f64, PricingError> {
		let from = normalize_currency(from);
		let to = normalize_currency(to);

		if from == to {
			self.rate(&from)?;
			return Ok(amount);
		}

		Ok(amount / self.rate(&to)? * self.rate(&from)?)
	}

	/// All known currencies with their pivot rates, in code order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
		self.rates.iter().map(|(code, rate)| (code.as_str(), *rate))
	}
}
