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
use crate::pricing::segment::{DropOffFee, RouteSegment};
use chrono::NaiveDate;
use serde::Deserialize;

/// One candidate route as the calculate endpoint delivers it: the wire
/// format is a bare `[segments, dropOffFee | null, mayBeInvalid]` triple.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteEntry(Vec<RouteSegment>, Option<DropOffFee>, bool);

impl RouteEntry {
	pub fn new(
		segments: Vec<RouteSegment>,
		drop_off: Option<DropOffFee>,
		may_be_invalid: bool,
	) -> Self {
		Self(segments, drop_off, may_be_invalid)
	}

	pub fn segments(&self) -> &[RouteSegment] {
		&self.0
	}

	pub fn drop_off(&self) -> Option<&DropOffFee> {
		self.1.as_ref()
	}

	/// Advisory only; rendered as a warning, never affects pricing.
	pub fn may_be_invalid(&self) -> bool {
		self.2
	}

	/// Window in which every segment rate on the route is in force:
	/// latest start to earliest end, if any segment carries dates at all.
	pub fn effective_window(&self) -> Option<(NaiveDate, NaiveDate)> {
		let from = self.0.iter().filter_map(|s| s.effective_from).max()?;
		let to = self.0.iter().filter_map(|s| s.effective_to).min()?;
		Some((from, to))
	}
}

/// Response body of the calculate endpoint: direct (single-carrier)
/// routes and multi-carrier routes, independently sorted downstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteBatch {
	#[serde(default)]
	pub one_service_routes: Vec<RouteEntry>,
	#[serde(default)]
	pub multi_service_routes: Vec<RouteEntry>,
}

/// Aggregated totals for one route in the display currency, all rounded
/// to 2 decimal places. `exact_total` is present only when the route
/// went through global-sum mode, i.e. the total is a precise sum rather
/// than a min/max band. Recomputed fresh on every aggregation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
	pub min_total: f64,
	pub max_total: f64,
	pub exact_total: Option<f64>,

	pub min_total_with_surcharge: f64,
	pub max_total_with_surcharge: f64,
	pub exact_total_with_surcharge: Option<f64>,

	/// Orders routes ascending: the surcharge-inflated exact total when
	/// defined, else the surcharge-inflated minimum.
	pub sort_key: f64,
}
