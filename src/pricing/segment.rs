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
use crate::pricing::rates::{normalize_currency, RateTable};
use chrono::NaiveDate;
use serde::Deserialize;

/// Transport mode of one route leg, as the backend reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SegmentKind {
	Sea,
	Rail,
	Truck,
	SeaRail,
}

impl SegmentKind {
	/// A mixed sea+rail leg switches the whole remainder of the route
	/// into global-sum aggregation.
	pub fn is_global_sum_trigger(self) -> bool {
		matches!(self, SegmentKind::SeaRail)
	}

	pub fn label(self) -> &'static str {
		match self {
			SegmentKind::Sea => "sea",
			SegmentKind::Rail => "rail",
			SegmentKind::Truck => "truck",
			SegmentKind::SeaRail => "sea+rail",
		}
	}
}

/// One priced option within a multi-variant segment, e.g. one container
/// handling condition (FIFO, FILO, FOR).
#[derive(Debug, Clone, Deserialize)]
pub struct PriceVariant {
	pub value: f64,
	pub currency: String,

	/// Bank conversion markup, in percent. Applies only when displaying
	/// in the conversion currency; see `surcharge_factor`.
	#[serde(rename = "conversation_percents", default)]
	pub surcharge_percent: f64,

	#[serde(rename = "cond", default)]
	pub condition: Option<String>,
}

impl PriceVariant {
	pub fn new(value: f64, currency: &str) -> Self {
		Self {
			value,
			currency: currency.to_string(),
			surcharge_percent: 0.0,
			condition: None,
		}
	}

	pub fn with_surcharge(mut self, percent: f64) -> Self {
		self.surcharge_percent = percent;
		self
	}
}

/// One leg of a shipping route. Single-price legs carry `price` and
/// `currency`; multi-variant legs carry `prices`. The descriptive fields
/// are passed through to reports untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteSegment {
	#[serde(rename = "type")]
	pub kind: SegmentKind,

	#[serde(default)]
	pub price: Option<f64>,
	#[serde(default)]
	pub currency: Option<String>,
	#[serde(rename = "conversationPercents", default)]
	pub surcharge_percent: f64,

	#[serde(default)]
	pub prices: Vec<PriceVariant>,

	#[serde(default)]
	pub company: Option<String>,
	#[serde(rename = "startPointName", default)]
	pub start_point: Option<String>,
	#[serde(rename = "endPointName", default)]
	pub end_point: Option<String>,
	#[serde(rename = "effectiveFrom", default)]
	pub effective_from: Option<NaiveDate>,
	#[serde(rename = "effectiveTo", default)]
	pub effective_to: Option<NaiveDate>,
	#[serde(default)]
	pub comment: Option<String>,
}

impl RouteSegment {
	pub fn single(kind: SegmentKind, price: f64, currency: &str) -> Self {
		Self {
			kind,
			price: Some(price),
			currency: Some(currency.to_string()),
			..Self::empty(kind)
		}
	}

	pub fn multi(kind: SegmentKind, variants: Vec<PriceVariant>) -> Self {
		Self {
			prices: variants,
			..Self::empty(kind)
		}
	}

	pub fn with_surcharge(mut self, percent: f64) -> Self {
		self.surcharge_percent = percent;
		self
	}

	fn empty(kind: SegmentKind) -> Self {
		Self {
			kind,
			price: None,
			currency: None,
			surcharge_percent: 0.0,
			prices: Vec::new(),
			company: None,
			start_point: None,
			end_point: None,
			effective_from: None,
			effective_to: None,
			comment: None,
		}
	}

	/// Reduces this segment to its contribution in the display currency.
	/// `global_sum` selects between range-bounding and summing for the
	/// variant case; single prices ignore it.
	pub fn resolve(
		&self,
		global_sum: bool,
		rates: &RateTable,
		display: &str,
		conversion_currency: &str,
	) -> Result<Contribution, PricingError> {
		// The backend sends a zero or missing price to mean "see the
		// variant list"; only a real single price short-circuits it.
		let single_price = self
			.price
			.filter(|p| *p != 0.0 || self.prices.is_empty());

		if let Some(price) = single_price {
			let currency = self.currency.as_deref().ok_or_else(|| {
				PricingError::MalformedRoute(
					"single-price segment is missing its currency".to_string(),
				)
			})?;

			return resolve_single(
				price,
				currency,
				self.surcharge_percent,
				rates,
				display,
				conversion_currency,
			);
		}

		if self.prices.is_empty() {
			return Err(PricingError::MalformedRoute(
				"segment has neither a price nor price variants".to_string(),
			));
		}

		resolve_variants(
			&self.prices,
			global_sum,
			rates,
			display,
			conversion_currency,
		)
	}
}

/// Additional container drop-off charge on a route. Shaped like a
/// single-price segment; absent entirely when the fee is already baked
/// into segment prices.
#[derive(Debug, Clone, Deserialize)]
pub struct DropOffFee {
	pub price: f64,
	pub currency: String,
	#[serde(rename = "conversation_percents", default)]
	pub surcharge_percent: f64,
}

impl DropOffFee {
	pub fn new(price: f64, currency: &str) -> Self {
		Self {
			price,
			currency: currency.to_string(),
			surcharge_percent: 0.0,
		}
	}

	pub fn with_surcharge(mut self, percent: f64) -> Self {
		self.surcharge_percent = percent;
		self
	}

	/// Under global-sum mode the fee joins the running sum; otherwise it
	/// moves both ends of the band like any fixed price.
	pub fn resolve(
		&self,
		global_sum: bool,
		rates: &RateTable,
		display: &str,
		conversion_currency: &str,
	) -> Result<Contribution, PricingError> {
		let fixed = resolve_single(
			self.price,
			&self.currency,
			self.surcharge_percent,
			rates,
			display,
			conversion_currency,
		)?;

		if !global_sum {
			return Ok(fixed);
		}

		Ok(Contribution {
			sum: fixed.min,
			sum_sur: fixed.min_sur,
			..Contribution::default()
		})
	}
}

/// One segment's (or fee's) deltas to the route accumulators, already in
/// the display currency. `min`/`max` bound the route band; `sum` is the
/// global-sum lane. The `_sur` fields are the same quantities inflated by
/// conversion surcharges.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Contribution {
	pub min: f64,
	pub max: f64,
	pub sum: f64,
	pub min_sur: f64,
	pub max_sur: f64,
	pub sum_sur: f64,
}

impl Contribution {
	pub fn add(&mut self, other: &Contribution) {
		self.min += other.min;
		self.max += other.max;
		self.sum += other.sum;
		self.min_sur += other.min_sur;
		self.max_sur += other.max_sur;
		self.sum_sur += other.sum_sur;
	}
}

/// The bank markup applies only when the customer wants the quote in the
/// currency that requires conversion (conventionally rubles) and the
/// price is not already native to it.
fn surcharge_factor(
	percent: f64,
	native_currency: &str,
	display: &str,
	conversion_currency: &str,
) -> f64 {
	let native = normalize_currency(native_currency);
	if display == conversion_currency && native != display {
		1.0 + percent / 100.0
	} else {
		1.0
	}
}

fn resolve_single(
	price: f64,
	currency: &str,
	surcharge_percent: f64,
	rates: &RateTable,
	display: &str,
	conversion_currency: &str,
) -> Result<Contribution, PricingError> {
	let converted = rates.convert(price, currency, display)?;
	let factor =
		surcharge_factor(surcharge_percent, currency, display, conversion_currency);

	Ok(Contribution {
		min: converted,
		max: converted,
		min_sur: converted * factor,
		max_sur: converted * factor,
		..Contribution::default()
	})
}

fn resolve_variants(
	variants: &[PriceVariant],
	global_sum: bool,
	rates: &RateTable,
	display: &str,
	conversion_currency: &str,
) -> Result<Contribution, PricingError> {
	let mut out = Contribution::default();

	// (plain, inflated) of the winning variant; selection is driven by
	// the inflated value, and the plain value is read off the winner
	// rather than minimized independently. First variant wins ties.
	let mut lowest: Option<(f64, f64)> = None;
	let mut highest: Option<(f64, f64)> = None;

	for variant in variants {
		let converted = rates.convert(variant.value, &variant.currency, display)?;
		let factor = surcharge_factor(
			variant.surcharge_percent,
			&variant.currency,
			display,
			conversion_currency,
		);
		let inflated = converted * factor;

		if global_sum {
			out.sum += converted;
			out.sum_sur += inflated;
			continue;
		}

		if lowest.map_or(true, |(_, best)| inflated < best) {
			lowest = Some((converted, inflated));
		}
		if highest.map_or(true, |(_, best)| inflated > best) {
			highest = Some((converted, inflated));
		}
	}

	if let (Some((min, min_sur)), Some((max, max_sur))) = (lowest, highest) {
		out.min = min;
		out.min_sur = min_sur;
		out.max = max;
		out.max_sur = max_sur;
	}

	Ok(out)
}
