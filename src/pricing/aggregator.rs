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
use crate::pricing::route::{RouteBatch, RouteEntry, RouteResult};
use crate::pricing::segment::Contribution;
use crate::util::money::round2;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Display currency that triggers the bank conversion surcharge unless
/// overridden on the aggregator.
pub const DEFAULT_CONVERSION_CURRENCY: &str = "RUB";

/// The pricing engine. Holds the session's rate table and recomputes
/// route totals for any display currency without touching the network;
/// every quote call is a pure function of the table and its inputs.
#[derive(Debug)]
pub struct Aggregator {
	rates: Option<RateTable>,

	/// Quotes requested in this currency get surcharge-inflated totals;
	/// any other display currency leaves surcharges dormant.
	conversion_currency: String,
}

impl Aggregator {
	pub fn new() -> Self {
		Self::with_conversion_currency(DEFAULT_CONVERSION_CURRENCY)
	}

	pub fn with_conversion_currency(code: &str) -> Self {
		Self {
			rates: None,
			conversion_currency: normalize_currency(code),
		}
	}

	/// Replaces the active rate table wholesale.
	pub fn set_rates(&mut self, raw: BTreeMap<String, f64>) {
		self.rates = Some(RateTable::new(raw));
	}

	pub fn rate_table(&self) -> Result<&RateTable, PricingError> {
		self.rates.as_ref().ok_or(PricingError::MissingRates)
	}

	/// Standalone conversion primitive, e.g. for spot-rate banners.
	pub fn convert(
		&self,
		amount: f64,
		from: &str,
		to: &str,
	) -> Result<f64, PricingError> {
		self.rate_table()?.convert(amount, from, to)
	}

	/// Aggregates one route into totals in the display currency.
	pub fn quote_route(
		&self,
		entry: &RouteEntry,
		display_currency: &str,
	) -> Result<RouteResult, PricingError> {
		let rates = self.rate_table()?;
		let display = normalize_currency(display_currency);

		if entry.segments().is_empty() {
			return Err(PricingError::MalformedRoute(
				"route has no segments".to_string(),
			));
		}

		let mut acc = Contribution::default();
		let mut global_sum = false;

		for segment in entry.segments() {
			// The trigger flips the mode before it is resolved, so its
			// own variants already land in the sum lane.
			if segment.kind.is_global_sum_trigger() {
				global_sum = true;
			}

			acc.add(&segment.resolve(
				global_sum,
				rates,
				&display,
				&self.conversion_currency,
			)?);
		}

		if let Some(drop) = entry.drop_off() {
			acc.add(&drop.resolve(
				global_sum,
				rates,
				&display,
				&self.conversion_currency,
			)?);
		}

		let min_total = round2(acc.min + acc.sum);
		let max_total = round2(acc.max + acc.sum);
		let min_sur = round2(acc.min_sur + acc.sum_sur);
		let max_sur = round2(acc.max_sur + acc.sum_sur);

		let (exact_total, exact_sur) = if global_sum {
			(Some(min_total), Some(min_sur))
		} else {
			(None, None)
		};

		Ok(RouteResult {
			min_total,
			max_total,
			exact_total,
			min_total_with_surcharge: min_sur,
			max_total_with_surcharge: max_sur,
			exact_total_with_surcharge: exact_sur,
			sort_key: exact_sur.unwrap_or(min_sur),
		})
	}

	/// Aggregates a route list and orders the successes ascending by
	/// sort key (stable, so equally-priced routes keep backend order).
	/// A failing route is reported and skipped, never fatal to the list.
	pub fn quote_list<'a>(
		&self,
		entries: &'a [RouteEntry],
		display_currency: &str,
	) -> QuotedList<'a> {
		let mut quotes = Vec::new();
		let mut failures = Vec::new();

		for (index, entry) in entries.iter().enumerate() {
			match self.quote_route(entry, display_currency) {
				Ok(result) => quotes.push(Quoted {
					index,
					entry,
					result,
				}),
				Err(error) => failures.push(RouteFailure { index, error }),
			}
		}

		quotes.sort_by(|a, b| {
			a.result
				.sort_key
				.partial_cmp(&b.result.sort_key)
				.unwrap_or(Ordering::Equal)
		});

		QuotedList { quotes, failures }
	}

	/// Recomputes both result lists for a display currency. Called again
	/// with the same batch whenever the customer switches currency.
	pub fn quote_batch<'a>(
		&self,
		batch: &'a RouteBatch,
		display_currency: &str,
	) -> QuoteSet<'a> {
		QuoteSet {
			direct: self.quote_list(&batch.one_service_routes, display_currency),
			multi: self.quote_list(&batch.multi_service_routes, display_currency),
		}
	}
}

impl Default for Aggregator {
	fn default() -> Self {
		Self::new()
	}
}

/// One successfully priced route, still tied to its backend list index
/// and original entry so the caller can render segment details.
#[derive(Debug)]
pub struct Quoted<'a> {
	pub index: usize,
	pub entry: &'a RouteEntry,
	pub result: RouteResult,
}

#[derive(Debug)]
pub struct RouteFailure {
	pub index: usize,
	pub error: PricingError,
}

/// Ordered successes plus isolated failures for one route list.
#[derive(Debug)]
pub struct QuotedList<'a> {
	pub quotes: Vec<Quoted<'a>>,
	pub failures: Vec<RouteFailure>,
}

#[derive(Debug)]
pub struct QuoteSet<'a> {
	pub direct: QuotedList<'a>,
	pub multi: QuotedList<'a>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::pricing::segment::{
		DropOffFee, PriceVariant, RouteSegment, SegmentKind,
	};

	fn engine() -> Aggregator {
		let mut aggregator = Aggregator::new();
		aggregator.set_rates(BTreeMap::from([
			("USD".to_string(), 90.0),
			("EUR".to_string(), 100.0),
		]));
		aggregator
	}

	fn single_route(price: f64, currency: &str) -> RouteEntry {
		RouteEntry::new(
			vec![RouteSegment::single(SegmentKind::Sea, price, currency)],
			None,
			false,
		)
	}

	#[test]
	fn test_missing_rates_is_fatal() {
		let aggregator = Aggregator::new();
		assert_eq!(
			aggregator
				.quote_route(&single_route(1.0, "USD"), "USD")
				.unwrap_err(),
			PricingError::MissingRates,
		);
		assert_eq!(
			aggregator.convert(1.0, "USD", "RUB").unwrap_err(),
			PricingError::MissingRates,
		);
	}

	mod scenarios {
		use super::*;

		#[test]
		fn test_single_segment_same_currency() {
			let result = engine()
				.quote_route(&single_route(100.0, "USD"), "USD")
				.unwrap();

			assert_eq!(result.min_total, 100.0);
			assert_eq!(result.max_total, 100.0);
			assert_eq!(result.exact_total, None);
			assert_eq!(result.exact_total_with_surcharge, None);
			assert_eq!(result.sort_key, 100.0);
		}

		#[test]
		fn test_single_segment_converted_to_rubles() {
			let result = engine()
				.quote_route(&single_route(100.0, "USD"), "RUB")
				.unwrap();

			assert_eq!(result.min_total, 9000.0);
			assert_eq!(result.max_total, 9000.0);
			assert_eq!(result.min_total_with_surcharge, 9000.0);
		}

		#[test]
		fn test_variant_band_totals_in_rubles() {
			let route = RouteEntry::new(
				vec![RouteSegment::multi(
					SegmentKind::Sea,
					vec![
						PriceVariant::new(300.0, "USD").with_surcharge(5.0),
						PriceVariant::new(250.0, "USD").with_surcharge(5.0),
					],
				)],
				None,
				false,
			);
			let result = engine().quote_route(&route, "RUB").unwrap();

			assert_eq!(result.min_total, 22500.0);
			assert_eq!(result.max_total, 27000.0);
			assert_eq!(result.min_total_with_surcharge, 23625.0);
			assert_eq!(result.max_total_with_surcharge, 28350.0);
			assert_eq!(result.exact_total, None);
			assert_eq!(result.sort_key, 23625.0);
		}

		#[test]
		fn test_global_sum_route_collapses_to_exact_total() {
			// A sea+rail trigger, then a two-variant segment, then a
			// drop fee; everything lands in the sum.
			let route = RouteEntry::new(
				vec![
					RouteSegment::multi(
						SegmentKind::SeaRail,
						vec![PriceVariant::new(0.0, "USD")],
					),
					RouteSegment::multi(
						SegmentKind::Rail,
						vec![
							PriceVariant::new(50.0, "USD"),
							PriceVariant::new(70.0, "USD"),
						],
					),
				],
				Some(DropOffFee::new(20.0, "USD")),
				false,
			);
			let result = engine().quote_route(&route, "USD").unwrap();

			assert_eq!(result.exact_total, Some(140.0));
			assert_eq!(result.exact_total_with_surcharge, Some(140.0));
			assert_eq!(result.min_total, 140.0);
			assert_eq!(result.max_total, 140.0);
			assert_eq!(result.sort_key, 140.0);
		}
	}

	#[test]
	fn test_trigger_segment_own_variants_land_in_sum() {
		// Chosen convention for the trigger segment itself: the mode is
		// already active while it is resolved, so its variants are summed
		// rather than range-bounded.
		let route = RouteEntry::new(
			vec![RouteSegment::multi(
				SegmentKind::SeaRail,
				vec![
					PriceVariant::new(50.0, "USD"),
					PriceVariant::new(70.0, "USD"),
				],
			)],
			None,
			false,
		);
		let result = engine().quote_route(&route, "USD").unwrap();

		assert_eq!(result.exact_total, Some(120.0));
		assert_eq!(result.min_total, 120.0);
		assert_eq!(result.max_total, 120.0);
	}

	#[test]
	fn test_single_price_trigger_still_flips_the_mode() {
		// Kind, not pricing shape, is what flips the mode: the fixed
		// price stays in the band while the later variants get summed.
		let route = RouteEntry::new(
			vec![
				RouteSegment::single(SegmentKind::SeaRail, 10.0, "USD"),
				RouteSegment::multi(
					SegmentKind::Rail,
					vec![
						PriceVariant::new(50.0, "USD"),
						PriceVariant::new(70.0, "USD"),
					],
				),
			],
			None,
			false,
		);
		let result = engine().quote_route(&route, "USD").unwrap();

		assert_eq!(result.exact_total, Some(130.0));
		assert_eq!(result.min_total, 130.0);
		assert_eq!(result.max_total, 130.0);
	}

	#[test]
	fn test_variants_before_the_trigger_keep_their_band() {
		let route = RouteEntry::new(
			vec![
				RouteSegment::multi(
					SegmentKind::Sea,
					vec![
						PriceVariant::new(100.0, "USD"),
						PriceVariant::new(200.0, "USD"),
					],
				),
				RouteSegment::multi(
					SegmentKind::SeaRail,
					vec![PriceVariant::new(30.0, "USD")],
				),
			],
			None,
			false,
		);
		let result = engine().quote_route(&route, "USD").unwrap();

		assert_eq!(result.min_total, 130.0);
		assert_eq!(result.max_total, 230.0);
		// Exact is still reported; it tracks the minimal band end.
		assert_eq!(result.exact_total, Some(130.0));
	}

	#[test]
	fn test_global_sum_exactness() {
		// Without the trigger kind there is never an exact total
		let plain = RouteEntry::new(
			vec![
				RouteSegment::single(SegmentKind::Sea, 10.0, "USD"),
				RouteSegment::multi(
					SegmentKind::Rail,
					vec![
						PriceVariant::new(5.0, "USD"),
						PriceVariant::new(7.0, "USD"),
					],
				),
			],
			Some(DropOffFee::new(3.0, "USD")),
			false,
		);
		let result = engine().quote_route(&plain, "USD").unwrap();
		assert_eq!(result.exact_total, None);
		assert_eq!(result.min_total, 18.0);
		assert_eq!(result.max_total, 20.0);
	}

	#[test]
	fn test_monotonic_band() {
		let routes = [
			single_route(100.0, "USD"),
			RouteEntry::new(
				vec![RouteSegment::multi(
					SegmentKind::Sea,
					vec![
						PriceVariant::new(80.0, "EUR").with_surcharge(2.0),
						PriceVariant::new(95.0, "USD").with_surcharge(2.0),
					],
				)],
				Some(DropOffFee::new(10.0, "USD")),
				false,
			),
		];

		for currency in ["USD", "EUR", "RUB"] {
			for route in &routes {
				let r = engine().quote_route(route, currency).unwrap();
				assert!(r.min_total <= r.max_total);
				assert!(
					r.min_total_with_surcharge <= r.max_total_with_surcharge
				);
			}
		}
	}

	#[test]
	fn test_recomputation_is_idempotent() {
		let batch = RouteBatch {
			one_service_routes: vec![
				single_route(100.0, "USD"),
				single_route(50.0, "EUR"),
			],
			multi_service_routes: vec![],
		};
		let aggregator = engine();

		let first = aggregator.quote_batch(&batch, "RUB");
		let second = aggregator.quote_batch(&batch, "RUB");

		let order =
			|set: &QuoteSet| -> Vec<usize> {
				set.direct.quotes.iter().map(|q| q.index).collect()
			};
		assert_eq!(order(&first), order(&second));
		for (a, b) in first
			.direct
			.quotes
			.iter()
			.zip(second.direct.quotes.iter())
		{
			assert_eq!(a.result, b.result);
		}
	}

	#[test]
	fn test_sorted_ascending_by_sort_key() {
		let batch = RouteBatch {
			one_service_routes: vec![
				single_route(300.0, "USD"),
				single_route(100.0, "USD"),
				single_route(200.0, "USD"),
			],
			multi_service_routes: vec![],
		};
		let set = engine().quote_batch(&batch, "USD");

		let keys: Vec<f64> = set
			.direct
			.quotes
			.iter()
			.map(|q| q.result.sort_key)
			.collect();
		assert_eq!(keys, vec![100.0, 200.0, 300.0]);
		assert!(keys.windows(2).all(|w| w[0] <= w[1]));
	}

	#[test]
	fn test_currency_change_reorders_without_refetch() {
		// 99 USD with a 5% conversion markup undercuts 100 USD only while
		// the markup is dormant; displaying in rubles flips the order.
		let batch = RouteBatch {
			one_service_routes: vec![
				RouteEntry::new(
					vec![RouteSegment::single(SegmentKind::Sea, 100.0, "USD")],
					None,
					false,
				),
				RouteEntry::new(
					vec![RouteSegment::single(SegmentKind::Sea, 99.0, "USD")
						.with_surcharge(5.0)],
					None,
					false,
				),
			],
			multi_service_routes: vec![],
		};
		let aggregator = engine();

		let in_dollars = aggregator.quote_batch(&batch, "USD");
		let order: Vec<usize> =
			in_dollars.direct.quotes.iter().map(|q| q.index).collect();
		assert_eq!(order, vec![1, 0]);

		let in_rubles = aggregator.quote_batch(&batch, "RUB");
		let order: Vec<usize> =
			in_rubles.direct.quotes.iter().map(|q| q.index).collect();
		assert_eq!(order, vec![0, 1]);
		assert_eq!(in_rubles.direct.quotes[1].result.sort_key, 9355.5);
	}

	#[test]
	fn test_bad_route_does_not_poison_the_batch() {
		let batch = RouteBatch {
			one_service_routes: vec![
				single_route(100.0, "USD"),
				single_route(50.0, "XXX"), // unknown currency
				RouteEntry::new(
					vec![RouteSegment::multi(SegmentKind::Sea, vec![])],
					None,
					false,
				),
				single_route(25.0, "EUR"),
			],
			multi_service_routes: vec![],
		};
		let set = engine().quote_batch(&batch, "USD");

		let priced: Vec<usize> =
			set.direct.quotes.iter().map(|q| q.index).collect();
		assert_eq!(priced, vec![3, 0]); // 25 EUR < 100 USD in USD terms

		assert_eq!(set.direct.failures.len(), 2);
		assert_eq!(set.direct.failures[0].index, 1);
		assert_eq!(
			set.direct.failures[0].error,
			PricingError::UnknownCurrency("XXX".to_string()),
		);
		assert_eq!(set.direct.failures[1].index, 2);
		assert!(matches!(
			set.direct.failures[1].error,
			PricingError::MalformedRoute(_),
		));
	}

	#[test]
	fn test_empty_route_is_malformed() {
		let route = RouteEntry::new(vec![], None, false);
		assert!(matches!(
			engine().quote_route(&route, "USD"),
			Err(PricingError::MalformedRoute(_)),
		));
	}

	#[test]
	fn test_custom_conversion_currency() {
		// With EUR configured as the conversion currency, the markup
		// fires for EUR display and stays dormant for rubles.
		let mut aggregator = Aggregator::with_conversion_currency("EUR");
		aggregator.set_rates(BTreeMap::from([
			("USD".to_string(), 90.0),
			("EUR".to_string(), 100.0),
		]));

		let route = RouteEntry::new(
			vec![RouteSegment::single(SegmentKind::Sea, 100.0, "USD")
				.with_surcharge(10.0)],
			None,
			false,
		);

		let in_euros = aggregator.quote_route(&route, "EUR").unwrap();
		assert_eq!(in_euros.min_total, 90.0);
		assert_eq!(in_euros.min_total_with_surcharge, 99.0);

		let in_rubles = aggregator.quote_route(&route, "RUB").unwrap();
		assert_eq!(in_rubles.min_total_with_surcharge, 9000.0);
	}

	#[test]
	fn test_stable_order_on_equal_totals() {
		let batch = RouteBatch {
			one_service_routes: vec![
				single_route(100.0, "USD"),
				single_route(100.0, "USD"),
			],
			multi_service_routes: vec![],
		};
		let set = engine().quote_batch(&batch, "USD");
		let order: Vec<usize> =
			set.direct.quotes.iter().map(|q| q.index).collect();
		assert_eq!(order, vec![0, 1]);
	}
}
