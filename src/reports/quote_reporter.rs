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
use crate::pricing::aggregator::{QuoteSet, Quoted, QuotedList};
use crate::pricing::route::RouteResult;
use crate::pricing::segment::RouteSegment;
use crate::reports::table::Table;
use crate::util::money::format_grouped;

/// Renders both quote lists as tables, cheapest route first, with the
/// failures the aggregator isolated listed underneath each table.
pub struct QuoteReporter;

impl QuoteReporter {
	pub fn print(set: &QuoteSet, display_currency: &str) {
		Self::print_list("Direct routes", &set.direct, display_currency);
		Self::print_list("Multi-carrier routes", &set.multi, display_currency);
	}

	fn print_list(title: &str, list: &QuotedList, display_currency: &str) {
		if list.quotes.is_empty() && list.failures.is_empty() {
			return;
		}

		println!("\n{}", title);

		let mut table = Table::new(6);
		table.add_header(vec![
			"#",
			"Legs",
			"Valid",
			"Price",
			"With conversion",
			"Note",
		]);
		table.add_separator();

		for quote in &list.quotes {
			let index = (quote.index + 1).to_string();
			let legs = Self::legs(quote);
			let window = Self::window(quote);
			let price = Self::price(&quote.result, display_currency, false);
			let inflated = Self::price(&quote.result, display_currency, true);
			let note = Self::note(quote);

			table.add_row(vec![
				&index, &legs, &window, &price, &inflated, &note,
			]);
		}

		table.right_align(vec![0, 3, 4]);
		table.print();

		for failure in &list.failures {
			println!(
				"route {} skipped: {}",
				failure.index + 1,
				failure.error
			);
		}
	}

	fn legs(quote: &Quoted) -> String {
		quote
			.entry
			.segments()
			.iter()
			.map(Self::leg)
			.collect::<Vec<_>>()
			.join("; ")
	}

	/// "sea Acme Lines: Shanghai → Vostochny (FIFO/FILO)", with every
	/// descriptive part optional.
	fn leg(segment: &RouteSegment) -> String {
		let mut out = segment.kind.label().to_string();

		if let Some(company) = &segment.company {
			out.push(' ');
			out.push_str(company);
		}

		if let (Some(start), Some(end)) =
			(&segment.start_point, &segment.end_point)
		{
			out.push_str(&format!(": {} → {}", start, end));
		}

		let conditions: Vec<&str> = segment
			.prices
			.iter()
			.filter_map(|v| v.condition.as_deref())
			.collect();
		if !conditions.is_empty() {
			out.push_str(&format!(" ({})", conditions.join("/")));
		}

		out
	}

	fn note(quote: &Quoted) -> String {
		let mut parts: Vec<&str> = Vec::new();
		if quote.entry.may_be_invalid() {
			parts.push("may be invalid");
		}
		for segment in quote.entry.segments() {
			if let Some(comment) = &segment.comment {
				parts.push(comment);
			}
		}
		parts.join("; ")
	}

	fn window(quote: &Quoted) -> String {
		match quote.entry.effective_window() {
			Some((from, to)) => format!("{} – {}", from, to),
			None => String::new(),
		}
	}

	/// An exact total prints as one figure, a band as "min – max".
	fn price(
		result: &RouteResult,
		display_currency: &str,
		with_surcharge: bool,
	) -> String {
		let (min, max, exact) = if with_surcharge {
			(
				result.min_total_with_surcharge,
				result.max_total_with_surcharge,
				result.exact_total_with_surcharge,
			)
		} else {
			(result.min_total, result.max_total, result.exact_total)
		};

		match exact {
			Some(total) => {
				format!("{} {}", format_grouped(total), display_currency)
			},
			None if min == max => {
				format!("{} {}", format_grouped(min), display_currency)
			},
			None => format!(
				"{} – {} {}",
				format_grouped(min),
				format_grouped(max),
				display_currency
			),
		}
	}
}
