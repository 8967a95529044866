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
use crate::pricing::rates::{RateTable, PIVOT_CURRENCY};
use crate::reports::table::Table;
use crate::util::money::{currency_symbol, format_grouped};

/// Prints the session's spot rates, one banner line per currency,
/// pivot included so the reader sees what everything is quoted against.
pub struct RateReporter;

impl RateReporter {
	pub fn print(rates: &RateTable) {
		let mut table = Table::new(2);
		table.add_header(vec!["Currency", "Rate"]);
		table.add_separator();

		for (code, rate) in rates.iter() {
			let symbol = currency_symbol(PIVOT_CURRENCY).unwrap_or(PIVOT_CURRENCY);
			let line = format!("{} {}", format_grouped(rate), symbol);
			table.add_row(vec![&format!("1 {}", code), &line]);
		}

		table.right_align(vec![1]);
		table.print();
	}
}
