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

/// Plain-text table printer for the quote and rate reports.
pub struct Table {
	column_count: usize,
	rows: Vec<Row>,
	right_align: Vec<bool>, // indicates columns by index
}

enum Row {
	Header(Vec<String>),
	Data(Vec<String>),
	Separator,
}

impl Table {
	pub fn new(column_count: usize) -> Self {
		Self {
			column_count,
			rows: Vec::new(),
			right_align: vec![false; column_count],
		}
	}

	pub fn add_header(&mut self, row: Vec<&str>) {
		self.rows.push(Row::Header(
			row.into_iter().map(|s| s.to_string()).collect(),
		));
	}

	pub fn add_row(&mut self, row: Vec<&str>) {
		self.rows
			.push(Row::Data(row.into_iter().map(|s| s.to_string()).collect()));
	}

	pub fn add_separator(&mut self) {
		self.rows.push(Row::Separator);
	}

	/// Specifies columns that should be right-aligned by index.
	pub fn right_align(&mut self, cols: Vec<usize>) {
		for col in cols {
			self.right_align[col] = true;
		}
	}

	pub fn print(&self) {
		let widths = self.column_widths();

		println!();
		for row in &self.rows {
			match row {
				Row::Header(cells) | Row::Data(cells) => {
					self.print_row(&widths, cells)
				},
				Row::Separator => {
					let total: usize = widths.iter().sum::<usize>()
						+ 3 * (self.column_count - 1);
					println!("{:-<total$}", "", total = total);
				},
			}
		}
	}

	fn column_widths(&self) -> Vec<usize> {
		let mut widths = vec![0; self.column_count];
		for row in &self.rows {
			if let Row::Header(cells) | Row::Data(cells) = row {
				for (i, cell) in cells.iter().enumerate() {
					widths[i] = widths[i].max(cell.chars().count());
				}
			}
		}
		widths
	}

	fn print_row(&self, widths: &[usize], cells: &[String]) {
		let mut line = String::new();
		for (i, cell) in cells.iter().enumerate() {
			// pad by char count; cells may hold non-ASCII currency glyphs
			let pad = widths[i].saturating_sub(cell.chars().count());
			if self.right_align[i] {
				line.push_str(&" ".repeat(pad));
				line.push_str(cell);
			} else {
				line.push_str(cell);
				line.push_str(&" ".repeat(pad));
			}
			if i < cells.len() - 1 {
				line.push_str("   ");
			}
		}
		println!("{}", line.trim_end());
	}
}
