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

/// Rounds to 2 decimal places, half away from zero. The tiny epsilon
/// counters binary representation error first, so e.g. 2.675 (stored as
/// 2.67499…) still rounds up to 2.68.
pub fn round2(value: f64) -> f64 {
	((value + 1e-9) * 100.0).round() / 100.0
}

/// Renders a monetary value with exactly two decimals and the integer
/// part grouped by thousands with spaces: 1234567.5 -> "1 234 567.50".
pub fn format_grouped(value: f64) -> String {
	let raw = format!("{:.2}", value);
	let (number, fraction) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));
	let (sign, digits) = match number.strip_prefix('-') {
		Some(rest) => ("-", rest),
		None => ("", number),
	};

	let mut grouped = String::new();
	for (i, ch) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			grouped.push(' ');
		}
		grouped.push(ch);
	}

	format!("{}{}.{}", sign, grouped, fraction)
}

/// Currency glyphs shown in the spot-rate banner and drop-off lines.
pub fn currency_symbol(code: &str) -> Option<&'static str> {
	match code {
		"RUB" => Some("₽"),
		"USD" => Some("$"),
		"EUR" => Some("€"),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_round2_plain() {
		assert_eq!(round2(1.234), 1.23);
		assert_eq!(round2(1.235), 1.24);
		assert_eq!(round2(9000.0), 9000.0);
	}

	#[test]
	fn test_round2_counters_float_drift() {
		// 2.675 has no exact binary representation and sits just below
		// the midpoint; naive rounding would give 2.67
		assert_eq!(round2(2.675), 2.68);
		assert_eq!(round2(1.005), 1.01);
	}

	#[test]
	fn test_round2_negative() {
		assert_eq!(round2(-1.234), -1.23);
	}

	#[test]
	fn test_format_grouped() {
		assert_eq!(format_grouped(0.0), "0.00");
		assert_eq!(format_grouped(999.9), "999.90");
		assert_eq!(format_grouped(1234.5), "1 234.50");
		assert_eq!(format_grouped(1234567.89), "1 234 567.89");
		assert_eq!(format_grouped(-23625.0), "-23 625.00");
	}

	#[test]
	fn test_currency_symbol() {
		assert_eq!(currency_symbol("RUB"), Some("₽"));
		assert_eq!(currency_symbol("CNY"), None);
	}
}
