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
use thiserror::Error;

/// Failure kinds of the pricing engine. A failed route never poisons the
/// rest of its batch; the aggregator reports these per route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
	#[error("unknown currency: {0}")]
	UnknownCurrency(String),

	#[error("no exchange rates have been loaded")]
	MissingRates,

	#[error("malformed route: {0}")]
	MalformedRoute(String),
}
