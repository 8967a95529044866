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
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
	pub backend: Option<Backend>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Backend {
	/// Base URL of the quoting backend, e.g. "https://rates.example.com".
	/// Without it only the offline file modes work.
	pub base_url: Option<String>,
}

impl Config {
	pub fn base_url(&self) -> Option<&str> {
		self.backend.as_ref()?.base_url.as_deref()
	}
}
