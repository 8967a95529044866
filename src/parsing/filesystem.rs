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
use crate::config::config_file::Config;
use crate::pricing::route::RouteBatch;
use anyhow::{anyhow, Context, Error};
use dirs::home_dir;
use std::collections::BTreeMap;
use std::fs;
use std::fs::File;
use std::path::PathBuf;

pub struct Filesystem;

impl Filesystem {
	pub fn new() -> Self {
		Self
	}

	/// Fetches the config from the given path, or default path if none.
	/// The default file is created empty on first use.
	pub fn get_config(
		&self,
		custom_config_path: Option<&String>,
	) -> Result<Config, Error> {
		let config_path = match &custom_config_path {
			None => {
				let home_dir = home_dir().ok_or_else(|| {
					anyhow!("unable to determine home directory")
				})?;
				home_dir.join(".config/freightcalc/config.toml")
			},
			Some(p) => PathBuf::from(p),
		};

		if !config_path.exists() && custom_config_path.is_none() {
			if let Some(parent) = config_path.parent() {
				fs::create_dir_all(parent)?;
			}
			File::create(config_path.clone())?;
		}

		let content = fs::read_to_string(&config_path)?;
		let config: Config = toml::from_str(&content)
			.map_err(|e| anyhow!("failed to parse config: {}", e))?;

		Ok(config)
	}

	/// Reads a rates file: a JSON object of currency code to rate.
	pub fn read_rates(
		&self,
		path: &str,
	) -> Result<BTreeMap<String, f64>, Error> {
		let content = fs::read_to_string(path)
			.with_context(|| format!("cannot read rates file {}", path))?;
		serde_json::from_str(&content)
			.with_context(|| format!("invalid rates file {}", path))
	}

	/// Reads a saved calculate-endpoint response.
	pub fn read_routes(&self, path: &str) -> Result<RouteBatch, Error> {
		let content = fs::read_to_string(path)
			.with_context(|| format!("cannot read routes file {}", path))?;
		serde_json::from_str(&content)
			.with_context(|| format!("invalid routes file {}", path))
	}
}
