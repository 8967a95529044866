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
use crate::api::http::{CalculateRequest, Client};
use crate::parsing::filesystem::Filesystem;
use crate::pricing::aggregator::Aggregator;
use crate::pricing::route::RouteBatch;
use crate::reports::quote_reporter::QuoteReporter;
use crate::reports::rate_reporter::RateReporter;
use crate::util::money::format_grouped;
use anyhow::{anyhow, bail, Error};
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use std::cmp::PartialEq;
use std::collections::BTreeMap;

mod api;
mod config;
mod parsing;
mod pricing;
mod reports;
mod util;

#[derive(Parser)]
#[command(
	name = "freightcalc",
	version = "0.3",
	about = "Freight route quoting tool"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The command to execute
	command: Directive,

	/// Arguments for the Convert command: AMOUNT FROM TO
	#[arg(required = false)]
	args: Vec<String>,

	// -----------
	// -- FLAGS --
	// -----------
	/// Currency to display route totals in
	#[arg(short, long, default_value = "RUB")]
	currency: String,

	/// Read route candidates from this file instead of the backend
	#[arg(short, long)]
	routes: Option<String>,

	/// Read exchange rates from this file instead of the backend
	#[arg(long)]
	rates: Option<String>,

	/// Custom config file location (default: ~/.config/freightcalc/config.toml)
	#[arg(long)]
	config: Option<String>,

	/// Dispatch date for the route request (YYYY-MM-DD, default today)
	#[arg(long)]
	date: Option<String>,

	/// Include routes whose rates are not in force on the dispatch date
	#[arg(long)]
	all: bool,

	/// Departure point id, as known to the backend
	#[arg(long)]
	departure: Option<i64>,

	/// Destination point id, as known to the backend
	#[arg(long)]
	destination: Option<i64>,

	/// Cargo weight in kilograms
	#[arg(long, default_value = "24000")]
	weight: f64,

	/// Container type, e.g. 20DC or 40HC
	#[arg(long, default_value = "40HC")]
	container: String,
}

impl Cli {
	/// Extra validations on top of what clap does
	fn validate(&self) -> Result<(), Error> {
		if self.command == Directive::Convert && self.args.len() != 3 {
			bail!("Convert expects exactly: AMOUNT FROM TO");
		}

		if self.command == Directive::Quote
			&& self.routes.is_none()
			&& (self.departure.is_none() || self.destination.is_none())
		{
			bail!(
				"Quote needs either --routes FILE or both \
				 --departure and --destination"
			);
		}

		Ok(())
	}
}

#[derive(ValueEnum, Clone, PartialEq)]
enum Directive {
	Quote,   // price route candidates between two points
	Rates,   // show the session exchange rates
	Convert, // one-off currency conversion
}

fn main() -> Result<(), Error> {
	let args = Cli::parse();
	args.validate()?;

	let fs = Filesystem::new();

	let mut aggregator = Aggregator::new();
	aggregator.set_rates(load_rates(&args, &fs)?);

	match args.command {
		Directive::Quote => {
			let batch = load_routes(&args, &fs)?;
			let set = aggregator.quote_batch(&batch, &args.currency);
			QuoteReporter::print(&set, &args.currency);
		},
		Directive::Rates => {
			RateReporter::print(aggregator.rate_table()?);
		},
		Directive::Convert => {
			let amount: f64 = args.args[0]
				.parse()
				.map_err(|_| anyhow!("invalid amount: {}", args.args[0]))?;
			let (from, to) = (&args.args[1], &args.args[2]);

			let converted = aggregator.convert(amount, from, to)?;
			println!(
				"{} {} = {} {}",
				args.args[0],
				from.to_uppercase(),
				format_grouped(converted),
				to.to_uppercase()
			);
		},
	}

	Ok(())
}

/// Rates come from a file when given one, otherwise from the backend.
fn load_rates(
	args: &Cli,
	fs: &Filesystem,
) -> Result<BTreeMap<String, f64>, Error> {
	match &args.rates {
		Some(path) => fs.read_rates(path),
		None => backend(args, fs)?.fetch_rates(),
	}
}

/// Route candidates likewise; the backend path needs the point ids.
fn load_routes(args: &Cli, fs: &Filesystem) -> Result<RouteBatch, Error> {
	if let Some(path) = &args.routes {
		return fs.read_routes(path);
	}

	let request = CalculateRequest {
		dispatch_date: dispatch_date(args)?,
		only_in_selected_date_range: !args.all,
		// both checked in Cli::validate for the backend path
		departure_id: args.departure.unwrap_or_default(),
		destination_id: args.destination.unwrap_or_default(),
		cargo_weight: args.weight,
		container_type: args.container.clone(),
	};

	backend(args, fs)?.calculate(&request)
}

fn backend(args: &Cli, fs: &Filesystem) -> Result<Client, Error> {
	let config = fs.get_config(args.config.as_ref())?;
	let base_url = config.base_url().ok_or_else(|| {
		anyhow!(
			"no backend.base_url in config; pass --rates/--routes \
			 files to work offline"
		)
	})?;
	Ok(Client::new(base_url))
}

fn dispatch_date(args: &Cli) -> Result<NaiveDate, Error> {
	match &args.date {
		Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
			.map_err(|_| anyhow!("invalid date: {} (want YYYY-MM-DD)", raw)),
		None => Ok(Local::now().date_naive()),
	}
}
