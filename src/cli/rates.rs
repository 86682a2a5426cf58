use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use clap::Parser;
use enumset::EnumSet;

use crate::{
    api::CachingFetcher,
    cli::source::{RegionArgs, SourceArgs},
    core::{plan::Plan, resolver::RateResolver},
    prelude::*,
    quantity::energy::KilowattHours,
    tables::build_resolution_table,
};

const TIMESTAMP_FORMATS: [&str; 4] =
    ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

#[derive(Parser)]
pub struct RatesArgs {
    /// Local wall-clock time, for example `2023-10-04 06:00`. Defaults to now.
    #[clap(long, value_parser = parse_timestamp)]
    at: Option<NaiveDateTime>,

    /// Cumulative usage over the billing period so far.
    #[clap(long = "usage-kwh", default_value = "0")]
    usage: KilowattHours,

    /// Days in the billing period.
    #[clap(long = "bill-days", default_value = "0")]
    bill_days: u32,

    /// Only show these plans.
    #[clap(long, value_delimiter = ',', num_args = 1.., ignore_case = true)]
    plans: Vec<Plan>,

    /// Print JSON instead of the table.
    #[clap(long)]
    json: bool,

    /// Where downloaded rate documents are kept.
    #[clap(long = "cache-dir", env = "TOU_CACHE_DIR", default_value = "cache")]
    cache_dir: PathBuf,

    #[clap(flatten)]
    source: SourceArgs,

    #[clap(flatten)]
    region: RegionArgs,
}

impl RatesArgs {
    /// Empty selection means all plans.
    fn plans(&self) -> EnumSet<Plan> {
        let plans: EnumSet<Plan> = self.plans.iter().copied().collect();
        if plans.is_empty() { EnumSet::all() } else { plans }
    }

    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let plans = self.plans();
        let timestamp = self.at.unwrap_or_else(|| Local::now().naive_local());

        let agent = self.source.new_agent();
        let index = self.source.build_index(&agent)?;
        let resolver = RateResolver::builder()
            .index(index)
            .fetcher(CachingFetcher::new(agent, self.cache_dir))
            .region(self.region.into())
            .build();

        let mut resolution = resolver
            .resolve(timestamp, self.usage, self.bill_days)
            .with_context(|| format!("failed to resolve the rates at {timestamp}"))?;
        resolution.rates.retain(|plan, _| plans.contains(*plan));

        if self.json {
            println!("{}", serde_json::to_string_pretty(&resolution)?);
        } else {
            println!("{}", build_resolution_table(&resolution));
        }
        Ok(())
    }
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .with_context(|| format!("expected `YYYY-MM-DD HH:MM[:SS]`, got `{value}`"))
}
