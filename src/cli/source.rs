//! Where the rate documents come from.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use ureq::Agent;
use url::Url;

use crate::{
    api::{ListingFile, TariffPage, new_agent},
    core::{index::DocumentIndex, source::ListingSource},
    prelude::*,
    rate_sheet::BaselineRegion,
};

#[derive(Parser)]
pub struct SourceArgs {
    /// Tariff page listing the rate workbooks.
    #[clap(
        long = "tariff-page",
        env = "TOU_TARIFF_PAGE",
        default_value = "https://www.pge.com/tariffs/electric.shtml"
    )]
    pub tariff_page: Url,

    /// CSS selector of the workbook links on the tariff page.
    #[clap(long = "listing-selector", env = "TOU_LISTING_SELECTOR", default_value = "li a[href]")]
    pub listing_selector: String,

    /// Read the listing from a TOML file instead of the tariff page.
    #[clap(long = "listing-file", env = "TOU_LISTING_FILE")]
    pub listing_file: Option<PathBuf>,

    /// HTTP timeout in seconds.
    #[clap(long = "timeout-secs", env = "TOU_TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,
}

impl SourceArgs {
    pub fn new_agent(&self) -> Agent {
        new_agent(Duration::from_secs(self.timeout_secs))
    }

    pub fn build_index(&self, agent: &Agent) -> Result<DocumentIndex> {
        let entries = match &self.listing_file {
            Some(path) => ListingFile::new(path).entries(),
            None => {
                TariffPage::new(agent.clone(), self.tariff_page.clone(), &self.listing_selector)
                    .entries()
            }
        }
        .context("failed to list the rate documents")?;
        let index = DocumentIndex::build(entries)?;
        ensure!(!index.is_empty(), "the listing has no rate documents");
        Ok(index)
    }
}

#[derive(Parser)]
pub struct RegionArgs {
    /// Baseline territory letter.
    #[clap(long = "territory", env = "TOU_BASELINE_TERRITORY", default_value = "W")]
    pub territory: String,

    /// Baseline heat-source code: `B` for basic electric, `H` for all-electric.
    #[clap(long = "heat-source", env = "TOU_BASELINE_HEAT_SOURCE", default_value = "B")]
    pub heat_source: char,
}

impl From<RegionArgs> for BaselineRegion {
    fn from(args: RegionArgs) -> Self {
        Self {
            territory: args.territory.trim().to_ascii_uppercase(),
            heat_source: args.heat_source.to_ascii_uppercase(),
        }
    }
}
