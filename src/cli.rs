mod documents;
mod rates;
mod source;

use clap::{Parser, Subcommand};

use crate::cli::{documents::DocumentsArgs, rates::RatesArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve the rate of every time-of-use plan at the given moment.
    #[clap(name = "rates")]
    Rates(Box<RatesArgs>),

    /// List the published rate documents with their effective date ranges.
    #[clap(name = "documents")]
    Documents(Box<DocumentsArgs>),
}
