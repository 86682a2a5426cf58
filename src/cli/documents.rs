use chrono::{Local, NaiveDateTime};
use clap::Parser;

use crate::{cli::source::SourceArgs, prelude::*, tables::build_index_table};

#[derive(Parser)]
pub struct DocumentsArgs {
    #[clap(flatten)]
    source: SourceArgs,
}

impl DocumentsArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let index = self.source.build_index(&self.source.new_agent())?;
        let now: NaiveDateTime = Local::now().naive_local();
        let in_effect = index.lookup_at(now, now).ok();
        if in_effect.is_none() {
            warn!("no document is in effect now");
        }
        println!("{}", build_index_table(&index, in_effect, now));
        Ok(())
    }
}
