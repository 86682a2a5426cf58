use std::collections::BTreeMap;

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

use crate::{
    core::{
        index::DocumentIndex,
        locator::DocumentLocator,
        plan::Plan,
        season::Season,
        source::DocumentFetcher,
        table::RateTable,
    },
    prelude::*,
    quantity::{energy::KilowattHours, rate::KilowattHourRate},
    rate_sheet::{self, BaselineRegion},
};

#[derive(bon::Builder)]
pub struct RateResolver<F> {
    index: DocumentIndex,
    fetcher: F,

    #[builder(default)]
    region: BaselineRegion,
}

#[derive(Clone, Debug, Serialize)]
pub struct Resolution {
    pub timestamp: NaiveDateTime,
    pub locator: DocumentLocator,
    pub season: Season,

    /// Final per-kilowatt-hour rate of each plan published in the document.
    pub rates: BTreeMap<Plan, KilowattHourRate>,
}

impl<F: DocumentFetcher> RateResolver<F> {
    /// Resolve the rates in effect at the timestamp.
    ///
    /// `usage` is the cumulative consumption over the billing period of `bill_days`,
    /// both only matter for the baseline credit.
    #[instrument(skip_all, fields(timestamp = %timestamp, usage = %usage, bill_days = bill_days))]
    pub fn resolve(
        &self,
        timestamp: NaiveDateTime,
        usage: KilowattHours,
        bill_days: u32,
    ) -> Result<Resolution, RateError> {
        let locator = self.index.lookup(timestamp)?;
        info!(%locator, "found the rate document");
        let table = rate_sheet::parse(&self.fetcher.fetch(locator)?, &self.region)?;
        if table.is_empty() {
            warn!(%locator, "the document lists none of the time-of-use plans");
        }
        let rates = rates(&table, timestamp, usage, bill_days);
        for (plan, rate) in &rates {
            debug!(%plan, %rate);
        }
        Ok(Resolution { timestamp, locator: locator.clone(), season: Season::of(timestamp), rates })
    }
}

/// Evaluate every plan of the table at the timestamp.
pub fn rates(
    table: &RateTable,
    timestamp: NaiveDateTime,
    usage: KilowattHours,
    bill_days: u32,
) -> BTreeMap<Plan, KilowattHourRate> {
    let season = Season::of(timestamp);
    table
        .iter()
        .map(|(plan, plan_rates)| {
            let season_rates = plan_rates.season(season);
            let entry = season_rates.entry(plan.period_at(timestamp.hour()));
            let rate = if plan.has_baseline_credit()
                && usage <= season_rates.baseline.over_days(bill_days)
            {
                entry.rate + entry.baseline_credit
            } else {
                entry.rate
            };
            (plan, rate)
        })
        .collect()
}
