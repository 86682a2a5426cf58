//! Normalized rate table of one tariff document.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    core::{period::Period, plan::Plan, season::Season},
    quantity::{energy::DailyKilowattHours, rate::KilowattHourRate},
};

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct RatePeriodEntry {
    pub rate: KilowattHourRate,

    /// Usually negative, zero when the plan has no baseline credit.
    pub baseline_credit: KilowattHourRate,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct SeasonRates {
    pub baseline: DailyKilowattHours,
    pub peak: RatePeriodEntry,
    pub off_peak: RatePeriodEntry,
}

impl SeasonRates {
    pub const fn entry(&self, period: Period) -> RatePeriodEntry {
        match period {
            Period::Peak => self.peak,
            Period::OffPeak => self.off_peak,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct PlanRates {
    pub summer: SeasonRates,
    pub winter: SeasonRates,
}

impl PlanRates {
    pub const fn season(&self, season: Season) -> &SeasonRates {
        match season {
            Season::Summer => &self.summer,
            Season::Winter => &self.winter,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, derive_more::From)]
pub struct RateTable(BTreeMap<Plan, PlanRates>);

impl RateTable {
    #[cfg(test)]
    pub fn get(&self, plan: Plan) -> Option<&PlanRates> {
        self.0.get(&plan)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Plan, &PlanRates)> {
        self.0.iter().map(|(plan, rates)| (*plan, rates))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
