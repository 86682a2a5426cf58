use std::collections::{BTreeMap, btree_map::Entry};

use calamine::{Data, Range};

use crate::{
    core::{
        period::Period,
        plan::Plan,
        season::Season,
        table::{PlanRates, RatePeriodEntry, RateTable, SeasonRates},
    },
    prelude::*,
    quantity::{energy::DailyKilowattHours, rate::KilowattHourRate},
    rate_sheet::{
        baseline::Baselines,
        cell::{CellRange, Row},
    },
};

/// `A14:I25`.
const RATE_RANGE: CellRange = CellRange::new((13, 0), (24, 8));

const PLAN_COLUMN: u32 = 0;
const SEASON_COLUMN: u32 = 5;
const PERIOD_COLUMN: u32 = 6;
const RATE_COLUMN: u32 = 7;
const CREDIT_COLUMN: u32 = 8;

/// Placeholder of an absent baseline credit.
const NOT_APPLICABLE: &str = "-";

/// Plan, season, and period carried over merged cells: a merged block only
/// has its value in the first row.
#[derive(Copy, Clone, Debug, Default)]
struct RowState {
    plan: Option<Plan>,
    season: Option<Season>,
    period: Option<Period>,
}

impl RowState {
    fn advance(&mut self, row: &Row<'_>) -> Result<(Plan, Season, Period), RateError> {
        if let Some(plan) = row.cell(PLAN_COLUMN).text().and_then(Plan::recognize) {
            self.plan = Some(plan);
        }

        let season_cell = row.cell(SEASON_COLUMN);
        if !season_cell.is_empty() {
            self.season = Some(season_cell.text().and_then(Season::from_label).ok_or_else(|| {
                RateError::malformed(format!("unknown season in row {}", row.number()))
            })?);
        }

        let period_cell = row.cell(PERIOD_COLUMN);
        if !period_cell.is_empty() {
            self.period = Some(period_cell.text().and_then(Period::from_label).ok_or_else(|| {
                RateError::malformed(format!("unknown period in row {}", row.number()))
            })?);
        }

        match (self.plan, self.season, self.period) {
            (Some(plan), Some(season), Some(period)) => Ok((plan, season, period)),
            _ => Err(RateError::malformed(format!(
                "row {} precedes its plan, season, or period: {self:?}",
                row.number(),
            ))),
        }
    }
}

/// Rates of one plan and season while the sheet is being scanned.
#[derive(Copy, Clone, Debug)]
struct SeasonDraft {
    baseline: DailyKilowattHours,
    peak: Option<RatePeriodEntry>,
    off_peak: Option<RatePeriodEntry>,
}

impl SeasonDraft {
    const fn new(baseline: DailyKilowattHours) -> Self {
        Self { baseline, peak: None, off_peak: None }
    }

    const fn entry_mut(&mut self, period: Period) -> &mut Option<RatePeriodEntry> {
        match period {
            Period::Peak => &mut self.peak,
            Period::OffPeak => &mut self.off_peak,
        }
    }

    fn finish(self, plan: Plan, season: Season) -> Result<SeasonRates, RateError> {
        let missing =
            |period: Period| RateError::malformed(format!("{plan} has no {season} {period} rate"));
        Ok(SeasonRates {
            baseline: self.baseline,
            peak: self.peak.ok_or_else(|| missing(Period::Peak))?,
            off_peak: self.off_peak.ok_or_else(|| missing(Period::OffPeak))?,
        })
    }
}

pub fn extract(sheet: &Range<Data>, baselines: &Baselines) -> Result<RateTable, RateError> {
    let mut state = RowState::default();
    let mut drafts: BTreeMap<(Plan, Season), SeasonDraft> = BTreeMap::new();

    for row in RATE_RANGE.rows(sheet) {
        if row.is_empty() {
            continue;
        }
        let (plan, season, period) = state.advance(&row)?;
        let draft = match drafts.entry((plan, season)) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(SeasonDraft::new(baselines.get(season)?)),
        };
        let entry = read_entry(&row)?;
        trace!(row = row.number(), %plan, %season, %period, ?entry);
        *draft.entry_mut(period) = Some(entry);
    }

    let mut plans = BTreeMap::new();
    for plan in Plan::ALL {
        let summer = drafts.remove(&(plan, Season::Summer));
        let winter = drafts.remove(&(plan, Season::Winter));
        let rates = match (summer, winter) {
            (None, None) => continue,
            (Some(summer), Some(winter)) => PlanRates {
                summer: summer.finish(plan, Season::Summer)?,
                winter: winter.finish(plan, Season::Winter)?,
            },
            (None, Some(_)) => {
                return Err(RateError::malformed(format!("{plan} has no summer rates")));
            }
            (Some(_), None) => {
                return Err(RateError::malformed(format!("{plan} has no winter rates")));
            }
        };
        plans.insert(plan, rates);
    }
    Ok(RateTable::from(plans))
}

fn read_entry(row: &Row<'_>) -> Result<RatePeriodEntry, RateError> {
    let rate = row.cell(RATE_COLUMN).number().ok_or_else(|| {
        RateError::malformed(format!("rate in row {} is not a number", row.number()))
    })?;

    let credit_cell = row.cell(CREDIT_COLUMN);
    let baseline_credit = if credit_cell.is_empty()
        || credit_cell.text().map(str::trim) == Some(NOT_APPLICABLE)
    {
        KilowattHourRate::ZERO
    } else {
        credit_cell.number().map(KilowattHourRate).ok_or_else(|| {
            RateError::malformed(format!("baseline credit in row {} is not a number", row.number()))
        })?
    };

    Ok(RatePeriodEntry { rate: KilowattHourRate(rate), baseline_credit })
}
