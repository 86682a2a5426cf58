use calamine::{Data, Range};

use crate::{
    core::season::Season,
    prelude::*,
    quantity::energy::DailyKilowattHours,
    rate_sheet::cell::CellRange,
};

/// `A13:D36`.
const WINTER_RANGE: CellRange = CellRange::new((12, 0), (35, 3));

/// `F13:I36`.
const SUMMER_RANGE: CellRange = CellRange::new((12, 5), (35, 8));

const CODE_MARKER: &str = "Code";
const LABEL_COLUMN: u32 = 0;
const ALLOCATION_COLUMN: u32 = 1;

/// Selects the baseline allocation: customer territory and heat-source code.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BaselineRegion {
    pub territory: String,
    pub heat_source: char,
}

impl Default for BaselineRegion {
    /// Territory W, basic electricity.
    fn default() -> Self {
        Self { territory: "W".to_owned(), heat_source: 'B' }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Baselines {
    pub summer: Option<DailyKilowattHours>,
    pub winter: Option<DailyKilowattHours>,
}

impl Baselines {
    pub fn get(&self, season: Season) -> Result<DailyKilowattHours, RateError> {
        let allocation = match season {
            Season::Summer => self.summer,
            Season::Winter => self.winter,
        };
        allocation.ok_or_else(|| RateError::malformed(format!("no {season} baseline allocation")))
    }
}

pub fn extract(sheet: &Range<Data>, region: &BaselineRegion) -> Result<Baselines, RateError> {
    Ok(Baselines {
        summer: scan(sheet, SUMMER_RANGE, region)?,
        winter: scan(sheet, WINTER_RANGE, region)?,
    })
}

/// Scan the blocks of one season.
///
/// A row mentioning `Code` opens the block of the heat source named by the second-to-last
/// character. Following rows list allocations per territory until the next block.
/// Rows above the first block are ignored. The territory must be listed at most once per block.
fn scan(
    sheet: &Range<Data>,
    range: CellRange,
    region: &BaselineRegion,
) -> Result<Option<DailyKilowattHours>, RateError> {
    let mut heat_source = None;
    let mut allocation = None;

    for row in range.rows(sheet) {
        let label = row.cell(LABEL_COLUMN).text();
        if let Some(label) = label
            && label.contains(CODE_MARKER)
        {
            heat_source = label.chars().rev().nth(1);
            trace!(row = row.number(), ?heat_source, "heat source block");
            continue;
        }
        if heat_source == Some(region.heat_source)
            && label.map(str::trim) == Some(region.territory.as_str())
        {
            if allocation.is_some() {
                return Err(RateError::malformed(format!(
                    "duplicate baseline allocation for territory `{}` and heat source `{}` in row {} of {range}",
                    region.territory,
                    region.heat_source,
                    row.number(),
                )));
            }
            let value = row.cell(ALLOCATION_COLUMN).number().ok_or_else(|| {
                RateError::malformed(format!(
                    "baseline allocation in row {} of {range} is not a number",
                    row.number(),
                ))
            })?;
            allocation = Some(DailyKilowattHours(value));
        }
    }

    Ok(allocation)
}
