//! Tariff workbook parser.
//!
//! A published workbook has many sheets, only two of which matter:
//!
//! - the baseline allocations, `…ElecBaseline…`, with kWh/day per territory and heat source;
//! - the residential time-of-use rates, `…Res Inclu TOU…`.
//!
//! Cell ranges are fixed by the publisher's layout. Any deviation surfaces as
//! [`RateError::MalformedDocument`] rather than as a silently wrong table.

mod baseline;
mod cell;
#[cfg(test)]
pub mod fixtures;
mod rates;

use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx};

pub use self::baseline::BaselineRegion;
use crate::{core::table::RateTable, prelude::*};

pub const RATE_SHEET_MARKER: &str = "Res Inclu TOU";
pub const BASELINE_SHEET_MARKER: &str = "ElecBaseline";

#[instrument(skip_all, fields(n_bytes = bytes.len()))]
pub fn parse(bytes: &[u8], region: &BaselineRegion) -> Result<RateTable, RateError> {
    let mut workbook = Xlsx::new(Cursor::new(bytes))
        .map_err(|error| RateError::malformed(format!("unreadable workbook: {error}")))?;

    let sheet_names = workbook.sheet_names();
    let rate_sheet = find_sheet(&sheet_names, RATE_SHEET_MARKER)?;
    let baseline_sheet = find_sheet(&sheet_names, BASELINE_SHEET_MARKER)?;
    debug!(rate_sheet, baseline_sheet, "found the sheets");

    let baseline_range = read_sheet(&mut workbook, baseline_sheet)?;
    let rate_range = read_sheet(&mut workbook, rate_sheet)?;
    parse_ranges(&baseline_range, &rate_range, region)
}

/// Parse already loaded sheets. The baseline allocations must be known before the rates.
pub fn parse_ranges(
    baseline_sheet: &Range<Data>,
    rate_sheet: &Range<Data>,
    region: &BaselineRegion,
) -> Result<RateTable, RateError> {
    let baselines = baseline::extract(baseline_sheet, region)?;
    debug!(summer = ?baselines.summer, winter = ?baselines.winter, "extracted the baseline allocations");
    let table = rates::extract(rate_sheet, &baselines)?;
    info!(n_plans = table.len(), "parsed the rate table");
    Ok(table)
}

/// The last sheet containing the marker wins.
fn find_sheet<'a>(sheet_names: &'a [String], marker: &str) -> Result<&'a str, RateError> {
    sheet_names
        .iter()
        .rfind(|name| name.contains(marker))
        .map(String::as_str)
        .ok_or_else(|| RateError::malformed(format!("no sheet named like `{marker}`")))
}

fn read_sheet(
    workbook: &mut Xlsx<Cursor<&[u8]>>,
    name: &str,
) -> Result<Range<Data>, RateError> {
    workbook
        .worksheet_range(name)
        .map_err(|error| RateError::malformed(format!("unreadable sheet `{name}`: {error}")))
}
