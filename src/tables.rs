use chrono::{NaiveDateTime, Timelike};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::core::{
    index::DocumentIndex,
    interval::IntervalEnd,
    locator::DocumentLocator,
    resolver::Resolution,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

#[must_use]
pub fn build_resolution_table(resolution: &Resolution) -> Table {
    let cheapest = resolution.rates.values().min().copied();
    let time = resolution.timestamp.format("%H:%M");
    let hour = resolution.timestamp.hour();

    let mut table = new_table();
    table.set_header(vec!["Plan", "Season", "Period", "Rate"]);
    for (plan, rate) in &resolution.rates {
        table.add_row(vec![
            Cell::new(plan).add_attribute(Attribute::Bold),
            Cell::new(resolution.season),
            Cell::new(format!("{} at {time}", plan.period_at(hour))),
            Cell::new(rate)
                .set_alignment(CellAlignment::Right)
                .fg(if Some(*rate) == cheapest { Color::Green } else { Color::Reset }),
        ]);
    }
    table
}

#[must_use]
pub fn build_index_table(
    index: &DocumentIndex,
    in_effect: Option<&DocumentLocator>,
    now: NaiveDateTime,
) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Since", "Through", "Document"]);
    for (interval, locator) in index.iter() {
        let is_in_effect = in_effect == Some(locator);
        let end = match interval.end {
            IntervalEnd::At(end) => Cell::new(end.format(DATE_FORMAT)),
            IntervalEnd::Present => Cell::new(format!("present ({})", now.format(DATE_FORMAT)))
                .add_attribute(Attribute::Italic),
        };
        let locator = Cell::new(locator);
        table.add_row(vec![
            Cell::new(interval.start.format(DATE_FORMAT)),
            end,
            if is_in_effect { locator.fg(Color::Green) } else { locator.add_attribute(Attribute::Dim) },
        ]);
    }
    table
}
