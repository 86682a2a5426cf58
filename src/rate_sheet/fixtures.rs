//! Sheets laid out like the published tariff workbook.

use calamine::{Data, Range};
use rust_xlsxwriter::Workbook;

use crate::{core::plan::Plan, prelude::*};

#[derive(Copy, Clone, Debug)]
pub enum Value {
    Text(&'static str),
    Number(f64),
}

impl From<Value> for Data {
    fn from(value: Value) -> Self {
        match value {
            Value::Text(text) => Self::String(text.to_owned()),
            Value::Number(number) => Self::Float(number),
        }
    }
}

/// Sparse sheet, `(row, column)` zero-based.
#[derive(Clone, Debug, Default)]
pub struct SheetFixture {
    cells: Vec<((u32, u32), Value)>,
}

impl SheetFixture {
    pub fn set(&mut self, position: (u32, u32), value: Value) {
        self.clear(position);
        self.cells.push((position, value));
    }

    pub fn clear(&mut self, position: (u32, u32)) {
        self.cells.retain(|(cell_position, _)| *cell_position != position);
    }

    pub fn range(&self) -> Range<Data> {
        let mut range = Range::new((0, 0), (40, 10));
        for (position, value) in &self.cells {
            range.set_value(*position, Data::from(*value));
        }
        range
    }
}

/// Territories P, W, X for basic electric and P, W for all-electric homes.
pub fn baseline_sheet() -> SheetFixture {
    let mut sheet = SheetFixture::default();
    for (label_column, allocations) in [
        (0, [12.1, 9.8, 11.0, 20.0, 17.0]),
        (5, [16.5, 19.2, 17.8, 23.4, 26.0]),
    ] {
        sheet.set((11, label_column), Value::Text("Baseline Quantities (kWh per day)"));
        sheet.set((12, label_column), Value::Text("Territory"));
        sheet.set((13, label_column), Value::Text("Basic Electric Code (B)"));
        sheet.set((17, label_column), Value::Text("All Electric Code (H)"));
        for (row, territory, allocation) in [
            (14, "P", allocations[0]),
            (15, "W", allocations[1]),
            (16, "X", allocations[2]),
            (18, "P", allocations[3]),
            (19, "W", allocations[4]),
        ] {
            sheet.set((row, label_column), Value::Text(territory));
            sheet.set((row, label_column + 1), Value::Number(allocation));
        }
    }
    sheet
}

/// Four rows per plan starting at row 14, with merged cells left empty past the first row.
pub fn rate_sheet(plans: &[Plan]) -> SheetFixture {
    let mut sheet = SheetFixture::default();
    sheet.set((12, 0), Value::Text("Rate Schedule"));
    sheet.set((12, 5), Value::Text("Season"));
    sheet.set((12, 6), Value::Text("Time Period"));
    sheet.set((12, 7), Value::Text("Total Rate ($/kWh)"));
    sheet.set((12, 8), Value::Text("Baseline Credit ($/kWh)"));

    for (block, plan) in (0_u32..).zip(plans) {
        let first_row = 13 + 4 * block;
        let (label, rates, credit) = match plan {
            Plan::TouB => (
                "Time-of-Use (Peak Pricing 4 - 9 p.m. Every Day) E-TOU-B",
                [0.53426, 0.4112, 0.39763, 0.35883],
                Value::Text("-"),
            ),
            Plan::TouC => (
                "Time-of-Use (Peak Pricing 4 - 9 p.m. Every Day) E-TOU-C",
                [0.53933, 0.45589, 0.43662, 0.40827],
                Value::Number(-0.08851),
            ),
            Plan::TouD => (
                "Time-of-Use (Peak Pricing 5 - 8 p.m. Weekdays) E-TOU-D",
                [0.51778, 0.38282, 0.42818, 0.38957],
                Value::Text("-"),
            ),
        };
        sheet.set((first_row, 0), Value::Text(label));
        sheet.set((first_row, 5), Value::Text("Summer"));
        sheet.set((first_row + 2, 5), Value::Text("Winter"));
        for (offset, (period, rate)) in
            (0_u32..).zip(["Peak", "Off-Peak", "Peak", "Off-Peak"].into_iter().zip(rates))
        {
            sheet.set((first_row + offset, 6), Value::Text(period));
            sheet.set((first_row + offset, 7), Value::Number(rate));
            sheet.set((first_row + offset, 8), credit);
        }
    }
    sheet
}

pub fn workbook(baseline_sheet: &SheetFixture, rate_sheet: &SheetFixture) -> Result<Vec<u8>> {
    workbook_with_sheets(&[
        ("Table of Contents", &SheetFixture::default()),
        ("ElecBaseline", baseline_sheet),
        ("E-Res Inclu TOU", rate_sheet),
    ])
}

pub fn workbook_with_sheets(sheets: &[(&str, &SheetFixture)]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    for (name, sheet) in sheets {
        let worksheet = workbook.add_worksheet().set_name(*name)?;
        for ((row, column), value) in &sheet.cells {
            let column = u16::try_from(*column)?;
            match value {
                Value::Text(text) => worksheet.write_string(*row, column, *text)?,
                Value::Number(number) => worksheet.write_number(*row, column, *number)?,
            };
        }
    }
    Ok(workbook.save_to_buffer()?)
}
