use std::fmt::{Display, Formatter};

use calamine::{Data, Range};

/// Fixed rectangular block of a sheet, zero-based and inclusive.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CellRange {
    first_row: u32,
    first_column: u32,
    last_row: u32,
    last_column: u32,
}

impl CellRange {
    /// Takes `(row, column)` pairs of the top-left and bottom-right cells.
    pub const fn new(first: (u32, u32), last: (u32, u32)) -> Self {
        Self { first_row: first.0, first_column: first.1, last_row: last.0, last_column: last.1 }
    }

    /// Every row of the block, including those beyond the used area of the sheet.
    pub fn rows(self, sheet: &Range<Data>) -> impl Iterator<Item = Row<'_>> {
        (self.first_row..=self.last_row).map(move |row| Row {
            sheet,
            row,
            first_column: self.first_column,
            width: self.last_column - self.first_column + 1,
        })
    }
}

/// A1 notation, for example `A13:D36`.
impl Display for CellRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}:{}{}",
            column_name(self.first_column),
            self.first_row + 1,
            column_name(self.last_column),
            self.last_row + 1,
        )
    }
}

fn column_name(mut column: u32) -> String {
    let mut name = Vec::new();
    loop {
        name.push(char::from(b'A' + u8::try_from(column % 26).unwrap_or_default()));
        if column < 26 {
            break;
        }
        column = column / 26 - 1;
    }
    name.iter().rev().collect()
}

#[derive(Copy, Clone)]
pub struct Row<'a> {
    sheet: &'a Range<Data>,
    row: u32,
    first_column: u32,
    width: u32,
}

impl<'a> Row<'a> {
    /// Cell at the offset from the first column of the block.
    pub fn cell(&self, offset: u32) -> Cell<'a> {
        Cell(self.sheet.get_value((self.row, self.first_column + offset)))
    }

    pub fn is_empty(&self) -> bool {
        (0..self.width).all(|offset| self.cell(offset).is_empty())
    }

    /// One-based row number as displayed by spreadsheet software.
    pub const fn number(&self) -> u32 {
        self.row + 1
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Cell<'a>(Option<&'a Data>);

impl<'a> Cell<'a> {
    pub fn is_empty(self) -> bool {
        match self.0 {
            None | Some(Data::Empty) => true,
            Some(Data::String(text)) => text.trim().is_empty(),
            Some(_) => false,
        }
    }

    /// Raw text of a string cell.
    pub fn text(self) -> Option<&'a str> {
        match self.0 {
            Some(Data::String(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Numeric value, accepting numbers stored as text.
    pub fn number(self) -> Option<f64> {
        #[allow(clippy::cast_precision_loss)]
        let value = match self.0? {
            Data::Float(value) => Some(*value),
            Data::Int(value) => Some(*value as f64),
            Data::String(text) => text.trim().parse().ok(),
            _ => None,
        };
        value.filter(|value: &f64| value.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(CellRange::new((12, 0), (35, 3)).to_string(), "A13:D36");
        assert_eq!(CellRange::new((13, 0), (24, 8)).to_string(), "A14:I25");
        assert_eq!(CellRange::new((0, 25), (0, 27)).to_string(), "Z1:AB1");
    }

    #[test]
    fn test_rows_beyond_used_area() {
        let mut sheet = Range::new((2, 1), (2, 1));
        sheet.set_value((2, 1), Data::String("Peak".to_owned()));
        let rows: Vec<_> = CellRange::new((1, 0), (3, 2)).rows(&sheet).collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_empty());
        assert_eq!(rows[1].cell(1).text(), Some("Peak"));
        assert!(rows[1].cell(0).is_empty());
        assert!(rows[2].is_empty());
        assert_eq!(rows[1].number(), 3);
    }

    #[test]
    fn test_number() {
        let mut sheet = Range::new((0, 0), (0, 4));
        sheet.set_value((0, 0), Data::Float(0.40827));
        sheet.set_value((0, 1), Data::Int(12));
        sheet.set_value((0, 2), Data::String(" -0.08851 ".to_owned()));
        sheet.set_value((0, 3), Data::String("-".to_owned()));
        let row = CellRange::new((0, 0), (0, 4)).rows(&sheet).next().unwrap();
        assert_eq!(row.cell(0).number(), Some(0.40827));
        assert_eq!(row.cell(1).number(), Some(12.0));
        assert_eq!(row.cell(2).number(), Some(-0.08851));
        assert_eq!(row.cell(3).number(), None);
        assert_eq!(row.cell(4).number(), None);
    }
}
