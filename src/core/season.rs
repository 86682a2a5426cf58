use std::fmt::{Display, Formatter};

use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Season {
    Summer,
    Winter,
}

impl Season {
    /// June through September is summer, everything else is winter.
    pub const fn from_month(month: u32) -> Self {
        if matches!(month, 6..=9) { Self::Summer } else { Self::Winter }
    }

    pub fn of(timestamp: NaiveDateTime) -> Self {
        Self::from_month(timestamp.month())
    }

    /// Parse the season label used in the tariff sheets.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("summer") {
            Some(Self::Summer)
        } else if label.eq_ignore_ascii_case("winter") {
            Some(Self::Winter)
        } else {
            None
        }
    }
}

impl Display for Season {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summer => write!(f, "Summer"),
            Self::Winter => write!(f, "Winter"),
        }
    }
}
