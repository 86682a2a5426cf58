use std::fmt::{Display, Formatter};

use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Period {
    Peak,
    OffPeak,
}

impl Period {
    /// Parse the period label used in the tariff sheets: `Peak` or `Off-Peak`.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized: String = label
            .trim()
            .chars()
            .filter(|char_| char_.is_ascii_alphabetic())
            .map(|char_| char_.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "peak" => Some(Self::Peak),
            "offpeak" => Some(Self::OffPeak),
            _ => None,
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Peak => write!(f, "Peak"),
            Self::OffPeak => write!(f, "Off-Peak"),
        }
    }
}
