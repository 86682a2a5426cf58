use std::{
    fmt::{Display, Formatter},
    ops::Range,
};

use enumset::EnumSetType;
use serde::Serialize;

use crate::core::period::Period;

/// Residential time-of-use plan.
///
/// Peak windows ignore weekends and holidays even though the plans themselves
/// treat those as off-peak.
#[derive(Debug, EnumSetType, Hash, Ord, PartialOrd, Serialize, clap::ValueEnum)]
pub enum Plan {
    /// Peak 4–9 p.m., no baseline credit.
    #[serde(rename = "E-TOU-B")]
    #[value(name = "e-tou-b")]
    TouB,

    /// Peak 4–9 p.m., baseline credit while usage stays within the allocation.
    #[serde(rename = "E-TOU-C")]
    #[value(name = "e-tou-c")]
    TouC,

    /// Peak 5–8 p.m., no baseline credit.
    #[serde(rename = "E-TOU-D")]
    #[value(name = "e-tou-d")]
    TouD,
}

impl Plan {
    pub const ALL: [Self; 3] = [Self::TouB, Self::TouC, Self::TouD];

    pub const fn label(self) -> &'static str {
        match self {
            Self::TouB => "E-TOU-B",
            Self::TouC => "E-TOU-C",
            Self::TouD => "E-TOU-D",
        }
    }

    /// Find the plan mentioned in a sheet cell, if any.
    pub fn recognize(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|plan| text.contains(plan.label()))
    }

    /// Peak hours of day, end-exclusive.
    pub const fn peak_hours(self) -> Range<u32> {
        match self {
            Self::TouB | Self::TouC => 16..21,
            Self::TouD => 17..20,
        }
    }

    pub fn period_at(self, hour: u32) -> Period {
        if self.peak_hours().contains(&hour) { Period::Peak } else { Period::OffPeak }
    }

    pub const fn has_baseline_credit(self) -> bool {
        matches!(self, Self::TouC)
    }
}

impl Display for Plan {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
