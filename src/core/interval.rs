use std::fmt::{Debug, Formatter};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::prelude::*;

const DATE_FORMAT: &str = "%b %d, %Y";
const PRESENT: &str = "Present";
const SEPARATORS: [&str; 2] = [" – ", " - "];
const END_OF_DAY: NaiveTime = NaiveTime::from_hms_opt(23, 59, 59).unwrap();

#[derive(Copy, Clone, Eq, PartialEq)]
pub enum IntervalEnd {
    /// Inclusive.
    At(NaiveDateTime),

    /// Still in effect, resolved to the current time on every lookup.
    Present,
}

impl IntervalEnd {
    pub const fn resolve(self, now: NaiveDateTime) -> NaiveDateTime {
        match self {
            Self::At(end) => end,
            Self::Present => now,
        }
    }
}

impl Debug for IntervalEnd {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::At(end) => write!(f, "{end:?}"),
            Self::Present => f.write_str(PRESENT),
        }
    }
}

/// Effective date range of a rate document.
#[derive(Copy, Clone, Eq, PartialEq)]
#[must_use]
pub struct DateInterval {
    /// Inclusive.
    pub start: NaiveDateTime,

    pub end: IntervalEnd,
}

impl Debug for DateInterval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..={:?}", self.start, self.end)
    }
}

impl DateInterval {
    pub const fn new(start: NaiveDateTime, end: IntervalEnd) -> Self {
        Self { start, end }
    }

    /// Parse the range from a listing label like `Residential (Mar 1, 2023 – Present)`.
    ///
    /// The range is taken from the last parenthesis, and the start and end dates are split
    /// at the last dash. The start is the beginning of its day, the end is the last second of its day.
    pub fn parse_label(label: &str) -> Result<Self, RateError> {
        let error = |reason: &str| RateError::LabelParse {
            label: label.to_owned(),
            reason: reason.to_owned(),
        };

        let (_, range) = label.rsplit_once('(').ok_or_else(|| error("no opening parenthesis"))?;
        let range = range.split(')').next().unwrap_or(range);
        let (since, through) = SEPARATORS
            .into_iter()
            .filter_map(|separator| {
                range.rfind(separator).map(|at| (&range[..at], &range[at + separator.len()..]))
            })
            .max_by_key(|(since, _)| since.len())
            .ok_or_else(|| error("no dash between the dates"))?;

        let start = parse_date(since)
            .ok_or_else(|| error("invalid start date"))?
            .and_time(NaiveTime::MIN);
        let end = if through.trim() == PRESENT {
            IntervalEnd::Present
        } else {
            let end = parse_date(through).ok_or_else(|| error("invalid end date"))?.and_time(END_OF_DAY);
            if end < start {
                return Err(error("the range ends before it starts"));
            }
            IntervalEnd::At(end)
        };

        Ok(Self::new(start, end))
    }

    pub fn contains(self, timestamp: NaiveDateTime, now: NaiveDateTime) -> bool {
        (self.start <= timestamp) && (timestamp <= self.end.resolve(now))
    }

    pub fn overlaps(self, other: Self, now: NaiveDateTime) -> bool {
        (self.start <= other.end.resolve(now)) && (other.start <= self.end.resolve(now))
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day).unwrap().and_hms_opt(hour, minute, second).unwrap()
    }

    #[test]
    fn test_parse_fixed_range() -> Result {
        let interval =
            DateInterval::parse_label("Residential Rates (Mar 1, 2023 – Sep 30, 2023)")?;
        assert_eq!(interval.start, at(2023, 3, 1, 0, 0, 0));
        assert_eq!(interval.end, IntervalEnd::At(at(2023, 9, 30, 23, 59, 59)));
        Ok(())
    }

    #[test]
    fn test_parse_hyphen_and_present() -> Result {
        let interval = DateInterval::parse_label("Electric (Oct 1, 2023 - Present)")?;
        assert_eq!(interval.start, at(2023, 10, 1, 0, 0, 0));
        assert_eq!(interval.end, IntervalEnd::Present);
        Ok(())
    }

    #[test]
    fn test_parse_takes_last_parenthesis() -> Result {
        let interval = DateInterval::parse_label("E-TOU (Res) Rates (Jan 1, 2024 – Feb 29, 2024)")?;
        assert_eq!(interval.start, at(2024, 1, 1, 0, 0, 0));
        assert_eq!(interval.end, IntervalEnd::At(at(2024, 2, 29, 23, 59, 59)));
        Ok(())
    }

    #[test]
    fn test_parse_without_closing_parenthesis() -> Result {
        let interval = DateInterval::parse_label("Rates (Jan 1, 2024 – Present")?;
        assert_eq!(interval.end, IntervalEnd::Present);
        Ok(())
    }

    #[test]
    fn test_parse_errors() {
        for label in [
            "Residential Rates",
            "Rates (Jan 1, 2024)",
            "Rates (Foo 1, 2024 – Present)",
            "Rates (Jan 1, 2024 – Someday)",
            "Rates (Mar 1, 2024 – Jan 1, 2024)",
        ] {
            let error = DateInterval::parse_label(label).unwrap_err();
            assert!(matches!(error, RateError::LabelParse { .. }), "{label}: {error}");
        }
    }

    #[test]
    fn test_start_not_after_end() -> Result {
        let interval = DateInterval::parse_label("Rates (Mar 1, 2023 – Mar 1, 2023)")?;
        let now = at(2020, 1, 1, 0, 0, 0);
        assert!(interval.start <= interval.end.resolve(now));
        Ok(())
    }

    #[test]
    fn test_present_resolves_to_now() -> Result {
        let interval = DateInterval::parse_label("Rates (Mar 1, 2023 – Present)")?;
        let now = at(2026, 10, 17, 12, 0, 0);
        assert_eq!(interval.end.resolve(now), now);
        assert!(interval.contains(at(2026, 10, 17, 11, 59, 59), now));
        assert!(!interval.contains(at(2026, 10, 17, 12, 0, 1), now));
        Ok(())
    }

    #[test]
    fn test_contains_end_of_day() -> Result {
        let interval = DateInterval::parse_label("Rates (Mar 1, 2023 – Sep 30, 2023)")?;
        let now = at(2026, 1, 1, 0, 0, 0);
        assert!(interval.contains(at(2023, 3, 1, 0, 0, 0), now));
        assert!(interval.contains(at(2023, 9, 30, 23, 59, 59), now));
        assert!(!interval.contains(at(2023, 10, 1, 0, 0, 0), now));
        assert!(!interval.contains(at(2023, 2, 28, 23, 59, 59), now));
        Ok(())
    }

    #[test]
    fn test_overlaps() -> Result {
        let now = at(2026, 1, 1, 0, 0, 0);
        let first = DateInterval::parse_label("A (Jan 1, 2023 – Jun 30, 2023)")?;
        let second = DateInterval::parse_label("B (Jul 1, 2023 – Present)")?;
        let third = DateInterval::parse_label("C (Jun 30, 2023 – Dec 31, 2023)")?;
        assert!(!first.overlaps(second, now));
        assert!(first.overlaps(third, now));
        assert!(second.overlaps(third, now));
        Ok(())
    }
}
