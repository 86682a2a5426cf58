use chrono::{Local, NaiveDateTime};
use itertools::Itertools;

use crate::{
    core::{interval::DateInterval, locator::DocumentLocator, source::ListingEntry},
    prelude::*,
};

/// Maps effective date ranges to the rate documents in build order.
///
/// Overlapping ranges are tolerated: the first one wins on lookup.
#[derive(Clone, Debug, Default)]
pub struct DocumentIndex {
    entries: Vec<(DateInterval, DocumentLocator)>,
}

impl DocumentIndex {
    /// Build the index, failing on the first label that does not parse.
    #[instrument(skip_all)]
    pub fn build(entries: impl IntoIterator<Item = ListingEntry>) -> Result<Self, RateError> {
        let entries: Vec<_> = entries
            .into_iter()
            .map(|entry| Ok((DateInterval::parse_label(&entry.label)?, entry.locator)))
            .collect::<Result<_, RateError>>()?;

        let now = Local::now().naive_local();
        for ((lhs, lhs_locator), (rhs, rhs_locator)) in entries.iter().tuple_combinations() {
            if lhs.overlaps(*rhs, now) {
                warn!(?lhs, %lhs_locator, ?rhs, %rhs_locator, "overlapping documents, the former wins");
            }
        }

        info!(n_documents = entries.len(), "built the document index");
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(DateInterval, DocumentLocator)> {
        self.entries.iter()
    }

    /// Find the document in effect at the timestamp, as of now.
    pub fn lookup(&self, timestamp: NaiveDateTime) -> Result<&DocumentLocator, RateError> {
        self.lookup_at(timestamp, Local::now().naive_local())
    }

    pub fn lookup_at(
        &self,
        timestamp: NaiveDateTime,
        now: NaiveDateTime,
    ) -> Result<&DocumentLocator, RateError> {
        self.entries
            .iter()
            .find(|(interval, _)| interval.contains(timestamp, now))
            .map(|(_, locator)| locator)
            .ok_or(RateError::NoMatchingDocument(timestamp))
    }
}
