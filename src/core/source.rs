//! Collaborators the resolver depends on.

use crate::{core::locator::DocumentLocator, prelude::*};

/// One listed rate document: the human-readable label carrying its effective
/// date range, and where to get it.
#[derive(Clone, Debug)]
pub struct ListingEntry {
    pub label: String,
    pub locator: DocumentLocator,
}

impl ListingEntry {
    pub fn new(label: impl Into<String>, locator: impl Into<DocumentLocator>) -> Self {
        Self { label: label.into(), locator: locator.into() }
    }
}

pub trait ListingSource {
    fn entries(&self) -> Result<Vec<ListingEntry>, RateError>;
}

pub trait DocumentFetcher {
    fn fetch(&self, locator: &DocumentLocator) -> Result<Vec<u8>, RateError>;
}
