use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    core::{
        locator::DocumentLocator,
        source::{ListingEntry, ListingSource},
    },
    prelude::*,
};

/// Listing pinned in a TOML file:
///
/// ```toml
/// [[documents]]
/// label = "Residential (Oct 1, 2023 – Present)"
/// locator = "https://www.pge.com/tariffs/assets/xls/ELEC_2023-10-01.xlsx"
/// ```
///
/// Relative filesystem locators are resolved against the directory of the file.
pub struct ListingFile {
    path: PathBuf,
}

impl ListingFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Deserialize)]
struct Listing {
    #[serde(default)]
    documents: Vec<Document>,
}

#[derive(Deserialize)]
struct Document {
    label: String,
    locator: String,
}

impl ListingSource for ListingFile {
    #[instrument(skip_all, fields(path = %self.path.display()))]
    fn entries(&self) -> Result<Vec<ListingEntry>, RateError> {
        let text = fs::read_to_string(&self.path)
            .map_err(|source| RateError::Io { path: self.path.clone(), source })?;
        let listing: Listing = toml::from_str(&text)
            .map_err(|source| RateError::ListingFile { path: self.path.clone(), source })?;
        let base_dir = self.path.parent().unwrap_or_else(|| Path::new(""));
        let entries: Vec<_> = listing
            .documents
            .into_iter()
            .map(|document| ListingEntry::new(document.label, resolve(base_dir, document.locator)))
            .collect();
        info!(n_entries = entries.len(), "read the listing");
        Ok(entries)
    }
}

fn resolve(base_dir: &Path, locator: String) -> DocumentLocator {
    let locator = DocumentLocator::from(locator);
    if locator.is_remote() || Path::new(locator.as_str()).is_absolute() {
        locator
    } else {
        DocumentLocator::from(base_dir.join(locator.as_str()).to_string_lossy().into_owned())
    }
}
