use std::path::PathBuf;

use chrono::NaiveDateTime;

/// Failures of the rate resolution.
///
/// None of these are retried: a stale index or an unreachable document must
/// never silently fall back to a different rate table.
#[derive(Debug, thiserror::Error)]
pub enum RateError {
    /// A listing label does not match `… (Mon DD, YYYY – Mon DD, YYYY)`.
    #[error("failed to parse the document label `{label}`: {reason}")]
    LabelParse { label: String, reason: String },

    #[error("no published rate document covers {0}")]
    NoMatchingDocument(NaiveDateTime),

    /// Missing sheet, unexpected layout, or missing baseline allocation.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("failed to fetch `{locator}`")]
    Transport {
        locator: String,

        #[source]
        source: ureq::Error,
    },

    #[error("I/O failed on `{}`", path.display())]
    Io {
        path: PathBuf,

        #[source]
        source: std::io::Error,
    },

    #[error("invalid listing file `{}`", path.display())]
    ListingFile {
        path: PathBuf,

        #[source]
        source: toml::de::Error,
    },
}

impl RateError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedDocument(reason.into())
    }
}
