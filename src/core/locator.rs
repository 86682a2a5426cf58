use serde::Serialize;
use url::form_urlencoded;

/// Identifies one published rate document: an absolute URL or a filesystem path.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, derive_more::Display, derive_more::From)]
pub struct DocumentLocator(String);

impl From<&str> for DocumentLocator {
    fn from(locator: &str) -> Self {
        Self(locator.to_owned())
    }
}

impl DocumentLocator {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_remote(&self) -> bool {
        self.0.starts_with("https://") || self.0.starts_with("http://")
    }

    /// File name to cache the document under: the last path segment followed by the query,
    /// percent-encoded so that distinct queries never share a name.
    ///
    /// The fragment is never sent to the server and does not take part.
    pub fn cache_key(&self) -> Option<String> {
        let without_fragment = self.0.split('#').next().unwrap_or_default();
        let (path, query) = match without_fragment.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (without_fragment, None),
        };
        let name = path.rsplit('/').next().filter(|name| !matches!(*name, "" | "." | ".."))?;
        let key = match query {
            Some(query) => format!("{name}?{query}"),
            None => name.to_owned(),
        };
        Some(form_urlencoded::byte_serialize(key.as_bytes()).collect())
    }
}
