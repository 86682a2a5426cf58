use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use ureq::Agent;

use crate::{
    core::{locator::DocumentLocator, source::DocumentFetcher},
    prelude::*,
};

/// Published workbooks stay well below this.
const MAX_DOCUMENT_SIZE: u64 = 64 * 1024 * 1024;

/// Downloads rate documents once and keeps them in the cache directory under
/// [`DocumentLocator::cache_key`].
///
/// Locators without an HTTP scheme are read from the filesystem as is.
pub struct CachingFetcher {
    agent: Agent,
    cache_dir: PathBuf,
}

impl CachingFetcher {
    pub fn new(agent: Agent, cache_dir: impl Into<PathBuf>) -> Self {
        Self { agent, cache_dir: cache_dir.into() }
    }

    fn download(&self, locator: &DocumentLocator) -> Result<Vec<u8>, RateError> {
        info!(%locator, "downloading…");
        let transport_error =
            |source| RateError::Transport { locator: locator.to_string(), source };
        let bytes = self
            .agent
            .get(locator.as_str())
            .call()
            .map_err(transport_error)?
            .body_mut()
            .with_config()
            .limit(MAX_DOCUMENT_SIZE)
            .read_to_vec()
            .map_err(transport_error)?;
        debug!(n_bytes = bytes.len(), "downloaded");
        Ok(bytes)
    }
}

impl DocumentFetcher for CachingFetcher {
    #[instrument(skip_all, fields(locator = %locator))]
    fn fetch(&self, locator: &DocumentLocator) -> Result<Vec<u8>, RateError> {
        if !locator.is_remote() {
            return read(Path::new(locator.as_str()));
        }
        let Some(cache_key) = locator.cache_key() else {
            warn!("no file name to cache the document under");
            return self.download(locator);
        };

        let path = self.cache_dir.join(cache_key);
        if path.is_file() {
            debug!(path = %path.display(), "cache hit");
            return read(&path);
        }

        let bytes = self.download(locator)?;
        store(&self.cache_dir, &path, &bytes)?;
        debug!(path = %path.display(), "cached");
        Ok(bytes)
    }
}

/// Write through a temporary file in the cache directory, so that an interrupted write
/// never leaves a truncated document under the final name.
fn store(cache_dir: &Path, path: &Path, bytes: &[u8]) -> Result<(), RateError> {
    let io_error = |source| RateError::Io { path: path.to_path_buf(), source };
    fs::create_dir_all(cache_dir)
        .map_err(|source| RateError::Io { path: cache_dir.to_path_buf(), source })?;
    let mut file = NamedTempFile::new_in(cache_dir).map_err(io_error)?;
    file.write_all(bytes).map_err(io_error)?;
    file.as_file().sync_all().map_err(io_error)?;
    file.persist(path).map_err(|error| io_error(error.error))?;
    Ok(())
}

fn read(path: &Path) -> Result<Vec<u8>, RateError> {
    fs::read(path).map_err(|source| RateError::Io { path: path.to_path_buf(), source })
}
