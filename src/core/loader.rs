//! JSON resource loader over a local directory or a remote base URL.
//!
//! Every load is best-effort: a failed fetch or a decode error is logged
//! and surfaced as `None` so sibling resources keep loading and dependent
//! UI sections can fall back to placeholders. No retries.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

/// Where the catalog and character JSON files live.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Files under a local directory.
    Local { dir: PathBuf },
    /// Files served over HTTP under a base URL (must end with `/`
    /// for relative joins to resolve under it).
    Remote { base_url: Url },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid resource path {path}: {reason}")]
    Url { path: String, reason: String },
}

/// Fetches and decodes JSON resources from a [`DataSource`].
#[derive(Debug, Clone)]
pub struct DataLoader {
    source: DataSource,
    client: reqwest::Client,
}

impl DataLoader {
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            client: reqwest::Client::new(),
        }
    }

    /// Relative path of a character record.
    pub fn character_path(id: &str) -> String {
        format!("characters/{id}.json")
    }

    /// Load and decode a single resource. Any failure is logged and
    /// collapsed to `None`.
    pub async fn load_one<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        match self.fetch(path).await {
            Ok(value) => Some(value),
            Err(e) => {
                log::error!("failed to load {path}: {e}");
                None
            }
        }
    }

    /// Load many resources concurrently.
    ///
    /// The result preserves input order and is available only once every
    /// fetch has settled; one failure never cancels or fails the others.
    pub async fn load_many<T, I, S>(&self, paths: I) -> Vec<Option<T>>
    where
        T: DeserializeOwned,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let futures = paths.into_iter().map(|path| async move {
            self.load_one::<T>(path.as_ref()).await
        });
        futures::future::join_all(futures).await
    }

    /// List character ids by enumerating `characters/*.json`.
    ///
    /// Only meaningful for local sources; remote sources return an empty
    /// list and rely on a configured roster.
    pub fn discover_roster(&self) -> Vec<String> {
        let DataSource::Local { dir } = &self.source else {
            return Vec::new();
        };

        let characters_dir = dir.join("characters");
        let entries = match std::fs::read_dir(&characters_dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::debug!("no character directory at {}: {e}", characters_dir.display());
                return Vec::new();
            }
        };

        let mut ids: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().map(|ext| ext == "json").unwrap_or(false))
            .filter_map(|path| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(str::to_string)
            })
            .collect();
        ids.sort();
        ids
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, LoadError> {
        match &self.source {
            DataSource::Local { dir } => {
                let bytes = tokio::fs::read(dir.join(path)).await?;
                Ok(serde_json::from_slice(&bytes)?)
            }
            DataSource::Remote { base_url } => {
                let url = base_url.join(path).map_err(|e| LoadError::Url {
                    path: path.to_string(),
                    reason: e.to_string(),
                })?;
                let response = self.client.get(url).send().await?.error_for_status()?;
                Ok(response.json().await?)
            }
        }
    }
}
