use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Device-local list of tracked tickers, usable without the remote store.
/// Newest first, no duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalWatchlist {
    path: PathBuf,
    tickers: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedWatchlist {
    tickers: Vec<String>,
}

impl LocalWatchlist {
    /// Load from `path`. A missing or unreadable file starts an empty list.
    pub fn load_from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let tickers = match read_tickers(&path) {
            Ok(tickers) => tickers,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "ignoring unreadable local watchlist"
                );
                Vec::new()
            }
        };
        Self { path, tickers }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.tickers.iter().any(|t| t == ticker)
    }

    /// Prepend `ticker` and persist. Returns `false` if it was already tracked.
    pub fn add(&mut self, ticker: &str) -> Result<bool> {
        if self.contains(ticker) {
            return Ok(false);
        }
        self.tickers.insert(0, ticker.to_string());
        self.persist()?;
        Ok(true)
    }

    pub fn remove(&mut self, ticker: &str) -> Result<bool> {
        let before = self.tickers.len();
        self.tickers.retain(|t| t != ticker);
        if self.tickers.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        let payload = PersistedWatchlist {
            tickers: self.tickers.clone(),
        };
        let json = serde_json::to_string_pretty(&payload)
            .context("failed to serialize local watchlist json")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}

fn read_tickers(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let payload = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let persisted: PersistedWatchlist =
        serde_json::from_str(&payload).context("failed to parse local watchlist json")?;
    Ok(persisted.tickers)
}
