//! Single-file JSON cache of the last computed temperature profile.

use crate::cache::error::CacheError;
use crate::types::combined_record::CombinedRecord;
use crate::types::race::{RaceKey, RaceParameters};
use crate::utils::{ensure_cache_dir_exists, get_cache_dir};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::task;

const CACHE_FILE_NAME: &str = "profile.json";

#[derive(Deserialize)]
struct CachedProfile {
    race: RaceKey,
    records: Vec<CombinedRecord>,
}

#[derive(Serialize)]
struct CachedProfileRef<'a> {
    race: RaceKey,
    records: &'a [CombinedRecord],
}

/// Loads and stores the profile of one race in a flat JSON file.
///
/// The file holds the [`RaceKey`] it was computed for; a load for any other
/// race parameters is a miss.
#[derive(Debug, Clone)]
pub struct CacheGateway {
    path: PathBuf,
}

impl CacheGateway {
    /// Uses `profile.json` inside the system cache directory.
    pub fn new() -> Result<Self, CacheError> {
        Ok(Self::with_file(get_cache_dir()?.join(CACHE_FILE_NAME)))
    }

    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached records for `race`, or `None` on a miss.
    ///
    /// An unreadable or malformed file counts as a miss.
    pub async fn load(&self, race: &RaceParameters) -> Option<Vec<CombinedRecord>> {
        match self.read().await {
            Ok(Some(cached)) if cached.race == race.cache_key() => {
                info!(
                    "Cache hit for {} at {:?} ({} records)",
                    race.race_type(),
                    self.path,
                    cached.records.len()
                );
                Some(cached.records)
            }
            Ok(Some(_)) => {
                info!("Cache at {:?} belongs to a different race", self.path);
                None
            }
            Ok(None) => {
                info!("No cached profile at {:?}", self.path);
                None
            }
            Err(e) => {
                warn!("Ignoring unusable cache: {}", e);
                None
            }
        }
    }

    async fn read(&self) -> Result<Option<CachedProfile>, CacheError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::CacheRead(self.path.clone(), e)),
        };
        serde_json::from_slice::<CachedProfile>(&bytes)
            .map(Some)
            .map_err(|e| CacheError::Corrupt(self.path.clone(), e))
    }

    /// Replaces the cache file with `records` for `race`.
    ///
    /// Writes to a temporary file next to the target and renames it into
    /// place, so readers never see a partial file.
    pub async fn store(
        &self,
        race: &RaceParameters,
        records: &[CombinedRecord],
    ) -> Result<(), CacheError> {
        let json = serde_json::to_vec_pretty(&CachedProfileRef {
            race: race.cache_key(),
            records,
        })
        .map_err(CacheError::CacheEncode)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        ensure_cache_dir_exists(&dir).await?;

        let path = self.path.clone();
        let size = json.len();
        task::spawn_blocking(move || {
            let mut temp_file = NamedTempFile::new_in(&dir)
                .map_err(|e| CacheError::CacheWrite(path.clone(), e))?;
            temp_file
                .write_all(&json)
                .map_err(|e| CacheError::CacheWrite(path.clone(), e))?;
            temp_file
                .flush()
                .map_err(|e| CacheError::CacheWrite(path.clone(), e))?;
            temp_file
                .persist(&path)
                .map_err(|e| CacheError::CacheWrite(path.clone(), e.error))?;
            Ok::<(), CacheError>(())
        })
        .await??;

        info!(
            "Wrote {} records ({} bytes) to {:?}",
            records.len(),
            size,
            self.path
        );
        Ok(())
    }
}
