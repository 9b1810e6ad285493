//! Read-only report over the translation cache

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::{WorkerError, WorkerResult};
use crate::storage::{CacheStore, TranslationRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheReport {
    pub total: u64,
    pub sample: Vec<TranslationRecord>,
}

impl fmt::Display for CacheReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Total translations: {}", self.total)?;
        for record in &self.sample {
            writeln!(f, "src: {:?} -> dst: {:?}", record.source, record.translation)?;
        }
        Ok(())
    }
}

/// Why no report could be produced
#[derive(Error, Debug)]
pub enum InspectError {
    #[error("cache.db not found at {}", .0.display())]
    Missing(PathBuf),

    /// The file exists but could not be read as a cache
    #[error("could not read cache: {0}")]
    Unreadable(WorkerError),
}

fn read_report(path: &Path, sample_size: usize) -> WorkerResult<CacheReport> {
    let store = CacheStore::open_read_only(path)?;
    Ok(CacheReport {
        total: store.count()?,
        sample: store.sample(sample_size)?,
    })
}

/// Counts the rows at `path` and reads up to `sample_size` of them
pub fn report(path: impl AsRef<Path>, sample_size: usize) -> Result<CacheReport, InspectError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(InspectError::Missing(path.to_path_buf()));
    }
    read_report(path, sample_size).map_err(InspectError::Unreadable)
}
