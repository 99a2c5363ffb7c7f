mod artifacts;
mod team;

pub use artifacts::ArtifactStore;
pub use team::{LoadedRecords, SkippedRecord, TeamStore};

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, StatsError};

/// Read a whole JSON document. Returns `None` when the file does not exist.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StatsError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    debug!(path = %path.display(), "reading json");
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StatsError::Json {
            path: path.to_path_buf(),
            source,
        })
}

/// Replace `path` with the pretty-printed document, creating parent directories.
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let io_err = |source| StatsError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    debug!(path = %path.display(), "writing json");
    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|source| StatsError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(io_err)
}
