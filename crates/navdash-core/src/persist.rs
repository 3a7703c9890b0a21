// ── Durable client-side state ──
//
// One JSON document per store key (`<dir>/<key>.json`), each tagged with
// a schema version. A document from another schema version, or one that
// no longer parses, is discarded and the store starts empty. Writes go
// to an owner-only temp file in the same directory and are renamed into
// place.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::CoreError;

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    #[serde(flatten)]
    state: &'a T,
}

#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(flatten)]
    state: T,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: Option<u32>,
}

/// Directory-backed key/value storage for persisted store state.
#[derive(Debug, Clone)]
pub struct StateStorage {
    dir: PathBuf,
}

impl StateStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Load the document stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing is stored, or when the stored
    /// document was written by a different schema version or is corrupt.
    /// Only I/O failures other than "not found" are errors.
    pub fn load<T: DeserializeOwned>(&self, key: &str, version: u32) -> Result<Option<T>, CoreError> {
        let path = self.path_for(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no persisted state");
                return Ok(None);
            }
            Err(e) => return Err(CoreError::persistence(&path, e)),
        };

        match serde_json::from_str::<VersionProbe>(&raw) {
            Ok(VersionProbe {
                version: Some(found),
            }) if found == version => {}
            Ok(probe) => {
                warn!(
                    path = %path.display(),
                    found = ?probe.version,
                    expected = version,
                    "persisted state has a different schema version, resetting"
                );
                return Ok(None);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "persisted state is unreadable, resetting");
                return Ok(None);
            }
        }

        match serde_json::from_str::<Envelope<T>>(&raw) {
            Ok(envelope) => Ok(Some(envelope.state)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "persisted state does not match schema, resetting");
                Ok(None)
            }
        }
    }

    /// Write `state` under `key`, tagged with `version`.
    pub fn save<T: Serialize>(&self, key: &str, version: u32, state: &T) -> Result<(), CoreError> {
        let path = self.path_for(key);
        fs::create_dir_all(&self.dir).map_err(|e| CoreError::persistence(&self.dir, e))?;

        let json = serde_json::to_string_pretty(&EnvelopeRef { version, state })
            .map_err(|e| CoreError::persistence(&path, e))?;

        // Owner-only and uniquely named; the document may hold the token.
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| CoreError::persistence(&self.dir, e))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| CoreError::persistence(tmp.path(), e))?;
        tmp.persist(&path)
            .map_err(|e| CoreError::persistence(&path, e.error))?;

        debug!(path = %path.display(), "state saved");
        Ok(())
    }
}
