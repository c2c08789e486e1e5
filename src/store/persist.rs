//! Session persistence across restarts.
//!
//! Only the session and profile slices are persisted, verbatim, under a
//! fixed namespace. The busy flag is transient and never written.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::{AppState, ProfileState, SessionState};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to access persisted state '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse persisted state '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize state: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// The persisted projection of [`AppState`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub session: SessionState,
    pub profile: ProfileState,
}

impl PersistedState {
    pub fn capture(state: &AppState) -> Self {
        Self {
            session: SessionState {
                fetching_data: false,
                ..state.session.clone()
            },
            profile: state.profile.clone(),
        }
    }

    /// Nothing worth keeping: logged out or session invalidated.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Storage for the persisted projection.
pub trait Persistence: Send + Sync {
    fn load(&self) -> Result<Option<PersistedState>, PersistError>;
    fn save(&self, state: &PersistedState) -> Result<(), PersistError>;
    fn clear(&self) -> Result<(), PersistError>;
}

/// JSON file on disk, replaced atomically on every save.
pub struct FilePersistence {
    path: PathBuf,
}

impl FilePersistence {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PersistError {
        PersistError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Persistence for FilePersistence {
    fn load(&self) -> Result<Option<PersistedState>, PersistError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let state = serde_json::from_str(&content).map_err(|e| PersistError::Parse {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(Some(state))
    }

    fn save(&self, state: &PersistedState) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let content = serde_json::to_string_pretty(state).map_err(PersistError::Serialize)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))
    }

    fn clear(&self) -> Result<(), PersistError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// In-process storage, for tests and embedders that persist elsewhere.
#[derive(Default)]
pub struct MemoryPersistence {
    slot: Mutex<Option<PersistedState>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: PersistedState) -> Self {
        Self {
            slot: Mutex::new(Some(state)),
        }
    }

    pub fn snapshot(&self) -> Option<PersistedState> {
        self.slot.lock().clone()
    }
}

impl Persistence for MemoryPersistence {
    fn load(&self) -> Result<Option<PersistedState>, PersistError> {
        Ok(self.slot.lock().clone())
    }

    fn save(&self, state: &PersistedState) -> Result<(), PersistError> {
        *self.slot.lock() = Some(state.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), PersistError> {
        *self.slot.lock() = None;
        Ok(())
    }
}
