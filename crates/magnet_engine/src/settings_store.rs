use std::sync::Mutex;

use magnet_core::ConnectionSettings;
use thiserror::Error;

use crate::PersistError;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings: {0}")]
    Read(String),
    #[error("could not parse settings: {0}")]
    Parse(String),
    #[error("could not write settings: {0}")]
    Write(#[from] PersistError),
}

/// Flat key-value record holding `webuiUrl`, `username` and `password`.
pub trait SettingsStore: Send + Sync {
    /// Current settings; a store that was never written yields defaults.
    fn load(&self) -> Result<ConnectionSettings, SettingsError>;
    fn save(&self, settings: &ConnectionSettings) -> Result<(), SettingsError>;
}

#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    inner: Mutex<ConnectionSettings>,
}

impl MemorySettingsStore {
    pub fn new(settings: ConnectionSettings) -> Self {
        Self {
            inner: Mutex::new(settings),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<ConnectionSettings, SettingsError> {
        self.inner
            .lock()
            .map(|guard| guard.clone())
            .map_err(|err| SettingsError::Read(err.to_string()))
    }

    fn save(&self, settings: &ConnectionSettings) -> Result<(), SettingsError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|err| SettingsError::Read(err.to_string()))?;
        *guard = settings.clone();
        Ok(())
    }
}
