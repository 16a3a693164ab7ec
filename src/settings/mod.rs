//! Player settings persistence
//!
//! Menus that persist preferences (the options menu) talk to an opaque
//! key/float store through [`SettingsService`]. Two stores ship with the crate:
//!
//! - [`MemorySettings`]: a plain map, nothing survives the process
//! - [`JsonSettingsStore`]: a JSON document on disk, written on [`flush`](SettingsService::flush)
//!
//! [`PlayerSettings`] is the typed view the options menu reads and writes.
//!
//! # Example Usage
//!
//! ```ignore
//! let mut store = JsonSettingsStore::open_default()?;
//! let settings = PlayerSettings::load(&store);
//! settings.save(&mut store);
//! store.flush()?;
//! ```

pub mod player;
pub mod store;

pub use player::PlayerSettings;
pub use store::{JsonSettingsStore, MemorySettings, SettingsFile};

use thiserror::Error;

/// Errors from persisting settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("no configuration directory available on this platform")]
    NoConfigDir,

    #[error("invalid settings version: {0}")]
    InvalidVersion(u32),
}

/// Key/float settings store
pub trait SettingsService {
    /// Value stored under `key`, or `default` if there is none
    fn load(&self, key: &str, default: f32) -> f32;

    fn save(&mut self, key: &str, value: f32);

    /// Makes saved values durable; a no-op for stores without backing storage
    fn flush(&mut self) -> Result<(), SettingsError> {
        Ok(())
    }
}
