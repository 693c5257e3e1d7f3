//! Persistence of the roster between sessions.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::Config;
use crate::domain::Roster;

pub mod json_file;
pub mod memory;
pub mod seed;

pub use json_file::JsonFileRepository;
pub use memory::MemoryRepository;
pub use seed::seed_roster;

/// Load/save collaborator. `load` never fails on missing or undecodable
/// data; it falls back to the seed roster instead.
#[async_trait]
pub trait RosterRepository: Send + Sync {
    async fn load(&self) -> Result<Roster>;
    /// Called after every committed mutation; saving the same roster twice is harmless.
    async fn save(&self, roster: &Roster) -> Result<()>;
}

pub fn from_config(cfg: &Config) -> Arc<dyn RosterRepository> {
    Arc::new(JsonFileRepository::new(
        cfg.storage.path.clone(),
        cfg.storage.seed_on_missing,
    ))
}
