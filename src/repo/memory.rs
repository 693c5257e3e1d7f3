use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::RosterRepository;
use crate::domain::Roster;

/// Keeps the saved roster in process memory.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    saved: RwLock<Option<Roster>>,
    saves: RwLock<usize>,
    fallback: Roster,
}

impl MemoryRepository {
    /// `fallback` is what `load` returns until something has been saved.
    pub fn new(fallback: Roster) -> Self {
        Self {
            saved: RwLock::new(None),
            saves: RwLock::new(0),
            fallback,
        }
    }

    pub async fn save_count(&self) -> usize {
        *self.saves.read().await
    }

    pub async fn last_saved(&self) -> Option<Roster> {
        self.saved.read().await.clone()
    }
}

#[async_trait]
impl RosterRepository for MemoryRepository {
    async fn load(&self) -> Result<Roster> {
        Ok(self
            .saved
            .read()
            .await
            .clone()
            .unwrap_or_else(|| self.fallback.clone()))
    }

    async fn save(&self, roster: &Roster) -> Result<()> {
        *self.saved.write().await = Some(roster.clone());
        *self.saves.write().await += 1;
        Ok(())
    }
}
