//! Owns the session's roster and threads it through the billing core.

use anyhow::Result;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::error;

use crate::billing::Statement;
use crate::config::Config;
use crate::domain::{Roster, RosterError, Tenant, TenantDraft, TenantId};
use crate::repo::{self, RosterRepository};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error("Failed to persist roster: {0}")]
    Storage(#[from] anyhow::Error),
}

#[derive(Clone)]
pub struct AppState {
    pub cfg: Config,
    pub ledger: Arc<Ledger>,
}

impl AppState {
    pub async fn new(cfg: Config) -> Result<Self> {
        let repo = repo::from_config(&cfg);
        Self::with_repository(cfg, repo).await
    }

    pub async fn with_repository(cfg: Config, repo: Arc<dyn RosterRepository>) -> Result<Self> {
        let ledger = Arc::new(Ledger::load(repo).await?);
        Ok(Self { cfg, ledger })
    }
}

/// The roster for this session plus the store it is saved to.
///
/// Mutations run against a copy which is saved first and only then swapped
/// in, so memory and storage never disagree about a committed change.
pub struct Ledger {
    roster: RwLock<Roster>,
    repo: Arc<dyn RosterRepository>,
}

impl Ledger {
    pub async fn load(repo: Arc<dyn RosterRepository>) -> Result<Self> {
        let roster = repo.load().await?;
        Ok(Self {
            roster: RwLock::new(roster),
            repo,
        })
    }

    pub async fn snapshot(&self) -> Roster {
        self.roster.read().await.clone()
    }

    pub async fn search(&self, term: &str) -> Vec<Tenant> {
        self.roster
            .read()
            .await
            .search(term)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: TenantId) -> Result<Tenant, LedgerError> {
        self.roster
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(LedgerError::Roster(RosterError::TenantNotFound(id)))
    }

    async fn commit<T>(
        &self,
        op: impl FnOnce(&mut Roster) -> Result<T, RosterError>,
    ) -> Result<T, LedgerError> {
        let mut guard = self.roster.write().await;
        let mut next = guard.clone();
        let out = op(&mut next)?;
        if let Err(e) = self.repo.save(&next).await {
            error!(error = %e, "roster save failed, change discarded");
            return Err(e.into());
        }
        *guard = next;
        Ok(out)
    }

    pub async fn add_tenant(&self, draft: TenantDraft) -> Result<Tenant, LedgerError> {
        self.commit(|r| r.add_tenant(draft)).await
    }

    pub async fn edit_tenant(&self, id: TenantId, draft: TenantDraft) -> Result<Tenant, LedgerError> {
        self.commit(|r| r.edit_tenant(id, draft)).await
    }

    pub async fn delete_tenant(&self, id: TenantId) -> Result<Tenant, LedgerError> {
        self.commit(|r| r.delete_tenant(id)).await
    }

    pub async fn record_meter_reading(
        &self,
        id: TenantId,
        previous: i64,
        current: i64,
    ) -> Result<Tenant, LedgerError> {
        self.commit(|r| r.apply_meter_update(id, previous, current)).await
    }

    pub async fn statement(&self, bill_amount: u64, currency: &str) -> Statement {
        Statement::compute(&*self.roster.read().await, bill_amount, currency)
    }
}
