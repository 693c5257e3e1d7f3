use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::{seed_roster, RosterRepository};
use crate::domain::Roster;

/// Roster stored as a JSON array of tenants in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
    seed_on_missing: bool,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>, seed_on_missing: bool) -> Self {
        Self {
            path: path.into(),
            seed_on_missing,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl RosterRepository for JsonFileRepository {
    async fn load(&self) -> Result<Roster> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), seeded = self.seed_on_missing, "no stored roster");
                return Ok(if self.seed_on_missing {
                    seed_roster()
                } else {
                    Roster::new()
                });
            }
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()));
            }
        };

        match serde_json::from_str::<Roster>(&raw) {
            Ok(roster) => {
                info!(path = %self.path.display(), tenants = roster.len(), "roster loaded");
                Ok(roster)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "stored roster unreadable, using seed data");
                Ok(seed_roster())
            }
        }
    }

    async fn save(&self, roster: &Roster) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        let body = serde_json::to_vec_pretty(roster)?;
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, body)
            .await
            .with_context(|| format!("writing {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TenantDraft;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("locapay-{}", uuid::Uuid::new_v4()))
            .join("roster.json")
    }

    #[tokio::test]
    async fn test_missing_file_seeds_or_starts_empty() {
        let seeded = JsonFileRepository::new(scratch_path(), true);
        assert_eq!(seeded.load().await.unwrap().len(), 5);

        let empty = JsonFileRepository::new(scratch_path(), false);
        assert!(empty.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let repo = JsonFileRepository::new(scratch_path(), false);
        let mut roster = Roster::new();
        roster
            .add_tenant(TenantDraft {
                name: "Ba".into(),
                first_name: "Moussa".into(),
                room_label: "C-301".into(),
                rent: 185000,
                initial_meter_reading: 220,
                phone: Some("+228 90 11 22 33".into()),
                photo_ref: None,
            })
            .unwrap();

        repo.save(&roster).await.unwrap();
        repo.save(&roster).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), roster);
        assert!(!repo.tmp_path().exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_falls_back_to_seed() {
        let path = scratch_path();
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let repo = JsonFileRepository::new(&path, false);
        assert_eq!(repo.load().await.unwrap(), seed_roster());
    }

    #[tokio::test]
    async fn test_duplicate_rooms_on_disk_fall_back_to_seed() {
        let path = scratch_path();
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        let body = r#"[
            {"id":1,"name":"A","first_name":"a","room_label":"A-101","rent":1,"meter_previous":0,"meter_current":0},
            {"id":2,"name":"B","first_name":"b","room_label":"a-101","rent":1,"meter_previous":0,"meter_current":0}
        ]"#;
        tokio::fs::write(&path, body).await.unwrap();

        let repo = JsonFileRepository::new(&path, false);
        assert_eq!(repo.load().await.unwrap(), seed_roster());
    }

    #[tokio::test]
    async fn test_inverted_readings_on_disk_fall_back_to_seed() {
        let path = scratch_path();
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        let body = r#"[
            {"id":1,"name":"A","first_name":"a","room_label":"A-101","rent":1,"meter_previous":300,"meter_current":200}
        ]"#;
        tokio::fs::write(&path, body).await.unwrap();

        let repo = JsonFileRepository::new(&path, false);
        assert_eq!(repo.load().await.unwrap(), seed_roster());
    }
}
