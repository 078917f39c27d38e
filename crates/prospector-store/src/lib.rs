//! The prospect store: a sled-backed pass-through over one serialized
//! list.
//!
//! The whole CRM collection lives as a single JSON-serialized
//! `Vec<Prospect>` under a fixed key; every write is a read-modify-write
//! of the full list. Reads degrade to an empty collection when the key is
//! absent or the payload unparsable — the tool never refuses to start
//! over a damaged store. Concurrent writers are not coordinated; the last
//! writer wins (single-user tool, documented non-goal).

use std::path::Path;

use prospector_core::{Prospect, UserStatus};
use thiserror::Error;

const PROSPECTS_KEY: &str = "prospects";

/// Errors returned by the prospect store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Storage(#[from] sled::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Handle on the persisted prospect collection.
pub struct ProspectStore {
    db: sled::Db,
}

impl ProspectStore {
    /// Opens (or creates) the store at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the database cannot be opened.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Returns all persisted prospects.
    ///
    /// An absent key or a corrupt payload reads as an empty collection
    /// (logged at warn), never an error.
    #[must_use]
    pub fn list(&self) -> Vec<Prospect> {
        let Ok(Some(raw)) = self.db.get(PROSPECTS_KEY) else {
            return Vec::new();
        };
        match serde_json::from_slice(&raw) {
            Ok(prospects) => prospects,
            Err(e) => {
                tracing::warn!(error = %e, "prospect store payload is corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    /// Inserts `prospect`, replacing any existing entry with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be serialized or
    /// written.
    pub fn upsert(&self, prospect: &Prospect) -> Result<(), StoreError> {
        let mut prospects = self.list();
        match prospects.iter_mut().find(|p| p.id == prospect.id) {
            Some(existing) => *existing = prospect.clone(),
            None => prospects.push(prospect.clone()),
        }
        self.write(&prospects)
    }

    /// Sets the status of the prospect with `id`. No-op when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be serialized or
    /// written.
    pub fn update_status(&self, id: &str, status: UserStatus) -> Result<(), StoreError> {
        let mut prospects = self.list();
        let Some(prospect) = prospects.iter_mut().find(|p| p.id == id) else {
            return Ok(());
        };
        prospect.user_status = status;
        self.write(&prospects)
    }

    /// Deletes the prospect with `id`. No-op when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be serialized or
    /// written.
    pub fn remove(&self, id: &str) -> Result<(), StoreError> {
        let mut prospects = self.list();
        let before = prospects.len();
        prospects.retain(|p| p.id != id);
        if prospects.len() == before {
            return Ok(());
        }
        self.write(&prospects)
    }

    fn write(&self, prospects: &[Prospect]) -> Result<(), StoreError> {
        let payload = serde_json::to_vec(prospects)?;
        self.db.insert(PROSPECTS_KEY, payload)?;
        // An acknowledged save must survive a crash.
        self.db.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use prospector_core::{AiInsight, BusinessData, Location};

    use super::*;

    fn open_temp() -> (tempfile::TempDir, ProspectStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ProspectStore::open(&dir.path().join("db")).expect("open store");
        (dir, store)
    }

    fn prospect(name: &str) -> Prospect {
        Prospect::new(
            BusinessData {
                name: name.to_string(),
                rating: Some(3.2),
                ..BusinessData::default()
            },
            Location::checked(45.76, 4.83),
            Some(AiInsight {
                score: 72.0,
                analysis_summary: "Bonne cible".to_string(),
                suggested_offer: "Site vitrine".to_string(),
                is_target: true,
            }),
        )
    }

    #[test]
    fn empty_store_lists_nothing() {
        let (_dir, store) = open_temp();
        assert!(store.list().is_empty());
    }

    #[test]
    fn upsert_then_list_round_trips_field_for_field() {
        let (_dir, store) = open_temp();
        let p = prospect("Chez Marcel");
        store.upsert(&p).unwrap();

        let listed = store.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], p);
    }

    #[test]
    fn upsert_with_same_id_replaces_instead_of_appending() {
        let (_dir, store) = open_temp();
        let mut p = prospect("Chez Marcel");
        store.upsert(&p).unwrap();

        p.business_data.email = Some("contact@chez-marcel.fr".to_string());
        store.upsert(&p).unwrap();

        let listed = store.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(
            listed[0].business_data.email.as_deref(),
            Some("contact@chez-marcel.fr")
        );
    }

    #[test]
    fn update_status_is_idempotent() {
        let (_dir, store) = open_temp();
        let p = prospect("Chez Marcel");
        store.upsert(&p).unwrap();

        store.update_status(&p.id, UserStatus::Contacted).unwrap();
        let once = store.list();
        store.update_status(&p.id, UserStatus::Contacted).unwrap();
        let twice = store.list();

        assert_eq!(once, twice);
        assert_eq!(twice[0].user_status, UserStatus::Contacted);
    }

    #[test]
    fn update_status_for_unknown_id_is_a_no_op() {
        let (_dir, store) = open_temp();
        let p = prospect("Chez Marcel");
        store.upsert(&p).unwrap();

        store.update_status("missing", UserStatus::Signed).unwrap();
        assert_eq!(store.list()[0].user_status, UserStatus::New);
    }

    #[test]
    fn remove_deletes_only_the_matching_prospect() {
        let (_dir, store) = open_temp();
        let a = prospect("A");
        let b = prospect("B");
        store.upsert(&a).unwrap();
        store.upsert(&b).unwrap();

        store.remove(&a.id).unwrap();
        let listed = store.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, b.id);

        store.remove("missing").unwrap();
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn corrupt_payload_reads_as_empty() {
        let (_dir, store) = open_temp();
        store.upsert(&prospect("Chez Marcel")).unwrap();
        store
            .db
            .insert(PROSPECTS_KEY, &b"{not json"[..])
            .unwrap();

        assert!(store.list().is_empty());
    }

    #[test]
    fn store_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("db");
        let p = prospect("Chez Marcel");
        {
            let store = ProspectStore::open(&path).unwrap();
            store.upsert(&p).unwrap();
        }
        let store = ProspectStore::open(&path).unwrap();
        assert_eq!(store.list(), vec![p]);
    }
}
