//! Administrator credential storage.
//!
//! This module owns the single admin credential record: seeding it on first
//! run and reading it back. The credential is stored as cleartext JSON under
//! a fixed key; there is deliberately no hashing or secrecy here, the record
//! only gates the local UI.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::AuthConfig;
use crate::error::{Error, Result};
use crate::storage::{KeyValueStore, ADMIN_KEY};

/// The administrator credential record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCredential {
    /// Administrator username.
    pub username: String,
    /// Administrator password, stored as cleartext.
    pub password: String,
}

/// Store for the singleton admin credential record.
#[derive(Debug)]
pub struct CredentialStore<'a, S: KeyValueStore> {
    store: &'a S,
    seed: AdminCredential,
}

impl<'a, S: KeyValueStore> CredentialStore<'a, S> {
    /// Create a credential store over the given backing storage.
    ///
    /// The seed record written on first run comes from configuration.
    pub fn new(store: &'a S, auth: &AuthConfig) -> Self {
        Self {
            store,
            seed: AdminCredential {
                username: auth.seed_username.clone(),
                password: auth.seed_password.clone(),
            },
        }
    }

    /// Seed the default admin credential if none exists yet.
    ///
    /// Idempotent: once a credential is present (seeded or written by a
    /// login), repeated calls change nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn ensure_seeded(&self) -> Result<()> {
        if self.store.get(ADMIN_KEY)?.is_some() {
            return Ok(());
        }

        let serialized = serde_json::to_string(&self.seed)?;
        self.store.set(ADMIN_KEY, &serialized)?;
        info!("Default admin credentials initialized");
        Ok(())
    }

    /// Read the current admin credential, or `None` if never seeded.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails or the stored record
    /// cannot be decoded. Absence of the record is not an error.
    pub fn read(&self) -> Result<Option<AdminCredential>> {
        match self.store.get(ADMIN_KEY)? {
            Some(raw) => {
                let credential = serde_json::from_str(&raw)
                    .map_err(|source| Error::value_decode(ADMIN_KEY, source))?;
                Ok(Some(credential))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn credential_store(store: &MemoryStore) -> CredentialStore<'_, MemoryStore> {
        CredentialStore::new(store, &AuthConfig::default())
    }

    #[test]
    fn test_read_before_seeding() {
        let store = MemoryStore::new();
        let credentials = credential_store(&store);

        assert_eq!(credentials.read().unwrap(), None);
    }

    #[test]
    fn test_ensure_seeded_writes_default() {
        let store = MemoryStore::new();
        let credentials = credential_store(&store);

        credentials.ensure_seeded().unwrap();

        let admin = credentials.read().unwrap().unwrap();
        assert_eq!(admin.username, "admin");
        assert_eq!(admin.password, "admin123");
    }

    #[test]
    fn test_ensure_seeded_is_idempotent() {
        let store = MemoryStore::new();
        let credentials = credential_store(&store);

        credentials.ensure_seeded().unwrap();
        let first = store.get(ADMIN_KEY).unwrap();

        credentials.ensure_seeded().unwrap();
        let second = store.get(ADMIN_KEY).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_ensure_seeded_preserves_existing_record() {
        let store = MemoryStore::new();
        store
            .set(ADMIN_KEY, r#"{"username":"root","password":"hunter2"}"#)
            .unwrap();

        let credentials = credential_store(&store);
        credentials.ensure_seeded().unwrap();

        let admin = credentials.read().unwrap().unwrap();
        assert_eq!(admin.username, "root");
    }

    #[test]
    fn test_read_malformed_record_is_distinguishable() {
        let store = MemoryStore::new();
        store.set(ADMIN_KEY, "not json").unwrap();

        let credentials = credential_store(&store);
        let err = credentials.read().unwrap_err();
        assert!(err.is_storage());
        assert!(err.to_string().contains("admin"));
    }

    #[test]
    fn test_seed_comes_from_config() {
        let store = MemoryStore::new();
        let auth = AuthConfig {
            seed_username: "registrar".to_string(),
            seed_password: "letmein99".to_string(),
            ..AuthConfig::default()
        };
        let credentials = CredentialStore::new(&store, &auth);

        credentials.ensure_seeded().unwrap();
        let admin = credentials.read().unwrap().unwrap();
        assert_eq!(admin.username, "registrar");
        assert_eq!(admin.password, "letmein99");
    }
}
