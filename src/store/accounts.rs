use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

use crate::error::{ApiError, Result};

/// Seam between the registry and the way stored credentials are compared,
/// so a hashing scheme can be swapped in without touching routing.
pub trait CredentialVerifier: Send + Sync {
    fn matches(&self, stored: &str, supplied: &str) -> bool;
}

/// Exact-match comparison of the stored credential. Known weakness:
/// credentials are held and compared in plaintext.
pub struct PlaintextCredentials;

impl CredentialVerifier for PlaintextCredentials {
    fn matches(&self, stored: &str, supplied: &str) -> bool {
        stored == supplied
    }
}

#[derive(Clone)]
pub struct AccountRegistry {
    // email -> credential
    accounts: Arc<DashMap<String, String>>,
    verifier: Arc<dyn CredentialVerifier>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::with_verifier(Arc::new(PlaintextCredentials))
    }

    pub fn with_verifier(verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            accounts: Arc::new(DashMap::new()),
            verifier,
        }
    }

    /// Registers a new account. Fails if the email is already present;
    /// accounts are never updated or deleted.
    pub fn register(&self, email: String, credential: String) -> Result<()> {
        match self.accounts.entry(email) {
            Entry::Occupied(_) => Err(ApiError::EmailTaken),
            Entry::Vacant(entry) => {
                log::info!("Registered account: {}", entry.key());
                entry.insert(credential);
                Ok(())
            }
        }
    }

    /// True iff an account exists for the email and its credential matches.
    pub fn verify(&self, email: &str, credential: &str) -> bool {
        self.accounts
            .get(email)
            .map(|stored| self.verifier.matches(stored.value(), credential))
            .unwrap_or(false)
    }

    pub fn count(&self) -> usize {
        self.accounts.len()
    }
}

impl Default for AccountRegistry {
    fn default() -> Self {
        Self::new()
    }
}
