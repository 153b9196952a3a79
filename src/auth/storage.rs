/*
[INPUT]:  Persisted bearer token (platform secure storage)
[OUTPUT]: Token load/store/clear contract for session restore
[POS]:    Auth layer - pluggable persistence seam
[UPDATE]: When adding persisted fields or changing the storage contract
*/

use std::sync::Mutex;

use async_trait::async_trait;

use crate::http::Result;

/// Secure-storage collaborator holding the persisted bearer token.
///
/// Platform adapters (keychain, keystore) implement this; the crate
/// ships an in-memory implementation for tests and ephemeral sessions.
#[async_trait]
pub trait TokenStorage: Send + Sync {
    async fn load(&self) -> Result<Option<String>>;
    async fn store(&self, token: &str) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

/// In-memory token storage
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with a pre-existing token, as a device with a prior login would have
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    /// Peek at the persisted token (test inspection)
    pub fn persisted(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenStorage for MemoryTokenStorage {
    async fn load(&self) -> Result<Option<String>> {
        Ok(self.token.lock().unwrap().clone())
    }

    async fn store(&self, token: &str) -> Result<()> {
        *self.token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage_roundtrip() {
        let storage = MemoryTokenStorage::new();
        assert!(storage.load().await.unwrap().is_none());

        storage.store("tok1").await.unwrap();
        assert_eq!(storage.load().await.unwrap(), Some("tok1".to_string()));

        storage.clear().await.unwrap();
        assert!(storage.load().await.unwrap().is_none());
    }
}
