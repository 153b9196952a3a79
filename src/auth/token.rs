/*
[INPUT]:  Bearer tokens and expiration timestamps
[OUTPUT]: Token retrieval and expiration status
[POS]:    Auth layer - token lifecycle management
[UPDATE]: When changing token metadata or expiry handling
*/

use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, RwLock};

/// Stored token with metadata
#[derive(Debug, Clone)]
pub struct TokenData {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Shared bearer-token cell.
///
/// Mutated only by `SessionManager`; the API client and
/// `WalletStateManager` hold read-only clones. Token present and
/// unexpired is the single source of truth for "authenticated".
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    data: Arc<RwLock<Option<TokenData>>>,
}

impl TokenStore {
    /// Create a new empty token store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new token with expiration
    pub fn set_token(&self, token: String, expires_in: u64) {
        let token_data = TokenData {
            token,
            expires_at: Utc::now() + Duration::seconds(expires_in as i64),
        };

        let mut guard = self.data.write().unwrap();
        *guard = Some(token_data);
    }

    /// Get the current token if available
    pub fn token(&self) -> Option<String> {
        let guard = self.data.read().unwrap();
        guard.as_ref().map(|data| data.token.clone())
    }

    /// Get token data if available
    pub fn token_data(&self) -> Option<TokenData> {
        let guard = self.data.read().unwrap();
        guard.clone()
    }

    /// Check if the stored token is expired (or absent)
    pub fn is_expired(&self) -> bool {
        let guard = self.data.read().unwrap();
        match guard.as_ref() {
            Some(data) => Utc::now() > data.expires_at,
            None => true,
        }
    }

    /// Check if a usable token is present
    pub fn is_authenticated(&self) -> bool {
        !self.is_expired()
    }

    /// Clear the stored token
    pub fn clear(&self) {
        let mut guard = self.data.write().unwrap();
        *guard = None;
    }
}
