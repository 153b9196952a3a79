/*
[INPUT]:  Error sources (transport, backend responses, local validation, storage)
[OUTPUT]: Structured error kinds shared by the whole crate
[POS]:    Error handling layer - unified error types
[UPDATE]: When adding new error sources or backend failure modes
*/

use thiserror::Error;

/// Main error type for the wallet core.
///
/// Every public operation fails with exactly one of these kinds; nothing
/// in the crate surfaces an unstructured error.
#[derive(Error, Debug)]
pub enum WalletError {
    /// A local precondition failed; no request was issued
    #[error("validation failed: {message}")]
    Validation { message: String },

    /// The backend rejected the identifier/password pair
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The backend rejected the submitted one-time code
    #[error("invalid two-factor code")]
    InvalidTwoFactorCode,

    /// The backend requires a one-time code for this operation;
    /// re-invoke with `totp_code` populated
    #[error("a two-factor code is required for this operation")]
    TwoFactorRequired,

    /// The wallet has already received its one-time testnet funding
    #[error("wallet has already been funded")]
    AlreadyFunded,

    /// The source wallet balance does not cover the requested amount
    #[error("insufficient balance")]
    InsufficientBalance,

    /// Destination is not a well-formed Stellar public key
    #[error("invalid Stellar address: {address}")]
    InvalidAddress { address: String },

    /// Operation requires an authenticated session
    #[error("not authenticated")]
    NotAuthenticated,

    /// Referenced entity does not exist
    #[error("{what} not found")]
    NotFound { what: String },

    /// The current token is no longer valid; a full re-login is required
    #[error("session expired, please log in again")]
    SessionExpired,

    /// Transport failure; the request may never have reached the backend
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Valid HTTP response signaling a backend failure
    #[error("server error (status {status}): {message}")]
    Server { status: u16, message: String },

    /// Response body did not match the expected schema
    #[error("malformed response: {0}")]
    Schema(String),

    /// Secure-storage collaborator failed
    #[error("token storage error: {0}")]
    Storage(String),

    /// URL construction failed
    #[error("invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Funding succeeded but the follow-up sync or refresh did not;
    /// in-memory state may be stale until a manual resync
    #[error("wallet funded but follow-up sync failed: {source}")]
    PostFundSync {
        #[source]
        source: Box<WalletError>,
    },
}

impl WalletError {
    /// Shorthand for a local validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        WalletError::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a missing-entity failure.
    pub fn not_found(what: impl Into<String>) -> Self {
        WalletError::NotFound { what: what.into() }
    }

    /// Check if the error is an unambiguous authentication rejection.
    ///
    /// Transport failures are deliberately excluded: a flaky connection
    /// must not be treated as an invalid token.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            WalletError::InvalidCredentials
                | WalletError::NotAuthenticated
                | WalletError::SessionExpired
        )
    }

    /// Check if the caller should re-invoke with a one-time code.
    pub fn requires_two_factor(&self) -> bool {
        matches!(self, WalletError::TwoFactorRequired)
    }

    /// Check if the error is a transport-level failure.
    pub fn is_transient(&self) -> bool {
        matches!(self, WalletError::Network(_))
    }
}

/// Result type alias for wallet core operations.
pub type Result<T> = std::result::Result<T, WalletError>;
