/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public wallet core crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;
pub mod validate;
pub mod wallet;

// Re-export commonly used types from auth
pub use auth::{
    LoginOutcome,
    MemoryTokenStorage,
    PendingTwoFactorChallenge,
    Session,
    SessionManager,
    SessionState,
    TokenData,
    TokenStorage,
    TokenStore,
};

// Re-export commonly used types from http
pub use http::{
    ApiClient,
    ClientConfig,
    Result,
    WalletError,
};

// Re-export all types
pub use types::*;

// Re-export commonly used types from wallet
pub use wallet::{
    FRIENDBOT_ADDRESS,
    SendMoneyParams,
    TransactionKind,
    WalletCollection,
    WalletStateManager,
    classify,
};
