/*
[INPUT]:  Credentials, persisted tokens, and backend auth responses
[OUTPUT]: Session lifecycle management and shared token state
[POS]:    Auth layer - module wiring
[UPDATE]: When auth components change
*/

pub mod manager;
pub mod storage;
pub mod token;

pub use manager::{
    LoginOutcome, PendingTwoFactorChallenge, Session, SessionManager, SessionState,
};
pub use storage::{MemoryTokenStorage, TokenStorage};
pub use token::{TokenData, TokenStore};
