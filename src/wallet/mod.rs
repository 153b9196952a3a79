/*
[INPUT]:  Session gate and backend wallet responses
[OUTPUT]: Wallet collection state and wallet-scoped operations
[POS]:    Wallet layer - module wiring
[UPDATE]: When wallet components change
*/

pub mod collection;
pub mod history;
pub mod manager;

pub use collection::WalletCollection;
pub use history::{FRIENDBOT_ADDRESS, TransactionKind, classify};
pub use manager::{SendMoneyParams, WalletStateManager};
