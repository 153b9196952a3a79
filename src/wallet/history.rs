/*
[INPUT]:  Backend transaction records and the active wallet's public key
[OUTPUT]: Display classification for history filtering
[POS]:    Wallet layer - transaction classification
[UPDATE]: When classification rules or the funding service address change
*/

use crate::types::Transaction;

/// Address of the testnet funding service (Friendbot).
pub const FRIENDBOT_ADDRESS: &str = "GAIH3ULLFQ4DGSECF2AR555KZ4KNDGEKN4AFI4SU2M7B43MGK3QJZNSR";

/// Direction of a transaction relative to the active wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Sent,
    Received,
    Funded,
    Swap,
}

impl TransactionKind {
    /// Whether the transaction credits the active wallet.
    pub fn is_incoming(&self) -> bool {
        matches!(self, TransactionKind::Received | TransactionKind::Funded)
    }
}

/// Classify a transaction against the active wallet's public key.
pub fn classify(tx: &Transaction, active_public_key: &str) -> TransactionKind {
    if tx.from == active_public_key {
        TransactionKind::Sent
    } else if tx.to == active_public_key {
        TransactionKind::Received
    } else if tx.from == FRIENDBOT_ADDRESS {
        TransactionKind::Funded
    } else {
        TransactionKind::Swap
    }
}
