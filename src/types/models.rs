/*
[INPUT]:  Backend schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When backend schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identity record returned by the profile endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub email: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_phone_verified: bool,
    pub created_at: String,
}

/// Wallet entry as returned by enumeration, before detail hydration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletSummary {
    pub wallet_id: String,
    pub wallet_name: String,
    pub public_key: String,
    #[serde(default)]
    pub balances: Vec<String>,
}

/// Fully hydrated wallet record.
///
/// `balance_xlm` is a decimal string on the wire and must round-trip
/// string-exact, so it goes through `rust_decimal::serde::str`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub wallet_id: String,
    pub wallet_name: String,
    pub public_key: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub balance_xlm: Decimal,
    #[serde(default)]
    pub balances: Vec<String>,
    pub created_at: String,
}

/// Ledger transaction as reported by the backend. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: String,
    pub from: String,
    pub to: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub asset_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    pub status: String,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_balance_roundtrips_string_exact() {
        let json = r#"{
            "wallet_id": "w1",
            "wallet_name": "Main",
            "public_key": "GABCDEFGHIJKLMNOPQRSTUVWXYZ234567ABCDEFGHIJKLMNOPQRSTUVW",
            "balance_xlm": "10000.0000000",
            "balances": ["10000.0000000 XLM"],
            "created_at": "2024-01-01T00:00:00Z"
        }"#;

        let wallet: Wallet = serde_json::from_str(json).unwrap();
        assert_eq!(wallet.wallet_id, "w1");
        assert_eq!(wallet.balance_xlm.to_string(), "10000.0000000");

        let value = serde_json::to_value(&wallet).unwrap();
        assert_eq!(
            value.get("balance_xlm").and_then(|v| v.as_str()),
            Some("10000.0000000")
        );
    }

    #[test]
    fn test_transaction_optional_fields_default() {
        let json = r#"{
            "hash": "abc",
            "from": "GA",
            "to": "GB",
            "amount": "5.5",
            "asset_code": "XLM",
            "status": "success",
            "created_at": "2024-01-01T00:00:00Z"
        }"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert!(tx.asset_issuer.is_none());
        assert!(tx.memo.is_none());
    }
}
