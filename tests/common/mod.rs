/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for lumenpay-core tests

use lumenpay_core::{ApiClient, ClientConfig, TokenStore};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Build a client against the mock server with an empty token store
pub fn test_client(server: &MockServer) -> ApiClient {
    ApiClient::with_config_and_base_url(ClientConfig::default(), &server.uri(), TokenStore::new())
        .expect("client init")
}

/// Build a client that already holds a bearer token
#[allow(dead_code)]
pub fn authed_client(server: &MockServer) -> ApiClient {
    let client = test_client(server);
    client.token_store().set_token("tok1".to_string(), 3600);
    client
}

/// Deterministic 56-character Stellar-shaped public key
#[allow(dead_code)]
pub fn public_key(seed: char) -> String {
    format!("G{}", seed.to_string().repeat(55))
}

/// Wallet summary as returned by enumeration
#[allow(dead_code)]
pub fn wallet_summary_json(id: &str, name: &str, seed: char) -> serde_json::Value {
    serde_json::json!({
        "wallet_id": id,
        "wallet_name": name,
        "public_key": public_key(seed),
        "balances": [],
    })
}

/// Fully hydrated wallet record
#[allow(dead_code)]
pub fn wallet_detail_json(id: &str, name: &str, seed: char, balance: &str) -> serde_json::Value {
    serde_json::json!({
        "wallet_id": id,
        "wallet_name": name,
        "public_key": public_key(seed),
        "balance_xlm": balance,
        "balances": [format!("{balance} XLM")],
        "created_at": "2024-01-01T00:00:00Z",
    })
}

/// Identity record for profile mocks
#[allow(dead_code)]
pub fn profile_json(user_id: &str) -> serde_json::Value {
    serde_json::json!({
        "user_id": user_id,
        "email": "a@b.com",
        "username": "user1",
        "is_verified": true,
        "is_phone_verified": false,
        "created_at": "2024-01-01T00:00:00Z",
    })
}
