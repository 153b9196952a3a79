/*
[INPUT]:  Wallet identifiers and money-movement request bodies
[OUTPUT]: Wallet records, transaction lists, and send confirmations
[POS]:    HTTP layer - wallet endpoints (require auth)
[UPDATE]: When wallet endpoints or backend failure text change
*/

use reqwest::Method;

use crate::http::auth::mentions_two_factor;
use crate::http::{ApiClient, Result, WalletError};
use crate::types::{
    CreateWalletRequest, CreateWalletResponse, FundWalletResponse, ImportWalletRequest, ReceiveInfo,
    SendMoneyRequest, SendMoneyResponse, TransactionsResponse, Wallet, WalletsResponse,
};

impl ApiClient {
    /// Enumerate the identity's wallets
    ///
    /// GET /api/wallets
    pub async fn list_wallets(&self) -> Result<WalletsResponse> {
        let builder = self.request(Method::GET, "/api/wallets")?;
        self.send_json(builder).await
    }

    /// Fetch the full record for one wallet
    ///
    /// GET /api/wallets/{id}
    pub async fn get_wallet(&self, wallet_id: &str) -> Result<Wallet> {
        let endpoint = format!("/api/wallets/{wallet_id}");
        let builder = self.request(Method::GET, &endpoint)?;
        match self.send_json(builder).await {
            Err(WalletError::Server { status: 404, .. }) => {
                Err(WalletError::not_found(format!("wallet {wallet_id}")))
            }
            other => other,
        }
    }

    /// Create a new custodial wallet
    ///
    /// POST /api/wallets
    pub async fn create_wallet(&self, wallet_name: &str, password: &str) -> Result<CreateWalletResponse> {
        let body = CreateWalletRequest {
            wallet_name: wallet_name.to_string(),
            password: password.to_string(),
        };
        let builder = self.request(Method::POST, "/api/wallets")?.json(&body);
        self.send_json(builder).await
    }

    /// Import an existing account by secret key
    ///
    /// POST /api/wallets/import
    pub async fn import_wallet(&self, body: &ImportWalletRequest) -> Result<CreateWalletResponse> {
        let builder = self.request(Method::POST, "/api/wallets/import")?.json(body);
        self.send_json(builder).await
    }

    /// One-time testnet funding; idempotency is enforced server-side
    ///
    /// POST /api/wallets/{id}/fund
    pub async fn fund_wallet(&self, wallet_id: &str) -> Result<FundWalletResponse> {
        let endpoint = format!("/api/wallets/{wallet_id}/fund");
        let builder = self.request(Method::POST, &endpoint)?;
        match self.send_json(builder).await {
            Err(WalletError::Server { message, .. })
                if message.to_ascii_lowercase().contains("already funded") =>
            {
                Err(WalletError::AlreadyFunded)
            }
            other => other,
        }
    }

    /// Authoritative single-wallet balance/detail refresh
    ///
    /// POST /api/wallets/{id}/sync
    pub async fn sync_wallet(&self, wallet_id: &str) -> Result<Wallet> {
        let endpoint = format!("/api/wallets/{wallet_id}/sync");
        let builder = self.request(Method::POST, &endpoint)?;
        match self.send_json(builder).await {
            Err(WalletError::Server { status: 404, .. }) => {
                Err(WalletError::not_found(format!("wallet {wallet_id}")))
            }
            other => other,
        }
    }

    /// Submit a payment from a wallet
    ///
    /// POST /api/wallets/{id}/send
    pub async fn send_money(&self, wallet_id: &str, body: &SendMoneyRequest) -> Result<SendMoneyResponse> {
        let endpoint = format!("/api/wallets/{wallet_id}/send");
        let builder = self.request(Method::POST, &endpoint)?.json(body);
        match self.send_json(builder).await {
            Err(WalletError::Server { message, .. }) if mentions_two_factor(&message) => {
                Err(WalletError::TwoFactorRequired)
            }
            Err(WalletError::Server { message, .. })
                if message.to_ascii_lowercase().contains("insufficient") =>
            {
                Err(WalletError::InsufficientBalance)
            }
            Err(WalletError::Server { message, .. })
                if is_address_rejection(&message) =>
            {
                Err(WalletError::InvalidAddress {
                    address: body.destination.clone(),
                })
            }
            other => other,
        }
    }

    /// Full transaction history for a wallet, newest first as given by the backend
    ///
    /// GET /api/wallets/{id}/transactions
    pub async fn get_wallet_transactions(&self, wallet_id: &str) -> Result<TransactionsResponse> {
        let endpoint = format!("/api/wallets/{wallet_id}/transactions");
        let builder = self.request(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }

    /// Receiving address plus supported-asset list
    ///
    /// GET /api/wallets/{id}/receive
    pub async fn get_receive_info(&self, wallet_id: &str) -> Result<ReceiveInfo> {
        let endpoint = format!("/api/wallets/{wallet_id}/receive");
        let builder = self.request(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }
}

fn is_address_rejection(message: &str) -> bool {
    let lowered = message.to_ascii_lowercase();
    lowered.contains("invalid") && (lowered.contains("address") || lowered.contains("destination"))
}
