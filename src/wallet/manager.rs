/*
[INPUT]:  Authenticated session gate and wallet operation requests
[OUTPUT]: Synchronized wallet collection and money-movement results
[POS]:    Wallet layer - orchestrates all wallet-scoped operations
[UPDATE]: When wallet operations or precondition checks change
*/

use chrono::Utc;
use futures_util::future::join_all;
use rust_decimal::Decimal;
use tracing::warn;

use crate::auth::TokenStore;
use crate::http::{ApiClient, Result, WalletError};
use crate::types::{
    CreateWalletResponse, ImportWalletRequest, ReceiveInfo, SendMoneyRequest, Transaction, Wallet,
};
use crate::validate;

use super::WalletCollection;

/// Everything needed to move money out of a wallet.
#[derive(Debug, Clone)]
pub struct SendMoneyParams {
    pub wallet_id: String,
    pub destination: String,
    pub amount: Decimal,
    pub asset_code: String,
    pub memo: Option<String>,
    pub password: String,
    pub totp_code: Option<String>,
}

/// Maintains the authenticated identity's wallet set and mediates all
/// wallet-scoped operations. Depends on the session only through the
/// shared token store; it never mutates session state.
pub struct WalletStateManager {
    client: ApiClient,
    tokens: TokenStore,
    collection: WalletCollection,
}

impl WalletStateManager {
    pub fn new(client: ApiClient) -> Self {
        let tokens = client.token_store().clone();
        Self {
            client,
            tokens,
            collection: WalletCollection::new(),
        }
    }

    pub fn wallets(&self) -> &[Wallet] {
        self.collection.wallets()
    }

    pub fn selected_wallet(&self) -> Option<&Wallet> {
        self.collection.selected()
    }

    pub fn selected_wallet_id(&self) -> Option<&str> {
        self.collection.selected_wallet_id()
    }

    /// Drop all local wallet state (after logout).
    pub fn clear(&mut self) {
        self.collection.clear();
    }

    /// Rebuild the collection: enumerate wallets, hydrate details
    /// concurrently, then re-validate the active selection.
    ///
    /// A wallet whose detail fetch fails is still included with its
    /// balance defaulted to zero, so one bad wallet never blocks the
    /// rest.
    pub async fn refresh_wallets(&mut self) -> Result<&[Wallet]> {
        self.ensure_authenticated()?;

        let summaries = self.client.list_wallets().await?.wallets;

        let hydrations = summaries.into_iter().map(|summary| {
            let client = self.client.clone();
            async move {
                match client.get_wallet(&summary.wallet_id).await {
                    Ok(wallet) => wallet,
                    Err(err) => {
                        warn!(
                            wallet_id = %summary.wallet_id,
                            error = %err,
                            "wallet detail fetch failed, keeping degraded entry"
                        );
                        Wallet {
                            wallet_id: summary.wallet_id,
                            wallet_name: summary.wallet_name,
                            public_key: summary.public_key,
                            balance_xlm: Decimal::ZERO,
                            balances: summary.balances,
                            created_at: Utc::now().to_rfc3339(),
                        }
                    }
                }
            }
        });
        let wallets = join_all(hydrations).await;

        self.collection.replace_all(wallets);
        Ok(self.collection.wallets())
    }

    /// Make a wallet the active one. Purely local; re-selecting the
    /// current wallet is a no-op.
    pub fn select_wallet(&mut self, wallet_id: &str) -> Result<()> {
        if !self.collection.contains(wallet_id) {
            return Err(WalletError::not_found(format!("wallet {wallet_id}")));
        }
        self.collection.select(wallet_id);
        Ok(())
    }

    /// Create a wallet after local checks, then reload the collection
    /// so server-assigned fields are authoritative.
    ///
    /// The duplicate-name check is advisory: it runs against the
    /// currently loaded collection and the server remains the final
    /// authority.
    pub async fn create_wallet(&mut self, name: &str, password: &str) -> Result<CreateWalletResponse> {
        self.ensure_authenticated()?;
        validate::wallet_name(name)?;
        validate::password(password)?;
        if self.collection.find_by_name(name).is_some() {
            return Err(WalletError::validation(format!(
                "a wallet named '{name}' already exists"
            )));
        }

        let response = self.client.create_wallet(name, password).await?;
        self.refresh_wallets().await?;
        Ok(response)
    }

    /// Import an existing account by secret key; same consistency
    /// policy as `create_wallet`.
    pub async fn import_wallet(
        &mut self,
        name: &str,
        secret_key: &str,
        password: &str,
    ) -> Result<CreateWalletResponse> {
        self.ensure_authenticated()?;
        validate::wallet_name(name)?;
        validate::stellar_secret(secret_key)?;
        validate::password(password)?;
        if self.collection.find_by_name(name).is_some() {
            return Err(WalletError::validation(format!(
                "a wallet named '{name}' already exists"
            )));
        }

        let body = ImportWalletRequest {
            wallet_name: name.to_string(),
            secret_key: secret_key.to_string(),
            password: password.to_string(),
        };
        let response = self.client.import_wallet(&body).await?;
        self.refresh_wallets().await?;
        Ok(response)
    }

    /// One-time testnet funding, chained with a sync for the
    /// authoritative balance and a full refresh for reconciliation.
    /// Funding goes by id alone, so a wallet obtained out-of-band can
    /// be funded before any local refresh; the server is the authority
    /// on whether the id exists. The funded wallet becomes the active
    /// selection once the refresh lands it in the collection.
    ///
    /// If funding succeeded but a follow-up step failed, the error is
    /// surfaced as `PostFundSync` so the caller can trigger a manual
    /// resync instead of re-funding.
    pub async fn fund_wallet(&mut self, wallet_id: &str) -> Result<Wallet> {
        self.ensure_authenticated()?;

        self.client.fund_wallet(wallet_id).await?;

        let synced = match self.sync_wallet(wallet_id).await {
            Ok(wallet) => wallet,
            Err(err) => {
                return Err(WalletError::PostFundSync {
                    source: Box::new(err),
                });
            }
        };

        if let Err(err) = self.refresh_wallets().await {
            return Err(WalletError::PostFundSync {
                source: Box::new(err),
            });
        }
        if self.collection.contains(wallet_id) {
            self.collection.select(wallet_id);
        }

        Ok(self.collection.get(wallet_id).cloned().unwrap_or(synced))
    }

    /// Authoritative single-record refresh: patches only the matching
    /// entry, leaving siblings untouched.
    pub async fn sync_wallet(&mut self, wallet_id: &str) -> Result<Wallet> {
        self.ensure_authenticated()?;
        let wallet = self.client.sync_wallet(wallet_id).await?;
        self.collection.patch(wallet.clone());
        Ok(wallet)
    }

    /// Send a payment. Local preconditions run before any request:
    /// destination shape, positive amount, and an advisory balance
    /// check against the loaded entry (the server re-validates).
    ///
    /// A `TwoFactorRequired` failure means re-invoke with `totp_code`
    /// populated. On success the collection is reloaded and the
    /// transaction hash returned.
    pub async fn send_money(&mut self, params: SendMoneyParams) -> Result<String> {
        self.ensure_authenticated()?;
        validate::stellar_address(&params.destination)?;
        if params.amount <= Decimal::ZERO {
            return Err(WalletError::validation("amount must be greater than zero"));
        }
        if let Some(code) = params.totp_code.as_deref() {
            validate::totp_code(code)?;
        }
        if let Some(wallet) = self.collection.get(&params.wallet_id) {
            if params.amount > wallet.balance_xlm {
                return Err(WalletError::InsufficientBalance);
            }
        }

        let body = SendMoneyRequest {
            destination: params.destination,
            amount: params.amount,
            asset_code: params.asset_code,
            memo: params.memo,
            password: params.password,
            totp_code: params.totp_code,
        };
        let response = self.client.send_money(&params.wallet_id, &body).await?;

        self.refresh_wallets().await?;
        Ok(response.transaction_hash)
    }

    /// Read-through history fetch; no local caching or pagination.
    pub async fn get_wallet_transactions(&self, wallet_id: &str) -> Result<Vec<Transaction>> {
        self.ensure_authenticated()?;
        let response = self.client.get_wallet_transactions(wallet_id).await?;
        Ok(response.transactions)
    }

    /// Read-through fetch of the receiving address and supported assets.
    pub async fn get_receive_info(&self, wallet_id: &str) -> Result<ReceiveInfo> {
        self.ensure_authenticated()?;
        self.client.get_receive_info(wallet_id).await
    }

    fn ensure_authenticated(&self) -> Result<()> {
        if self.tokens.is_authenticated() {
            Ok(())
        } else {
            Err(WalletError::NotAuthenticated)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unauthenticated_manager() -> WalletStateManager {
        let client = ApiClient::new(TokenStore::new()).unwrap();
        WalletStateManager::new(client)
    }

    #[tokio::test]
    async fn test_operations_require_authentication() {
        let mut manager = unauthenticated_manager();

        assert!(matches!(
            manager.refresh_wallets().await,
            Err(WalletError::NotAuthenticated)
        ));
        assert!(matches!(
            manager.create_wallet("Main", "password123").await,
            Err(WalletError::NotAuthenticated)
        ));
        assert!(matches!(
            manager.get_wallet_transactions("w1").await,
            Err(WalletError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_select_unknown_wallet_is_not_found() {
        let mut manager = unauthenticated_manager();
        assert!(matches!(
            manager.select_wallet("missing"),
            Err(WalletError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_send_money_rejects_bad_inputs_before_network() {
        let client = ApiClient::new(TokenStore::new()).unwrap();
        client.token_store().set_token("tok1".to_string(), 3600);
        let mut manager = WalletStateManager::new(client);

        let params = SendMoneyParams {
            wallet_id: "w1".to_string(),
            destination: "not-an-address".to_string(),
            amount: Decimal::ONE,
            asset_code: "XLM".to_string(),
            memo: None,
            password: "password123".to_string(),
            totp_code: None,
        };
        assert!(matches!(
            manager.send_money(params.clone()).await,
            Err(WalletError::InvalidAddress { .. })
        ));

        let params = SendMoneyParams {
            destination: format!("G{}", "A".repeat(55)),
            amount: Decimal::ZERO,
            ..params
        };
        assert!(matches!(
            manager.send_money(params).await,
            Err(WalletError::Validation { .. })
        ));
    }
}
