/*
[INPUT]:  Hydrated wallet records and selection requests
[OUTPUT]: Consistent wallet set with a valid active selection
[POS]:    Wallet layer - in-memory collection state
[UPDATE]: When selection rules or patch semantics change
*/

use crate::types::Wallet;

/// The identity's wallet set plus which one is active.
///
/// Invariant: whenever the set is non-empty, `selected_wallet_id`
/// references a member; selection falls back to the first enumerated
/// wallet when the prior selection is gone.
#[derive(Debug, Clone, Default)]
pub struct WalletCollection {
    wallets: Vec<Wallet>,
    selected_wallet_id: Option<String>,
}

impl WalletCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wallets(&self) -> &[Wallet] {
        &self.wallets
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }

    pub fn selected_wallet_id(&self) -> Option<&str> {
        self.selected_wallet_id.as_deref()
    }

    pub fn selected(&self) -> Option<&Wallet> {
        let id = self.selected_wallet_id.as_deref()?;
        self.get(id)
    }

    pub fn get(&self, wallet_id: &str) -> Option<&Wallet> {
        self.wallets.iter().find(|w| w.wallet_id == wallet_id)
    }

    pub fn contains(&self, wallet_id: &str) -> bool {
        self.get(wallet_id).is_some()
    }

    /// Case-insensitive name lookup, used for the advisory duplicate check.
    pub fn find_by_name(&self, name: &str) -> Option<&Wallet> {
        self.wallets
            .iter()
            .find(|w| w.wallet_name.eq_ignore_ascii_case(name))
    }

    /// Rebuild the set wholesale and re-validate the selection.
    pub fn replace_all(&mut self, wallets: Vec<Wallet>) {
        self.wallets = wallets;
        let still_present = self
            .selected_wallet_id
            .as_deref()
            .is_some_and(|id| self.contains(id));
        if !still_present {
            self.selected_wallet_id = self.wallets.first().map(|w| w.wallet_id.clone());
        }
    }

    /// Patch a single entry in place, leaving siblings untouched.
    /// Returns false when the wallet is not a member.
    pub fn patch(&mut self, wallet: Wallet) -> bool {
        match self.wallets.iter_mut().find(|w| w.wallet_id == wallet.wallet_id) {
            Some(slot) => {
                *slot = wallet;
                true
            }
            None => false,
        }
    }

    /// Make a member the active wallet. Returns false when it already was.
    pub fn select(&mut self, wallet_id: &str) -> bool {
        if self.selected_wallet_id.as_deref() == Some(wallet_id) {
            return false;
        }
        self.selected_wallet_id = Some(wallet_id.to_string());
        true
    }

    pub fn clear(&mut self) {
        self.wallets.clear();
        self.selected_wallet_id = None;
    }
}
