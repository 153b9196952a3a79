/*
[INPUT]:  Credentials, one-time codes, and the persisted token
[OUTPUT]: Authenticated session state and token lifecycle
[POS]:    Auth layer - orchestrates the complete authentication flow
[UPDATE]: When auth endpoints or flow steps change
*/

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::http::{ApiClient, Result, WalletError};
use crate::types::{ChangePasswordRequest, DeleteAccountRequest, EnableTwoFactorResponse,
    RegisterRequest, RegisterResponse, TwoFactorSetup, TwoFactorStatus, UpdateProfileRequest,
    UserProfile};
use crate::validate;

use super::{TokenStorage, TokenStore};

/// Fallback TTL when the backend omits `expires_in` (restore, legacy responses).
const DEFAULT_TOKEN_TTL_SECONDS: u64 = 24 * 60 * 60;

/// In-memory view of the authenticated identity.
///
/// Non-empty exactly while a token is held; read-only outside this module.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub username: String,
    pub phone_number: Option<String>,
    pub is_verified: bool,
    pub is_phone_verified: bool,
}

impl From<UserProfile> for Session {
    fn from(profile: UserProfile) -> Self {
        Self {
            user_id: profile.user_id,
            email: profile.email,
            username: profile.username,
            phone_number: profile.phone_number,
            is_verified: profile.is_verified,
            is_phone_verified: profile.is_phone_verified,
        }
    }
}

/// Transient second-factor requirement between login and verification.
/// At most one is outstanding per manager.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTwoFactorChallenge {
    pub user_id: String,
    pub issued_at: DateTime<Utc>,
}

/// Observable authentication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    TwoFactorPending,
    Authenticated,
}

/// Result of a credential submission.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Authenticated,
    TwoFactorRequired { user_id: String },
}

/// Owns the authentication lifecycle and the credential attached to
/// every outbound API call.
pub struct SessionManager {
    client: ApiClient,
    tokens: TokenStore,
    storage: Arc<dyn TokenStorage>,
    session: Option<Session>,
    pending: Option<PendingTwoFactorChallenge>,
}

impl SessionManager {
    /// Create a manager around an injected client and storage collaborator.
    /// The token store is shared with the client.
    pub fn new(client: ApiClient, storage: Arc<dyn TokenStorage>) -> Self {
        let tokens = client.token_store().clone();
        Self {
            client,
            tokens,
            storage,
            session: None,
            pending: None,
        }
    }

    /// Current identity, if authenticated
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Outstanding second-factor challenge, if any
    pub fn pending_challenge(&self) -> Option<&PendingTwoFactorChallenge> {
        self.pending.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn state(&self) -> SessionState {
        if self.session.is_some() {
            SessionState::Authenticated
        } else if self.pending.is_some() {
            SessionState::TwoFactorPending
        } else {
            SessionState::Unauthenticated
        }
    }

    /// Attempt to resume a previous session from the persisted token.
    ///
    /// Returns `Ok(true)` when a session was restored. An explicit
    /// invalid-token verdict clears the persisted token; a transient
    /// failure preserves it and surfaces the error, so a flaky
    /// connection never forces a re-login.
    pub async fn restore_session(&mut self) -> Result<bool> {
        let persisted = match self.storage.load().await {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "token storage read failed during restore");
                None
            }
        };
        let Some(token) = persisted else {
            return Ok(false);
        };

        self.tokens.set_token(token, DEFAULT_TOKEN_TTL_SECONDS);

        let validation = match self.client.validate_token().await {
            Ok(validation) => validation,
            Err(err) if err.is_auth_error() => {
                self.clear_local_state().await;
                return Ok(false);
            }
            Err(err) => {
                // Transient failure: keep the persisted token, stay unauthenticated
                self.tokens.clear();
                return Err(err);
            }
        };

        if !validation.valid {
            self.clear_local_state().await;
            return Ok(false);
        }

        match self.client.get_profile().await {
            Ok(profile) => {
                self.session = Some(profile.into());
                self.pending = None;
                Ok(true)
            }
            Err(err) if err.is_auth_error() => {
                self.clear_local_state().await;
                Ok(false)
            }
            Err(err) => {
                self.tokens.clear();
                Err(err)
            }
        }
    }

    /// Submit credentials.
    ///
    /// Either populates the session and persists the token, or leaves
    /// the session untouched and records a pending two-factor challenge.
    pub async fn login(&mut self, email_or_username: &str, password: &str) -> Result<LoginOutcome> {
        let response = self.client.login(email_or_username, password).await?;

        if response.two_fa_required {
            let user_id = response.user_id.ok_or_else(|| {
                WalletError::Schema("login response flagged 2FA without a user_id".to_string())
            })?;
            self.pending = Some(PendingTwoFactorChallenge {
                user_id: user_id.clone(),
                issued_at: Utc::now(),
            });
            return Ok(LoginOutcome::TwoFactorRequired { user_id });
        }

        let token = response.token.ok_or_else(|| {
            WalletError::Schema("login response carried neither token nor 2FA flag".to_string())
        })?;
        let expires_in = response.expires_in.unwrap_or(DEFAULT_TOKEN_TTL_SECONDS);

        self.install_token(token, expires_in).await;
        let profile = self.client.get_profile().await?;
        self.session = Some(profile.into());
        self.pending = None;
        Ok(LoginOutcome::Authenticated)
    }

    /// Complete a pending two-factor challenge.
    ///
    /// The code must be exactly six digits; anything else fails before
    /// any request is issued.
    pub async fn verify_two_factor(&mut self, code: &str) -> Result<()> {
        let Some(pending) = self.pending.clone() else {
            return Err(WalletError::validation(
                "no two-factor challenge is pending",
            ));
        };
        validate::totp_code(code)?;

        let grant = self.client.verify_two_factor(&pending.user_id, code).await?;
        self.install_token(grant.token, grant.expires_in).await;

        let profile = self.client.get_profile().await?;
        self.session = Some(profile.into());
        self.pending = None;
        Ok(())
    }

    /// Abandon a pending two-factor challenge (user navigated back).
    pub fn cancel_two_factor(&mut self) {
        self.pending = None;
    }

    /// Register a new account. Registration does not imply login:
    /// the session is never populated here.
    pub async fn signup(
        &mut self,
        email: &str,
        password: &str,
        username: &str,
        phone_number: Option<&str>,
    ) -> Result<RegisterResponse> {
        validate::email(email)?;
        validate::username(username)?;
        validate::password(password)?;

        let body = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            username: username.to_string(),
            phone_number: phone_number.map(str::to_string),
        };
        self.client.register(&body).await
    }

    /// Exchange the current token for a fresh one. `SessionExpired`
    /// propagates so the caller can force a full logout.
    pub async fn refresh_token(&mut self) -> Result<()> {
        self.require_session()?;
        let grant = self.client.refresh_token().await?;
        self.install_token(grant.token, grant.expires_in).await;
        Ok(())
    }

    /// Log out: best-effort server-side invalidation, then an
    /// unconditional local clear.
    pub async fn logout(&mut self) {
        if self.tokens.token().is_some() {
            if let Err(err) = self.client.logout().await {
                warn!(error = %err, "server-side token invalidation failed");
            }
        }
        self.clear_local_state().await;
    }

    /// Change the account password. A `TwoFactorRequired` failure means
    /// re-invoke with `totp_code` populated.
    pub async fn change_password(
        &mut self,
        current_password: &str,
        new_password: &str,
        totp_code: Option<&str>,
    ) -> Result<()> {
        let session = self.require_session()?;
        validate::password(new_password)?;
        if let Some(code) = totp_code {
            validate::totp_code(code)?;
        }

        let body = ChangePasswordRequest {
            user_id: session.user_id.clone(),
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
            totp_code: totp_code.map(str::to_string),
        };
        self.client.change_password(&body).await?;
        Ok(())
    }

    /// Permanently delete the account, then drop all local session
    /// state. A `TwoFactorRequired` failure means re-invoke with
    /// `totp_code` populated; local state survives any failure so the
    /// user can retry.
    pub async fn delete_account(
        &mut self,
        password: &str,
        totp_code: Option<&str>,
    ) -> Result<()> {
        let session = self.require_session()?;
        if let Some(code) = totp_code {
            validate::totp_code(code)?;
        }

        let body = DeleteAccountRequest {
            user_id: session.user_id.clone(),
            password: password.to_string(),
            totp_code: totp_code.map(str::to_string),
        };
        self.client.delete_account(&body).await?;
        self.clear_local_state().await;
        Ok(())
    }

    /// Update profile fields and refresh the in-memory identity.
    pub async fn update_profile(
        &mut self,
        email: Option<&str>,
        username: Option<&str>,
        phone_number: Option<&str>,
    ) -> Result<()> {
        self.require_session()?;
        if let Some(email) = email {
            validate::email(email)?;
        }
        if let Some(username) = username {
            validate::username(username)?;
        }

        let body = UpdateProfileRequest {
            email: email.map(str::to_string),
            username: username.map(str::to_string),
            phone_number: phone_number.map(str::to_string),
        };
        let profile = self.client.update_profile(&body).await?;
        self.session = Some(profile.into());
        Ok(())
    }

    /// Replace the phone number on file.
    pub async fn update_phone(&mut self, phone_number: &str) -> Result<()> {
        self.require_session()?;
        let profile = self.client.update_phone(phone_number).await?;
        self.session = Some(profile.into());
        Ok(())
    }

    /// Trigger an SMS verification code for a phone number.
    pub async fn send_phone_verification(&mut self, phone_number: &str) -> Result<()> {
        self.require_session()?;
        self.client.send_phone_verification(phone_number).await?;
        Ok(())
    }

    /// Confirm the SMS code; refreshes the identity so the verified
    /// flag reflects the backend.
    pub async fn verify_phone(&mut self, code: &str) -> Result<()> {
        self.require_session()?;
        let response = self.client.verify_phone(code).await?;
        if !response.success {
            return Err(WalletError::validation(response.message));
        }
        let profile = self.client.get_profile().await?;
        self.session = Some(profile.into());
        Ok(())
    }

    /// Query 2FA enrollment state.
    pub async fn two_factor_status(&self) -> Result<TwoFactorStatus> {
        self.require_session()?;
        self.client.two_factor_status().await
    }

    /// Begin 2FA enrollment.
    pub async fn setup_two_factor(&self) -> Result<TwoFactorSetup> {
        self.require_session()?;
        self.client.setup_two_factor().await
    }

    /// Complete 2FA enrollment with a first valid code.
    pub async fn enable_two_factor(&mut self, code: &str) -> Result<EnableTwoFactorResponse> {
        self.require_session()?;
        validate::totp_code(code)?;
        self.client.enable_two_factor(code).await
    }

    /// Disable 2FA for the account.
    pub async fn disable_two_factor(&mut self, code: &str) -> Result<()> {
        let session = self.require_session()?;
        validate::totp_code(code)?;
        let user_id = session.user_id.clone();
        self.client.disable_two_factor(&user_id, code).await?;
        Ok(())
    }

    fn require_session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(WalletError::NotAuthenticated)
    }

    /// Store the token in-memory and persist it. Persistence is
    /// best-effort: losing it only costs a re-login after restart.
    async fn install_token(&mut self, token: String, expires_in: u64) {
        if let Err(err) = self.storage.store(&token).await {
            warn!(error = %err, "failed to persist token");
        }
        self.tokens.set_token(token, expires_in);
    }

    async fn clear_local_state(&mut self) {
        if let Err(err) = self.storage.clear().await {
            warn!(error = %err, "failed to clear persisted token");
        }
        self.tokens.clear();
        self.session = None;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStorage;

    fn manager() -> SessionManager {
        let tokens = TokenStore::new();
        let client = ApiClient::new(tokens).unwrap();
        SessionManager::new(client, Arc::new(MemoryTokenStorage::new()))
    }

    #[test]
    fn test_initial_state_unauthenticated() {
        let manager = manager();
        assert_eq!(manager.state(), SessionState::Unauthenticated);
        assert!(manager.session().is_none());
        assert!(manager.pending_challenge().is_none());
    }

    #[tokio::test]
    async fn test_verify_without_pending_challenge_is_local_error() {
        let mut manager = manager();
        let err = manager.verify_two_factor("123456").await.unwrap_err();
        assert!(matches!(err, WalletError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_verify_rejects_malformed_code_before_network() {
        let mut manager = manager();
        manager.pending = Some(PendingTwoFactorChallenge {
            user_id: "u1".to_string(),
            issued_at: Utc::now(),
        });

        for code in ["12345", "1234567", "12345a", ""] {
            let err = manager.verify_two_factor(code).await.unwrap_err();
            assert!(matches!(err, WalletError::Validation { .. }), "code {code:?}");
        }
        // challenge survives local rejection
        assert_eq!(manager.state(), SessionState::TwoFactorPending);
    }

    #[tokio::test]
    async fn test_signup_validates_locally() {
        let mut manager = manager();

        let err = manager
            .signup("not-an-email", "longenough", "user1", None)
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::Validation { .. }));

        let err = manager
            .signup("a@b.com", "short", "user1", None)
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::Validation { .. }));

        let err = manager
            .signup("a@b.com", "longenough", "u!", None)
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_cancel_two_factor_returns_to_unauthenticated() {
        let mut manager = manager();
        manager.pending = Some(PendingTwoFactorChallenge {
            user_id: "u1".to_string(),
            issued_at: Utc::now(),
        });
        assert_eq!(manager.state(), SessionState::TwoFactorPending);

        manager.cancel_two_factor();
        assert_eq!(manager.state(), SessionState::Unauthenticated);
    }
}
