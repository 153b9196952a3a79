/*
[INPUT]:  Credential payloads and token-scoped request bodies
[OUTPUT]: Token grants, validation results, and auth acknowledgements
[POS]:    HTTP layer - authentication endpoints
[UPDATE]: When auth endpoints or failure mappings change
*/

use reqwest::Method;

use crate::http::{ApiClient, Result, WalletError};
use crate::types::{
    AckResponse, ChangePasswordRequest, DeleteAccountRequest, DisableTwoFactorRequest,
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, TokenRequest, TokenResponse,
    ValidateResponse, VerifyTwoFactorRequest,
};

impl ApiClient {
    /// Submit credentials
    ///
    /// POST /api/auth/login
    pub async fn login(&self, email_or_username: &str, password: &str) -> Result<LoginResponse> {
        let body = LoginRequest {
            email_or_username: email_or_username.to_string(),
            password: password.to_string(),
        };

        let builder = self.request(Method::POST, "/api/auth/login")?.json(&body);
        match self.send_json(builder).await {
            Err(WalletError::Server { status: 401, .. }) => Err(WalletError::InvalidCredentials),
            other => other,
        }
    }

    /// Register a new account
    ///
    /// POST /api/auth/register
    pub async fn register(&self, body: &RegisterRequest) -> Result<RegisterResponse> {
        let builder = self.request(Method::POST, "/api/auth/register")?.json(body);
        self.send_json(builder).await
    }

    /// Submit a one-time code for a pending login challenge
    ///
    /// POST /api/auth/2fa-verify
    pub async fn verify_two_factor(&self, user_id: &str, totp_code: &str) -> Result<TokenResponse> {
        let body = VerifyTwoFactorRequest {
            user_id: user_id.to_string(),
            totp_code: totp_code.to_string(),
        };

        let builder = self.request(Method::POST, "/api/auth/2fa-verify")?.json(&body);
        match self.send_json(builder).await {
            Err(WalletError::Server {
                status: 400 | 401 | 403,
                ..
            }) => Err(WalletError::InvalidTwoFactorCode),
            other => other,
        }
    }

    /// Ask the backend whether the current token is still valid
    ///
    /// POST /api/auth/validate
    pub async fn validate_token(&self) -> Result<ValidateResponse> {
        let body = TokenRequest {
            token: self.bearer_token()?,
        };

        let builder = self.request(Method::POST, "/api/auth/validate")?.json(&body);
        match self.send_json(builder).await {
            Err(WalletError::Server {
                status: 401 | 403, ..
            }) => Err(WalletError::SessionExpired),
            other => other,
        }
    }

    /// Exchange the current token for a fresh one
    ///
    /// POST /api/auth/refresh
    pub async fn refresh_token(&self) -> Result<TokenResponse> {
        let body = TokenRequest {
            token: self.bearer_token()?,
        };

        let builder = self.request(Method::POST, "/api/auth/refresh")?.json(&body);
        match self.send_json(builder).await {
            Err(WalletError::Server {
                status: 401 | 403, ..
            }) => Err(WalletError::SessionExpired),
            other => other,
        }
    }

    /// Invalidate the current token server-side
    ///
    /// POST /api/auth/logout
    pub async fn logout(&self) -> Result<AckResponse> {
        let body = TokenRequest {
            token: self.bearer_token()?,
        };

        let builder = self.request(Method::POST, "/api/auth/logout")?.json(&body);
        self.send_json(builder).await
    }

    /// Change the account password
    ///
    /// POST /api/auth/change-password
    pub async fn change_password(&self, body: &ChangePasswordRequest) -> Result<AckResponse> {
        let builder = self
            .request(Method::POST, "/api/auth/change-password")?
            .json(body);
        match self.send_json(builder).await {
            Err(WalletError::Server { status: 401, message }) => {
                if mentions_two_factor(&message) {
                    Err(WalletError::TwoFactorRequired)
                } else {
                    Err(WalletError::InvalidCredentials)
                }
            }
            Err(WalletError::Server { message, .. }) if mentions_two_factor(&message) => {
                Err(WalletError::TwoFactorRequired)
            }
            other => other,
        }
    }

    /// Permanently delete the account
    ///
    /// POST /api/auth/delete-account
    pub async fn delete_account(&self, body: &DeleteAccountRequest) -> Result<AckResponse> {
        let builder = self
            .request(Method::POST, "/api/auth/delete-account")?
            .json(body);
        match self.send_json(builder).await {
            Err(WalletError::Server { status: 401, message }) => {
                if mentions_two_factor(&message) {
                    Err(WalletError::TwoFactorRequired)
                } else {
                    Err(WalletError::InvalidCredentials)
                }
            }
            Err(WalletError::Server { message, .. }) if mentions_two_factor(&message) => {
                Err(WalletError::TwoFactorRequired)
            }
            other => other,
        }
    }

    /// Disable 2FA for the account
    ///
    /// POST /api/auth/disable-2fa
    pub async fn disable_two_factor(&self, user_id: &str, totp_code: &str) -> Result<AckResponse> {
        let body = DisableTwoFactorRequest {
            user_id: user_id.to_string(),
            totp_code: totp_code.to_string(),
        };

        let builder = self.request(Method::POST, "/api/auth/disable-2fa")?.json(&body);
        match self.send_json(builder).await {
            Err(WalletError::Server {
                status: 400 | 401 | 403,
                ..
            }) => Err(WalletError::InvalidTwoFactorCode),
            other => other,
        }
    }
}

/// Backend signals a missing second factor through its error text.
pub(crate) fn mentions_two_factor(message: &str) -> bool {
    let lowered = message.to_ascii_lowercase();
    lowered.contains("2fa") || lowered.contains("totp")
}
