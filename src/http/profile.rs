/*
[INPUT]:  Bearer-authenticated profile requests
[OUTPUT]: Identity records and 2FA enrollment data
[POS]:    HTTP layer - profile endpoints (require auth)
[UPDATE]: When adding profile endpoints or changing response shapes
*/

use reqwest::Method;

use crate::http::{ApiClient, Result, WalletError};
use crate::types::{
    EnableTwoFactorRequest, EnableTwoFactorResponse, PhoneVerificationResponse, TwoFactorSetup,
    TwoFactorStatus, UpdatePhoneRequest, UpdateProfileRequest, UserProfile, VerifyPhoneRequest,
};

impl ApiClient {
    /// Fetch the authenticated identity record
    ///
    /// GET /api/profile
    pub async fn get_profile(&self) -> Result<UserProfile> {
        let builder = self.request(Method::GET, "/api/profile")?;
        match self.send_json(builder).await {
            Err(WalletError::Server {
                status: 401 | 403, ..
            }) => Err(WalletError::NotAuthenticated),
            other => other,
        }
    }

    /// Update profile fields; backend returns the fresh record
    ///
    /// PUT /api/profile
    pub async fn update_profile(&self, body: &UpdateProfileRequest) -> Result<UserProfile> {
        let builder = self.request(Method::PUT, "/api/profile")?.json(body);
        self.send_json(builder).await
    }

    /// Replace the phone number on file
    ///
    /// PUT /api/profile/phone
    pub async fn update_phone(&self, phone_number: &str) -> Result<UserProfile> {
        let body = UpdatePhoneRequest {
            phone_number: phone_number.to_string(),
        };
        let builder = self.request(Method::PUT, "/api/profile/phone")?.json(&body);
        self.send_json(builder).await
    }

    /// Trigger an SMS verification code
    ///
    /// POST /api/profile/phone/send-verification
    pub async fn send_phone_verification(
        &self,
        phone_number: &str,
    ) -> Result<PhoneVerificationResponse> {
        let body = UpdatePhoneRequest {
            phone_number: phone_number.to_string(),
        };
        let builder = self
            .request(Method::POST, "/api/profile/phone/send-verification")?
            .json(&body);
        self.send_json(builder).await
    }

    /// Confirm the SMS verification code
    ///
    /// POST /api/profile/phone/verify
    pub async fn verify_phone(&self, code: &str) -> Result<PhoneVerificationResponse> {
        let body = VerifyPhoneRequest {
            code: code.to_string(),
        };
        let builder = self
            .request(Method::POST, "/api/profile/phone/verify")?
            .json(&body);
        self.send_json(builder).await
    }

    /// Query 2FA enrollment state
    ///
    /// GET /api/profile/2fa/status
    pub async fn two_factor_status(&self) -> Result<TwoFactorStatus> {
        let builder = self.request(Method::GET, "/api/profile/2fa/status")?;
        self.send_json(builder).await
    }

    /// Begin 2FA enrollment; returns the shared secret and backup codes
    ///
    /// GET /api/profile/2fa/setup
    pub async fn setup_two_factor(&self) -> Result<TwoFactorSetup> {
        let builder = self.request(Method::GET, "/api/profile/2fa/setup")?;
        self.send_json(builder).await
    }

    /// Complete 2FA enrollment with a first valid code
    ///
    /// POST /api/profile/2fa/enable
    pub async fn enable_two_factor(&self, totp_code: &str) -> Result<EnableTwoFactorResponse> {
        let body = EnableTwoFactorRequest {
            totp_code: totp_code.to_string(),
        };
        let builder = self.request(Method::POST, "/api/profile/2fa/enable")?.json(&body);
        match self.send_json(builder).await {
            Err(WalletError::Server {
                status: 400 | 401 | 403,
                ..
            }) => Err(WalletError::InvalidTwoFactorCode),
            other => other,
        }
    }
}
