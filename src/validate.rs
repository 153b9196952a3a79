/*
[INPUT]:  Raw user-supplied form values
[OUTPUT]: Pass/fail precondition checks with typed errors
[POS]:    Validation layer - synchronous checks issued before any request
[UPDATE]: When local precondition rules change
*/

use crate::http::{Result, WalletError};

/// Stellar public keys are 56 characters starting with 'G'.
const STELLAR_KEY_LEN: usize = 56;

/// RFC-lite email check: one '@', non-empty local part, dotted domain.
pub fn email(value: &str) -> Result<()> {
    let mut parts = value.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return Err(WalletError::validation("email must contain exactly one '@'")),
    };

    if local.is_empty() || domain.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(WalletError::validation("email is malformed"));
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(WalletError::validation("email domain is malformed"));
    }
    Ok(())
}

/// Usernames: at least 3 characters, alphanumeric and underscore only.
pub fn username(value: &str) -> Result<()> {
    if value.len() < 3 {
        return Err(WalletError::validation(
            "username must be at least 3 characters",
        ));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(WalletError::validation(
            "username may only contain letters, digits and underscores",
        ));
    }
    Ok(())
}

/// Passwords: at least 8 characters.
pub fn password(value: &str) -> Result<()> {
    if value.len() < 8 {
        return Err(WalletError::validation(
            "password must be at least 8 characters",
        ));
    }
    Ok(())
}

/// One-time codes: exactly 6 ASCII digits.
pub fn totp_code(value: &str) -> Result<()> {
    if value.len() != 6 || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(WalletError::validation(
            "two-factor code must be exactly 6 digits",
        ));
    }
    Ok(())
}

/// Wallet names: non-empty after trimming.
pub fn wallet_name(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(WalletError::validation("wallet name must not be empty"));
    }
    Ok(())
}

/// Stellar public key: 'G' prefix, 56 alphanumeric characters total.
pub fn stellar_address(value: &str) -> Result<()> {
    let well_formed = value.len() == STELLAR_KEY_LEN
        && value.starts_with('G')
        && value.chars().all(|c| c.is_ascii_alphanumeric());

    if well_formed {
        Ok(())
    } else {
        Err(WalletError::InvalidAddress {
            address: value.to_string(),
        })
    }
}

/// Stellar secret seed: 'S' prefix, 56 alphanumeric characters total.
pub fn stellar_secret(value: &str) -> Result<()> {
    let well_formed = value.len() == STELLAR_KEY_LEN
        && value.starts_with('S')
        && value.chars().all(|c| c.is_ascii_alphanumeric());

    if well_formed {
        Ok(())
    } else {
        Err(WalletError::validation(
            "secret key must be 56 characters starting with 'S'",
        ))
    }
}
