use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::error::{AppError, Result};

type HmacSha256 = Hmac<Sha256>;

// =============================================================================
// Password Hashing
// =============================================================================

/// Hash a password with Argon2id and a random salt, returning the PHC string
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Crypto(format!("Failed to hash password: {e}")))
}

/// Check a password against a stored PHC string
///
/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let parsed = match PasswordHash::new(password_hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::error!("Stored password hash is malformed: {}", e);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

// =============================================================================
// Session Tokens
// =============================================================================

/// Compute the hex HMAC-SHA256 signature of `data`
pub fn sign(data: &str, secret: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| AppError::Crypto(format!("Failed to create HMAC instance: {e}")))?;
    mac.update(data.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verify a hex HMAC-SHA256 signature in constant time
pub fn verify_hmac(data: &str, signature: &str, secret: &str) -> bool {
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => {
            tracing::error!("Failed to create HMAC instance");
            return false;
        }
    };

    mac.update(data.as_bytes());

    let sig_bytes = match hex::decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => {
            tracing::warn!("Invalid hex signature format");
            return false;
        }
    };

    mac.verify_slice(&sig_bytes).is_ok()
}

/// Issue a session token `<user_id>.<expires_at>.<signature>`
///
/// `expires_at` is a Unix timestamp in seconds.
pub fn issue_session_token(user_id: Uuid, expires_at: i64, secret: &str) -> Result<String> {
    let payload = format!("{user_id}.{expires_at}");
    let signature = sign(&payload, secret)?;
    Ok(format!("{payload}.{signature}"))
}

/// Validate a session token and return the user it was issued to
///
/// Fails on a bad signature, a malformed token, or when `now` is past expiry.
pub fn verify_session_token(token: &str, secret: &str, now: i64) -> Option<Uuid> {
    let (payload, signature) = token.rsplit_once('.')?;

    if !verify_hmac(payload, signature, secret) {
        tracing::warn!("Session token with invalid signature");
        return None;
    }

    let (user_id, expires_at) = payload.split_once('.')?;
    let expires_at: i64 = expires_at.parse().ok()?;

    if now >= expires_at {
        tracing::debug!("Session token expired at {}", expires_at);
        return None;
    }

    Uuid::parse_str(user_id).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-session-secret";

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("123456").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("123456", &hash));
        assert!(!verify_password("654321", &hash));
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let a = hash_password("123456").unwrap();
        let b = hash_password("123456").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!verify_password("123456", "not-a-phc-string"));
        assert!(!verify_password("123456", ""));
    }

    #[test]
    fn test_hmac_round_trip() {
        let signature = sign("payload", SECRET).unwrap();
        assert!(verify_hmac("payload", &signature, SECRET));
        assert!(!verify_hmac("payload2", &signature, SECRET));
        assert!(!verify_hmac("payload", &signature, "other-secret"));
        assert!(!verify_hmac("payload", "zz-not-hex", SECRET));
    }

    #[test]
    fn test_session_token_valid_until_expiry() {
        let user_id = Uuid::new_v4();
        let token = issue_session_token(user_id, 1_000, SECRET).unwrap();

        assert_eq!(verify_session_token(&token, SECRET, 999), Some(user_id));
        assert_eq!(verify_session_token(&token, SECRET, 1_000), None);
    }

    #[test]
    fn test_session_token_rejects_tampering() {
        let user_id = Uuid::new_v4();
        let token = issue_session_token(user_id, 1_000, SECRET).unwrap();

        // Extending the expiry invalidates the signature
        let tampered = token.replacen(".1000.", ".9999.", 1);
        assert_eq!(verify_session_token(&tampered, SECRET, 0), None);

        assert_eq!(verify_session_token(&token, "wrong-secret", 0), None);
        assert_eq!(verify_session_token("garbage", SECRET, 0), None);
        assert_eq!(verify_session_token("", SECRET, 0), None);
    }
}
