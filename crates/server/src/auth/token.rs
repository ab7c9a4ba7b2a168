//! Signed session tokens.
//!
//! A compact HS256 claim set binding an account identifier and display
//! name, valid for 24 hours from issuance. Expiry is the only
//! invalidation mechanism; there is no revocation list.

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Seconds a token stays valid after issuance.
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account identifier
    pub sub: String,
    /// Display name at issuance
    pub display_name: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Issues and verifies session tokens.
///
/// The signing secret is injected at construction and never read from
/// process-global state afterwards.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Sign a claim set for the given account.
    pub fn issue(&self, account_id: &str, display_name: &str) -> Result<String> {
        let iat = Utc::now().timestamp();
        let claims = Claims {
            sub: account_id.to_string(),
            display_name: display_name.to_string(),
            iat,
            exp: iat + TOKEN_TTL_SECS,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| Error::Internal(e.to_string()))
    }

    /// Verify a token's signature and expiry, returning its claims.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => Error::TokenExpired,
                _ => Error::TokenInvalid,
            })
    }
}
