//! services/api/src/adapters/token.rs
//!
//! Signed bearer tokens behind the `TokenService` port, using HS256 JWTs.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use research_chat_core::ports::{PortError, PortResult, TokenService};

/// How long an issued token stays valid.
const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// The user the token is bound to.
    sub: Uuid,
    /// Expiry as a unix timestamp.
    exp: i64,
}

/// Issues and validates HS256-signed tokens with a server-held secret.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtTokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    fn sign(&self, user_id: Uuid, expires_at: i64) -> PortResult<String> {
        let claims = Claims {
            sub: user_id,
            exp: expires_at,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| PortError::Unexpected(format!("Failed to sign token: {}", e)))
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: Uuid) -> PortResult<String> {
        let expires_at = (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp();
        self.sign(user_id, expires_at)
    }

    /// Any failure mode - malformed, bad signature, expired - collapses to
    /// `Unauthenticated` so the response gives an attacker nothing.
    fn verify(&self, token: &str) -> PortResult<Uuid> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims.sub)
            .map_err(|_| PortError::Unauthenticated)
    }
}
