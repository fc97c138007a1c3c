//! Core JWT handler implementation

use super::types::{Claims, Clock, JwtHandler, SystemClock};
use crate::config::AuthConfig;
use crate::core::models::user::User;
use crate::utils::error::{AppError, Result};
use jsonwebtoken::{encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

impl JwtHandler {
    /// Create a new JWT handler using the wall clock
    pub fn new(config: &AuthConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a new JWT handler with an explicit time source
    pub fn with_clock(config: &AuthConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        if config.jwt_secret.len() < AuthConfig::MIN_SECRET_LEN {
            return Err(AppError::config(format!(
                "JWT secret must be at least {} characters long",
                AuthConfig::MIN_SECRET_LEN
            )));
        }

        let secret = config.jwt_secret.as_bytes();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            expiration_ms: config.jwt_expiration_ms,
            clock,
        })
    }

    /// Issue a signed token for an authenticated user
    pub fn issue(&self, user: &User) -> Result<String> {
        let now = self.clock.now_ms();

        let claims = Claims {
            sub: user.email.clone(),
            role: user.role.to_string(),
            uuid: Some(user.uuid),
            iat: now,
            exp: now + self.expiration_ms,
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Token encoding failed: {}", e)))?;

        debug!("Issued token for user: {}", user.uuid);
        Ok(token)
    }

    /// Re-parse a token and return its claims.
    ///
    /// Fails only on signature or structure problems; a well-formed expired
    /// token still decodes so its claims stay available for diagnostics.
    pub fn decode(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::TokenInvalid(e.to_string()))?;

        Ok(token_data.claims)
    }

    /// Decode a token and additionally require it to be unexpired
    pub fn authenticate(&self, token: &str) -> Result<Claims> {
        let claims = self.decode(token)?;

        if self.clock.now_ms() >= claims.exp {
            return Err(AppError::TokenExpired);
        }

        Ok(claims)
    }

    /// Predicate form: true only for a well-signed, unexpired token
    pub fn validate(&self, token: &str) -> bool {
        self.authenticate(token).is_ok()
    }

    /// Extract the external identifier claim.
    ///
    /// `issue` always sets it, so its absence is an invariant violation
    /// rather than a routine failure.
    pub fn extract_uuid(&self, token: &str) -> Result<Uuid> {
        self.decode(token)?
            .uuid
            .ok_or(AppError::MissingClaim("uuid"))
    }

    /// Strip the scheme from an `Authorization` header value
    pub fn extract_token_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }

    /// Configured token lifetime in milliseconds
    pub fn expiration_ms(&self) -> u64 {
        self.expiration_ms
    }
}
