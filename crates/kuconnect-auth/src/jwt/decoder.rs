//! Bearer token verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use kuconnect_core::config::AuthConfig;
use kuconnect_core::error::AppError;

use super::claims::Claims;

/// Verifies HS256 tokens signed with the shared secret.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a bearer token.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                debug!(error = %e, "Bearer token rejected");
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthorized("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::unauthorized("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthorized("Invalid token signature")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidIssuer
                    | jsonwebtoken::errors::ErrorKind::InvalidAudience => {
                        AppError::unauthorized("Token was issued for another service")
                    }
                    _ => AppError::unauthorized(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuconnect_core::error::ErrorKind;
    use kuconnect_core::types::UserId;

    use crate::jwt::JwtEncoder;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_round_trip_preserves_subject() {
        let cfg = config("test-secret");
        let user = UserId::new();
        let token = JwtEncoder::new(&cfg)
            .issue(user, Some("a@ku.th".into()), 3600)
            .expect("encode");
        let claims = JwtDecoder::new(&cfg).decode(&token).expect("decode");
        assert_eq!(claims.user_id(), user);
        assert_eq!(claims.email.as_deref(), Some("a@ku.th"));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = JwtEncoder::new(&config("one"))
            .issue(UserId::new(), None, 3600)
            .expect("encode");
        let err = JwtDecoder::new(&config("two"))
            .decode(&token)
            .expect_err("bad signature");
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_expired_token_rejected() {
        let cfg = config("test-secret");
        let token = JwtEncoder::new(&cfg)
            .issue(UserId::new(), None, -3600)
            .expect("encode");
        let err = JwtDecoder::new(&cfg).decode(&token).expect_err("expired");
        assert_eq!(err.message, "Token has expired");
    }

    #[test]
    fn test_garbage_rejected() {
        let err = JwtDecoder::new(&config("s"))
            .decode("not-a-token")
            .expect_err("garbage");
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_issuer_enforced_when_configured() {
        let mut cfg = config("s");
        cfg.issuer = Some("kuconnect-auth".into());
        let mut other = cfg.clone();
        other.issuer = Some("someone-else".into());

        let token = JwtEncoder::new(&other)
            .issue(UserId::new(), None, 3600)
            .expect("encode");
        assert!(JwtDecoder::new(&cfg).decode(&token).is_err());
    }
}
