use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::SecurityConfig;

/// Payload embedded in an identity token.
pub type Claims = Map<String, Value>;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("{0}")]
    Malformed(String),

    #[error("The specified alg value is not allowed: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Signature has expired")]
    Expired,

    #[error("JWT generation error: {0}")]
    Signing(String),

    #[error("JWT secret not configured")]
    MissingSecret,
}

impl TokenError {
    /// Failures caused by the presented token rather than by the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TokenError::Malformed(_) | TokenError::UnsupportedAlgorithm(_) | TokenError::Expired
        )
    }
}

/// Issues and verifies identity tokens with one fixed HMAC algorithm and secret.
pub struct TokenService {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: Option<u64>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.algorithm)
            .field("expiry_hours", &self.expiry_hours)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(
        secret: &str,
        algorithm: Algorithm,
        expiry_hours: Option<u64>,
    ) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        })
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, TokenError> {
        Self::new(
            &security.jwt_secret,
            security.jwt_algorithm,
            security.jwt_expiry_hours,
        )
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Sign `claims` as-is. `exp`/`iat` are only added when an expiry is
    /// configured and the caller did not supply its own `exp`.
    pub fn issue(&self, claims: &Claims) -> Result<String, TokenError> {
        let mut payload = claims.clone();

        if let Some(hours) = self.expiry_hours {
            if !payload.contains_key("exp") {
                let now = Utc::now();
                let exp = i64::try_from(hours)
                    .ok()
                    .and_then(Duration::try_hours)
                    .and_then(|lifetime| now.checked_add_signed(lifetime))
                    .ok_or_else(|| {
                        TokenError::Signing(format!("token lifetime of {} hours is out of range", hours))
                    })?;
                payload.insert("iat".into(), Value::from(now.timestamp()));
                payload.insert("exp".into(), Value::from(exp.timestamp()));
            }
        }

        encode(&Header::new(self.algorithm), &payload, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation())
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    TokenError::UnsupportedAlgorithm(format!("{:?}", self.algorithm))
                }
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            })?;

        Ok(token_data.claims)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        // Claims are caller-defined; only `exp` is checked, and only when present.
        validation.required_spec_claims.clear();
        validation.validate_aud = false;
        validation.leeway = 0;
        validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service() -> TokenService {
        TokenService::new("test-secret", Algorithm::HS256, None).unwrap()
    }

    fn claims(value: Value) -> Claims {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn issue_then_verify_returns_same_claims() {
        let tokens = service();
        let payload = claims(json!({
            "user_id": 7,
            "is_the_admin": false,
            "nested": {"roles": ["editor"]},
        }));

        let token = tokens.issue(&payload).unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), payload);
    }

    #[test]
    fn issue_is_deterministic_without_expiry() {
        let tokens = service();
        let payload = claims(json!({"user_id": 1}));
        assert_eq!(tokens.issue(&payload).unwrap(), tokens.issue(&payload).unwrap());
    }

    #[test]
    fn rejects_other_algorithm() {
        let tokens = service();
        let forged = encode(
            &Header::new(Algorithm::HS512),
            &claims(json!({"user_id": 1})),
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let err = tokens.verify(&forged).unwrap_err();
        assert!(matches!(err, TokenError::UnsupportedAlgorithm(_)));
        assert!(err.is_client_error());
    }

    #[test]
    fn rejects_unsigned_token() {
        // {"alg":"none","typ":"JWT"}.{"user_id":1}.
        let unsigned = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.eyJ1c2VyX2lkIjoxfQ.";
        let err = service().verify(unsigned).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn rejects_other_secret() {
        let other = TokenService::new("other-secret", Algorithm::HS256, None).unwrap();
        let token = other.issue(&claims(json!({"user_id": 1}))).unwrap();

        assert!(matches!(service().verify(&token), Err(TokenError::Malformed(_))));
    }

    #[test]
    fn rejects_garbage() {
        for token in ["", "abc", "a.b.c", "Bearer"] {
            assert!(matches!(service().verify(token), Err(TokenError::Malformed(_))), "{token}");
        }
    }

    #[test]
    fn configured_expiry_adds_exp_claim() {
        let tokens = TokenService::new("test-secret", Algorithm::HS256, Some(2)).unwrap();
        let token = tokens.issue(&claims(json!({"user_id": 1}))).unwrap();
        let decoded = tokens.verify(&token).unwrap();

        let exp = decoded["exp"].as_i64().unwrap();
        let iat = decoded["iat"].as_i64().unwrap();
        assert_eq!(exp - iat, 2 * 3600);
    }

    #[test]
    fn oversized_expiry_fails_to_sign() {
        let tokens =
            TokenService::new("test-secret", Algorithm::HS256, Some(3_000_000_000_000_000)).unwrap();
        let err = tokens.issue(&claims(json!({"user_id": 1}))).unwrap_err();
        assert!(matches!(err, TokenError::Signing(_)));
        assert!(!err.is_client_error());

        let tokens = TokenService::new("test-secret", Algorithm::HS256, Some(u64::MAX)).unwrap();
        assert!(matches!(
            tokens.issue(&claims(json!({"user_id": 1}))),
            Err(TokenError::Signing(_))
        ));
    }

    #[test]
    fn expired_token_is_client_error() {
        let tokens = service();
        let token = tokens
            .issue(&claims(json!({"user_id": 1, "exp": Utc::now().timestamp() - 10})))
            .unwrap();

        let err = tokens.verify(&token).unwrap_err();
        assert!(matches!(err, TokenError::Expired));
        assert!(err.is_client_error());
    }

    #[test]
    fn empty_secret_is_refused() {
        let err = TokenService::new("", Algorithm::HS256, None).unwrap_err();
        assert!(matches!(err, TokenError::MissingSecret));
        assert!(!err.is_client_error());
    }
}
