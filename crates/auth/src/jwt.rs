//! JWT validation and token extraction helpers

use axum::http::HeaderValue;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::claims::AccessClaims;
use crate::config::AuthConfig;
use crate::error::AuthError;

/// Validate an HS256 access token against the configured secret
pub(crate) fn validate_jwt_token(
    token: &str,
    config: &AuthConfig,
) -> Result<AccessClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);

    if let Some(aud) = &config.audience {
        validation.set_audience(&[aud]);
    } else {
        validation.validate_aud = false;
    }

    if let Some(iss) = &config.issuer {
        validation.set_issuer(&[iss]);
    }

    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_ref());

    let token_data = decode::<AccessClaims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "JWT validation failed");
        AuthError::InvalidToken
    })?;

    Ok(token_data.claims)
}

/// Extract bearer token from Authorization header
pub(crate) fn extract_bearer_token(header: &HeaderValue) -> Result<String, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    if let Some(token) = header_str.strip_prefix("Bearer ") {
        Ok(token.to_string())
    } else {
        Err(AuthError::InvalidAuthorizationFormat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use jsonwebtoken::{encode, EncodingKey, Header};

    #[test]
    fn test_extract_bearer_token() {
        // Valid bearer token
        let header = HeaderValue::from_static("Bearer abc123");
        let result = extract_bearer_token(&header);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "abc123");

        // Invalid format
        let header = HeaderValue::from_static("abc123");
        let result = extract_bearer_token(&header);
        assert!(result.is_err());

        // Basic auth (wrong type)
        let header = HeaderValue::from_static("Basic abc123");
        let result = extract_bearer_token(&header);
        assert!(result.is_err());
    }

    #[test]
    fn test_jwt_rejects_garbage_token() {
        let config = AuthConfig {
            jwt_secret: "test_secret".to_string(),
            issuer: Some("https://example.com".to_string()),
            audience: Some("taskhub".to_string()),
        };

        let result = validate_jwt_token("invalid_token", &config);
        assert!(result.is_err());
    }

    #[test]
    fn test_jwt_roundtrip_no_issuer_no_audience() {
        let config = AuthConfig {
            jwt_secret: "test-secret-key".to_string(),
            issuer: None,
            audience: None,
        };

        let user_id = uuid::Uuid::new_v4().to_string();
        let now = chrono::Utc::now().timestamp() as u64;
        let claims = AccessClaims {
            sub: user_id.clone(),
            email: Some("test@test.com".to_string()),
            iat: now,
            exp: now + 3600,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_ref()),
        )
        .unwrap();

        let decoded = validate_jwt_token(&token, &config).unwrap();
        assert_eq!(decoded.sub, user_id);
        assert_eq!(decoded.email.as_deref(), Some("test@test.com"));
    }

    #[test]
    fn test_jwt_rejects_wrong_secret() {
        let now = chrono::Utc::now().timestamp() as u64;
        let claims = AccessClaims {
            sub: uuid::Uuid::new_v4().to_string(),
            email: None,
            iat: now,
            exp: now + 3600,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret-a"),
        )
        .unwrap();

        let config = AuthConfig {
            jwt_secret: "secret-b".to_string(),
            issuer: None,
            audience: None,
        };
        assert!(validate_jwt_token(&token, &config).is_err());
    }

    #[test]
    fn test_jwt_rejects_expired_token() {
        let config = AuthConfig {
            jwt_secret: "test-secret-key".to_string(),
            issuer: None,
            audience: None,
        };

        let now = chrono::Utc::now().timestamp() as u64;
        let claims = AccessClaims {
            sub: uuid::Uuid::new_v4().to_string(),
            email: None,
            iat: now - 7200,
            exp: now - 3600,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_ref()),
        )
        .unwrap();

        assert!(validate_jwt_token(&token, &config).is_err());
    }
}
