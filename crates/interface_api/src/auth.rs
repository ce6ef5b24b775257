//! Authentication and authorization

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User's roles
    pub roles: Vec<String>,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Missing role: {0}")]
    MissingRole(String),
}

/// Creates a new JWT token
///
/// # Arguments
///
/// * `user_id` - User identifier
/// * `roles` - User's roles
/// * `secret` - JWT secret key
/// * `expiration_secs` - Token validity in seconds
pub fn create_token(
    user_id: &str,
    roles: Vec<String>,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = Claims {
        sub: user_id.to_string(),
        roles,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a JWT token
///
/// # Arguments
///
/// * `token` - The JWT token to validate
/// * `secret` - JWT secret key
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        if e.to_string().contains("ExpiredSignature") {
            AuthError::TokenExpired
        } else {
            AuthError::InvalidToken
        }
    })?;

    Ok(token_data.claims)
}

/// Checks if user has required role
pub fn has_role(claims: &Claims, required_role: &str) -> bool {
    claims
        .roles
        .iter()
        .any(|r| r == required_role || r == roles::ADMIN)
}

/// Role definitions
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const CLERK: &str = "clerk";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let token =
            create_token("clerk-1", vec![roles::ADMIN.to_string()], "secret", 60).unwrap();
        let claims = validate_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, "clerk-1");
        assert!(has_role(&claims, roles::ADMIN));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token =
            create_token("clerk-1", vec![roles::ADMIN.to_string()], "secret", 60).unwrap();
        assert!(validate_token(&token, "other-secret").is_err());
    }

    #[test]
    fn test_admin_implies_other_roles() {
        let claims = Claims {
            sub: "u".to_string(),
            roles: vec![roles::ADMIN.to_string()],
            exp: 0,
            iat: 0,
        };
        assert!(has_role(&claims, roles::CLERK));
    }
}
