//! Access/refresh token pairs for authenticated users.
//!
//! Both tokens are HS256 JWTs signed with the configured secret. The access
//! token is short-lived and the refresh token long-lived; `token_type` keeps one
//! from being accepted in place of the other.

use crate::{
    config::JwtConfig,
    entities::user,
    errors::{Error, Result},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Which half of a [`TokenPair`] a token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived token presented on each request
    Access,
    /// Long-lived token exchanged for a new access token
    Refresh,
}

/// JWT claims carried by both token types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Access or refresh
    pub token_type: TokenType,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
    /// Unique token id
    pub jti: String,
}

impl Claims {
    /// Parses the subject back into a user id.
    pub fn user_id(&self) -> Result<i64> {
        self.sub.parse().map_err(|_| Error::Token {
            message: format!("Invalid user id in claims: {}", self.sub),
        })
    }
}

/// A freshly issued token pair
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    /// Long-lived refresh token
    pub refresh: String,
    /// Short-lived access token
    pub access: String,
}

fn sign(jwt: &JwtConfig, user_id: i64, token_type: TokenType, lifetime: Duration) -> Result<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        token_type,
        iat: now.timestamp(),
        exp: (now + lifetime).timestamp(),
        jti: uuid::Uuid::new_v4().to_string(),
    };

    let mut header = Header::new(Algorithm::HS256);
    header.typ = Some("JWT".to_string());

    encode(
        &header,
        &claims,
        &EncodingKey::from_secret(jwt.secret.expose_secret().as_bytes()),
    )
    .map_err(Into::into)
}

/// Issues a new access/refresh pair for `user`.
pub fn issue_token_pair(jwt: &JwtConfig, user: &user::Model) -> Result<TokenPair> {
    let refresh = sign(
        jwt,
        user.id,
        TokenType::Refresh,
        Duration::days(jwt.refresh_token_days),
    )?;
    let access = sign(
        jwt,
        user.id,
        TokenType::Access,
        Duration::minutes(jwt.access_token_minutes),
    )?;
    debug!(user_id = user.id, "Issued token pair");
    Ok(TokenPair { refresh, access })
}

/// Verifies signature, expiry and token type, returning the claims.
pub fn verify_token(jwt: &JwtConfig, token: &str, expected: TokenType) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt.secret.expose_secret().as_bytes()),
        &validation,
    )?
    .claims;

    if claims.token_type != expected {
        warn!(jti = %claims.jti, "Token presented with the wrong type");
        return Err(Error::Token {
            message: format!("Expected {expected:?} token"),
        });
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_issue_and_verify_pair() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "+2348000000001").await?;
        let jwt = test_jwt_config();

        let pair = issue_token_pair(&jwt, &user)?;
        assert_ne!(pair.access, pair.refresh);

        let access = verify_token(&jwt, &pair.access, TokenType::Access)?;
        assert_eq!(access.user_id()?, user.id);
        assert_eq!(access.exp - access.iat, 5 * 60);

        let refresh = verify_token(&jwt, &pair.refresh, TokenType::Refresh)?;
        assert_eq!(refresh.user_id()?, user.id);
        assert_eq!(refresh.exp - refresh.iat, 24 * 60 * 60);
        assert_ne!(access.jti, refresh.jti);
        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_type_and_wrong_secret_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "+2348000000001").await?;
        let jwt = test_jwt_config();
        let pair = issue_token_pair(&jwt, &user)?;

        let result = verify_token(&jwt, &pair.refresh, TokenType::Access);
        assert!(matches!(result, Err(Error::Token { message: _ })));

        let other = JwtConfig::new("ffffffffffffffffffffffffffffffff");
        let result = verify_token(&other, &pair.access, TokenType::Access);
        assert!(matches!(result, Err(Error::Token { message: _ })));
        Ok(())
    }

    #[test]
    fn test_garbage_token_rejected() {
        let result = verify_token(&test_jwt_config(), "not.a.jwt", TokenType::Access);
        assert!(result.is_err());
    }
}
