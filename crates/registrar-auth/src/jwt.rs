//! Access token creation and verification (HS256).

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use registrar_config::JwtConfig;
use registrar_core::AppError;

use crate::claims::Claims;
use crate::role::Role;

/// Signs an access token for the given account.
///
/// # Errors
///
/// Returns an internal error if token encoding fails.
pub fn create_access_token(
    user_id: i32,
    email: &str,
    role: Role,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry.max(0) as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role,
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies the signature and expiry of an access token.
///
/// # Errors
///
/// Returns an unauthorized error if the token is malformed, expired or
/// signed with another secret.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar_core::ErrorKind;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry: 3600,
        }
    }

    #[test]
    fn test_create_and_verify() {
        let token = create_access_token(5, "hod@uni.edu", Role::HeadOfDepartment, &config())
            .unwrap();
        let claims = verify_token(&token, &config()).unwrap();

        assert_eq!(claims.user_id().unwrap(), 5);
        assert_eq!(claims.email, "hod@uni.edu");
        assert_eq!(claims.role, Role::HeadOfDepartment);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_wrong_secret_is_unauthorized() {
        let token = create_access_token(1, "a@uni.edu", Role::Admin, &config()).unwrap();
        let other = JwtConfig {
            secret: "another-secret".to_string(),
            ..config()
        };
        let err = verify_token(&token, &other).unwrap_err();
        assert!(err.is(ErrorKind::Unauthorized));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let expired = JwtConfig {
            access_token_expiry: 0,
            ..config()
        };
        let claims = Claims {
            sub: "1".to_string(),
            email: "a@uni.edu".to_string(),
            role: Role::Student,
            exp: (Utc::now().timestamp() - 600) as usize,
            iat: (Utc::now().timestamp() - 1200) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(expired.secret.as_bytes()),
        )
        .unwrap();

        assert!(verify_token(&token, &expired).is_err());
    }

    #[test]
    fn test_garbage_token() {
        assert!(verify_token("not.a.token", &config()).is_err());
    }
}
