//! JWT issuance and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::{AppResult, JwtConfig};
use domain::{AuthResponse, Role, UserInfo, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub email: String,
    pub roles: Vec<Role>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Token issuance trait for dependency injection.
pub trait TokenService: Send + Sync {
    /// Sign a token for `user` and wrap it in the auth response.
    fn issue(&self, user: UserInfo) -> AppResult<AuthResponse>;

    /// Decode and validate a bearer token.
    fn verify(&self, token: &str) -> AppResult<Claims>;
}

/// HS256 tokens signed with a shared secret.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_hours: i64,
}

impl JwtTokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            expiration_hours: config.expiration_hours,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user: UserInfo) -> AppResult<AuthResponse> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.expiration_hours);

        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            roles: user.roles.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;

        Ok(AuthResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.expiration_hours * SECONDS_PER_HOUR,
            user,
        })
    }

    fn verify(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::AppError;

    fn service(secret: &str) -> JwtTokenService {
        JwtTokenService::new(&JwtConfig {
            secret: secret.to_string(),
            expiration_hours: 2,
        })
    }

    fn user() -> UserInfo {
        UserInfo {
            id: Uuid::new_v4(),
            username: "mperez".to_string(),
            email: "mperez@example.com".to_string(),
            roles: vec![Role::Doctor, Role::DepartmentHead],
        }
    }

    #[test]
    fn test_issued_token_carries_user_claims() {
        let tokens = service("an-adequately-long-test-secret-value!");
        let user = user();

        let response = tokens.issue(user.clone()).unwrap();
        let claims = tokens.verify(&response.access_token).unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 2 * 3600);
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, "mperez");
        assert!(claims.has_role(Role::DepartmentHead));
        assert_eq!(claims.exp - claims.iat, 2 * 3600);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let response = service("an-adequately-long-test-secret-value!")
            .issue(user())
            .unwrap();

        let result = service("a-completely-different-secret-value!!").verify(&response.access_token);

        assert!(matches!(result, Err(AppError::Jwt(_))));
    }
}
