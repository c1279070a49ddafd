//! Session tokens and the demo user directory.
//!
//! Tokens are HS256 JWTs; passwords are argon2 hashes. Neither makes the
//! mock secure, they only give the storefront realistic shapes to handle.

use std::collections::HashMap;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use shopsphere_core::{Credentials, Role, User};
use tracing::debug;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: u32,

    pub username: String,

    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,
}

impl Claims {
    pub fn user(&self) -> User {
        User {
            id: self.sub,
            username: self.username.clone(),
            role: self.role,
        }
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthGrant {
    pub user: User,
    pub token: String,
}

/// Issues and validates session tokens.
pub struct TokenManager {
    secret: String,
    lifetime_secs: i64,
}

impl TokenManager {
    pub fn new(secret: impl Into<String>, lifetime_secs: i64) -> Self {
        TokenManager {
            secret: secret.into(),
            lifetime_secs,
        }
    }

    /// Issues a token for `user`.
    ///
    /// A lifetime that does not fit a timestamp is an `Internal` error.
    pub fn issue(&self, user: &User) -> ApiResult<String> {
        let now = Utc::now();
        let exp = Duration::try_seconds(self.lifetime_secs)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                ApiError::Internal(format!(
                    "token lifetime out of range: {}s",
                    self.lifetime_secs
                ))
            })?;

        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ApiError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Validates and decodes a token.
    pub fn validate(&self, token: &str) -> ApiResult<Claims> {
        let token = strip_bearer(token);
        if token.is_empty() {
            return Err(ApiError::Unauthorized("missing token".to_string()));
        }

        let token_data: TokenData<Claims> = decode(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| ApiError::Unauthorized(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }

    /// Validates a token and requires the admin role.
    pub fn validate_admin(&self, token: &str, action: &str) -> ApiResult<Claims> {
        let claims = self.validate(token)?;
        if !claims.role.is_admin() {
            debug!(user = %claims.username, action, "Rejected non-admin token");
            return Err(ApiError::forbidden(action));
        }
        Ok(claims)
    }
}

/// Accepts both a raw token and an `Authorization` header value.
fn strip_bearer(token: &str) -> &str {
    let token = token.trim();
    token.strip_prefix("Bearer ").unwrap_or(token)
}

struct UserRecord {
    user: User,
    password_hash: String,
}

/// In-memory accounts with argon2 password hashes.
pub struct UserDirectory {
    users: HashMap<String, UserRecord>,
    next_id: u32,
}

impl UserDirectory {
    pub fn new() -> Self {
        UserDirectory {
            users: HashMap::new(),
            next_id: 1,
        }
    }

    /// The two demo accounts: `admin`/`admin123` and `customer`/`customer123`.
    pub fn with_demo_users() -> ApiResult<Self> {
        let mut directory = UserDirectory::new();
        directory.add_user("admin", "admin123", Role::Admin)?;
        directory.add_user("customer", "customer123", Role::Customer)?;
        Ok(directory)
    }

    /// Registers an account. Usernames are case-insensitive.
    pub fn add_user(&mut self, username: &str, password: &str, role: Role) -> ApiResult<User> {
        let key = username.trim().to_lowercase();
        if self.users.contains_key(&key) {
            return Err(ApiError::Validation(
                shopsphere_core::ValidationError::InvalidFormat {
                    field: "username".to_string(),
                    reason: format!("'{}' is already taken", key),
                },
            ));
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?
            .to_string();

        let user = User {
            id: self.next_id,
            username: key.clone(),
            role,
        };
        self.next_id += 1;

        self.users.insert(
            key,
            UserRecord {
                user: user.clone(),
                password_hash,
            },
        );
        Ok(user)
    }

    /// Checks a username/password pair.
    pub fn authenticate(&self, credentials: &Credentials) -> ApiResult<User> {
        let key = credentials.username.trim().to_lowercase();
        let record = self.users.get(&key).ok_or(ApiError::InvalidCredentials)?;

        let parsed = PasswordHash::new(&record.password_hash)
            .map_err(|e| ApiError::Internal(format!("Stored hash is corrupt: {}", e)))?;

        Argon2::default()
            .verify_password(credentials.password.as_bytes(), &parsed)
            .map_err(|_| ApiError::InvalidCredentials)?;

        Ok(record.user.clone())
    }

    pub fn find(&self, username: &str) -> Option<&User> {
        self.users.get(&username.trim().to_lowercase()).map(|r| &r.user)
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> User {
        User {
            id: 1,
            username: "admin".to_string(),
            role: Role::Admin,
        }
    }

    #[test]
    fn test_token_roundtrip() {
        let manager = TokenManager::new("test-secret", 3600);

        let token = manager.issue(&admin()).unwrap();
        let claims = manager.validate(&token).unwrap();

        assert_eq!(claims.sub, 1);
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.user(), admin());
    }

    #[test]
    fn test_bearer_prefix_accepted() {
        let manager = TokenManager::new("test-secret", 3600);
        let token = manager.issue(&admin()).unwrap();

        assert!(manager.validate(&format!("Bearer {}", token)).is_ok());
    }

    #[test]
    fn test_rejects_foreign_and_expired_tokens() {
        let manager = TokenManager::new("test-secret", 3600);
        let other = TokenManager::new("other-secret", 3600);
        let token = other.issue(&admin()).unwrap();
        assert!(matches!(manager.validate(&token), Err(ApiError::Unauthorized(_))));

        // Past the default 60s validation leeway.
        let stale = TokenManager::new("test-secret", -600);
        let token = stale.issue(&admin()).unwrap();
        assert!(matches!(manager.validate(&token), Err(ApiError::Unauthorized(_))));

        assert!(matches!(manager.validate(""), Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_out_of_range_lifetime_is_an_error() {
        let manager = TokenManager::new("test-secret", i64::MAX);
        assert!(matches!(manager.issue(&admin()), Err(ApiError::Internal(_))));

        let manager = TokenManager::new("test-secret", i64::MIN);
        assert!(matches!(manager.issue(&admin()), Err(ApiError::Internal(_))));
    }

    #[test]
    fn test_validate_admin() {
        let manager = TokenManager::new("test-secret", 3600);
        let customer = User {
            id: 2,
            username: "customer".to_string(),
            role: Role::Customer,
        };
        let token = manager.issue(&customer).unwrap();

        assert!(matches!(
            manager.validate_admin(&token, "delete product"),
            Err(ApiError::Forbidden { .. })
        ));
        let token = manager.issue(&admin()).unwrap();
        assert!(manager.validate_admin(&token, "delete product").is_ok());
    }

    #[test]
    fn test_demo_users_authenticate() {
        let directory = UserDirectory::with_demo_users().unwrap();

        let user = directory
            .authenticate(&Credentials::new("Admin", "admin123"))
            .unwrap();
        assert_eq!(user.role, Role::Admin);

        let user = directory
            .authenticate(&Credentials::new("customer", "customer123"))
            .unwrap();
        assert_eq!(user.role, Role::Customer);
    }

    #[test]
    fn test_bad_credentials() {
        let directory = UserDirectory::with_demo_users().unwrap();

        assert!(matches!(
            directory.authenticate(&Credentials::new("admin", "wrong")),
            Err(ApiError::InvalidCredentials)
        ));
        assert!(matches!(
            directory.authenticate(&Credentials::new("nobody", "admin123")),
            Err(ApiError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let mut directory = UserDirectory::new();
        directory.add_user("sam", "pw", Role::Customer).unwrap();
        assert!(directory.add_user("SAM", "pw2", Role::Admin).is_err());
        assert_eq!(directory.find("Sam").map(|u| u.id), Some(1));
    }
}
