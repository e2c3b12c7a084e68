//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Shipped default signing secret. Refused for persistent deployments.
pub const PLACEHOLDER_JWT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Token and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Value of the `iss` claim on issued tokens.
    #[serde(default = "default_issuer")]
    pub jwt_issuer: String,
    /// Token lifetime in hours.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: u64,
    /// Minimum password length accepted at signup.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Whether `POST /api/v1/admin/signup` may create admin accounts.
    #[serde(default)]
    pub allow_admin_signup: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_issuer: default_issuer(),
            token_ttl_hours: default_token_ttl(),
            password_min_length: default_password_min(),
            allow_admin_signup: false,
        }
    }
}

fn default_jwt_secret() -> String {
    PLACEHOLDER_JWT_SECRET.to_string()
}

impl AuthConfig {
    /// Whether the signing secret is still the shipped default.
    pub fn uses_placeholder_secret(&self) -> bool {
        self.jwt_secret == PLACEHOLDER_JWT_SECRET
    }
}

fn default_issuer() -> String {
    "skillswap".to_string()
}

fn default_token_ttl() -> u64 {
    24 * 7
}

fn default_password_min() -> usize {
    6
}
