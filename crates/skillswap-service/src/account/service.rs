//! Member and admin signup/login.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use skillswap_auth::jwt::IssuedToken;
use skillswap_auth::{JwtEncoder, PasswordHasher, PasswordValidator};
use skillswap_core::config::AuthConfig;
use skillswap_core::error::AppError;
use skillswap_core::types::UserId;
use skillswap_database::UserStore;
use skillswap_entity::user::{AccountRole, CreateUser, User};

use crate::text;

/// Signup form fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// An authenticated account together with its fresh token.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub user: User,
    pub token: IssuedToken,
}

/// Creates accounts and exchanges credentials for tokens.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    validator: PasswordValidator,
    encoder: JwtEncoder,
    allow_admin_signup: bool,
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService")
            .field("allow_admin_signup", &self.allow_admin_signup)
            .finish_non_exhaustive()
    }
}

impl AccountService {
    pub fn new(users: Arc<dyn UserStore>, config: &AuthConfig) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
            validator: PasswordValidator::new(config),
            encoder: JwtEncoder::new(config),
            allow_admin_signup: config.allow_admin_signup,
        }
    }

    /// Register a new account with the given role.
    ///
    /// Emails are compared case-insensitively; a taken email is a
    /// `Conflict`. Admin signup fails with `Authorization` unless enabled.
    pub async fn signup(
        &self,
        input: SignupInput,
        role: AccountRole,
    ) -> Result<AuthOutcome, AppError> {
        if role.is_admin() && !self.allow_admin_signup {
            return Err(AppError::authorization("Admin signup is disabled"));
        }

        let name = text::required(&input.name, "name")?;
        let email = normalize_email(&input.email)?;
        self.validator.validate(&input.password)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email already in use"));
        }

        let password_hash = self.hasher.hash_password(&input.password)?;
        let user = self
            .users
            .create(&CreateUser {
                name,
                email,
                password_hash,
                is_admin: role.is_admin(),
            })
            .await?;

        info!(user_id = %user.id, role = %role, "Account created");

        let token = self.encoder.issue(user.id, user.is_admin)?;
        Ok(AuthOutcome { user, token })
    }

    /// Exchange credentials for a token.
    ///
    /// An unknown email, or an account of the other role, is `NotFound`.
    /// A wrong password is `Authentication`; a banned account is
    /// `Authorization`.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        role: AccountRole,
    ) -> Result<AuthOutcome, AppError> {
        let email = normalize_email(email)?;
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .filter(|user| user.role() == role)
            .ok_or_else(|| AppError::not_found(format!("No {role} account for this email")))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::authentication("Invalid credentials"));
        }
        if !user.is_active {
            return Err(AppError::authorization("Account has been deactivated"));
        }

        info!(user_id = %user.id, role = %role, "Login succeeded");

        let token = self.encoder.issue(user.id, user.is_admin)?;
        Ok(AuthOutcome { user, token })
    }

    /// Confirm a token subject still exists and is allowed in.
    pub async fn ensure_active(&self, user_id: UserId) -> Result<User, AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::authentication("Account no longer exists"))?;
        if !user.is_active {
            return Err(AppError::authorization("Account has been deactivated"));
        }
        Ok(user)
    }
}

fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(AppError::validation("A valid email address is required")),
    }
}

#[cfg(test)]
mod tests {
    use skillswap_auth::JwtDecoder;
    use skillswap_core::error::ErrorKind;
    use skillswap_database::Stores;

    use super::*;

    fn config(allow_admin_signup: bool) -> AuthConfig {
        AuthConfig {
            jwt_secret: "account-tests".to_string(),
            allow_admin_signup,
            ..AuthConfig::default()
        }
    }

    fn signup(email: &str) -> SignupInput {
        SignupInput {
            name: "Ana".to_string(),
            email: email.to_string(),
            password: "secret1".to_string(),
        }
    }

    #[tokio::test]
    async fn signup_then_login_issues_verifiable_tokens() {
        let cfg = config(false);
        let svc = AccountService::new(Stores::memory().users, &cfg);

        let created = svc.signup(signup(" Ana@Example.com "), AccountRole::Member).await.unwrap();
        assert_eq!(created.user.email, "ana@example.com");
        assert!(!created.user.is_admin);
        assert_ne!(created.user.password_hash, "secret1");

        let logged_in = svc
            .login("ANA@example.com", "secret1", AccountRole::Member)
            .await
            .unwrap();
        let claims = JwtDecoder::new(&cfg).decode(&logged_in.token.token).unwrap();
        assert_eq!(claims.sub, created.user.id);
        assert!(!claims.is_admin);
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let svc = AccountService::new(Stores::memory().users, &config(false));
        svc.signup(signup("ana@example.com"), AccountRole::Member).await.unwrap();

        let err = svc
            .signup(signup("ANA@example.com"), AccountRole::Member)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn signup_validates_fields() {
        let svc = AccountService::new(Stores::memory().users, &config(false));

        let mut short = signup("ana@example.com");
        short.password = "123".to_string();
        let mut nameless = signup("ana@example.com");
        nameless.name = " ".to_string();

        for input in [short, nameless, signup("not-an-email")] {
            let err = svc.signup(input, AccountRole::Member).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
        }
    }

    #[tokio::test]
    async fn admin_signup_requires_opt_in() {
        let closed = AccountService::new(Stores::memory().users, &config(false));
        let err = closed
            .signup(signup("root@example.com"), AccountRole::Admin)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let open = AccountService::new(Stores::memory().users, &config(true));
        let admin = open.signup(signup("root@example.com"), AccountRole::Admin).await.unwrap();
        assert!(admin.user.is_admin);
    }

    #[tokio::test]
    async fn login_failures_are_distinguished() {
        let svc = AccountService::new(Stores::memory().users, &config(true));
        svc.signup(signup("ana@example.com"), AccountRole::Member).await.unwrap();

        let wrong_role = svc
            .login("ana@example.com", "secret1", AccountRole::Admin)
            .await
            .unwrap_err();
        assert_eq!(wrong_role.kind, ErrorKind::NotFound);

        let unknown = svc
            .login("nobody@example.com", "secret1", AccountRole::Member)
            .await
            .unwrap_err();
        assert_eq!(unknown.kind, ErrorKind::NotFound);

        let bad_password = svc
            .login("ana@example.com", "secret2", AccountRole::Member)
            .await
            .unwrap_err();
        assert_eq!(bad_password.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn banned_account_cannot_log_in() {
        let stores = Stores::memory();
        let svc = AccountService::new(stores.users.clone(), &config(false));
        let created = svc.signup(signup("ana@example.com"), AccountRole::Member).await.unwrap();
        stores.users.set_active(created.user.id, false).await.unwrap();

        let err = svc
            .login("ana@example.com", "secret1", AccountRole::Member)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        assert_eq!(
            svc.ensure_active(created.user.id).await.unwrap_err().kind,
            ErrorKind::Authorization
        );
        assert_eq!(
            svc.ensure_active(UserId(999)).await.unwrap_err().kind,
            ErrorKind::Authentication
        );
    }
}
