use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::config::Config;
use crate::db::users;
use crate::error::AppError;
use crate::models::{AccessToken, UserIdentity};
use crate::services::password::{hash_password, verify_password};
use crate::services::token::{issue_token, validate_token};

const INVALID_CREDENTIALS: &str = "Incorrect email or password";
const INVALID_TOKEN: &str = "Invalid or expired token";

/// Stands in for a stored hash when the email is unknown, so both login failures cost one
/// Argon2 verification.
static DUMMY_HASH: OnceCell<String> = OnceCell::const_new();

async fn dummy_hash() -> Result<String, AppError> {
    DUMMY_HASH
        .get_or_try_init(|| hash_password("unregistered-account".to_string()))
        .await
        .cloned()
}

/// Registration, login and bearer-token resolution.
pub struct AuthService {
    db: SqlitePool,
    config: Arc<Config>,
}

impl AuthService {
    pub fn new(db: SqlitePool, config: Arc<Config>) -> Self {
        Self { db, config }
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<AccessToken, AppError> {
        let email = normalize_email(email)?;
        if password.is_empty() {
            return Err(AppError::validation("Password is required"));
        }

        let password_hash = hash_password(password.to_string()).await?;

        let mut tx = self.db.begin().await?;
        if users::email_exists(&mut *tx, &email).await? {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }
        // A concurrent registration can still slip past the check above.
        users::insert_user(&mut *tx, &email, &password_hash)
            .await
            .map_err(map_unique_violation)?;
        tx.commit().await?;

        info!("registered user {}", email);
        self.token_for(&email)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AccessToken, AppError> {
        let email = normalize_email(email)?;

        let Some(user) = users::find_user_by_email(&self.db, &email).await? else {
            debug!("login for unknown email");
            verify_password(password.to_string(), dummy_hash().await?).await?;
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(password.to_string(), user.password_hash).await? {
            debug!("login with wrong password for user {}", user.id);
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        self.token_for(&email)
    }

    pub async fn authenticate(&self, token: &str) -> Result<UserIdentity, AppError> {
        let claims = validate_token(token, &self.config.jwt_secret).map_err(|e| {
            debug!("rejected bearer token: {}", e);
            AppError::unauthorized(INVALID_TOKEN)
        })?;

        users::find_user_by_email(&self.db, &claims.sub)
            .await?
            .map(UserIdentity::from)
            .ok_or_else(|| AppError::unauthorized(INVALID_TOKEN))
    }

    fn token_for(&self, email: &str) -> Result<AccessToken, AppError> {
        let token = issue_token(email, &self.config.jwt_secret, self.config.token_lifetime)?;
        Ok(AccessToken::bearer(token))
    }
}

/// Lowercases and checks for a `local@domain.tld` shape.
pub fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.to_lowercase();
    if is_valid_email(&email) {
        Ok(email)
    } else {
        Err(AppError::validation("Invalid email format"))
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn map_unique_violation(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AppError::Conflict("Email already registered".to_string());
        }
    }
    AppError::Database(err)
}
