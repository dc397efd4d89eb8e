use sqlx::PgPool;
use uuid::Uuid;

use crate::config;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::User;

/// Accounts are email-keyed; passwords are never stored in plain text.
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("User already exists: {0}")]
    AlreadyExists(String),
    #[error("Invalid email: {0}")]
    InvalidEmail(String),
    #[error("Weak password: {0}")]
    WeakPassword(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub async fn new() -> Result<Self, DatabaseError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    /// Create a new account with a normalized email and hashed password
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<User, UserError> {
        let email = normalize_email(email)?;

        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(UserError::WeakPassword(format!(
                "Must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        if self.email_taken(&email).await? {
            return Err(UserError::AlreadyExists(email));
        }

        let cost = config::config().security.bcrypt_cost;
        let password_hash = bcrypt::hash(password, cost)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, name, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&email)
        .bind(name)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // The email_taken pre-check races concurrent registrations; the
            // UNIQUE constraint on users.email is the authority.
            match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    UserError::AlreadyExists(email.clone())
                }
                _ => UserError::Database(e),
            }
        })?;

        tracing::info!("Registered user {}", user.id);
        Ok(user)
    }

    /// Verify credentials and return the matching active user
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, UserError> {
        let email = normalize_email(email).map_err(|_| UserError::InvalidCredentials)?;

        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = $1 AND is_active = TRUE",
        )
        .bind(&email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(UserError::InvalidCredentials)?;

        if !bcrypt::verify(password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    pub async fn fetch(&self, id: Uuid) -> Result<Option<User>, UserError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE id = $1 AND is_active = TRUE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn email_taken(&self, email: &str) -> Result<bool, UserError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0 > 0)
    }
}

/// Normalize an email address: trim whitespace and lowercase the domain
/// part. The local part is left as entered.
pub fn normalize_email(email: &str) -> Result<String, UserError> {
    let email = email.trim();

    if email.is_empty() {
        return Err(UserError::InvalidEmail("This field is required".to_string()));
    }

    let (local, domain) = email
        .rsplit_once('@')
        .ok_or_else(|| UserError::InvalidEmail("Invalid email format".to_string()))?;

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(UserError::InvalidEmail("Invalid email format".to_string()));
    }

    Ok(format!("{}@{}", local, domain.to_lowercase()))
}
