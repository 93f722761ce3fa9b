//! PostgreSQL-backed user repository
//!
//! Stores users in a single `users` table whose `UNIQUE (email)` constraint
//! makes concurrent duplicate inserts fail atomically. Unique violations are
//! reported as [`StoreError::DuplicateEmail`].

use crate::{
    error::{StoreError, StoreResult},
    models::*,
    repository::UserRepository,
};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::debug;
use uuid::Uuid;

const SCHEMA: &str = include_str!("../../migrations/0001_create_users.sql");

const UNIQUE_VIOLATION: &str = "23505";

const USER_COLUMNS: &str =
    "id, email, name, goal, profile_img, password_digest, created_at, updated_at";

/// PostgreSQL-backed user repository
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create with connection string
    pub async fn from_connection_string(connection_string: &str) -> StoreResult<Self> {
        let pool = PgPool::connect(connection_string)
            .await
            .map_err(|e| StoreError::StorageError(format!("Failed to connect: {}", e)))?;

        Ok(Self::new(pool))
    }

    /// Create the `users` table if it does not exist yet
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }
}

fn row_to_user(row: &PgRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        goal: row.try_get("goal")?,
        profile_img: row.try_get("profile_img")?,
        password_digest: row.try_get("password_digest")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn map_write_error(error: sqlx::Error) -> StoreError {
    match &error {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            StoreError::DuplicateEmail
        }
        _ => StoreError::DatabaseError(error),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(row_to_user).transpose()?)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(row_to_user).transpose()?)
    }

    async fn list_all(&self) -> StoreResult<Vec<User>> {
        let rows = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(row_to_user).collect::<Result<Vec<_>, _>>()?)
    }

    async fn create(&self, user: NewUser) -> StoreResult<User> {
        debug!("Inserting user record");

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO users (id, email, name, goal, profile_img, password_digest, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.goal)
        .bind(&user.profile_img)
        .bind(&user.password_digest)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row_to_user(&row)?)
    }

    async fn update_by_id(&self, id: Uuid, update: UserUpdate) -> StoreResult<Option<User>> {
        if update.is_empty() {
            return self.find_by_id(id).await;
        }

        debug!(user_id = %id, "Updating user record");

        let row = sqlx::query(&format!(
            r#"
            UPDATE users SET
                email = COALESCE($2, email),
                name = COALESCE($3, name),
                goal = COALESCE($4, goal),
                profile_img = COALESCE($5, profile_img),
                password_digest = COALESCE($6, password_digest),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(update.email)
        .bind(update.name)
        .bind(update.goal)
        .bind(update.profile_img)
        .bind(update.password_digest)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.as_ref().map(row_to_user).transpose()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct FakeDbError {
        code: &'static str,
    }

    impl fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "database error {}", self.code)
        }
    }

    impl StdError for FakeDbError {}

    impl DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            if self.code == UNIQUE_VIOLATION {
                ErrorKind::UniqueViolation
            } else {
                ErrorKind::Other
            }
        }
    }

    #[test]
    fn test_unique_violation_maps_to_duplicate_email() {
        let error = sqlx::Error::Database(Box::new(FakeDbError { code: UNIQUE_VIOLATION }));
        assert!(matches!(map_write_error(error), StoreError::DuplicateEmail));
    }

    #[test]
    fn test_other_database_errors_pass_through() {
        // not_null_violation
        let error = sqlx::Error::Database(Box::new(FakeDbError { code: "23502" }));
        assert!(matches!(map_write_error(error), StoreError::DatabaseError(_)));

        assert!(matches!(
            map_write_error(sqlx::Error::PoolTimedOut),
            StoreError::DatabaseError(sqlx::Error::PoolTimedOut)
        ));
    }
}
