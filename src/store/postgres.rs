use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use super::DataStore;
use crate::error::AppError;
use crate::models::{Category, User, WordEntry, WordFields};

const ENTRY_COLUMNS: &str = "id, task_word, task_name, task_description, created_by";

/// Postgres error code for a unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed store. Collections map to tables of the same name.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Applies the schema in `migrations/`.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .and_then(|db| db.code())
        .map_or(false, |code| code == UNIQUE_VIOLATION)
}

#[async_trait]
impl DataStore for PgStore {
    async fn find_user(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT username, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        sqlx::query("INSERT INTO users (username, password_hash) VALUES ($1, $2)")
            .bind(&user.username)
            .bind(&user.password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::DuplicateUsername
                } else {
                    AppError::from(e)
                }
            })?;
        Ok(())
    }

    async fn find_entries(&self) -> Result<Vec<WordEntry>, AppError> {
        let entries = sqlx::query_as::<_, WordEntry>(&format!(
            "SELECT {} FROM tasks ORDER BY seq",
            ENTRY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    async fn find_entry(&self, id: Uuid) -> Result<Option<WordEntry>, AppError> {
        let entry = sqlx::query_as::<_, WordEntry>(&format!(
            "SELECT {} FROM tasks WHERE id = $1",
            ENTRY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(entry)
    }

    async fn insert_entry(
        &self,
        fields: &WordFields,
        created_by: &str,
    ) -> Result<WordEntry, AppError> {
        let entry = sqlx::query_as::<_, WordEntry>(&format!(
            "INSERT INTO tasks (id, task_word, task_name, task_description, created_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            ENTRY_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&fields.task_word)
        .bind(&fields.task_name)
        .bind(&fields.task_description)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(entry)
    }

    async fn replace_entry(
        &self,
        id: Uuid,
        fields: &WordFields,
        created_by: &str,
    ) -> Result<Option<WordEntry>, AppError> {
        let entry = sqlx::query_as::<_, WordEntry>(&format!(
            "UPDATE tasks
             SET task_word = $1, task_name = $2, task_description = $3, created_by = $4
             WHERE id = $5
             RETURNING {}",
            ENTRY_COLUMNS
        ))
        .bind(&fields.task_word)
        .bind(&fields.task_name)
        .bind(&fields.task_description)
        .bind(created_by)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(entry)
    }

    async fn delete_entry(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn text_search(&self, query: &str) -> Result<Vec<WordEntry>, AppError> {
        // plainto_tsquery joins terms with AND; rewriting to OR matches any term.
        let entries = sqlx::query_as::<_, WordEntry>(&format!(
            "SELECT {} FROM tasks
             WHERE to_tsvector('english', task_word || ' ' || task_name || ' ' || task_description)
                   @@ replace(plainto_tsquery('english', $1)::text, '&', '|')::tsquery
             ORDER BY seq",
            ENTRY_COLUMNS
        ))
        .bind(query)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    async fn sample_entry(&self) -> Result<Option<WordEntry>, AppError> {
        let entry = sqlx::query_as::<_, WordEntry>(&format!(
            "SELECT {} FROM tasks ORDER BY random() LIMIT 1",
            ENTRY_COLUMNS
        ))
        .fetch_optional(&self.pool)
        .await?;
        Ok(entry)
    }

    async fn find_categories(&self) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT category_name FROM categories ORDER BY category_name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }
}
