//! Data store client.
//!
//! `DataStore` is the seam between the services and the database. It exposes
//! the `users`, `tasks` and `categories` collections as typed operations.
//! [`PgStore`] is the production backend; [`MemoryStore`] keeps everything in
//! process and backs the test suite.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppError;
use crate::models::{Category, User, WordEntry, WordFields};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait DataStore: Send + Sync {
    /// Looks up a user by (already lowercased) username.
    async fn find_user(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Persists a new user. Fails with `AppError::DuplicateUsername` if the name is taken.
    async fn insert_user(&self, user: &User) -> Result<(), AppError>;

    /// All word entries in insertion order.
    async fn find_entries(&self) -> Result<Vec<WordEntry>, AppError>;

    async fn find_entry(&self, id: Uuid) -> Result<Option<WordEntry>, AppError>;

    /// Inserts a new entry and returns it with its store-assigned id.
    async fn insert_entry(
        &self,
        fields: &WordFields,
        created_by: &str,
    ) -> Result<WordEntry, AppError>;

    /// Replaces every editable field of an entry. Returns `None` if no entry has `id`.
    async fn replace_entry(
        &self,
        id: Uuid,
        fields: &WordFields,
        created_by: &str,
    ) -> Result<Option<WordEntry>, AppError>;

    /// Returns `false` if no entry had `id`.
    async fn delete_entry(&self, id: Uuid) -> Result<bool, AppError>;

    /// Entries matching any term of `query` in word, name or description,
    /// in insertion order.
    ///
    /// Term matching is backend-specific. `PgStore` stems terms with the
    /// `english` text search config, so `ships` also finds `ship`.
    /// `MemoryStore` compares whole words case-insensitively without stemming.
    async fn text_search(&self, query: &str) -> Result<Vec<WordEntry>, AppError>;

    /// One entry picked uniformly at random, or `None` when there are no entries.
    async fn sample_entry(&self) -> Result<Option<WordEntry>, AppError>;

    /// All categories, ascending by name.
    async fn find_categories(&self) -> Result<Vec<Category>, AppError>;
}

/// Opens the store selected by `DATABASE_URL`.
pub async fn connect(config: &Config) -> Result<Arc<dyn DataStore>, AppError> {
    if config.uses_memory_store() {
        log::warn!("Using the in-memory store; data will not survive a restart");
        return Ok(Arc::new(MemoryStore::new()));
    }
    let store = PgStore::connect(&config.database_url, config.database_max_connections).await?;
    store.migrate().await?;
    Ok(Arc::new(store))
}

/// Splits a search query into lowercase terms.
pub(crate) fn search_terms(query: &str) -> Vec<String> {
    query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
        .collect()
}
