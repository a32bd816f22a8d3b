//! The word catalog: CRUD, search and random sampling over word entries.

use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::{Category, WordEntry, WordFields};
use crate::store::DataStore;

pub struct Catalog {
    store: Arc<dyn DataStore>,
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Word {} not found", id))
}

impl Catalog {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// Every entry, in the order the store returns them (insertion order).
    pub async fn list_all(&self) -> Result<Vec<WordEntry>, AppError> {
        self.store.find_entries().await
    }

    /// Full-text search. A blank query returns the whole catalog.
    pub async fn search(&self, query: &str) -> Result<Vec<WordEntry>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return self.list_all().await;
        }
        self.store.text_search(query).await
    }

    pub async fn random_entry(&self) -> Result<WordEntry, AppError> {
        self.store
            .sample_entry()
            .await?
            .ok_or(AppError::EmptyCatalog)
    }

    pub async fn get(&self, id: Uuid) -> Result<WordEntry, AppError> {
        self.store
            .find_entry(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn add(&self, fields: &WordFields, created_by: &str) -> Result<WordEntry, AppError> {
        fields.validate()?;
        let entry = self.store.insert_entry(fields, created_by).await?;
        log::info!("{} added word {} ({})", created_by, entry.task_word, entry.id);
        Ok(entry)
    }

    /// Replaces all editable fields; `created_by` becomes the editor.
    pub async fn edit(
        &self,
        id: Uuid,
        fields: &WordFields,
        created_by: &str,
    ) -> Result<WordEntry, AppError> {
        fields.validate()?;
        let entry = self
            .store
            .replace_entry(id, fields, created_by)
            .await?
            .ok_or_else(|| not_found(id))?;
        log::info!("{} edited word {}", created_by, id);
        Ok(entry)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.delete_entry(id).await? {
            return Err(not_found(id));
        }
        log::info!("Deleted word {}", id);
        Ok(())
    }

    /// Categories for the edit form, ascending by name.
    pub async fn categories(&self) -> Result<Vec<Category>, AppError> {
        self.store.find_categories().await
    }
}
