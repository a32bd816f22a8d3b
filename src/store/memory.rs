use async_trait::async_trait;
use rand::seq::IndexedRandom;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{search_terms, DataStore};
use crate::error::AppError;
use crate::models::{Category, User, WordEntry, WordFields};

/// In-process store. Entries keep insertion order.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    entries: RwLock<Vec<WordEntry>>,
    categories: RwLock<Vec<Category>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the read-only category reference data.
    pub fn with_categories<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let categories = names
            .into_iter()
            .map(|name| Category {
                category_name: name.into(),
            })
            .collect();
        Self {
            categories: RwLock::new(categories),
            ..Self::default()
        }
    }
}

fn matches_any(entry: &WordEntry, terms: &[String]) -> bool {
    entry.searchable_text().iter().any(|text| {
        search_terms(text)
            .iter()
            .any(|word| terms.iter().any(|term| term == word))
    })
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn find_user(&self, username: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(AppError::DuplicateUsername);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_entries(&self) -> Result<Vec<WordEntry>, AppError> {
        Ok(self.entries.read().await.clone())
    }

    async fn find_entry(&self, id: Uuid) -> Result<Option<WordEntry>, AppError> {
        let entries = self.entries.read().await;
        Ok(entries.iter().find(|e| e.id == id).cloned())
    }

    async fn insert_entry(
        &self,
        fields: &WordFields,
        created_by: &str,
    ) -> Result<WordEntry, AppError> {
        let entry = WordEntry::new(fields.clone(), created_by);
        self.entries.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn replace_entry(
        &self,
        id: Uuid,
        fields: &WordFields,
        created_by: &str,
    ) -> Result<Option<WordEntry>, AppError> {
        let mut entries = self.entries.write().await;
        match entries.iter_mut().find(|e| e.id == id) {
            Some(slot) => {
                *slot = WordEntry::with_id(id, fields.clone(), created_by);
                Ok(Some(slot.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_entry(&self, id: Uuid) -> Result<bool, AppError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        Ok(entries.len() != before)
    }

    async fn text_search(&self, query: &str) -> Result<Vec<WordEntry>, AppError> {
        let terms = search_terms(query);
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|e| matches_any(e, &terms))
            .cloned()
            .collect())
    }

    async fn sample_entry(&self) -> Result<Option<WordEntry>, AppError> {
        let entries = self.entries.read().await;
        Ok(entries.choose(&mut rand::rng()).cloned())
    }

    async fn find_categories(&self) -> Result<Vec<Category>, AppError> {
        let mut categories = self.categories.read().await.clone();
        categories.sort_by(|a, b| a.category_name.cmp(&b.category_name));
        Ok(categories)
    }
}
