use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// The editable fields of a word entry, as submitted by the add and edit forms.
///
/// All three fields are required; presence is the only check applied.
/// Missing form fields deserialize as empty so they fail validation instead
/// of deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct WordFields {
    /// The word being defined.
    #[validate(length(min = 1, message = "Word is required"))]
    pub task_word: String,
    /// A short name or part of speech for the word.
    #[validate(length(min = 1, message = "Name is required"))]
    pub task_name: String,
    /// The definition.
    #[validate(length(min = 1, message = "Description is required"))]
    pub task_description: String,
}

/// A word entry as stored in the `tasks` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WordEntry {
    /// Store-assigned identifier; never changes after creation.
    pub id: Uuid,
    pub task_word: String,
    pub task_name: String,
    pub task_description: String,
    /// Username of the last user to create or edit the entry.
    pub created_by: String,
}

impl WordEntry {
    /// Builds a new entry with a fresh identifier.
    pub fn new(fields: WordFields, created_by: &str) -> Self {
        Self::with_id(Uuid::new_v4(), fields, created_by)
    }

    pub fn with_id(id: Uuid, fields: WordFields, created_by: &str) -> Self {
        Self {
            id,
            task_word: fields.task_word,
            task_name: fields.task_name,
            task_description: fields.task_description,
            created_by: created_by.to_string(),
        }
    }

    /// Text indexed for full-text search.
    pub fn searchable_text(&self) -> [&str; 3] {
        [&self.task_word, &self.task_name, &self.task_description]
    }
}

/// Reference data used to populate the edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub category_name: String,
}
