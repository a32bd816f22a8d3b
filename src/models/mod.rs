pub mod user;
pub mod word;

pub use user::{normalize_username, User};
pub use word::{Category, WordEntry, WordFields};
