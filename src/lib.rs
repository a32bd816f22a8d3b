#![doc = "The `wordbook` library crate."]
#![doc = ""]
#![doc = "A glossary web application: the data store client, the auth and catalog"]
#![doc = "services, session handling and the HTTP routes. The binary (`main.rs`)"]
#![doc = "loads configuration, opens the store and serves the routes."]

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod flash;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

pub use crate::error::AppError;
pub use crate::state::AppState;
