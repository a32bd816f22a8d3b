use actix_web::web;
use std::sync::Arc;

use crate::auth::{AuthService, SessionKeys};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::store::DataStore;

/// Shared handles registered as `web::Data` on every worker's `App`.
#[derive(Clone)]
pub struct AppState {
    pub auth: web::Data<AuthService>,
    pub catalog: web::Data<Catalog>,
    pub keys: web::Data<SessionKeys>,
}

impl AppState {
    pub fn new(store: Arc<dyn DataStore>, keys: SessionKeys, bcrypt_cost: u32) -> Self {
        Self {
            auth: web::Data::new(AuthService::new(store.clone(), keys.clone(), bcrypt_cost)),
            catalog: web::Data::new(Catalog::new(store)),
            keys: web::Data::new(keys),
        }
    }

    pub fn from_config(store: Arc<dyn DataStore>, config: &Config) -> Self {
        let keys = SessionKeys::new(&config.secret_key, config.session_ttl_hours)
            .with_secure_cookie(config.cookie_secure);
        Self::new(store, keys, config.bcrypt_cost)
    }

    /// Registers the shared handles with an `App` (via `App::configure`).
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.auth.clone())
            .app_data(self.catalog.clone())
            .app_data(self.keys.clone());
    }
}
