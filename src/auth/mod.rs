pub mod extractors;
pub mod middleware;
pub mod password;
pub mod service;
pub mod session;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::{MaybeSessionUser, SessionUser};
pub use middleware::SessionMiddleware;
pub use service::{AuthService, SessionToken};
pub use session::SESSION_COOKIE;
pub use token::{Claims, SessionKeys};

/// The login form.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// The registration form. Same fields as login; only presence is checked.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}
