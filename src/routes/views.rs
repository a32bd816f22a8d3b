//! View models. Each page renders as JSON: the view name, pending flash
//! messages, the session user and the page's own data.

use actix_web::HttpResponse;
use serde::Serialize;

use crate::auth::MaybeSessionUser;
use crate::flash::{flash_removal, FlashMessages};
use crate::models::{Category, WordEntry};

#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub view: &'static str,
    pub flash: Vec<String>,
    pub user: Option<String>,
    #[serde(flatten)]
    pub body: T,
}

/// Pages without data of their own (forms).
#[derive(Debug, Serialize)]
pub struct Empty {}

#[derive(Debug, Serialize)]
pub struct CatalogBody {
    pub entries: Vec<WordEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EntryBody {
    pub entry: WordEntry,
}

#[derive(Debug, Serialize)]
pub struct EditBody {
    pub entry: WordEntry,
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
pub struct ProfileBody {
    pub username: String,
}

/// Renders a page and consumes the flash messages shown on it.
pub fn render<T: Serialize>(
    view: &'static str,
    flash: FlashMessages,
    user: MaybeSessionUser,
    body: T,
) -> HttpResponse {
    let mut response = HttpResponse::Ok();
    if flash.cookie_present() {
        response.cookie(flash_removal());
    }
    response.json(Page {
        view,
        flash: flash.into_inner(),
        user: user.0,
        body,
    })
}
