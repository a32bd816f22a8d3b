use actix_web::{get, post, route, web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::views::{render, CatalogBody, EditBody, Empty, EntryBody};
use crate::{
    auth::{MaybeSessionUser, SessionUser},
    catalog::Catalog,
    error::AppError,
    flash::{redirect_with_flash, FlashMessages},
    models::WordFields,
};

pub const CATALOG_PATH: &str = "/get_defs";

pub const WORD_ADDED: &str = "Word successfully Added!";
pub const WORD_EDITED: &str = "Word Successfully Edited!";
pub const WORD_DELETED: &str = "Word Deleted";
pub const WORD_NOT_FOUND: &str = "That word no longer exists";
pub const CATALOG_EMPTY: &str = "There are no words yet. Add the first one!";

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    pub query: Option<String>,
}

fn invalid_fields(errors: validator::ValidationErrors) -> String {
    let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    fields.sort_unstable();
    format!("Please fill in: {}", fields.join(", "))
}

/// The full catalog. Served at `/` and `/get_defs`.
pub async fn get_defs(
    catalog: web::Data<Catalog>,
    messages: FlashMessages,
    user: MaybeSessionUser,
) -> Result<HttpResponse, AppError> {
    let entries = catalog.list_all().await?;
    Ok(render(
        "catalog",
        messages,
        user,
        CatalogBody {
            entries,
            query: None,
        },
    ))
}

async fn run_search(
    catalog: &Catalog,
    form: SearchForm,
    messages: FlashMessages,
    user: MaybeSessionUser,
) -> Result<HttpResponse, AppError> {
    let query = form.query.unwrap_or_default();
    let entries = catalog.search(&query).await?;
    Ok(render(
        "catalog",
        messages,
        user,
        CatalogBody {
            entries,
            query: Some(query),
        },
    ))
}

/// Full-text search from a query string (`/search?query=...`).
#[get("/search")]
pub async fn search_get(
    catalog: web::Data<Catalog>,
    form: web::Query<SearchForm>,
    messages: FlashMessages,
    user: MaybeSessionUser,
) -> Result<HttpResponse, AppError> {
    run_search(&catalog, form.into_inner(), messages, user).await
}

/// Full-text search from the search form.
#[post("/search")]
pub async fn search_post(
    catalog: web::Data<Catalog>,
    form: web::Form<SearchForm>,
    messages: FlashMessages,
    user: MaybeSessionUser,
) -> Result<HttpResponse, AppError> {
    run_search(&catalog, form.into_inner(), messages, user).await
}

/// One entry picked at random. An empty catalog redirects back with a notice.
#[route("/random", method = "GET", method = "POST")]
pub async fn random(
    catalog: web::Data<Catalog>,
    messages: FlashMessages,
    user: MaybeSessionUser,
) -> Result<HttpResponse, AppError> {
    match catalog.random_entry().await {
        Ok(entry) => Ok(render("random", messages, user, EntryBody { entry })),
        Err(AppError::EmptyCatalog) => Ok(redirect_with_flash(CATALOG_PATH, CATALOG_EMPTY)),
        Err(other) => Err(other),
    }
}

#[get("/add_word")]
pub async fn add_word_form(session: SessionUser, messages: FlashMessages) -> HttpResponse {
    render("add_word", messages, MaybeSessionUser(Some(session.0)), Empty {})
}

#[post("/add_word")]
pub async fn add_word(
    catalog: web::Data<Catalog>,
    session: SessionUser,
    form: web::Form<WordFields>,
) -> Result<HttpResponse, AppError> {
    if let Err(errors) = form.validate() {
        return Ok(redirect_with_flash("/add_word", invalid_fields(errors)));
    }

    catalog.add(&form, &session.0).await?;
    Ok(redirect_with_flash(CATALOG_PATH, WORD_ADDED))
}

/// The edit form, pre-filled with the entry and the category list.
#[get("/edit_word/{id}")]
pub async fn edit_word_form(
    catalog: web::Data<Catalog>,
    path: web::Path<Uuid>,
    session: SessionUser,
    messages: FlashMessages,
) -> Result<HttpResponse, AppError> {
    let entry = match catalog.get(path.into_inner()).await {
        Ok(entry) => entry,
        Err(AppError::NotFound(_)) => return Ok(redirect_with_flash(CATALOG_PATH, WORD_NOT_FOUND)),
        Err(other) => return Err(other),
    };
    let categories = catalog.categories().await?;

    Ok(render(
        "edit_word",
        messages,
        MaybeSessionUser(Some(session.0)),
        EditBody { entry, categories },
    ))
}

/// Replaces every field of the entry; the editor becomes `created_by`.
#[post("/edit_word/{id}")]
pub async fn edit_word(
    catalog: web::Data<Catalog>,
    path: web::Path<Uuid>,
    session: SessionUser,
    form: web::Form<WordFields>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    if let Err(errors) = form.validate() {
        return Ok(redirect_with_flash(
            &format!("/edit_word/{}", id),
            invalid_fields(errors),
        ));
    }

    match catalog.edit(id, &form, &session.0).await {
        Ok(_) => Ok(redirect_with_flash(CATALOG_PATH, WORD_EDITED)),
        Err(AppError::NotFound(_)) => Ok(redirect_with_flash(CATALOG_PATH, WORD_NOT_FOUND)),
        Err(other) => Err(other),
    }
}

#[get("/delete_word/{id}")]
pub async fn delete_word(
    catalog: web::Data<Catalog>,
    path: web::Path<Uuid>,
    session: SessionUser,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    match catalog.delete(id).await {
        Ok(()) => {
            log::info!("{} deleted word {}", session.0, id);
            Ok(redirect_with_flash(CATALOG_PATH, WORD_DELETED))
        }
        Err(AppError::NotFound(_)) => Ok(redirect_with_flash(CATALOG_PATH, WORD_NOT_FOUND)),
        Err(other) => Err(other),
    }
}
