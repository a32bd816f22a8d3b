//! One-time messages carried across a redirect.
//!
//! A redirecting handler attaches a `flash` cookie; the next rendered view
//! reads it through the [`FlashMessages`] extractor and clears it.

use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, HttpResponseBuilder};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::convert::Infallible;
use std::future::{ready, Ready};

pub const FLASH_COOKIE: &str = "flash";

/// Messages left for this request by the previous redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlashMessages {
    messages: Vec<String>,
    cookie_present: bool,
}

impl FlashMessages {
    pub fn new(messages: Vec<String>) -> Self {
        Self {
            cookie_present: true,
            messages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether the request carried a `flash` cookie, readable or not.
    pub fn cookie_present(&self) -> bool {
        self.cookie_present
    }

    pub fn into_inner(self) -> Vec<String> {
        self.messages
    }

    /// An unreadable cookie yields no messages but still counts as present.
    fn decode(value: &str) -> Self {
        let messages = URL_SAFE_NO_PAD
            .decode(value)
            .ok()
            .and_then(|bytes| serde_json::from_slice::<Vec<String>>(&bytes).ok())
            .unwrap_or_default();
        Self::new(messages)
    }
}

impl FromRequest for FlashMessages {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let messages = req
            .cookie(FLASH_COOKIE)
            .map(|cookie| FlashMessages::decode(cookie.value()))
            .unwrap_or_default();
        ready(Ok(messages))
    }
}

/// A cookie carrying `message` to the next rendered view.
pub fn flash(message: impl Into<String>) -> Cookie<'static> {
    let payload = serde_json::to_vec(&[message.into()]).unwrap_or_default();
    Cookie::build(FLASH_COOKIE, URL_SAFE_NO_PAD.encode(payload))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

/// A cookie that discards consumed flash messages.
pub fn flash_removal() -> Cookie<'static> {
    let mut cookie = Cookie::build(FLASH_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// A `303 See Other` response builder pointing at `location`.
pub fn redirect(location: &str) -> HttpResponseBuilder {
    let mut builder = HttpResponse::SeeOther();
    builder.insert_header((header::LOCATION, location.to_string()));
    builder
}

/// Shorthand for the common "flash, then redirect" response.
pub fn redirect_with_flash(location: &str, message: impl Into<String>) -> HttpResponse {
    redirect(location).cookie(flash(message)).finish()
}
