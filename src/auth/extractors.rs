use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::convert::Infallible;
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// The logged-in user's username, taken from the claims `SessionMiddleware`
/// placed in the request extensions.
///
/// Fails with `AppError::Unauthorized` when there is no session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser(pub String);

impl FromRequest for SessionUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(SessionUser(claims.sub.clone()))),
            None => {
                let err = AppError::Unauthorized("No active session".to_string());
                ready(Err(err.into()))
            }
        }
    }
}

/// Like [`SessionUser`] but never fails; `None` for anonymous visitors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaybeSessionUser(pub Option<String>);

impl FromRequest for MaybeSessionUser {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let username = req.extensions().get::<Claims>().map(|c| c.sub.clone());
        ready(Ok(MaybeSessionUser(username)))
    }
}
