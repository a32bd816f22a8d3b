use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::SessionKeys;
use crate::error::AppError;
use crate::flash::redirect_with_flash;

/// Paths that require a logged-in session.
const PROTECTED_PREFIXES: [&str; 4] = ["/profile", "/add_word", "/edit_word", "/delete_word"];

pub const LOGIN_REQUIRED: &str = "Please log in first";

/// Verifies the session cookie on every request.
///
/// Valid claims are inserted into the request extensions for the
/// `SessionUser` / `MaybeSessionUser` extractors. Requests to protected paths
/// without a valid session are redirected to `/login`.
pub struct SessionMiddleware;

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SessionMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService { service }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: S,
}

fn is_protected(path: &str) -> bool {
    PROTECTED_PREFIXES
        .iter()
        .any(|prefix| path == *prefix || path.starts_with(&format!("{}/", prefix)))
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let claims = match req.app_data::<web::Data<SessionKeys>>() {
            Some(keys) => keys.claims_from_request(req.request()),
            None => {
                let err = AppError::InternalServerError("Session keys are not configured".into());
                return Box::pin(async move { Err(err.into()) });
            }
        };

        match claims {
            Some(claims) => {
                req.extensions_mut().insert(claims);
            }
            // Routing matches the percent-decoded path, so the check does too.
            None if is_protected(req.match_info().as_str()) => {
                log::debug!("No session for protected path {}", req.match_info().as_str());
                let (request, _payload) = req.into_parts();
                let response = redirect_with_flash("/login", LOGIN_REQUIRED).map_into_right_body();
                return Box::pin(async move { Ok(ServiceResponse::new(request, response)) });
            }
            None => {}
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}
