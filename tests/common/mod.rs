#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::test;
use std::sync::Arc;
use wordbook::auth::{SessionKeys, SESSION_COOKIE};
use wordbook::flash::FLASH_COOKIE;
use wordbook::store::MemoryStore;
use wordbook::AppState;

pub const TEST_SECRET: &str = "integration-secret";

/// App state over a fresh in-memory store with a couple of categories.
pub fn test_state() -> AppState {
    let store = MemoryStore::with_categories(["Slang", "Nautical", "Adjective"]);
    // Minimum bcrypt cost keeps the suite fast.
    AppState::new(Arc::new(store), SessionKeys::new(TEST_SECRET, 24), 4)
}

/// Builds the full application the way `main` does.
macro_rules! test_app {
    ($state:expr) => {{
        let state: wordbook::AppState = $state;
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(wordbook::auth::SessionMiddleware)
                .wrap(actix_web::middleware::Logger::default())
                .configure(move |cfg| state.configure(cfg))
                .configure(wordbook::routes::config),
        )
        .await
    }};
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub fn cookie_named<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}

pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    cookie_named(resp, SESSION_COOKIE).filter(|c| !c.value().is_empty())
}

pub fn flash_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    cookie_named(resp, FLASH_COOKIE).filter(|c| !c.value().is_empty())
}

pub async fn get<S, B>(app: &S, uri: &str, cookies: &[Cookie<'static>]) -> ServiceResponse<B>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let mut req = test::TestRequest::get().uri(uri);
    for cookie in cookies {
        req = req.cookie(cookie.clone());
    }
    test::call_service(app, req.to_request()).await
}

pub async fn post_form<S, B>(
    app: &S,
    uri: &str,
    form: &[(&str, &str)],
    cookies: &[Cookie<'static>],
) -> ServiceResponse<B>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let mut req = test::TestRequest::post().uri(uri).set_form(form);
    for cookie in cookies {
        req = req.cookie(cookie.clone());
    }
    test::call_service(app, req.to_request()).await
}

/// Follows a flash redirect and returns the rendered view as JSON.
pub async fn follow<S, B>(
    app: &S,
    resp: ServiceResponse<B>,
    session: &[Cookie<'static>],
) -> serde_json::Value
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let target = location(&resp);
    let mut cookies = session.to_vec();
    if let Some(flash) = flash_cookie(&resp) {
        cookies.push(flash);
    }
    let page = get(app, &target, &cookies).await;
    assert_eq!(page.status(), 200, "expected a view at {}", target);
    test::read_body_json(page).await
}

/// Registers a user and returns the session cookie.
pub async fn register_user<S, B>(app: &S, username: &str, password: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = post_form(
        app,
        "/register",
        &[("username", username), ("password", password)],
        &[],
    )
    .await;
    assert_eq!(resp.status(), 303);
    session_cookie(&resp).expect("registration should set a session cookie")
}
