//! The session cookie: where the signed token travels between requests.

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::HttpRequest;

use super::token::{Claims, SessionKeys};

pub const SESSION_COOKIE: &str = "session";

impl SessionKeys {
    /// Wraps a signed token in the HttpOnly session cookie.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, token)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookie())
            .max_age(Duration::seconds(self.ttl().num_seconds()))
            .finish()
    }

    /// A cookie that makes the browser drop the session.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(SESSION_COOKIE, "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookie())
            .finish();
        cookie.make_removal();
        cookie
    }

    /// Claims of the request's session cookie, if it carries a valid token.
    pub fn claims_from_request(&self, req: &HttpRequest) -> Option<Claims> {
        let cookie = req.cookie(SESSION_COOKIE)?;
        match self.verify(cookie.value()) {
            Ok(claims) => Some(claims),
            Err(err) => {
                log::debug!("Ignoring session cookie: {}", err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[actix_rt::test]
    async fn test_session_cookie_attributes() {
        let keys = SessionKeys::new("secret", 24).with_secure_cookie(true);
        let cookie = keys.session_cookie("token".to_string());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[actix_rt::test]
    async fn test_claims_from_request() {
        let keys = SessionKeys::new("secret", 24);
        let token = keys.issue("ada").unwrap();

        let req = test::TestRequest::default()
            .cookie(keys.session_cookie(token))
            .to_http_request();
        assert_eq!(keys.claims_from_request(&req).map(|c| c.sub), Some("ada".to_string()));

        let tampered = test::TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, "ada"))
            .to_http_request();
        assert!(keys.claims_from_request(&tampered).is_none());

        let missing = test::TestRequest::default().to_http_request();
        assert!(keys.claims_from_request(&missing).is_none());
    }
}
