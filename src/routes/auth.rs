use actix_web::{get, post, route, web, HttpResponse};
use validator::Validate;

use super::views::{render, Empty, ProfileBody};
use crate::{
    auth::{AuthService, LoginForm, MaybeSessionUser, RegisterForm, SessionToken, SessionUser},
    error::AppError,
    flash::{flash, redirect, redirect_with_flash, FlashMessages},
    models::normalize_username,
};

pub const REGISTERED: &str = "Registration Successful - Welcome Aboard!";
pub const LOGGED_OUT: &str = "You're logged out, ye lubber";

fn profile_path(username: &str) -> String {
    format!("/profile/{}", urlencoding::encode(username))
}

/// Sets the session cookie and sends the user to their profile.
fn signed_in(auth: &AuthService, session: SessionToken, message: String) -> HttpResponse {
    redirect(&profile_path(&session.username))
        .cookie(auth.keys().session_cookie(session.token))
        .cookie(flash(message))
        .finish()
}

/// First validation message of a form, for the flash.
fn first_problem(errors: validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Please fill in every field".to_string())
}

#[get("/register")]
pub async fn register_form(messages: FlashMessages, user: MaybeSessionUser) -> HttpResponse {
    render("register", messages, user, Empty {})
}

/// Creates an account, then logs the new user in.
///
/// A taken username (compared case-insensitively) sends the visitor back to
/// the form with a flash message.
#[post("/register")]
pub async fn register(
    auth: web::Data<AuthService>,
    form: web::Form<RegisterForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(errors) = form.validate() {
        return Ok(redirect_with_flash("/register", first_problem(errors)));
    }

    match auth.register(&form.username, &form.password).await {
        Ok(session) => Ok(signed_in(&auth, session, REGISTERED.to_string())),
        Err(AppError::DuplicateUsername) => Ok(redirect_with_flash(
            "/register",
            AppError::DuplicateUsername.to_string(),
        )),
        Err(AppError::ValidationError(msg)) => Ok(redirect_with_flash("/register", msg)),
        Err(other) => Err(other),
    }
}

#[get("/login")]
pub async fn login_form(messages: FlashMessages, user: MaybeSessionUser) -> HttpResponse {
    render("login", messages, user, Empty {})
}

/// Authenticates and logs the user in.
///
/// Unknown user and wrong password produce the same flash message.
#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(errors) = form.validate() {
        return Ok(redirect_with_flash("/login", first_problem(errors)));
    }

    match auth.login(&form.username, &form.password).await {
        Ok(session) => {
            let welcome = format!("Welcome, {}", form.username.trim());
            Ok(signed_in(&auth, session, welcome))
        }
        Err(AppError::InvalidCredentials) => Ok(redirect_with_flash(
            "/login",
            AppError::InvalidCredentials.to_string(),
        )),
        Err(other) => Err(other),
    }
}

/// The session user's profile. Visiting anyone else's profile redirects to login.
#[route("/profile/{username}", method = "GET", method = "POST")]
pub async fn profile(
    auth: web::Data<AuthService>,
    path: web::Path<String>,
    session: SessionUser,
    messages: FlashMessages,
) -> Result<HttpResponse, AppError> {
    if normalize_username(&path) != session.0 {
        return Ok(redirect("/login").finish());
    }

    match auth.current_user(&session.0).await? {
        Some(user) => Ok(render(
            "profile",
            messages,
            MaybeSessionUser(Some(session.0)),
            ProfileBody {
                username: user.username,
            },
        )),
        None => {
            // The account behind a still-valid token is gone.
            Ok(redirect("/login")
                .cookie(auth.keys().removal_cookie())
                .cookie(flash(LOGGED_OUT))
                .finish())
        }
    }
}

#[get("/logout")]
pub async fn logout(auth: web::Data<AuthService>, user: MaybeSessionUser) -> HttpResponse {
    auth.logout(user.0.as_deref());
    redirect("/login")
        .cookie(auth.keys().removal_cookie())
        .cookie(flash(LOGGED_OUT))
        .finish()
}
