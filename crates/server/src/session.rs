use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::routes::auth::ServerState;

pub const SESSION_COOKIE: &str = "session";

/// Username of the logged-in user, placed in request extensions by
/// [`require_session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser(pub String);

pub fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

pub fn clear_session(jar: CookieJar) -> CookieJar {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    jar.remove(cookie)
}

/// Middleware: resolve the session cookie to a username or redirect to `/login`.
/// A missing, forged or expired token counts as logged out.
pub async fn require_session(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    let Some(token) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) else {
        tracing::debug!(%path, "no session cookie");
        return Redirect::to("/login").into_response();
    };
    match state.book.accounts.verify_session(&token) {
        Ok(username) => {
            req.extensions_mut().insert(SessionUser(username));
            next.run(req).await
        }
        Err(e) => {
            tracing::warn!(%path, err = %e, "session validation failed");
            (clear_session(jar), Redirect::to("/login")).into_response()
        }
    }
}
