use std::sync::Arc;

use axum::{extract::State, response::{Html, Redirect}, Form};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::info;

use service::{accounts::repo::JsonAccountRepository, ContactBook};

use crate::errors::WebError;
use crate::session::{clear_session, session_cookie};
use crate::views;

#[derive(Clone)]
pub struct ServerState {
    pub book: Arc<ContactBook<JsonAccountRepository>>,
}

/// Body of the register and login forms.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

pub async fn register_form() -> Html<String> {
    Html(views::register_page())
}

pub async fn register(
    State(state): State<ServerState>,
    Form(input): Form<CredentialsForm>,
) -> Result<Redirect, WebError> {
    if !state.book.register(&input.username, &input.password).await? {
        return Err(WebError::UserExists);
    }
    Ok(Redirect::to("/login"))
}

pub async fn login_form() -> Html<String> {
    Html(views::login_page())
}

pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Form(input): Form<CredentialsForm>,
) -> Result<(CookieJar, Redirect), WebError> {
    let session = state.book.accounts.login(&input.username, &input.password).await?;
    info!(username = %session.username, "user_logged_in");
    Ok((jar.add(session_cookie(session.token)), Redirect::to("/")))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (clear_session(jar), Redirect::to("/login"))
}
