use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    response::{Html, Redirect},
    Extension, Form,
};
use serde::Deserialize;

use service::contacts::{service::ListOptions, ContactInput};

use super::auth::ServerState;
use crate::errors::WebError;
use crate::session::SessionUser;
use crate::views;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub q: Option<String>,
    /// `name` sorts by name, `none` keeps stored order; absent uses the configured default.
    #[serde(default)]
    pub sort: Option<String>,
}

impl ListQuery {
    fn sort_by_name(&self) -> Option<bool> {
        match self.sort.as_deref() {
            Some("name") => Some(true),
            Some("none") => Some(false),
            _ => None,
        }
    }
}

type IndexParam = Result<Path<usize>, PathRejection>;

/// A position that is not a non-negative integer names no contact.
fn position(param: IndexParam) -> Result<usize, WebError> {
    param.map(|Path(index)| index).map_err(|_| WebError::InvalidIndex)
}

pub async fn index(
    State(state): State<ServerState>,
    Extension(SessionUser(username)): Extension<SessionUser>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, WebError> {
    let opts = ListOptions { query: query.q.clone(), sort_by_name: query.sort_by_name() };
    let contacts = state.book.contacts.list(&username, &opts).await?;
    Ok(Html(views::home_page(
        &username,
        &contacts,
        query.q.as_deref().unwrap_or_default(),
        query.sort_by_name() == Some(true),
    )))
}

pub async fn add_form() -> Html<String> {
    Html(views::contact_form_page("Add contact", "/add", &ContactInput::default()))
}

pub async fn add(
    State(state): State<ServerState>,
    Extension(SessionUser(username)): Extension<SessionUser>,
    Form(input): Form<ContactInput>,
) -> Result<Redirect, WebError> {
    state.book.contacts.add(&username, input).await?;
    Ok(Redirect::to("/"))
}

pub async fn edit_form(
    State(state): State<ServerState>,
    Extension(SessionUser(username)): Extension<SessionUser>,
    index: IndexParam,
) -> Result<Html<String>, WebError> {
    let index = position(index)?;
    let contact = state.book.contacts.get(&username, index).await?;
    Ok(Html(views::contact_form_page(
        "Edit contact",
        &format!("/edit/{index}"),
        &ContactInput::from(&contact),
    )))
}

pub async fn edit(
    State(state): State<ServerState>,
    Extension(SessionUser(username)): Extension<SessionUser>,
    index: IndexParam,
    Form(input): Form<ContactInput>,
) -> Result<Redirect, WebError> {
    let index = position(index)?;
    state.book.contacts.update(&username, index, input).await?;
    Ok(Redirect::to("/"))
}

pub async fn delete(
    State(state): State<ServerState>,
    Extension(SessionUser(username)): Extension<SessionUser>,
    index: IndexParam,
) -> Result<Redirect, WebError> {
    let index = position(index)?;
    state.book.contacts.delete(&username, index).await?;
    Ok(Redirect::to("/"))
}
