//! Server-rendered pages
//!
//! Minimal HTML surface for the browser: an index page listing posts with a
//! creation form, and a detail page per post. Field names (`title`, `body`)
//! and the "Posts" heading are part of the browser-visible contract the E2E
//! scenarios assert on.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use tracing::error;
use uuid::Uuid;

use inkpost_common::{Error, NewPost, Post};

use crate::server::AppState;

/// Page-level error: rendered as HTML, generic on internal failures.
#[derive(Debug)]
pub enum PageError {
    NotFound,
    EmptyTitle,
    Internal(Error),
}

impl From<Error> for PageError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound { .. } => Self::NotFound,
            other => Self::Internal(other),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound => (StatusCode::NOT_FOUND, "Post not found"),
            Self::EmptyTitle => (StatusCode::UNPROCESSABLE_ENTITY, "A title is required"),
            Self::Internal(err) => {
                error!(error = %err, "unhandled error while rendering page");
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")
            }
        };
        (status, Html(page_shell(message, &format!("<p>{}</p>", message)))).into_response()
    }
}

/// Build the page router.
pub fn page_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/posts", post(create_from_form))
        .route("/posts/:id", get(detail))
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let posts = state.store.list_posts()?;
    Ok(Html(render_index(&posts)))
}

async fn create_from_form(
    State(state): State<AppState>,
    Form(new_post): Form<NewPost>,
) -> Result<Redirect, PageError> {
    if new_post.title.trim().is_empty() {
        return Err(PageError::EmptyTitle);
    }
    state.store.insert_post(new_post)?;
    // Back to the index, where the new title shows up in the list.
    Ok(Redirect::to("/"))
}

async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, PageError> {
    let post = state.store.get_post(id)?;
    Ok(Html(render_detail(&post)))
}

fn render_index(posts: &[Post]) -> String {
    let mut items = String::new();
    for post in posts {
        items.push_str(&format!(
            r#"      <li><a href="/posts/{}">{}</a></li>
"#,
            post.id,
            escape_html(&post.title)
        ));
    }
    if items.is_empty() {
        items.push_str("      <li class=\"empty\">No posts yet</li>\n");
    }

    let body = format!(
        r#"    <h1>Posts</h1>
    <ul id="post-list">
{items}    </ul>
    <form id="new-post" method="post" action="/posts">
      <input name="title" placeholder="Title">
      <textarea name="body" placeholder="Write something"></textarea>
      <button type="submit">Publish</button>
    </form>
"#
    );
    page_shell("Posts", &body)
}

fn render_detail(post: &Post) -> String {
    let body = format!(
        r#"    <h1>{title}</h1>
    <article id="post-body">{body}</article>
    <p><a href="/">Back to Posts</a></p>
"#,
        title = escape_html(&post.title),
        body = escape_html(&post.body)
    );
    page_shell(&post.title, &body)
}

fn page_shell(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>{title} - Inkpost</title>
  </head>
  <body>
{body}  </body>
</html>
"#,
        title = escape_html(title),
        body = body
    )
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
