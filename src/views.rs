//! Compiled HTML pages. Templates live in `templates/` and are escaped as HTML.

use askama::Template;
use iron::headers::ContentType;
use iron::modifiers::Header;
use iron::status::{self, Status};
use iron::Response;

use crate::model::Post;

/// Render `page` into a response with the given status, or a plain 500 when
/// the template fails.
pub fn render<T: Template>(page: &T, code: Status) -> Response {
    match page.render() {
        Ok(html) => Response::with((code, html)),
        Err(e) => plain_text(status::InternalServerError, e.to_string()),
    }
}

/// A bare text response for errors that have no page of their own.
pub fn plain_text(code: Status, message: String) -> Response {
    Response::with((code, Header(ContentType::plaintext()), message))
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage<'a> {
    pub posts: &'a [Post],
}

#[derive(Template)]
#[template(path = "create.html")]
pub struct CreatePage;

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostPage<'a> {
    pub post: &'a Post,
}

#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditPage<'a> {
    pub post: &'a Post,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundPage {
    pub message: String,
}
