use std::sync::{Arc, Mutex};

use iron::modifiers::RedirectRaw;
use iron::{status, Handler, IronResult, Request, Response};
use log::{debug, error, info, warn};
use router::Router;

use crate::database::Database;
use crate::middleware::decode_form;
use crate::model::PostId;
use crate::views::{self, CreatePage, EditPage, IndexPage, NotFoundPage, PostPage};

/// Match a `Result` into its inner value or
/// return `500 Internal Server Error`,
/// or some other provided error using the second variant of this macro.
macro_rules! try_handler {
    ( $e:expr ) => {
        match $e {
            Ok(x) => x,
            Err(e) => return Ok(views::plain_text(status::InternalServerError, e.to_string()))
        }
    };
    ( $e:expr, $error:expr ) => {
        match $e {
            Ok(x) => x,
            Err(e) => return Ok(views::plain_text($error, e.to_string()))
        }
    }
}

/// Lock a `Mutex`. This macro simply calls `m.lock().unwrap()`,
/// because the thread should panic if the lock can not be obtained:
/// we cannot recover from that.
macro_rules! lock {
    ( $e:expr ) => { $e.lock().unwrap() }
}

/// Get the value of a parameter in the URI.
/// If the parameter was absent, return `400 Bad Request`.
/// If we could not obtain the parameter list, return `500 Internal Server Error`.
macro_rules! get_http_param {
    ( $r:expr, $e:expr ) => {
        match $r.extensions.get::<Router>() {
            Some(router) => {
                match router.find($e) {
                    Some(val) => val,
                    None => return Ok(views::plain_text(status::BadRequest, format!("missing parameter {}", $e))),
                }
            }
            None => return Ok(views::plain_text(status::InternalServerError, "no route parameters".to_string())),
        }
    }
}

/// Parse the `:id` parameter into a `PostId`, or return `400 Bad Request`.
macro_rules! get_post_id {
    ( $r:expr ) => {
        try_handler!(get_http_param!($r, "id").parse::<PostId>(), status::BadRequest)
    }
}

/// Fields submitted by the create and edit forms. Missing fields are empty,
/// a repeated field keeps its last value and unknown fields are ignored.
#[derive(Debug, Default, PartialEq)]
struct PostForm {
    title: String,
    content: String,
}

impl PostForm {
    fn from_pairs(pairs: Vec<(String, String)>) -> PostForm {
        let mut form = PostForm::default();
        for (key, value) in pairs {
            match key.as_str() {
                "title" => form.title = value,
                "content" => form.content = value,
                _ => {}
            }
        }
        form
    }

    /// Never fails: a body that does not decode reads as an empty form.
    fn from_request(req: &Request) -> PostForm {
        PostForm::from_pairs(decode_form(req).unwrap_or_default())
    }
}

fn redirect(path: String) -> Response {
    Response::with((status::Found, RedirectRaw(path)))
}

fn post_not_found(id: PostId) -> Response {
    warn!("no post with id {}", id);
    let page = NotFoundPage {
        message: format!("There is no post with id {}.", id),
    };
    views::render(&page, status::NotFound)
}

pub struct Handlers {
    pub index: IndexHandler,
    pub new_post: NewPostHandler,
    pub create_post: CreatePostHandler,
    pub show_post: ShowPostHandler,
    pub edit_post: EditPostHandler,
    pub update_post: UpdatePostHandler,
    pub delete_post: DeletePostHandler,
}

impl Handlers {
    pub fn new(database: Arc<Mutex<Database>>) -> Handlers {
        Handlers {
            index: IndexHandler::new(database.clone()),
            new_post: NewPostHandler,
            create_post: CreatePostHandler::new(database.clone()),
            show_post: ShowPostHandler::new(database.clone()),
            edit_post: EditPostHandler::new(database.clone()),
            update_post: UpdatePostHandler::new(database.clone()),
            delete_post: DeletePostHandler::new(database),
        }
    }
}

pub struct IndexHandler {
    database: Arc<Mutex<Database>>,
}

impl IndexHandler {
    fn new(database: Arc<Mutex<Database>>) -> IndexHandler {
        IndexHandler { database: database }
    }
}

impl Handler for IndexHandler {
    fn handle(&self, _: &mut Request) -> IronResult<Response> {
        let database = lock!(self.database);
        debug!("listing {} posts", database.len());
        Ok(views::render(&IndexPage { posts: database.posts() }, status::Ok))
    }
}

pub struct NewPostHandler;

impl Handler for NewPostHandler {
    fn handle(&self, _: &mut Request) -> IronResult<Response> {
        Ok(views::render(&CreatePage, status::Ok))
    }
}

pub struct CreatePostHandler {
    database: Arc<Mutex<Database>>,
}

impl CreatePostHandler {
    fn new(database: Arc<Mutex<Database>>) -> CreatePostHandler {
        CreatePostHandler { database: database }
    }
}

impl Handler for CreatePostHandler {
    fn handle(&self, req: &mut Request) -> IronResult<Response> {
        let form = PostForm::from_request(req);

        let post = match lock!(self.database).add_post(&form.title, &form.content) {
            Some(post) => post,
            None => {
                error!("no post ids left");
                return Ok(views::plain_text(
                    status::InternalServerError,
                    "no post ids left".to_string(),
                ));
            }
        };
        info!("created post {}", post.id());

        Ok(redirect("/".to_string()))
    }
}

pub struct ShowPostHandler {
    database: Arc<Mutex<Database>>,
}

impl ShowPostHandler {
    fn new(database: Arc<Mutex<Database>>) -> ShowPostHandler {
        ShowPostHandler { database: database }
    }
}

impl Handler for ShowPostHandler {
    fn handle(&self, req: &mut Request) -> IronResult<Response> {
        let id = get_post_id!(req);

        let database = lock!(self.database);
        match database.find_post(id) {
            Some(post) => Ok(views::render(&PostPage { post: post }, status::Ok)),
            None => Ok(post_not_found(id)),
        }
    }
}

pub struct EditPostHandler {
    database: Arc<Mutex<Database>>,
}

impl EditPostHandler {
    fn new(database: Arc<Mutex<Database>>) -> EditPostHandler {
        EditPostHandler { database: database }
    }
}

impl Handler for EditPostHandler {
    fn handle(&self, req: &mut Request) -> IronResult<Response> {
        let id = get_post_id!(req);

        let database = lock!(self.database);
        match database.find_post(id) {
            Some(post) => Ok(views::render(&EditPage { post: post }, status::Ok)),
            None => Ok(post_not_found(id)),
        }
    }
}

pub struct UpdatePostHandler {
    database: Arc<Mutex<Database>>,
}

impl UpdatePostHandler {
    fn new(database: Arc<Mutex<Database>>) -> UpdatePostHandler {
        UpdatePostHandler { database: database }
    }
}

impl Handler for UpdatePostHandler {
    fn handle(&self, req: &mut Request) -> IronResult<Response> {
        let id = get_post_id!(req);
        let form = PostForm::from_request(req);

        if lock!(self.database).update_post(id, &form.title, &form.content).is_none() {
            return Ok(post_not_found(id));
        }
        info!("updated post {}", id);

        Ok(redirect(format!("/posts/{}", id)))
    }
}

pub struct DeletePostHandler {
    database: Arc<Mutex<Database>>,
}

impl DeletePostHandler {
    fn new(database: Arc<Mutex<Database>>) -> DeletePostHandler {
        DeletePostHandler { database: database }
    }
}

impl Handler for DeletePostHandler {
    fn handle(&self, req: &mut Request) -> IronResult<Response> {
        let id = get_post_id!(req);

        if lock!(self.database).remove_post(id) {
            info!("deleted post {}", id);
        } else {
            debug!("delete of unknown post {} ignored", id);
        }

        Ok(redirect("/".to_string()))
    }
}
