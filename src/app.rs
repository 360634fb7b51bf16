use std::sync::{Arc, Mutex};

use iron::prelude::Chain;
use logger::Logger;
use mount::Mount;
use router::Router;
use staticfile::Static;

use crate::config::Config;
use crate::database::Database;
use crate::handlers::Handlers;
use crate::middleware::{FormBodyParser, HtmlAfterMiddleware, MethodOverride, NotFoundCatcher};

pub fn router(handlers: Handlers) -> Router {
    let mut router = Router::new();
    router.get("/", handlers.index, "index");
    router.get("/posts/new", handlers.new_post, "new_post");
    router.post("/posts", handlers.create_post, "create_post");
    router.get("/posts/:id", handlers.show_post, "show_post");
    router.get("/posts/:id/edit", handlers.edit_post, "edit_post");
    router.put("/posts/:id", handlers.update_post, "update_post");
    router.delete("/posts/:id", handlers.delete_post, "delete_post");
    router
}

/// The blog pages, without request logging or static files.
pub fn chain(database: Arc<Mutex<Database>>) -> Chain {
    let mut chain = Chain::new(router(Handlers::new(database)));
    chain.link_before(FormBodyParser);
    chain.link_before(MethodOverride); // Needs the parsed form body.
    chain.link_after(NotFoundCatcher);
    chain.link_after(HtmlAfterMiddleware);
    chain
}

/// Everything the listener serves: the blog pages plus the public assets.
pub fn server(config: &Config, database: Arc<Mutex<Database>>) -> Chain {
    let (logger_before, logger_after) = Logger::new(None);

    let mut mount = Mount::new();
    mount
        .mount("/", chain(database))
        .mount(&config.assets_mount, Static::new(&config.public_dir));

    let mut server = Chain::new(mount);
    server.link_before(logger_before); // Should be first!
    server.link_after(logger_after); // Should be last!
    server
}
