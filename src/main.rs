extern crate iron;
extern crate router;
extern crate logger;
extern crate urlencoded;
#[macro_use]
extern crate log;
extern crate env_logger;

mod model;
mod store;
mod handlers;
mod views;

use store::PostStore;
use handlers::*;

use iron::prelude::Chain;
use iron::Iron;
use router::Router;
use logger::Logger;

// RUST_LOG=info calliope > logs 2>&1 &
fn main() {
    env_logger::init();
    let (logger_before, logger_after) = Logger::new(None);

    let store = PostStore::new();
    let handlers = Handlers::new(store);
    let method_override_middleware = MethodOverride;
    let html_content_middleware = HtmlAfterMiddleware;

    let mut router = Router::new();
    router.get("/", handlers.index, "index");
    router.get("/posts/new", handlers.new_post, "new_post");
    router.post("/posts", handlers.create_post, "create_post");
    router.get("/posts/:id/edit", handlers.edit_post, "edit_post");
    router.put("/posts/:id", handlers.update_post, "update_post");
    router.delete("/posts/:id", handlers.delete_post, "delete_post");

    let mut chain = Chain::new(router);
    chain.link_before(logger_before); // Should be first!
    chain.link_before(method_override_middleware); // Must run before routing.
    chain.link_after(html_content_middleware);
    chain.link_after(logger_after); // Should be last!

    info!("Blog app listening on port 3000");
    Iron::new(chain).http("localhost:3000").unwrap();
}
