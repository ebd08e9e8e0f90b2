use std::sync::{Arc, Mutex};
use iron::{status, AfterMiddleware, BeforeMiddleware, Handler, IronResult, Request, Response};
use iron::headers::{ContentType, Location};
use iron::method::Method;
use iron::prelude::*;
use urlencoded::{UrlEncodedBody, UrlEncodedQuery};
use router::Router;
use model::PostId;
use store::PostStore;
use views;

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
                    None => return Ok(Response::with(status::BadRequest)),
                }
            }
            None => return Ok(Response::with(status::InternalServerError)),
        }
    }
}

/// First value of a form field, or the empty string when the field is
/// absent. The store accepts whatever it is given, so the boundary stays
/// just as permissive.
fn first_or_empty(values: Option<&Vec<String>>) -> String {
    values
        .and_then(|values| values.first())
        .cloned()
        .unwrap_or_default()
}

/// Pull a field out of an urlencoded form body. A missing body altogether
/// reads the same as a missing field.
fn form_value(req: &mut Request, key: &str) -> String {
    let values = match req.get_ref::<UrlEncodedBody>() {
        Ok(form) => form.get(key),
        Err(_) => None,
    };
    first_or_empty(values)
}

/// 302 back to the front page, like the original app after every mutation.
fn redirect_to_index() -> IronResult<Response> {
    let mut response = Response::with(status::Found);
    response.headers.set(Location("/".to_string()));
    Ok(response)
}

pub struct Handlers {
    pub index: IndexHandler,
    pub new_post: NewPostHandler,
    pub create_post: CreatePostHandler,
    pub edit_post: EditPostHandler,
    pub update_post: UpdatePostHandler,
    pub delete_post: DeletePostHandler,
}

impl Handlers {
    pub fn new(store: PostStore) -> Handlers {
        let store = Arc::new(Mutex::new(store));
        Handlers {
            index: IndexHandler::new(store.clone()),
            new_post: NewPostHandler,
            create_post: CreatePostHandler::new(store.clone()),
            edit_post: EditPostHandler::new(store.clone()),
            update_post: UpdatePostHandler::new(store.clone()),
            delete_post: DeletePostHandler::new(store.clone()),
        }
    }
}

pub struct IndexHandler {
    store: Arc<Mutex<PostStore>>,
}

impl IndexHandler {
    fn new(store: Arc<Mutex<PostStore>>) -> IndexHandler {
        IndexHandler { store: store }
    }
}

impl Handler for IndexHandler {
    fn handle(&self, _: &mut Request) -> IronResult<Response> {
        let page = views::index(lock!(self.store).all());
        Ok(Response::with((status::Ok, page)))
    }
}

/// The creation form needs nothing from the store.
pub struct NewPostHandler;

impl Handler for NewPostHandler {
    fn handle(&self, _: &mut Request) -> IronResult<Response> {
        Ok(Response::with((status::Ok, views::new_post())))
    }
}

pub struct CreatePostHandler {
    store: Arc<Mutex<PostStore>>,
}

impl CreatePostHandler {
    fn new(store: Arc<Mutex<PostStore>>) -> CreatePostHandler {
        CreatePostHandler { store: store }
    }
}

impl Handler for CreatePostHandler {
    fn handle(&self, req: &mut Request) -> IronResult<Response> {
        let title = form_value(req, "title");
        let content = form_value(req, "content");

        lock!(self.store).create(&title, &content);

        redirect_to_index()
    }
}

pub struct EditPostHandler {
    store: Arc<Mutex<PostStore>>,
}

impl EditPostHandler {
    fn new(store: Arc<Mutex<PostStore>>) -> EditPostHandler {
        EditPostHandler { store: store }
    }
}

impl Handler for EditPostHandler {
    fn handle(&self, req: &mut Request) -> IronResult<Response> {
        let id = {
            let ref raw_id = get_http_param!(req, "id");
            match raw_id.parse::<PostId>() {
                Ok(id) => id,
                // A malformed id matches nothing, same as a missing post.
                Err(_) => return Ok(Response::with((status::NotFound, views::not_found()))),
            }
        };

        match lock!(self.store).get(id) {
            Some(post) => Ok(Response::with((status::Ok, views::edit_post(post)))),
            None => Ok(Response::with((status::NotFound, views::not_found()))),
        }
    }
}

pub struct UpdatePostHandler {
    store: Arc<Mutex<PostStore>>,
}

impl UpdatePostHandler {
    fn new(store: Arc<Mutex<PostStore>>) -> UpdatePostHandler {
        UpdatePostHandler { store: store }
    }
}

impl Handler for UpdatePostHandler {
    fn handle(&self, req: &mut Request) -> IronResult<Response> {
        let id = {
            let ref raw_id = get_http_param!(req, "id");
            match raw_id.parse::<PostId>() {
                Ok(id) => id,
                Err(_) => return redirect_to_index(),
            }
        };

        let title = form_value(req, "title");
        let content = form_value(req, "content");

        if !lock!(self.store).update(id, &title, &content) {
            warn!("update for missing post {}", id);
        }

        redirect_to_index()
    }
}

pub struct DeletePostHandler {
    store: Arc<Mutex<PostStore>>,
}

impl DeletePostHandler {
    fn new(store: Arc<Mutex<PostStore>>) -> DeletePostHandler {
        DeletePostHandler { store: store }
    }
}

impl Handler for DeletePostHandler {
    fn handle(&self, req: &mut Request) -> IronResult<Response> {
        let id = {
            let ref raw_id = get_http_param!(req, "id");
            match raw_id.parse::<PostId>() {
                Ok(id) => id,
                Err(_) => return redirect_to_index(),
            }
        };

        if !lock!(self.store).delete(id) {
            warn!("delete for missing post {}", id);
        }

        redirect_to_index()
    }
}

/// HTML forms can only GET and POST, so forms that mean PUT or DELETE
/// post with a `_method` override in the query string.
pub struct MethodOverride;

/// The method a request should be rewritten to, if any. Only POSTs are
/// eligible, and only the two methods the rendered forms ask for; anything
/// else leaves the request untouched.
fn overridden_method(method: &Method, requested: Option<&str>) -> Option<Method> {
    if *method != Method::Post {
        return None;
    }
    match requested {
        Some("PUT") => Some(Method::Put),
        Some("DELETE") => Some(Method::Delete),
        _ => None,
    }
}

impl BeforeMiddleware for MethodOverride {
    fn before(&self, req: &mut Request) -> IronResult<()> {
        let requested = match req.get_ref::<UrlEncodedQuery>() {
            Ok(query) => query.get("_method")
                .and_then(|values| values.first())
                .cloned(),
            Err(_) => None,
        };

        if let Some(method) = overridden_method(&req.method, requested.as_ref().map(String::as_str)) {
            req.method = method;
        }

        Ok(())
    }
}

pub struct HtmlAfterMiddleware;

impl AfterMiddleware for HtmlAfterMiddleware {
    fn after(&self, _: &mut Request, mut res: Response) -> IronResult<Response> {
        res.headers.set(ContentType::html());
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_points_at_the_front_page() {
        let response = redirect_to_index().unwrap();
        assert_eq!(response.status, Some(status::Found));
        assert_eq!(
            response.headers.get::<Location>(),
            Some(&Location("/".to_string()))
        );
    }

    #[test]
    fn post_with_put_override_is_rewritten() {
        assert_eq!(
            overridden_method(&Method::Post, Some("PUT")),
            Some(Method::Put)
        );
    }

    #[test]
    fn post_with_delete_override_is_rewritten() {
        assert_eq!(
            overridden_method(&Method::Post, Some("DELETE")),
            Some(Method::Delete)
        );
    }

    #[test]
    fn unknown_override_values_leave_the_method_alone() {
        assert_eq!(overridden_method(&Method::Post, Some("PATCH")), None);
        assert_eq!(overridden_method(&Method::Post, Some("put")), None);
        assert_eq!(overridden_method(&Method::Post, Some("")), None);
        assert_eq!(overridden_method(&Method::Post, None), None);
    }

    #[test]
    fn only_posts_are_eligible_for_override() {
        assert_eq!(overridden_method(&Method::Get, Some("DELETE")), None);
        assert_eq!(overridden_method(&Method::Put, Some("DELETE")), None);
        assert_eq!(overridden_method(&Method::Delete, Some("PUT")), None);
    }

    #[test]
    fn form_field_reads_its_first_value() {
        let values = vec!["one".to_string(), "two".to_string()];
        assert_eq!(first_or_empty(Some(&values)), "one");
    }

    #[test]
    fn missing_form_field_reads_as_empty() {
        assert_eq!(first_or_empty(None), "");
        assert_eq!(first_or_empty(Some(&Vec::new())), "");
    }
}
