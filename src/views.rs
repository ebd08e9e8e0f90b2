//! HTML rendering for the blog pages. Handlers hand these strings to iron
//! as response bodies; the `HtmlAfterMiddleware` stamps the content type.

use model::Post;

/// Escape text for interpolation into HTML element bodies and attribute
/// values. Titles and content are opaque to the store, so anything can
/// show up here.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>{}</title></head>\n\
         <body>\n{}\n</body>\n\
         </html>\n",
        escape(title),
        body
    )
}

/// The front page: every post in insertion order, with edit and delete
/// controls. Delete is a form POST carrying a `_method` override because
/// HTML forms cannot issue DELETE themselves.
pub fn index(posts: &[Post]) -> String {
    let mut body = String::from("<h1>Posts</h1>\n<p><a href=\"/posts/new\">New post</a></p>\n");
    if posts.is_empty() {
        body.push_str("<p>No posts yet.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for post in posts {
            body.push_str(&format!(
                "<li>\n\
                 <h2>{title}</h2>\n\
                 <p>{content}</p>\n\
                 <a href=\"/posts/{id}/edit\">Edit</a>\n\
                 <form action=\"/posts/{id}?_method=DELETE\" method=\"post\">\
                 <button type=\"submit\">Delete</button></form>\n\
                 </li>\n",
                title = escape(post.title()),
                content = escape(post.content()),
                id = post.id()
            ));
        }
        body.push_str("</ul>\n");
    }
    layout("Posts", &body)
}

pub fn new_post() -> String {
    let body = "<h1>New post</h1>\n\
                <form action=\"/posts\" method=\"post\">\n\
                <p><input type=\"text\" name=\"title\" placeholder=\"Title\"></p>\n\
                <p><textarea name=\"content\" placeholder=\"Content\"></textarea></p>\n\
                <p><button type=\"submit\">Create</button></p>\n\
                </form>\n\
                <p><a href=\"/\">Back</a></p>";
    layout("New post", body)
}

/// Edit form for an existing post. The update goes out as a form POST with
/// a `_method=PUT` override.
pub fn edit_post(post: &Post) -> String {
    let body = format!(
        "<h1>Edit post</h1>\n\
         <form action=\"/posts/{id}?_method=PUT\" method=\"post\">\n\
         <p><input type=\"text\" name=\"title\" value=\"{title}\"></p>\n\
         <p><textarea name=\"content\">{content}</textarea></p>\n\
         <p><button type=\"submit\">Save</button></p>\n\
         </form>\n\
         <p><a href=\"/\">Back</a></p>",
        id = post.id(),
        title = escape(post.title()),
        content = escape(post.content())
    );
    layout("Edit post", &body)
}

pub fn not_found() -> String {
    layout(
        "Post not found",
        "<h1>Post not found</h1>\n<p><a href=\"/\">Back to all posts</a></p>",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{Post, PostId};

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape("<b>\"a\" & 'b'</b>"),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn index_lists_every_post_with_its_controls() {
        let posts = vec![
            Post::new(PostId(1), "First", "hello"),
            Post::new(PostId(2), "Second", "world"),
        ];
        let page = index(&posts);
        assert!(page.contains("<h2>First</h2>"));
        assert!(page.contains("<h2>Second</h2>"));
        assert!(page.contains("/posts/1/edit"));
        assert!(page.contains("/posts/2?_method=DELETE"));
    }

    #[test]
    fn index_without_posts_says_so() {
        assert!(index(&[]).contains("No posts yet."));
    }

    #[test]
    fn edit_form_escapes_the_post_title() {
        let post = Post::new(PostId(3), "\"quoted\"", "body");
        let page = edit_post(&post);
        assert!(page.contains("value=\"&quot;quoted&quot;\""));
        assert!(page.contains("/posts/3?_method=PUT"));
    }
}
