use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a `Post`. Ids are assigned sequentially starting at 1 and
/// are never reused within a process lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PostId(pub u64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PostId {
    type Err = ParseIntError;

    /// Strict parse: anything that is not a plain decimal number fails,
    /// and callers treat the failure like a missing post.
    fn from_str(s: &str) -> Result<PostId, ParseIntError> {
        s.parse().map(PostId)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Post {
    id: PostId,
    title: String,
    content: String,
}

impl Post {
    pub fn new(id: PostId, title: &str, content: &str) -> Post {
        Post {
            id: id,
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    pub fn id(&self) -> PostId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Overwrite title and content in place. The id never changes.
    pub fn edit(&mut self, title: &str, content: &str) {
        self.title = title.to_string();
        self.content = content.to_string();
    }
}
