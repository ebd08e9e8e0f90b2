use model::{Post, PostId};

/// The authoritative, in-memory collection of posts for the process
/// lifetime. Nothing is persisted: the posts and the id counter are gone
/// on restart.
#[derive(Clone, Debug)]
pub struct PostStore {
    posts: Vec<Post>,
    next_id: u64,
}

impl PostStore {
    pub fn new() -> PostStore {
        PostStore {
            posts: Vec::new(),
            next_id: 1,
        }
    }

    /// Append a new post under the next counter value. The counter only
    /// ever increases, so ids are never reused even after deletions.
    /// Title and content are stored as given, without validation.
    pub fn create(&mut self, title: &str, content: &str) {
        let id = PostId(self.next_id);
        self.next_id += 1;
        self.posts.push(Post::new(id, title, content));
    }

    /// All posts in insertion order.
    pub fn all(&self) -> &[Post] {
        &self.posts
    }

    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|post| post.id() == id)
    }

    /// Overwrite the title and content of the post with the given id.
    /// Returns whether a post matched; a miss leaves the store untouched.
    pub fn update(&mut self, id: PostId, title: &str, content: &str) -> bool {
        match self.posts.iter_mut().find(|post| post.id() == id) {
            Some(post) => {
                post.edit(title, content);
                true
            }
            None => false,
        }
    }

    /// Remove the post with the given id, keeping every other post in its
    /// original relative order. Returns whether anything was removed, so
    /// deleting a missing id is a no-op and deleting twice equals once.
    pub fn delete(&mut self, id: PostId) -> bool {
        let before = self.posts.len();
        self.posts.retain(|post| post.id() != id);
        self.posts.len() != before
    }
}
