use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a post. Always positive once issued by the database.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostId(u64);

impl PostId {
    pub fn new(id: u64) -> PostId {
        PostId(id)
    }

    /// `None` once the id space is used up.
    pub fn next(&self) -> Option<PostId> {
        self.0.checked_add(1).map(PostId)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PostId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<PostId, ParseIntError> {
        s.parse().map(PostId)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
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

    /// Overwrite title and content. The id never changes.
    pub fn edit(&mut self, title: &str, content: &str) {
        self.title = title.to_string();
        self.content = content.to_string();
    }
}
