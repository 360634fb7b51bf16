use crate::model::{Post, PostId};

/// In-memory post store. Posts are kept in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Database {
    posts: Vec<Post>,
    // Highest id ever handed out, so deleted ids are not issued again.
    last_id: PostId,
}

impl Database {
    pub fn new() -> Database {
        Database {
            posts: vec![],
            last_id: PostId::default(),
        }
    }

    /// Returns `None` only when every id has been handed out.
    pub fn add_post(&mut self, title: &str, content: &str) -> Option<Post> {
        let id = self.last_id.next()?;
        self.last_id = id;

        let post = Post::new(id, title, content);
        self.posts.push(post.clone());
        Some(post)
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn find_post(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|post| post.id() == id)
    }

    /// Returns `None` when no post has the given id.
    pub fn update_post(&mut self, id: PostId, title: &str, content: &str) -> Option<&Post> {
        let post = self.posts.iter_mut().find(|post| post.id() == id)?;
        post.edit(title, content);
        Some(post)
    }

    /// Returns whether a post was actually removed.
    pub fn remove_post(&mut self, id: PostId) -> bool {
        let before = self.posts.len();
        self.posts.retain(|post| post.id() != id);
        self.posts.len() != before
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn id(n: u64) -> PostId {
        PostId::new(n)
    }

    #[test]
    fn first_post_gets_id_one() {
        let mut database = Database::new();
        let post = database.add_post("A", "B").unwrap();

        assert_eq!(post.id(), id(1));
        assert_eq!(database.posts(), &[Post::new(id(1), "A", "B")]);
    }

    #[test]
    fn ids_increase_by_one() {
        let mut database = Database::new();
        let ids: Vec<PostId> = (0..5)
            .map(|n| database.add_post(&format!("post {}", n), "").unwrap().id())
            .collect();

        assert_eq!(ids, vec![id(1), id(2), id(3), id(4), id(5)]);
    }

    #[test]
    fn listing_keeps_insertion_order() {
        let mut database = Database::new();
        database.add_post("first", "");
        database.add_post("second", "");
        database.add_post("third", "");

        let titles: Vec<&str> = database.posts().iter().map(|p| p.title()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn deleted_id_is_not_reused() {
        let mut database = Database::new();
        database.add_post("one", "");
        database.add_post("two", "");

        assert!(database.remove_post(id(2)));
        assert_eq!(database.find_post(id(2)), None);

        let post = database.add_post("three", "").unwrap();
        assert_eq!(post.id(), id(3));
    }

    #[test]
    fn update_changes_title_and_content_only() {
        let mut database = Database::new();
        database.add_post("A", "B");

        let updated = database.update_post(id(1), "C", "D").cloned();
        assert_eq!(updated, Some(Post::new(id(1), "C", "D")));
        assert_eq!(database.find_post(id(1)), Some(&Post::new(id(1), "C", "D")));
        assert_eq!(database.len(), 1);
    }

    #[test]
    fn update_of_unknown_id_is_reported() {
        let mut database = Database::new();
        database.add_post("A", "B");

        assert!(database.update_post(id(7), "C", "D").is_none());
        assert_eq!(database.posts(), &[Post::new(id(1), "A", "B")]);
    }

    #[test]
    fn removing_unknown_id_is_a_no_op() {
        let mut database = Database::new();
        database.add_post("A", "B");
        let before = database.clone();

        assert!(!database.remove_post(id(42)));
        assert_eq!(database.posts(), before.posts());
    }

    #[test]
    fn exhausted_ids_leave_the_store_unchanged() {
        let mut database = Database {
            posts: vec![],
            last_id: PostId::new(u64::MAX),
        };

        assert_eq!(database.add_post("A", "B"), None);
        assert_eq!(database.len(), 0);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Create,
        Delete(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![Just(Op::Create), (0usize..16).prop_map(Op::Delete)]
    }

    proptest! {
        #[test]
        fn ids_are_unique_and_never_reissued(ops in proptest::collection::vec(op(), 0..64)) {
            let mut database = Database::new();
            let mut issued: Vec<PostId> = Vec::new();

            for op in ops {
                match op {
                    Op::Create => {
                        let post = database.add_post("t", "c").unwrap();
                        if let Some(last) = issued.last() {
                            prop_assert!(post.id() > *last);
                        } else {
                            prop_assert_eq!(post.id(), PostId::new(1));
                        }
                        prop_assert!(!issued.contains(&post.id()));
                        issued.push(post.id());
                    }
                    Op::Delete(index) => {
                        if let Some(target) = database.posts().get(index).map(|p| p.id()) {
                            database.remove_post(target);
                            prop_assert!(database.find_post(target).is_none());
                        }
                    }
                }
            }

            let mut live: Vec<PostId> = database.posts().iter().map(|p| p.id()).collect();
            let count = live.len();
            live.dedup();
            prop_assert_eq!(live.len(), count);
        }
    }
}
