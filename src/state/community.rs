//! Community slice: forum posts.

use crate::mvi::{Reducer, Slice};

use super::models::{PageCursor, Post};
use super::replace_where;
use super::transition::Transition;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommunityState {
    pub posts: Vec<Post>,
    pub cursor: PageCursor,
    /// Post most recently fetched or commented on.
    pub post: Option<Post>,
}

impl Slice for CommunityState {}

pub struct CommunityReducer;

impl Reducer for CommunityReducer {
    type State = CommunityState;
    type Message = Transition;

    fn reduce(state: Self::State, message: &Self::Message) -> Self::State {
        match message {
            Transition::FetchedPosts { posts, cursor } => CommunityState {
                posts: posts.clone(),
                cursor: cursor.clone(),
                ..state
            },
            Transition::FetchedPost { post_id, post } => CommunityState {
                posts: replace_where(state.posts, |p| &p.id == post_id, |_| post.clone()),
                post: Some(post.clone()),
                ..state
            },
            _ => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Offset;
    use serde_json::json;

    fn post(id: &str, comments: usize) -> Post {
        serde_json::from_value(json!({
            "id": id,
            "title": format!("post {}", id),
            "comments": vec![json!({"content": "hi"}); comments],
        }))
        .unwrap()
    }

    #[test]
    fn fetched_posts_replaces_list_and_cursor() {
        let cursor = PageCursor::new(None, Some(Offset::Number(30)));
        let next = CommunityReducer::reduce(
            CommunityState {
                posts: vec![post("stale", 0)],
                ..CommunityState::default()
            },
            &Transition::FetchedPosts {
                posts: vec![post("a", 0), post("b", 0)],
                cursor: cursor.clone(),
            },
        );
        assert_eq!(next.posts, vec![post("a", 0), post("b", 0)]);
        assert_eq!(next.cursor, cursor);
    }

    #[test]
    fn fetched_post_replaces_matching_post_in_place() {
        let state = CommunityState {
            posts: vec![post("a", 0), post("b", 0), post("c", 0)],
            ..CommunityState::default()
        };
        let next = CommunityReducer::reduce(
            state,
            &Transition::FetchedPost {
                post_id: "b".into(),
                post: post("b", 1),
            },
        );
        assert_eq!(next.posts, vec![post("a", 0), post("b", 1), post("c", 0)]);
        assert_eq!(next.post, Some(post("b", 1)));
    }
}
