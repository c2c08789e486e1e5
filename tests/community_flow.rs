//! Community forum flows.

mod common;

use common::mock_backend::{MockBackend, MockResponse};
use common::{dispatcher_for, log_in};
use crapi_client::effects::messages::{COMMENT_ADDED, COMMENT_NOT_ADDED, POST_CREATED};
use crapi_client::effects::{Operation, Outcome};
use crapi_client::state::{Offset, PageCursor};
use serde_json::json;

const POSTS: &str = "/community/api/v2/community/posts/recent";

#[tokio::test]
async fn posts_page_keeps_opaque_cursor_tokens() {
    let backend = MockBackend::start().await;
    backend
        .on(
            POSTS,
            MockResponse::json(json!({
                "posts": [{"id": "Xy7", "title": "Hello"}],
                "previous_offset": null,
                "next_offset": "c2Vjb25k"
            })),
        )
        .await;
    let dispatcher = dispatcher_for(&backend);
    log_in(dispatcher.store());

    dispatcher
        .request(Operation::get_posts(Some(Offset::Token("Zmlyc3Q".into()))))
        .await
        .unwrap();

    let community = dispatcher.store().state().community;
    assert_eq!(community.posts[0].id, "Xy7");
    assert_eq!(
        community.cursor,
        PageCursor::new(None, Some(Offset::Token("c2Vjb25k".into())))
    );
    let requests = backend.requests_to(POSTS).await;
    assert_eq!(requests[0].query.as_deref(), Some("limit=30&offset=Zmlyc3Q"));
}

#[tokio::test]
async fn comment_replaces_post_in_list() {
    let backend = MockBackend::start().await;
    backend
        .on(
            POSTS,
            MockResponse::json(json!({
                "posts": [{"id": "a", "comments": []}, {"id": "b", "comments": []}],
                "previous_offset": null,
                "next_offset": null
            })),
        )
        .await;
    backend
        .on(
            "/community/api/v2/community/posts/b/comment",
            MockResponse::json(json!({"id": "b", "comments": [{"content": "nice"}]})),
        )
        .await;
    let dispatcher = dispatcher_for(&backend);
    log_in(dispatcher.store());

    dispatcher.request(Operation::get_posts(None)).await.unwrap();
    let outcome = dispatcher
        .request(Operation::add_comment("b", "nice"))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Success(json!(COMMENT_ADDED)));
    let community = dispatcher.store().state().community;
    assert_eq!(community.posts.len(), 2);
    assert_eq!(community.posts[0].extra["comments"], json!([]));
    assert_eq!(community.posts[1].extra["comments"], json!([{"content": "nice"}]));
    assert_eq!(community.post.unwrap().id, "b");

    let sent = backend
        .requests_to("/community/api/v2/community/posts/b/comment")
        .await;
    assert_eq!(sent[0].json(), json!({"content": "nice"}));
}

#[tokio::test]
async fn comment_failure_uses_fixed_message() {
    let backend = MockBackend::start().await;
    backend
        .on(
            "/community/api/v2/community/posts/b/comment",
            MockResponse::error(400, "content is required"),
        )
        .await;
    let dispatcher = dispatcher_for(&backend);
    log_in(dispatcher.store());

    let outcome = dispatcher
        .request(Operation::add_comment("b", ""))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Failure(COMMENT_NOT_ADDED.to_string()));
    assert!(dispatcher.store().state().community.post.is_none());
}

#[tokio::test]
async fn new_post_is_sent_with_title_and_content() {
    let backend = MockBackend::start().await;
    backend
        .on(
            "/community/api/v2/community/posts",
            MockResponse::json(json!({"id": "new"})),
        )
        .await;
    let dispatcher = dispatcher_for(&backend);
    log_in(dispatcher.store());

    let outcome = dispatcher
        .request(Operation::add_post("Title", "Body"))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Success(json!(POST_CREATED)));
    let sent = backend
        .requests_to("/community/api/v2/community/posts")
        .await;
    assert_eq!(sent[0].json(), json!({"title": "Title", "content": "Body"}));
}

#[tokio::test]
async fn single_post_is_fetched_by_id() {
    let backend = MockBackend::start().await;
    backend
        .on(
            "/community/api/v2/community/posts/Xy7",
            MockResponse::json(json!({"id": "Xy7", "title": "Hello"})),
        )
        .await;
    let dispatcher = dispatcher_for(&backend);
    log_in(dispatcher.store());

    let outcome = dispatcher
        .request(Operation::get_post_by_id("Xy7"))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Success(json!({"id": "Xy7", "title": "Hello"})));
    let post = dispatcher.store().state().community.post.unwrap();
    assert_eq!(post.extra["title"], json!("Hello"));
}
