//! Community forum: posts and comments.

use serde_json::{json, Value};

use crate::api::endpoints::{ADD_COMMENT, ADD_NEW_POST, GET_POSTS, GET_POST_BY_ID, POST_ID};
use crate::api::{AccessToken, ApiClient, Route, Service};
use crate::state::{Offset, PageCursor, Post, Transition};

use super::messages::{
    COMMENT_ADDED, COMMENT_NOT_ADDED, NO_POST, NO_POSTS, POST_CREATED, POST_NOT_CREATED,
};
use super::resolution::{Classify, Resolution, Sent, Step};

fn community(path: &str) -> Route {
    Route::new(Service::Community, path)
}

pub(crate) async fn get_posts(
    api: &ApiClient,
    token: Option<&AccessToken>,
    offset: Offset,
) -> Step<Resolution> {
    let route = community(GET_POSTS)
        .query("limit", api.page_limit())
        .query("offset", offset);
    let reply = api.get(route, token).await.or_fallback(NO_POSTS)?;

    let posts: Vec<Post> = reply.require("posts", NO_POSTS)?;
    let cursor: PageCursor = reply.parse(NO_POSTS)?;
    let payload = reply.body.clone().unwrap_or(Value::Null);

    Ok(Resolution::success(&reply, payload).emit(Transition::FetchedPosts { posts, cursor }))
}

pub(crate) async fn get_post_by_id(
    api: &ApiClient,
    token: Option<&AccessToken>,
    post_id: String,
) -> Step<Resolution> {
    let route = community(GET_POST_BY_ID).with_param(POST_ID, &post_id);
    let reply = api.get(route, token).await.or_fallback(NO_POST)?;

    let post: Post = reply.parse(NO_POST)?;
    let payload = reply.body.clone().unwrap_or(Value::Null);
    Ok(Resolution::success(&reply, payload).emit(Transition::FetchedPost { post_id, post }))
}

pub(crate) async fn add_post(
    api: &ApiClient,
    token: Option<&AccessToken>,
    title: String,
    content: String,
) -> Step<Resolution> {
    let reply = api
        .post(
            community(ADD_NEW_POST),
            token,
            Some(json!({ "title": title, "content": content })),
        )
        .await
        .or_fallback(POST_NOT_CREATED)?;

    reply.check_fixed(POST_NOT_CREATED)?;
    Ok(Resolution::success(&reply, POST_CREATED))
}

/// The backend answers with the updated post, comments included.
pub(crate) async fn add_comment(
    api: &ApiClient,
    token: Option<&AccessToken>,
    post_id: String,
    comment: String,
) -> Step<Resolution> {
    let route = community(ADD_COMMENT).with_param(POST_ID, &post_id);
    let reply = api
        .post(route, token, Some(json!({ "content": comment })))
        .await
        .or_fallback(COMMENT_NOT_ADDED)?;

    reply.check_fixed(COMMENT_NOT_ADDED)?;
    let post: Post = reply.parse(COMMENT_NOT_ADDED)?;
    Ok(Resolution::success(&reply, COMMENT_ADDED).emit(Transition::FetchedPost { post_id, post }))
}
