//! Profile media: picture and video.

use serde_json::{json, Value};

use crate::api::endpoints::{
    CHANGE_VIDEO_NAME, CONVERT_VIDEO, UPLOAD_PROFILE_PIC, UPLOAD_VIDEO, VIDEO_ID,
};
use crate::api::{AccessToken, ApiClient, Route, Service};
use crate::state::{Transition, Upload};

use super::messages::{
    PROFILE_PIC_NOT_UPDATED, PROFILE_PIC_UPDATED, VIDEO_NAME_CHANGED, VIDEO_NAME_NOT_CHANGED,
    VIDEO_NOT_CONVERTED, VIDEO_NOT_UPDATED, VIDEO_UPDATED,
};
use super::resolution::{Classify, Resolution, Sent, Step};

fn identity(path: &str) -> Route {
    Route::new(Service::Identity, path)
}

pub(crate) async fn upload_profile_pic(
    api: &ApiClient,
    token: Option<&AccessToken>,
    file: Upload,
) -> Step<Resolution> {
    tracing::debug!(file = ?file, "Uploading profile picture");
    let reply = api
        .upload(identity(UPLOAD_PROFILE_PIC), token, file)
        .await
        .or_fallback(PROFILE_PIC_NOT_UPDATED)?;

    reply.body(PROFILE_PIC_NOT_UPDATED)?;
    let picture_url = reply.field::<String>("picture");
    Ok(Resolution::success(&reply, PROFILE_PIC_UPDATED)
        .emit(Transition::ProfilePicChanged { picture_url }))
}

pub(crate) async fn upload_video(
    api: &ApiClient,
    token: Option<&AccessToken>,
    file: Upload,
) -> Step<Resolution> {
    tracing::debug!(file = ?file, "Uploading profile video");
    let reply = api
        .upload(identity(UPLOAD_VIDEO), token, file)
        .await
        .or_fallback(VIDEO_NOT_UPDATED)?;

    reply.body(VIDEO_NOT_UPDATED)?;
    let video_id = reply.field::<u64>("id");
    let video_url = reply.field::<String>("profileVideo");
    Ok(Resolution::success(&reply, VIDEO_UPDATED)
        .emit(Transition::VideoChanged { video_id, video_url }))
}

pub(crate) async fn change_video_name(
    api: &ApiClient,
    token: Option<&AccessToken>,
    video_id: u64,
    video_name: String,
) -> Step<Resolution> {
    let route = identity(CHANGE_VIDEO_NAME).with_param(VIDEO_ID, video_id);
    let reply = api
        .put(route, token, json!({ "videoName": video_name }))
        .await
        .or_fallback(VIDEO_NAME_NOT_CHANGED)?;

    reply.body(VIDEO_NAME_NOT_CHANGED)?;
    let video_name = reply.field::<String>("video_name");
    Ok(Resolution::success(&reply, VIDEO_NAME_CHANGED)
        .emit(Transition::VideoNameChanged { video_name }))
}

pub(crate) async fn convert_video(
    api: &ApiClient,
    token: Option<&AccessToken>,
    video_id: u64,
) -> Step<Resolution> {
    let route = identity(CONVERT_VIDEO).query("video_id", video_id);
    let reply = api
        .get(route, token)
        .await
        .or_fallback(VIDEO_NOT_CONVERTED)?;

    reply.check_fixed(VIDEO_NOT_CONVERTED)?;
    let payload = reply.body.clone().unwrap_or(Value::Null);
    Ok(Resolution::success(&reply, payload))
}
