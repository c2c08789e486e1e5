//! Identity flows: login, signup, password and contact changes.

use serde_json::{json, Value};

use crate::api::endpoints::{
    CHANGE_EMAIL, CHANGE_PHONE_NUMBER, FORGOT_PASSWORD, GET_USER, LOGIN, RESET_PASSWORD, SIGNUP,
    UNLOCK, VALIDATE_TOKEN, VERIFY_EMAIL_TOKEN, VERIFY_OTP, VERIFY_PHONE_NUMBER_OTP,
};
use crate::api::{AccessToken, ApiClient, Route, Service};
use crate::state::{Transition, User};

use super::messages::{
    EMAIL_CHANGED, EMAIL_NOT_CHANGED, INVALID_CODE_CREDS, INVALID_CREDS, OTP_NOT_SENT,
    OTP_NOT_VERIFIED, OTP_SENT, OTP_VERIFIED, PASSWORD_CHANGED, PASSWORD_NOT_CHANGED,
    SESSION_INVALID, SIGN_UP_FAILED, SIGN_UP_SUCCESS, TOKEN_NOT_SENT, UNLOCK_ROUTE,
};
use super::resolution::{Classify, Resolution, Sent, Step};

fn identity(path: &str) -> Route {
    Route::new(Service::Identity, path)
}

pub(crate) async fn validate_access_token(
    api: &ApiClient,
    token: &AccessToken,
) -> Step<Resolution> {
    let reply = api
        .post(
            identity(VALIDATE_TOKEN),
            None,
            Some(json!({ "token": token.expose() })),
        )
        .await
        .or_fallback(SESSION_INVALID)?;

    if !reply.is_success() {
        tracing::info!(status = reply.status, "Stored access token rejected");
        let message = reply
            .server_message()
            .unwrap_or_else(|| SESSION_INVALID.to_string());
        return Ok(Resolution::failure(&reply, message).emit(Transition::InvalidSession));
    }
    let payload = reply.body.clone().unwrap_or(Value::Null);
    Ok(Resolution::success(&reply, payload))
}

pub(crate) async fn log_in(api: &ApiClient, email: String, password: String) -> Step<Resolution> {
    let reply = api
        .post(
            identity(LOGIN),
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
        .or_fallback(INVALID_CREDS)?;

    if reply.status == 423 {
        tracing::info!("Account locked, redirecting to unlock");
        let message = reply.server_message();
        return Ok(Resolution::redirect(&reply, UNLOCK_ROUTE)
            .emit(Transition::UnlockUserRedirect { email, message }));
    }

    reply.check_fixed(INVALID_CREDS)?;
    let token: AccessToken = reply.require("token", INVALID_CREDS)?;
    let payload = reply.body.clone().unwrap_or(Value::Null);
    establish_session(api, token, payload, INVALID_CREDS).await
}

pub(crate) async fn unlock(api: &ApiClient, email: String, code: String) -> Step<Resolution> {
    let reply = api
        .post(
            identity(UNLOCK),
            None,
            Some(json!({ "email": email, "code": code })),
        )
        .await
        .or_fallback(INVALID_CODE_CREDS)?;

    reply.check_fixed(INVALID_CODE_CREDS)?;
    let token: AccessToken = reply.require("token", INVALID_CODE_CREDS)?;
    let payload = reply.body.clone().unwrap_or(Value::Null);
    establish_session(api, token, payload, INVALID_CODE_CREDS).await
}

/// Second step of login and unlock: fetch the account behind a fresh token.
async fn establish_session(
    api: &ApiClient,
    token: AccessToken,
    payload: Value,
    fallback: &str,
) -> Step<Resolution> {
    let reply = api
        .get(identity(GET_USER), Some(&token))
        .await
        .or_fallback(fallback)?;

    reply.check_fixed(fallback)?;
    let user: User = reply.parse(fallback)?;
    tracing::info!(user_id = ?user.id, "Logged in");
    Ok(Resolution::success(&reply, payload).emit(Transition::LoggedIn { token, user }))
}

/// Keep only digits and `+`.
fn clean_number(number: &str) -> String {
    number
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

pub(crate) async fn sign_up(
    api: &ApiClient,
    name: String,
    email: String,
    number: String,
    password: String,
) -> Step<Resolution> {
    let body = json!({
        "name": name,
        "email": email,
        "number": clean_number(&number),
        "password": password,
    });
    let reply = api
        .post(identity(SIGNUP), None, Some(body))
        .await
        .or_fallback(SIGN_UP_FAILED)?;

    reply.check(SIGN_UP_FAILED)?;
    Ok(Resolution::success(&reply, SIGN_UP_SUCCESS))
}

pub(crate) async fn forgot_password(api: &ApiClient, email: String) -> Step<Resolution> {
    let reply = api
        .post(identity(FORGOT_PASSWORD), None, Some(json!({ "email": email })))
        .await
        .or_fallback(OTP_NOT_SENT)?;

    reply.check(OTP_NOT_SENT)?;
    Ok(Resolution::success(&reply, OTP_SENT))
}

pub(crate) async fn verify_otp(
    api: &ApiClient,
    email: String,
    otp: String,
    password: String,
) -> Step<Resolution> {
    let reply = api
        .post(
            identity(VERIFY_OTP),
            None,
            Some(json!({ "email": email, "otp": otp, "password": password })),
        )
        .await
        .or_fallback(OTP_NOT_VERIFIED)?;

    if let Some(redirect) = reply.unavailable(OTP_NOT_VERIFIED) {
        return Ok(redirect);
    }
    reply.check(OTP_NOT_VERIFIED)?;
    Ok(Resolution::success(&reply, OTP_VERIFIED))
}

pub(crate) async fn verify_phone_number_otp(
    api: &ApiClient,
    token: Option<&AccessToken>,
    old_number: String,
    new_number: String,
    otp: String,
) -> Step<Resolution> {
    let reply = api
        .post(
            identity(VERIFY_PHONE_NUMBER_OTP),
            token,
            Some(json!({ "old_number": old_number, "new_number": new_number, "otp": otp })),
        )
        .await
        .or_fallback(OTP_NOT_VERIFIED)?;

    if let Some(redirect) = reply.unavailable(OTP_NOT_VERIFIED) {
        return Ok(redirect);
    }
    reply.check(OTP_NOT_VERIFIED)?;
    Ok(Resolution::success(&reply, OTP_VERIFIED)
        .emit(Transition::PhoneNumberVerified { number: new_number }))
}

pub(crate) async fn reset_password(
    api: &ApiClient,
    token: Option<&AccessToken>,
    password: String,
) -> Step<Resolution> {
    let reply = api
        .post(
            identity(RESET_PASSWORD),
            token,
            Some(json!({ "password": password })),
        )
        .await
        .or_fallback(PASSWORD_NOT_CHANGED)?;

    reply.check_fixed(PASSWORD_NOT_CHANGED)?;
    Ok(Resolution::success(&reply, PASSWORD_CHANGED))
}

pub(crate) async fn change_email(
    api: &ApiClient,
    token: Option<&AccessToken>,
    old_email: String,
    new_email: String,
) -> Step<Resolution> {
    let reply = api
        .post(
            identity(CHANGE_EMAIL),
            token,
            Some(json!({ "old_email": old_email, "new_email": new_email })),
        )
        .await
        .or_fallback(TOKEN_NOT_SENT)?;

    reply.body(TOKEN_NOT_SENT)?;
    Ok(Resolution::relay(&reply))
}

pub(crate) async fn change_phone_number(
    api: &ApiClient,
    token: Option<&AccessToken>,
    old_number: String,
    new_number: String,
) -> Step<Resolution> {
    let reply = api
        .post(
            identity(CHANGE_PHONE_NUMBER),
            token,
            Some(json!({ "old_number": old_number, "new_number": new_number })),
        )
        .await
        .or_fallback(TOKEN_NOT_SENT)?;

    reply.body(TOKEN_NOT_SENT)?;
    Ok(Resolution::relay(&reply))
}

pub(crate) async fn verify_email_token(
    api: &ApiClient,
    token: Option<&AccessToken>,
    new_email: String,
    email_token: String,
) -> Step<Resolution> {
    let reply = api
        .post(
            identity(VERIFY_EMAIL_TOKEN),
            token,
            Some(json!({ "new_email": new_email, "token": email_token })),
        )
        .await
        .or_fallback(EMAIL_NOT_CHANGED)?;

    reply.check(EMAIL_NOT_CHANGED)?;
    Ok(Resolution::success(&reply, EMAIL_CHANGED))
}
