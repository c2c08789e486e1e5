//! Vehicles, mechanics and service requests.

use serde_json::{json, Value};

use crate::api::endpoints::{
    join, ADD_VEHICLE, CAR_ID, CONTACT_MECHANIC, GET_MECHANICS, GET_MECHANIC_SERVICES,
    GET_SERVICE_REPORT, GET_USER, GET_VEHICLES, GET_VEHICLE_SERVICES, RECEIVE_REPORT,
    REFRESH_LOCATION, RESEND_MAIL, VEHICLE_VIN,
};
use crate::api::{AccessToken, ApiClient, Route, Service};
use crate::state::{Mechanic, PageCursor, Transition, User, Vehicle};

use super::messages::{
    EMAIL_NOT_SENT, LOC_NOT_REFRESHED, NO_MECHANICS, NO_REPORT, NO_SERVICES, NO_VEHICLES,
    SERVICE_REQUEST_NOT_SENT, SERVICE_REQUEST_SENT, VEHICLE_NOT_ADDED,
};
use super::resolution::{Classify, Resolution, Sent, Step};

pub(crate) async fn resend_mail(api: &ApiClient, token: Option<&AccessToken>) -> Step<Resolution> {
    let reply = api
        .post(Route::new(Service::Identity, RESEND_MAIL), token, None)
        .await
        .or_fallback(EMAIL_NOT_SENT)?;

    reply.body(EMAIL_NOT_SENT)?;
    Ok(Resolution::relay(&reply))
}

pub(crate) async fn verify_vehicle(
    api: &ApiClient,
    token: Option<&AccessToken>,
    vin: String,
    pin_code: String,
) -> Step<Resolution> {
    let reply = api
        .post(
            Route::new(Service::Identity, ADD_VEHICLE),
            token,
            Some(json!({ "vin": vin, "pincode": pin_code })),
        )
        .await
        .or_fallback(VEHICLE_NOT_ADDED)?;

    reply.body(VEHICLE_NOT_ADDED)?;
    Ok(Resolution::relay(&reply))
}

/// Refreshes the account first, then lists its vehicles.
pub(crate) async fn get_vehicles(api: &ApiClient, token: Option<&AccessToken>) -> Step<Resolution> {
    let user_reply = api
        .get(Route::new(Service::Identity, GET_USER), token)
        .await
        .or_fallback(NO_VEHICLES)?;
    user_reply.check_fixed(NO_VEHICLES)?;
    let user: User = user_reply.parse(NO_VEHICLES)?;

    let reply = api
        .get(Route::new(Service::Identity, GET_VEHICLES), token)
        .await
        .or_fallback(NO_VEHICLES)?;
    let vehicles: Vec<Vehicle> = reply.parse(NO_VEHICLES)?;
    let payload = reply.body.clone().unwrap_or(Value::Null);

    Ok(Resolution::success(&reply, payload)
        .emit(Transition::FetchedUser(user))
        .emit(Transition::FetchedVehicles(vehicles)))
}

pub(crate) async fn get_mechanics(api: &ApiClient, token: Option<&AccessToken>) -> Step<Resolution> {
    let reply = api
        .get(Route::new(Service::Workshop, GET_MECHANICS), token)
        .await
        .or_fallback(NO_MECHANICS)?;

    let body = reply.body(NO_MECHANICS)?;
    let mechanics: Vec<Mechanic> = reply.require("mechanics", NO_MECHANICS)?;
    let cursor: PageCursor = reply.parse(NO_MECHANICS)?;
    let payload = body.get("mechanics").cloned().unwrap_or(Value::Null);

    Ok(Resolution::success(&reply, payload)
        .emit(Transition::FetchedMechanics { mechanics, cursor }))
}

pub(crate) async fn contact_mechanic(
    api: &ApiClient,
    token: Option<&AccessToken>,
    mechanic_code: String,
    problem_details: String,
    vin: String,
) -> Step<Resolution> {
    // The workshop calls this back when the mechanic files a report
    let mechanic_api = join(api.base_url(Service::Workshop), RECEIVE_REPORT);
    let body = json!({
        "mechanic_code": mechanic_code,
        "problem_details": problem_details,
        "vin": vin,
        "mechanic_api": mechanic_api,
        "repeat_request_if_failed": false,
        "number_of_repeats": 1,
    });
    let reply = api
        .post(Route::new(Service::Workshop, CONTACT_MECHANIC), token, Some(body))
        .await
        .or_fallback(SERVICE_REQUEST_NOT_SENT)?;

    reply.body(SERVICE_REQUEST_NOT_SENT)?;
    Ok(Resolution::success(&reply, SERVICE_REQUEST_SENT))
}

pub(crate) async fn refresh_location(
    api: &ApiClient,
    token: Option<&AccessToken>,
    car_id: String,
) -> Step<Resolution> {
    let route = Route::new(Service::Identity, REFRESH_LOCATION).with_param(CAR_ID, &car_id);
    let reply = api.get(route, token).await.or_fallback(LOC_NOT_REFRESHED)?;

    let location: Value = reply.require("vehicleLocation", LOC_NOT_REFRESHED)?;
    Ok(Resolution::success(&reply, location.clone())
        .emit(Transition::RefreshedLocation { car_id, location }))
}

pub(crate) async fn get_mechanic_services(
    api: &ApiClient,
    token: Option<&AccessToken>,
) -> Step<Resolution> {
    let route = Route::new(Service::Workshop, GET_MECHANIC_SERVICES);
    service_requests(api, token, route).await
}

pub(crate) async fn get_vehicle_services(
    api: &ApiClient,
    token: Option<&AccessToken>,
    vin: String,
) -> Step<Resolution> {
    let route = Route::new(Service::Workshop, GET_VEHICLE_SERVICES).with_param(VEHICLE_VIN, vin);
    service_requests(api, token, route).await
}

async fn service_requests(
    api: &ApiClient,
    token: Option<&AccessToken>,
    route: Route,
) -> Step<Resolution> {
    let reply = api.get(route, token).await.or_fallback(NO_SERVICES)?;
    let requests: Value = reply.require("service_requests", NO_SERVICES)?;
    Ok(Resolution::success(&reply, requests))
}

pub(crate) async fn get_service_report(
    api: &ApiClient,
    token: Option<&AccessToken>,
    report_id: String,
) -> Step<Resolution> {
    let route = Route::new(Service::Workshop, GET_SERVICE_REPORT).query("report_id", report_id);
    let reply = api.get(route, token).await.or_fallback(NO_REPORT)?;

    let report = reply.body(NO_REPORT)?.clone();
    Ok(Resolution::success(&reply, report))
}
