//! Products, orders and coupons.

use serde_json::{json, Value};

use crate::api::endpoints::{
    APPLY_COUPON, BUY_PRODUCT, GET_ORDERS, GET_ORDER_BY_ID, GET_PRODUCTS, ORDER_ID, RETURN_ORDER,
    VALIDATE_COUPON,
};
use crate::api::{AccessToken, ApiClient, Reply, Route, Service};
use crate::state::{Offset, Order, PageCursor, Product, Transition};

use super::messages::{
    COUPON_APPLIED, COUPON_NOT_APPLIED, INVALID_COUPON_CODE, NO_ORDER, NO_ORDERS, NO_PRODUCTS,
    ORDER_NOT_RETURNED, PRODUCT_NOT_BOUGHT,
};
use super::resolution::{Classify, Rejection, Resolution, Sent, Step};

fn workshop(path: &str) -> Route {
    Route::new(Service::Workshop, path)
}

fn page(api: &ApiClient, path: &str, offset: &Offset) -> Route {
    workshop(path)
        .query("limit", api.page_limit())
        .query("offset", offset)
}

/// Attach a balance update if the reply reports the new credit.
fn with_balance(resolution: Resolution, reply: &Reply) -> Resolution {
    match reply.field::<f64>("credit") {
        Some(available_credit) => resolution.emit(Transition::BalanceChanged { available_credit }),
        None => resolution,
    }
}

pub(crate) async fn get_products(
    api: &ApiClient,
    token: Option<&AccessToken>,
    offset: Offset,
) -> Step<Resolution> {
    let reply = api
        .get(page(api, GET_PRODUCTS, &offset), token)
        .await
        .or_fallback(NO_PRODUCTS)?;

    let products: Vec<Product> = reply.require("products", NO_PRODUCTS)?;
    let cursor: PageCursor = reply.parse(NO_PRODUCTS)?;
    let payload = reply.body.clone().unwrap_or(Value::Null);

    let resolution = with_balance(Resolution::success(&reply, payload), &reply);
    Ok(resolution.emit(Transition::FetchedProducts { products, cursor }))
}

pub(crate) async fn buy_product(
    api: &ApiClient,
    token: Option<&AccessToken>,
    product_id: u64,
) -> Step<Resolution> {
    let reply = api
        .post(
            workshop(BUY_PRODUCT),
            token,
            Some(json!({ "product_id": product_id, "quantity": 1 })),
        )
        .await
        .or_fallback(PRODUCT_NOT_BOUGHT)?;

    reply.body(PRODUCT_NOT_BOUGHT)?;
    Ok(with_balance(Resolution::relay(&reply), &reply))
}

pub(crate) async fn get_orders(
    api: &ApiClient,
    token: Option<&AccessToken>,
    offset: Offset,
) -> Step<Resolution> {
    let reply = api
        .get(page(api, GET_ORDERS, &offset), token)
        .await
        .or_fallback(NO_ORDERS)?;

    let orders: Vec<Order> = reply.require("orders", NO_ORDERS)?;
    let cursor: PageCursor = reply.parse(NO_ORDERS)?;
    let payload = reply.body.clone().unwrap_or(Value::Null);

    Ok(Resolution::success(&reply, payload).emit(Transition::FetchedOrders { orders, cursor }))
}

pub(crate) async fn get_order_by_id(
    api: &ApiClient,
    token: Option<&AccessToken>,
    order_id: u64,
) -> Step<Resolution> {
    let route = workshop(GET_ORDER_BY_ID).with_param(ORDER_ID, order_id);
    let reply = api.get(route, token).await.or_fallback(NO_ORDER)?;

    let order: Order = reply.require("order", NO_ORDER)?;
    let payload = reply.field::<Value>("order").unwrap_or(Value::Null);
    Ok(Resolution::success(&reply, payload).emit(Transition::FetchedOrder { order_id, order }))
}

pub(crate) async fn return_order(
    api: &ApiClient,
    token: Option<&AccessToken>,
    order_id: u64,
) -> Step<Resolution> {
    let route = workshop(RETURN_ORDER).query("order_id", order_id);
    let reply = api
        .post(route, token, None)
        .await
        .or_fallback(ORDER_NOT_RETURNED)?;

    let order: Order = reply.require("order", ORDER_NOT_RETURNED)?;
    let payload = reply.body.clone().unwrap_or(Value::Null);
    tracing::info!(order_id, status = ?order.status, "Order returned");
    Ok(Resolution::success(&reply, payload).emit(Transition::OrderReturned { order_id, order }))
}

/// Coupon amounts arrive as strings or numbers depending on the backend.
fn coupon_amount(coupon: &Value) -> Option<f64> {
    match coupon.get("amount")? {
        Value::String(text) => text.trim().parse().ok(),
        other => other.as_f64(),
    }
}

/// Validate the code with the community service, then redeem it with the
/// workshop.
pub(crate) async fn apply_coupon(
    api: &ApiClient,
    token: Option<&AccessToken>,
    coupon_code: String,
) -> Step<Resolution> {
    let validated = api
        .post(
            Route::new(Service::Community, VALIDATE_COUPON),
            token,
            Some(json!({ "coupon_code": coupon_code })),
        )
        .await
        .or_fallback(COUPON_NOT_APPLIED)?;

    validated.check_fixed(INVALID_COUPON_CODE)?;
    let coupon = validated.body(COUPON_NOT_APPLIED)?;
    let code: String = validated.require("coupon_code", COUPON_NOT_APPLIED)?;
    let amount = coupon_amount(coupon)
        .ok_or_else(|| Rejection::new(Some(validated.status), COUPON_NOT_APPLIED))?;

    let reply = api
        .post(
            workshop(APPLY_COUPON),
            token,
            Some(json!({ "coupon_code": code, "amount": amount })),
        )
        .await
        .or_fallback(COUPON_NOT_APPLIED)?;

    reply.body(COUPON_NOT_APPLIED)?;
    Ok(with_balance(Resolution::success(&reply, COUPON_APPLIED), &reply))
}
