//! Backend path templates.
//!
//! Paths are compile-time constants relative to a service base URL.
//! Placeholders such as `<orderId>` are substituted by literal string
//! replacement before the call; there is no service discovery.

use std::fmt;

/// Backend service a route belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Identity,
    Workshop,
    Community,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Service::Identity => "identity",
            Service::Workshop => "workshop",
            Service::Community => "community",
        };
        f.write_str(name)
    }
}

// Identity service
pub const LOGIN: &str = "api/auth/login";
pub const UNLOCK: &str = "api/auth/unlock";
pub const SIGNUP: &str = "api/auth/signup";
pub const FORGOT_PASSWORD: &str = "api/auth/forget-password";
pub const VERIFY_OTP: &str = "api/auth/v3/check-otp";
pub const VALIDATE_TOKEN: &str = "api/auth/verify";
pub const GET_USER: &str = "api/v2/user/dashboard";
pub const RESET_PASSWORD: &str = "api/v2/user/reset-password";
pub const CHANGE_EMAIL: &str = "api/v2/user/change-email";
pub const VERIFY_EMAIL_TOKEN: &str = "api/v2/user/verify-email-token";
pub const CHANGE_PHONE_NUMBER: &str = "api/v2/user/change-phone-number";
pub const VERIFY_PHONE_NUMBER_OTP: &str = "api/v2/user/verify-phone-otp";
pub const UPLOAD_PROFILE_PIC: &str = "api/v2/user/pictures";
pub const UPLOAD_VIDEO: &str = "api/v2/user/videos";
pub const CHANGE_VIDEO_NAME: &str = "api/v2/user/videos/<videoId>";
pub const CONVERT_VIDEO: &str = "api/v2/user/videos/convert_video";
pub const ADD_VEHICLE: &str = "api/v2/vehicle/add_vehicle";
pub const GET_VEHICLES: &str = "api/v2/vehicle/vehicles";
pub const RESEND_MAIL: &str = "api/v2/vehicle/resend_email";
pub const REFRESH_LOCATION: &str = "api/v2/vehicle/<carId>/location";

// Workshop service
pub const CONTACT_MECHANIC: &str = "api/merchant/contact_mechanic";
pub const RECEIVE_REPORT: &str = "api/mechanic/receive_report";
pub const GET_MECHANICS: &str = "api/mechanic";
pub const GET_MECHANIC_SERVICES: &str = "api/mechanic/service_requests";
pub const GET_VEHICLE_SERVICES: &str = "api/merchant/service_requests/<vehicleVIN>";
pub const GET_SERVICE_REPORT: &str = "api/mechanic/mechanic_report";
pub const GET_PRODUCTS: &str = "api/shop/products";
pub const BUY_PRODUCT: &str = "api/shop/orders";
pub const GET_ORDERS: &str = "api/shop/orders/all";
pub const GET_ORDER_BY_ID: &str = "api/shop/orders/<orderId>";
pub const RETURN_ORDER: &str = "api/shop/orders/return_order";
pub const APPLY_COUPON: &str = "api/shop/apply_coupon";

// Community service
pub const ADD_NEW_POST: &str = "api/v2/community/posts";
pub const GET_POSTS: &str = "api/v2/community/posts/recent";
pub const GET_POST_BY_ID: &str = "api/v2/community/posts/<postId>";
pub const ADD_COMMENT: &str = "api/v2/community/posts/<postId>/comment";
pub const VALIDATE_COUPON: &str = "api/v2/coupon/validate-coupon";

pub const VIDEO_ID: &str = "<videoId>";
pub const CAR_ID: &str = "<carId>";
pub const VEHICLE_VIN: &str = "<vehicleVIN>";
pub const ORDER_ID: &str = "<orderId>";
pub const POST_ID: &str = "<postId>";

/// A concrete call target: service, substituted path and query pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub service: Service,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
}

impl Route {
    pub fn new(service: Service, template: &str) -> Self {
        Self {
            service,
            path: template.to_string(),
            query: Vec::new(),
        }
    }

    /// Replace `placeholder` in the path with `value`, literally.
    pub fn with_param(mut self, placeholder: &str, value: impl fmt::Display) -> Self {
        self.path = self.path.replace(placeholder, &value.to_string());
        self
    }

    pub fn query(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        self.query.push((key, value.to_string()));
        self
    }
}

/// Join a service base URL and a relative path with exactly one slash.
pub fn join(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_replaced_literally() {
        let route = Route::new(Service::Workshop, GET_ORDER_BY_ID).with_param(ORDER_ID, 42);
        assert_eq!(route.path, "api/shop/orders/42");

        let route = Route::new(Service::Community, ADD_COMMENT).with_param(POST_ID, "Xy7");
        assert_eq!(route.path, "api/v2/community/posts/Xy7/comment");
    }

    #[test]
    fn unrelated_placeholder_is_left_alone() {
        let route = Route::new(Service::Identity, REFRESH_LOCATION).with_param(ORDER_ID, 1);
        assert_eq!(route.path, REFRESH_LOCATION);
    }

    #[test]
    fn query_pairs_keep_insertion_order() {
        let route = Route::new(Service::Workshop, GET_PRODUCTS)
            .query("limit", 30)
            .query("offset", 60);
        assert_eq!(
            route.query,
            vec![("limit", "30".to_string()), ("offset", "60".to_string())]
        );
    }

    #[test]
    fn join_normalizes_slashes() {
        assert_eq!(join("http://h/identity/", LOGIN), "http://h/identity/api/auth/login");
        assert_eq!(join("http://h/identity", "/api/x"), "http://h/identity/api/x");
    }
}
