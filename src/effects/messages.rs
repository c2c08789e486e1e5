//! Fixed user-facing messages for outcomes.

pub const INVALID_CREDS: &str = "Invalid Username or Password";
pub const INVALID_CODE_CREDS: &str = "Invalid Email or Code";
pub const SIGN_UP_SUCCESS: &str = "User Registered Successfully!";
pub const SIGN_UP_FAILED: &str = "Could not sign up";
pub const OTP_SENT: &str = "OTP has been sent to your registered emailid";
pub const OTP_NOT_SENT: &str = "Could not send OTP";
pub const OTP_VERIFIED: &str = "Otp verified and your password has been set.";
pub const OTP_NOT_VERIFIED: &str = "Could not verify OTP";
pub const PASSWORD_CHANGED: &str = "Password Reset Successfully";
pub const PASSWORD_NOT_CHANGED: &str = "Could not reset your password";
pub const TOKEN_NOT_SENT: &str = "Could not send token to email address";
pub const EMAIL_CHANGED: &str = "Token Verified and email changed";
pub const EMAIL_NOT_CHANGED: &str = "Could not change email id";
pub const SESSION_INVALID: &str = "Session expired, please log in again";

pub const EMAIL_NOT_SENT: &str = "Could not resend mail";
pub const VEHICLE_NOT_ADDED: &str = "Internal Server error! Wrong VIN!";
pub const NO_VEHICLES: &str = "Could not get vehicles";
pub const NO_MECHANICS: &str = "Could not get mechanic details";
pub const NO_SERVICES: &str = "Could not get mechanic details";
pub const SERVICE_REQUEST_SENT: &str = "Service Request sent to the mechanic";
pub const SERVICE_REQUEST_NOT_SENT: &str = "Could not contact mechanic";
pub const LOC_NOT_REFRESHED: &str = "Could not refresh location";
pub const NO_REPORT: &str = "Could not get service report";

pub const NO_PRODUCTS: &str = "Could not get product details";
pub const PRODUCT_NOT_BOUGHT: &str = "Try again after sometime...";
pub const NO_ORDERS: &str = "Could not get orders";
pub const NO_ORDER: &str = "Could not get order";
pub const ORDER_NOT_RETURNED: &str = "Could not return order";
pub const INVALID_COUPON_CODE: &str = "Invalid Coupon Code";
pub const COUPON_APPLIED: &str = "Coupon applied";
pub const COUPON_NOT_APPLIED: &str = "Could not validate coupon";

pub const NO_POSTS: &str = "Could not get posts";
pub const NO_POST: &str = "Could not get post";
pub const POST_CREATED: &str = "Post Created.";
pub const POST_NOT_CREATED: &str = "Could not add new post";
pub const COMMENT_ADDED: &str = "Comment Added";
pub const COMMENT_NOT_ADDED: &str = "Could not add comment";

pub const PROFILE_PIC_UPDATED: &str = "Profile pic updated successfully";
pub const PROFILE_PIC_NOT_UPDATED: &str = "Could not upload Picture";
pub const VIDEO_UPDATED: &str = "Video updated successfully";
pub const VIDEO_NOT_UPDATED: &str = "Could not upload video";
pub const VIDEO_NAME_CHANGED: &str = "Video Name Changed";
pub const VIDEO_NAME_NOT_CHANGED: &str = "Could not change video";
pub const VIDEO_NOT_CONVERTED: &str = "Could not convert video";

/// Where a soft-blocked login is sent.
pub const UNLOCK_ROUTE: &str = "/unlock";
