//! Intents: one operation plus the caller's completion.

use std::fmt;

use crate::api::AccessToken;
use crate::state::{Offset, Upload};

use super::outcome::{Completion, Outcome};

/// Parameters of one backend operation.
///
/// Authenticated operations use the session token held by the store at
/// dispatch time, so only token validation carries a token of its own.
#[derive(Clone)]
pub enum Operation {
    ValidateAccessToken { token: AccessToken },
    LogIn { email: String, password: String },
    Unlock { email: String, code: String },
    SignUp {
        name: String,
        email: String,
        number: String,
        password: String,
    },
    ForgotPassword { email: String },
    VerifyOtp {
        email: String,
        otp: String,
        password: String,
    },
    VerifyPhoneNumberOtp {
        old_number: String,
        new_number: String,
        otp: String,
    },
    ResetPassword { password: String },
    ChangeEmail { old_email: String, new_email: String },
    ChangePhoneNumber { old_number: String, new_number: String },
    VerifyEmailToken { new_email: String, token: String },

    ResendMail,
    VerifyVehicle { vin: String, pin_code: String },
    GetVehicles,
    GetMechanics,
    ContactMechanic {
        mechanic_code: String,
        problem_details: String,
        vin: String,
    },
    RefreshLocation { car_id: String },
    GetMechanicServices,
    GetVehicleServices { vin: String },
    GetServiceReport { report_id: String },

    GetProducts { offset: Offset },
    BuyProduct { product_id: u64 },
    GetOrders { offset: Offset },
    GetOrderById { order_id: u64 },
    ReturnOrder { order_id: u64 },
    ApplyCoupon { coupon_code: String },

    GetPosts { offset: Offset },
    GetPostById { post_id: String },
    AddPost { title: String, content: String },
    AddComment { post_id: String, comment: String },

    UploadProfilePic { file: Upload },
    UploadVideo { file: Upload },
    ChangeVideoName { video_id: u64, video_name: String },
    ConvertVideo { video_id: u64 },
}

/// Identifies the handler and the latest-wins scope of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    ValidateAccessToken,
    LogIn,
    Unlock,
    SignUp,
    ForgotPassword,
    VerifyOtp,
    VerifyPhoneNumberOtp,
    ResetPassword,
    ChangeEmail,
    ChangePhoneNumber,
    VerifyEmailToken,
    ResendMail,
    VerifyVehicle,
    GetVehicles,
    GetMechanics,
    ContactMechanic,
    RefreshLocation,
    GetMechanicServices,
    GetVehicleServices,
    GetServiceReport,
    GetProducts,
    BuyProduct,
    GetOrders,
    GetOrderById,
    ReturnOrder,
    ApplyCoupon,
    GetPosts,
    GetPostById,
    AddPost,
    AddComment,
    UploadProfilePic,
    UploadVideo,
    ChangeVideoName,
    ConvertVideo,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::ValidateAccessToken => "validate_access_token",
            OperationKind::LogIn => "log_in",
            OperationKind::Unlock => "unlock",
            OperationKind::SignUp => "sign_up",
            OperationKind::ForgotPassword => "forgot_password",
            OperationKind::VerifyOtp => "verify_otp",
            OperationKind::VerifyPhoneNumberOtp => "verify_phone_number_otp",
            OperationKind::ResetPassword => "reset_password",
            OperationKind::ChangeEmail => "change_email",
            OperationKind::ChangePhoneNumber => "change_phone_number",
            OperationKind::VerifyEmailToken => "verify_email_token",
            OperationKind::ResendMail => "resend_mail",
            OperationKind::VerifyVehicle => "verify_vehicle",
            OperationKind::GetVehicles => "get_vehicles",
            OperationKind::GetMechanics => "get_mechanics",
            OperationKind::ContactMechanic => "contact_mechanic",
            OperationKind::RefreshLocation => "refresh_location",
            OperationKind::GetMechanicServices => "get_mechanic_services",
            OperationKind::GetVehicleServices => "get_vehicle_services",
            OperationKind::GetServiceReport => "get_service_report",
            OperationKind::GetProducts => "get_products",
            OperationKind::BuyProduct => "buy_product",
            OperationKind::GetOrders => "get_orders",
            OperationKind::GetOrderById => "get_order_by_id",
            OperationKind::ReturnOrder => "return_order",
            OperationKind::ApplyCoupon => "apply_coupon",
            OperationKind::GetPosts => "get_posts",
            OperationKind::GetPostById => "get_post_by_id",
            OperationKind::AddPost => "add_post",
            OperationKind::AddComment => "add_comment",
            OperationKind::UploadProfilePic => "upload_profile_pic",
            OperationKind::UploadVideo => "upload_video",
            OperationKind::ChangeVideoName => "change_video_name",
            OperationKind::ConvertVideo => "convert_video",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::ValidateAccessToken { .. } => OperationKind::ValidateAccessToken,
            Operation::LogIn { .. } => OperationKind::LogIn,
            Operation::Unlock { .. } => OperationKind::Unlock,
            Operation::SignUp { .. } => OperationKind::SignUp,
            Operation::ForgotPassword { .. } => OperationKind::ForgotPassword,
            Operation::VerifyOtp { .. } => OperationKind::VerifyOtp,
            Operation::VerifyPhoneNumberOtp { .. } => OperationKind::VerifyPhoneNumberOtp,
            Operation::ResetPassword { .. } => OperationKind::ResetPassword,
            Operation::ChangeEmail { .. } => OperationKind::ChangeEmail,
            Operation::ChangePhoneNumber { .. } => OperationKind::ChangePhoneNumber,
            Operation::VerifyEmailToken { .. } => OperationKind::VerifyEmailToken,
            Operation::ResendMail => OperationKind::ResendMail,
            Operation::VerifyVehicle { .. } => OperationKind::VerifyVehicle,
            Operation::GetVehicles => OperationKind::GetVehicles,
            Operation::GetMechanics => OperationKind::GetMechanics,
            Operation::ContactMechanic { .. } => OperationKind::ContactMechanic,
            Operation::RefreshLocation { .. } => OperationKind::RefreshLocation,
            Operation::GetMechanicServices => OperationKind::GetMechanicServices,
            Operation::GetVehicleServices { .. } => OperationKind::GetVehicleServices,
            Operation::GetServiceReport { .. } => OperationKind::GetServiceReport,
            Operation::GetProducts { .. } => OperationKind::GetProducts,
            Operation::BuyProduct { .. } => OperationKind::BuyProduct,
            Operation::GetOrders { .. } => OperationKind::GetOrders,
            Operation::GetOrderById { .. } => OperationKind::GetOrderById,
            Operation::ReturnOrder { .. } => OperationKind::ReturnOrder,
            Operation::ApplyCoupon { .. } => OperationKind::ApplyCoupon,
            Operation::GetPosts { .. } => OperationKind::GetPosts,
            Operation::GetPostById { .. } => OperationKind::GetPostById,
            Operation::AddPost { .. } => OperationKind::AddPost,
            Operation::AddComment { .. } => OperationKind::AddComment,
            Operation::UploadProfilePic { .. } => OperationKind::UploadProfilePic,
            Operation::UploadVideo { .. } => OperationKind::UploadVideo,
            Operation::ChangeVideoName { .. } => OperationKind::ChangeVideoName,
            Operation::ConvertVideo { .. } => OperationKind::ConvertVideo,
        }
    }

    /// Package this operation with a completion callback.
    pub fn on_complete(self, f: impl FnOnce(Outcome) + Send + 'static) -> Intent {
        Intent::new(self, Completion::new(f))
    }

    pub fn validate_access_token(token: AccessToken) -> Self {
        Operation::ValidateAccessToken { token }
    }

    pub fn log_in(email: impl Into<String>, password: impl Into<String>) -> Self {
        Operation::LogIn {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn unlock(email: impl Into<String>, code: impl Into<String>) -> Self {
        Operation::Unlock {
            email: email.into(),
            code: code.into(),
        }
    }

    pub fn sign_up(
        name: impl Into<String>,
        email: impl Into<String>,
        number: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Operation::SignUp {
            name: name.into(),
            email: email.into(),
            number: number.into(),
            password: password.into(),
        }
    }

    pub fn forgot_password(email: impl Into<String>) -> Self {
        Operation::ForgotPassword {
            email: email.into(),
        }
    }

    pub fn verify_otp(
        email: impl Into<String>,
        otp: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Operation::VerifyOtp {
            email: email.into(),
            otp: otp.into(),
            password: password.into(),
        }
    }

    pub fn verify_phone_number_otp(
        old_number: impl Into<String>,
        new_number: impl Into<String>,
        otp: impl Into<String>,
    ) -> Self {
        Operation::VerifyPhoneNumberOtp {
            old_number: old_number.into(),
            new_number: new_number.into(),
            otp: otp.into(),
        }
    }

    pub fn reset_password(password: impl Into<String>) -> Self {
        Operation::ResetPassword {
            password: password.into(),
        }
    }

    pub fn change_email(old_email: impl Into<String>, new_email: impl Into<String>) -> Self {
        Operation::ChangeEmail {
            old_email: old_email.into(),
            new_email: new_email.into(),
        }
    }

    pub fn change_phone_number(
        old_number: impl Into<String>,
        new_number: impl Into<String>,
    ) -> Self {
        Operation::ChangePhoneNumber {
            old_number: old_number.into(),
            new_number: new_number.into(),
        }
    }

    pub fn verify_email_token(new_email: impl Into<String>, token: impl Into<String>) -> Self {
        Operation::VerifyEmailToken {
            new_email: new_email.into(),
            token: token.into(),
        }
    }

    pub fn resend_mail() -> Self {
        Operation::ResendMail
    }

    pub fn verify_vehicle(vin: impl Into<String>, pin_code: impl Into<String>) -> Self {
        Operation::VerifyVehicle {
            vin: vin.into(),
            pin_code: pin_code.into(),
        }
    }

    pub fn get_vehicles() -> Self {
        Operation::GetVehicles
    }

    pub fn get_mechanics() -> Self {
        Operation::GetMechanics
    }

    pub fn contact_mechanic(
        mechanic_code: impl Into<String>,
        problem_details: impl Into<String>,
        vin: impl Into<String>,
    ) -> Self {
        Operation::ContactMechanic {
            mechanic_code: mechanic_code.into(),
            problem_details: problem_details.into(),
            vin: vin.into(),
        }
    }

    pub fn refresh_location(car_id: impl Into<String>) -> Self {
        Operation::RefreshLocation {
            car_id: car_id.into(),
        }
    }

    pub fn get_mechanic_services() -> Self {
        Operation::GetMechanicServices
    }

    pub fn get_vehicle_services(vin: impl Into<String>) -> Self {
        Operation::GetVehicleServices { vin: vin.into() }
    }

    pub fn get_service_report(report_id: impl Into<String>) -> Self {
        Operation::GetServiceReport {
            report_id: report_id.into(),
        }
    }

    /// First page when `offset` is `None`.
    pub fn get_products(offset: Option<Offset>) -> Self {
        Operation::GetProducts {
            offset: offset.unwrap_or_default(),
        }
    }

    pub fn buy_product(product_id: u64) -> Self {
        Operation::BuyProduct { product_id }
    }

    pub fn get_orders(offset: Option<Offset>) -> Self {
        Operation::GetOrders {
            offset: offset.unwrap_or_default(),
        }
    }

    pub fn get_order_by_id(order_id: u64) -> Self {
        Operation::GetOrderById { order_id }
    }

    pub fn return_order(order_id: u64) -> Self {
        Operation::ReturnOrder { order_id }
    }

    pub fn apply_coupon(coupon_code: impl Into<String>) -> Self {
        Operation::ApplyCoupon {
            coupon_code: coupon_code.into(),
        }
    }

    pub fn get_posts(offset: Option<Offset>) -> Self {
        Operation::GetPosts {
            offset: offset.unwrap_or_default(),
        }
    }

    pub fn get_post_by_id(post_id: impl Into<String>) -> Self {
        Operation::GetPostById {
            post_id: post_id.into(),
        }
    }

    pub fn add_post(title: impl Into<String>, content: impl Into<String>) -> Self {
        Operation::AddPost {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn add_comment(post_id: impl Into<String>, comment: impl Into<String>) -> Self {
        Operation::AddComment {
            post_id: post_id.into(),
            comment: comment.into(),
        }
    }

    pub fn upload_profile_pic(file: Upload) -> Self {
        Operation::UploadProfilePic { file }
    }

    pub fn upload_video(file: Upload) -> Self {
        Operation::UploadVideo { file }
    }

    pub fn change_video_name(video_id: u64, video_name: impl Into<String>) -> Self {
        Operation::ChangeVideoName {
            video_id,
            video_name: video_name.into(),
        }
    }

    pub fn convert_video(video_id: u64) -> Self {
        Operation::ConvertVideo { video_id }
    }
}

// Parameters include credentials; only the kind is printed.
impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Operation({})", self.kind())
    }
}

/// A caller's request: what to do and whom to tell.
#[derive(Debug)]
pub struct Intent {
    pub operation: Operation,
    pub completion: Completion,
}

impl Intent {
    pub fn new(operation: Operation, completion: Completion) -> Self {
        Self {
            operation,
            completion,
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.operation.kind()
    }
}
