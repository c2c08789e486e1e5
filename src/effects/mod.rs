//! Effect handlers: one async function per backend operation.
//!
//! A handler performs its HTTP calls and returns a [`Resolution`]; it never
//! touches the store. The [`Dispatcher`] owns ordering: it emits the
//! in-flight message before the handler starts and commits the settled
//! message, domain transitions and completion afterwards, discarding all of
//! them if a newer intent of the same kind has started.

mod community;
mod dispatcher;
mod intent;
mod latest;
pub mod messages;
mod outcome;
mod profile;
mod resolution;
mod shop;
mod user;
mod vehicle;

pub use dispatcher::{Dispatcher, Superseded};
pub use intent::{Intent, Operation, OperationKind};
pub use latest::{TakeLatest, Ticket};
pub use outcome::{Completion, Outcome};
pub use resolution::{Rejection, Resolution};

use crate::api::{AccessToken, ApiClient};

/// Run the handler for `operation` to completion.
///
/// `token` is the session token for authenticated calls.
pub async fn perform(
    api: &ApiClient,
    token: Option<&AccessToken>,
    operation: Operation,
) -> Resolution {
    let result = match operation {
        Operation::ValidateAccessToken { token } => user::validate_access_token(api, &token).await,
        Operation::LogIn { email, password } => user::log_in(api, email, password).await,
        Operation::Unlock { email, code } => user::unlock(api, email, code).await,
        Operation::SignUp {
            name,
            email,
            number,
            password,
        } => user::sign_up(api, name, email, number, password).await,
        Operation::ForgotPassword { email } => user::forgot_password(api, email).await,
        Operation::VerifyOtp {
            email,
            otp,
            password,
        } => user::verify_otp(api, email, otp, password).await,
        Operation::VerifyPhoneNumberOtp {
            old_number,
            new_number,
            otp,
        } => user::verify_phone_number_otp(api, token, old_number, new_number, otp).await,
        Operation::ResetPassword { password } => user::reset_password(api, token, password).await,
        Operation::ChangeEmail {
            old_email,
            new_email,
        } => user::change_email(api, token, old_email, new_email).await,
        Operation::ChangePhoneNumber {
            old_number,
            new_number,
        } => user::change_phone_number(api, token, old_number, new_number).await,
        Operation::VerifyEmailToken {
            new_email,
            token: email_token,
        } => user::verify_email_token(api, token, new_email, email_token).await,

        Operation::ResendMail => vehicle::resend_mail(api, token).await,
        Operation::VerifyVehicle { vin, pin_code } => {
            vehicle::verify_vehicle(api, token, vin, pin_code).await
        }
        Operation::GetVehicles => vehicle::get_vehicles(api, token).await,
        Operation::GetMechanics => vehicle::get_mechanics(api, token).await,
        Operation::ContactMechanic {
            mechanic_code,
            problem_details,
            vin,
        } => vehicle::contact_mechanic(api, token, mechanic_code, problem_details, vin).await,
        Operation::RefreshLocation { car_id } => vehicle::refresh_location(api, token, car_id).await,
        Operation::GetMechanicServices => vehicle::get_mechanic_services(api, token).await,
        Operation::GetVehicleServices { vin } => {
            vehicle::get_vehicle_services(api, token, vin).await
        }
        Operation::GetServiceReport { report_id } => {
            vehicle::get_service_report(api, token, report_id).await
        }

        Operation::GetProducts { offset } => shop::get_products(api, token, offset).await,
        Operation::BuyProduct { product_id } => shop::buy_product(api, token, product_id).await,
        Operation::GetOrders { offset } => shop::get_orders(api, token, offset).await,
        Operation::GetOrderById { order_id } => shop::get_order_by_id(api, token, order_id).await,
        Operation::ReturnOrder { order_id } => shop::return_order(api, token, order_id).await,
        Operation::ApplyCoupon { coupon_code } => {
            shop::apply_coupon(api, token, coupon_code).await
        }

        Operation::GetPosts { offset } => community::get_posts(api, token, offset).await,
        Operation::GetPostById { post_id } => community::get_post_by_id(api, token, post_id).await,
        Operation::AddPost { title, content } => {
            community::add_post(api, token, title, content).await
        }
        Operation::AddComment { post_id, comment } => {
            community::add_comment(api, token, post_id, comment).await
        }

        Operation::UploadProfilePic { file } => profile::upload_profile_pic(api, token, file).await,
        Operation::UploadVideo { file } => profile::upload_video(api, token, file).await,
        Operation::ChangeVideoName {
            video_id,
            video_name,
        } => profile::change_video_name(api, token, video_id, video_name).await,
        Operation::ConvertVideo { video_id } => profile::convert_video(api, token, video_id).await,
    };

    let resolution = result.unwrap_or_else(Resolution::from);
    if let Outcome::Failure(message) = &resolution.outcome {
        tracing::debug!(status = ?resolution.status, message = %message, "Operation failed");
    }
    resolution
}
