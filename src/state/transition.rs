//! State-transition messages emitted by effect handlers.

use serde_json::Value;

use crate::api::AccessToken;
use crate::mvi::Message;

use super::models::{Mechanic, Order, PageCursor, Post, Product, User, Vehicle};

/// A state transition folded by every slice reducer.
///
/// Each slice reacts to the variants it owns and ignores the rest.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// A request is in flight.
    FetchingData,
    /// A request settled. `status` is `None` when no response was received.
    FetchedData { status: Option<u16> },
    LoggedIn { token: AccessToken, user: User },
    /// Login was soft-blocked; the account must go through the unlock flow.
    UnlockUserRedirect {
        email: String,
        message: Option<String>,
    },
    FetchedUser(User),
    /// The backend rejected the session token.
    InvalidSession,
    LogOut,
    PhoneNumberVerified { number: String },
    BalanceChanged { available_credit: f64 },
    FetchedVehicles(Vec<Vehicle>),
    FetchedMechanics {
        mechanics: Vec<Mechanic>,
        cursor: PageCursor,
    },
    RefreshedLocation { car_id: String, location: Value },
    FetchedProducts {
        products: Vec<Product>,
        cursor: PageCursor,
    },
    FetchedOrders {
        orders: Vec<Order>,
        cursor: PageCursor,
    },
    FetchedOrder { order_id: u64, order: Order },
    OrderReturned { order_id: u64, order: Order },
    FetchedPosts { posts: Vec<Post>, cursor: PageCursor },
    FetchedPost { post_id: String, post: Post },
    ProfilePicChanged { picture_url: Option<String> },
    VideoChanged {
        video_id: Option<u64>,
        video_url: Option<String>,
    },
    VideoNameChanged { video_name: Option<String> },
}

impl Message for Transition {}

impl Transition {
    /// HTTP status embedded in a settled message.
    pub fn status(&self) -> Option<u16> {
        match self {
            Transition::FetchedData { status } => *status,
            _ => None,
        }
    }

    /// Stable name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Transition::FetchingData => "fetching_data",
            Transition::FetchedData { .. } => "fetched_data",
            Transition::LoggedIn { .. } => "logged_in",
            Transition::UnlockUserRedirect { .. } => "unlock_user_redirect",
            Transition::FetchedUser(_) => "fetched_user",
            Transition::InvalidSession => "invalid_session",
            Transition::LogOut => "log_out",
            Transition::PhoneNumberVerified { .. } => "phone_number_verified",
            Transition::BalanceChanged { .. } => "balance_changed",
            Transition::FetchedVehicles(_) => "fetched_vehicles",
            Transition::FetchedMechanics { .. } => "fetched_mechanics",
            Transition::RefreshedLocation { .. } => "refreshed_location",
            Transition::FetchedProducts { .. } => "fetched_products",
            Transition::FetchedOrders { .. } => "fetched_orders",
            Transition::FetchedOrder { .. } => "fetched_order",
            Transition::OrderReturned { .. } => "order_returned",
            Transition::FetchedPosts { .. } => "fetched_posts",
            Transition::FetchedPost { .. } => "fetched_post",
            Transition::ProfilePicChanged { .. } => "profile_pic_changed",
            Transition::VideoChanged { .. } => "video_changed",
            Transition::VideoNameChanged { .. } => "video_name_changed",
        }
    }

    /// Messages that wipe the session-scoped slices.
    pub fn ends_session(&self) -> bool {
        matches!(self, Transition::InvalidSession | Transition::LogOut)
    }
}
