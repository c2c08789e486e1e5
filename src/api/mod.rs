//! HTTP plumbing: routes, the reqwest client, replies and transport errors.

mod client;
mod credentials;
pub mod endpoints;
mod error;
mod reply;

pub use client::ApiClient;
pub use credentials::{bearer_header, AccessToken, AuthHeader};
pub use endpoints::{Route, Service};
pub use error::ApiError;
pub use reply::Reply;
