//! Client-side orchestration for the crAPI vehicle, shop and community
//! services.
//!
//! Callers build an [`effects::Intent`], hand it to an
//! [`effects::Dispatcher`], and observe results through the completion
//! callback and the [`store::Store`].

pub mod api;
pub mod config;
pub mod effects;
pub mod logging;
pub mod mvi;
pub mod state;
pub mod store;
