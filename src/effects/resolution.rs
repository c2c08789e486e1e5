//! How a handler reports what happened.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::{ApiError, Reply};
use crate::state::Transition;

use super::outcome::Outcome;

/// Everything a finished handler wants to happen, applied atomically by the
/// dispatcher: the settled status, then `transitions`, then `outcome`.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Status of the last response received, `None` if none was.
    pub status: Option<u16>,
    pub transitions: Vec<Transition>,
    pub outcome: Outcome,
}

impl Resolution {
    pub fn new(status: Option<u16>, outcome: Outcome) -> Self {
        Self {
            status,
            transitions: Vec::new(),
            outcome,
        }
    }

    pub fn success(reply: &Reply, payload: impl Into<Value>) -> Self {
        Self::new(Some(reply.status), Outcome::Success(payload.into()))
    }

    /// Success carrying whatever message the server sent back.
    pub fn relay(reply: &Reply) -> Self {
        let payload = reply.server_message().map_or(Value::Null, Value::from);
        Self::success(reply, payload)
    }

    pub fn failure(reply: &Reply, message: impl Into<String>) -> Self {
        Self::new(Some(reply.status), Outcome::Failure(message.into()))
    }

    pub fn redirect(reply: &Reply, target: impl Into<String>) -> Self {
        Self::new(Some(reply.status), Outcome::Redirect(target.into()))
    }

    pub fn emit(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }
}

/// A failed step. Converts into a `Failure` resolution with no transitions.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub status: Option<u16>,
    pub message: String,
}

impl Rejection {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<Rejection> for Resolution {
    fn from(rejection: Rejection) -> Self {
        Resolution::new(rejection.status, Outcome::Failure(rejection.message))
    }
}

pub(crate) type Step<T> = Result<T, Rejection>;

/// Turn a transport error into a rejection carrying no status.
pub(crate) trait Sent {
    fn or_fallback(self, fallback: &str) -> Step<Reply>;
}

impl Sent for Result<Reply, ApiError> {
    fn or_fallback(self, fallback: &str) -> Step<Reply> {
        self.map_err(|e| {
            tracing::warn!(error = %e, error_type = e.error_type(), "Request failed");
            Rejection::new(None, fallback)
        })
    }
}

/// Status and body classification for a received reply.
pub(crate) trait Classify {
    /// 2xx with any body. Otherwise the server message, or `fallback`.
    fn check(&self, fallback: &str) -> Step<()>;
    /// 2xx with any body. Otherwise always `message`.
    fn check_fixed(&self, message: &str) -> Step<()>;
    /// 2xx with a JSON body. Otherwise the server message, or `fallback`.
    fn body(&self, fallback: &str) -> Step<&Value>;
    /// The whole 2xx JSON body, decoded.
    fn parse<T: DeserializeOwned>(&self, fallback: &str) -> Step<T>;
    /// One field of a 2xx JSON body, decoded.
    fn require<T: DeserializeOwned>(&self, key: &str, fallback: &str) -> Step<T>;
    /// 503 on verification flows hands control elsewhere.
    fn unavailable(&self, fallback: &str) -> Option<Resolution>;
}

impl Classify for Reply {
    fn check(&self, fallback: &str) -> Step<()> {
        if self.is_success() {
            return Ok(());
        }
        let message = self.server_message().unwrap_or_else(|| fallback.to_string());
        Err(Rejection::new(Some(self.status), message))
    }

    fn check_fixed(&self, message: &str) -> Step<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(Rejection::new(Some(self.status), message))
        }
    }

    fn body(&self, fallback: &str) -> Step<&Value> {
        self.check(fallback)?;
        self.body.as_ref().ok_or_else(|| {
            tracing::warn!(status = self.status, "Expected a JSON body");
            Rejection::new(Some(self.status), fallback)
        })
    }

    fn parse<T: DeserializeOwned>(&self, fallback: &str) -> Step<T> {
        self.body(fallback)?;
        self.decode().ok_or_else(|| {
            tracing::warn!(status = self.status, "Malformed response body");
            Rejection::new(Some(self.status), fallback)
        })
    }

    fn require<T: DeserializeOwned>(&self, key: &str, fallback: &str) -> Step<T> {
        self.body(fallback)?;
        self.field(key).ok_or_else(|| {
            tracing::warn!(status = self.status, field = key, "Missing or malformed field");
            Rejection::new(Some(self.status), fallback)
        })
    }

    fn unavailable(&self, fallback: &str) -> Option<Resolution> {
        (self.status == 503).then(|| {
            let message = self.server_message().unwrap_or_else(|| fallback.to_string());
            Resolution::redirect(self, message)
        })
    }
}
