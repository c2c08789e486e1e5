//! Bearer credentials for authenticated backend calls.

use serde::{Deserialize, Serialize};

/// Access token issued by the identity service.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when building requests.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to APIs.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccessToken(••••••••)")
    }
}

impl std::fmt::Display for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Header name and value for authentication.
pub type AuthHeader = (&'static str, String);

/// Build the `Authorization: Bearer` header for a token.
///
/// Returns `None` for an empty token so unauthenticated calls go out
/// without a dangling `Bearer ` prefix.
pub fn bearer_header(token: &AccessToken) -> Option<AuthHeader> {
    if token.is_empty() {
        return None;
    }
    Some(("Authorization", format!("Bearer {}", token.expose())))
}
