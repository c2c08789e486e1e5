//! HTTP response as seen by effect handlers.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Status plus body. A body that is empty or not JSON is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: Option<Value>,
}

impl Reply {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Human-readable message supplied by the server, if any.
    ///
    /// Backends report errors as either `message` or `error`.
    pub fn server_message(&self) -> Option<String> {
        let body = self.body.as_ref()?;
        ["message", "error"]
            .iter()
            .filter_map(|key| body.get(*key))
            .find_map(|value| value.as_str().map(str::to_string))
    }

    /// Deserialize one top-level field of the body.
    pub fn field<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.body.as_ref()?.get(key)?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Deserialize the whole body.
    pub fn decode<T: DeserializeOwned>(&self) -> Option<T> {
        serde_json::from_value(self.body.clone()?).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_range() {
        assert!(Reply::new(200, None).is_success());
        assert!(Reply::new(204, None).is_success());
        assert!(!Reply::new(302, None).is_success());
        assert!(!Reply::new(423, None).is_success());
    }

    #[test]
    fn server_message_prefers_message_then_error() {
        let both = Reply::new(400, Some(json!({"message": "m", "error": "e"})));
        assert_eq!(both.server_message().as_deref(), Some("m"));
        let error_only = Reply::new(400, Some(json!({"error": "e"})));
        assert_eq!(error_only.server_message().as_deref(), Some("e"));
        let non_string = Reply::new(400, Some(json!({"message": 3})));
        assert_eq!(non_string.server_message(), None);
        assert_eq!(Reply::new(500, None).server_message(), None);
    }

    #[test]
    fn field_extraction() {
        let reply = Reply::new(200, Some(json!({"token": "abc", "credit": 12.5})));
        assert_eq!(reply.field::<String>("token").as_deref(), Some("abc"));
        assert_eq!(reply.field::<f64>("credit"), Some(12.5));
        assert_eq!(reply.field::<String>("missing"), None);
    }
}
