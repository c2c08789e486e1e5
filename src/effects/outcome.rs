//! What a caller gets back from an operation.

use std::fmt;

use serde_json::Value;
use tokio::sync::oneshot;

/// Three-way result reported to the caller of an operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Response data, or a confirmation message as a JSON string.
    Success(Value),
    /// Human-readable reason.
    Failure(String),
    /// The caller should navigate to the given target instead of showing
    /// an inline error.
    Redirect(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Outcome::Success(_) => "success",
            Outcome::Failure(_) => "failure",
            Outcome::Redirect(_) => "redirect",
        }
    }

    /// The text carried by the outcome, if it is one.
    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Success(value) => value.as_str(),
            Outcome::Failure(message) | Outcome::Redirect(message) => Some(message),
        }
    }
}

/// Single-shot completion callback. Consumed by value, so it fires at most
/// once; dropping it unfired is how a superseded request is discarded.
pub struct Completion(Box<dyn FnOnce(Outcome) + Send>);

impl Completion {
    pub fn new(f: impl FnOnce(Outcome) + Send + 'static) -> Self {
        Self(Box::new(f))
    }

    /// Completion that delivers into a oneshot channel. The receiver sees
    /// `RecvError` if the completion is dropped unfired.
    pub fn channel() -> (Self, oneshot::Receiver<Outcome>) {
        let (tx, rx) = oneshot::channel();
        let completion = Self::new(move |outcome| {
            // Receiver gone means the caller stopped waiting
            let _ = tx.send(outcome);
        });
        (completion, rx)
    }

    /// Completion that discards the outcome.
    pub fn ignore() -> Self {
        Self::new(|_| {})
    }

    pub fn complete(self, outcome: Outcome) {
        (self.0)(outcome)
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Completion(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_reads_text_outcomes() {
        assert_eq!(Outcome::Success(json!("done")).message(), Some("done"));
        assert_eq!(Outcome::Success(json!({"a": 1})).message(), None);
        assert_eq!(Outcome::Failure("no".into()).message(), Some("no"));
        assert_eq!(Outcome::Redirect("/unlock".into()).message(), Some("/unlock"));
    }

    #[tokio::test]
    async fn channel_delivers_outcome() {
        let (completion, rx) = Completion::channel();
        completion.complete(Outcome::Failure("x".into()));
        assert_eq!(rx.await.unwrap(), Outcome::Failure("x".into()));
    }

    #[tokio::test]
    async fn dropped_completion_closes_channel() {
        let (completion, rx) = Completion::channel();
        drop(completion);
        assert!(rx.await.is_err());
    }
}
