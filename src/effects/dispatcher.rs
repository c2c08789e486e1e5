//! Runs intents against the backend and folds the results into the store.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::task::AbortHandle;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::ApiClient;
use crate::state::Transition;
use crate::store::Store;

use super::intent::{Intent, Operation, OperationKind};
use super::latest::{TakeLatest, Ticket};
use super::outcome::{Completion, Outcome};
use super::resolution::Resolution;

/// A newer request of the same kind replaced this one before it finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("superseded by a newer request of the same kind")]
pub struct Superseded;

/// Cloneable handle that executes intents.
///
/// For every intent: `FetchingData` is dispatched immediately, the handler
/// runs on the tokio runtime, and, if no newer intent of the same kind has
/// started meanwhile, `FetchedData`, the handler's transitions and the
/// completion follow in that order.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<DispatcherInner>,
}

struct DispatcherInner {
    api: ApiClient,
    store: Store,
    latest: TakeLatest,
    /// Newest registered task per kind.
    running: Mutex<HashMap<OperationKind, (Ticket, AbortHandle)>>,
}

impl Dispatcher {
    pub fn new(api: ApiClient, store: Store) -> Self {
        Self {
            inner: Arc::new(DispatcherInner {
                api,
                store,
                latest: TakeLatest::new(),
                running: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    /// Start an intent, superseding any in-flight intent of the same kind.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&self, intent: Intent) {
        let Intent {
            operation,
            completion,
        } = intent;
        let kind = operation.kind();
        let ticket = self.inner.latest.begin(kind);
        let span = tracing::debug_span!("operation", kind = %kind, request_id = %Uuid::new_v4());

        span.in_scope(|| tracing::debug!("Dispatching"));
        self.inner.store.dispatch(Transition::FetchingData);
        let token = self.inner.store.select(|state| state.session.token().cloned());

        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(
            async move {
                let resolution = super::perform(&inner.api, token.as_ref(), operation).await;
                inner.finish(ticket, resolution, completion);
            }
            .instrument(span),
        );

        self.inner.register(ticket, task.abort_handle());
    }

    /// Run an operation and wait for its outcome.
    pub async fn request(&self, operation: Operation) -> Result<Outcome, Superseded> {
        let (completion, outcome) = Completion::channel();
        self.dispatch(Intent::new(operation, completion));
        outcome.await.map_err(|_| Superseded)
    }
}

impl DispatcherInner {
    /// Record `handle` as the running task for its kind and abort whichever
    /// of the two tasks holds the older ticket. Registrations may arrive out
    /// of ticket order when intents are dispatched from several threads.
    fn register(&self, ticket: Ticket, handle: AbortHandle) {
        let mut running = self.running.lock();
        match running.get(&ticket.kind()) {
            Some((newest, _)) if newest.supersedes(ticket) => {
                tracing::debug!(kind = %ticket.kind(), "Newer intent already running");
                handle.abort();
            }
            _ => {
                if let Some((_, previous)) = running.insert(ticket.kind(), (ticket, handle)) {
                    previous.abort();
                }
            }
        }
    }

    fn finish(&self, ticket: Ticket, resolution: Resolution, completion: Completion) {
        let Resolution {
            status,
            transitions,
            outcome,
        } = resolution;

        let committed = self.latest.commit(ticket, || {
            self.store.dispatch(Transition::FetchedData { status });
            for transition in transitions {
                self.store.dispatch(transition);
            }
        });

        match committed {
            Some(()) => {
                tracing::debug!(status = ?status, outcome = outcome.tag(), "Completed");
                completion.complete(outcome);
            }
            None => {
                tracing::debug!(kind = %ticket.kind(), "Superseded, discarding result");
            }
        }
    }
}
