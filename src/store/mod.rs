//! The single state container.
//!
//! Every transition goes through the middleware chain, then through every
//! slice reducer, under one lock. Observers get a fresh snapshot over a
//! `watch` channel and every reduced message over a `broadcast` channel.
//! When the persisted projection changes it is written to storage after
//! the state lock is released; a write older than the last stored one is
//! skipped.

mod middleware;
mod persist;

pub use middleware::{AuthInterceptor, Middleware};
pub use persist::{FilePersistence, MemoryPersistence, PersistError, PersistedState, Persistence};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{broadcast, watch};

use crate::state::{AppState, Transition};

use middleware::run_chain;

const TRANSITION_CHANNEL_CAPACITY: usize = 256;

/// Cloneable handle to the application state.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    state: Mutex<AppState>,
    middleware: Vec<Box<dyn Middleware>>,
    persistence: Option<Arc<dyn Persistence>>,
    snapshots: watch::Sender<AppState>,
    transitions: broadcast::Sender<Transition>,
    /// Bumped under the state lock whenever the projection changes.
    revision: AtomicU64,
    /// Revision of the projection last handed to storage.
    stored_revision: Mutex<u64>,
}

/// Builder for [`Store`]. The auth interceptor is always installed first.
pub struct StoreBuilder {
    middleware: Vec<Box<dyn Middleware>>,
    persistence: Option<Arc<dyn Persistence>>,
}

impl StoreBuilder {
    pub fn middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.middleware.push(Box::new(middleware));
        self
    }

    pub fn persistence(mut self, persistence: Arc<dyn Persistence>) -> Self {
        self.persistence = Some(persistence);
        self
    }

    /// Build the store, restoring persisted slices if storage is configured.
    pub fn build(self) -> Store {
        let (snapshots, _) = watch::channel(AppState::default());
        let (transitions, _) = broadcast::channel(TRANSITION_CHANNEL_CAPACITY);
        let store = Store {
            inner: Arc::new(StoreInner {
                state: Mutex::new(AppState::default()),
                middleware: self.middleware,
                persistence: self.persistence,
                snapshots,
                transitions,
                revision: AtomicU64::new(0),
                stored_revision: Mutex::new(0),
            }),
        };
        if let Err(e) = store.restore() {
            tracing::warn!(error = %e, "Failed to restore persisted state, starting logged out");
        }
        store
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Store {
    pub fn builder() -> StoreBuilder {
        StoreBuilder {
            middleware: vec![Box::new(AuthInterceptor)],
            persistence: None,
        }
    }

    /// In-memory store with no persistence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the persisted session and profile slices into the live state.
    ///
    /// Returns whether anything was restored.
    pub fn restore(&self) -> Result<bool, PersistError> {
        let Some(persistence) = &self.inner.persistence else {
            return Ok(false);
        };
        let Some(persisted) = persistence.load()? else {
            return Ok(false);
        };

        let mut state = self.inner.state.lock();
        state.session = persisted.session;
        state.session.fetching_data = false;
        state.profile = persisted.profile;
        self.inner.snapshots.send_replace(state.clone());
        tracing::debug!(
            logged_in = state.session.is_logged_in,
            "Restored persisted session"
        );
        Ok(true)
    }

    /// Run one transition through the middleware chain and every reducer.
    pub fn dispatch(&self, transition: Transition) {
        let pending = {
            let mut state = self.inner.state.lock();
            let before = PersistedState::capture(&state);

            let mut forwarded = Vec::with_capacity(2);
            run_chain(&self.inner.middleware, transition, &mut forwarded);

            for message in forwarded {
                tracing::trace!(transition = message.name(), "Reducing");
                *state = std::mem::take(&mut *state).reduce(&message);
                // No subscribers is fine
                let _ = self.inner.transitions.send(message);
            }

            let after = PersistedState::capture(&state);
            self.inner.snapshots.send_replace(state.clone());
            (after != before).then(|| {
                let revision = self.inner.revision.fetch_add(1, Ordering::Relaxed) + 1;
                (revision, after)
            })
        };

        if let Some((revision, projection)) = pending {
            self.persist(revision, &projection);
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> AppState {
        self.inner.state.lock().clone()
    }

    /// Read a projection of the current state without cloning all of it.
    pub fn select<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.inner.state.lock())
    }

    /// Snapshot stream, updated after every dispatch.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.inner.snapshots.subscribe()
    }

    /// Every message that reached the reducers, in order.
    pub fn transitions(&self) -> broadcast::Receiver<Transition> {
        self.inner.transitions.subscribe()
    }

    fn persist(&self, revision: u64, projection: &PersistedState) {
        let Some(persistence) = &self.inner.persistence else {
            return;
        };
        let mut stored = self.inner.stored_revision.lock();
        if *stored >= revision {
            tracing::trace!(revision, stored = *stored, "Skipping stale projection");
            return;
        }
        let result = if projection.is_empty() {
            persistence.clear()
        } else {
            persistence.save(projection)
        };
        match result {
            Ok(()) => *stored = revision,
            Err(e) => tracing::warn!(error = %e, "Failed to persist session state"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AccessToken;
    use crate::state::{SessionState, User};

    fn login() -> Transition {
        Transition::LoggedIn {
            token: AccessToken::new("tok"),
            user: User {
                email: Some("a@b.c".into()),
                picture_url: Some("pic".into()),
                ..User::default()
            },
        }
    }

    #[test]
    fn dispatch_reduces_every_slice() {
        let store = Store::new();
        store.dispatch(login());
        let state = store.state();
        assert!(state.session.is_logged_in);
        assert_eq!(state.profile.picture_url.as_deref(), Some("pic"));
    }

    #[test]
    fn unauthorized_settle_invalidates_session() {
        let store = Store::new();
        store.dispatch(login());
        let mut rx = store.transitions();

        store.dispatch(Transition::FetchedData { status: Some(401) });

        assert_eq!(rx.try_recv().unwrap(), Transition::InvalidSession);
        assert_eq!(
            rx.try_recv().unwrap(),
            Transition::FetchedData { status: Some(401) }
        );
        let state = store.state();
        assert!(!state.session.is_logged_in);
        assert!(state.session.access_token.is_none());
        assert_eq!(state.profile, Default::default());
    }

    #[test]
    fn subscribers_see_latest_snapshot() {
        let store = Store::new();
        let rx = store.subscribe();
        store.dispatch(Transition::FetchingData);
        assert!(rx.borrow().session.fetching_data);
        store.dispatch(Transition::FetchedData { status: Some(200) });
        assert!(!rx.borrow().session.fetching_data);
    }

    #[test]
    fn persists_on_login_and_clears_on_logout() {
        let storage = Arc::new(MemoryPersistence::new());
        let store = Store::builder().persistence(storage.clone()).build();

        store.dispatch(Transition::FetchingData);
        assert!(storage.snapshot().is_none());

        store.dispatch(login());
        let saved = storage.snapshot().unwrap();
        assert!(saved.session.is_logged_in);
        assert!(!saved.session.fetching_data);

        store.dispatch(Transition::LogOut);
        assert!(storage.snapshot().is_none());
    }

    #[test]
    fn build_restores_persisted_session() {
        let storage = Arc::new(MemoryPersistence::new());
        Store::builder()
            .persistence(storage.clone())
            .build()
            .dispatch(login());

        let restored = Store::builder().persistence(storage).build();
        let state = restored.state();
        assert!(state.session.is_logged_in);
        assert_eq!(
            state.session.token().map(AccessToken::expose),
            Some("tok")
        );
        assert_eq!(state.profile.picture_url.as_deref(), Some("pic"));
        assert!(state.shop.products.is_empty());
    }

    /// Records whether the state lock was free each time storage was hit.
    #[derive(Default)]
    struct LockObserver {
        store: Mutex<Option<Store>>,
        lock_free: Mutex<Vec<bool>>,
    }

    impl LockObserver {
        fn observe(&self) {
            if let Some(store) = self.store.lock().as_ref() {
                let free = store.inner.state.try_lock().is_some();
                self.lock_free.lock().push(free);
            }
        }
    }

    impl Persistence for LockObserver {
        fn load(&self) -> Result<Option<PersistedState>, PersistError> {
            Ok(None)
        }

        fn save(&self, _state: &PersistedState) -> Result<(), PersistError> {
            self.observe();
            Ok(())
        }

        fn clear(&self) -> Result<(), PersistError> {
            self.observe();
            Ok(())
        }
    }

    #[test]
    fn storage_is_written_outside_the_state_lock() {
        let observer = Arc::new(LockObserver::default());
        let store = Store::builder().persistence(observer.clone()).build();
        *observer.store.lock() = Some(store.clone());

        store.dispatch(login());
        store.dispatch(Transition::LogOut);

        *observer.store.lock() = None;
        assert_eq!(*observer.lock_free.lock(), vec![true, true]);
    }

    #[test]
    fn stale_projection_does_not_overwrite_newer_one() {
        let storage = Arc::new(MemoryPersistence::new());
        let store = Store::builder().persistence(storage.clone()).build();
        let newer = PersistedState {
            session: SessionState {
                is_logged_in: true,
                ..SessionState::default()
            },
            ..PersistedState::default()
        };
        let older = PersistedState {
            session: SessionState {
                name: Some("stale".into()),
                ..SessionState::default()
            },
            ..PersistedState::default()
        };

        store.persist(2, &newer);
        store.persist(1, &older);

        assert_eq!(storage.snapshot(), Some(newer));
    }
}
