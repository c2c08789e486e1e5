//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use crapi_client::api::{AccessToken, ApiClient};
use crapi_client::config::Config;
use crapi_client::effects::Dispatcher;
use crapi_client::state::{Transition, User};
use crapi_client::store::Store;
use std::net::TcpListener;
use tokio::sync::broadcast;

use mock_backend::MockBackend;

pub const TOKEN: &str = "test-token";

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Config pointing every service at `base`, mounted the way the crAPI
/// gateway mounts them.
pub fn config_for(base: &str) -> Config {
    let mut config = Config::default();
    config.services.identity = format!("{}/identity", base);
    config.services.workshop = format!("{}/workshop", base);
    config.services.community = format!("{}/community", base);
    config.defaults.timeout_seconds = 5;
    config.defaults.connect_timeout_seconds = 2;
    config
}

pub fn dispatcher_for(backend: &MockBackend) -> Dispatcher {
    dispatcher_with_store(backend, Store::new())
}

pub fn dispatcher_with_store(backend: &MockBackend, store: Store) -> Dispatcher {
    let api = ApiClient::new(&config_for(&backend.base_url())).expect("client");
    Dispatcher::new(api, store)
}

/// Dispatcher whose backend refuses every connection.
pub fn offline_dispatcher() -> Dispatcher {
    let base = format!("http://127.0.0.1:{}", free_port());
    let api = ApiClient::new(&config_for(&base)).expect("client");
    Dispatcher::new(api, Store::new())
}

/// Put the store into a logged-in state with [`TOKEN`].
pub fn log_in(store: &Store) {
    store.dispatch(Transition::LoggedIn {
        token: AccessToken::new(TOKEN),
        user: User {
            email: Some("owner@example.com".to_string()),
            name: Some("Owner".to_string()),
            ..User::default()
        },
    });
}

/// Everything broadcast so far.
pub fn drain(rx: &mut broadcast::Receiver<Transition>) -> Vec<Transition> {
    let mut seen = Vec::new();
    while let Ok(transition) = rx.try_recv() {
        seen.push(transition);
    }
    seen
}

/// Names of everything broadcast so far.
pub fn drain_names(rx: &mut broadcast::Receiver<Transition>) -> Vec<&'static str> {
    drain(rx).iter().map(Transition::name).collect()
}
