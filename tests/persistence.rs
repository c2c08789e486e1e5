//! Session persistence across store instances.

mod common;

use std::fs;
use std::sync::Arc;

use common::mock_backend::{MockBackend, MockResponse};
use common::{dispatcher_with_store, log_in, TOKEN};
use crapi_client::effects::Operation;
use crapi_client::state::Transition;
use crapi_client::store::{FilePersistence, Store};
use serde_json::Value;

fn file_store(path: &std::path::Path) -> Store {
    Store::builder()
        .persistence(Arc::new(FilePersistence::new(path.to_path_buf())))
        .build()
}

#[test]
fn login_is_written_and_restored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state").join("reducers.json");

    let store = file_store(&path);
    log_in(&store);

    let saved: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["session"]["access_token"], Value::from(TOKEN));
    assert!(saved["session"].get("fetching_data").is_none());

    let restored = file_store(&path).state();
    assert!(restored.session.is_logged_in);
    assert_eq!(restored.session.token().map(|t| t.expose()), Some(TOKEN));
    assert_eq!(restored.session.email.as_deref(), Some("owner@example.com"));
}

#[test]
fn busy_flag_alone_does_not_rewrite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reducers.json");

    let store = file_store(&path);
    store.dispatch(Transition::FetchingData);
    assert!(!path.exists());
}

#[test]
fn logout_removes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reducers.json");

    let store = file_store(&path);
    log_in(&store);
    assert!(path.exists());

    store.dispatch(Transition::LogOut);
    assert!(!path.exists());
    assert!(!file_store(&path).state().session.is_logged_in);
}

#[test]
fn corrupt_file_starts_logged_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reducers.json");
    fs::write(&path, "{ not json").unwrap();

    let store = file_store(&path);
    assert!(!store.state().session.is_logged_in);
    assert!(store.restore().is_err());
}

#[tokio::test]
async fn unauthorized_response_clears_persisted_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reducers.json");
    let backend = MockBackend::start().await;
    backend
        .on(
            "/workshop/api/shop/products",
            MockResponse::error(401, "Invalid Token"),
        )
        .await;

    let store = file_store(&path);
    log_in(&store);
    let dispatcher = dispatcher_with_store(&backend, store);

    dispatcher
        .request(Operation::get_products(None))
        .await
        .unwrap();

    assert!(!dispatcher.store().state().session.is_logged_in);
    assert!(!path.exists());
}
