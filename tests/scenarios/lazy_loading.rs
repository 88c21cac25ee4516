//! Lazy resource loading: retries, failures, and the directory loader.

use std::fs;
use std::sync::Arc;

use tempfile::tempdir;

use rolegrant::domain::services::transform;
use rolegrant::infrastructure::{InMemoryResourceLoader, JsonDirResourceLoader};
use rolegrant::{CascadeSelector, LoadError, PermissionState};

use crate::common::*;

#[tokio::test]
async fn empty_first_answer_is_retried_once() {
    let mut h = SelectionHarness::new(&admin_forest(), admin_loader().stale("iam.roles", 1));

    h.selector.select_menu(&mut h.state, "iam.roles").await.unwrap();

    assert_eq!(h.loader.call_count("iam.roles"), 2);
    assert!(h.state.is_resource_selected("roles.assign"));
}

#[tokio::test]
async fn a_menu_is_loaded_at_most_twice() {
    let mut h = SelectionHarness::new(&admin_forest(), InMemoryResourceLoader::new());

    for _ in 0..3 {
        h.selector.select_menu(&mut h.state, "iam.roles").await.unwrap();
        h.selector.deselect_menu(&mut h.state, "iam.roles");
    }
    h.selector.expand_menu(&mut h.state, "iam.roles").await.unwrap();

    assert_eq!(h.loader.call_count("iam.roles"), 2);
}

#[tokio::test]
async fn failed_load_is_reported_and_can_be_retried() {
    let mut h = SelectionHarness::new(&admin_forest(), admin_loader().failing("iam.roles", 1));

    let err = h
        .selector
        .select_menu(&mut h.state, "iam.users")
        .await
        .unwrap_err();

    assert_eq!(err.menu_id(), "iam.roles");
    assert!(matches!(err, LoadError::Failed { .. }));
    // the parent finished before the child failed
    assert_eq!(h.resources(), ["users.create", "users.delete"]);
    assert_eq!(h.menus(), ["iam.roles", "iam.users"]);

    h.selector.select_menu(&mut h.state, "iam.users").await.unwrap();
    assert!(h.state.is_resource_selected("roles.assign"));
    assert!(!h.state.has_failed_load("iam.roles"));
}

#[tokio::test]
async fn directory_loader_feeds_the_cascade() {
    let dir = tempdir().unwrap();
    for (menu_id, doc) in admin_resources() {
        fs::write(dir.path().join(format!("{menu_id}.json")), doc.to_string()).unwrap();
    }

    let selector = CascadeSelector::new(Arc::new(JsonDirResourceLoader::new(dir.path())));
    let mut state = PermissionState::new();
    state.load_index(transform(&admin_forest()));

    selector.select_system(&mut state, "iam").await.unwrap();

    assert_eq!(
        ids(state.selected_resource_ids()),
        ["audit.export", "roles.assign", "users.create", "users.delete"]
    );
    let create = state.resource("users.create").unwrap();
    assert_eq!(create.code, "iam:user:create");
    assert_eq!(create.menu_id, "iam.users");
    assert!(state.resource("invoices.export").is_none());
}
