//! Cascading selection across systems, menus, and resources.

use rolegrant::domain::entities::ResourceNode;
use rolegrant::infrastructure::InMemoryResourceLoader;

use crate::common::*;

#[tokio::test]
async fn selecting_unloaded_menu_loads_and_selects_its_resources() {
    let loader = InMemoryResourceLoader::new().with_resources(
        "M1",
        vec![
            ResourceNode::new("R1", "Read", "M1"),
            ResourceNode::new("R2", "Write", "M1"),
        ],
    );
    let mut h = SelectionHarness::new(&single_menu_forest(), loader);

    h.selector.select_menu(&mut h.state, "M1").await.unwrap();

    assert_eq!(h.systems(), ["S1"]);
    assert_eq!(h.menus(), ["M1"]);
    assert_eq!(h.resources(), ["R1", "R2"]);
}

#[test]
fn selecting_nested_resource_selects_its_menu_chain() {
    let mut h = SelectionHarness::new(&nested_menu_forest(), InMemoryResourceLoader::new());

    h.selector.select_resource(&mut h.state, "R3");

    assert_eq!(h.resources(), ["R3"]);
    assert_eq!(h.menus(), ["M1", "M2"]);
    assert_eq!(h.systems(), ["S1"]);
}

#[test]
fn deselecting_only_resource_unwinds_the_chain() {
    let mut h = SelectionHarness::new(&nested_menu_forest(), InMemoryResourceLoader::new());
    h.selector.select_resource(&mut h.state, "R3");

    h.selector.deselect_resource(&mut h.state, "R3");

    assert!(h.resources().is_empty());
    assert!(h.menus().is_empty());
    assert!(h.systems().is_empty());
}

#[test]
fn selected_sibling_keeps_the_parent() {
    let mut h = SelectionHarness::new(&sibling_menu_forest(), InMemoryResourceLoader::new());
    h.selector.select_resource(&mut h.state, "R1");
    h.selector.select_resource(&mut h.state, "R2");

    h.selector.deselect_resource(&mut h.state, "R1");

    assert!(!h.state.is_menu_selected("M2"));
    assert!(h.state.is_menu_selected("M1"));
    assert!(h.state.is_menu_selected("M3"));
    assert_eq!(h.resources(), ["R2"]);
    assert_eq!(h.systems(), ["S1"]);
}

#[tokio::test]
async fn last_resource_of_leaf_menu_releases_menu_and_system() {
    let mut h = SelectionHarness::new(&admin_forest(), admin_loader());
    h.selector.select_menu(&mut h.state, "bill.invoices").await.unwrap();
    assert_eq!(h.systems(), ["bill"]);

    h.selector.deselect_resource(&mut h.state, "invoices.export");

    assert!(!h.state.is_menu_selected("bill.invoices"));
    assert!(!h.state.is_system_selected("bill"));
}

#[tokio::test]
async fn system_survives_while_another_of_its_menus_is_selected() {
    let mut h = SelectionHarness::new(&admin_forest(), admin_loader());
    h.selector.select_menu(&mut h.state, "iam.audit").await.unwrap();
    h.selector.select_menu(&mut h.state, "iam.roles").await.unwrap();

    h.selector.deselect_resource(&mut h.state, "audit.export");

    assert!(!h.state.is_menu_selected("iam.audit"));
    assert_eq!(h.menus(), ["iam.roles", "iam.users"]);
    assert_eq!(h.systems(), ["iam"]);
}

#[tokio::test]
async fn repeated_select_and_deselect_are_idempotent() {
    let mut h = SelectionHarness::new(&admin_forest(), admin_loader());

    h.selector.select_menu(&mut h.state, "iam.users").await.unwrap();
    let once = h.state.payload();
    h.selector.select_menu(&mut h.state, "iam.users").await.unwrap();
    assert_eq!(h.state.payload(), once);

    h.selector.deselect_menu(&mut h.state, "iam.users");
    let cleared = h.state.payload();
    h.selector.deselect_menu(&mut h.state, "iam.users");
    assert_eq!(h.state.payload(), cleared);
    assert!(cleared.is_empty());
}
