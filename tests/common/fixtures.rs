//! Test fixtures: permission forests and resource catalogs.

#![allow(dead_code)]

use serde_json::{json, Value};

use rolegrant::domain::entities::ResourceNode;
use rolegrant::infrastructure::InMemoryResourceLoader;
use rolegrant::{parse_forest, PermissionTreeNode};

pub fn forest(value: Value) -> Vec<PermissionTreeNode> {
    parse_forest(&value.to_string()).expect("fixture forest must parse")
}

/// S1 → M1, resources not loaded yet
pub fn single_menu_forest() -> Vec<PermissionTreeNode> {
    forest(json!([
        {"type": "system", "id": "S1", "name": "IAM", "systemId": "S1", "children": [
            {"type": "menu", "id": "M1", "name": "Users", "menuId": "M1"}
        ]}
    ]))
}

/// S1 → M1 → M2 [R3]
pub fn nested_menu_forest() -> Vec<PermissionTreeNode> {
    forest(json!([
        {"type": "system", "id": "S1", "name": "IAM", "systemId": "S1", "children": [
            {"type": "menu", "id": "M1", "name": "Settings", "menuId": "M1", "children": [
                {"type": "menu", "id": "M2", "name": "Audit", "menuId": "M2", "children": [
                    {"type": "resource", "id": "R3", "name": "Export", "resourceId": "R3"}
                ]}
            ]}
        ]}
    ]))
}

/// S1 → M1 → { M2 [R1], M3 [R2] }
pub fn sibling_menu_forest() -> Vec<PermissionTreeNode> {
    forest(json!([
        {"type": "system", "id": "S1", "name": "IAM", "systemId": "S1", "children": [
            {"type": "menu", "id": "M1", "name": "Settings", "menuId": "M1", "children": [
                {"type": "menu", "id": "M2", "name": "Audit", "menuId": "M2", "children": [
                    {"type": "resource", "id": "R1", "name": "Export", "resourceId": "R1"}
                ]},
                {"type": "menu", "id": "M3", "name": "Policy", "menuId": "M3", "children": [
                    {"type": "resource", "id": "R2", "name": "Edit", "resourceId": "R2"}
                ]}
            ]}
        ]}
    ]))
}

/// Two systems with lazily loaded menus, as served by an admin backend.
///
/// ```text
/// iam  Identity
/// ├── iam.users      Users           (lazy)
/// │   └── iam.roles  Roles           (lazy)
/// └── iam.audit      Audit Log       [audit.export, selected]
/// bill Billing
/// └── bill.invoices  Invoices        (lazy)
/// ```
pub fn admin_forest() -> Vec<PermissionTreeNode> {
    forest(admin_forest_json())
}

pub fn admin_forest_json() -> Value {
    json!([
        {"type": "system", "id": "1", "name": "Identity", "systemId": "iam", "children": [
            {"type": "menu", "id": "10", "name": "Users", "menuId": "iam.users", "children": [
                {"type": "menu", "id": "11", "name": "Roles", "menuId": "iam.roles"}
            ]},
            {"type": "menu", "id": "12", "name": "Audit Log", "menuId": "iam.audit", "selected": true, "children": [
                {"type": "resource", "id": "audit.export", "name": "Export", "resourceType": "API",
                 "code": "audit:export", "selected": true}
            ]}
        ]},
        {"type": "system", "id": "2", "name": "Billing", "systemId": "bill", "children": [
            {"type": "menu", "id": "20", "name": "Invoices", "menuId": "bill.invoices"}
        ]}
    ])
}

/// Resource documents for the lazily loaded menus of [`admin_forest`]
pub fn admin_resources() -> Vec<(&'static str, Value)> {
    vec![
        (
            "iam.users",
            json!([
                {"id": "users.create", "name": "Create user", "resourceType": "API", "code": "iam:user:create"},
                {"id": "users.delete", "name": "Delete user", "code": "iam:user:delete"}
            ]),
        ),
        (
            "iam.roles",
            json!([{"id": "roles.assign", "name": "Assign role", "resourceType": "BUTTON"}]),
        ),
        (
            "bill.invoices",
            json!([{"id": "invoices.export", "name": "Export invoices", "resourceType": "API"}]),
        ),
    ]
}

pub fn resource(id: &str, menu_id: &str) -> ResourceNode {
    ResourceNode::new(id, id, menu_id)
}

pub fn admin_loader() -> InMemoryResourceLoader {
    InMemoryResourceLoader::new()
        .with_resources(
            "iam.users",
            vec![resource("users.create", "iam.users"), resource("users.delete", "iam.users")],
        )
        .with_resources("iam.roles", vec![resource("roles.assign", "iam.roles")])
        .with_resources("bill.invoices", vec![resource("invoices.export", "bill.invoices")])
}
