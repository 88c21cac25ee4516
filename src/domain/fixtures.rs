//! Shared forest fixtures for unit tests.

use serde_json::json;

use crate::domain::entities::{parse_forest, PermissionTreeNode};

pub(crate) fn forest(value: serde_json::Value) -> Vec<PermissionTreeNode> {
    parse_forest(&value.to_string()).expect("fixture forest must parse")
}

/// Two systems:
///
/// ```text
/// S1 IAM
/// ├── M1 User Management   [R1 API, R2 BUTTON]
/// └── M2 Settings
///     ├── M3 Audit Log     [R3]
///     └── M4 Security Policy   (resources not loaded)
/// S2 Billing
/// └── M5 Invoices              (resources not loaded)
/// ```
pub(crate) fn sample_forest() -> Vec<PermissionTreeNode> {
    forest(json!([
        {"type": "system", "id": "S1", "name": "IAM", "systemId": "S1", "children": [
            {"type": "menu", "id": "M1", "name": "User Management", "menuId": "M1", "children": [
                {"type": "resource", "id": "R1", "name": "Create user", "resourceId": "R1",
                 "resourceType": "API", "code": "iam:user:create"},
                {"type": "resource", "id": "R2", "name": "Delete user", "resourceId": "R2",
                 "resourceType": "BUTTON", "code": "iam:user:delete"}
            ]},
            {"type": "menu", "id": "M2", "name": "Settings", "menuId": "M2", "children": [
                {"type": "menu", "id": "M3", "name": "Audit Log", "menuId": "M3", "selected": true, "children": [
                    {"type": "resource", "id": "R3", "name": "Export", "resourceId": "R3", "selected": true}
                ]},
                {"type": "menu", "id": "M4", "name": "Security Policy", "menuId": "M4"}
            ]}
        ]},
        {"type": "system", "id": "S2", "name": "Billing", "systemId": "S2", "children": [
            {"type": "menu", "id": "M5", "name": "Invoices", "menuId": "M5"}
        ]}
    ]))
}
