//! A full editing session: open with granted ids, toggle, save.

use std::sync::Arc;

use rolegrant::{parse_script, CascadeSelector, PermissionEditor, SelectionPayload};

use crate::common::*;

fn editor() -> PermissionEditor {
    PermissionEditor::new(CascadeSelector::new(Arc::new(admin_loader())))
}

#[tokio::test]
async fn script_driven_session_saves_sorted_payload() {
    let granted: SelectionPayload =
        serde_json::from_str(r#"{"menuIds": ["bill.invoices"]}"#).unwrap();
    let mut editor = editor();
    editor.open("auditor", &admin_forest(), Some(&granted));

    let ops = parse_script(
        "# grant user management, drop billing\n\
         select-menu iam.users\n\
         deselect-resource users.delete\n\
         deselect-all-in-system bill\n",
    )
    .unwrap();
    for op in &ops {
        editor.apply(op).await.unwrap();
    }

    let payload = editor.save();
    insta::assert_snapshot!(serde_json::to_string_pretty(&payload).unwrap(), @r#"
    {
      "systemIds": [
        "iam"
      ],
      "menuIds": [
        "iam.audit",
        "iam.roles",
        "iam.users"
      ],
      "resourceIds": [
        "audit.export",
        "roles.assign",
        "users.create"
      ]
    }
    "#);
}

#[test]
fn opening_reflects_backend_flags_and_stats() {
    let mut editor = editor();
    editor.open("auditor", &admin_forest(), None);

    let stats = editor.state().stats();
    assert_eq!(stats.selected_system_count, 1);
    assert_eq!(stats.selected_menu_count, 1);
    assert_eq!(stats.selected_resource_count, 1);
    assert_eq!(stats.total_system_count, 2);
    assert_eq!(stats.total_menu_count, 4);
    assert_eq!(stats.total_resource_count, 1);
    assert_eq!(editor.state().active_system_id(), Some("iam"));
}

#[test]
fn search_narrows_the_active_system() {
    let mut editor = editor();
    editor.open("auditor", &admin_forest(), None);

    editor.state_mut().set_search_keyword("  ROLES ");
    let menus = editor.state().current_system_menus();

    assert_eq!(menus.len(), 1);
    assert_eq!(menus[0].menu_ids(), ["iam.users", "iam.roles"]);
}
