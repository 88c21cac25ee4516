//! Property tests for the cascade selector.

use proptest::prelude::*;
use serde_json::{json, Value};

use rolegrant::domain::entities::ResourceNode;
use rolegrant::infrastructure::InMemoryResourceLoader;

use crate::common::{forest, SelectionHarness};

#[derive(Debug, Clone)]
struct MenuShape {
    parent_hint: usize,
    resources: usize,
    lazy: bool,
}

#[derive(Debug, Clone)]
struct TreeShape {
    systems: usize,
    /// Systems appended after the populated ones, without any menu
    empty_systems: usize,
    menus: Vec<MenuShape>,
}

#[derive(Debug, Clone, Copy)]
enum Op {
    SelectMenu(usize),
    DeselectMenu(usize),
    SelectResource(usize),
    DeselectResource(usize),
    SelectSystem(usize),
    DeselectSystem(usize),
    ExpandMenu(usize),
}

fn tree_shape() -> impl Strategy<Value = TreeShape> {
    (
        1usize..=2,
        0usize..=1,
        proptest::collection::vec((any::<usize>(), 0usize..=2, any::<bool>()), 2..=8),
    )
        .prop_map(|(systems, empty_systems, menus)| TreeShape {
            systems,
            empty_systems,
            menus: menus
                .into_iter()
                .map(|(parent_hint, resources, lazy)| MenuShape {
                    parent_hint,
                    resources,
                    lazy,
                })
                .collect(),
        })
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<usize>().prop_map(Op::SelectMenu),
        any::<usize>().prop_map(Op::DeselectMenu),
        any::<usize>().prop_map(Op::SelectResource),
        any::<usize>().prop_map(Op::DeselectResource),
        any::<usize>().prop_map(Op::SelectSystem),
        any::<usize>().prop_map(Op::DeselectSystem),
        any::<usize>().prop_map(Op::ExpandMenu),
    ]
}

/// A generated tree: `M{i}` menus under `S{s}` systems, `R{i}_{k}` resources.
/// Lazy menus keep their resources in the loader instead of the forest. The
/// last `empty_systems` systems own no menu at all.
struct Tree {
    harness: SelectionHarness,
    systems: Vec<String>,
    menus: Vec<String>,
    resources: Vec<String>,
}

fn build(shape: &TreeShape) -> Tree {
    let n = shape.menus.len();
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut system_of = vec![0usize; n];
    for i in 0..n {
        // the first menus guarantee every system owns one
        if i < shape.systems {
            system_of[i] = i;
            continue;
        }
        let hint = shape.menus[i].parent_hint % (i + 1);
        if hint == i {
            system_of[i] = shape.menus[i].parent_hint % shape.systems;
        } else {
            parent[i] = Some(hint);
            system_of[i] = system_of[hint];
        }
    }

    let resource_ids = |i: usize| -> Vec<String> {
        (0..shape.menus[i].resources)
            .map(|k| format!("R{i}_{k}"))
            .collect()
    };

    let mut loader = InMemoryResourceLoader::new();
    for (i, menu) in shape.menus.iter().enumerate() {
        if menu.lazy {
            let menu_id = format!("M{i}");
            let nodes = resource_ids(i)
                .iter()
                .map(|id| ResourceNode::new(id.as_str(), id.as_str(), menu_id.as_str()))
                .collect();
            loader = loader.with_resources(menu_id, nodes);
        }
    }

    fn menu_json(
        i: usize,
        shape: &TreeShape,
        parent: &[Option<usize>],
        resource_ids: &dyn Fn(usize) -> Vec<String>,
    ) -> Value {
        let mut children: Vec<Value> = Vec::new();
        if !shape.menus[i].lazy {
            children.extend(
                resource_ids(i)
                    .into_iter()
                    .map(|id| json!({"type": "resource", "id": id, "name": id})),
            );
        }
        children.extend(
            (0..shape.menus.len())
                .filter(|&j| parent[j] == Some(i))
                .map(|j| menu_json(j, shape, parent, resource_ids)),
        );
        json!({
            "type": "menu",
            "id": format!("M{i}"),
            "name": format!("Menu {i}"),
            "children": children
        })
    }

    let system_count = shape.systems + shape.empty_systems;
    let roots: Vec<Value> = (0..system_count)
        .map(|s| {
            let menus: Vec<Value> = (0..n)
                .filter(|&i| parent[i].is_none() && system_of[i] == s)
                .map(|i| menu_json(i, shape, &parent, &resource_ids))
                .collect();
            json!({
                "type": "system",
                "id": format!("S{s}"),
                "name": format!("System {s}"),
                "children": menus
            })
        })
        .collect();

    Tree {
        harness: SelectionHarness::new(&forest(Value::Array(roots)), loader),
        systems: (0..system_count).map(|s| format!("S{s}")).collect(),
        menus: (0..n).map(|i| format!("M{i}")).collect(),
        resources: (0..n).flat_map(resource_ids).collect(),
    }
}

fn pick(ids: &[String], i: usize) -> String {
    ids[i % ids.len()].clone()
}

async fn run(tree: &mut Tree, op: Op) {
    let Tree {
        harness: h,
        systems,
        menus,
        resources,
    } = tree;
    match op {
        Op::SelectMenu(i) => {
            let id = pick(menus, i);
            h.selector.select_menu(&mut h.state, &id).await.unwrap();
        }
        Op::DeselectMenu(i) => h.selector.deselect_menu(&mut h.state, &pick(menus, i)),
        Op::SelectResource(i) if !resources.is_empty() => {
            h.selector.select_resource(&mut h.state, &pick(resources, i))
        }
        Op::DeselectResource(i) if !resources.is_empty() => {
            h.selector.deselect_resource(&mut h.state, &pick(resources, i))
        }
        Op::SelectResource(_) | Op::DeselectResource(_) => {}
        Op::SelectSystem(i) => {
            let id = pick(systems, i);
            h.selector.select_system(&mut h.state, &id).await.unwrap();
        }
        Op::DeselectSystem(i) => h.selector.deselect_system(&mut h.state, &pick(systems, i)),
        Op::ExpandMenu(i) => {
            let id = pick(menus, i);
            h.selector.expand_menu(&mut h.state, &id).await.unwrap();
        }
    }
}

fn check_invariants(tree: &Tree) -> Result<(), TestCaseError> {
    let state = &tree.harness.state;

    for resource_id in state.selected_resource_ids() {
        let menu_id = state.owning_menu(resource_id);
        prop_assert!(menu_id.is_some(), "selected resource {} has no menu", resource_id);
        let menu_id = menu_id.unwrap_or_default();
        prop_assert!(
            state.is_menu_selected(menu_id),
            "resource {} selected without menu {}",
            resource_id,
            menu_id
        );
    }

    for menu_id in state.selected_menu_ids() {
        let menu = state.menu(menu_id);
        prop_assert!(menu.is_some(), "unknown menu {} selected", menu_id);
        let system_id = menu.map(|m| m.system_id.as_str()).unwrap_or_default();
        prop_assert!(
            state.is_system_selected(system_id),
            "menu {} selected without system {}",
            menu_id,
            system_id
        );
        if let Some(parent) = state.parent_of(menu_id) {
            prop_assert!(
                state.is_menu_selected(parent),
                "menu {} selected without parent {}",
                menu_id,
                parent
            );
        }
    }

    for system_id in state.selected_system_ids() {
        prop_assert!(
            state.system_has_selected_menu(system_id),
            "system {} selected without any menu",
            system_id
        );
    }

    for menu_id in &tree.menus {
        prop_assert!(
            tree.harness.loader.call_count(menu_id) <= 2,
            "menu {} loaded {} times",
            menu_id,
            tree.harness.loader.call_count(menu_id)
        );
    }

    Ok(())
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every toggle leaves the three selection sets consistent and
    /// each menu is fetched at most twice.
    #[test]
    fn property_toggles_preserve_invariants(
        shape in tree_shape(),
        ops in proptest::collection::vec(op(), 1..=24),
    ) {
        let mut tree = build(&shape);
        runtime().block_on(async {
            for op in ops {
                run(&mut tree, op).await;
                check_invariants(&tree)?;
            }
            Ok::<(), TestCaseError>(())
        })?;
    }

    /// PROPERTY: selecting or deselecting the same menu twice equals doing it once.
    #[test]
    fn property_menu_toggles_are_idempotent(
        shape in tree_shape(),
        warmup in proptest::collection::vec(op(), 0..=8),
        target in any::<usize>(),
    ) {
        let mut tree = build(&shape);
        let menu_id = tree.menus[target % tree.menus.len()].clone();

        runtime().block_on(async {
            for op in warmup {
                run(&mut tree, op).await;
            }
            let h = &mut tree.harness;

            h.selector.select_menu(&mut h.state, &menu_id).await.unwrap();
            let once = h.state.payload();
            let calls = h.loader.total_calls();
            h.selector.select_menu(&mut h.state, &menu_id).await.unwrap();
            prop_assert_eq!(h.state.payload(), once);
            prop_assert_eq!(h.loader.total_calls(), calls);

            h.selector.deselect_menu(&mut h.state, &menu_id);
            let once = h.state.payload();
            h.selector.deselect_menu(&mut h.state, &menu_id);
            prop_assert_eq!(h.state.payload(), once);
            Ok::<(), TestCaseError>(())
        })?;
    }
}
