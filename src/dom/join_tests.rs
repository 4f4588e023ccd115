//! Tests for keyed joins and reconciliation.

use serde_json::json;

use super::*;

fn ids(keys: &[&str]) -> Vec<JoinKey> {
    keys.iter().map(|k| JoinKey::Id((*k).to_string())).collect()
}

fn render_rows(doc: &mut Document, parent: NodeId, keys: &[JoinKey]) -> Merged {
    let join = join(doc, parent, "row", keys);
    for node in join.exit_nodes() {
        doc.remove(node);
    }
    let merged = join.append_enter(doc, parent, "g", keys);
    for &node in &merged.nodes {
        doc.set_attr(node, "class", "row");
    }
    merged
}

mod join_partition_tests {
    use super::*;

    #[test]
    fn first_join_enters_everything() {
        let doc = Document::new();
        let join = join(&doc, doc.root(), "row", &ids(&["a", "b"]));

        assert_eq!(join.enter, vec![0, 1]);
        assert!(join.update.is_empty());
        assert!(join.exit.is_empty());
    }

    #[test]
    fn partitions_enter_update_exit() {
        let mut doc = Document::new();
        let root = doc.root();
        let first = render_rows(&mut doc, root, &ids(&["a", "b", "c"]));

        let join = join(&doc, root, "row", &ids(&["b", "d"]));

        assert_eq!(join.update, vec![(0, first.nodes[1])]);
        assert_eq!(join.enter, vec![1]);
        assert_eq!(join.exit, vec![(0, first.nodes[0]), (2, first.nodes[2])]);
    }

    #[test]
    fn duplicate_data_keys_enter_after_first_binding() {
        let mut doc = Document::new();
        let root = doc.root();
        let first = render_rows(&mut doc, root, &ids(&["a"]));

        let join = join(&doc, root, "row", &ids(&["a", "a"]));

        assert_eq!(join.update, vec![(0, first.nodes[0])]);
        assert_eq!(join.enter, vec![1]);
    }

    #[test]
    fn elements_without_key_join_by_position() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.create_element(root, "g");
        doc.set_attr(a, "class", "row");

        let join = join(&doc, root, "row", &[JoinKey::Index(0)]);
        assert_eq!(join.update, vec![(0, a)]);
    }
}

mod append_enter_tests {
    use super::*;

    #[test]
    fn merged_nodes_follow_data_order() {
        let mut doc = Document::new();
        let root = doc.root();
        let first = render_rows(&mut doc, root, &ids(&["b"]));

        let merged = render_rows(&mut doc, root, &ids(&["a", "b", "c"]));

        assert_eq!(merged.nodes.len(), 3);
        assert_eq!(merged.nodes[1], first.nodes[0]);
        assert_eq!(merged.entered.len(), 2);
        assert_eq!(doc.children(root), merged.nodes.as_slice());
    }

    #[test]
    fn entered_elements_remember_their_key() {
        let mut doc = Document::new();
        let root = doc.root();
        let merged = render_rows(&mut doc, root, &ids(&["x"]));

        assert_eq!(
            doc.key(merged.nodes[0]),
            Some(&JoinKey::Id("x".to_string()))
        );
    }
}

mod reconcile_tests {
    use super::*;

    #[test]
    fn single_placeholder_keeps_exactly_one_element() {
        let mut doc = Document::new();
        let root = doc.root();

        let first = reconcile(&mut doc, root, ReconcileOptions::new("svg", "svg-chart-container"));
        let second = reconcile(&mut doc, root, ReconcileOptions::new("svg", "svg-chart-container"));

        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
        assert_eq!(doc.element_count(), 1);
        assert_eq!(doc.attr(first[0], "class"), Some("svg-chart-container"));
        assert_eq!(doc.tag(first[0]), "svg");
    }

    #[test]
    fn objects_with_id_are_keyed_by_id() {
        let mut doc = Document::new();
        let root = doc.root();
        let data = vec![json!({"id": "a"}), json!({"id": "b"})];
        let first = reconcile(
            &mut doc,
            root,
            ReconcileOptions::new("circle", "dot").with_data(&data),
        );

        let reordered = vec![json!({"id": "b"}), json!({"id": "a"})];
        let second = reconcile(
            &mut doc,
            root,
            ReconcileOptions::new("circle", "dot").with_data(&reordered),
        );

        assert_eq!(second, vec![first[1], first[0]]);
    }

    #[test]
    fn falsy_ids_fall_back_to_position() {
        assert_eq!(key_of(&json!({"id": 0}), 3), JoinKey::Index(3));
        assert_eq!(key_of(&json!({"id": ""}), 1), JoinKey::Index(1));
        assert_eq!(key_of(&json!(5), 2), JoinKey::Index(2));
        assert_eq!(key_of(&json!({"id": 7}), 0), JoinKey::Id("7".to_string()));
    }

    #[test]
    fn exit_without_transition_removes_immediately() {
        let mut doc = Document::new();
        let root = doc.root();
        let data = vec!["a", "b", "c"];
        let first = reconcile(&mut doc, root, ReconcileOptions::new("g", "item").with_data(&data));

        let fewer = vec!["a"];
        let second = reconcile(&mut doc, root, ReconcileOptions::new("g", "item").with_data(&fewer));

        assert_eq!(second, vec![first[0]]);
        assert!(!doc.is_attached(first[1]));
        assert!(!doc.is_attached(first[2]));
    }

    #[test]
    fn exit_transition_receives_exiting_elements() {
        let mut doc = Document::new();
        let root = doc.root();
        let data = vec!["a", "b"];
        let first = reconcile(&mut doc, root, ReconcileOptions::new("g", "item").with_data(&data));

        let mut seen = Vec::new();
        let mut on_exit = |_: &mut Document, nodes: &[NodeId]| seen.extend_from_slice(nodes);
        let fewer = vec!["a"];
        reconcile(
            &mut doc,
            root,
            ReconcileOptions::new("g", "item")
                .with_data(&fewer)
                .with_exit_transition(&mut on_exit),
        );

        assert_eq!(seen, vec![first[1]]);
        // delegated: the hook decides when to remove
        assert!(doc.is_attached(first[1]));
    }

    #[test]
    fn enter_transition_applies_to_new_elements_only() {
        let mut doc = Document::new();
        let root = doc.root();
        let data = vec!["a"];
        reconcile(&mut doc, root, ReconcileOptions::new("g", "item").with_data(&data));

        let mut on_enter = |doc: &mut Document, nodes: &[NodeId]| {
            for &node in nodes {
                doc.set_attr(node, "opacity", 0);
            }
        };
        let more = vec!["a", "b"];
        let merged = reconcile(
            &mut doc,
            root,
            ReconcileOptions::new("g", "item")
                .with_data(&more)
                .with_enter_transition(&mut on_enter),
        );

        assert_eq!(doc.attr(merged[0], "opacity"), None);
        assert_eq!(doc.attr(merged[1], "opacity"), Some("0"));
        assert!(merged.iter().all(|&n| doc.has_class(n, "item")));
    }
}
