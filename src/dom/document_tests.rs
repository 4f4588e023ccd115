//! Tests for the retained document tree.

use super::*;

mod tree_tests {
    use super::*;

    #[test]
    fn new_document_has_body_root() {
        let doc = Document::new();
        assert_eq!(doc.tag(doc.root()), "body");
        assert_eq!(doc.element_count(), 0);
    }

    #[test]
    fn create_element_appends_in_order() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.create_element(root, "g");
        let b = doc.create_element(root, "g");

        assert_eq!(doc.children(root), &[a, b]);
        assert_eq!(doc.parent(a), Some(root));
        assert_eq!(doc.element_count(), 2);
    }

    #[test]
    fn insert_before_places_node_ahead_of_sibling() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.create_element(root, "g");
        let b = doc.create_element(root, "g");
        let c = doc.insert_before(root, "g", Some(b));

        assert_eq!(doc.children(root), &[a, c, b]);
    }

    #[test]
    fn insert_before_unknown_sibling_appends() {
        let mut doc = Document::new();
        let root = doc.root();
        let other_parent = doc.create_element(root, "svg");
        let stranger = doc.create_element(other_parent, "g");
        let node = doc.insert_before(root, "g", Some(stranger));

        assert_eq!(doc.children(root).last(), Some(&node));
    }

    #[test]
    fn remove_detaches_subtree() {
        let mut doc = Document::new();
        let root = doc.root();
        let svg = doc.create_element(root, "svg");
        let g = doc.create_element(svg, "g");

        doc.remove(svg);

        assert!(!doc.is_attached(svg));
        assert!(!doc.is_attached(g));
        assert_eq!(doc.element_count(), 0);
    }

    #[test]
    fn remove_twice_is_noop() {
        let mut doc = Document::new();
        let root = doc.root();
        let g = doc.create_element(root, "g");
        doc.remove(g);
        doc.remove(g);
        doc.remove(root);

        assert!(doc.is_attached(root));
        assert!(!doc.is_attached(g));
    }

    #[test]
    fn removed_ids_are_not_reused() {
        let mut doc = Document::new();
        let root = doc.root();
        let old = doc.create_element(root, "g");
        doc.set_attr(old, "class", "row");
        doc.remove(old);

        let new = doc.create_element(root, "g");

        assert_ne!(old, new);
        assert!(!doc.is_attached(old));
        assert!(doc.is_attached(new));
        assert_eq!(doc.attr(new, "class"), None);
    }
}

mod attribute_tests {
    use super::*;

    #[test]
    fn set_attr_accepts_numbers_and_strings() {
        let mut doc = Document::new();
        let rect = doc.create_element(doc.root(), "rect");
        doc.set_attr(rect, "width", 42.5);
        doc.set_attr(rect, "fill", "darkblue");

        assert_eq!(doc.attr(rect, "width"), Some("42.5"));
        assert_eq!(doc.attr(rect, "fill"), Some("darkblue"));
        assert_eq!(doc.attr(rect, "height"), None);
    }

    #[test]
    fn remove_attr_drops_value() {
        let mut doc = Document::new();
        let rect = doc.create_element(doc.root(), "rect");
        doc.set_attr(rect, "x", 1);
        doc.remove_attr(rect, "x");
        assert_eq!(doc.attr(rect, "x"), None);
    }

    #[test]
    fn has_class_matches_whole_words() {
        let mut doc = Document::new();
        let g = doc.create_element(doc.root(), "g");
        doc.set_attr(g, "class", "row highlighted");

        assert!(doc.has_class(g, "row"));
        assert!(doc.has_class(g, "highlighted"));
        assert!(!doc.has_class(g, "ro"));
    }

    #[test]
    fn children_with_class_filters_direct_children() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.create_element(root, "g");
        let b = doc.create_element(root, "g");
        let nested = doc.create_element(a, "g");
        doc.set_attr(a, "class", "row");
        doc.set_attr(nested, "class", "row");
        doc.set_attr(b, "class", "other");

        assert_eq!(doc.children_with_class(root, "row"), vec![a]);
    }
}

mod query_tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let div = doc.create_element(root, "div");
        doc.set_attr(div, "id", "chart");
        let section = doc.create_element(root, "section");
        doc.set_attr(section, "class", "panel wide");
        (doc, div, section)
    }

    #[test]
    fn query_by_tag() {
        let (doc, div, _) = sample();
        assert_eq!(doc.query("body"), Some(doc.root()));
        assert_eq!(doc.query("div"), Some(div));
    }

    #[test]
    fn query_by_id() {
        let (doc, div, _) = sample();
        assert_eq!(doc.query("#chart"), Some(div));
        assert_eq!(doc.query("#missing"), None);
    }

    #[test]
    fn query_by_class() {
        let (doc, _, section) = sample();
        assert_eq!(doc.query(".wide"), Some(section));
    }

    #[test]
    fn query_ignores_detached_nodes() {
        let (mut doc, div, _) = sample();
        doc.remove(div);
        assert_eq!(doc.query("#chart"), None);
    }

    #[test]
    fn empty_selector_matches_nothing() {
        let (doc, _, _) = sample();
        assert_eq!(doc.query("  "), None);
    }
}

mod serialize_tests {
    use super::*;

    #[test]
    fn leaf_without_text_self_closes() {
        let mut doc = Document::new();
        let rect = doc.create_element(doc.root(), "rect");
        doc.set_attr(rect, "height", 20);

        assert_eq!(doc.to_svg(rect), "<rect height=\"20\"/>\n");
    }

    #[test]
    fn text_is_escaped() {
        let mut doc = Document::new();
        let text = doc.create_element(doc.root(), "text");
        doc.set_text(text, "a<b & c");

        assert_eq!(doc.to_svg(text), "<text>a&lt;b &amp; c</text>\n");
    }

    #[test]
    fn nested_children_are_indented() {
        let mut doc = Document::new();
        let svg = doc.create_element(doc.root(), "svg");
        let g = doc.create_element(svg, "g");
        doc.set_attr(g, "class", "chart");

        let out = doc.to_svg(svg);
        assert_eq!(out, "<svg>\n    <g class=\"chart\"/>\n</svg>\n");
    }

    #[test]
    fn client_width_defaults_to_zero() {
        let mut doc = Document::new();
        let root = doc.root();
        assert!(doc.client_width(root).abs() < f64::EPSILON);
        doc.set_client_width(root, 640.0);
        assert!((doc.client_width(root) - 640.0).abs() < f64::EPSILON);
    }
}
