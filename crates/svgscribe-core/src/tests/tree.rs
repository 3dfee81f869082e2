use crate::*;

fn doc_with_chain() -> (Document, NodeId, NodeId, NodeId) {
    let mut doc = Document::new();
    let svg = doc.create_element(ElementKind::Svg);
    let g = doc.create_element(ElementKind::G);
    let rect = doc.create_element(ElementKind::Rect);
    doc.set_root(svg).unwrap();
    doc.append_child(svg, g).unwrap();
    doc.append_child(g, rect).unwrap();
    (doc, svg, g, rect)
}

#[test]
fn generated_ids_are_monotonic_per_document() {
    let (doc, svg, g, rect) = doc_with_chain();
    let ids: Vec<&str> = [svg, g, rect]
        .iter()
        .map(|n| doc.node(*n).unwrap().id())
        .collect();
    assert_eq!(ids, vec!["e1", "e2", "e3"]);

    let mut other = Document::new();
    let first = other.create_element(ElementKind::G);
    assert_eq!(other.node(first).unwrap().id(), "e1");
}

#[test]
fn attaching_a_parented_node_fails_and_changes_nothing() {
    let (mut doc, svg, g, rect) = doc_with_chain();
    let err = doc.append_child(svg, rect).unwrap_err();
    assert_eq!(
        err,
        TreeStructureError::AlreadyParented {
            child: rect,
            parent: g
        }
    );
    assert_eq!(doc.children(svg), &[g]);
    assert_eq!(doc.children(g), &[rect]);
    assert_eq!(doc.parent(rect), Some(g));
}

#[test]
fn detach_then_reattach_moves_the_subtree() {
    let (mut doc, svg, g, rect) = doc_with_chain();
    doc.detach(rect).unwrap();
    assert!(doc.children(g).is_empty());
    assert_eq!(doc.parent(rect), None);
    doc.append_child(svg, rect).unwrap();
    assert_eq!(doc.children(svg), &[g, rect]);
    doc.detach(rect).unwrap();
    doc.detach(rect).unwrap();
}

#[test]
fn cycles_are_rejected() {
    let (mut doc, svg, g, rect) = doc_with_chain();
    assert!(matches!(
        doc.append_child(g, g),
        Err(TreeStructureError::Cycle { .. })
    ));
    assert!(matches!(
        doc.append_child(g, svg),
        Err(TreeStructureError::Cycle { .. })
    ));
    // `g` already has a parent, but the cycle is what gets reported.
    assert_eq!(
        doc.append_child(rect, g),
        Err(TreeStructureError::Cycle {
            child: g,
            parent: rect
        })
    );
    assert_eq!(doc.children(g), &[rect]);
    assert!(doc.children(rect).is_empty());
}

#[test]
fn unknown_nodes_are_reported() {
    let (mut doc, svg, _, _) = doc_with_chain();
    let stranger = NodeId::from_index(99);
    assert_eq!(
        doc.append_child(svg, stranger),
        Err(TreeStructureError::UnknownNode { node: stranger })
    );
    assert!(doc.set_attr(stranger, "x", 1.0).is_err());
}

#[test]
fn find_by_id_and_descendants_follow_document_order() {
    let (mut doc, svg, g, rect) = doc_with_chain();
    let circle = doc.create_element_with_id(ElementKind::Circle, "dot");
    doc.append_child(svg, circle).unwrap();
    assert_eq!(doc.find_by_id("dot"), Some(circle));
    assert_eq!(doc.find_by_id("e2"), Some(g));
    assert_eq!(doc.find_by_id(""), None);
    assert_eq!(doc.descendants(svg), vec![svg, g, rect, circle]);
}

#[test]
fn style_is_a_typed_attribute() {
    let (mut doc, _, _, rect) = doc_with_chain();
    doc.set_style(rect, Style::new().with("fill", "red")).unwrap();
    assert_eq!(doc.style(rect).unwrap().to_string(), "fill:red");
    doc.remove_attr(rect, "style").unwrap();
    assert!(doc.style(rect).is_none());
}
