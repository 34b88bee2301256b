//! End-to-end queries through the public entry points, plus the
//! selector-free lookups.

use thicket_dom::{DomTree, NodeId, outer_html};
use thicket_select::{
    Functions, Predicate, SelectorError, compile, compile_simple, element_by_id, elements_by,
    elements_by_class_name, elements_by_tag_name, first_element_by, first_element_by_class_name,
    first_element_by_tag_name, matches, select_all, select_first, select_iter,
};

/// `<div id="a"><span class="x"/><span class="y"/></div>`
struct Scenario {
    tree: DomTree,
    div: NodeId,
    x: NodeId,
    y: NodeId,
}

fn scenario() -> Scenario {
    let mut tree = DomTree::new();
    let div = tree.append_element(NodeId::ROOT, "div", &[("id", "a")]);
    let x = tree.append_element(div, "span", &[("class", "x")]);
    let y = tree.append_element(div, "span", &[("class", "y")]);
    Scenario { tree, div, x, y }
}

#[test]
fn test_scenario_queries() {
    let s = scenario();
    let functions = Functions::new();

    assert_eq!(select_all(&s.tree, s.div, ".x", &functions), Ok(vec![s.x]));
    assert_eq!(select_all(&s.tree, s.div, "span", &functions), Ok(vec![s.x, s.y]));
    assert_eq!(select_first(&s.tree, s.div, "span:first", &functions), Ok(Some(s.x)));
    assert_eq!(matches(&s.tree, s.div, "#a", &functions), Ok(true));
    assert_eq!(select_all(&s.tree, s.div, ">span", &functions), Ok(vec![s.x, s.y]));
    assert_eq!(select_all(&s.tree, s.div, "span.z", &functions), Ok(vec![]));
}

#[test]
fn test_scenario_serializes() {
    let s = scenario();
    assert_eq!(
        outer_html(&s.tree, s.div),
        r#"<div id="a"><span class="x"></span><span class="y"></span></div>"#
    );
}

#[test]
fn test_select_first_none() {
    let s = scenario();
    assert_eq!(select_first(&s.tree, s.div, "p", &Functions::new()), Ok(None));
}

#[test]
fn test_select_iter_is_lazy_and_owned() {
    let s = scenario();
    let mut iter = {
        let text = String::from("span");
        select_iter(&s.tree, s.div, &text, &Functions::new()).unwrap()
    };
    assert_eq!(iter.next(), Some(s.x));
    assert_eq!(iter.next(), Some(s.y));
    assert_eq!(iter.next(), None);
}

#[test]
fn test_matches_ignores_ancestry() {
    let s = scenario();
    let functions = Functions::new();
    assert_eq!(matches(&s.tree, s.x, "span.x", &functions), Ok(true));
    assert_eq!(matches(&s.tree, s.x, "div span", &functions), Err(SelectorError::ComplexSelector));
    assert_eq!(matches(&s.tree, s.x, ">span", &functions), Err(SelectorError::ComplexSelector));
    assert_eq!(matches(&s.tree, s.div, ".x", &functions), Ok(false));
}

#[test]
fn test_compile_simple_predicate_is_reusable() {
    let s = scenario();
    let predicate = compile_simple("span:not(.y)", &Functions::new()).unwrap();
    assert!(predicate.matches(&s.tree, s.x));
    assert!(!predicate.matches(&s.tree, s.y));
    assert!(!predicate.matches(&s.tree, s.div));
    assert!(predicate.matches(&s.tree, s.x));
}

#[test]
fn test_prebuilt_selector_query() {
    let s = scenario();
    let prebuilt = compile(".y", &Functions::new()).unwrap();
    assert_eq!(select_all(&s.tree, s.div, prebuilt, &Functions::new()), Ok(vec![s.y]));
}

#[test]
fn test_errors_surface_from_entry_points() {
    let s = scenario();
    let functions = Functions::new();
    assert_eq!(
        select_all(&s.tree, s.div, ":bogus", &functions),
        Err(SelectorError::UnknownFunction("bogus".to_string()))
    );
    assert_eq!(
        select_first(&s.tree, s.div, ":not()", &functions),
        Err(SelectorError::MissingParameter("not".to_string()))
    );
    assert!(matches!(
        select_iter(&s.tree, s.div, "a[", &functions),
        Err(SelectorError::Parse { .. })
    ));
}

#[test]
fn test_class_lookup_matches_child_selector() {
    let s = scenario();
    assert_eq!(
        Ok(elements_by_class_name(&s.tree, s.div, "x", Some(1))),
        select_all(&s.tree, s.div, ">.x", &Functions::new())
    );
    assert_eq!(first_element_by_class_name(&s.tree, NodeId::ROOT, "y", None), Some(s.y));
    assert_eq!(first_element_by_class_name(&s.tree, NodeId::ROOT, "y", Some(1)), None);
}

#[test]
fn test_tag_lookup_ignores_case() {
    let s = scenario();
    assert_eq!(elements_by_tag_name(&s.tree, NodeId::ROOT, "SPAN", None), vec![s.x, s.y]);
    assert_eq!(first_element_by_tag_name(&s.tree, NodeId::ROOT, "Span", None), Some(s.x));
    assert!(elements_by_tag_name(&s.tree, NodeId::ROOT, "span", Some(1)).is_empty());
}

#[test]
fn test_id_lookup() {
    let s = scenario();
    assert_eq!(element_by_id(&s.tree, NodeId::ROOT, "a", None), Some(s.div));
    assert_eq!(element_by_id(&s.tree, NodeId::ROOT, "A", None), None);
    assert_eq!(element_by_id(&s.tree, NodeId::ROOT, "a", Some(0)), None);
}

#[test]
fn test_predicate_lookup() {
    let s = scenario();
    let not_first_span = Predicate::custom(|tree, node| {
        tree.node_name(node) == "span" && tree.prev_sibling(node).is_some()
    });
    assert_eq!(elements_by(&s.tree, NodeId::ROOT, &not_first_span, None), vec![s.y]);
    assert_eq!(
        first_element_by(&s.tree, NodeId::ROOT, &Predicate::Always, None),
        Some(s.div)
    );
    assert!(elements_by(&s.tree, s.div, &Predicate::Always, Some(0)).is_empty());
}
