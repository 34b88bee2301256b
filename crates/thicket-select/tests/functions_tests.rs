//! Tests for the built-in pseudo-functions and caller-registered ones.

use std::rc::Rc;

use thicket_common::warning::warn_once;
use thicket_dom::{DomTree, NodeId};
use thicket_select::engine::select;
use thicket_select::{
    Builtin, Functions, Predicate, SelectorError, compile, matches, select_all, select_first,
};

/// `<div id="a"><span class="x"/><span class="y"/></div>`
fn scenario() -> (DomTree, NodeId, NodeId, NodeId) {
    let mut tree = DomTree::new();
    let div = tree.append_element(NodeId::ROOT, "div", &[("id", "a")]);
    let x = tree.append_element(div, "span", &[("class", "x")]);
    let y = tree.append_element(div, "span", &[("class", "y")]);
    (tree, div, x, y)
}

/// `:attr(name)`: the element has a non-empty `name` attribute.
fn with_attr_function() -> Functions {
    Functions::new().with("attr", |name, parameter, and, _| {
        let attribute = parameter
            .ok_or_else(|| SelectorError::MissingParameter(name.to_string()))?
            .trim()
            .to_string();
        Ok(Predicate::and(
            and,
            Predicate::custom(move |tree, node| !tree.attribute(node, &attribute).is_empty()),
        ))
    })
}

#[test]
fn test_not_excludes_inner_matches() {
    let (tree, div, _, y) = scenario();
    let functions = Functions::new();
    assert_eq!(select_all(&tree, div, "span:not(.x)", &functions), Ok(vec![y]));
    assert_eq!(select_all(&tree, div, ":not(span)", &functions), Ok(vec![]));
}

#[test]
fn test_not_has() {
    let mut tree = DomTree::new();
    let with_foo = tree.append_element(NodeId::ROOT, "section", &[]);
    let wrapper = tree.append_element(with_foo, "div", &[]);
    let _ = tree.append_element(wrapper, "em", &[("class", "foo")]);
    let without_foo = tree.append_element(NodeId::ROOT, "section", &[]);
    let _ = tree.append_element(without_foo, "em", &[("class", "bar")]);

    let functions = Functions::new();
    assert_eq!(matches(&tree, with_foo, ":not(:has(.foo))", &functions), Ok(false));
    assert_eq!(matches(&tree, without_foo, ":not(:has(.foo))", &functions), Ok(true));
    assert_eq!(
        select_all(&tree, NodeId::ROOT, "section:not(:has(.foo))", &functions),
        Ok(vec![without_foo])
    );
}

#[test]
fn test_has_accepts_complex_selectors() {
    let (tree, div, _, _) = scenario();
    let functions = Functions::new();
    assert_eq!(matches(&tree, div, ":has(> .x)", &functions), Ok(true));
    assert_eq!(matches(&tree, div, "div:has(span.y)", &functions), Ok(true));
    assert_eq!(matches(&tree, div, ":has(span .x)", &functions), Ok(false));
    assert_eq!(
        select_all(&tree, NodeId::ROOT, ":has(.y)", &functions),
        Ok(vec![div])
    );
}

#[test]
fn test_first_fires_once_per_traversal() {
    let (tree, div, x, _) = scenario();
    let functions = Functions::new();
    assert_eq!(select_first(&tree, div, "span:first", &functions), Ok(Some(x)));
    assert_eq!(select_all(&tree, div, "span:first", &functions), Ok(vec![x]));
    assert_eq!(select_all(&tree, div, ":first", &functions), Ok(vec![x]));
    assert_eq!(select_all(&tree, div, ".y:first", &functions).unwrap().len(), 1);
}

#[test]
fn test_first_only_counts_nodes_passing_earlier_tests() {
    let (tree, div, _, y) = scenario();
    assert_eq!(
        select_all(&tree, div, "span.y:first", &Functions::new()),
        Ok(vec![y])
    );
}

#[test]
fn test_first_state_survives_reuse() {
    // A compiled selector carries its `:first` flag along; a second
    // traversal with the same instance finds nothing.
    let (tree, div, x, _) = scenario();
    let selector = Rc::new(compile("span:first", &Functions::new()).unwrap());
    assert_eq!(select(&tree, div, Rc::clone(&selector)).collect::<Vec<_>>(), vec![x]);
    assert_eq!(select(&tree, div, selector).count(), 0);
}

#[test]
fn test_fresh_compilation_resets_first() {
    let (tree, div, x, _) = scenario();
    let functions = Functions::new();
    for _ in 0..3 {
        assert_eq!(select_first(&tree, div, "span:first", &functions), Ok(Some(x)));
    }
}

#[test]
fn test_custom_function() {
    let mut tree = DomTree::new();
    let list = tree.append_element(NodeId::ROOT, "ul", &[]);
    let titled = tree.append_element(list, "li", &[("title", "first")]);
    let plain = tree.append_element(list, "li", &[]);
    let empty_title = tree.append_element(list, "li", &[("title", "")]);

    let functions = with_attr_function();
    assert_eq!(
        select_all(&tree, list, "li:attr(title)", &functions),
        Ok(vec![titled])
    );
    assert_eq!(
        select_all(&tree, list, "li:not(:attr( title ))", &functions),
        Ok(vec![plain, empty_title])
    );
    assert_eq!(
        select_all(&tree, list, "li:attr", &functions),
        Err(SelectorError::MissingParameter("attr".to_string()))
    );
}

#[test]
fn test_custom_functions_reach_nested_selectors() {
    let mut tree = DomTree::new();
    let outer = tree.append_element(NodeId::ROOT, "div", &[]);
    let _ = tree.append_element(outer, "a", &[("href", "/x")]);
    let other = tree.append_element(NodeId::ROOT, "div", &[]);
    let _ = tree.append_element(other, "a", &[]);

    let functions = with_attr_function();
    assert_eq!(
        select_all(&tree, NodeId::ROOT, "div:has(a:attr(href))", &functions),
        Ok(vec![outer])
    );
    assert_eq!(
        select_all(&tree, NodeId::ROOT, "div:has(a:attr(href))", &Functions::new()),
        Err(SelectorError::UnknownFunction("attr".to_string()))
    );
}

#[test]
fn test_custom_function_shadows_builtin() {
    let (tree, div, x, y) = scenario();
    let every = Functions::new().with("first", |_, _, and, _| {
        Ok(Predicate::and(and, Predicate::Always))
    });
    assert_eq!(select_all(&tree, div, "span:first", &every), Ok(vec![x, y]));
    assert!(every.contains("first"));

    // Shadowing is intended precedence and reports nothing.
    assert!(warn_once("Select", "custom function ':first' shadows the built-in"));
}

#[test]
fn test_registry_lookup() {
    let mut functions = Functions::new();
    assert!(functions.contains("not"));
    assert!(functions.contains("has"));
    assert!(!functions.contains("attr"));
    assert!(matches!(
        functions.resolve("attr"),
        Err(SelectorError::UnknownFunction(name)) if name == "attr"
    ));

    let _ = functions.register("attr", |_, _, and, _| Ok(Predicate::and(and, Predicate::Always)));
    assert!(functions.contains("attr"));
    assert!(functions.resolve("attr").is_ok());
    assert_eq!(format!("{functions:?}"), r#"Functions { overlay: ["attr"] }"#);
}

#[test]
fn test_builtin_names() {
    assert_eq!("has".parse::<Builtin>(), Ok(Builtin::Has));
    assert!("bogus".parse::<Builtin>().is_err());
    assert_eq!(Builtin::Not.to_string(), "not");
    assert_eq!(<&'static str>::from(Builtin::First), "first");
}
