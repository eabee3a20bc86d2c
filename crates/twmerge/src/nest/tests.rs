use twmerge_syntax::parse_expression;
use twmerge_syntax::Node;

use super::*;

fn nest_with(input: &str, spreads: &mut Spreads) -> Node {
    let mut node = parse_expression(input).unwrap();
    match &mut node {
        Node::Object(obj) => nest_object(obj, spreads),
        Node::Array(arr) => nest_array(arr, spreads),
        other => panic!("Expected object or array, got {:?}", other),
    }
    node
}

fn nest(input: &str) -> String {
    nest_with(input, &mut Spreads::default()).to_string()
}

fn unnest_with(node: &mut Node, spreads: &Spreads) -> String {
    match node {
        Node::Object(obj) => unnest_object(obj, spreads),
        Node::Array(arr) => unnest_array(arr, spreads),
        other => panic!("Expected object or array, got {:?}", other),
    }
    node.to_string()
}

fn roundtrip(input: &str) -> String {
    let mut spreads = Spreads::default();
    let mut node = nest_with(input, &mut spreads);
    unnest_with(&mut node, &spreads)
}

// ============================================================================
// Nesting objects
// ============================================================================

#[test]
fn test_nest_object_spreads() {
    assert_eq!(
        nest(r#"{ theme: { ...foo, bar: { ...baz, one: "two" }, other: { a: "b", ...c } } }"#),
        r#"{ theme: { "___foo": "...foo", bar: { "___baz": "...baz", one: "two" }, other: { a: "b", "___c": "...c" } } }"#
    );
}

#[test]
fn test_nest_mixed_members() {
    assert_eq!(
        nest("{ ...foo, a: 1, b() {}, ...bar, c: { ...baz } }"),
        r#"{ "___foo": "...foo", a: 1, b() {}, "___bar": "...bar", c: { "___baz": "...baz" } }"#
    );
}

#[test]
fn test_nest_only_spreads() {
    assert_eq!(
        nest("{ ...foo, ...bar }"),
        r#"{ "___foo": "...foo", "___bar": "...bar" }"#
    );
}

#[test]
fn test_nest_keeps_name_conflicts_apart() {
    assert_eq!(
        nest("{ foo: 1, ...foo }"),
        r#"{ foo: 1, "___foo": "...foo" }"#
    );
}

#[test]
fn test_nest_shorthand_and_computed() {
    assert_eq!(nest("{ a, ...foo, b }"), r#"{ a, "___foo": "...foo", b }"#);
    assert_eq!(
        nest(r#"{ ["computed"]: 1, ...foo }"#),
        r#"{ ["computed"]: 1, "___foo": "...foo" }"#
    );
}

#[test]
fn test_nest_objects_inside_arrays() {
    assert_eq!(
        nest("{ foo: [{ ...bar }] }"),
        r#"{ foo: [{ "___bar": "...bar" }] }"#
    );
    assert_eq!(
        nest("{ foo: [{ baz: { ...other.baz }, ...bar }] }"),
        r#"{ foo: [{ baz: { "___other.baz": "...other.baz" }, "___bar": "...bar" }] }"#
    );
}

#[test]
fn test_nest_keeps_layout() {
    let input = "{\n  // spread first\n  ...preset,\n  a: 1,\n}";
    assert_eq!(
        nest(input),
        "{\n  // spread first\n  \"___preset\": \"...preset\",\n  a: 1,\n}"
    );
}

// ============================================================================
// Nesting arrays
// ============================================================================

#[test]
fn test_nest_array_spreads() {
    assert_eq!(nest("[...bar]"), r#"["...bar"]"#);
    assert_eq!(
        nest(r#"['foo', 2, true, ...bar, "baz"]"#),
        r#"['foo', 2, true, "...bar", "baz"]"#
    );
}

#[test]
fn test_nest_nested_arrays() {
    assert_eq!(
        nest("[[...foo], [1, ...bar], { a: [...baz] }]"),
        r#"[["...foo"], [1, "...bar"], { a: ["...baz"] }]"#
    );
}

#[test]
fn test_nest_member_targets() {
    assert_eq!(
        nest(r#"[...foo?.bar, ...foo["bar"], ...foo[0]]"#),
        r#"["...foo?.bar", "...foo[\"bar\"]", "...foo[0]"]"#
    );
}

// ============================================================================
// Unnesting
// ============================================================================

#[test]
fn test_unnest_restores_recorded_spreads() {
    let mut spreads = Spreads::default();
    let mut node = nest_with(
        r#"{ theme: { ...foo, bar: { ...baz, one: "two" } }, list: [...qux] }"#,
        &mut spreads,
    );
    assert_eq!(spreads.len(), 3);
    assert_eq!(
        node.to_string(),
        r#"{ theme: { "___foo": "...foo", bar: { "___baz": "...baz", one: "two" } }, list: ["...qux"] }"#
    );
    assert_eq!(
        unnest_with(&mut node, &spreads),
        r#"{ theme: { ...foo, bar: { ...baz, one: "two" } }, list: [...qux] }"#
    );
}

#[test]
fn test_unnest_leaves_unrecorded_strings() {
    // Placeholder-looking values the nest pass did not create stay strings
    let input =
        r#"{ a: [...foo], "___bar": "...bar", b: "...", c: "....", d: "... x", e: ["...", "…", "...bar"] }"#;
    let mut spreads = Spreads::default();
    let mut node = nest_with(input, &mut spreads);
    assert_eq!(spreads.len(), 1);
    assert_eq!(unnest_with(&mut node, &spreads), input);
}

#[test]
fn test_unnest_without_nest_is_a_noop() {
    let input = r#"{ "___foo": "...foo", list: ["...bar"] }"#;
    let mut node = parse_expression(input).unwrap();
    assert_eq!(unnest_with(&mut node, &Spreads::default()), input);
}

#[test]
fn test_nest_unnest_roundtrip() {
    for input in [
        r#"{ theme: { ...foo, bar: { ...baz, one: "two" }, other: { a: "b", ...c } } }"#,
        "{ ...foo, a: 1, b() {}, ...bar, c: { ...baz } }",
        "{ foo: 1, ...foo }",
        "{ a, ...foo, b }",
        "{ foo: [{ baz: { ...other.baz }, ...bar }] }",
        r#"['foo', 2, true, ...bar, "baz", [...qux]]"#,
        r#"[...foo?.bar, ...foo["bar"], ...foo[0]]"#,
        r#"{ colors: { ...{ brand: "blue" } } }"#,
        r#"{ letters: [..."ab"] }"#,
        "{ .../* base */ base, a: 1 }",
        "[...// line\n  rest]",
        "{ ... base, list: [ ...  more ] }",
    ] {
        assert_eq!(roundtrip(input), input);
    }
}

#[test]
fn test_nest_literal_and_commented_targets() {
    assert_eq!(
        nest(r#"{ ...{ brand: "blue" }, .../* base */ base }"#),
        r#"{ "___{ brand: \"blue\" }": "...{ brand: \"blue\" }", "___/* base */ base": ".../* base */ base" }"#
    );
    assert_eq!(nest(r#"[..."ab"]"#), r#"["...\"ab\""]"#);
}

#[test]
fn test_same_target_written_two_ways() {
    // Both spellings collapse to the trimmed form
    assert_eq!(
        roundtrip("{ a: { ... foo }, b: { ...foo } }"),
        "{ a: { ...foo }, b: { ...foo } }"
    );
    assert_eq!(roundtrip("[... foo, [... foo]]"), "[... foo, [... foo]]");
}
