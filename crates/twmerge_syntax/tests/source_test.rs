use std::path::Path;

use twmerge_syntax::Node;
use twmerge_syntax::PrettyPrint;
use twmerge_syntax::Quote;
use twmerge_syntax::ScriptKind;
use twmerge_syntax::SourceTree;

const TS_CONFIG: &str = r#"import type { Config } from "tailwindcss"

const config = {
  darkMode: ["class"],
  content: ["./pages/**/*.{ts,tsx}", "./components/**/*.{ts,tsx}"],
  theme: {
    extend: {},
  },
  plugins: [require("tailwindcss-animate")],
} satisfies Config

export default config
"#;

fn locate(input: &str, kind: ScriptKind) -> SourceTree {
    SourceTree::parse(input, kind)
        .unwrap()
        .expect("config object should be found")
}

#[test]
fn test_locate_satisfies_config() {
    let tree = locate(TS_CONFIG, ScriptKind::TypeScript);
    let start = TS_CONFIG.find("{\n  darkMode").unwrap();
    assert_eq!(tree.span().start, start);
    assert!(TS_CONFIG[tree.span()].ends_with("],\n}"));
    assert_eq!(tree.quote(), Quote::Double);
    assert_eq!(tree.indent(), "");
    assert_eq!(tree.indent_unit(), "  ");
}

#[test]
fn test_untouched_tree_prints_input() {
    let tree = locate(TS_CONFIG, ScriptKind::TypeScript);
    assert_eq!(tree.to_string(), TS_CONFIG);
}

#[test]
fn test_skips_helper_objects() {
    let input = r#"const foo = { bar: 'baz' }
const theme = { extend: { colors: {} } }

module.exports = {
  content: ['./src/**/*.js'],
}
"#;
    let tree = locate(input, ScriptKind::JavaScript);
    assert_eq!(tree.span().start, input.find("{\n  content").unwrap());
    assert_eq!(tree.quote(), Quote::Single);
}

#[test]
fn test_outermost_object_wins() {
    let input = "export default { content: [], theme: { content: { a: 1 } } }";
    let tree = locate(input, ScriptKind::TypeScript);
    assert_eq!(tree.span(), 15..input.len());
}

#[test]
fn test_locate_inside_call() {
    let input = "module.exports = withMT({\n\tcontent: [\"./index.html\"],\n})\n";
    let tree = locate(input, ScriptKind::JavaScript);
    assert_eq!(tree.indent_unit(), "\t");
    insta::assert_snapshot!(Node::Object(tree.config().clone()).to_pretty_string(), @r#"
    Object
      Property: content
        Array
          Str: "./index.html"
    "#);
}

#[test]
fn test_detects_nested_indent() {
    let input = "function make() {\n    return {\n        content: [],\n    }\n}\n";
    let tree = locate(input, ScriptKind::JavaScript);
    assert_eq!(tree.indent(), "    ");
    assert_eq!(tree.indent_unit(), "    ");
}

#[test]
fn test_type_literal_is_skipped() {
    let input = r#"type Shape = { content: string[] }
const config: { content: string[] } = { content: ['a'] }
"#;
    let tree = locate(input, ScriptKind::TypeScript);
    assert_eq!(tree.span().start, input.rfind("{ content: ['a'] }").unwrap());
}

#[test]
fn test_generic_type_alias_is_skipped() {
    for input in [
        "type Cfg<T> = { content: T }\nconst config: Cfg<string[]> = { content: [\"./src\"] }\n",
        "type Cfg<T>= { content: T }\nconst config: Cfg<string[]> = { content: [\"./src\"] }\n",
        "type Cfg<T extends Array<string> = string[]> = { content: T }\nexport default { content: [\"./src\"] }\n",
    ] {
        let tree = locate(input, ScriptKind::TypeScript);
        assert_eq!(
            tree.span().start,
            input.rfind("{ content: [\"./src\"] }").unwrap(),
            "{input}"
        );
    }
}

#[test]
fn test_parameter_type_is_skipped() {
    let input = r#"function withDefaults(o: { content: string[] }, extra?: { content: string[] }) {
  return o
}
const pick = (o: { content: string[] }) => o
export default withDefaults({ content: ["./src"] })
"#;
    let tree = locate(input, ScriptKind::TypeScript);
    assert_eq!(tree.span().start, input.find("{ content: [\"./src\"] }").unwrap());
}

#[test]
fn test_ternary_object_is_not_a_parameter_type() {
    let input = "export default (prod ? base : { content: ['a'] })\n";
    let tree = locate(input, ScriptKind::TypeScript);
    assert_eq!(tree.span().start, input.find("{ content").unwrap());
}

#[test]
fn test_block_is_not_an_object() {
    let input = "if (x) { content: [] }\n";
    assert!(SourceTree::parse(input, ScriptKind::JavaScript)
        .unwrap()
        .is_none());
}

#[test]
fn test_comments_and_regex_do_not_confuse_locating() {
    let input = r#"/** @type {import('tailwindcss').Config} */
// { content: [] }
const re = /{content:/g
module.exports = {
  content: [`./src/${dir}/**/*.js`],
}
"#;
    let tree = locate(input, ScriptKind::JavaScript);
    assert_eq!(tree.span().start, input.find("{\n  content").unwrap());
    assert_eq!(tree.quote(), Quote::Double);
}

#[test]
fn test_no_config_object() {
    assert!(SourceTree::parse("export default {}", ScriptKind::TypeScript)
        .unwrap()
        .is_none());
}

#[test]
fn test_unbalanced_input_is_an_error() {
    let err = SourceTree::parse("module.exports = { content: [ }", ScriptKind::JavaScript)
        .unwrap_err();
    assert_eq!(err.span, 30..31);
    let report = err.report("tailwind.config.js", "module.exports = { content: [ }");
    assert!(report.contains("tailwind.config.js"));
    assert!(report.contains("does not close"));
}

#[test]
fn test_malformed_config_object_is_an_error() {
    let input = "module.exports = { content: ['a' 'b'] }";
    let err = SourceTree::parse(input, ScriptKind::JavaScript).unwrap_err();
    assert!(err.span.start >= input.find("'a'").unwrap());

    let input = "module.exports = { content: [] ; }";
    let err = SourceTree::parse(input, ScriptKind::JavaScript).unwrap_err();
    assert_eq!(err.span, 31..32);
}

#[test]
fn test_later_config_object_wins_over_parse_failure() {
    let input = "const broken = { content: [] ; }\nexport default { content: [] }\n";
    let tree = locate(input, ScriptKind::JavaScript);
    assert_eq!(tree.span().start, input.rfind('{').unwrap());
}

#[test]
fn test_unparsable_blocks_without_content_are_ignored() {
    let input = "label: { const a = 1; }\nmodule.exports = require('./shared')\n";
    assert!(SourceTree::parse(input, ScriptKind::JavaScript)
        .unwrap()
        .is_none());
}

#[test]
fn test_text_outside_objects_is_not_checked() {
    // Only the object literals are parsed, the statements around them are not
    let input = "module.exports = = { content: [] }";
    let tree = locate(input, ScriptKind::JavaScript);
    assert_eq!(tree.to_string(), input);
}

#[test]
fn test_script_kind_from_path() {
    assert_eq!(
        ScriptKind::from_path(Path::new("tailwind.config.ts")),
        ScriptKind::TypeScript
    );
    assert_eq!(
        ScriptKind::from_path(Path::new("tailwind.config.mts")),
        ScriptKind::TypeScript
    );
    assert_eq!(
        ScriptKind::from_path(Path::new("tailwind.config.cjs")),
        ScriptKind::JavaScript
    );
    assert_eq!(
        ScriptKind::from_path(Path::new("tailwind.config")),
        ScriptKind::JavaScript
    );
}
