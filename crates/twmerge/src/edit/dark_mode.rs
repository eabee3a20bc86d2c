use tracing::debug;
use twmerge_syntax::ArrayLit;
use twmerge_syntax::Element;
use twmerge_syntax::Key;
use twmerge_syntax::Member;
use twmerge_syntax::Node;
use twmerge_syntax::ObjectLit;
use twmerge_syntax::Property;
use twmerge_syntax::Quote;
use twmerge_syntax::StrLit;

pub const DARK_MODE: &str = "darkMode";

pub const DEFAULT_DARK_MODE_SELECTOR: &str = "class";

/// Make sure `selector` is one of the config's dark mode selectors.
///
/// A missing `darkMode` is inserted as the first property. A string value
/// is widened to an array, and an array gets the selector appended unless
/// an element already reads exactly like it. Any other value is left alone.
pub fn add_dark_mode(config: &mut ObjectLit, selector: &str, quote: Quote) {
    let selector = StrLit::new(selector, quote);

    let Some(idx) = config.position(DARK_MODE) else {
        let value = ArrayLit::inline([Element::Value(Node::Str(selector))]);
        config.insert_first(Member::Property(Property::new(
            Key::Ident(DARK_MODE.to_string()),
            Node::Array(value),
        )));
        return;
    };

    let Member::Property(prop) = &mut config.items[idx].node else {
        debug!("`darkMode` is not a plain property, leaving it untouched");
        return;
    };
    match &mut prop.value {
        Node::Str(existing) => {
            prop.value = Node::Array(ArrayLit::inline([
                Element::Value(Node::Str(existing.clone())),
                Element::Value(Node::Str(selector)),
            ]));
        }
        Node::Array(arr) => {
            let text = selector.to_string();
            if arr.items.iter().any(|item| item.node.to_string() == text) {
                return;
            }
            arr.append_inline(Element::Value(Node::Str(selector)));
        }
        other => debug!(value = %other, "unsupported `darkMode` value, leaving it untouched"),
    }
}

#[cfg(test)]
mod tests {
    use twmerge_syntax::parse_expression;

    use super::*;

    fn apply(input: &str, selector: &str, quote: Quote) -> String {
        let Node::Object(mut config) = parse_expression(input).unwrap() else {
            panic!("Expected an object literal");
        };
        add_dark_mode(&mut config, selector, quote);
        config.to_string()
    }

    #[test]
    fn test_inserted_first() {
        assert_eq!(
            apply("{\n  content: ['./src/**/*.tsx'],\n}", "class", Quote::Single),
            "{\n  darkMode: ['class'],\n  content: ['./src/**/*.tsx'],\n}"
        );
        assert_eq!(
            apply("{ content: [] }", "class", Quote::Double),
            r#"{ darkMode: ["class"], content: [] }"#
        );
    }

    #[test]
    fn test_string_becomes_array() {
        assert_eq!(
            apply(r#"{ darkMode: "media", content: [] }"#, "class", Quote::Single),
            r#"{ darkMode: ["media", 'class'], content: [] }"#
        );
    }

    #[test]
    fn test_array_is_deduplicated_by_text() {
        let input = r#"{ darkMode: ["class"], content: [] }"#;
        assert_eq!(apply(input, "class", Quote::Double), input);
        assert_eq!(
            apply(input, "class", Quote::Single),
            r#"{ darkMode: ["class", 'class'], content: [] }"#
        );
        assert_eq!(
            apply(input, "selector", Quote::Double),
            r#"{ darkMode: ["class", "selector"], content: [] }"#
        );
    }

    #[test]
    fn test_variant_form_gets_selector_appended() {
        assert_eq!(
            apply(
                r#"{ darkMode: ["variant", "&:is(.dark *)"], content: [] }"#,
                "class",
                Quote::Double
            ),
            r#"{ darkMode: ["variant", "&:is(.dark *)", "class"], content: [] }"#
        );
        assert_eq!(
            apply(
                r#"{ darkMode: [["variant", "x"]], content: [] }"#,
                "class",
                Quote::Double
            ),
            r#"{ darkMode: [["variant", "x"], "class"], content: [] }"#
        );
    }

    #[test]
    fn test_other_values_untouched() {
        for input in [
            "{ darkMode: mode, content: [] }",
            "{ darkMode: getMode(), content: [] }",
            "{ darkMode, content: [] }",
        ] {
            assert_eq!(apply(input, "class", Quote::Double), input);
        }
    }
}
