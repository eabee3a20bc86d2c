use tracing::debug;
use twmerge_syntax::Key;
use twmerge_syntax::Member;
use twmerge_syntax::Node;
use twmerge_syntax::ObjectLit;
use twmerge_syntax::Property;

use crate::codec::decode;
use crate::codec::rebuild;
use crate::codec::Style;
use crate::merge::deep_merge;
use crate::nest::nest_object;
use crate::nest::unnest_object;
use crate::nest::Spreads;
use crate::value::Value;

pub const THEME: &str = "theme";

/// Deep merge `theme` into the config's `theme` object.
///
/// `indent` is the indentation of the line the config object starts on.
/// Spreads anywhere in the config take part in the merge as placeholder
/// properties and are restored afterwards.
pub fn merge_theme(config: &mut ObjectLit, theme: &Value, indent: &str, style: &Style) {
    if config.position(THEME).is_none() {
        config.append_with(indent, &style.indent_unit, |_| {
            Member::Property(Property::new(
                Key::Ident(THEME.to_string()),
                Node::Object(ObjectLit::default()),
            ))
        });
    }

    let mut spreads = Spreads::default();
    nest_object(config, &mut spreads);
    if !spreads.is_empty() {
        debug!(count = spreads.len(), "nested spreads for the theme merge");
    }

    let member_indent = config
        .position(THEME)
        .map(|idx| config.item_indent(idx, indent).to_string())
        .unwrap_or_else(|| indent.to_string());
    match config.property_mut(THEME) {
        Some(Property {
            value: existing @ Node::Object(_),
            ..
        }) => {
            let mut merged = decode(existing);
            deep_merge(&mut merged, theme);
            *existing = rebuild(existing, &merged, &member_indent, style);
        }
        Some(Property { value, .. }) => {
            debug!(value = %value, "`theme` is not an object literal, skipping merge");
        }
        None => debug!("`theme` is not a plain property, skipping merge"),
    }

    unnest_object(config, &spreads);
}
