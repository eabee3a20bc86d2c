use tracing::debug;
use twmerge_syntax::ArrayLit;
use twmerge_syntax::Element;
use twmerge_syntax::Key;
use twmerge_syntax::Member;
use twmerge_syntax::Node;
use twmerge_syntax::ObjectLit;
use twmerge_syntax::Property;

pub const PLUGINS: &str = "plugins";

/// Add the plugin expression `plugin` to the config's `plugins` array.
///
/// Plugins are compared with quotes stripped, so `require("a")` and
/// `require('a')` are the same plugin.
pub fn add_plugin(config: &mut ObjectLit, plugin: &str, indent: &str, unit: &str) {
    let Some(idx) = config.position(PLUGINS) else {
        config.append_with(indent, unit, |_| {
            Member::Property(Property::new(
                Key::Ident(PLUGINS.to_string()),
                Node::Array(ArrayLit::inline([Element::Value(Node::Expr(
                    plugin.to_string(),
                ))])),
            ))
        });
        return;
    };

    let Member::Property(Property {
        value: Node::Array(arr),
        ..
    }) = &mut config.items[idx].node
    else {
        debug!(plugin, "`plugins` is not an array literal, leaving it untouched");
        return;
    };

    let wanted = strip_quotes(plugin);
    if arr
        .items
        .iter()
        .any(|item| strip_quotes(&item.node.to_string()) == wanted)
    {
        return;
    }
    arr.append_inline(Element::Value(Node::Expr(plugin.to_string())));
}

fn strip_quotes(text: &str) -> String {
    text.chars().filter(|c| *c != '"' && *c != '\'').collect()
}
