use tracing::debug;
use twmerge_syntax::lexer::lex;
use twmerge_syntax::lexer::match_delimiters;
use twmerge_syntax::ScriptKind;
use twmerge_syntax::SourceTree;

use crate::codec::Style;
use crate::edit::add_dark_mode;
use crate::edit::add_plugin;
use crate::edit::merge_theme;
use crate::error::Error;
use crate::error::Result;
use crate::spec::MergeSpec;

/// Merge `spec` into the Tailwind config in `source`, parsed as TypeScript.
///
/// Returns `source` unchanged when it holds no config object.
pub fn merge_config(source: &str, spec: &MergeSpec) -> Result<String> {
    merge_config_as(source, spec, ScriptKind::default())
}

/// Like [`merge_config`], with an explicit grammar profile.
pub fn merge_config_as(source: &str, spec: &MergeSpec, kind: ScriptKind) -> Result<String> {
    spec.validate()?;

    let Some(mut tree) = SourceTree::parse(source, kind)? else {
        return Ok(source.to_string());
    };

    let style = Style {
        quote: tree.quote(),
        indent_unit: tree.indent_unit().to_string(),
    };
    let indent = tree.indent().to_string();
    let config = tree.config_mut();

    add_dark_mode(config, spec.dark_mode_selector(), style.quote);
    for plugin in &spec.plugins {
        add_plugin(config, plugin.trim(), &indent, &style.indent_unit);
    }
    if let Some(theme) = &spec.theme {
        merge_theme(config, theme, &indent, &style);
    }

    let output = tree.to_string();
    verify(&output)?;
    debug!(
        config = ?tree.span(),
        before = source.len(),
        after = output.len(),
        "merged Tailwind config"
    );
    Ok(output)
}

fn verify(output: &str) -> Result<()> {
    let tokens = lex(output).map_err(Error::InvalidOutput)?;
    match_delimiters(&tokens).map_err(Error::InvalidOutput)?;
    Ok(())
}
