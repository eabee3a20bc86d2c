//! What to merge into a Tailwind config.

use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::edit::DEFAULT_DARK_MODE_SELECTOR;
use crate::error::Error;
use crate::error::Result;
use crate::value::Value;

/// Desired additions to a Tailwind config.
///
/// Loads from JSON or TOML with camelCase keys:
///
/// ```toml
/// darkModeSelector = "class"
/// plugins = ['require("tailwindcss-animate")']
///
/// [theme.extend.colors]
/// border = "hsl(var(--border))"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct MergeSpec {
    /// Defaults to `class`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_mode_selector: Option<String>,

    /// Plugin expressions, such as `require("tailwindcss-animate")`.
    pub plugins: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Value>,
}

impl MergeSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dark_mode_selector(mut self, selector: impl Into<String>) -> Self {
        self.dark_mode_selector = Some(selector.into());
        self
    }

    pub fn with_plugin(mut self, plugin: impl Into<String>) -> Self {
        self.plugins.push(plugin.into());
        self
    }

    pub fn with_theme(mut self, theme: impl Into<Value>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn dark_mode_selector(&self) -> &str {
        self.dark_mode_selector
            .as_deref()
            .unwrap_or(DEFAULT_DARK_MODE_SELECTOR)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let spec: Self =
            serde_json::from_str(text).map_err(|e| Error::InvalidSpec(e.to_string()))?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let spec: Self = toml::from_str(text).map_err(|e| Error::InvalidSpec(e.to_string()))?;
        spec.validate()?;
        Ok(spec)
    }

    /// Load a spec file: TOML for `.toml`, JSON otherwise.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let is_toml = path.extension().is_some_and(|ext| ext == "toml");
        let spec: Self = if is_toml {
            toml::from_str(&content).map_err(|e| Error::Spec {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        } else {
            serde_json::from_str(&content).map_err(|e| Error::Spec {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(selector) = &self.dark_mode_selector {
            if selector.trim().is_empty() {
                return Err(Error::InvalidSpec(
                    "darkModeSelector must not be empty".to_string(),
                ));
            }
        }
        if let Some(idx) = self.plugins.iter().position(|p| p.trim().is_empty()) {
            return Err(Error::InvalidSpec(format!("plugins[{idx}] is empty")));
        }
        if let Some(theme) = &self.theme {
            if theme.as_object().is_none() {
                return Err(Error::InvalidSpec(format!(
                    "theme must be an object, got {}",
                    theme.kind()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selector() {
        assert_eq!(MergeSpec::new().dark_mode_selector(), "class");
        assert_eq!(
            MergeSpec::new()
                .with_dark_mode_selector("selector")
                .dark_mode_selector(),
            "selector"
        );
    }

    #[test]
    fn test_validate_rejects_bad_specs() {
        let err = MergeSpec::new().with_theme("red").validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid merge spec: theme must be an object, got string"
        );

        let err = MergeSpec::new().with_plugin("  ").validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid merge spec: plugins[0] is empty");

        let err = MergeSpec::new()
            .with_dark_mode_selector("")
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSpec(_)));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = MergeSpec::from_json_str(r#"{ "darkmode": "class" }"#).unwrap_err();
        assert!(err.to_string().contains("unknown field `darkmode`"));
    }
}
