//! Renderer configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options that change how a record is rendered.
///
/// The defaults produce the byte-compatible layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Quote `subscriber_id` and `fqdn` like `identity` and `version`.
    ///
    /// Off by default: those two fields are written as raw strings. A raw
    /// value containing a newline is written as is and can add lines to the
    /// document, so enable this when the values are untrusted.
    pub quote_opaque_strings: bool,
}

impl RenderConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a TOML document.
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::RenderError::Config(e.to_string()))
    }
}
