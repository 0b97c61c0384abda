// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph editing settings.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// What happens when a second link targets an input without `MULTI_LINK`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SingleLinkPolicy {
    /// The new link is refused
    #[default]
    Reject,
    /// The existing link is removed in favor of the new one
    Replace,
}

/// Per-graph settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Policy for occupied single-link inputs
    pub single_link_policy: SingleLinkPolicy,
    /// Allow links between different ports of the same node
    pub allow_node_self_links: bool,
    /// Offset applied to pasted nodes
    pub paste_offset: [f32; 2],
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            single_link_policy: SingleLinkPolicy::Reject,
            allow_node_self_links: true,
            paste_offset: [20.0, 20.0],
        }
    }
}

impl GraphConfig {
    /// Parse settings from RON
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Serialize settings to pretty RON
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Load settings from a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_ron(&content)?;
        tracing::debug!("Loaded graph settings from {:?}", path);
        Ok(config)
    }
}

/// Error when reading settings
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    /// RON parse failure
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// RON write failure
    #[error("Failed to write settings: {0}")]
    Write(#[from] ron::Error),
}
