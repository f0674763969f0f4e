//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! Specifically, we try to find a markgraph.toml, and if present we load settings from there.
//! This provides the label wrap width, the renderer program, where exports are written and the
//! layout direction of the generated graphs.

use crate::dot::DEFAULT_WRAP_WIDTH;
use facet::Facet;
use log::warn;
use std::fs;
use std::path::Path;

/// File looked for in the working directory when no config path is given.
pub const CONFIG_FILE: &str = "markgraph.toml";

#[derive(Facet, Clone, Debug, PartialEq)]
/// User preferences loaded from markgraph.toml or falling back to defaults.
pub struct Config {
    #[facet(default = DEFAULT_WRAP_WIDTH)]
    /// Maximum label width in characters before soft wrapping (0 disables wrapping).
    pub wrap_width: usize,
    #[facet(default = "dot".to_string())]
    /// Program invoked to render exports.
    pub renderer: String,
    #[facet(default = String::new())]
    /// Directory for exported files; empty means next to the input document.
    pub output_dir: String,
    #[facet(default = "TB".to_string())]
    /// Graphviz `rankdir` of generated graphs.
    pub rankdir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wrap_width: DEFAULT_WRAP_WIDTH,
            renderer: "dot".to_string(),
            output_dir: String::new(),
            rankdir: "TB".to_string(),
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from markgraph.toml if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load a config file the user named explicitly, warning if it does not exist.
    pub fn load_explicit(path: &Path) -> Self {
        if !path.exists() {
            warn!("Config file {} not found, using defaults", path.display());
        }
        Self::load_from(path)
    }

    #[must_use]
    /// Load configuration from `path`, using defaults if it is missing or unreadable.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        match facet_toml::from_str::<Self>(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring invalid {}: {e}", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
