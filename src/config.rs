// CLASSIFICATION: COMMUNITY
// Filename: config.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Loader settings read from TOML with environment overrides.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::error::TreeError;
use crate::search::DEFAULT_MAX_FOUND;
use crate::tree::{read_tree_file, Tree, DEFAULT_MAX_DEPTH};

/// Environment variable overriding [`TreeConfig::tree_path`].
pub const TREE_PATH_ENV: &str = "VSS_TREE_PATH";

/// Where the tree lives and how queries against it are bounded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Native tree file.
    pub tree_path: PathBuf,
    /// Result capacity for searches.
    pub max_found: usize,
    /// Deepest nesting accepted when loading.
    pub max_depth: usize,
    /// Destination of the sorted leaf path list, if one is wanted.
    pub leaf_list_path: Option<PathBuf>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            tree_path: PathBuf::from("vss_gen2.cnative"),
            max_found: DEFAULT_MAX_FOUND,
            max_depth: DEFAULT_MAX_DEPTH,
            leaf_list_path: Some(PathBuf::from("vsspathlist.json")),
        }
    }
}

impl TreeConfig {
    /// Parse TOML text; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, TreeError> {
        Ok(toml::from_str(text)?)
    }

    /// Read a TOML file and apply environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TreeError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| TreeError::io(path, err))?;
        let mut config = Self::from_toml_str(&text)?;
        config.apply_env();
        debug!("loaded tree config from {}", path.display());
        Ok(config)
    }

    /// Apply `VSS_TREE_PATH` when set and non-empty.
    pub fn apply_env(&mut self) {
        if let Ok(path) = env::var(TREE_PATH_ENV) {
            if !path.is_empty() {
                self.tree_path = PathBuf::from(path);
            }
        }
    }

    /// Load the configured tree file.
    pub fn load_tree(&self) -> Result<Tree, TreeError> {
        read_tree_file(&self.tree_path, self.max_depth)
    }
}
