//! Shadow collections
//!
//! A named set of renderable prims a light casts shadows from. Collections are
//! compared by value; when a light's collection changes, downstream consumers
//! are told through the change tracker using the collection name.

use serde::{Deserialize, Serialize};

/// Material tag used when a collection does not name one
pub const DEFAULT_MATERIAL_TAG: &str = "defaultMaterialTag";

/// Named grouping of renderable prims
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimCollection {
    /// Collection name, the key downstream invalidation is keyed on
    pub name: String,
    /// Material tag filter; empty matches every tag
    pub material_tag: String,
    /// Scene paths whose subtrees are included
    pub root_paths: Vec<String>,
    /// Scene paths whose subtrees are excluded
    pub exclude_paths: Vec<String>,
}

impl PrimCollection {
    /// Collection rooted at the absolute root, matching the default material tag
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            material_tag: DEFAULT_MATERIAL_TAG.to_string(),
            root_paths: vec!["/".to_string()],
            exclude_paths: Vec::new(),
        }
    }

    /// Replace the included root paths
    pub fn with_root_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.root_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the excluded paths
    pub fn with_exclude_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a prim path falls inside this collection
    pub fn contains_path(&self, path: &str) -> bool {
        let under = |root: &String| is_prefix_path(root, path);
        self.root_paths.iter().any(under) && !self.exclude_paths.iter().any(under)
    }
}

fn is_prefix_path(root: &str, path: &str) -> bool {
    if root == "/" {
        return path.starts_with('/');
    }
    match path.strip_prefix(root) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
