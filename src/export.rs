// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: JSON views of the signal tree consumed by transport managers.
// Author: Lukas Bower

//! JSON exports of a loaded tree: the sorted leaf path list and metadata
//! documents describing a resolved subtree.

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::TreeError;
use crate::handle::{NodeHandle, NodeView};
use crate::search::{search, DEFAULT_MAX_FOUND};
use crate::tree::Tree;

/// Depth used when a subtree document is requested with depth `0`.
pub const MAX_DOCUMENT_DEPTH: usize = 100;

/// On-disk shape of the leaf path list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafPathList {
    /// Full dotted paths of every leaf.
    #[serde(rename = "LeafPaths")]
    pub leaf_paths: Vec<String>,
}

/// Full dotted path of every leaf, in pre-order.
#[must_use]
pub fn leaf_paths(tree: &Tree) -> Vec<String> {
    let mut paths = Vec::new();
    let mut pending = vec![(tree.root(), tree.get(tree.root()).name.clone())];
    while let Some((handle, path)) = pending.pop() {
        let node = tree.get(handle);
        if !node.node_type.is_branch() {
            paths.push(path.clone());
        }
        pending.extend(
            node.children
                .iter()
                .rev()
                .map(|child| (*child, format!("{path}.{}", tree.get(*child).name))),
        );
    }
    paths
}

/// Write the sorted leaf path list to `path` as `{"LeafPaths": [...]}`.
pub fn write_leaf_list(tree: &Tree, path: impl AsRef<Path>) -> Result<usize, TreeError> {
    let path = path.as_ref();
    let mut list = LeafPathList {
        leaf_paths: leaf_paths(tree),
    };
    list.leaf_paths.sort();
    let json = serde_json::to_vec(&list)?;
    fs::write(path, json).map_err(|err| TreeError::io(path, err))?;
    info!(
        "wrote {} leaf paths to {}",
        list.leaf_paths.len(),
        path.display()
    );
    Ok(list.leaf_paths.len())
}

/// Read a leaf path list written by [`write_leaf_list`].
pub fn read_leaf_list(path: impl AsRef<Path>) -> Result<LeafPathList, TreeError> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|err| TreeError::io(path, err))?;
    Ok(serde_json::from_slice(&data)?)
}

#[derive(Debug, Serialize)]
struct NodeDocument<'a> {
    #[serde(rename = "type")]
    node_type: &'static str,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    datatype: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<&'a str>,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    enumeration: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<ChildDocuments<'a>>,
}

/// Children keyed by name, serialized in tree order.
#[derive(Debug)]
struct ChildDocuments<'a>(Vec<(&'a str, NodeDocument<'a>)>);

impl Serialize for ChildDocuments<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, document) in &self.0 {
            map.serialize_entry(name, document)?;
        }
        map.end()
    }
}

impl<'a> NodeDocument<'a> {
    fn render(view: NodeView<'a>, tree: &'a Tree, depth: usize, max_depth: usize) -> Self {
        let signal = view.node_type().is_signal();
        let children = (depth + 1 < max_depth && view.child_count() > 0).then(|| {
            ChildDocuments(
                view.children()
                    .filter_map(|child| tree.node(child))
                    .map(|child| (child.name(), Self::render(child, tree, depth + 1, max_depth)))
                    .collect(),
            )
        });
        Self {
            node_type: view.node_type().as_str(),
            description: view.description(),
            datatype: view.datatype().map(|datatype| datatype.as_str()),
            unit: view.unit(),
            enumeration: (0..view.enum_count())
                .filter_map(|index| view.enum_element(index))
                .collect(),
            min: signal.then(|| view.min()),
            max: signal.then(|| view.max()),
            children,
        }
    }
}

/// Render the subtree found by `path` under `root` as a JSON document.
///
/// The path is resolved without all-depth expansion and the last match
/// becomes the document root. Children keep the order of the tree.
/// `depth` bounds the rendered levels; `0`
/// means [`MAX_DOCUMENT_DEPTH`]. Returns `None` when nothing matched.
pub fn subtree_json(
    tree: &Tree,
    root: NodeHandle,
    path: &str,
    depth: usize,
) -> Result<Option<Value>, TreeError> {
    let results = search(tree, path, root, DEFAULT_MAX_FOUND, false)?;
    let Some(last) = results.matches().last() else {
        warn!("no node matches '{path}', nothing to render");
        return Ok(None);
    };
    let Some(view) = tree.node(last.handle) else {
        return Ok(None);
    };
    let max_depth = match depth {
        0 => MAX_DOCUMENT_DEPTH,
        other => other.min(MAX_DOCUMENT_DEPTH),
    };
    let rendered = serde_json::to_value(NodeDocument::render(view, tree, 0, max_depth))?;
    let mut document = Map::new();
    document.insert(view.name().to_owned(), rendered);
    Ok(Some(Value::Object(document)))
}
