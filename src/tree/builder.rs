// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Programmatic construction of signal trees for tests and tooling.
// Author: Lukas Bower

use vss_codec::{
    validate_name, BranchPayload, Datatype, EnumElement, NodeType, Payload, PropertyDefinition,
    RuleBranchPayload, UniqueObject,
};

use super::{Node, Tree, DEFAULT_MAX_DEPTH};
use crate::error::TreeError;
use crate::handle::NodeHandle;

/// Attributes of a node to be inserted by [`TreeBuilder`].
#[derive(Debug, Clone)]
pub struct NodeSpec {
    name: String,
    description: String,
    node_type: NodeType,
    payload: Payload,
}

impl NodeSpec {
    /// Plain branch node.
    #[must_use]
    pub fn branch(name: &str, description: &str) -> Self {
        Self::signal(name, description, NodeType::Branch, None)
    }

    /// Leaf signal of type `node_type`; `datatype` of `None` writes code 0.
    #[must_use]
    pub fn signal(
        name: &str,
        description: &str,
        node_type: NodeType,
        datatype: Option<Datatype>,
    ) -> Self {
        let payload = BranchPayload {
            datatype: datatype.map_or(0, Datatype::code),
            ..BranchPayload::default()
        };
        Self {
            name: name.to_owned(),
            description: description.to_owned(),
            node_type,
            payload: Payload::Branch(payload),
        }
    }

    /// Sensor leaf.
    #[must_use]
    pub fn sensor(name: &str, description: &str, datatype: Datatype) -> Self {
        Self::signal(name, description, NodeType::Sensor, Some(datatype))
    }

    /// Actuator leaf.
    #[must_use]
    pub fn actuator(name: &str, description: &str, datatype: Datatype) -> Self {
        Self::signal(name, description, NodeType::Actuator, Some(datatype))
    }

    /// Rule branch carrying opaque property definitions.
    #[must_use]
    pub fn rule_branch(
        name: &str,
        description: &str,
        child_type_len: i32,
        properties: Vec<PropertyDefinition>,
    ) -> Self {
        Self {
            name: name.to_owned(),
            description: description.to_owned(),
            node_type: NodeType::RBranch,
            payload: Payload::RuleBranch(RuleBranchPayload {
                child_type_len,
                properties,
            }),
        }
    }

    /// Element node carrying a unique object.
    #[must_use]
    pub fn element(name: &str, description: &str, object: UniqueObject) -> Self {
        Self {
            name: name.to_owned(),
            description: description.to_owned(),
            node_type: NodeType::Element,
            payload: Payload::Element(object),
        }
    }

    /// Set value bounds. Ignored for non-default layouts.
    #[must_use]
    pub fn with_range(mut self, min: i32, max: i32) -> Self {
        if let Payload::Branch(payload) = &mut self.payload {
            payload.min = min;
            payload.max = max;
        }
        self
    }

    /// Set the unit; an empty unit clears it.
    #[must_use]
    pub fn with_unit(mut self, unit: &str) -> Self {
        if let Payload::Branch(payload) = &mut self.payload {
            payload.unit = non_empty(unit);
        }
        self
    }

    /// Set the function text; an empty text clears it.
    #[must_use]
    pub fn with_function(mut self, function: &str) -> Self {
        if let Payload::Branch(payload) = &mut self.payload {
            payload.function = non_empty(function);
        }
        self
    }

    /// Set the enumeration.
    #[must_use]
    pub fn with_enum(mut self, values: Vec<EnumElement>) -> Self {
        if let Payload::Branch(payload) = &mut self.payload {
            payload.enumeration = values;
        }
        self
    }

    fn validate(&self) -> Result<(), TreeError> {
        validate_name(&self.name)
            .map_err(|_| TreeError::invalid_node(&self.name, "name must be 1-64 bytes without NUL"))?;
        if self.description.contains('\0') {
            return Err(TreeError::invalid_node(&self.name, "description contains NUL"));
        }
        if self.node_type.variant() != self.payload.variant() {
            return Err(TreeError::invalid_node(
                &self.name,
                format!("payload does not match node type {}", self.node_type),
            ));
        }
        Ok(())
    }

    fn into_node(self, parent: Option<NodeHandle>) -> Node {
        Node {
            name: self.name,
            description: self.description,
            node_type: self.node_type,
            parent,
            children: Vec::new(),
            payload: self.payload,
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_owned())
}

/// Incremental tree constructor.
///
/// Children are appended in call order, which becomes the encoded order.
#[derive(Debug)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
    depths: Vec<usize>,
    max_depth: usize,
}

impl TreeBuilder {
    /// Start a tree from its root node.
    pub fn new(root: NodeSpec) -> Result<Self, TreeError> {
        root.validate()?;
        Ok(Self {
            nodes: vec![root.into_node(None)],
            depths: vec![1],
            max_depth: DEFAULT_MAX_DEPTH,
        })
    }

    /// Override the nesting limit applied by [`add_child`](Self::add_child).
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Handle of the root node.
    #[must_use]
    pub fn root(&self) -> NodeHandle {
        NodeHandle::ROOT
    }

    /// Append a child to `parent` and return its handle.
    pub fn add_child(&mut self, parent: NodeHandle, spec: NodeSpec) -> Result<NodeHandle, TreeError> {
        spec.validate()?;
        let depth = *self
            .depths
            .get(parent.index())
            .ok_or_else(|| TreeError::invalid_node(&spec.name, "unknown parent handle"))?
            + 1;
        if depth > self.max_depth {
            return Err(TreeError::invalid_node(
                &spec.name,
                format!("depth exceeds limit {}", self.max_depth),
            ));
        }
        let index = self.nodes.len();
        let raw = u32::try_from(index)
            .map_err(|_| TreeError::invalid_node(&spec.name, "tree holds too many nodes"))?;
        let siblings = self.nodes[parent.index()].children.len();
        if i32::try_from(siblings + 1).is_err() {
            return Err(TreeError::invalid_node(&spec.name, "too many children"));
        }
        let handle = NodeHandle::from_raw(raw);
        self.nodes.push(spec.into_node(Some(parent)));
        self.depths.push(depth);
        self.nodes[parent.index()].children.push(handle);
        Ok(handle)
    }

    /// Finish construction.
    #[must_use]
    pub fn build(self) -> Tree {
        Tree::from_nodes(self.nodes)
    }
}
