// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Opaque node handles and read-only accessor views.
// Author: Lukas Bower

//! Opaque node handles and typed read-only accessors.
//!
//! Callers outside the crate address nodes only through [`NodeHandle`] and
//! read them through [`NodeView`]; the arena itself is never exposed.

use std::fmt;

use vss_codec::{
    BranchPayload, Datatype, ElementRef, EnumElement, NodeType, ObjectType, Payload,
    PropertyDefinition, UniqueObject, Variant,
};

use crate::tree::{Node, Tree};

/// Stable opaque reference to a node of one [`Tree`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(u32);

impl NodeHandle {
    /// Handle of every tree's root node.
    pub const ROOT: NodeHandle = NodeHandle(0);

    /// Rebuild a handle from its raw value.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw value suitable for handing to an external service layer.
    #[must_use]
    pub const fn as_raw(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeHandle({})", self.0)
    }
}

/// Read-only view of one node.
#[derive(Clone, Copy)]
pub struct NodeView<'a> {
    tree: &'a Tree,
    handle: NodeHandle,
    node: &'a Node,
}

impl<'a> NodeView<'a> {
    pub(crate) fn new(tree: &'a Tree, handle: NodeHandle, node: &'a Node) -> Self {
        Self { tree, handle, node }
    }

    /// Handle of this node.
    #[must_use]
    pub fn handle(&self) -> NodeHandle {
        self.handle
    }

    /// Parent handle; `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.node.parent
    }

    /// Number of children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.node.children.len()
    }

    /// Child at `index` in array order.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<NodeHandle> {
        self.node.children.get(index).copied()
    }

    /// Children in array order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = NodeHandle> + 'a {
        self.node.children.iter().copied()
    }

    /// Node type tag.
    #[must_use]
    pub fn node_type(&self) -> NodeType {
        self.node.node_type
    }

    /// Payload layout family.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.node.payload.variant()
    }

    /// Leaf nodes are everything that is not a branch or rule branch.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        !self.node.node_type.is_branch()
    }

    /// Datatype of a leaf signal; `None` for other kinds or unknown codes.
    #[must_use]
    pub fn datatype(&self) -> Option<Datatype> {
        if !self.node.node_type.is_signal() {
            return None;
        }
        self.branch().and_then(|payload| Datatype::from_code(payload.datatype))
    }

    /// Raw datatype code as stored; `None` outside the default layout.
    #[must_use]
    pub fn datatype_code(&self) -> Option<i32> {
        self.branch().map(|payload| payload.datatype)
    }

    /// Node name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.node.name
    }

    /// Node description, possibly empty.
    #[must_use]
    pub fn description(&self) -> &'a str {
        &self.node.description
    }

    /// Lower bound; `0` outside the default layout.
    #[must_use]
    pub fn min(&self) -> i32 {
        self.branch().map_or(0, |payload| payload.min)
    }

    /// Upper bound; `0` outside the default layout.
    #[must_use]
    pub fn max(&self) -> i32 {
        self.branch().map_or(0, |payload| payload.max)
    }

    /// Unit text, if any.
    #[must_use]
    pub fn unit(&self) -> Option<&'a str> {
        self.branch().and_then(|payload| payload.unit.as_deref())
    }

    /// Function text, if any.
    #[must_use]
    pub fn function(&self) -> Option<&'a str> {
        self.branch().and_then(|payload| payload.function.as_deref())
    }

    /// Number of enumeration elements.
    #[must_use]
    pub fn enum_count(&self) -> usize {
        self.branch().map_or(0, |payload| payload.enumeration.len())
    }

    /// Enumeration element text at `index`.
    #[must_use]
    pub fn enum_element(&self, index: usize) -> Option<&'a str> {
        self.enum_record(index).map(EnumElement::text)
    }

    /// Raw enumeration record at `index`.
    #[must_use]
    pub fn enum_record(&self, index: usize) -> Option<&'a EnumElement> {
        self.branch().and_then(|payload| payload.enumeration.get(index))
    }

    /// Child type length tag of a rule branch.
    #[must_use]
    pub fn child_type_len(&self) -> Option<i32> {
        match &self.node.payload {
            Payload::RuleBranch(payload) => Some(payload.child_type_len),
            _ => None,
        }
    }

    /// Property definitions of a rule branch; empty otherwise.
    #[must_use]
    pub fn properties(&self) -> &'a [PropertyDefinition] {
        match &self.node.payload {
            Payload::RuleBranch(payload) => &payload.properties,
            _ => &[],
        }
    }

    /// Unique object of an element node.
    #[must_use]
    pub fn resource(&self) -> Option<ResourceView<'a>> {
        match &self.node.payload {
            Payload::Element(object) => Some(ResourceView { object }),
            _ => None,
        }
    }

    /// Full dotted path from the tree root.
    #[must_use]
    pub fn path(&self) -> String {
        self.tree.path_of(self.handle).unwrap_or_default()
    }

    fn branch(&self) -> Option<&'a BranchPayload> {
        match &self.node.payload {
            Payload::Branch(payload) => Some(payload),
            _ => None,
        }
    }
}

impl fmt::Debug for NodeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeView")
            .field("handle", &self.handle)
            .field("name", &self.node.name)
            .field("node_type", &self.node.node_type)
            .field("children", &self.node.children.len())
            .finish()
    }
}

/// Read-only view of an element's unique object.
#[derive(Debug, Clone, Copy)]
pub struct ResourceView<'a> {
    object: &'a UniqueObject,
}

impl<'a> ResourceView<'a> {
    /// Object type tag.
    #[must_use]
    pub fn object_type(&self) -> ObjectType {
        self.object.object_type()
    }

    /// Item count of a media collection; `None` for other objects.
    #[must_use]
    pub fn media_collection_item_count(&self) -> Option<usize> {
        match self.object {
            UniqueObject::MediaCollection(collection) => Some(collection.items.len()),
            UniqueObject::MediaItem(_) => None,
        }
    }

    /// Item reference at `index` of a media collection.
    #[must_use]
    pub fn media_collection_item(&self, index: usize) -> Option<&'a ElementRef> {
        match self.object {
            UniqueObject::MediaCollection(collection) => collection.items.get(index),
            UniqueObject::MediaItem(_) => None,
        }
    }

    /// Underlying object.
    #[must_use]
    pub fn object(&self) -> &'a UniqueObject {
        self.object
    }
}
