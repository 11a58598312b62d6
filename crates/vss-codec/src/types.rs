// Author: Lukas Bower
// Purpose: Define VSS native tree wire types and constants shared across components.
#![allow(clippy::module_name_repetitions)]

//! Data model definitions for the native VSS tree format.

use core::fmt;

use alloc::string::String;
use alloc::vec::Vec;

/// Size of the common header preceding every node record.
pub const HEADER_LEN: usize = 16;

/// Maximum byte length of a node name.
pub const MAX_NAME_LEN: usize = 64;

/// Byte length of one enumeration element record.
pub const ENUM_ELEMENT_LEN: usize = 40;

/// Byte length of one rule-branch property definition record.
pub const PROPERTY_DEFINITION_LEN: usize = 64;

/// Byte length of one media collection element reference record.
pub const ELEMENT_REF_LEN: usize = 64;

/// Possible errors produced while encoding or decoding tree records.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum CodecError {
    /// Input ended before the declared structure was fully read.
    #[error("truncated input")]
    Truncated,
    /// Encountered a node type code outside the known set.
    #[error("unknown node type {0}")]
    UnknownVariant(i32),
    /// Encountered an element object type outside the known set.
    #[error("unknown object type {0}")]
    UnknownObjectType(i32),
    /// A length or count field was negative or does not fit the wire width.
    #[error("invalid length {0}")]
    InvalidLength(i64),
    /// Encountered malformed UTF-8 data in a string field.
    #[error("invalid utf8 in string field")]
    InvalidUtf8,
    /// Node name is empty, longer than [`MAX_NAME_LEN`], or contains a
    /// NUL or the `.` path separator.
    #[error("invalid node name")]
    InvalidName,
    /// Bytes remained after the root subtree was complete.
    #[error("{0} trailing bytes after root node")]
    TrailingBytes(usize),
    /// A string field other than the name contains a NUL byte.
    #[error("embedded nul in string field")]
    EmbeddedNul,
    /// Payload layout does not match the node type.
    #[error("payload does not match node type {0}")]
    PayloadMismatch(NodeType),
    /// Nesting exceeded the supported tree depth.
    #[error("tree depth exceeds limit {limit}")]
    DepthExceeded {
        /// Configured maximum depth.
        limit: usize,
    },
}

/// Node type tag carried in every record header.
///
/// Types `Sensor` through `Branch` share the default payload layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum NodeType {
    /// Leaf signal measured by the vehicle.
    Sensor = 10,
    /// Leaf signal that may be actuated.
    Actuator = 11,
    /// Leaf signal carrying a data stream.
    Stream = 12,
    /// Leaf signal with a static value.
    Attribute = 13,
    /// Internal node grouping other nodes.
    Branch = 14,
    /// Internal node whose children are typed by property definitions.
    RBranch = 15,
    /// Node carrying a unique object payload.
    Element = 16,
}

impl NodeType {
    /// Return the raw wire code.
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Payload layout selected by this node type.
    #[must_use]
    pub fn variant(self) -> Variant {
        match self {
            NodeType::RBranch => Variant::RuleBranch,
            NodeType::Element => Variant::Element,
            _ => Variant::Branch,
        }
    }

    /// Check whether the type denotes an internal (branch-type) node.
    #[must_use]
    pub fn is_branch(self) -> bool {
        matches!(self, NodeType::Branch | NodeType::RBranch)
    }

    /// Check whether the type denotes a leaf signal carrying a datatype.
    #[must_use]
    pub fn is_signal(self) -> bool {
        matches!(
            self,
            NodeType::Sensor | NodeType::Actuator | NodeType::Stream | NodeType::Attribute
        )
    }

    /// Lowercase name used by the service layer.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Sensor => "sensor",
            NodeType::Actuator => "actuator",
            NodeType::Stream => "stream",
            NodeType::Attribute => "attribute",
            NodeType::Branch => "branch",
            NodeType::RBranch => "rbranch",
            NodeType::Element => "element",
        }
    }
}

impl TryFrom<i32> for NodeType {
    type Error = CodecError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        use NodeType::*;
        Ok(match value {
            10 => Sensor,
            11 => Actuator,
            12 => Stream,
            13 => Attribute,
            14 => Branch,
            15 => RBranch,
            16 => Element,
            other => return Err(CodecError::UnknownVariant(other)),
        })
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload layout family of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Default layout: datatype, bounds, unit, enumeration, function.
    Branch,
    /// Rule-branch layout: child type length and property definitions.
    RuleBranch,
    /// Element layout: tagged unique object.
    Element,
}

/// Leaf signal datatype codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Datatype {
    /// Signed 8-bit integer.
    Int8 = 0,
    /// Unsigned 8-bit integer.
    Uint8 = 1,
    /// Signed 16-bit integer.
    Int16 = 2,
    /// Unsigned 16-bit integer.
    Uint16 = 3,
    /// Signed 32-bit integer.
    Int32 = 4,
    /// Unsigned 32-bit integer.
    Uint32 = 5,
    /// Double precision float.
    Double = 6,
    /// Single precision float.
    Float = 7,
    /// Boolean.
    Boolean = 8,
    /// UTF-8 string.
    String = 9,
}

impl Datatype {
    /// Map a raw wire code to a datatype, if known.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Datatype::Int8,
            1 => Datatype::Uint8,
            2 => Datatype::Int16,
            3 => Datatype::Uint16,
            4 => Datatype::Int32,
            5 => Datatype::Uint32,
            6 => Datatype::Double,
            7 => Datatype::Float,
            8 => Datatype::Boolean,
            9 => Datatype::String,
            _ => return None,
        })
    }

    /// Return the raw wire code.
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Lowercase name used by the service layer.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Datatype::Int8 => "int8",
            Datatype::Uint8 => "uint8",
            Datatype::Int16 => "int16",
            Datatype::Uint16 => "uint16",
            Datatype::Int32 => "int32",
            Datatype::Uint32 => "uint32",
            Datatype::Double => "double",
            Datatype::Float => "float",
            Datatype::Boolean => "boolean",
            Datatype::String => "string",
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Element object type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ObjectType {
    /// Collection of media element references.
    MediaCollection = 0,
    /// Single media item.
    MediaItem = 1,
}

impl ObjectType {
    /// Return the raw wire code.
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for ObjectType {
    type Error = CodecError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ObjectType::MediaCollection),
            1 => Ok(ObjectType::MediaItem),
            other => Err(CodecError::UnknownObjectType(other)),
        }
    }
}

/// Header shared by every node record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommonHeader {
    name_len: u32,
    description_len: u32,
    node_type: NodeType,
    child_count: u32,
}

impl CommonHeader {
    /// Construct a header from its decoded fields.
    #[must_use]
    pub fn new(name_len: u32, description_len: u32, node_type: NodeType, child_count: u32) -> Self {
        Self {
            name_len,
            description_len,
            node_type,
            child_count,
        }
    }

    /// Declared name length in bytes.
    #[must_use]
    pub fn name_len(&self) -> u32 {
        self.name_len
    }

    /// Declared description length in bytes.
    #[must_use]
    pub fn description_len(&self) -> u32 {
        self.description_len
    }

    /// Node type tag.
    #[must_use]
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Number of child records following this node's payload.
    #[must_use]
    pub fn child_count(&self) -> u32 {
        self.child_count
    }
}

/// Fixed-width record copied verbatim between wire and memory.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedRecord<const N: usize>([u8; N]);

/// Enumeration element of a leaf signal.
pub type EnumElement = FixedRecord<ENUM_ELEMENT_LEN>;

/// Rule-branch property definition, kept opaque.
pub type PropertyDefinition = FixedRecord<PROPERTY_DEFINITION_LEN>;

/// Reference from a media collection to another element.
pub type ElementRef = FixedRecord<ELEMENT_REF_LEN>;

impl<const N: usize> FixedRecord<N> {
    /// Wrap raw record bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    /// Build a NUL-padded record from text.
    pub fn from_text(text: &str) -> Result<Self, CodecError> {
        let raw = text.as_bytes();
        if raw.len() > N || raw.contains(&0) {
            return Err(CodecError::InvalidLength(raw.len() as i64));
        }
        let mut bytes = [0u8; N];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(Self(bytes))
    }

    /// Raw record bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    /// Text up to the first NUL, cut at the last valid UTF-8 boundary.
    #[must_use]
    pub fn text(&self) -> &str {
        let end = self.0.iter().position(|b| *b == 0).unwrap_or(N);
        let raw = &self.0[..end];
        match core::str::from_utf8(raw) {
            Ok(text) => text,
            Err(err) => core::str::from_utf8(&raw[..err.valid_up_to()]).unwrap_or_default(),
        }
    }
}

impl<const N: usize> fmt::Debug for FixedRecord<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FixedRecord").field(&self.text()).finish()
    }
}

/// Payload of default-layout nodes (branches and leaf signals).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchPayload {
    /// Raw datatype code, preserved even when it is not meaningful.
    pub datatype: i32,
    /// Lower bound.
    pub min: i32,
    /// Upper bound.
    pub max: i32,
    /// Unit of the signal value.
    pub unit: Option<String>,
    /// Allowed values.
    pub enumeration: Vec<EnumElement>,
    /// Formula associated with the node.
    pub function: Option<String>,
}

/// Payload of rule-branch nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleBranchPayload {
    /// Byte-length tag of the encoded child type metadata.
    pub child_type_len: i32,
    /// Property definition records.
    pub properties: Vec<PropertyDefinition>,
}

/// Media collection body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaCollection {
    /// Element references in collection order.
    pub items: Vec<ElementRef>,
}

/// Media item body. The current format carries no data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaItem;

/// Unique object carried by element nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniqueObject {
    /// Collection of element references.
    MediaCollection(MediaCollection),
    /// Single media item.
    MediaItem(MediaItem),
}

impl UniqueObject {
    /// Object type tag of the payload.
    #[must_use]
    pub fn object_type(&self) -> ObjectType {
        match self {
            UniqueObject::MediaCollection(_) => ObjectType::MediaCollection,
            UniqueObject::MediaItem(_) => ObjectType::MediaItem,
        }
    }
}

/// Variant-specific payload of a node record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Default layout.
    Branch(BranchPayload),
    /// Rule-branch layout.
    RuleBranch(RuleBranchPayload),
    /// Element layout.
    Element(UniqueObject),
}

impl Payload {
    /// Layout family of the payload.
    #[must_use]
    pub fn variant(&self) -> Variant {
        match self {
            Payload::Branch(_) => Variant::Branch,
            Payload::RuleBranch(_) => Variant::RuleBranch,
            Payload::Element(_) => Variant::Element,
        }
    }
}

/// One decoded node record, without its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    /// Node type tag.
    pub node_type: NodeType,
    /// Node name.
    pub name: String,
    /// Node description, possibly empty.
    pub description: String,
    /// Number of child records that follow in pre-order.
    pub child_count: u32,
    /// Variant payload.
    pub payload: Payload,
}

impl NodeRecord {
    /// Borrow the record for encoding.
    #[must_use]
    pub fn as_ref(&self) -> RecordRef<'_> {
        RecordRef {
            node_type: self.node_type,
            name: &self.name,
            description: &self.description,
            child_count: self.child_count as usize,
            payload: &self.payload,
        }
    }
}

/// Borrowed view of a node record used by the encoder.
#[derive(Debug, Clone, Copy)]
pub struct RecordRef<'a> {
    /// Node type tag.
    pub node_type: NodeType,
    /// Node name.
    pub name: &'a str,
    /// Node description.
    pub description: &'a str,
    /// Number of children that will follow.
    pub child_count: usize,
    /// Variant payload.
    pub payload: &'a Payload,
}

/// Check a node name against the wire limits.
///
/// `.` separates path segments, so a name holding one could never be
/// addressed by a search path.
pub fn validate_name(name: &str) -> Result<(), CodecError> {
    if name.is_empty() || name.len() > MAX_NAME_LEN || name.contains(['\0', '.']) {
        return Err(CodecError::InvalidName);
    }
    Ok(())
}
