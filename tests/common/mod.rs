// CLASSIFICATION: COMMUNITY
// Filename: common/mod.rs v0.1
// Date Modified: 2026-10-19
// Author: Lukas Bower

#![allow(dead_code)]

use vss_tree::{
    Datatype, ElementRef, EnumElement, MediaCollection, NodeHandle, NodeSpec, NodeType,
    PropertyDefinition, Tree, TreeBuilder, UniqueObject,
};

/// Reference tree shared by the integration tests.
///
/// ```text
/// Vehicle
/// ├─ Cabin
/// │  ├─ Door
/// │  │  ├─ IsOpen       sensor boolean
/// │  │  └─ Window       actuator uint8
/// │  └─ Temperature     sensor float
/// ├─ Speed              sensor uint16
/// ├─ Gear               actuator int8, enum P R N D
/// ├─ Media              element, media collection of two songs
/// └─ Trailer            rbranch
///    └─ Connected       attribute boolean
/// ```
pub fn vehicle() -> Tree {
    let mut builder = TreeBuilder::new(NodeSpec::branch("Vehicle", "High-level vehicle data.")).expect("root");
    let root = builder.root();
    let cabin = builder
        .add_child(root, NodeSpec::branch("Cabin", "All in-cabin components."))
        .expect("cabin");
    let door = builder
        .add_child(cabin, NodeSpec::branch("Door", "Driver door."))
        .expect("door");
    builder
        .add_child(door, NodeSpec::sensor("IsOpen", "Is door open.", Datatype::Boolean))
        .expect("is open");
    builder
        .add_child(
            door,
            NodeSpec::actuator("Window", "Window position.", Datatype::Uint8)
                .with_range(0, 100)
                .with_unit("percent"),
        )
        .expect("window");
    builder
        .add_child(
            cabin,
            NodeSpec::sensor("Temperature", "Cabin air temperature.", Datatype::Float)
                .with_range(-40, 85)
                .with_unit("celsius"),
        )
        .expect("temperature");
    builder
        .add_child(
            root,
            NodeSpec::sensor("Speed", "Vehicle speed.", Datatype::Uint16)
                .with_range(0, 250)
                .with_unit("km/h")
                .with_function("mps * 3.6"),
        )
        .expect("speed");
    let gears = ["P", "R", "N", "D"]
        .iter()
        .map(|gear| EnumElement::from_text(gear).expect("enum"))
        .collect();
    builder
        .add_child(
            root,
            NodeSpec::actuator("Gear", "Selected gear.", Datatype::Int8).with_enum(gears),
        )
        .expect("gear");
    let items = ["Song1", "Song2"]
        .iter()
        .map(|item| ElementRef::from_text(item).expect("ref"))
        .collect();
    builder
        .add_child(
            root,
            NodeSpec::element(
                "Media",
                "Media library.",
                UniqueObject::MediaCollection(MediaCollection { items }),
            ),
        )
        .expect("media");
    let properties = ["axle", "hitch"]
        .iter()
        .map(|property| PropertyDefinition::from_text(property).expect("property"))
        .collect();
    let trailer = builder
        .add_child(root, NodeSpec::rule_branch("Trailer", "Trailer data.", 8, properties))
        .expect("trailer");
    builder
        .add_child(
            trailer,
            NodeSpec::signal("Connected", "Trailer attached.", NodeType::Attribute, Some(Datatype::Boolean)),
        )
        .expect("connected");
    builder.build()
}

/// Chain `A -> B -> C`.
pub fn chain() -> Tree {
    let mut builder = TreeBuilder::new(NodeSpec::branch("A", "")).expect("root");
    let b = builder
        .add_child(builder.root(), NodeSpec::branch("B", ""))
        .expect("b");
    builder
        .add_child(b, NodeSpec::sensor("C", "", Datatype::Int32))
        .expect("c");
    builder.build()
}

/// Find a node by its full dotted path.
pub fn handle_of(tree: &Tree, path: &str) -> NodeHandle {
    let mut segments = path.split('.');
    let root = tree.root();
    let first = segments.next().expect("segment");
    assert_eq!(tree.node(root).expect("root").name(), first);
    segments.fold(root, |current, name| {
        let view = tree.node(current).expect("node");
        view.children()
            .find(|child| tree.node(*child).map(|c| c.name()) == Some(name))
            .unwrap_or_else(|| panic!("no child {name} under {}", view.name()))
    })
}
