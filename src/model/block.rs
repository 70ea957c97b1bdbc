// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use smol_str::SmolStr;

use super::ids::BlockId;

/// A position in workspace coordinates (pixels in the host editor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct WorkspacePoint {
    pub x: i32,
    pub y: i32,
}

impl WorkspacePoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance, the metric used for directional navigation.
    pub fn manhattan_distance(self, other: Self) -> u64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx.unsigned_abs() + dy.unsigned_abs()
    }
}

impl fmt::Display for WorkspacePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// How an input slot accepts a child block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// Accepts a value-producing block via its output connection.
    Value,
    /// Accepts a statement chain via the chain head's previous connection.
    Statement,
}

/// A named input slot declared by a block's shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputSlot {
    name: SmolStr,
    kind: SlotKind,
    check: Option<SmolStr>,
}

impl InputSlot {
    pub fn new(name: impl Into<SmolStr>, kind: SlotKind) -> Self {
        Self {
            name: name.into(),
            kind,
            check: None,
        }
    }

    pub fn with_check(mut self, check: impl Into<SmolStr>) -> Self {
        self.check = Some(check.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    /// Type tag a connecting block must carry, if the slot is restricted.
    pub fn check(&self) -> Option<&str> {
        self.check.as_deref()
    }
}

/// The static connection surface of a block kind.
///
/// Shapes come from the catalog and never change after instantiation; link
/// state lives on [`Block`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockShape {
    has_previous: bool,
    has_next: bool,
    has_output: bool,
    output_check: Option<SmolStr>,
    inputs: Vec<InputSlot>,
}

impl BlockShape {
    /// A statement block: sits in a chain via previous/next connections.
    pub fn statement() -> Self {
        Self {
            has_previous: true,
            has_next: true,
            ..Self::default()
        }
    }

    /// A value block: plugs into value inputs via its output connection.
    pub fn value() -> Self {
        Self {
            has_output: true,
            ..Self::default()
        }
    }

    pub fn with_output_check(mut self, check: impl Into<SmolStr>) -> Self {
        self.output_check = Some(check.into());
        self
    }

    pub fn with_input(mut self, input: InputSlot) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn has_previous(&self) -> bool {
        self.has_previous
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn has_output(&self) -> bool {
        self.has_output
    }

    pub fn output_check(&self) -> Option<&str> {
        self.output_check.as_deref()
    }

    pub fn inputs(&self) -> &[InputSlot] {
        &self.inputs
    }

    pub fn input(&self, name: &str) -> Option<&InputSlot> {
        self.inputs.iter().find(|slot| slot.name() == name)
    }
}

/// How a block is attached to its parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Attachment {
    /// Successor in the parent's next chain.
    Next,
    /// Plugged into the named value input.
    ValueInput(SmolStr),
    /// Head of the chain nested under the named statement input.
    StatementInput(SmolStr),
}

impl Attachment {
    /// Whether the attachment keeps the block in the main numbered sequence.
    pub fn is_chain_successor(&self) -> bool {
        matches!(self, Self::Next)
    }
}

/// The link from a block to the block that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentLink {
    parent_id: BlockId,
    attachment: Attachment,
}

impl ParentLink {
    pub fn new(parent_id: BlockId, attachment: Attachment) -> Self {
        Self {
            parent_id,
            attachment,
        }
    }

    pub fn parent_id(&self) -> &BlockId {
        &self.parent_id
    }

    pub fn attachment(&self) -> &Attachment {
        &self.attachment
    }
}

/// A single block mirrored from the host editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    block_id: BlockId,
    kind: SmolStr,
    shape: BlockShape,
    position: WorkspacePoint,
    fields: BTreeMap<SmolStr, String>,
    note: Option<String>,
    tag: Option<String>,
    parent: Option<ParentLink>,
    next: Option<BlockId>,
    input_children: BTreeMap<SmolStr, BlockId>,
}

impl Block {
    pub fn new(
        block_id: BlockId,
        kind: impl Into<SmolStr>,
        shape: BlockShape,
        position: WorkspacePoint,
    ) -> Self {
        Self {
            block_id,
            kind: kind.into(),
            shape,
            position,
            fields: BTreeMap::new(),
            note: None,
            tag: None,
            parent: None,
            next: None,
            input_children: BTreeMap::new(),
        }
    }

    pub fn block_id(&self) -> &BlockId {
        &self.block_id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn shape(&self) -> &BlockShape {
        &self.shape
    }

    pub fn position(&self) -> WorkspacePoint {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: WorkspacePoint) {
        self.position = position;
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<SmolStr, String> {
        &self.fields
    }

    pub(crate) fn set_field(&mut self, name: impl Into<SmolStr>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub(crate) fn set_note(&mut self, note: Option<String>) {
        self.note = note;
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub(crate) fn set_tag(&mut self, tag: Option<String>) {
        self.tag = tag;
    }

    pub fn parent(&self) -> Option<&ParentLink> {
        self.parent.as_ref()
    }

    pub(crate) fn set_parent(&mut self, parent: Option<ParentLink>) {
        self.parent = parent;
    }

    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    /// An independent chain root: owned by nobody, so neither its previous
    /// nor its output connection is in use.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Connected into a parent as something other than a chain successor.
    pub fn is_connected_as_value_or_statement(&self) -> bool {
        self.parent
            .as_ref()
            .is_some_and(|link| !link.attachment().is_chain_successor())
    }

    pub fn next(&self) -> Option<&BlockId> {
        self.next.as_ref()
    }

    pub(crate) fn set_next(&mut self, next: Option<BlockId>) {
        self.next = next;
    }

    pub fn input_child(&self, slot: &str) -> Option<&BlockId> {
        self.input_children.get(slot)
    }

    pub fn input_children(&self) -> &BTreeMap<SmolStr, BlockId> {
        &self.input_children
    }

    pub(crate) fn set_input_child(&mut self, slot: impl Into<SmolStr>, child: Option<BlockId>) {
        let slot = slot.into();
        match child {
            Some(child) => {
                self.input_children.insert(slot, child);
            }
            None => {
                self.input_children.remove(&slot);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Attachment, Block, BlockShape, InputSlot, ParentLink, SlotKind, WorkspacePoint};
    use crate::model::BlockId;

    fn bid(value: &str) -> BlockId {
        BlockId::new(value).expect("block id")
    }

    #[test]
    fn manhattan_distance_does_not_overflow_on_extreme_coordinates() {
        let a = WorkspacePoint::new(i32::MIN, i32::MIN);
        let b = WorkspacePoint::new(i32::MAX, i32::MAX);
        assert_eq!(a.manhattan_distance(b), 2 * (u64::from(u32::MAX)));
    }

    #[test]
    fn statement_shape_has_chain_connections_only() {
        let shape = BlockShape::statement();
        assert!(shape.has_previous());
        assert!(shape.has_next());
        assert!(!shape.has_output());
        assert!(shape.inputs().is_empty());
    }

    #[test]
    fn value_child_is_not_a_chain_successor() {
        let mut block = Block::new(
            bid("b1"),
            "math_number",
            BlockShape::value(),
            WorkspacePoint::default(),
        );
        assert!(block.is_root());

        block.set_parent(Some(ParentLink::new(
            bid("b0"),
            Attachment::ValueInput("IF0".into()),
        )));
        assert!(!block.is_root());
        assert!(block.is_connected_as_value_or_statement());
    }

    #[test]
    fn shape_finds_inputs_by_name() {
        let shape = BlockShape::statement()
            .with_input(InputSlot::new("IF0", SlotKind::Value).with_check("Boolean"))
            .with_input(InputSlot::new("DO0", SlotKind::Statement));

        assert_eq!(shape.input("IF0").map(InputSlot::kind), Some(SlotKind::Value));
        assert_eq!(shape.input("IF0").and_then(InputSlot::check), Some("Boolean"));
        assert_eq!(shape.input("DO0").map(InputSlot::kind), Some(SlotKind::Statement));
        assert!(shape.input("ELSE").is_none());
    }
}
