// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The in-memory block workspace.
//!
//! Blocks are kept in an id-keyed map; every structural mutation pushes a
//! [`WorkspaceEvent`] into a queue the session drains. The queue is the
//! subscription surface a hosting editor would otherwise provide.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use smol_str::SmolStr;

use super::block::{Attachment, Block, BlockShape, ParentLink, SlotKind, WorkspacePoint};
use super::catalog::BlockTemplate;
use super::ids::{BlockId, WorkspaceId};

/// Vertical distance between consecutive chain members.
pub const NEXT_OFFSET_Y: i32 = 40;
/// Horizontal inset of a block plugged into a value input.
pub const VALUE_INPUT_OFFSET_X: i32 = 160;
/// Inset of a chain nested under a statement input.
pub const STATEMENT_INPUT_OFFSET: WorkspacePoint = WorkspacePoint { x: 24, y: 20 };

/// A structural-change notification, in the host toolkit's event vocabulary.
///
/// Connections and disconnections surface as `Moved` (the moved block is the
/// one whose parent changed), matching how block editors report them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceEvent {
    Created { block_id: BlockId },
    Deleted { block_ids: Vec<BlockId> },
    Moved { block_id: BlockId },
    FieldChanged { block_id: BlockId, field: SmolStr },
    NoteChanged { block_id: BlockId },
}

impl WorkspaceEvent {
    /// Whether the event can change chain membership or ordering, and so
    /// must schedule a relabel pass.
    pub fn is_structural(&self) -> bool {
        !matches!(self, Self::NoteChanged { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceError {
    DuplicateBlock { block_id: BlockId },
    UnknownBlock { block_id: BlockId },
    UnknownSlot { block_id: BlockId, slot: SmolStr },
    SlotOccupied { block_id: BlockId, slot: SmolStr },
    NextOccupied { block_id: BlockId },
    AlreadyAttached { block_id: BlockId },
    MissingConnection { block_id: BlockId, expected: &'static str },
    WouldCycle { block_id: BlockId },
    NotAttached { block_id: BlockId },
}

impl fmt::Display for WorkspaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateBlock { block_id } => {
                write!(f, "block already exists (id={block_id})")
            }
            Self::UnknownBlock { block_id } => write!(f, "block not found (id={block_id})"),
            Self::UnknownSlot { block_id, slot } => {
                write!(f, "block {block_id} has no input slot '{slot}'")
            }
            Self::SlotOccupied { block_id, slot } => {
                write!(f, "input slot '{slot}' on block {block_id} is occupied")
            }
            Self::NextOccupied { block_id } => {
                write!(f, "next connection on block {block_id} is occupied")
            }
            Self::AlreadyAttached { block_id } => {
                write!(f, "block {block_id} is already attached to a parent")
            }
            Self::MissingConnection { block_id, expected } => {
                write!(f, "block {block_id} has no {expected} connection")
            }
            Self::WouldCycle { block_id } => {
                write!(f, "attaching block {block_id} would create a cycle")
            }
            Self::NotAttached { block_id } => {
                write!(f, "block {block_id} is not attached to a parent")
            }
        }
    }
}

impl std::error::Error for WorkspaceError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    workspace_id: WorkspaceId,
    blocks: BTreeMap<BlockId, Block>,
    events: VecDeque<WorkspaceEvent>,
}

impl Workspace {
    pub fn new(workspace_id: WorkspaceId) -> Self {
        Self {
            workspace_id,
            blocks: BTreeMap::new(),
            events: VecDeque::new(),
        }
    }

    pub fn workspace_id(&self) -> &WorkspaceId {
        &self.workspace_id
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn contains(&self, block_id: &BlockId) -> bool {
        self.blocks.contains_key(block_id)
    }

    pub fn block(&self, block_id: &BlockId) -> Option<&Block> {
        self.blocks.get(block_id)
    }

    /// All blocks in ascending id order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    /// Independent chain roots, in ascending id order.
    pub fn root_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values().filter(|block| block.is_root())
    }

    /// Drains the pending event queue.
    pub fn take_events(&mut self) -> Vec<WorkspaceEvent> {
        self.events.drain(..).collect()
    }

    fn push_event(&mut self, event: WorkspaceEvent) {
        self.events.push_back(event);
    }

    // ---- mutation -------------------------------------------------------

    pub fn create_block(
        &mut self,
        block_id: BlockId,
        kind: impl Into<SmolStr>,
        shape: BlockShape,
        position: WorkspacePoint,
    ) -> Result<(), WorkspaceError> {
        if self.blocks.contains_key(&block_id) {
            return Err(WorkspaceError::DuplicateBlock { block_id });
        }
        let block = Block::new(block_id.clone(), kind, shape, position);
        self.blocks.insert(block_id.clone(), block);
        self.push_event(WorkspaceEvent::Created { block_id });
        Ok(())
    }

    pub fn create_from_template(
        &mut self,
        block_id: BlockId,
        template: &BlockTemplate,
        position: WorkspacePoint,
    ) -> Result<(), WorkspaceError> {
        self.create_block(block_id, template.kind(), template.shape().clone(), position)
    }

    /// Deletes a block together with everything nested in its input slots.
    ///
    /// The next-chain below the block is detached first and survives as a
    /// new independent root. Returns the deleted ids.
    pub fn delete_block(&mut self, block_id: &BlockId) -> Result<Vec<BlockId>, WorkspaceError> {
        if !self.blocks.contains_key(block_id) {
            return Err(WorkspaceError::UnknownBlock {
                block_id: block_id.clone(),
            });
        }

        if let Some(successor) = self.blocks[block_id].next().cloned() {
            self.detach(&successor)?;
        }
        if self.blocks[block_id].has_parent() {
            self.detach(block_id)?;
        }

        let removed = self.collect_subtree(block_id);
        for id in &removed {
            self.blocks.remove(id);
        }
        self.push_event(WorkspaceEvent::Deleted {
            block_ids: removed.clone(),
        });
        Ok(removed)
    }

    /// Moves a root block (and its whole stack) to a new position.
    pub fn move_block(
        &mut self,
        block_id: &BlockId,
        position: WorkspacePoint,
    ) -> Result<(), WorkspaceError> {
        let block = self.blocks.get(block_id).ok_or_else(|| WorkspaceError::UnknownBlock {
            block_id: block_id.clone(),
        })?;
        if block.has_parent() {
            return Err(WorkspaceError::AlreadyAttached {
                block_id: block_id.clone(),
            });
        }
        let old = block.position();
        self.shift_subtree(block_id, position.x - old.x, position.y - old.y);
        self.push_event(WorkspaceEvent::Moved {
            block_id: block_id.clone(),
        });
        Ok(())
    }

    pub fn set_field(
        &mut self,
        block_id: &BlockId,
        field: impl Into<SmolStr>,
        value: impl Into<String>,
    ) -> Result<(), WorkspaceError> {
        let field = field.into();
        let block = self.blocks.get_mut(block_id).ok_or_else(|| WorkspaceError::UnknownBlock {
            block_id: block_id.clone(),
        })?;
        block.set_field(field.clone(), value);
        self.push_event(WorkspaceEvent::FieldChanged {
            block_id: block_id.clone(),
            field,
        });
        Ok(())
    }

    /// Sets or clears the free-text annotation and tag on a block.
    pub fn set_annotation(
        &mut self,
        block_id: &BlockId,
        note: Option<String>,
        tag: Option<String>,
    ) -> Result<(), WorkspaceError> {
        let block = self.blocks.get_mut(block_id).ok_or_else(|| WorkspaceError::UnknownBlock {
            block_id: block_id.clone(),
        })?;
        block.set_note(note);
        block.set_tag(tag);
        self.push_event(WorkspaceEvent::NoteChanged {
            block_id: block_id.clone(),
        });
        Ok(())
    }

    /// Attaches `child` as the next-chain successor of `parent`.
    pub fn attach_next(
        &mut self,
        parent_id: &BlockId,
        child_id: &BlockId,
    ) -> Result<(), WorkspaceError> {
        self.check_attachable(parent_id, child_id)?;

        let parent = &self.blocks[parent_id];
        if !parent.shape().has_next() {
            return Err(WorkspaceError::MissingConnection {
                block_id: parent_id.clone(),
                expected: "next",
            });
        }
        if parent.next().is_some() {
            return Err(WorkspaceError::NextOccupied {
                block_id: parent_id.clone(),
            });
        }
        if !self.blocks[child_id].shape().has_previous() {
            return Err(WorkspaceError::MissingConnection {
                block_id: child_id.clone(),
                expected: "previous",
            });
        }

        let anchor = self.blocks[parent_id].position();
        self.place_subtree(child_id, WorkspacePoint::new(anchor.x, anchor.y + NEXT_OFFSET_Y));

        if let Some(parent) = self.blocks.get_mut(parent_id) {
            parent.set_next(Some(child_id.clone()));
        }
        if let Some(child) = self.blocks.get_mut(child_id) {
            child.set_parent(Some(ParentLink::new(parent_id.clone(), Attachment::Next)));
        }

        self.push_event(WorkspaceEvent::Moved {
            block_id: child_id.clone(),
        });
        Ok(())
    }

    /// Attaches `child` into the named input slot of `parent`.
    pub fn attach_input(
        &mut self,
        parent_id: &BlockId,
        slot: &str,
        child_id: &BlockId,
    ) -> Result<(), WorkspaceError> {
        self.check_attachable(parent_id, child_id)?;

        let parent = &self.blocks[parent_id];
        let input = parent.shape().input(slot).ok_or_else(|| WorkspaceError::UnknownSlot {
            block_id: parent_id.clone(),
            slot: slot.into(),
        })?;
        if parent.input_child(slot).is_some() {
            return Err(WorkspaceError::SlotOccupied {
                block_id: parent_id.clone(),
                slot: slot.into(),
            });
        }

        let (attachment, expected) = match input.kind() {
            SlotKind::Value => (Attachment::ValueInput(slot.into()), "output"),
            SlotKind::Statement => (Attachment::StatementInput(slot.into()), "previous"),
        };
        let child_shape = self.blocks[child_id].shape();
        let satisfied = match input.kind() {
            SlotKind::Value => child_shape.has_output(),
            SlotKind::Statement => child_shape.has_previous(),
        };
        if !satisfied {
            return Err(WorkspaceError::MissingConnection {
                block_id: child_id.clone(),
                expected,
            });
        }

        let anchor = self.blocks[parent_id].position();
        let target = match input.kind() {
            SlotKind::Value => WorkspacePoint::new(anchor.x + VALUE_INPUT_OFFSET_X, anchor.y),
            SlotKind::Statement => WorkspacePoint::new(
                anchor.x + STATEMENT_INPUT_OFFSET.x,
                anchor.y + STATEMENT_INPUT_OFFSET.y,
            ),
        };
        self.place_subtree(child_id, target);

        if let Some(parent) = self.blocks.get_mut(parent_id) {
            parent.set_input_child(slot, Some(child_id.clone()));
        }
        if let Some(child) = self.blocks.get_mut(child_id) {
            child.set_parent(Some(ParentLink::new(parent_id.clone(), attachment)));
        }

        self.push_event(WorkspaceEvent::Moved {
            block_id: child_id.clone(),
        });
        Ok(())
    }

    /// Detaches a block from its parent; it becomes an independent root.
    pub fn detach(&mut self, block_id: &BlockId) -> Result<(), WorkspaceError> {
        let block = self.blocks.get(block_id).ok_or_else(|| WorkspaceError::UnknownBlock {
            block_id: block_id.clone(),
        })?;
        let Some(link) = block.parent().cloned() else {
            return Err(WorkspaceError::NotAttached {
                block_id: block_id.clone(),
            });
        };

        let parent_id = link.parent_id().clone();
        if let Some(parent) = self.blocks.get_mut(&parent_id) {
            match link.attachment() {
                Attachment::Next => parent.set_next(None),
                Attachment::ValueInput(slot) | Attachment::StatementInput(slot) => {
                    parent.set_input_child(slot.clone(), None);
                }
            }
        }
        if let Some(block) = self.blocks.get_mut(block_id) {
            block.set_parent(None);
        }

        self.push_event(WorkspaceEvent::Moved {
            block_id: block_id.clone(),
        });
        Ok(())
    }

    // ---- traversal ------------------------------------------------------

    /// The chain starting at `root`, following next-links only.
    pub fn chain_from(&self, root: &BlockId) -> Vec<BlockId> {
        let mut chain = Vec::new();
        let mut cursor = self.blocks.get(root).map(|block| block.block_id().clone());
        while let Some(block_id) = cursor {
            cursor = self
                .blocks
                .get(&block_id)
                .and_then(|block| block.next().cloned());
            chain.push(block_id);
        }
        chain
    }

    /// Every block in the stack rooted at `root`: the chain plus all nested
    /// blocks, chain-first within each member.
    pub fn stack_blocks(&self, root: &BlockId) -> Vec<BlockId> {
        let mut out = Vec::new();
        if self.blocks.contains_key(root) {
            self.collect_stack(root, &mut out);
        }
        out
    }

    fn collect_stack(&self, block_id: &BlockId, out: &mut Vec<BlockId>) {
        out.push(block_id.clone());
        let Some(block) = self.blocks.get(block_id) else {
            return;
        };
        if let Some(next) = block.next() {
            self.collect_stack(&next.clone(), out);
        }
        for child in block.input_children().values() {
            self.collect_stack(&child.clone(), out);
        }
    }

    /// The block and everything reachable through its input slots; the
    /// next-chain below the block itself is excluded (it is detached before
    /// deletion), but chains nested under statement inputs are included.
    fn collect_subtree(&self, block_id: &BlockId) -> Vec<BlockId> {
        let mut out = vec![block_id.clone()];
        if let Some(block) = self.blocks.get(block_id) {
            for child in block.input_children().values() {
                let mut nested = self.stack_blocks(child);
                out.append(&mut nested);
            }
        }
        out
    }

    fn check_attachable(
        &self,
        parent_id: &BlockId,
        child_id: &BlockId,
    ) -> Result<(), WorkspaceError> {
        if !self.blocks.contains_key(parent_id) {
            return Err(WorkspaceError::UnknownBlock {
                block_id: parent_id.clone(),
            });
        }
        let child = self.blocks.get(child_id).ok_or_else(|| WorkspaceError::UnknownBlock {
            block_id: child_id.clone(),
        })?;
        if child.has_parent() {
            return Err(WorkspaceError::AlreadyAttached {
                block_id: child_id.clone(),
            });
        }
        if self.stack_blocks(child_id).contains(parent_id) {
            return Err(WorkspaceError::WouldCycle {
                block_id: child_id.clone(),
            });
        }
        Ok(())
    }

    fn place_subtree(&mut self, block_id: &BlockId, target: WorkspacePoint) {
        let Some(block) = self.blocks.get(block_id) else {
            return;
        };
        let origin = block.position();
        self.shift_subtree(block_id, target.x - origin.x, target.y - origin.y);
    }

    fn shift_subtree(&mut self, block_id: &BlockId, dx: i32, dy: i32) {
        if dx == 0 && dy == 0 {
            return;
        }
        for member in self.stack_blocks(block_id) {
            if let Some(block) = self.blocks.get_mut(&member) {
                let old = block.position();
                block.set_position(WorkspacePoint::new(
                    old.x.saturating_add(dx),
                    old.y.saturating_add(dy),
                ));
            }
        }
    }
}
