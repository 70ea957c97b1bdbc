// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Stack naming and block numbering.
//!
//! The [`LabelStore`] mirrors labeling state for blocks owned by the host
//! workspace, keyed by id: stack names survive recomputation for as long as
//! their block stays an independent root, block numbers are rebuilt from
//! scratch on every pass.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::model::{Block, BlockId, Workspace};

pub mod names;

pub use names::{StackName, StackNameError};

/// Id-keyed labeling state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelStore {
    stack_names: BTreeMap<BlockId, StackName>,
    numbers: BTreeMap<BlockId, u32>,
    stack_counts: BTreeMap<BlockId, usize>,
}

impl LabelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stack_name(&self, block_id: &BlockId) -> Option<&StackName> {
        self.stack_names.get(block_id)
    }

    pub fn stack_names(&self) -> &BTreeMap<BlockId, StackName> {
        &self.stack_names
    }

    /// The cached 1-based chain position from the last relabel pass.
    pub fn number(&self, block_id: &BlockId) -> Option<u32> {
        self.numbers.get(block_id).copied()
    }

    /// Blocks in the stack rooted at `block_id`, nested members included.
    pub fn stack_count(&self, block_id: &BlockId) -> Option<usize> {
        self.stack_counts.get(block_id).copied()
    }

    /// Resolves a stack name back to its root block.
    pub fn root_for_name(&self, name: &StackName) -> Option<&BlockId> {
        self.stack_names
            .iter()
            .find_map(|(block_id, assigned)| (assigned == name).then_some(block_id))
    }

    pub fn snapshot(&self) -> LabelSnapshot {
        LabelSnapshot {
            stack_names: self
                .stack_names
                .iter()
                .map(|(block_id, name)| (block_id.to_string(), name.clone()))
                .collect(),
            numbers: self
                .numbers
                .iter()
                .map(|(block_id, number)| (block_id.to_string(), *number))
                .collect(),
            stack_counts: self
                .stack_counts
                .iter()
                .map(|(block_id, count)| (block_id.to_string(), *count))
                .collect(),
        }
    }
}

/// The maps exposed to a presentation layer, in serializable form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelSnapshot {
    pub stack_names: BTreeMap<String, StackName>,
    pub numbers: BTreeMap<String, u32>,
    pub stack_counts: BTreeMap<String, usize>,
}

/// What a relabel pass changed, for the shell to surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelabelOutcome {
    assigned: Vec<(BlockId, StackName)>,
    released: Vec<BlockId>,
    healed: Vec<(BlockId, StackName)>,
}

impl RelabelOutcome {
    /// Roots that received a name this pass.
    pub fn assigned(&self) -> &[(BlockId, StackName)] {
        &self.assigned
    }

    /// Blocks whose name was released (deleted or no longer a root).
    pub fn released(&self) -> &[BlockId] {
        &self.released
    }

    /// Names that went missing mid-pass and were restored. Always empty
    /// unless reconciliation itself is buggy; surfaced as a warning.
    pub fn healed(&self) -> &[(BlockId, StackName)] {
        &self.healed
    }

    pub fn is_noop(&self) -> bool {
        self.assigned.is_empty() && self.released.is_empty() && self.healed.is_empty()
    }
}

/// Whether a block is eligible to display its chain number.
///
/// Roots and next-chain successors show numbers; anything plugged into a
/// value or statement input does not, even though it still counts toward
/// the stack total.
pub fn should_show_number(workspace: &Workspace, block_id: &BlockId) -> bool {
    workspace
        .block(block_id)
        .is_some_and(|block| match block.parent() {
            None => true,
            Some(link) => link.attachment().is_chain_successor(),
        })
}

/// The `A2`-style display label for a block, when it is eligible for one.
///
/// Roots show their bare stack name; numbered chain members show name plus
/// position. Blocks outside the main sequence have no label.
pub fn display_label(
    workspace: &Workspace,
    store: &LabelStore,
    block_id: &BlockId,
) -> Option<String> {
    if let Some(name) = store.stack_name(block_id) {
        return Some(name.to_string());
    }
    if !should_show_number(workspace, block_id) {
        return None;
    }
    let number = store.number(block_id)?;

    let mut cursor = block_id.clone();
    let root = loop {
        match workspace.block(&cursor)?.parent() {
            None => break cursor,
            Some(link) => cursor = link.parent_id().clone(),
        }
    };
    let name = store.stack_name(&root)?;

    let mut label = name.to_string();
    let mut digits = itoa::Buffer::new();
    label.push_str(digits.format(number));
    Some(label)
}

/// Runs one full reconciliation pass: release stale names, name new roots,
/// renumber every chain, and recount every stack.
pub fn relabel(workspace: &Workspace, store: &mut LabelStore) -> RelabelOutcome {
    let before = store.stack_names.clone();
    let mut outcome = RelabelOutcome::default();

    let roots: Vec<&Block> = workspace.root_blocks().collect();
    let root_ids: BTreeSet<&BlockId> = roots.iter().map(|block| block.block_id()).collect();

    // Release names held by deleted or no-longer-root blocks.
    let stale: Vec<BlockId> = store
        .stack_names
        .keys()
        .filter(|block_id| !root_ids.contains(*block_id))
        .cloned()
        .collect();
    for block_id in stale {
        store.stack_names.remove(&block_id);
        outcome.released.push(block_id);
    }

    // Name new roots left to right, gap-filling from the start of the
    // sequence.
    let mut in_use: BTreeSet<StackName> = store.stack_names.values().cloned().collect();
    let mut unnamed: Vec<&Block> = roots
        .iter()
        .copied()
        .filter(|block| !store.stack_names.contains_key(block.block_id()))
        .collect();
    unnamed.sort_by_key(|block| block.position().x);

    let mut candidate = StackName::first();
    for block in unnamed {
        while in_use.contains(&candidate) {
            candidate = candidate.successor();
        }
        in_use.insert(candidate.clone());
        store
            .stack_names
            .insert(block.block_id().clone(), candidate.clone());
        outcome
            .assigned
            .push((block.block_id().clone(), candidate.clone()));
        candidate = candidate.successor();
    }

    // A surviving root must never lose its name across a pass. Restore and
    // report if it did; this indicates a reconciliation bug upstream.
    for (block_id, name) in before {
        if root_ids.contains(&block_id) && store.stack_names.get(&block_id) != Some(&name) {
            store.stack_names.insert(block_id.clone(), name.clone());
            outcome.healed.push((block_id, name));
        }
    }

    // Numbers and stack counts are derived state, rebuilt wholesale.
    store.numbers.clear();
    store.stack_counts.clear();
    for root in &roots {
        let chain = workspace.chain_from(root.block_id());
        for (index, block_id) in chain.into_iter().enumerate() {
            store.numbers.insert(block_id, index as u32 + 1);
        }
        store.stack_counts.insert(
            root.block_id().clone(),
            workspace.stack_blocks(root.block_id()).len(),
        );
    }

    outcome
}
