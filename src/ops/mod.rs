// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Keyboard-driven connection making.
//!
//! [`connection_points`] enumerates what a block offers, [`connect`] wires a
//! chosen source point to the first compatible free point on a target, and
//! [`Negotiator`] sequences the two-step keyboard flow.

use std::fmt;

use smallvec::SmallVec;
use smol_str::SmolStr;

use crate::model::{Block, BlockId, SlotKind, Workspace, WorkspaceError};

pub mod negotiator;

pub use negotiator::{NegotiateError, Negotiator, NegotiatorState};

/// A small inline list; blocks rarely offer more than a handful of points.
pub type ConnectionPoints = SmallVec<[ConnectionPoint; 4]>;

/// One connectable location on a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionPoint {
    Input {
        slot: SmolStr,
        kind: SlotKind,
        check: Option<SmolStr>,
    },
    Output {
        check: Option<SmolStr>,
    },
    Previous,
    Next,
}

impl ConnectionPoint {
    /// Short human label for status messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Input {
                slot,
                kind: SlotKind::Value,
                ..
            } => format!("value input '{slot}'"),
            Self::Input { slot, .. } => format!("statement input '{slot}'"),
            Self::Output { .. } => "output".to_owned(),
            Self::Previous => "previous".to_owned(),
            Self::Next => "next".to_owned(),
        }
    }
}

/// Every connection point a block's shape declares, in the fixed order the
/// keyboard cycles through: input slots first, then output, previous, next.
pub fn connection_points(block: &Block) -> ConnectionPoints {
    let mut points = ConnectionPoints::new();
    let shape = block.shape();
    for slot in shape.inputs() {
        points.push(ConnectionPoint::Input {
            slot: slot.name().into(),
            kind: slot.kind(),
            check: slot.check().map(SmolStr::new),
        });
    }
    if shape.has_output() {
        points.push(ConnectionPoint::Output {
            check: shape.output_check().map(SmolStr::new),
        });
    }
    if shape.has_previous() {
        points.push(ConnectionPoint::Previous);
    }
    if shape.has_next() {
        points.push(ConnectionPoint::Next);
    }
    points
}

/// Whether the point is currently unconnected on this block.
pub fn is_free(block: &Block, point: &ConnectionPoint) -> bool {
    match point {
        ConnectionPoint::Input { slot, .. } => block.input_child(slot).is_none(),
        ConnectionPoint::Output { .. } => !block.is_connected_as_value_or_statement(),
        ConnectionPoint::Previous => block.is_root(),
        ConnectionPoint::Next => block.next().is_none(),
    }
}

fn checks_agree(a: Option<&SmolStr>, b: Option<&SmolStr>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}

/// Type compatibility between a source point and a target point.
pub fn compatible(source: &ConnectionPoint, target: &ConnectionPoint) -> bool {
    match (source, target) {
        (
            ConnectionPoint::Output { check },
            ConnectionPoint::Input {
                kind: SlotKind::Value,
                check: slot_check,
                ..
            },
        )
        | (
            ConnectionPoint::Input {
                kind: SlotKind::Value,
                check: slot_check,
                ..
            },
            ConnectionPoint::Output { check },
        ) => checks_agree(check.as_ref(), slot_check.as_ref()),
        (ConnectionPoint::Previous, ConnectionPoint::Next)
        | (ConnectionPoint::Next, ConnectionPoint::Previous) => true,
        (
            ConnectionPoint::Previous,
            ConnectionPoint::Input {
                kind: SlotKind::Statement,
                ..
            },
        )
        | (
            ConnectionPoint::Input {
                kind: SlotKind::Statement,
                ..
            },
            ConnectionPoint::Previous,
        ) => true,
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectError {
    UnknownBlock { block_id: BlockId },
    SelfConnection { block_id: BlockId },
    SourceOccupied { point: String },
    NoCompatibleTarget { block_id: BlockId },
    Workspace(WorkspaceError),
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownBlock { block_id } => write!(f, "block not found (id={block_id})"),
            Self::SelfConnection { block_id } => {
                write!(f, "cannot connect block {block_id} to itself")
            }
            Self::SourceOccupied { point } => {
                write!(f, "source {point} is already connected")
            }
            Self::NoCompatibleTarget { block_id } => {
                write!(f, "no compatible connection on block {block_id}")
            }
            Self::Workspace(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ConnectError {}

impl From<WorkspaceError> for ConnectError {
    fn from(err: WorkspaceError) -> Self {
        Self::Workspace(err)
    }
}

/// Connects `source_point` on `source_id` to the first compatible free
/// point on `target_id`.
///
/// Target points are scanned in the same fixed order the keyboard cycles
/// through. Returns the target point that accepted the connection.
pub fn connect(
    workspace: &mut Workspace,
    source_id: &BlockId,
    source_point: &ConnectionPoint,
    target_id: &BlockId,
) -> Result<ConnectionPoint, ConnectError> {
    if source_id == target_id {
        return Err(ConnectError::SelfConnection {
            block_id: source_id.clone(),
        });
    }
    let source = workspace
        .block(source_id)
        .ok_or_else(|| ConnectError::UnknownBlock {
            block_id: source_id.clone(),
        })?;
    if !is_free(source, source_point) {
        return Err(ConnectError::SourceOccupied {
            point: source_point.describe(),
        });
    }
    let target = workspace
        .block(target_id)
        .ok_or_else(|| ConnectError::UnknownBlock {
            block_id: target_id.clone(),
        })?;

    let candidates: ConnectionPoints = connection_points(target)
        .into_iter()
        .filter(|point| is_free(target, point) && compatible(source_point, point))
        .collect();

    for target_point in candidates {
        let attached = match (source_point, &target_point) {
            (ConnectionPoint::Output { .. }, ConnectionPoint::Input { slot, .. }) => {
                workspace.attach_input(target_id, slot.as_str(), source_id)
            }
            (ConnectionPoint::Input { slot, .. }, ConnectionPoint::Output { .. }) => {
                workspace.attach_input(source_id, slot.as_str(), target_id)
            }
            (ConnectionPoint::Previous, ConnectionPoint::Next) => {
                workspace.attach_next(target_id, source_id)
            }
            (ConnectionPoint::Next, ConnectionPoint::Previous) => {
                workspace.attach_next(source_id, target_id)
            }
            (ConnectionPoint::Previous, ConnectionPoint::Input { slot, .. }) => {
                workspace.attach_input(target_id, slot.as_str(), source_id)
            }
            (ConnectionPoint::Input { slot, .. }, ConnectionPoint::Previous) => {
                workspace.attach_input(source_id, slot.as_str(), target_id)
            }
            _ => continue,
        };
        if attached.is_ok() {
            return Ok(target_point);
        }
    }

    Err(ConnectError::NoCompatibleTarget {
        block_id: target_id.clone(),
    })
}

#[cfg(test)]
mod tests;
