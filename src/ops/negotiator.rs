// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use crate::model::{BlockId, Workspace};

use super::{connect, connection_points, ConnectError, ConnectionPoint, ConnectionPoints};

/// Where the negotiation currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiatorState {
    Idle,
    SourceSelecting,
    TargetPending,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum State {
    #[default]
    Idle,
    SourceSelecting {
        source: BlockId,
        points: ConnectionPoints,
        index: usize,
    },
    TargetPending {
        source: BlockId,
        point: ConnectionPoint,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NegotiateError {
    UnknownBlock { block_id: BlockId },
    NoConnectionPoints { block_id: BlockId },
    NotSelecting,
    NotPending,
    Connect(ConnectError),
}

impl fmt::Display for NegotiateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownBlock { block_id } => write!(f, "block not found (id={block_id})"),
            Self::NoConnectionPoints { block_id } => {
                write!(f, "block {block_id} has no available connections")
            }
            Self::NotSelecting => f.write_str("no connection point is being selected"),
            Self::NotPending => f.write_str("no source connection has been confirmed"),
            Self::Connect(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for NegotiateError {}

impl From<ConnectError> for NegotiateError {
    fn from(err: ConnectError) -> Self {
        Self::Connect(err)
    }
}

/// The two-step connection flow: pick a source point, then pick a target
/// block.
///
/// Every exit path returns to `Idle`; the pending source point travels as
/// state, never as a swapped-out callback.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Negotiator {
    state: State,
}

impl Negotiator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> NegotiatorState {
        match self.state {
            State::Idle => NegotiatorState::Idle,
            State::SourceSelecting { .. } => NegotiatorState::SourceSelecting,
            State::TargetPending { .. } => NegotiatorState::TargetPending,
        }
    }

    /// The block the negotiation started from, while one is active.
    pub fn source(&self) -> Option<&BlockId> {
        match &self.state {
            State::Idle => None,
            State::SourceSelecting { source, .. } | State::TargetPending { source, .. } => {
                Some(source)
            }
        }
    }

    /// The connection point the cursor is on (or the confirmed one).
    pub fn selected_point(&self) -> Option<&ConnectionPoint> {
        match &self.state {
            State::Idle => None,
            State::SourceSelecting { points, index, .. } => points.get(*index),
            State::TargetPending { point, .. } => Some(point),
        }
    }

    /// Enters source selection on `block_id`. Fails back to idle when the
    /// block offers nothing to connect.
    pub fn begin(
        &mut self,
        workspace: &Workspace,
        block_id: &BlockId,
    ) -> Result<&ConnectionPoint, NegotiateError> {
        self.state = State::Idle;
        let block = workspace
            .block(block_id)
            .ok_or_else(|| NegotiateError::UnknownBlock {
                block_id: block_id.clone(),
            })?;
        let points = connection_points(block);
        if points.is_empty() {
            return Err(NegotiateError::NoConnectionPoints {
                block_id: block_id.clone(),
            });
        }
        self.state = State::SourceSelecting {
            source: block_id.clone(),
            points,
            index: 0,
        };
        self.selected_point().ok_or(NegotiateError::NotSelecting)
    }

    /// Advances the cursor circularly through the source's points.
    pub fn cycle(&mut self) -> Result<&ConnectionPoint, NegotiateError> {
        match &mut self.state {
            State::SourceSelecting { points, index, .. } => {
                *index = (*index + 1) % points.len();
            }
            _ => return Err(NegotiateError::NotSelecting),
        }
        self.selected_point().ok_or(NegotiateError::NotSelecting)
    }

    /// Locks in the cursor's point and waits for a target block.
    pub fn confirm(&mut self) -> Result<(), NegotiateError> {
        let state = std::mem::take(&mut self.state);
        match state {
            State::SourceSelecting {
                source,
                points,
                index,
            } => match points.get(index) {
                Some(point) => {
                    self.state = State::TargetPending {
                        source,
                        point: point.clone(),
                    };
                    Ok(())
                }
                None => Err(NegotiateError::NotSelecting),
            },
            other => {
                self.state = other;
                Err(NegotiateError::NotSelecting)
            }
        }
    }

    /// Attempts the connection against the chosen target block.
    ///
    /// The negotiator returns to idle whether or not the connection
    /// succeeds; the outcome only decides the status message.
    pub fn complete(
        &mut self,
        workspace: &mut Workspace,
        target_id: &BlockId,
    ) -> Result<ConnectionPoint, NegotiateError> {
        let state = std::mem::take(&mut self.state);
        match state {
            State::TargetPending { source, point } => {
                connect(workspace, &source, &point, target_id).map_err(NegotiateError::from)
            }
            other => {
                self.state = other;
                Err(NegotiateError::NotPending)
            }
        }
    }

    /// Abandons the negotiation without connecting.
    pub fn cancel(&mut self) {
        self.state = State::Idle;
    }
}
