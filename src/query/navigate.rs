// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use crate::model::{BlockId, Workspace};

/// A direction on the workspace surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Phrase for status messages ("no block found to the left").
    pub fn relation(&self) -> &'static str {
        match self {
            Self::Left => "to the left",
            Self::Right => "to the right",
            Self::Up => "above",
            Self::Down => "below",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        };
        f.write_str(label)
    }
}

/// The nearest block strictly on the given side of `current`.
///
/// Candidacy is decided by screen position alone, not chain membership;
/// distance is Manhattan. Ties keep the first candidate in ascending id
/// order, so repeated presses are deterministic.
pub fn navigate(
    workspace: &Workspace,
    current: &BlockId,
    direction: Direction,
) -> Option<BlockId> {
    let origin = workspace.block(current)?.position();

    let mut best: Option<(&BlockId, u64)> = None;
    for block in workspace.blocks() {
        if block.block_id() == current {
            continue;
        }
        let position = block.position();
        let on_side = match direction {
            Direction::Left => position.x < origin.x,
            Direction::Right => position.x > origin.x,
            Direction::Up => position.y < origin.y,
            Direction::Down => position.y > origin.y,
        };
        if !on_side {
            continue;
        }
        let distance = position.manhattan_distance(origin);
        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((block.block_id(), distance));
        }
    }

    best.map(|(block_id, _)| block_id.clone())
}

#[cfg(test)]
mod tests {
    use super::{navigate, Direction};
    use crate::model::fixtures::three_stacks;
    use crate::model::BlockId;

    fn bid(value: &str) -> BlockId {
        BlockId::new(value).expect("block id")
    }

    #[test]
    fn moves_to_the_nearest_block_on_the_requested_side() {
        let ws = three_stacks();
        // b1 sits at (250, 60); a1 at (50, 60), c1 at (450, 60).
        assert_eq!(navigate(&ws, &bid("b1"), Direction::Left), Some(bid("a1")));
        assert_eq!(navigate(&ws, &bid("b1"), Direction::Right), Some(bid("c1")));
    }

    #[test]
    fn strictly_directional_filtering_returns_none_at_the_edge() {
        let ws = three_stacks();
        assert_eq!(navigate(&ws, &bid("a1"), Direction::Left), None);
        assert_eq!(navigate(&ws, &bid("a1"), Direction::Up), None);
    }

    #[test]
    fn down_walks_the_chain_by_geometry() {
        let ws = three_stacks();
        // Chain members are placed below their predecessor when attached.
        assert_eq!(navigate(&ws, &bid("c1"), Direction::Down), Some(bid("c2")));
        assert_eq!(navigate(&ws, &bid("c2"), Direction::Down), Some(bid("c3")));
        assert_eq!(navigate(&ws, &bid("c2"), Direction::Up), Some(bid("c1")));
    }

    #[test]
    fn unknown_current_block_finds_nothing() {
        let ws = three_stacks();
        assert_eq!(navigate(&ws, &bid("ghost"), Direction::Left), None);
    }
}
