// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use triton::model::{BlockId, BlockShape, Workspace, WorkspaceId, WorkspacePoint};

pub fn block_id(value: &str) -> BlockId {
    BlockId::new(value).expect("block id")
}

/// `stacks` chains of `chain_len` statement blocks each, laid out on a grid.
pub fn grid_workspace(stacks: usize, chain_len: usize) -> Workspace {
    let mut ws = Workspace::new(WorkspaceId::new("bench").expect("workspace id"));

    for stack in 0..stacks {
        let mut previous: Option<BlockId> = None;
        for position in 0..chain_len {
            let id = block_id(&format!("s{stack:04}_b{position:04}"));
            ws.create_block(
                id.clone(),
                "text_print",
                BlockShape::statement(),
                WorkspacePoint::new(stack as i32 * 200, position as i32 * 40),
            )
            .expect("create block");
            if let Some(previous) = previous {
                ws.attach_next(&previous, &id).expect("attach");
            }
            previous = Some(id);
        }
    }

    ws.take_events();
    ws
}
