// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pure text rendering of the workspace canvas.
//!
//! Workspace coordinates are scaled down to terminal cells and each block
//! becomes a bracketed token carrying its display label. The TUI wraps the
//! returned lines; tests assert on them directly.

use crate::label::{display_label, LabelStore};
use crate::model::{Block, BlockId, Workspace};

/// Horizontal pixels per terminal column.
const X_SCALE: i32 = 8;
/// Vertical pixels per terminal row.
const Y_SCALE: i32 = 20;

/// Renders every block as a positioned token, top to bottom.
///
/// Root blocks get a stack header (`A · 3 blocks`) on the row above their
/// token. The selected block is marked with `>`.
pub fn render_workspace(
    workspace: &Workspace,
    store: &LabelStore,
    selected: Option<&BlockId>,
) -> Vec<String> {
    let mut canvas = Canvas::default();

    for block in workspace.blocks() {
        let position = block.position();
        let col = (position.x.max(0) / X_SCALE) as usize;
        let row = (position.y.max(0) / Y_SCALE) as usize;

        if block.is_root() {
            if let (Some(name), Some(count)) = (
                store.stack_name(block.block_id()),
                store.stack_count(block.block_id()),
            ) {
                let plural = if count == 1 { "block" } else { "blocks" };
                canvas.put(row.saturating_sub(1), col, &format!("{name} · {count} {plural}"));
            }
        }

        let token = block_token(workspace, store, block, selected);
        canvas.put(row, col, &token);
    }

    canvas.into_lines()
}

fn block_token(
    workspace: &Workspace,
    store: &LabelStore,
    block: &Block,
    selected: Option<&BlockId>,
) -> String {
    let mut inner = String::new();
    if selected == Some(block.block_id()) {
        inner.push_str("> ");
    }
    if let Some(label) = display_label(workspace, store, block.block_id()) {
        inner.push_str(&label);
        inner.push(' ');
    }
    inner.push_str(block.kind());
    if block.tag().is_some() {
        inner.push_str(" #");
    }

    if block.shape().has_output() {
        format!("({inner})")
    } else {
        format!("[{inner}]")
    }
}

#[derive(Debug, Default)]
struct Canvas {
    rows: Vec<Vec<char>>,
}

impl Canvas {
    fn put(&mut self, row: usize, col: usize, text: &str) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let line = &mut self.rows[row];
        let end = col + text.chars().count();
        if line.len() < end {
            line.resize(end, ' ');
        }
        for (offset, c) in text.chars().enumerate() {
            line[col + offset] = c;
        }
    }

    fn into_lines(self) -> Vec<String> {
        self.rows
            .into_iter()
            .map(|row| row.into_iter().collect::<String>().trim_end().to_owned())
            .collect()
    }
}
