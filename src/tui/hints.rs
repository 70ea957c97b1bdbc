// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::session::{Mode, ToolboxCursor};

/// The footer key hints for the active mode.
pub(crate) fn footer_help_line(mode: &Mode) -> String {
    match mode {
        Mode::Workspace => {
            "1-9 select · arrows navigate · t toolbox · c connect · n note · / search · y copy labels · del delete · q quit"
                .to_owned()
        }
        Mode::Toolbox(ToolboxCursor::Categories { .. }) => {
            "arrows navigate · enter/→ open category · type to search · esc close".to_owned()
        }
        Mode::Toolbox(ToolboxCursor::Blocks { .. }) => {
            "arrows navigate · enter add block · ← back · type to search · esc back".to_owned()
        }
        Mode::Toolbox(ToolboxCursor::SearchResults { .. }) => {
            "type to refine · arrows navigate · enter add block · esc back".to_owned()
        }
        Mode::ConnectSource => {
            "tab next connection · enter confirm · esc cancel".to_owned()
        }
        Mode::ConnectTarget => {
            "1-9/arrows choose target block · esc cancel".to_owned()
        }
        Mode::NoteEdit(_) => {
            "type note · #word tags · ↑↓ suggestions · tab complete · enter save · esc cancel"
                .to_owned()
        }
        Mode::Search { .. } => "enter a reference like A2 · enter jump · esc cancel".to_owned(),
    }
}
