// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Triton — keyboard navigation and stack labeling for block editors.
//!
//! Stacks of blocks get stable letter names (`A`, `B`, ..) and per-chain
//! numbers (`A1`, `A2`, ..); everything is reachable from the keyboard:
//! directional navigation, `A2`-style lookup, a toolbox, note/tag editing
//! and two-step connection making.

pub mod label;
pub mod model;
pub mod ops;
pub mod query;
pub mod render;
pub mod session;
pub mod tui;
