// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over the workspace: directional navigation, label
//! lookup, and toolbox search.

pub mod label_lookup;
pub mod navigate;
pub mod toolbox_search;

pub use label_lookup::{find_by_label, parse_label, LabelQuery};
pub use navigate::{navigate, Direction};
pub use toolbox_search::ranked_templates;
