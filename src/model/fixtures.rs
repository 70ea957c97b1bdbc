// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::catalog::builtin_catalog;
use super::ids::{BlockId, WorkspaceId};
use super::workspace::Workspace;
use super::WorkspacePoint;

fn bid(value: &str) -> BlockId {
    BlockId::new(value).expect("block id")
}

fn create(ws: &mut Workspace, id: &str, kind: &str, x: i32, y: i32) -> BlockId {
    let catalog = builtin_catalog();
    let template = catalog.template(kind).expect("catalog kind");
    let block_id = bid(id);
    ws.create_from_template(block_id.clone(), template, WorkspacePoint::new(x, y))
        .expect("create block");
    block_id
}

/// Three independent chains of lengths 2, 1 and 3, laid out left to right.
pub(crate) fn three_stacks() -> Workspace {
    let mut ws = Workspace::new(WorkspaceId::new("fixture").expect("workspace id"));

    let a1 = create(&mut ws, "a1", "text_print", 50, 60);
    let a2 = create(&mut ws, "a2", "text_print", 50, 300);
    ws.attach_next(&a1, &a2).expect("attach");

    create(&mut ws, "b1", "controls_repeat_ext", 250, 60);

    let c1 = create(&mut ws, "c1", "text_print", 450, 60);
    let c2 = create(&mut ws, "c2", "text_print", 450, 300);
    let c3 = create(&mut ws, "c3", "text_print", 450, 340);
    ws.attach_next(&c1, &c2).expect("attach");
    ws.attach_next(&c2, &c3).expect("attach");

    ws.take_events();
    ws
}

/// One stack exercising every attachment kind: an if-block with a boolean
/// condition, a nested print under its statement input, and a chained tail.
#[cfg(test)]
pub(crate) fn nested_condition() -> Workspace {
    let mut ws = Workspace::new(WorkspaceId::new("fixture").expect("workspace id"));

    let cond = create(&mut ws, "cond", "controls_if", 100, 100);
    let check = create(&mut ws, "check", "logic_boolean", 600, 600);
    let body = create(&mut ws, "body", "text_print", 700, 700);
    let tail = create(&mut ws, "tail", "text_print", 800, 800);

    ws.attach_input(&cond, "IF0", &check).expect("attach");
    ws.attach_input(&cond, "DO0", &body).expect("attach");
    ws.attach_next(&cond, &tail).expect("attach");

    ws.take_events();
    ws
}
