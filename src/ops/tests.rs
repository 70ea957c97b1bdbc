// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{
    compatible, connect, connection_points, is_free, ConnectError, ConnectionPoint, NegotiateError,
    Negotiator, NegotiatorState,
};
use crate::model::{
    builtin_catalog, BlockId, BlockShape, SlotKind, Workspace, WorkspaceId, WorkspacePoint,
};

fn bid(value: &str) -> BlockId {
    BlockId::new(value).expect("block id")
}

fn workspace() -> Workspace {
    Workspace::new(WorkspaceId::new("w").expect("workspace id"))
}

fn create(ws: &mut Workspace, id: &str, kind: &str) -> BlockId {
    let catalog = builtin_catalog();
    let block_id = bid(id);
    ws.create_from_template(
        block_id.clone(),
        catalog.template(kind).expect("template"),
        WorkspacePoint::default(),
    )
    .expect("create");
    block_id
}

#[test]
fn connection_points_follow_the_fixed_cycle_order() {
    let mut ws = workspace();
    let cond = create(&mut ws, "cond", "controls_if");
    let points = connection_points(ws.block(&cond).expect("block"));

    let labels: Vec<String> = points.iter().map(ConnectionPoint::describe).collect();
    assert_eq!(
        labels,
        [
            "value input 'IF0'",
            "statement input 'DO0'",
            "previous",
            "next",
        ]
    );
}

#[test]
fn value_blocks_offer_their_output_after_inputs() {
    let mut ws = workspace();
    let compare = create(&mut ws, "cmp", "logic_compare");
    let points = connection_points(ws.block(&compare).expect("block"));
    assert_eq!(points.len(), 3);
    assert!(matches!(points[2], ConnectionPoint::Output { .. }));
}

#[test]
fn occupancy_tracks_link_state() {
    let mut ws = workspace();
    let a = create(&mut ws, "a", "text_print");
    let b = create(&mut ws, "b", "text_print");
    ws.attach_next(&a, &b).expect("attach");

    let a_block = ws.block(&a).expect("block");
    assert!(!is_free(a_block, &ConnectionPoint::Next));
    assert!(is_free(a_block, &ConnectionPoint::Previous));

    let b_block = ws.block(&b).expect("block");
    assert!(!is_free(b_block, &ConnectionPoint::Previous));
    assert!(is_free(b_block, &ConnectionPoint::Next));
}

#[test]
fn compatibility_respects_type_checks() {
    let boolean_output = ConnectionPoint::Output {
        check: Some("Boolean".into()),
    };
    let boolean_slot = ConnectionPoint::Input {
        slot: "IF0".into(),
        kind: SlotKind::Value,
        check: Some("Boolean".into()),
    };
    let number_slot = ConnectionPoint::Input {
        slot: "TIMES".into(),
        kind: SlotKind::Value,
        check: Some("Number".into()),
    };
    let open_slot = ConnectionPoint::Input {
        slot: "TEXT".into(),
        kind: SlotKind::Value,
        check: None,
    };

    assert!(compatible(&boolean_output, &boolean_slot));
    assert!(!compatible(&boolean_output, &number_slot));
    assert!(compatible(&boolean_output, &open_slot));
    assert!(compatible(&ConnectionPoint::Previous, &ConnectionPoint::Next));
    assert!(!compatible(&boolean_output, &ConnectionPoint::Previous));
}

#[test]
fn connect_plugs_a_value_block_into_the_first_matching_slot() {
    let mut ws = workspace();
    let cond = create(&mut ws, "cond", "controls_if");
    let flag = create(&mut ws, "flag", "logic_boolean");

    let output = ConnectionPoint::Output {
        check: Some("Boolean".into()),
    };
    let landed = connect(&mut ws, &flag, &output, &cond).expect("connect");
    assert_eq!(landed.describe(), "value input 'IF0'");
    assert_eq!(ws.block(&cond).expect("block").input_child("IF0"), Some(&flag));
}

#[test]
fn connect_appends_to_a_chain_via_previous() {
    let mut ws = workspace();
    let a = create(&mut ws, "a", "text_print");
    let b = create(&mut ws, "b", "text_print");

    let landed = connect(&mut ws, &b, &ConnectionPoint::Previous, &a).expect("connect");
    assert_eq!(landed, ConnectionPoint::Next);
    assert_eq!(ws.chain_from(&a), vec![a.clone(), b.clone()]);
}

#[test]
fn connect_skips_occupied_target_points() {
    let mut ws = workspace();
    let a = create(&mut ws, "a", "text_print");
    let b = create(&mut ws, "b", "text_print");
    let c = create(&mut ws, "c", "controls_if");
    ws.attach_next(&c, &a).expect("attach");

    // c's next is occupied by a; b's previous must land in c's statement
    // input instead.
    let landed = connect(&mut ws, &b, &ConnectionPoint::Previous, &c).expect("connect");
    assert_eq!(landed.describe(), "statement input 'DO0'");
}

#[test]
fn connect_reports_incompatible_targets() {
    let mut ws = workspace();
    let flag = create(&mut ws, "flag", "logic_boolean");
    let number = create(&mut ws, "num", "math_number");

    let output = ConnectionPoint::Output {
        check: Some("Boolean".into()),
    };
    let result = connect(&mut ws, &flag, &output, &number);
    assert_eq!(
        result,
        Err(ConnectError::NoCompatibleTarget { block_id: number })
    );
}

#[test]
fn connect_rejects_an_occupied_source_point() {
    let mut ws = workspace();
    let cond = create(&mut ws, "cond", "controls_if");
    let flag = create(&mut ws, "flag", "logic_boolean");
    ws.attach_input(&cond, "IF0", &flag).expect("attach");

    let other = create(&mut ws, "other", "controls_whileUntil");
    let output = ConnectionPoint::Output {
        check: Some("Boolean".into()),
    };
    let result = connect(&mut ws, &flag, &output, &other);
    assert!(matches!(result, Err(ConnectError::SourceOccupied { .. })));
}

#[test]
fn connect_rejects_self_connection() {
    let mut ws = workspace();
    let a = create(&mut ws, "a", "text_print");
    let result = connect(&mut ws, &a, &ConnectionPoint::Previous, &a);
    assert_eq!(result, Err(ConnectError::SelfConnection { block_id: a }));
}

#[test]
fn negotiator_walks_the_full_flow() {
    let mut ws = workspace();
    let a = create(&mut ws, "a", "text_print");
    let b = create(&mut ws, "b", "text_print");

    let mut negotiator = Negotiator::new();
    assert_eq!(negotiator.state(), NegotiatorState::Idle);

    let first = negotiator.begin(&ws, &b).expect("begin").clone();
    assert_eq!(negotiator.state(), NegotiatorState::SourceSelecting);
    // text_print: TEXT input, previous, next.
    assert_eq!(first.describe(), "value input 'TEXT'");

    let second = negotiator.cycle().expect("cycle").clone();
    assert_eq!(second, ConnectionPoint::Previous);

    negotiator.confirm().expect("confirm");
    assert_eq!(negotiator.state(), NegotiatorState::TargetPending);

    let landed = negotiator.complete(&mut ws, &a).expect("complete");
    assert_eq!(landed, ConnectionPoint::Next);
    assert_eq!(negotiator.state(), NegotiatorState::Idle);
    assert_eq!(ws.chain_from(&a), vec![a.clone(), b.clone()]);
}

#[test]
fn negotiator_cycle_wraps_around() {
    let mut ws = workspace();
    let b = create(&mut ws, "b", "text_print");

    let mut negotiator = Negotiator::new();
    let first = negotiator.begin(&ws, &b).expect("begin").clone();
    negotiator.cycle().expect("cycle");
    negotiator.cycle().expect("cycle");
    let wrapped = negotiator.cycle().expect("cycle").clone();
    assert_eq!(first, wrapped);
}

#[test]
fn negotiator_returns_to_idle_on_failure_and_cancel() {
    let mut ws = workspace();
    let flag = create(&mut ws, "flag", "logic_boolean");
    let number = create(&mut ws, "num", "math_number");

    let mut negotiator = Negotiator::new();
    negotiator.begin(&ws, &flag).expect("begin");
    negotiator.confirm().expect("confirm");
    let result = negotiator.complete(&mut ws, &number);
    assert!(matches!(result, Err(NegotiateError::Connect(_))));
    assert_eq!(negotiator.state(), NegotiatorState::Idle);

    negotiator.begin(&ws, &flag).expect("begin");
    negotiator.cancel();
    assert_eq!(negotiator.state(), NegotiatorState::Idle);
    assert_eq!(negotiator.selected_point(), None);
}

#[test]
fn negotiator_confirm_requires_selection() {
    let mut negotiator = Negotiator::new();
    assert_eq!(negotiator.confirm(), Err(NegotiateError::NotSelecting));
    assert_eq!(negotiator.cycle(), Err(NegotiateError::NotSelecting));
}
