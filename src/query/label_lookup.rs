// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use regex::Regex;

use crate::label::{LabelStore, StackName};
use crate::model::{BlockId, Workspace};

/// A parsed `A2`-style label reference: stack name plus 1-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelQuery {
    name: StackName,
    number: u32,
}

impl LabelQuery {
    pub fn new(name: StackName, number: u32) -> Self {
        Self { name, number }
    }

    pub fn name(&self) -> &StackName {
        &self.name
    }

    pub fn number(&self) -> u32 {
        self.number
    }
}

/// Parses user input like `A2` or `b13` (case-insensitive, surrounding
/// whitespace ignored). Returns `None` for anything else.
pub fn parse_label(input: &str) -> Option<LabelQuery> {
    let normalized = input.trim().to_ascii_uppercase();
    let pattern = Regex::new(r"^([A-Z]+)([0-9]+)$").ok()?;
    let captures = pattern.captures(&normalized)?;

    let name = StackName::parse(captures.get(1)?.as_str()).ok()?;
    let number: u32 = captures.get(2)?.as_str().parse().ok()?;
    Some(LabelQuery::new(name, number))
}

/// Resolves a label reference to the block it names.
///
/// `None` when the stack name is unassigned or the number falls outside
/// `1..=chain_length`. Nested blocks are unreachable by design; the query
/// walks next-links only.
pub fn find_by_label(
    workspace: &Workspace,
    store: &LabelStore,
    query: &LabelQuery,
) -> Option<BlockId> {
    let root = store.root_for_name(query.name())?;
    let chain = workspace.chain_from(root);
    let index = usize::try_from(query.number().checked_sub(1)?).ok()?;
    chain.into_iter().nth(index)
}

#[cfg(test)]
mod tests {
    use super::{find_by_label, parse_label, LabelQuery};
    use crate::label::{relabel, LabelStore, StackName};
    use crate::model::fixtures::three_stacks;
    use crate::model::BlockId;

    fn bid(value: &str) -> BlockId {
        BlockId::new(value).expect("block id")
    }

    fn labeled_fixture() -> (crate::model::Workspace, LabelStore) {
        let ws = three_stacks();
        let mut store = LabelStore::new();
        relabel(&ws, &mut store);
        (ws, store)
    }

    #[test]
    fn parses_case_insensitively_and_trims() {
        let query = parse_label(" c12 ").expect("query");
        assert_eq!(query.name(), &StackName::parse("C").expect("name"));
        assert_eq!(query.number(), 12);
    }

    #[test]
    fn rejects_malformed_references() {
        assert_eq!(parse_label(""), None);
        assert_eq!(parse_label("A"), None);
        assert_eq!(parse_label("7"), None);
        assert_eq!(parse_label("A2B"), None);
        assert_eq!(parse_label("A 2"), None);
    }

    #[test]
    fn finds_the_nth_block_of_a_chain() {
        let (ws, store) = labeled_fixture();
        let query = parse_label("C2").expect("query");
        assert_eq!(find_by_label(&ws, &store, &query), Some(bid("c2")));
    }

    #[test]
    fn zero_and_out_of_range_numbers_find_nothing() {
        let (ws, store) = labeled_fixture();
        let zero = LabelQuery::new(StackName::parse("B").expect("name"), 0);
        assert_eq!(find_by_label(&ws, &store, &zero), None);

        let past_end = parse_label("B2").expect("query");
        assert_eq!(find_by_label(&ws, &store, &past_end), None);
    }

    #[test]
    fn unknown_stack_names_find_nothing() {
        let (ws, store) = labeled_fixture();
        let query = parse_label("Z1").expect("query");
        assert_eq!(find_by_label(&ws, &store, &query), None);
    }
}
