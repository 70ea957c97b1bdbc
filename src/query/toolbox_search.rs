// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{BlockTemplate, Catalog};

/// Ranks catalog templates against a query string.
///
/// Scoring blends a rapidfuzz ratio with a substring bonus so exact
/// fragments beat loose matches; results come back best-first, ties broken
/// by label so the ordering is stable. An empty query returns the whole
/// catalog in palette order.
pub fn ranked_templates<'a>(catalog: &'a Catalog, query: &str) -> Vec<&'a BlockTemplate> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return catalog.iter_templates().collect();
    }

    let mut scored: Vec<(i64, &BlockTemplate)> = catalog
        .iter_templates()
        .filter_map(|template| {
            let label_score = match_score(&needle, &template.label().to_lowercase());
            let kind_score = match_score(&needle, &template.kind().to_lowercase());
            label_score
                .into_iter()
                .chain(kind_score)
                .max()
                .map(|score| (score, template))
        })
        .collect();

    scored.sort_by(|(score_a, template_a), (score_b, template_b)| {
        score_b
            .cmp(score_a)
            .then_with(|| template_a.label().cmp(template_b.label()))
    });
    scored.into_iter().map(|(_, template)| template).collect()
}

fn match_score(needle: &str, haystack: &str) -> Option<i64> {
    let ratio = rapidfuzz::fuzz::ratio(needle.chars(), haystack.chars());
    let mut score = (ratio * 1000.0).round() as i64;
    if haystack.contains(needle) {
        score += 2000;
    } else if ratio < 45.0 {
        return None;
    }
    Some(score)
}
