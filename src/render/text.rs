// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{HighlightKind, ResultHighlight};

/// Maximum excerpt length in the result list, before trimming.
pub const EXCERPT_CHARS: usize = 90;

pub const NO_RESULTS: &str = "No Results Found";

/// First [`EXCERPT_CHARS`] characters of the passage, trimmed, always followed by `…`.
///
/// Areas carry no text; they are listed by kind.
pub fn excerpt(highlight: &ResultHighlight) -> String {
    match (highlight.kind, highlight.content.text.as_deref()) {
        (HighlightKind::Text, Some(text)) => {
            let head: String = text.chars().take(EXCERPT_CHARS).collect();
            format!("{}…", head.trim())
        }
        (HighlightKind::Text, None) => "…".to_owned(),
        (HighlightKind::Area, _) => "[area]".to_owned(),
    }
}

pub fn page_label(highlight: &ResultHighlight) -> String {
    format!("Page {}", highlight.page_number())
}

/// One result-list entry as printed in headless mode: excerpt, page, similarity.
pub fn result_line(rank: usize, highlight: &ResultHighlight) -> String {
    format!(
        "{:>3}. {}  ({}, {})",
        rank + 1,
        excerpt(highlight),
        page_label(highlight),
        highlight.similarity_label()
    )
}

/// All lines of a result list; a single [`NO_RESULTS`] line when there is nothing to show.
pub fn result_lines(highlights: &[ResultHighlight]) -> Vec<String> {
    if highlights.is_empty() {
        return vec![NO_RESULTS.to_owned()];
    }
    highlights.iter().enumerate().map(|(rank, h)| result_line(rank, h)).collect()
}
