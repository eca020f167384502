// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::ids::EmbeddingId;

/// Minimum fuzzy ratio for a document name to count as a match when no field contains the
/// filter text verbatim.
const FUZZY_MIN_RATIO: f64 = 0.6;

/// One entry of the server's embedding manifest (`/api/embeddings`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingInfo {
    pub id: EmbeddingId,
    pub document_name: String,
    pub model: String,
    pub chunk_size: u32,
}

impl EmbeddingInfo {
    /// Case-insensitive containment check against every user-visible field.
    pub fn matches_filter(&self, filter: &str) -> bool {
        let needle = filter.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        self.chunk_size.to_string().contains(&needle)
            || self.document_name.to_lowercase().contains(&needle)
            || self.model.to_lowercase().contains(&needle)
            || self.id.as_str().to_lowercase().contains(&needle)
    }

    pub fn label(&self) -> String {
        format!("{} ({}, chunk size {})", self.document_name, self.model, self.chunk_size)
    }
}

/// Indices of `options` that match `filter`, in display order.
///
/// Verbatim matches win. When nothing contains the filter text, document names are ranked by
/// fuzzy similarity instead so a typo still finds the document.
pub fn filter_options(options: &[EmbeddingInfo], filter: &str) -> Vec<usize> {
    let exact = options
        .iter()
        .enumerate()
        .filter(|(_, option)| option.matches_filter(filter))
        .map(|(idx, _)| idx)
        .collect::<Vec<_>>();
    if !exact.is_empty() || filter.trim().is_empty() {
        return exact;
    }

    let needle = filter.trim().to_lowercase();
    let mut scored = options
        .iter()
        .enumerate()
        .filter_map(|(idx, option)| {
            let haystack = option.document_name.to_lowercase();
            let ratio = rapidfuzz::fuzz::ratio(needle.chars(), haystack.chars());
            (ratio >= FUZZY_MIN_RATIO).then_some((idx, ratio))
        })
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    scored.into_iter().map(|(idx, _)| idx).collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{filter_options, EmbeddingInfo};
    use crate::model::EmbeddingId;

    fn info(id: &str, name: &str, model: &str, chunk_size: u32) -> EmbeddingInfo {
        EmbeddingInfo {
            id: EmbeddingId::new(id).expect("embedding id"),
            document_name: name.to_owned(),
            model: model.to_owned(),
            chunk_size,
        }
    }

    #[rstest]
    #[case("", true)]
    #[case("ANNUAL", true)]
    #[case("distilbert", true)]
    #[case("75", true)]
    #[case("e1f2", true)]
    #[case("invoice", false)]
    fn matches_any_visible_field(#[case] filter: &str, #[case] expected: bool) {
        let option = info("e1f2a3", "annual-report.pdf", "msmarco-distilbert-cos-v5", 75);
        assert_eq!(option.matches_filter(filter), expected);
    }

    #[test]
    fn fuzzy_fallback_finds_typos() {
        let options = vec![
            info("a", "annual-report.pdf", "m", 50),
            info("b", "thesis.pdf", "m", 50),
        ];
        assert_eq!(filter_options(&options, "thesis"), vec![1]);
        assert_eq!(filter_options(&options, "thesys.pdf"), vec![1]);
        assert!(filter_options(&options, "zzzzzzzz").is_empty());
    }

    #[test]
    fn manifest_entries_ignore_extra_fields() {
        let raw = r#"[{"id":"x1","document_name":"a.pdf","document_path":"/tmp/a.pdf",
            "embedding_name":"a_pdf","model":"msmarco-distilbert-cos-v5","chunk_size":50}]"#;
        let parsed: Vec<EmbeddingInfo> = serde_json::from_str(raw).expect("parse manifest");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].label(), "a.pdf (msmarco-distilbert-cos-v5, chunk size 50)");
    }
}
