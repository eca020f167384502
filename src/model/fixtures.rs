// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::embedding::EmbeddingInfo;
use super::geometry::ScaledRect;
use super::highlight::{Content, HighlightKind, Position, ResultHighlight};
use super::ids::{EmbeddingId, HighlightId};

const LETTER_WIDTH: f64 = 612.0;
const LETTER_HEIGHT: f64 = 792.0;

pub(crate) fn scaled(x1: f64, y1: f64, x2: f64, y2: f64, page_number: u32) -> ScaledRect {
    ScaledRect { x1, y1, x2, y2, width: LETTER_WIDTH, height: LETTER_HEIGHT, page_number }
}

fn hid(value: &str) -> HighlightId {
    HighlightId::new(value).expect("highlight id")
}

#[cfg(test)]
pub(crate) fn text_highlight(id: &str, similarity: f64, page_number: u32) -> ResultHighlight {
    let top = 72.0 + f64::from(page_number % 7) * 40.0;
    let rects = vec![
        scaled(72.0, top, 540.0, top + 12.0, page_number),
        scaled(72.0, top + 14.0, 320.0, top + 26.0, page_number),
    ];
    ResultHighlight {
        id: hid(id),
        kind: HighlightKind::Text,
        content: Content { text: Some(format!("passage {id}")), image: None },
        position: Position {
            bounding_rect: scaled(72.0, top, 540.0, top + 26.0, page_number),
            rects,
        },
        similarity,
    }
}

pub(crate) fn area_highlight(id: &str, similarity: f64, page_number: u32) -> ResultHighlight {
    ResultHighlight {
        id: hid(id),
        kind: HighlightKind::Area,
        content: Content { text: None, image: Some(String::new()) },
        position: Position {
            bounding_rect: scaled(100.0, 400.0, 400.0, 600.0, page_number),
            rects: Vec::new(),
        },
        similarity,
    }
}

pub(crate) fn demo_embedding() -> EmbeddingInfo {
    EmbeddingInfo {
        id: EmbeddingId::new("demo").expect("embedding id"),
        document_name: "field-guide-to-semantic-search.pdf".to_owned(),
        model: "msmarco-distilbert-cos-v5".to_owned(),
        chunk_size: 50,
    }
}

/// A ranked result set spread over three pages, as a query against the demo document returns it.
pub(crate) fn demo_highlights() -> Vec<ResultHighlight> {
    let passages: [(&str, u32, f64, &str); 12] = [
        ("d01", 1, 0.912, "Semantic search ranks passages by meaning rather than by shared keywords, so a question can match an answer that uses different words."),
        ("d02", 2, 0.874, "Each chunk of fifty words is embedded once when the document is indexed; queries are embedded on demand and compared by cosine similarity."),
        ("d03", 1, 0.803, "Only passages with a positive similarity are returned, ordered from the closest match to the weakest."),
        ("d04", 3, 0.771, "Highlights carry their page number and the rectangles of every line they cover."),
        ("d05", 2, 0.702, "Scrolling to a highlight is driven by the location fragment, which makes every result linkable."),
        ("d06", 3, 0.655, "Area highlights mark a rectangular region and keep a snapshot of what was inside it."),
        ("d07", 1, 0.618, "The result list shows the top ten matches by default; the cutoff can be raised or lowered and applied."),
        ("d08", 2, 0.560, "Selecting a different document clears all results before anything else happens."),
        ("d09", 3, 0.512, "Chunk size trades recall for precision: smaller chunks produce sharper but more numerous matches."),
        ("d10", 1, 0.447, "Models are cached after first use so repeated queries stay fast."),
        ("d11", 2, 0.391, "Embeddings live in a per-user data directory together with a manifest of indexed documents."),
        ("d12", 3, 0.304, "Queries with no positive match return an empty list rather than an error."),
    ];

    passages
        .iter()
        .enumerate()
        .map(|(rank, (id, page, similarity, text))| {
            if *id == "d06" {
                return area_highlight(id, *similarity, *page);
            }
            let top = 80.0 + (rank as f64 % 4.0) * 150.0;
            let rects = vec![
                scaled(72.0, top, 540.0, top + 14.0, *page),
                scaled(72.0, top + 16.0, 540.0, top + 30.0, *page),
                scaled(72.0, top + 32.0, 300.0, top + 46.0, *page),
            ];
            ResultHighlight {
                id: hid(id),
                kind: HighlightKind::Text,
                content: Content { text: Some((*text).to_owned()), image: None },
                position: Position {
                    bounding_rect: scaled(72.0, top, 540.0, top + 46.0, *page),
                    rects,
                },
                similarity: *similarity,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::demo_highlights;

    #[test]
    fn demo_highlights_are_rank_ordered_and_unique() {
        let highlights = demo_highlights();
        assert!(highlights.windows(2).all(|pair| pair[0].similarity >= pair[1].similarity));

        let mut ids = highlights.iter().map(|h| h.id.as_str()).collect::<Vec<_>>();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), highlights.len());
    }
}
