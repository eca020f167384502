// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Page geometry of the selected document, in PDF points.

use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::debug;

use crate::model::{PageSize, ResultHighlight};

/// US Letter, used for pages nothing else tells us about.
pub const FALLBACK_PAGE: PageSize = PageSize { width: 612.0, height: 792.0 };

/// Highlight page numbers past this are treated as bogus when no PDF layout is available.
pub const MAX_DERIVED_PAGES: u32 = 1_000;

/// `Parent` chains deeper than this are treated as broken.
const MAX_INHERITANCE_DEPTH: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("unreadable pdf: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("pdf has no pages")]
    NoPages,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pages: Vec<PageSize>,
}

impl DocumentLayout {
    /// Reads every page's `MediaBox`, following `Parent` inheritance.
    pub fn from_pdf(bytes: &[u8]) -> Result<Self, DocumentError> {
        let doc = Document::load_mem(bytes)?;
        let pages: Vec<PageSize> = doc
            .get_pages()
            .into_values()
            .map(|page_id| media_box(&doc, page_id).unwrap_or(FALLBACK_PAGE))
            .collect();
        if pages.is_empty() {
            return Err(DocumentError::NoPages);
        }
        debug!(pages = pages.len(), "read document layout");
        Ok(Self { pages })
    }

    /// Derives page sizes from the reference size each highlight was measured against. Pages
    /// without a highlight get [`FALLBACK_PAGE`]. Highlights beyond [`MAX_DERIVED_PAGES`] are
    /// left out.
    pub fn from_highlights(highlights: &[ResultHighlight]) -> Self {
        let (plausible, skipped): (Vec<u32>, Vec<u32>) = highlights
            .iter()
            .map(ResultHighlight::page_number)
            .partition(|page| *page <= MAX_DERIVED_PAGES);
        if !skipped.is_empty() {
            debug!(skipped = skipped.len(), "ignored highlights with implausible page numbers");
        }
        let count = plausible.into_iter().max().unwrap_or(1).max(1);
        let mut pages = vec![FALLBACK_PAGE; count as usize];
        for highlight in highlights {
            let rect = &highlight.position.bounding_rect;
            let Some(slot) = (rect.page_number as usize).checked_sub(1).and_then(|i| pages.get_mut(i))
            else {
                continue;
            };
            if rect.width > 0.0 && rect.height > 0.0 {
                *slot = rect.page_size();
            }
        }
        Self { pages }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Size of page `page_number` (1-based).
    pub fn page(&self, page_number: u32) -> Option<PageSize> {
        (page_number as usize).checked_sub(1).and_then(|idx| self.pages.get(idx)).copied()
    }

    pub fn pages(&self) -> &[PageSize] {
        &self.pages
    }
}

impl Default for DocumentLayout {
    fn default() -> Self {
        Self { pages: vec![FALLBACK_PAGE] }
    }
}

fn media_box(doc: &Document, page_id: ObjectId) -> Option<PageSize> {
    let mut dict = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_INHERITANCE_DEPTH {
        if let Some(size) = dict.get(b"MediaBox").ok().and_then(|obj| rect_size(doc, obj)) {
            return Some(size);
        }
        dict = parent(doc, dict)?;
    }
    None
}

fn parent<'a>(doc: &'a Document, dict: &Dictionary) -> Option<&'a Dictionary> {
    let parent_id = dict.get(b"Parent").ok()?.as_reference().ok()?;
    doc.get_dictionary(parent_id).ok()
}

fn rect_size(doc: &Document, obj: &Object) -> Option<PageSize> {
    let obj = match obj {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    let Object::Array(items) = obj else {
        return None;
    };
    let coords: Vec<f64> = items.iter().filter_map(number).collect();
    let [x0, y0, x1, y1] = coords[..] else {
        return None;
    };
    let size = PageSize::new((x1 - x0).abs(), (y1 - y0).abs());
    (size.width > 0.0 && size.height > 0.0).then_some(size)
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(value) => Some(*value as f64),
        Object::Real(value) => Some(f64::from(*value)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use lopdf::{dictionary, Document, Object};

    use super::{DocumentError, DocumentLayout, FALLBACK_PAGE, MAX_DERIVED_PAGES};
    use crate::model::fixtures::{area_highlight, text_highlight};
    use crate::model::PageSize;

    fn two_page_pdf() -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let first = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        let second = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![first.into(), second.into()],
            "Count" => 2,
            "MediaBox" => vec![0.into(), 0.into(), 842.into(), 595.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("save pdf");
        bytes
    }

    #[test]
    fn reads_media_boxes_with_inheritance() {
        let layout = DocumentLayout::from_pdf(&two_page_pdf()).expect("layout");
        assert_eq!(layout.page_count(), 2);
        assert_eq!(layout.page(1), Some(PageSize::new(595.0, 842.0)));
        assert_eq!(layout.page(2), Some(PageSize::new(842.0, 595.0)));
        assert_eq!(layout.page(0), None);
        assert_eq!(layout.page(3), None);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(DocumentLayout::from_pdf(b"not a pdf"), Err(DocumentError::Pdf(_))));
    }

    #[test]
    fn highlights_fill_in_known_pages() {
        let mut far = area_highlight("far", 0.2, 3);
        far.position.bounding_rect.width = 500.0;
        far.position.bounding_rect.height = 700.0;

        let layout = DocumentLayout::from_highlights(&[text_highlight("a", 0.9, 1), far]);
        assert_eq!(layout.page_count(), 3);
        assert_eq!(layout.page(1), Some(FALLBACK_PAGE));
        assert_eq!(layout.page(2), Some(FALLBACK_PAGE));
        assert_eq!(layout.page(3), Some(PageSize::new(500.0, 700.0)));
    }

    #[test]
    fn implausible_page_numbers_do_not_grow_the_layout() {
        let bogus = area_highlight("bogus", 0.9, 4_000_000_000);
        let near = area_highlight("near", 0.5, 2);
        let layout = DocumentLayout::from_highlights(&[bogus, near]);
        assert_eq!(layout.page_count(), 2);
        assert_eq!(layout.page(4_000_000_000), None);

        let edge = area_highlight("edge", 0.5, MAX_DERIVED_PAGES);
        assert_eq!(DocumentLayout::from_highlights(&[edge]).page_count(), 1_000);
    }

    #[test]
    fn empty_highlights_yield_one_page() {
        assert_eq!(DocumentLayout::from_highlights(&[]), DocumentLayout::default());
    }
}
