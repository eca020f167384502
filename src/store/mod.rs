// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The canonical ranked result set.
//!
//! `ResultStore` is the single source of truth for what a query returned and how much of it is
//! visible. It is owned by [`crate::ui::ViewerState`] and lent to the components that read or
//! mutate it. All mutation goes through [`ResultStore::replace_all`], [`ResultStore::reset`],
//! [`ResultStore::patch_by_id`], plus the crate-internal cutoff and document setters.
//!
//! Invariant: `0 <= rowcount <= highlights.len()` after every operation.

use tracing::{debug, trace};

use crate::model::{EmbeddingId, HighlightPatch, ResultHighlight};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultStore {
    highlights: Vec<ResultHighlight>,
    rowcount: usize,
    embedding_id: Option<EmbeddingId>,
    rev: u64,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All highlights in rank order.
    pub fn highlights(&self) -> &[ResultHighlight] {
        &self.highlights
    }

    pub fn len(&self) -> usize {
        self.highlights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty()
    }

    pub fn rowcount(&self) -> usize {
        self.rowcount
    }

    /// The rendered prefix: `highlights[..rowcount]`.
    pub fn working_set(&self) -> &[ResultHighlight] {
        &self.highlights[..self.rowcount]
    }

    pub fn embedding_id(&self) -> Option<&EmbeddingId> {
        self.embedding_id.as_ref()
    }

    /// Bumped by every mutation; views compare it to skip redundant recomputation.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    /// Swaps in a new ranked list. The cutoff is left to the caller, except that it is lowered
    /// when it would otherwise point past the end of the new list.
    pub fn replace_all(&mut self, highlights: Vec<ResultHighlight>) {
        debug!(count = highlights.len(), "replacing result highlights");
        self.highlights = highlights;
        self.rowcount = self.rowcount.min(self.highlights.len());
        self.bump();
    }

    pub fn reset(&mut self) {
        if !self.highlights.is_empty() || self.rowcount != 0 {
            debug!("resetting result highlights");
        }
        self.highlights.clear();
        self.rowcount = 0;
        self.bump();
    }

    /// Merges `patch` into the highlight with `id`.
    ///
    /// A missing id is not an error: the store may have been reset between the moment a view
    /// started an edit and the moment it finished. Returns whether anything was patched; an
    /// empty patch patches nothing.
    pub fn patch_by_id(&mut self, id: &str, patch: HighlightPatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        let Some(highlight) = self.highlights.iter_mut().find(|h| h.id.as_str() == id) else {
            trace!(id, "patch target not in store; ignoring");
            return false;
        };

        highlight.apply_patch(patch);
        debug!(id, "patched highlight");
        self.bump();
        true
    }

    pub fn lookup_by_id(&self, id: &str) -> Option<&ResultHighlight> {
        self.highlights.iter().find(|h| h.id.as_str() == id)
    }

    /// Rank (0-based) of the highlight with `id`.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.highlights.iter().position(|h| h.id.as_str() == id)
    }

    pub fn is_in_working_set(&self, id: &str) -> bool {
        self.working_set().iter().any(|h| h.id.as_str() == id)
    }

    /// Sets the visible cutoff, clamped to the list length. Returns the value applied.
    pub(crate) fn set_rowcount(&mut self, rowcount: usize) -> usize {
        let clamped = rowcount.min(self.highlights.len());
        if clamped != self.rowcount {
            self.rowcount = clamped;
            self.bump();
        }
        clamped
    }

    /// Switches the selected document. Results always reset in the same step, including when
    /// the same document is picked again.
    pub(crate) fn select_embedding(&mut self, embedding_id: Option<EmbeddingId>) {
        self.reset();
        self.embedding_id = embedding_id;
        self.bump();
    }

    fn bump(&mut self) {
        self.rev = self.rev.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests;
