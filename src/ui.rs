// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Viewer state shared by the interactive shell and headless mode.
//!
//! Owns one of each core component and wires them together: document selection resets results
//! and supersedes queries in flight, query completion sets the default cutoff, and navigation and
//! editing both read the same store.

use tracing::debug;

use crate::api::ApiError;
use crate::edit::{AreaEdit, AreaEditor, EditError};
use crate::model::{EmbeddingId, HighlightId, ResultHighlight};
use crate::nav::{HashNavigator, NavOutcome};
use crate::query::{QueryController, QueryError, QueryOutcome, QueryTicket};
use crate::render::{context_actions, ContextMenu, HighlightOverlay, HighlightRenderer};
use crate::store::ResultStore;
use crate::viewport::ViewportMapper;
use crate::working_set::WorkingSetFilter;

#[derive(Debug, Clone, Default)]
pub struct ViewerState {
    store: ResultStore,
    filter: WorkingSetFilter,
    nav: HashNavigator,
    editor: AreaEditor,
    queries: QueryController,
}

impl ViewerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    pub fn filter(&self) -> &WorkingSetFilter {
        &self.filter
    }

    pub fn nav(&self) -> &HashNavigator {
        &self.nav
    }

    pub fn editor(&self) -> &AreaEditor {
        &self.editor
    }

    pub fn queries(&self) -> &QueryController {
        &self.queries
    }

    pub fn working_set(&self) -> &[ResultHighlight] {
        self.filter.working_set(&self.store)
    }

    /// Start of a session: any fragment left over from a previous one is dropped.
    pub fn mount(&mut self) {
        self.nav.mount();
    }

    /// Switches documents (or clears the selection with `None`). Results, cutoff, focus and any
    /// edit are discarded; a query still in flight keeps running but its answer will be dropped.
    pub fn select_document(&mut self, embedding_id: Option<EmbeddingId>) {
        debug!(embedding = ?embedding_id.as_ref().map(EmbeddingId::as_str), "document selected");
        self.store.select_embedding(embedding_id);
        self.filter.reset();
        self.queries.invalidate();
        self.editor.cancel();
        self.nav.on_scroll_away();
    }

    pub fn submit_query(&mut self, query: &str) -> Result<QueryTicket, QueryError> {
        self.queries.submit(&self.store, query)
    }

    pub fn complete_query(
        &mut self,
        ticket: QueryTicket,
        result: Result<Vec<ResultHighlight>, ApiError>,
    ) -> Result<QueryOutcome, QueryError> {
        self.queries.complete(ticket, result, &mut self.store, &mut self.filter)
    }

    pub fn stage_rowcount(&mut self, count: usize) -> usize {
        self.filter.stage(count, &self.store)
    }

    pub fn nudge_rowcount(&mut self, delta: isize) -> usize {
        self.filter.nudge(delta, &self.store)
    }

    pub fn commit_rowcount(&mut self) -> usize {
        self.filter.commit(&mut self.store)
    }

    pub fn focus(&mut self, id: &HighlightId, mapper: &mut dyn ViewportMapper) -> NavOutcome {
        self.nav.focus(id, &self.store, mapper)
    }

    pub fn hash_changed(&mut self, fragment: &str, mapper: &mut dyn ViewportMapper) -> NavOutcome {
        self.nav.on_hash_change(fragment, &self.store, mapper)
    }

    pub fn scroll_away(&mut self) {
        self.nav.on_scroll_away();
    }

    pub fn begin_area_edit(&mut self, id: &HighlightId) -> Result<(), EditError> {
        self.editor.begin(id, &self.store)
    }

    pub fn finish_area_edit(
        &mut self,
        id: &HighlightId,
        edit: AreaEdit,
        mapper: &dyn ViewportMapper,
    ) -> Result<bool, EditError> {
        self.editor.finish(id, edit, mapper, &mut self.store)
    }

    pub fn cancel_area_edit(&mut self) {
        self.editor.cancel();
    }

    /// Overlays for the working set, flagged with the current focus and edit.
    pub fn overlays(&self, mapper: &dyn ViewportMapper) -> Vec<HighlightOverlay> {
        HighlightRenderer::new(self.nav.focused_id(), self.editor.editing_id())
            .overlays(self.working_set(), mapper)
    }

    /// Opens the context menu for a rendered highlight. Returns `false` when `id` is not in the
    /// working set.
    pub fn open_context_menu(&self, id: &HighlightId, menu: &mut dyn ContextMenu) -> bool {
        if !self.store.is_in_working_set(id.as_str()) {
            return false;
        }
        let Some(highlight) = self.store.lookup_by_id(id.as_str()) else {
            return false;
        };
        menu.open(highlight, &context_actions(highlight));
        true
    }
}
