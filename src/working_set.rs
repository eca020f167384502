// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Two-phase cutoff for the displayed result prefix.
//!
//! The staged count follows the slider freely; only [`WorkingSetFilter::commit`] moves the
//! store's `rowcount`, so overlays are not rebuilt for every intermediate slider position.

use tracing::debug;

use crate::model::ResultHighlight;
use crate::store::ResultStore;

/// Number of results shown right after a query returns.
pub const DEFAULT_ROWCOUNT: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkingSetFilter {
    staged: usize,
    apply_available: bool,
}

impl WorkingSetFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn staged(&self) -> usize {
        self.staged
    }

    /// Whether a staged value is waiting to be committed.
    pub fn apply_available(&self) -> bool {
        self.apply_available
    }

    /// Stages `count`, clamped to the store's length. Returns the staged value.
    pub fn stage(&mut self, count: usize, store: &ResultStore) -> usize {
        self.staged = count.min(store.len());
        self.apply_available = true;
        self.staged
    }

    /// Stages relative to the currently staged value.
    pub fn nudge(&mut self, delta: isize, store: &ResultStore) -> usize {
        let next = if delta < 0 {
            self.staged.saturating_sub(delta.unsigned_abs())
        } else {
            self.staged.saturating_add(delta.unsigned_abs())
        };
        self.stage(next, store)
    }

    pub fn commit(&mut self, store: &mut ResultStore) -> usize {
        let applied = store.set_rowcount(self.staged);
        self.staged = applied;
        self.apply_available = false;
        debug!(rowcount = applied, "committed working-set cutoff");
        applied
    }

    /// Applies the post-query default of `min(10, len)` without an apply step.
    pub fn initialize_default(&mut self, store: &mut ResultStore) -> usize {
        self.staged = DEFAULT_ROWCOUNT.min(store.len());
        self.commit(store)
    }

    pub fn reset(&mut self) {
        self.staged = 0;
        self.apply_available = false;
    }

    pub fn working_set<'a>(&self, store: &'a ResultStore) -> &'a [ResultHighlight] {
        store.working_set()
    }
}
