// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Deep-link navigation between result entries and the page view.
//!
//! The location fragment (`highlight-<id>`) is owned here rather than living in an ambient
//! global. Two inputs move the state machine: `focus` when the user activates an entry, and
//! `on_hash_change` when the fragment changes from outside (a pasted deep link, or the echo of
//! our own `focus`).
//!
//! The fragment always mirrors the state: `highlight-<id>` while focused, empty while idle.
//! Fragments that name nothing are ignored and leave both untouched.

use tracing::debug;

use crate::model::HighlightId;
use crate::store::ResultStore;
use crate::viewport::ViewportMapper;

pub const HASH_PREFIX: &str = "highlight-";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NavState {
    #[default]
    Idle,
    Focused(HighlightId),
}

/// What a navigation input did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// The mapper was asked to scroll to this highlight.
    Scrolled(HighlightId),
    /// No scroll was issued.
    Unchanged,
    /// The fragment did not name a highlight in the store.
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashNavigator {
    state: NavState,
    fragment: String,
}

impl HashNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    pub fn focused_id(&self) -> Option<&HighlightId> {
        match &self.state {
            NavState::Idle => None,
            NavState::Focused(id) => Some(id),
        }
    }

    /// The current fragment without the leading `#`; empty when cleared.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// `#highlight-<id>` for the focused highlight.
    pub fn deep_link(&self) -> Option<String> {
        self.focused_id().map(|id| format!("#{}", hash_for(id.as_str())))
    }

    /// Drops whatever fragment a previous session left behind. No change event is emitted.
    pub fn mount(&mut self) {
        self.clear();
    }

    /// The user activated an entry (list row or overlay).
    pub fn focus(
        &mut self,
        id: &HighlightId,
        store: &ResultStore,
        mapper: &mut dyn ViewportMapper,
    ) -> NavOutcome {
        self.fragment = hash_for(id.as_str());
        if self.is_focused_on(id.as_str()) {
            return NavOutcome::Unchanged;
        }

        self.state = NavState::Focused(id.clone());

        match store.lookup_by_id(id.as_str()) {
            Some(highlight) => {
                mapper.scroll_to_highlight(highlight);
                debug!(id = %id, "focused highlight");
                NavOutcome::Scrolled(id.clone())
            }
            None => NavOutcome::Unchanged,
        }
    }

    /// The fragment changed. Accepts `#highlight-<id>` or `highlight-<id>`.
    pub fn on_hash_change(
        &mut self,
        fragment: &str,
        store: &ResultStore,
        mapper: &mut dyn ViewportMapper,
    ) -> NavOutcome {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        let Some(id) = parse_highlight_id(fragment) else {
            return NavOutcome::Ignored;
        };
        let Some(highlight) = store.lookup_by_id(id) else {
            debug!(id, "deep link names no known highlight");
            return NavOutcome::Ignored;
        };

        self.fragment = hash_for(id);
        if self.is_focused_on(id) {
            return NavOutcome::Unchanged;
        }

        mapper.scroll_to_highlight(highlight);
        self.state = NavState::Focused(highlight.id.clone());
        debug!(id, "scrolled to deep-linked highlight");
        NavOutcome::Scrolled(highlight.id.clone())
    }

    /// The viewport moved away from the focused highlight on its own.
    pub fn on_scroll_away(&mut self) {
        if self.state != NavState::Idle {
            debug!("scrolled away from focused highlight");
        }
        self.clear();
    }

    fn is_focused_on(&self, id: &str) -> bool {
        matches!(&self.state, NavState::Focused(current) if current.as_str() == id)
    }

    fn clear(&mut self) {
        self.fragment.clear();
        self.state = NavState::Idle;
    }
}

pub fn hash_for(id: &str) -> String {
    format!("{HASH_PREFIX}{id}")
}

/// Extracts the highlight id from a fragment (without `#`). `None` for anything that is not a
/// highlight link.
pub fn parse_highlight_id(fragment: &str) -> Option<&str> {
    fragment.strip_prefix(HASH_PREFIX).filter(|id| !id.is_empty())
}
