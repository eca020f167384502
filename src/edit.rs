// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The only way an existing highlight changes: resizing an area.
//!
//! Editing is exclusive. While one edit is in progress a second `begin` is rejected; edits are
//! never merged.

use tracing::{debug, info};

use crate::model::{HighlightId, HighlightKind, HighlightPatch, ViewportRect};
use crate::store::ResultStore;
use crate::viewport::ViewportMapper;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    InProgress(HighlightId),
}

/// The result of a resize gesture, in viewport space.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaEdit {
    pub rect: ViewportRect,
    /// Snapshot of the region, as returned by [`ViewportMapper::screenshot`].
    pub snapshot: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("highlight {active} is already being edited")]
    Busy { active: HighlightId },
    #[error("highlight {id} is not in the current results")]
    UnknownHighlight { id: HighlightId },
    #[error("highlight {id} is a text highlight; only areas can be resized")]
    NotAnArea { id: HighlightId },
    #[error("no edit in progress for highlight {id}")]
    NotEditing { id: HighlightId },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AreaEditor {
    state: EditState,
}

impl AreaEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn editing_id(&self) -> Option<&HighlightId> {
        match &self.state {
            EditState::Idle => None,
            EditState::InProgress(id) => Some(id),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.state != EditState::Idle
    }

    /// Takes the exclusive-edit lock for `id`.
    pub fn begin(&mut self, id: &HighlightId, store: &ResultStore) -> Result<(), EditError> {
        if let EditState::InProgress(active) = &self.state {
            return Err(EditError::Busy { active: active.clone() });
        }

        let highlight = store
            .lookup_by_id(id.as_str())
            .ok_or_else(|| EditError::UnknownHighlight { id: id.clone() })?;
        match highlight.kind {
            HighlightKind::Area => {}
            HighlightKind::Text => return Err(EditError::NotAnArea { id: id.clone() }),
        }

        debug!(id = %id, "area edit started");
        self.state = EditState::InProgress(id.clone());
        Ok(())
    }

    /// Converts the edited rectangle to document space, patches the store and releases the lock.
    ///
    /// Returns whether the store was patched; `false` means the highlight disappeared while the
    /// edit was in progress.
    pub fn finish(
        &mut self,
        id: &HighlightId,
        edit: AreaEdit,
        mapper: &dyn ViewportMapper,
        store: &mut ResultStore,
    ) -> Result<bool, EditError> {
        match &self.state {
            EditState::InProgress(active) if active == id => {}
            _ => return Err(EditError::NotEditing { id: id.clone() }),
        }

        let bounding_rect = mapper.viewport_to_scaled(&edit.rect.normalized());
        let patched =
            store.patch_by_id(id.as_str(), HighlightPatch::area_resize(bounding_rect, edit.snapshot));
        self.state = EditState::Idle;
        info!(id = %id, patched, "area edit ended");
        Ok(patched)
    }

    /// Releases the lock without touching the store.
    pub fn cancel(&mut self) {
        if let EditState::InProgress(id) = &self.state {
            debug!(id = %id, "area edit cancelled");
        }
        self.state = EditState::Idle;
    }
}
