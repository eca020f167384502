// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Per-highlight presentation.
//!
//! A highlight becomes a [`HighlightOverlay`]: viewport rectangles plus the interactions the
//! overlay supports. Text runs are outlined line by line; areas are a single resizable region.

mod canvas;
pub mod text;

pub use canvas::{Canvas, CanvasError, Cell};

use crate::model::{HighlightId, HighlightKind, ResultHighlight, ViewportRect};
use crate::viewport::ViewportMapper;

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayShape {
    /// One rectangle per selected line.
    Text { rects: Vec<ViewportRect> },
    /// The whole region; this is what a resize gesture edits.
    Area { region: ViewportRect },
}

/// Interactions an overlay can receive from the document view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    ContextMenu,
    EditStart,
    EditEnd,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HighlightOverlay {
    pub id: HighlightId,
    /// 0-based rank in the result list.
    pub rank: usize,
    /// Page of the bounding box. Text lines may run on past it; each rect carries its own page.
    pub page_number: u32,
    pub shape: OverlayShape,
    /// Hover/focus tip, e.g. `Similarity score : 0.912`.
    pub tip: String,
    pub scrolled_to: bool,
    pub editing: bool,
}

impl HighlightOverlay {
    pub fn kind(&self) -> HighlightKind {
        match self.shape {
            OverlayShape::Text { .. } => HighlightKind::Text,
            OverlayShape::Area { .. } => HighlightKind::Area,
        }
    }

    /// Rectangles the overlay occupies.
    pub fn rects(&self) -> &[ViewportRect] {
        match &self.shape {
            OverlayShape::Text { rects } => rects,
            OverlayShape::Area { region } => std::slice::from_ref(region),
        }
    }

    pub fn accepts(&self, gesture: Gesture) -> bool {
        match (&self.shape, gesture) {
            (_, Gesture::ContextMenu) => true,
            (OverlayShape::Area { .. }, Gesture::EditStart | Gesture::EditEnd) => true,
            (OverlayShape::Text { .. }, Gesture::EditStart | Gesture::EditEnd) => false,
        }
    }

    /// Hit test in viewport units on `page_number`.
    pub fn contains(&self, page_number: u32, x: f64, y: f64) -> bool {
        self.rects().iter().any(|r| {
            r.page_number == page_number
                && x >= r.left
                && x < r.right()
                && y >= r.top
                && y < r.bottom()
        })
    }
}

/// Actions offered by an overlay's context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextAction {
    CopyDeepLink,
    CopyText,
}

impl ContextAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::CopyDeepLink => "Copy link",
            Self::CopyText => "Copy text",
        }
    }
}

/// Extension point for the overlay context menu. The document view decides how the menu is
/// shown; the core only says which actions apply.
pub trait ContextMenu {
    fn open(&mut self, highlight: &ResultHighlight, actions: &[ContextAction]);
}

pub fn context_actions(highlight: &ResultHighlight) -> Vec<ContextAction> {
    let mut actions = vec![ContextAction::CopyDeepLink];
    match highlight.kind {
        HighlightKind::Text if highlight.content.text.is_some() => {
            actions.push(ContextAction::CopyText)
        }
        HighlightKind::Text | HighlightKind::Area => {}
    }
    actions
}

pub fn similarity_tip(highlight: &ResultHighlight) -> String {
    format!("Similarity score : {}", highlight.similarity_label())
}

/// Builds overlays for the rendered prefix of the result list.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighlightRenderer<'a> {
    pub focused: Option<&'a HighlightId>,
    pub editing: Option<&'a HighlightId>,
}

impl<'a> HighlightRenderer<'a> {
    pub fn new(focused: Option<&'a HighlightId>, editing: Option<&'a HighlightId>) -> Self {
        Self { focused, editing }
    }

    pub fn overlay(
        &self,
        rank: usize,
        highlight: &ResultHighlight,
        mapper: &dyn ViewportMapper,
    ) -> HighlightOverlay {
        let shape = match highlight.kind {
            HighlightKind::Text => {
                let rects = if highlight.position.rects.is_empty() {
                    vec![mapper.scaled_to_viewport(&highlight.position.bounding_rect)]
                } else {
                    highlight.position.rects.iter().map(|r| mapper.scaled_to_viewport(r)).collect()
                };
                OverlayShape::Text { rects }
            }
            HighlightKind::Area => OverlayShape::Area {
                region: mapper.scaled_to_viewport(&highlight.position.bounding_rect),
            },
        };

        HighlightOverlay {
            id: highlight.id.clone(),
            rank,
            page_number: highlight.page_number(),
            shape,
            tip: similarity_tip(highlight),
            scrolled_to: self.focused == Some(&highlight.id),
            editing: self.editing == Some(&highlight.id),
        }
    }

    /// One overlay per entry of `working_set`, in rank order.
    pub fn overlays(
        &self,
        working_set: &[ResultHighlight],
        mapper: &dyn ViewportMapper,
    ) -> Vec<HighlightOverlay> {
        working_set
            .iter()
            .enumerate()
            .map(|(rank, highlight)| self.overlay(rank, highlight, mapper))
            .collect()
    }
}
