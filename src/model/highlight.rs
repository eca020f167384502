// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::geometry::ScaledRect;
use super::ids::HighlightId;

/// How a highlight is drawn: a run of selected text or a free rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightKind {
    Text,
    Area,
}

impl HighlightKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Area => "area",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(rename = "boundingRect")]
    pub bounding_rect: ScaledRect,
    /// Per-line rectangles of a text selection, in reading order. Empty for areas.
    #[serde(default)]
    pub rects: Vec<ScaledRect>,
}

impl Position {
    pub fn page_number(&self) -> u32 {
        self.bounding_rect.page_number
    }
}

/// One ranked match returned by a query.
///
/// Wire format (as served by `/api/<embedding>/query`):
/// `{ "id", "type": "text"|"area", "content": {text?, image?}, "position": {boundingRect, rects},
/// "similarity" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultHighlight {
    pub id: HighlightId,
    #[serde(rename = "type")]
    pub kind: HighlightKind,
    #[serde(default)]
    pub content: Content,
    pub position: Position,
    pub similarity: f64,
}

impl ResultHighlight {
    pub fn page_number(&self) -> u32 {
        self.position.page_number()
    }

    /// Similarity as shown to users: always three decimals.
    pub fn similarity_label(&self) -> String {
        format_similarity(self.similarity)
    }

    /// Applies a partial update. Each present field replaces the current one wholesale.
    pub fn apply_patch(&mut self, patch: HighlightPatch) {
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
    }
}

pub fn format_similarity(similarity: f64) -> String {
    format!("{similarity:.3}")
}

/// Fields of a [`ResultHighlight`] that may be replaced in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightPatch {
    pub position: Option<Position>,
    pub content: Option<Content>,
}

impl HighlightPatch {
    /// The patch produced by resizing an area: new bounds, no line rects, fresh snapshot.
    pub fn area_resize(bounding_rect: ScaledRect, image: String) -> Self {
        Self {
            position: Some(Position { bounding_rect, rects: Vec::new() }),
            content: Some(Content { text: None, image: Some(image) }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.content.is_none()
    }
}
