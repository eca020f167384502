// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Ranked result highlights, the two coordinate spaces they are drawn in, and the document
//! manifest entries a user picks from.

pub mod embedding;
pub(crate) mod fixtures;
pub mod geometry;
pub mod highlight;
pub mod ids;

pub use embedding::{filter_options, EmbeddingInfo};
pub use geometry::{scaled_to_viewport, viewport_to_scaled, PageSize, ScaledRect, ViewportRect};
pub use highlight::{
    format_similarity, Content, HighlightKind, HighlightPatch, Position, ResultHighlight,
};
pub use ids::{EmbeddingId, HighlightId, Id, IdError};
