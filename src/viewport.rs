// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Seam between the highlight core and whatever paints the document.

use crate::model::{PageSize, ResultHighlight, ScaledRect, ViewportRect};

/// Provided by the document view. The core never paints or scrolls on its own; it asks the
/// mapper.
pub trait ViewportMapper {
    /// Current painted size of page `page_number` (1-based), if that page exists.
    fn page_size(&self, page_number: u32) -> Option<PageSize>;

    fn viewport_to_scaled(&self, rect: &ViewportRect) -> ScaledRect;

    fn scaled_to_viewport(&self, rect: &ScaledRect) -> ViewportRect;

    /// Brings `highlight` into view.
    fn scroll_to_highlight(&mut self, highlight: &ResultHighlight);

    /// Captures what is currently painted inside `rect` and returns a reference to it
    /// (a `data:` URL).
    fn screenshot(&self, rect: &ViewportRect) -> String;
}
