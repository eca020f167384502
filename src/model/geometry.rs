// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rectangles in the two coordinate spaces a highlight lives in.
//!
//! `ScaledRect` is what the server sends and what the store keeps: coordinates measured against a
//! page of `width` x `height`. `ViewportRect` is page-local and expressed in whatever unit the
//! current viewport paints in (terminal cells for the TUI).

use serde::{Deserialize, Serialize};

/// A rectangle in document space, independent of the current zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaledRect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
    pub height: f64,
    #[serde(rename = "pageNumber")]
    pub page_number: u32,
}

impl ScaledRect {
    pub fn page_size(&self) -> PageSize {
        PageSize { width: self.width, height: self.height }
    }
}

/// A page-local rectangle in viewport units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    #[serde(rename = "pageNumber")]
    pub page_number: u32,
}

impl ViewportRect {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Returns a copy with a non-negative size, flipping the origin where a drag went backwards.
    pub fn normalized(&self) -> Self {
        let (left, width) =
            if self.width < 0.0 { (self.left + self.width, -self.width) } else { (self.left, self.width) };
        let (top, height) = if self.height < 0.0 {
            (self.top + self.height, -self.height)
        } else {
            (self.top, self.height)
        };
        Self { left, top, width, height, page_number: self.page_number }
    }
}

/// Size of one page in viewport units at the current zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Converts a viewport rectangle into document space for a page currently painted at `page`.
pub fn viewport_to_scaled(rect: &ViewportRect, page: PageSize) -> ScaledRect {
    ScaledRect {
        x1: rect.left,
        y1: rect.top,
        x2: rect.right(),
        y2: rect.bottom(),
        width: page.width,
        height: page.height,
        page_number: rect.page_number,
    }
}

/// Projects a document-space rectangle onto a page painted at `page`.
///
/// A scaled rect without a usable reference size is passed through unscaled.
pub fn scaled_to_viewport(rect: &ScaledRect, page: PageSize) -> ViewportRect {
    let (x1, y1, x2, y2) = if rect.page_size().is_degenerate() {
        (rect.x1, rect.y1, rect.x2, rect.y2)
    } else {
        (
            page.width * rect.x1 / rect.width,
            page.height * rect.y1 / rect.height,
            page.width * rect.x2 / rect.width,
            page.height * rect.y2 / rect.height,
        )
    };

    ViewportRect { left: x1, top: y1, width: x2 - x1, height: y2 - y1, page_number: rect.page_number }
}
