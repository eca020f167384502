// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Intrasearch: ranked semantic-search results over a paginated document.
//!
//! The core keeps one result list per document, a committed cutoff over it, a fragment-driven
//! focus and an area-resize lock. The terminal shell in [`tui`] is one document view; anything
//! implementing [`viewport::ViewportMapper`] can host the overlays.

pub mod api;
pub mod backend;
pub mod config;
pub mod document;
pub mod edit;
pub mod logging;
pub mod model;
pub mod nav;
pub mod query;
pub mod render;
pub mod store;
pub mod tui;
pub mod ui;
pub mod viewport;
pub mod working_set;
