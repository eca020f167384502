// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use intrasearch::model::{
    scaled_to_viewport, viewport_to_scaled, Content, HighlightId, HighlightKind, PageSize,
    Position, ResultHighlight, ScaledRect, ViewportRect,
};
use intrasearch::viewport::ViewportMapper;

pub const PAGE_COUNT: u32 = 40;

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    Medium,
    Large,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    pub fn len(self) -> usize {
        match self {
            Self::Small => 12,
            Self::Medium => 200,
            Self::Large => 2_000,
        }
    }
}

fn letter(x1: f64, y1: f64, x2: f64, y2: f64, page_number: u32) -> ScaledRect {
    ScaledRect { x1, y1, x2, y2, width: 612.0, height: 792.0, page_number }
}

/// `len` results, best first; every seventh one is an area.
pub fn ranked(case: Case) -> Vec<ResultHighlight> {
    let len = case.len();
    (0..len)
        .map(|rank| {
            let page = 1 + (rank as u32 * 7) % PAGE_COUNT;
            let top = 60.0 + (rank % 11) as f64 * 60.0;
            let similarity = 1.0 - rank as f64 / (len as f64 + 1.0);
            let id = HighlightId::new(format!("r{rank:05}")).expect("highlight id");
            if rank % 7 == 6 {
                return ResultHighlight {
                    id,
                    kind: HighlightKind::Area,
                    content: Content { text: None, image: Some(String::new()) },
                    position: Position {
                        bounding_rect: letter(90.0, top, 400.0, top + 120.0, page),
                        rects: Vec::new(),
                    },
                    similarity,
                };
            }
            let rects = (0..4)
                .map(|line| {
                    let y = top + f64::from(line) * 14.0;
                    letter(72.0, y, 540.0, y + 12.0, page)
                })
                .collect();
            ResultHighlight {
                id,
                kind: HighlightKind::Text,
                content: Content {
                    text: Some(format!("ranked passage {rank} on page {page} ").repeat(4)),
                    image: None,
                },
                position: Position {
                    bounding_rect: letter(72.0, top, 540.0, top + 54.0, page),
                    rects,
                },
                similarity,
            }
        })
        .collect()
}

/// Pages drawn at a fixed size; scrolls are counted, snapshots are cheap strings.
#[derive(Debug, Default)]
pub struct FixedViewport {
    pub scrolls: u64,
}

impl FixedViewport {
    pub const PAGE: PageSize = PageSize { width: 918.0, height: 1188.0 };
}

impl ViewportMapper for FixedViewport {
    fn page_size(&self, page_number: u32) -> Option<PageSize> {
        (1..=PAGE_COUNT).contains(&page_number).then_some(Self::PAGE)
    }

    fn viewport_to_scaled(&self, rect: &ViewportRect) -> ScaledRect {
        viewport_to_scaled(rect, Self::PAGE)
    }

    fn scaled_to_viewport(&self, rect: &ScaledRect) -> ViewportRect {
        scaled_to_viewport(rect, Self::PAGE)
    }

    fn scroll_to_highlight(&mut self, _highlight: &ResultHighlight) {
        self.scrolls += 1;
    }

    fn screenshot(&self, rect: &ViewportRect) -> String {
        format!("data:,{}x{}", rect.width, rect.height)
    }
}
