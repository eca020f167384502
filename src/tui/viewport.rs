// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Page view in character cells.
//!
//! Pages are stacked top to bottom, each preceded by a one-row header. A page is as wide as the
//! pane and as tall as its aspect ratio allows, halved because terminal cells are about twice as
//! tall as they are wide. The viewport unit is one cell.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::document::{DocumentLayout, FALLBACK_PAGE};
use crate::model::{geometry, PageSize, ResultHighlight, ScaledRect, ViewportRect};
use crate::render::{Canvas, CanvasError, Cell, HighlightOverlay, OverlayShape};
use crate::viewport::ViewportMapper;

const PAGE_HEADER_ROWS: usize = 1;
const CELL_ASPECT: f64 = 0.5;
const SCROLL_MARGIN: usize = 2;
const MIN_PAGE_COLS: usize = 16;

/// One visible row of the page view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PageRow<'a> {
    Header(u32),
    Cells { page: u32, y: usize, cells: &'a [Cell] },
    Blank,
}

#[derive(Debug, Clone)]
pub(crate) struct TerminalViewport {
    layout: DocumentLayout,
    page_cols: usize,
    view_rows: usize,
    scroll_y: usize,
    canvases: Vec<Canvas>,
}

impl TerminalViewport {
    pub(crate) fn new(layout: DocumentLayout) -> Self {
        Self { layout, page_cols: 60, view_rows: 20, scroll_y: 0, canvases: Vec::new() }
    }

    pub(crate) fn layout(&self) -> &DocumentLayout {
        &self.layout
    }

    pub(crate) fn set_layout(&mut self, layout: DocumentLayout) {
        self.layout = layout;
        self.scroll_y = 0;
        self.canvases.clear();
    }

    pub(crate) fn resize(&mut self, cols: usize, rows: usize) {
        self.page_cols = cols.max(MIN_PAGE_COLS);
        self.view_rows = rows.max(1);
        self.clamp_scroll();
    }

    pub(crate) fn scroll_y(&self) -> usize {
        self.scroll_y
    }

    pub(crate) fn total_rows(&self) -> usize {
        self.layout.pages().iter().map(|page| PAGE_HEADER_ROWS + self.rows_for(*page)).sum()
    }

    pub(crate) fn scroll_by(&mut self, delta: isize) {
        self.scroll_y = if delta < 0 {
            self.scroll_y.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll_y.saturating_add(delta.unsigned_abs())
        };
        self.clamp_scroll();
    }

    pub(crate) fn scroll_page(&mut self, direction: isize) {
        let step = self.view_rows.saturating_sub(1).max(1) as isize;
        self.scroll_by(direction.signum() * step);
    }

    pub(crate) fn scroll_to_row(&mut self, row: usize) {
        self.scroll_y = row;
        self.clamp_scroll();
    }

    /// Page shown in the top visible row.
    pub(crate) fn current_page(&self) -> u32 {
        let mut top = 0;
        for (idx, page) in self.layout.pages().iter().enumerate() {
            top += PAGE_HEADER_ROWS + self.rows_for(*page);
            if self.scroll_y < top {
                return idx as u32 + 1;
            }
        }
        self.layout.page_count() as u32
    }

    /// Whether any row of `rect` is inside the visible window.
    pub(crate) fn is_visible(&self, rect: &ViewportRect) -> bool {
        let Some(page_top) = self.page_top(rect.page_number) else {
            return false;
        };
        let (y0, y1) = cell_span(rect.top, rect.bottom());
        let first = page_top + y0;
        let last = page_top + y1;
        first < self.scroll_y + self.view_rows && last > self.scroll_y
    }

    /// Paints overlays onto fresh page canvases. `highlights` supplies the passage text drawn
    /// inside text overlays and is indexed by overlay rank.
    pub(crate) fn paint(
        &mut self,
        overlays: &[HighlightOverlay],
        highlights: &[ResultHighlight],
    ) -> Result<(), CanvasError> {
        let mut canvases = self
            .layout
            .pages()
            .iter()
            .map(|page| Canvas::new(self.page_cols, self.rows_for(*page)))
            .collect::<Result<Vec<_>, _>>()?;

        for overlay in overlays {
            match &overlay.shape {
                OverlayShape::Text { rects } => {
                    let text = highlights
                        .get(overlay.rank)
                        .and_then(|h| h.content.text.as_deref())
                        .unwrap_or_default();
                    paint_text(&mut canvases, rects, text, overlay.rank);
                }
                OverlayShape::Area { region } => {
                    if let Some(canvas) = canvas_for(&mut canvases, region.page_number) {
                        paint_area(canvas, region, overlay.rank);
                    }
                }
            }
        }

        self.canvases = canvases;
        Ok(())
    }

    /// The rows currently in view, top to bottom.
    pub(crate) fn visible_rows(&self) -> Vec<PageRow<'_>> {
        let mut rows = Vec::with_capacity(self.view_rows);
        let mut cursor = 0usize;
        let end = self.scroll_y + self.view_rows;
        for (idx, page) in self.layout.pages().iter().enumerate() {
            let page_rows = self.rows_for(*page);
            for row in 0..PAGE_HEADER_ROWS + page_rows {
                if cursor >= end {
                    return rows;
                }
                if cursor >= self.scroll_y {
                    rows.push(match row.checked_sub(PAGE_HEADER_ROWS) {
                        None => PageRow::Header(idx as u32 + 1),
                        Some(y) => self
                            .canvases
                            .get(idx)
                            .map(|canvas| PageRow::Cells {
                                page: idx as u32 + 1,
                                y,
                                cells: canvas.row(y),
                            })
                            .unwrap_or(PageRow::Blank),
                    });
                }
                cursor += 1;
            }
        }
        rows
    }

    fn rows_for(&self, page: PageSize) -> usize {
        let rows = self.page_cols as f64 * page.height / page.width * CELL_ASPECT;
        if rows.is_finite() {
            (rows.round() as usize).max(1)
        } else {
            1
        }
    }

    /// First content row of `page_number` in the stacked document.
    fn page_top(&self, page_number: u32) -> Option<usize> {
        let idx = (page_number as usize).checked_sub(1)?;
        let pages = self.layout.pages();
        if idx >= pages.len() {
            return None;
        }
        let above: usize =
            pages[..idx].iter().map(|page| PAGE_HEADER_ROWS + self.rows_for(*page)).sum();
        Some(above + PAGE_HEADER_ROWS)
    }

    fn cells_for(&self, page_number: u32) -> PageSize {
        let page = self.layout.page(page_number).unwrap_or(FALLBACK_PAGE);
        PageSize::new(self.page_cols as f64, self.rows_for(page) as f64)
    }

    fn clamp_scroll(&mut self) {
        let max = self.total_rows().saturating_sub(self.view_rows);
        self.scroll_y = self.scroll_y.min(max);
    }
}

impl ViewportMapper for TerminalViewport {
    fn page_size(&self, page_number: u32) -> Option<PageSize> {
        self.layout.page(page_number).map(|_| self.cells_for(page_number))
    }

    fn viewport_to_scaled(&self, rect: &ViewportRect) -> ScaledRect {
        geometry::viewport_to_scaled(rect, self.cells_for(rect.page_number))
    }

    fn scaled_to_viewport(&self, rect: &ScaledRect) -> ViewportRect {
        geometry::scaled_to_viewport(rect, self.cells_for(rect.page_number))
    }

    fn scroll_to_highlight(&mut self, highlight: &ResultHighlight) {
        let rect = self.scaled_to_viewport(&highlight.position.bounding_rect);
        let Some(page_top) = self.page_top(rect.page_number) else {
            return;
        };
        let (y0, _) = cell_span(rect.top, rect.bottom());
        self.scroll_to_row((page_top + y0).saturating_sub(SCROLL_MARGIN));
    }

    fn screenshot(&self, rect: &ViewportRect) -> String {
        let rect = rect.normalized();
        let text = (rect.page_number as usize)
            .checked_sub(1)
            .and_then(|idx| self.canvases.get(idx))
            .map(|canvas| {
                let (x0, x1) = cell_span(rect.left, rect.right());
                let (y0, y1) = cell_span(rect.top, rect.bottom());
                canvas.region_text(x0, y0, x1, y1)
            })
            .unwrap_or_default();
        format!("data:text/plain;base64,{}", STANDARD.encode(text.as_bytes()))
    }
}

/// Cell range `[start, end)` covered by a span of viewport units; never empty.
fn cell_span(start: f64, end: f64) -> (usize, usize) {
    let first = start.max(0.0).round() as usize;
    let last = (end.max(0.0).round() as usize).max(first + 1);
    (first, last)
}

fn canvas_for(canvases: &mut [Canvas], page_number: u32) -> Option<&mut Canvas> {
    (page_number as usize).checked_sub(1).and_then(|idx| canvases.get_mut(idx))
}

/// Each line lands on its own page; a passage may run on past the page its bounding box is on.
fn paint_text(canvases: &mut [Canvas], rects: &[ViewportRect], text: &str, rank: usize) {
    let mut words = text.split_whitespace().peekable();
    let mut next_row: Option<(u32, usize)> = None;
    for rect in rects {
        let Some(canvas) = canvas_for(canvases, rect.page_number) else {
            continue;
        };
        let (x0, x1) = cell_span(rect.left, rect.right());
        let (y0, y1) = cell_span(rect.top, rect.bottom());
        canvas.mark_rect(x0, y0, x1, y1, rank);
        // Lines thinner than a cell may round onto the same row.
        let row = match next_row {
            Some((page, next)) if page == rect.page_number => y0.max(next),
            _ => y0,
        };
        next_row = Some((rect.page_number, row + 1));

        let width = x1 - x0;
        let mut line = String::new();
        while let Some(word) = words.peek() {
            let needed = if line.is_empty() { word.chars().count() } else { word.chars().count() + 1 };
            if line.chars().count() + needed > width && !line.is_empty() {
                break;
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
            words.next();
        }
        canvas.mark_rect(x0, row, x1, row + 1, rank);
        canvas.write_clipped(x0, row, x1, &line);
    }
}

fn paint_area(canvas: &mut Canvas, region: &ViewportRect, rank: usize) {
    let region = region.normalized();
    let (x0, x1) = cell_span(region.left, region.right());
    let (y0, y1) = cell_span(region.top, region.bottom());
    canvas.mark_rect(x0, y0, x1, y1, rank);
    canvas.draw_box(x0, y0, x1 - 1, y1 - 1);
    canvas.write_clipped(x0 + 1, y0, x1.saturating_sub(1), &format!("#{}", rank + 1));
}
