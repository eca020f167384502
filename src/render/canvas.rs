// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

pub const BOX_HORIZONTAL: char = '─';
pub const BOX_VERTICAL: char = '│';
pub const BOX_TOP_LEFT: char = '┌';
pub const BOX_TOP_RIGHT: char = '┐';
pub const BOX_BOTTOM_LEFT: char = '└';
pub const BOX_BOTTOM_RIGHT: char = '┘';

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CanvasError {
    #[error("canvas area overflows ({width}x{height})")]
    AreaOverflow { width: usize, height: usize },
    #[error("({x}, {y}) is outside the {width}x{height} canvas")]
    OutOfBounds { x: usize, y: usize, width: usize, height: usize },
}

/// One character cell plus the rank of the overlay painted over it, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub overlay: Option<usize>,
}

impl Cell {
    const BLANK: Self = Self { ch: ' ', overlay: None };
}

/// A fixed-size character grid one page is painted into.
///
/// Writes outside the grid are clipped by the drawing helpers; only the single-cell accessors
/// report out-of-bounds coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasError> {
        let len = width.checked_mul(height).ok_or(CanvasError::AreaOverflow { width, height })?;
        Ok(Self { width, height, cells: vec![Cell::BLANK; len] })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Result<Cell, CanvasError> {
        let idx = self.index_of(x, y)?;
        Ok(self.cells[idx])
    }

    pub fn set(&mut self, x: usize, y: usize, ch: char) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        self.cells[idx].ch = ch;
        Ok(())
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// Writes `text` from `(x, y)` rightwards, clipped at `max_x` (exclusive) and the canvas edge.
    pub fn write_clipped(&mut self, x: usize, y: usize, max_x: usize, text: &str) {
        if y >= self.height {
            return;
        }
        let end = max_x.min(self.width);
        for (offset, ch) in text.chars().enumerate() {
            let cx = x + offset;
            if cx >= end {
                break;
            }
            self.cells[y * self.width + cx].ch = ch;
        }
    }

    /// Tags every cell in `x0..x1` x `y0..y1` (exclusive ends) with `overlay`.
    pub fn mark_rect(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, overlay: usize) {
        for y in y0..y1.min(self.height) {
            for x in x0..x1.min(self.width) {
                self.cells[y * self.width + x].overlay = Some(overlay);
            }
        }
    }

    /// Draws a single-line box whose corners are `(x0, y0)` and `(x1, y1)` inclusive. Parts
    /// outside the canvas are skipped.
    pub fn draw_box(&mut self, x0: usize, y0: usize, x1: usize, y1: usize) {
        let (min_x, max_x) = (x0.min(x1), x0.max(x1));
        let (min_y, max_y) = (y0.min(y1), y0.max(y1));

        for x in min_x..=max_x {
            self.put(x, min_y, BOX_HORIZONTAL);
            self.put(x, max_y, BOX_HORIZONTAL);
        }
        for y in min_y..=max_y {
            self.put(min_x, y, BOX_VERTICAL);
            self.put(max_x, y, BOX_VERTICAL);
        }
        self.put(min_x, min_y, BOX_TOP_LEFT);
        self.put(max_x, min_y, BOX_TOP_RIGHT);
        self.put(min_x, max_y, BOX_BOTTOM_LEFT);
        self.put(max_x, max_y, BOX_BOTTOM_RIGHT);
    }

    /// Characters inside `x0..x1` x `y0..y1` (exclusive ends), one line per row, trailing
    /// blanks trimmed.
    pub fn region_text(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> String {
        let mut lines = Vec::new();
        for y in y0..y1.min(self.height) {
            let line = self.row(y)
                .iter()
                .skip(x0)
                .take(x1.min(self.width).saturating_sub(x0))
                .map(|cell| cell.ch)
                .collect::<String>();
            lines.push(line.trim_end().to_owned());
        }
        lines.join("\n")
    }

    fn put(&mut self, x: usize, y: usize, ch: char) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x].ch = ch;
        }
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, CanvasError> {
        if x >= self.width || y >= self.height {
            return Err(CanvasError::OutOfBounds { x, y, width: self.width, height: self.height });
        }
        Ok(y * self.width + x)
    }
}
