//! Buffer: A grid of cells representing the drawable area.
//!
//! Cells are stored in row-major order in one contiguous allocation.
//! Text drawing is grapheme-aware: combining sequences collapse onto
//! their base character, wide characters take two columns.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::cell::{Cell, Modifiers, Rgb};
use crate::layout::Rect;

/// A grid of cells representing the terminal screen.
///
/// Access is in row-major order: `index = y * width + x`.
#[derive(Clone)]
pub struct Buffer {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
}

impl Buffer {
    /// Create a new buffer with the given dimensions.
    ///
    /// All cells are initialized to empty (space with default colors).
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "Buffer dimensions must be non-zero");
        let size = (width as usize) * (height as usize);
        Self {
            cells: vec![Cell::EMPTY; size],
            width,
            height,
        }
    }

    /// Get the buffer width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the buffer height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the buffer is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Get a reference to a cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Set a cell at (x, y).
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Resize the buffer, resetting contents.
    pub fn resize(&mut self, width: u16, height: u16) {
        assert!(width > 0 && height > 0, "Buffer dimensions must be non-zero");
        self.width = width;
        self.height = height;
        let size = (width as usize) * (height as usize);
        self.cells.clear();
        self.cells.resize(size, Cell::EMPTY);
    }

    /// Fill a rectangle with copies of a cell, clipped to the buffer.
    pub fn fill_rect(&mut self, rect: Rect, cell: Cell) {
        for y in rect.y..rect.bottom().min(self.height) {
            for x in rect.x..rect.right().min(self.width) {
                self.set(x, y, cell);
            }
        }
    }

    /// Draw text at a position with the given colors.
    ///
    /// Returns the number of columns used. Drawing stops at the right edge.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, fg: Rgb, bg: Rgb) -> u16 {
        self.draw_text_styled(x, y, text, fg, bg, Modifiers::empty())
    }

    /// Draw text with colors and style modifiers.
    ///
    /// Iterates grapheme clusters; a cluster wider than one column gets a
    /// continuation cell, a cluster that no longer fits is dropped.
    /// Returns the number of columns used.
    pub fn draw_text_styled(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: Rgb,
        bg: Rgb,
        modifiers: Modifiers,
    ) -> u16 {
        let mut col = x;
        for grapheme in text.graphemes(true) {
            let width = UnicodeWidthStr::width(grapheme);
            if width == 0 {
                continue;
            }
            #[allow(clippy::cast_possible_truncation)]
            let width = width.min(2) as u16;
            if col >= self.width || col + width > self.width {
                break;
            }
            let Some(ch) = grapheme.chars().next() else {
                continue;
            };
            #[allow(clippy::cast_possible_truncation)]
            let cell = Cell::with_width(ch, width as u8)
                .with_fg(fg)
                .with_bg(bg)
                .with_modifiers(modifiers);
            self.set(col, y, cell);
            if width == 2 {
                self.set(col + 1, y, Cell::continuation().with_bg(bg));
            }
            col += width;
        }
        col - x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_roundtrip() {
        let mut buffer = Buffer::new(10, 4);
        assert!(buffer.set(3, 2, Cell::new('z')));
        assert_eq!(buffer.get(3, 2).map(Cell::ch), Some('z'));
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut buffer = Buffer::new(10, 4);
        assert!(!buffer.set(10, 0, Cell::new('a')));
        assert!(!buffer.set(0, 4, Cell::new('a')));
        assert!(buffer.get(10, 0).is_none());
    }

    #[test]
    fn test_draw_text_returns_columns_used() {
        let mut buffer = Buffer::new(20, 2);
        let used = buffer.draw_text(1, 0, "dog", Rgb::WHITE, Rgb::BLACK);
        assert_eq!(used, 3);
        assert_eq!(buffer.get(1, 0).map(Cell::ch), Some('d'));
        assert_eq!(buffer.get(3, 0).map(Cell::ch), Some('g'));
    }

    #[test]
    fn test_draw_text_wide_char_continuation() {
        let mut buffer = Buffer::new(10, 1);
        let used = buffer.draw_text(0, 0, "犬x", Rgb::WHITE, Rgb::BLACK);
        assert_eq!(used, 3);
        assert_eq!(buffer.get(0, 0).map(Cell::width), Some(2));
        assert!(buffer.get(1, 0).is_some_and(Cell::is_continuation));
        assert_eq!(buffer.get(2, 0).map(Cell::ch), Some('x'));
    }

    #[test]
    fn test_draw_text_clips_at_right_edge() {
        let mut buffer = Buffer::new(4, 1);
        let used = buffer.draw_text(2, 0, "dogs", Rgb::WHITE, Rgb::BLACK);
        assert_eq!(used, 2);
        assert_eq!(buffer.get(3, 0).map(Cell::ch), Some('o'));
    }

    #[test]
    fn test_fill_rect_clipped() {
        let mut buffer = Buffer::new(5, 3);
        buffer.fill_rect(Rect::new(3, 1, 10, 10), Cell::new('#'));
        assert_eq!(buffer.get(3, 1).map(Cell::ch), Some('#'));
        assert_eq!(buffer.get(4, 2).map(Cell::ch), Some('#'));
        assert_eq!(buffer.get(2, 1).map(Cell::ch), Some(' '));
    }

    #[test]
    fn test_resize_resets_contents() {
        let mut buffer = Buffer::new(4, 2);
        buffer.set(0, 0, Cell::new('x'));
        buffer.resize(6, 3);
        assert_eq!(buffer.len(), 18);
        assert_eq!(buffer.get(0, 0).map(Cell::ch), Some(' '));
    }
}
