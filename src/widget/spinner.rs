//! Spinner: One-cell loading indicator.
//!
//! A braille spinner stepped by the animation ticker. The search box shows
//! it while a suggestion fetch is in flight and hides it otherwise.

use crate::buffer::{Buffer, Cell, Rgb};

const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// A one-cell animated loading indicator.
#[derive(Debug, Clone)]
pub struct Spinner {
    frame: usize,
    fg: Rgb,
    bg: Rgb,
}

impl Spinner {
    /// Create a spinner with the given colors.
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self { frame: 0, fg, bg }
    }

    /// Step to the next animation frame.
    pub const fn advance(&mut self) {
        self.frame = (self.frame + 1) % FRAMES.len();
    }

    /// The glyph for the current frame.
    pub const fn glyph(&self) -> char {
        FRAMES[self.frame]
    }

    /// Draw the current frame at a single cell.
    pub fn render_at(&self, buffer: &mut Buffer, x: u16, y: u16) {
        buffer.set(x, y, Cell::new(self.glyph()).with_fg(self.fg).with_bg(self.bg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_cycles_frames() {
        let mut spinner = Spinner::new(Rgb::WHITE, Rgb::BLACK);
        let first = spinner.glyph();
        for _ in 0..FRAMES.len() {
            spinner.advance();
        }
        assert_eq!(spinner.glyph(), first);
    }

    #[test]
    fn test_render_writes_one_cell() {
        let mut buffer = Buffer::new(4, 1);
        let spinner = Spinner::new(Rgb::WHITE, Rgb::BLACK);
        spinner.render_at(&mut buffer, 2, 0);
        assert_eq!(buffer.get(2, 0).map(Cell::ch), Some(spinner.glyph()));
        assert_eq!(buffer.get(1, 0).map(Cell::ch), Some(' '));
    }
}
