//! Terminal screen: raw-mode session management and buffer presentation.
//!
//! The `Screen` owns the terminal for the lifetime of the widget runtime:
//! raw mode, the alternate screen, and mouse capture are claimed on
//! construction and restored on drop, so a panic unwinds into a usable
//! shell.

use std::io::{self, Write};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};

use crate::buffer::{Buffer, Modifiers, Rgb};
use crate::error::Result;

const ATTRIBUTES: [(Modifiers, Attribute); 5] = [
    (Modifiers::BOLD, Attribute::Bold),
    (Modifiers::DIM, Attribute::Dim),
    (Modifiers::ITALIC, Attribute::Italic),
    (Modifiers::UNDERLINE, Attribute::Underlined),
    (Modifiers::REVERSED, Attribute::Reverse),
];

/// A raw-mode terminal session that cell buffers are presented to.
pub struct Screen {
    out: io::Stdout,
    alternate: bool,
    mouse: bool,
}

impl Screen {
    /// Claim the terminal: raw mode, optional alternate screen and mouse
    /// capture, hidden hardware cursor (widgets draw their own).
    pub fn new(alternate: bool, mouse: bool) -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        if alternate {
            execute!(out, EnterAlternateScreen)?;
        }
        if mouse {
            execute!(out, EnableMouseCapture)?;
        }
        execute!(out, cursor::Hide)?;
        Ok(Self {
            out,
            alternate,
            mouse,
        })
    }

    /// Current terminal size in (columns, rows).
    pub fn size() -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    /// Present a buffer: write every row, coalescing style changes into
    /// runs. Continuation cells after wide characters are skipped (the
    /// cursor already advanced past them).
    pub fn present(&mut self, buffer: &Buffer) -> Result<()> {
        let mut last_fg: Option<Rgb> = None;
        let mut last_bg: Option<Rgb> = None;
        let mut last_mods: Option<Modifiers> = None;

        for y in 0..buffer.height() {
            queue!(self.out, cursor::MoveTo(0, y))?;
            for x in 0..buffer.width() {
                let Some(cell) = buffer.get(x, y) else {
                    continue;
                };
                if cell.is_continuation() {
                    continue;
                }
                if last_mods != Some(cell.modifiers()) {
                    // Attribute reset clears colors too; force both to re-emit
                    queue!(self.out, SetAttribute(Attribute::Reset))?;
                    last_fg = None;
                    last_bg = None;
                    for (flag, attr) in ATTRIBUTES {
                        if cell.modifiers().contains(flag) {
                            queue!(self.out, SetAttribute(attr))?;
                        }
                    }
                    last_mods = Some(cell.modifiers());
                }
                if last_fg != Some(cell.fg()) {
                    queue!(self.out, SetForegroundColor(to_color(cell.fg())))?;
                    last_fg = Some(cell.fg());
                }
                if last_bg != Some(cell.bg()) {
                    queue!(self.out, SetBackgroundColor(to_color(cell.bg())))?;
                    last_bg = Some(cell.bg());
                }
                queue!(self.out, Print(cell.ch()))?;
            }
        }

        queue!(self.out, SetAttribute(Attribute::Reset))?;
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show);
        if self.mouse {
            let _ = execute!(self.out, DisableMouseCapture);
        }
        if self.alternate {
            let _ = execute!(self.out, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
    }
}

const fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
