//! Text Field: Single-line text entry with cursor.
//!
//! The editing surface of the search box: character insertion and
//! deletion, char-boundary cursor movement, placeholder text, and a
//! blinking block cursor when focused.

use super::traits::Widget;
use crate::actor::{InputEvent, KeyCode};
use crate::buffer::{Buffer, Cell, Rgb};
use crate::layout::Rect;

/// Configuration for the text field widget.
#[derive(Debug, Clone)]
pub struct TextFieldConfig {
    /// Foreground color for text.
    pub fg: Rgb,
    /// Background color.
    pub bg: Rgb,
    /// Cursor color.
    pub cursor_fg: Rgb,
    /// Placeholder text shown when empty.
    pub placeholder: String,
    /// Placeholder text color.
    pub placeholder_fg: Rgb,
    /// Prompt prefix (e.g., "> ").
    pub prompt: String,
    /// Prompt color.
    pub prompt_fg: Rgb,
}

impl Default for TextFieldConfig {
    fn default() -> Self {
        Self {
            fg: Rgb::WHITE,
            bg: Rgb::new(30, 30, 30),
            cursor_fg: Rgb::new(0, 255, 255),
            placeholder: String::new(),
            placeholder_fg: Rgb::new(100, 100, 100),
            prompt: String::from("> "),
            prompt_fg: Rgb::new(0, 255, 255),
        }
    }
}

/// A single-line text field with cursor and editing support.
#[derive(Debug)]
pub struct TextField {
    /// Current text content.
    content: String,
    /// Cursor position (byte offset, always on a char boundary).
    cursor: usize,
    /// Widget bounds (one row).
    bounds: Rect,
    /// Whether this field has focus.
    focused: bool,
    /// Configuration.
    config: TextFieldConfig,
    /// Frame counter for cursor blinking.
    frame: u64,
    /// Needs redraw flag.
    dirty: bool,
}

impl TextField {
    /// Create a new text field with the given bounds.
    pub fn new(bounds: Rect) -> Self {
        Self::with_config(bounds, TextFieldConfig::default())
    }

    /// Create a new text field with custom configuration.
    pub const fn with_config(bounds: Rect, config: TextFieldConfig) -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            bounds,
            focused: false,
            config,
            frame: 0,
            dirty: true,
        }
    }

    /// Get the current text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Set the content, moving the cursor to the end.
    pub fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
        self.cursor = self.content.len();
        self.dirty = true;
    }

    /// Check if the field is empty.
    pub const fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Set focus state.
    pub const fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        self.dirty = true;
    }

    /// Check if focused.
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Advance one animation frame for the cursor blink.
    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
        // Blink only matters while focused
        if self.focused && self.frame % 15 == 0 {
            self.dirty = true;
        }
    }

    fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        self.dirty = true;
    }

    fn insert_str(&mut self, text: &str) {
        self.content.insert_str(self.cursor, text);
        self.cursor += text.len();
        self.dirty = true;
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.content[..self.cursor]
                .char_indices()
                .last()
                .map_or(0, |(i, _)| i);
            self.content.remove(prev);
            self.cursor = prev;
            self.dirty = true;
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.content.len() {
            self.content.remove(self.cursor);
            self.dirty = true;
        }
    }

    fn cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.content[..self.cursor]
                .char_indices()
                .last()
                .map_or(0, |(i, _)| i);
            self.dirty = true;
        }
    }

    fn cursor_right(&mut self) {
        if let Some(c) = self.content[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
            self.dirty = true;
        }
    }

    const fn cursor_home(&mut self) {
        if self.cursor != 0 {
            self.cursor = 0;
            self.dirty = true;
        }
    }

    const fn cursor_end(&mut self) {
        let end = self.content.len();
        if self.cursor != end {
            self.cursor = end;
            self.dirty = true;
        }
    }

    fn render_placeholder(&self, buffer: &mut Buffer, x: u16, y: u16, width: usize) {
        for (i, c) in self.config.placeholder.chars().take(width).enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let px = x + i as u16;
            buffer.set(
                px,
                y,
                Cell::new(c)
                    .with_fg(self.config.placeholder_fg)
                    .with_bg(self.config.bg),
            );
        }
    }

    fn render_content(&self, buffer: &mut Buffer, x: u16, y: u16, width: usize) {
        let cursor_char_pos = self.content[..self.cursor].chars().count();
        let chars: Vec<char> = self.content.chars().collect();

        // Scroll the visible window so the cursor stays on screen
        let scroll = cursor_char_pos.saturating_sub(width.saturating_sub(1));
        let blink_on = self.frame % 30 < 15;

        for (i, &c) in chars.iter().skip(scroll).take(width).enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let px = x + i as u16;
            let at_cursor = self.focused && i + scroll == cursor_char_pos && blink_on;
            let cell = if at_cursor {
                Cell::new(c)
                    .with_fg(self.config.bg)
                    .with_bg(self.config.cursor_fg)
            } else {
                Cell::new(c).with_fg(self.config.fg).with_bg(self.config.bg)
            };
            buffer.set(px, y, cell);
        }

        // Block cursor past the last character
        let visual = cursor_char_pos.saturating_sub(scroll);
        if self.focused && cursor_char_pos == chars.len() && visual < width && blink_on {
            #[allow(clippy::cast_possible_truncation)]
            let cx = x + visual as u16;
            buffer.set(
                cx,
                y,
                Cell::new('█')
                    .with_fg(self.config.cursor_fg)
                    .with_bg(self.config.bg),
            );
        }
    }
}

impl Widget for TextField {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.dirty = true;
    }

    fn render(&self, buffer: &mut Buffer) {
        let x = self.bounds.x;
        let y = self.bounds.y;
        let width = self.bounds.width as usize;

        for i in 0..self.bounds.width {
            buffer.set(x + i, y, Cell::new(' ').with_bg(self.config.bg));
        }

        let prompt_len = self.config.prompt.chars().count().min(width);
        for (i, c) in self.config.prompt.chars().take(prompt_len).enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let px = x + i as u16;
            buffer.set(
                px,
                y,
                Cell::new(c)
                    .with_fg(self.config.prompt_fg)
                    .with_bg(self.config.bg),
            );
        }

        #[allow(clippy::cast_possible_truncation)]
        let text_start = x + prompt_len as u16;
        let text_width = width.saturating_sub(prompt_len);

        if self.content.is_empty() && !self.config.placeholder.is_empty() {
            self.render_placeholder(buffer, text_start, y, text_width);
        } else {
            self.render_content(buffer, text_start, y, text_width);
        }
    }

    fn handle_input(&mut self, event: &InputEvent) -> bool {
        if !self.focused {
            return false;
        }

        match event {
            InputEvent::Key { code, modifiers } => match code {
                KeyCode::Char(c) if !modifiers.control && !modifiers.alt => {
                    self.insert_char(*c);
                    true
                }
                KeyCode::Backspace => {
                    self.backspace();
                    true
                }
                KeyCode::Delete => {
                    self.delete();
                    true
                }
                KeyCode::Left => {
                    self.cursor_left();
                    true
                }
                KeyCode::Right => {
                    self.cursor_right();
                    true
                }
                KeyCode::Home => {
                    self.cursor_home();
                    true
                }
                KeyCode::End => {
                    self.cursor_end();
                    true
                }
                _ => false,
            },
            InputEvent::Paste(text) => {
                self.insert_str(text);
                true
            }
            _ => false,
        }
    }

    fn needs_redraw(&self) -> bool {
        self.dirty
    }

    fn clear_redraw(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::KeyModifiers;

    fn key(field: &mut TextField, code: KeyCode) {
        field.handle_input(&InputEvent::Key {
            code,
            modifiers: KeyModifiers::NONE,
        });
    }

    fn focused_field() -> TextField {
        let mut field = TextField::new(Rect::new(0, 0, 40, 1));
        field.set_focused(true);
        field
    }

    #[test]
    fn test_typing_appends_at_cursor() {
        let mut field = focused_field();
        key(&mut field, KeyCode::Char('H'));
        key(&mut field, KeyCode::Char('i'));
        assert_eq!(field.content(), "Hi");
        assert_eq!(field.cursor, 2);
    }

    #[test]
    fn test_backspace_removes_previous_char() {
        let mut field = focused_field();
        field.set_content("Hello");
        key(&mut field, KeyCode::Backspace);
        assert_eq!(field.content(), "Hell");
    }

    #[test]
    fn test_cursor_movement() {
        let mut field = focused_field();
        field.set_content("Hello");

        key(&mut field, KeyCode::Left);
        assert_eq!(field.cursor, 4);

        key(&mut field, KeyCode::Home);
        assert_eq!(field.cursor, 0);

        key(&mut field, KeyCode::End);
        assert_eq!(field.cursor, 5);
    }

    #[test]
    fn test_multibyte_boundaries() {
        let mut field = focused_field();
        key(&mut field, KeyCode::Char('é'));
        key(&mut field, KeyCode::Char('s'));
        assert_eq!(field.content(), "és");

        key(&mut field, KeyCode::Home);
        key(&mut field, KeyCode::Right);
        assert_eq!(field.cursor, 'é'.len_utf8());

        key(&mut field, KeyCode::Delete);
        assert_eq!(field.content(), "é");
    }

    #[test]
    fn test_paste_inserts_at_cursor() {
        let mut field = focused_field();
        field.set_content("dg");
        key(&mut field, KeyCode::Left);
        field.handle_input(&InputEvent::Paste("o".to_string()));
        assert_eq!(field.content(), "dog");
    }

    #[test]
    fn test_unfocused_ignores_input() {
        let mut field = TextField::new(Rect::new(0, 0, 40, 1));
        assert!(!field.handle_input(&InputEvent::Key {
            code: KeyCode::Char('x'),
            modifiers: KeyModifiers::NONE,
        }));
        assert_eq!(field.content(), "");
    }
}
