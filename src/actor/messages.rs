//! Message types for actor communication.
//!
//! These enums define the protocol between the actor threads and the
//! single-threaded UI loop.

use std::time::Duration;

/// Key codes for keyboard input.
///
/// A simplified subset of crossterm's `KeyCode`, covering what a search
/// widget consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Enter/Return key.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Tab key.
    Tab,
    /// Escape key.
    Esc,
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    /// Shift key held.
    pub shift: bool,
    /// Control key held.
    pub control: bool,
    /// Alt/Option key held.
    pub alt: bool,
}

impl KeyModifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    /// Check if any modifier is active.
    pub const fn any(&self) -> bool {
        self.shift || self.control || self.alt
    }
}

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button.
    Middle,
}

/// Mouse event details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
    /// Mouse button involved.
    pub button: MouseButton,
    /// Key modifiers held during the mouse event.
    pub modifiers: KeyModifiers,
}

/// Events from the input thread.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// A key was pressed.
    Key {
        /// The key code.
        code: KeyCode,
        /// Modifiers held during keypress.
        modifiers: KeyModifiers,
    },

    /// Mouse button pressed.
    MouseDown(MouseEvent),

    /// Terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Paste event (bracketed paste).
    Paste(String),

    /// Input thread encountered an error.
    Error(String),

    /// Input thread is shutting down.
    Shutdown,
}

/// The deadline slots managed by the timer actor.
///
/// Each slot holds at most one pending deadline; arming a slot replaces
/// whatever was pending in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerSlot {
    /// One-shot startup delay: claim focus, auto-search a pre-filled query.
    Startup,
    /// The shared debounce window for suggestion fetches.
    Debounce,
}

/// Commands sent to the timer actor.
#[derive(Debug, Clone, Copy)]
pub enum TimerCmd {
    /// Arm (or re-arm) a slot to fire after `delay`.
    Arm {
        /// The slot to arm.
        slot: TimerSlot,
        /// Delay until the slot fires.
        delay: Duration,
    },
    /// Clear a slot's pending deadline without firing it.
    Cancel {
        /// The slot to clear.
        slot: TimerSlot,
    },
}

/// A slot's deadline elapsed without being re-armed or cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    /// The slot that fired.
    pub slot: TimerSlot,
}

/// Opaque error type produced by a suggestion source.
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Commands sent to the lookup actor.
#[derive(Debug)]
pub enum LookupCmd {
    /// Run one suggestion fetch.
    Fetch {
        /// The query text at dispatch time.
        query: String,
        /// Locale/site identifier scoping the lookup.
        locale: String,
    },
}

/// A settled suggestion fetch, successful or not.
///
/// The originating query is echoed for logging; the widget applies every
/// reply unconditionally, so a reply for a superseded query still lands.
#[derive(Debug)]
pub struct LookupReply {
    /// The query this fetch was dispatched with.
    pub query: String,
    /// The ordered suggestion list, or the source's opaque failure.
    pub result: Result<Vec<String>, SourceError>,
}
