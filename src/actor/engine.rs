//! Engine: Terminal session and channel hub for the widget runtime.
//!
//! The Engine claims the terminal, spawns the input actor, and owns the
//! frame buffer widgets render into. Applications build their own event
//! loop around the channels it exposes (see `demos/wiki_search.rs`).

use crossbeam_channel::{bounded, Receiver};
use std::time::Duration;

use super::input::InputActor;
use super::messages::InputEvent;
use crate::buffer::Buffer;
use crate::error::Result;
use crate::terminal::Screen;

/// Configuration for the Engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Input poll timeout (bounds input-thread shutdown latency).
    pub input_poll_timeout: Duration,
    /// Whether to enable mouse capture. Pointer selection of suggestions
    /// requires it.
    pub enable_mouse: bool,
    /// Whether to use the alternate screen buffer.
    pub alternate_screen: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            input_poll_timeout: Duration::from_millis(10),
            enable_mouse: true,
            alternate_screen: true,
        }
    }
}

/// The terminal session: screen, input actor, and frame buffer.
pub struct Engine {
    input_rx: Receiver<InputEvent>,
    input_actor: Option<InputActor>,
    screen: Screen,
    buffer: Buffer,
    width: u16,
    height: u16,
    running: bool,
}

impl Engine {
    /// Create a new engine with default configuration.
    ///
    /// # Errors
    /// Returns an error if terminal setup fails (raw mode, alternate
    /// screen, mouse capture).
    pub fn new() -> Result<Self> {
        Self::with_config(&EngineConfig::default())
    }

    /// Create a new engine with custom configuration.
    ///
    /// # Errors
    /// Returns an error if terminal setup fails.
    pub fn with_config(config: &EngineConfig) -> Result<Self> {
        let (width, height) = Screen::size()?;
        let screen = Screen::new(config.alternate_screen, config.enable_mouse)?;

        let (input_tx, input_rx) = bounded::<InputEvent>(64);
        let input_actor = InputActor::spawn(input_tx, config.input_poll_timeout);

        Ok(Self {
            input_rx,
            input_actor: Some(input_actor),
            screen,
            buffer: Buffer::new(width, height),
            width,
            height,
            running: true,
        })
    }

    /// Get the terminal width.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the terminal height.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get a reference to the frame buffer.
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Get a mutable reference to the frame buffer.
    pub fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    /// Get the input receiver for event-driven loops.
    pub const fn input_receiver(&self) -> &Receiver<InputEvent> {
        &self.input_rx
    }

    /// Check if the engine is still running.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the engine.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Handle a terminal resize: grows the buffer, contents reset.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.buffer.resize(width, height);
    }

    /// Present the current frame buffer to the terminal.
    pub fn present(&mut self) -> Result<()> {
        self.screen.present(&self.buffer)
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if let Some(actor) = self.input_actor.take() {
            actor.join();
        }
        // Screen restores the terminal in its own Drop
    }
}
