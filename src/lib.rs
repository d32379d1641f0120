//! # Typeahead
//!
//! A debounced typeahead search box for terminal UIs.
//!
//! Typeahead provides a single interactive widget — [`SearchBox`] — that
//! collects keystrokes, requests suggestion lists from an injected lookup
//! service, displays them, and reports a final search term to its caller.
//! The temporal logic (debounced fetching, startup auto-search, empty-input
//! validation) lives entirely in the widget; everything around it is
//! plumbing.
//!
//! ## Core Concepts
//!
//! - **Widgets render into a cell buffer**: passive components drawing
//!   styled cells, composed by the application loop
//! - **Actor model**: isolated threads for input polling, one-shot timers,
//!   suggestion lookups, and animation ticks, all speaking over channels
//! - **Upstream query ownership**: the canonical text value lives with the
//!   caller; the widget mirrors it and notifies through [`SearchReporter`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use typeahead::{Engine, SearchBox, SearchBoxConfig, Rect};
//!
//! let mut engine = Engine::new()?;
//! let search = SearchBox::new(
//!     Rect::new(2, 2, 60, 10),
//!     SearchBoxConfig::default(),
//!     "en",
//!     timer.commander(),
//!     lookup.commander(),
//!     reporter,
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod buffer;
pub mod error;
pub mod layout;
pub mod terminal;
pub mod widget;

// Re-exports for convenience
pub use actor::{
    Engine, EngineConfig, InputEvent, KeyCode, KeyModifiers, LookupActor, LookupCmd, LookupReply,
    SourceError, SuggestionSource, Tick, TickerActor, TimerActor, TimerCmd, TimerFired, TimerSlot,
};
pub use buffer::{Buffer, Cell, Modifiers, Rgb};
pub use error::{Result, TypeaheadError};
pub use layout::Rect;
pub use widget::{SearchBox, SearchBoxConfig, SearchReporter, TextField, TextFieldConfig, Widget};
