//! Actor Model: Message-passing concurrency for the widget runtime.
//!
//! Application logic is single-threaded; threads exist only at the edges,
//! each speaking to the UI loop over crossbeam channels:
//! - **Input Actor**: polls terminal events, forwards to the UI loop
//! - **Timer Actor**: single-slot delayed tasks (debounce, startup focus)
//! - **Lookup Actor**: runs the injected suggestion source off the UI loop
//! - **Ticker Actor**: periodic frames for cursor blink and the spinner
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐
//! │ Input Thread │ ─────────────────▶  │              │
//! └──────────────┘                     │              │
//! ┌──────────────┐     TimerFired      │              │
//! │ Timer Thread │ ─────────────────▶  │   UI Loop    │
//! │              │ ◀─────────────────  │  (SearchBox) │
//! └──────────────┘      TimerCmd       │              │
//! ┌──────────────┐     LookupReply     │              │
//! │Lookup Thread │ ─────────────────▶  │              │
//! │              │ ◀─────────────────  │              │
//! └──────────────┘      LookupCmd      └──────────────┘
//! ```

mod engine;
mod input;
mod lookup;
mod messages;
mod ticker;
mod timer;

pub use engine::{Engine, EngineConfig};
pub use input::InputActor;
pub use lookup::{LookupActor, SuggestionSource};
pub use messages::{
    InputEvent, KeyCode, KeyModifiers, LookupCmd, LookupReply, MouseButton, MouseEvent,
    SourceError, TimerCmd, TimerFired, TimerSlot,
};
pub use ticker::{Tick, TickerActor};
pub use timer::TimerActor;
