//! Error types for the typeahead runtime.
//!
//! Suggestion-fetch failures are deliberately NOT represented here: the
//! search box swallows them and degrades to an empty suggestion list (see
//! [`crate::actor::SuggestionSource`]). This enum covers the ambient
//! failures an embedding application must handle — terminal setup and
//! actor plumbing.

use thiserror::Error;

/// Main error type for typeahead operations.
#[derive(Error, Debug)]
pub enum TypeaheadError {
    /// Terminal setup, drawing, or teardown failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// An actor channel disconnected while the runtime was still live.
    #[error("actor channel disconnected: {0}")]
    ChannelClosed(&'static str),
}

/// Result type alias for typeahead operations.
pub type Result<T> = std::result::Result<T, TypeaheadError>;
