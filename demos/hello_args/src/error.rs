//! Error types for the `hello_args` demo.
//!
//! `DemoError` wraps registration and dispatch failures from `argsmith`
//! alongside output failures so `main` can report them through `color-eyre`.
use thiserror::Error;

/// Errors raised by the demo.
#[derive(Debug, Error)]
pub enum DemoError {
    /// Wraps failures to register or dispatch from `argsmith`.
    #[error("failed to process arguments: {0}")]
    Arguments(#[from] argsmith::ArgsError),
    /// The resolved options could not be serialised.
    #[error("failed to serialise options: {0}")]
    Serialise(#[from] serde_json::Error),
    /// Writing to stdout failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Convenient result alias for the demo.
pub type Result<T> = std::result::Result<T, DemoError>;
