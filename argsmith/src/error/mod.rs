//! Error types produced while registering and dispatching arguments.

mod constructors;
mod types;

pub use types::{ArgsError, ArgsResult};
