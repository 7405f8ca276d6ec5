//! Library facade for the `hello_args` demo so integration tests can reuse
//! the command-line definition.

pub mod cli;
pub mod error;
