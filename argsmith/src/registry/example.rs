//! Usage examples shown at the end of help output.

use crate::error::{ArgsError, ArgsResult};

/// A usage example: the command line and what it does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    usage: String,
    description: String,
}

impl Example {
    /// Build an example, rejecting blank usage or description text.
    ///
    /// # Errors
    ///
    /// Returns [`ArgsError::InvalidExample`] when either part is blank.
    pub fn new(usage_text: impl Into<String>, text: impl Into<String>) -> ArgsResult<Self> {
        let example = Self {
            usage: usage_text.into(),
            description: text.into(),
        };
        if example.usage.trim().is_empty() {
            return Err(ArgsError::invalid_example("usage text is missing"));
        }
        if example.description.trim().is_empty() {
            return Err(ArgsError::invalid_example("description is missing"));
        }
        Ok(example)
    }

    /// Command line being demonstrated.
    #[must_use]
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// What the command line does.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}
