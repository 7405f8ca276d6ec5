//! Shorthand constructors for registration failures.

use super::ArgsError;

impl ArgsError {
    /// Build an [`ArgsError::InvalidOptionName`].
    ///
    /// # Examples
    ///
    /// ```
    /// use argsmith::ArgsError;
    /// let err = ArgsError::invalid_option("xx", "short form must be one character");
    /// assert!(matches!(err, ArgsError::InvalidOptionName { .. }));
    /// ```
    #[must_use]
    pub fn invalid_option(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOptionName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Build an [`ArgsError::InvalidCommandName`].
    #[must_use]
    pub fn invalid_command(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCommandName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Build an [`ArgsError::InvalidExample`].
    #[must_use]
    pub fn invalid_example(reason: impl Into<String>) -> Self {
        Self::InvalidExample {
            reason: reason.into(),
        }
    }

    /// Returns `true` for failures raised while registering options,
    /// commands or examples, as opposed to dispatch-time failures.
    #[must_use]
    pub const fn is_registration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidOptionName { .. }
                | Self::ShortFlagCollision { .. }
                | Self::DuplicateOption { .. }
                | Self::InvalidCommandName { .. }
                | Self::DuplicateCommand { .. }
                | Self::UnknownCommand { .. }
                | Self::InvalidExample { .. }
        )
    }
}
