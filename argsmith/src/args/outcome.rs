//! What a parse produced.

use std::io::{self, Write};

use crate::config::Config;
use crate::dispatch::ChildExit;

/// Result of [`Args::try_parse`](crate::Args::try_parse).
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    /// No command matched; the resolved options.
    Options(Config),
    /// An in-process command handler ran.
    Handled {
        /// Primary name of the command.
        command: String,
    },
    /// An external command binary ran and exited.
    Exited(ChildExit),
    /// Text to show the user before exiting successfully.
    Display(DisplayRequest),
}

impl Parsed {
    /// The resolved options, when no command ran and nothing is to be shown.
    #[must_use]
    pub fn into_config(self) -> Option<Config> {
        match self {
            Self::Options(config) => Some(config),
            _ => None,
        }
    }

    /// The display request, if this outcome is one.
    #[must_use]
    pub const fn as_display(&self) -> Option<&DisplayRequest> {
        match self {
            Self::Display(request) => Some(request),
            _ => None,
        }
    }
}

/// Returns `true` when `parsed` asks for help, version or unknown-option
/// output rather than carrying a result.
///
/// ```
/// use argsmith::{Args, is_display_request};
/// let mut args = Args::new();
/// let parsed = args.try_parse(["node", "tool", "--help"])?;
/// assert!(is_display_request(&parsed));
/// # Ok::<(), argsmith::ArgsError>(())
/// ```
#[must_use]
pub const fn is_display_request(parsed: &Parsed) -> bool {
    matches!(parsed, Parsed::Display(_))
}

/// Why text is being displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayKind {
    /// Help was requested by flag or command.
    Help,
    /// The version flag was given.
    Version,
    /// The author listing was requested.
    Authors,
    /// A flag matched no option.
    UnknownOption {
        /// The flag as typed, without dashes.
        option: String,
        /// Long name of the closest option, if one was close enough.
        suggestion: Option<String>,
    },
}

/// Text a parse wants shown, followed by a successful exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRequest {
    kind: DisplayKind,
    text: String,
}

impl DisplayRequest {
    pub(crate) const fn new(kind: DisplayKind, text: String) -> Self {
        Self { kind, text }
    }

    /// Why the text is shown.
    #[must_use]
    pub const fn kind(&self) -> &DisplayKind {
        &self.kind
    }

    /// The rendered text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Write the text to stdout.
    ///
    /// # Errors
    ///
    /// Returns the I/O error when stdout cannot be written.
    pub fn print(&self) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(self.text.as_bytes())?;
        if !self.text.ends_with('\n') {
            out.write_all(b"\n")?;
        }
        out.flush()
    }

    /// Print the text and exit with status 0.
    pub fn exit(&self) -> ! {
        if let Err(err) = self.print() {
            tracing::warn!(error = %err, "failed to write output");
        }
        std::process::exit(0)
    }
}
