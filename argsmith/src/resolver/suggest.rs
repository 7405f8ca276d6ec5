//! Fuzzy matching of unknown flags against registered options.

use strsim::normalized_levenshtein;

use crate::registry::{ArgOption, Registry};

/// Minimum similarity for a suggestion, on a 0 to 1 scale.
pub const SUGGESTION_THRESHOLD: f64 = 0.5;

/// Closest registered option to `unknown`, if any is similar enough.
///
/// Every usage form of every option is scored with normalised Levenshtein
/// similarity. Ties keep the earliest registration.
///
/// ```
/// use argsmith::{Args, suggest};
/// let mut args = Args::new();
/// args.option("port", "Port")?;
/// let registry = args.registry();
/// assert_eq!(suggest("potr", registry).map(|o| o.long()), Some("port"));
/// assert!(suggest("zzzzzz", registry).is_none());
/// # Ok::<(), argsmith::ArgsError>(())
/// ```
#[must_use]
pub fn suggest<'r>(unknown: &str, registry: &'r Registry) -> Option<&'r ArgOption> {
    let mut best: Option<(&ArgOption, f64)> = None;
    for option in registry.options() {
        for form in option.forms() {
            let score = normalized_levenshtein(unknown, form);
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((option, score));
            }
        }
    }
    best.filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .map(|(option, _)| option)
}
