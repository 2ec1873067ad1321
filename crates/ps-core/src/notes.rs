//! Length-bounded release notes.

use serde::Serialize;
use std::fmt;

use crate::errors::CoreError;

/// Store limit for the "what's new" text of a single locale.
pub const MAX_RELEASE_NOTES_CHARS: usize = 500;

/// Release notes that are known to fit the store limit.
///
/// Length is counted in characters, not bytes, so non-Latin notes get the
/// same budget as ASCII ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReleaseNotes(String);

impl ReleaseNotes {
    /// # Errors
    ///
    /// Returns [`CoreError::ReleaseNotesTooLong`] if `text` has more than
    /// [`MAX_RELEASE_NOTES_CHARS`] characters.
    pub fn new(text: impl Into<String>) -> Result<Self, CoreError> {
        let text = text.into();
        let length = text.chars().count();
        if length > MAX_RELEASE_NOTES_CHARS {
            return Err(CoreError::ReleaseNotesTooLong {
                length,
                max: MAX_RELEASE_NOTES_CHARS,
            });
        }
        Ok(Self(text))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReleaseNotes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exactly_the_limit() {
        let text = "a".repeat(MAX_RELEASE_NOTES_CHARS);
        let notes = ReleaseNotes::new(text.clone()).unwrap();
        assert_eq!(notes.as_str(), text);
    }

    #[test]
    fn rejects_one_over_the_limit() {
        let err = ReleaseNotes::new("a".repeat(MAX_RELEASE_NOTES_CHARS + 1)).unwrap_err();
        assert_eq!(
            err,
            CoreError::ReleaseNotesTooLong {
                length: 501,
                max: 500
            }
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 500 three-byte characters
        let text = "\u{30c6}".repeat(MAX_RELEASE_NOTES_CHARS);
        assert_eq!(text.len(), 1500);
        assert!(ReleaseNotes::new(text).is_ok());
    }

    #[test]
    fn empty_notes_are_allowed() {
        assert!(ReleaseNotes::new("").is_ok());
    }
}
