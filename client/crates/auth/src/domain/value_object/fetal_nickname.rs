//! Fetal Nickname Value Object
//!
//! The nickname parents give the baby during onboarding. Shown on the today,
//! curriculum and challenge screens.
//!
//! ## Invariants
//! - NFC normalized, surrounding whitespace trimmed
//! - Length: 1〜10 characters (after normalization)

use derive_more::Display;
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Maximum length in characters
pub const FETAL_NICKNAME_MAX_LENGTH: usize = 10;

/// Error returned when nickname validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetalNicknameError {
    Empty,
    TooLong { max: usize, actual: usize },
}

impl fmt::Display for FetalNicknameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Nickname is empty"),
            Self::TooLong { max, actual } => {
                write!(f, "Nickname must be at most {max} characters (got {actual})")
            }
        }
    }
}

impl std::error::Error for FetalNicknameError {}

/// Validated fetal nickname
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct FetalNickname(String);

impl FetalNickname {
    pub fn new(input: &str) -> Result<Self, FetalNicknameError> {
        // Korean input methods may produce decomposed jamo; compose before counting
        let normalized: String = input.trim().nfc().collect();
        let length = normalized.chars().count();

        if length == 0 {
            return Err(FetalNicknameError::Empty);
        }
        if length > FETAL_NICKNAME_MAX_LENGTH {
            return Err(FetalNicknameError::TooLong {
                max: FETAL_NICKNAME_MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_and_accept() {
        let nickname = FetalNickname::new("  콩콩이 ").unwrap();
        assert_eq!(nickname.as_str(), "콩콩이");
        assert_eq!(nickname.to_string(), "콩콩이");
    }

    #[test]
    fn test_decomposed_input_is_composed() {
        // "콩" as conjoining jamo: 3 code points, 1 character after NFC
        let decomposed = "\u{110F}\u{1169}\u{11BC}";
        let nickname = FetalNickname::new(decomposed).unwrap();
        assert_eq!(nickname.as_str(), "콩");
        assert_eq!(nickname.as_str().chars().count(), 1);
    }

    #[test]
    fn test_rejects_empty_and_long() {
        assert_eq!(FetalNickname::new("   "), Err(FetalNicknameError::Empty));
        assert_eq!(
            FetalNickname::new("abcdefghijk"),
            Err(FetalNicknameError::TooLong { max: 10, actual: 11 })
        );
        assert!(FetalNickname::new("abcdefghij").is_ok());
    }
}
