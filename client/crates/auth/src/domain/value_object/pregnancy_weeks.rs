//! Pregnancy Weeks Value Object
//!
//! The current pregnancy week entered during onboarding.
//!
//! ## Invariants
//! - 1 ≤ weeks ≤ 40

use derive_more::Display;
use std::fmt;

/// Minimum accepted week
pub const PREGNANCY_WEEKS_MIN: u8 = 1;

/// Maximum accepted week
pub const PREGNANCY_WEEKS_MAX: u8 = 40;

/// Error returned when pregnancy week validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PregnancyWeeksError {
    Empty,
    NotANumber,
    OutOfRange { min: u8, max: u8 },
}

impl fmt::Display for PregnancyWeeksError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Pregnancy week is empty"),
            Self::NotANumber => write!(f, "Pregnancy week must be a number"),
            Self::OutOfRange { min, max } => {
                write!(f, "Pregnancy week must be between {min} and {max}")
            }
        }
    }
}

impl std::error::Error for PregnancyWeeksError {}

/// Validated pregnancy week
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub struct PregnancyWeeks(u8);

impl PregnancyWeeks {
    pub fn new(weeks: u32) -> Result<Self, PregnancyWeeksError> {
        let range = u32::from(PREGNANCY_WEEKS_MIN)..=u32::from(PREGNANCY_WEEKS_MAX);
        if !range.contains(&weeks) {
            return Err(PregnancyWeeksError::OutOfRange {
                min: PREGNANCY_WEEKS_MIN,
                max: PREGNANCY_WEEKS_MAX,
            });
        }
        Ok(Self(weeks as u8))
    }

    /// Parse free text from the onboarding input field
    pub fn parse(input: &str) -> Result<Self, PregnancyWeeksError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PregnancyWeeksError::Empty);
        }
        let weeks = trimmed
            .parse::<u32>()
            .map_err(|_| PregnancyWeeksError::NotANumber)?;
        Self::new(weeks)
    }

    #[inline]
    pub const fn get(&self) -> u8 {
        self.0
    }
}
