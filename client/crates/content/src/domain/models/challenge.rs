//! Challenge Models
//!
//! The "daddy challenge": daily attendance while reading curriculum articles.

/// Challenge progress as shown on the challenge screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChallengeData {
    pub baby_daddy_name: String,
    pub how_long_day: u32,
    /// Level code (`LEVEL_ONE` …)
    pub daddy_level: String,
    /// Attendance dates (`MM/dd`)
    pub daddy_attendances: Vec<String>,
}

impl ChallengeData {
    /// Shown when the backend has no progress for the member
    pub fn empty() -> Self {
        Self::default()
    }
}
