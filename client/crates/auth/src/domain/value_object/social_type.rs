//! Social login provider

use serde::{Deserialize, Serialize};
use std::fmt;

/// Social login provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SocialType {
    #[default]
    Kakao,
}

impl SocialType {
    /// Wire representation
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Kakao => "KAKAO",
        }
    }
}

impl fmt::Display for SocialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
