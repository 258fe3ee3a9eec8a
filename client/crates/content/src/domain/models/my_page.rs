//! My Page Models

/// Member profile for the my-page screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MyPageProfile {
    pub baby_nickname: String,
    pub badge_image: String,
    /// Push notifications enabled
    pub is_alarm: bool,
}
