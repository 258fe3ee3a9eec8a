//! Value Objects

pub mod fetal_nickname;
pub mod pregnancy_weeks;
pub mod social_type;

pub use fetal_nickname::{FetalNickname, FetalNicknameError};
pub use pregnancy_weeks::{PregnancyWeeks, PregnancyWeeksError};
pub use social_type::SocialType;
