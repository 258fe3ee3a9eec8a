//! Onboarding Draft
//!
//! Accumulates the signup fields collected across the onboarding pages.
//! Signup only ever sees a [`UserOnboardingModel`], whose fields are all
//! present, so a partially filled request cannot be sent.

use kernel::{NetworkError, NetworkResult, OptionExt};

use crate::domain::value_object::{FetalNickname, PregnancyWeeks};

/// Mutable onboarding accumulator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingDraft {
    pub kakao_access_token: Option<String>,
    pub pregnancy_weeks: Option<PregnancyWeeks>,
    pub fetal_nickname: Option<FetalNickname>,
}

impl OnboardingDraft {
    /// Start a draft for a Kakao account that is not registered yet
    pub fn for_kakao_token(kakao_access_token: impl Into<String>) -> Self {
        Self {
            kakao_access_token: Some(kakao_access_token.into()),
            ..Default::default()
        }
    }

    /// Freeze the draft
    ///
    /// Fails with `BadCasting` when any field is missing.
    pub fn finalize(&self) -> NetworkResult<UserOnboardingModel> {
        let model = UserOnboardingModel {
            kakao_access_token: self.kakao_access_token.clone().ok_or_bad_casting()?,
            pregnancy_weeks: self.pregnancy_weeks.ok_or_bad_casting()?,
            fetal_nickname: self.fetal_nickname.clone().ok_or_bad_casting()?,
        };
        if model.kakao_access_token.is_empty() {
            return Err(NetworkError::BadCasting);
        }
        Ok(model)
    }
}

/// Complete signup payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserOnboardingModel {
    pub kakao_access_token: String,
    pub pregnancy_weeks: PregnancyWeeks,
    pub fetal_nickname: FetalNickname,
}
