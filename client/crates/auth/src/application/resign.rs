//! Resign Use Case
//!
//! Deletes the member account and ends the session.

use std::sync::Arc;

use crate::application::session::Session;
use crate::domain::api::MemberApi;
use crate::error::AuthResult;

/// Resign use case
pub struct ResignUseCase<M>
where
    M: MemberApi,
{
    api: Arc<M>,
    session: Arc<Session>,
}

impl<M> ResignUseCase<M>
where
    M: MemberApi,
{
    pub fn new(api: Arc<M>, session: Arc<Session>) -> Self {
        Self { api, session }
    }

    pub async fn execute(&self) -> AuthResult<()> {
        self.api.resign().await?;
        tracing::info!("Member resigned");
        self.session.end()
    }
}
