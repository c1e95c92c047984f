use std::sync::Arc;

use crate::{
    domain::*,
    error::{AppError, Result},
    repository::MemberRepository,
    validation::{MemberInput, MemberPatchInput},
};

/// Registration use cases. Input is validated here, before any storage
/// access; the repository only ever sees typed, checked values.
pub struct MemberService {
    repo: Arc<dyn MemberRepository>,
    empty_list_is_error: bool,
}

impl MemberService {
    pub fn new(repo: Arc<dyn MemberRepository>, empty_list_is_error: bool) -> Self {
        Self { repo, empty_list_is_error }
    }

    pub async fn create_member(&self, input: MemberInput) -> Result<Member> {
        let new_member = input.into_new_member()?;

        let member = self.repo.create(new_member).await?;

        tracing::info!("Registered member {}", member.id_member);
        Ok(member)
    }

    /// All members ordered by id. An empty registry is reported as
    /// `NotFound` unless `empty_list_is_error` is off.
    pub async fn list_members(&self) -> Result<Vec<Member>> {
        let members = self.repo.list_all().await?;

        if members.is_empty() && self.empty_list_is_error {
            return Err(AppError::NotFound("No members registered".to_string()));
        }

        Ok(members)
    }

    pub async fn get_member(&self, id: i64) -> Result<Member> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member {} not found", id)))
    }

    pub async fn update_member(&self, id: i64, input: MemberPatchInput) -> Result<Member> {
        let patch = input.into_patch()?;

        let member = self.repo.update(id, patch).await?;

        tracing::info!("Updated member {}", id);
        Ok(member)
    }

    pub async fn delete_member(&self, id: i64) -> Result<()> {
        self.repo.delete(id).await?;

        tracing::info!("Removed member {}", id);
        Ok(())
    }

    pub async fn summary(&self) -> Result<MemberSummary> {
        let counts = self.repo.count_by_t_shirt().await?;
        Ok(MemberSummary::from_counts(&counts))
    }
}
