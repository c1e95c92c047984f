use async_trait::async_trait;
use crate::domain::*;
use crate::error::Result;

pub mod member_repository;
pub mod pg_member_repository;
pub mod queries;
pub mod sqlite_member_repository;

pub use pg_member_repository::PgMemberRepository;
pub use queries::Query;
pub use sqlite_member_repository::SqliteMemberRepository;

/// Storage operations on `youth_members`. Every mutation runs in its own
/// transaction and is rolled back in full when it fails.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Fails with `DuplicateMember` when name, phone and t-shirt are
    /// already registered together.
    async fn create(&self, member: NewMember) -> Result<Member>;
    async fn list_all(&self) -> Result<Vec<Member>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Member>>;
    /// Applies only the fields set in `patch`. Missing rows are `NotFound`;
    /// any other failure is reported as `Storage`.
    async fn update(&self, id: i64, patch: MemberPatch) -> Result<Member>;
    async fn delete(&self, id: i64) -> Result<()>;
    async fn count_by_t_shirt(&self) -> Result<Vec<(TShirtSize, i64)>>;
}
