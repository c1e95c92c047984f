use async_trait::async_trait;
use sqlx::{SqliteConnection, SqlitePool};

use crate::{
    domain::{Member, MemberPatch, NewMember, TShirtSize},
    error::Result,
    repository::{
        member_repository::{
            finish, fold_update_error, insert_error, not_found, row_to_member, rows_to_size_counts,
            MemberRow,
        },
        queries::Query,
        MemberRepository,
    },
};

pub struct SqliteMemberRepository {
    pool: SqlitePool,
}

impl SqliteMemberRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn insert(conn: &mut SqliteConnection, member: &NewMember) -> Result<MemberRow> {
        sqlx::query_as::<_, MemberRow>(Query::InsertMember.sql())
            .bind(&member.member_name)
            .bind(&member.phone_number)
            .bind(member.t_shirt.as_str())
            .bind(member.food_allergy.as_str())
            .bind(member.sower.as_str())
            .bind(member.ministry_position.as_str())
            .bind(member.date_birth)
            .bind(&member.email)
            .fetch_one(conn)
            .await
            .map_err(insert_error)
    }

    async fn apply_patch(conn: &mut SqliteConnection, id: i64, patch: &MemberPatch) -> Result<MemberRow> {
        sqlx::query_as::<_, MemberRow>(Query::UpdateMember.sql())
            .bind(&patch.member_name)
            .bind(&patch.phone_number)
            .bind(patch.t_shirt.map(|s| s.as_str()))
            .bind(patch.food_allergy.map(|v| v.as_str()))
            .bind(patch.sower.map(|v| v.as_str()))
            .bind(patch.ministry_position.map(|v| v.as_str()))
            .bind(patch.date_birth)
            .bind(&patch.email)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn remove(conn: &mut SqliteConnection, id: i64) -> Result<()> {
        let existing = sqlx::query(Query::ValidateIdMember.sql())
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        if existing.is_none() {
            return Err(not_found(id));
        }

        sqlx::query(Query::DeleteMember.sql())
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl MemberRepository for SqliteMemberRepository {
    async fn create(&self, member: NewMember) -> Result<Member> {
        let mut tx = self.pool.begin().await?;
        let outcome = Self::insert(&mut tx, &member).await;
        let row = finish(tx, outcome).await?;

        row_to_member(row)
    }

    async fn list_all(&self) -> Result<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(Query::GetAllMembers.sql())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(row_to_member).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Member>> {
        let row = sqlx::query_as::<_, MemberRow>(Query::GetMemberById.sql())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(row_to_member).transpose()
    }

    async fn update(&self, id: i64, patch: MemberPatch) -> Result<Member> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| fold_update_error(e.into()))?;
        let outcome = Self::apply_patch(&mut tx, id, &patch).await;
        let row = finish(tx, outcome).await.map_err(fold_update_error)?;

        row_to_member(row)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        let outcome = Self::remove(&mut tx, id).await;

        finish(tx, outcome).await
    }

    async fn count_by_t_shirt(&self) -> Result<Vec<(TShirtSize, i64)>> {
        let rows = sqlx::query_as::<_, (String, i64)>(Query::CountByTShirt.sql())
            .fetch_all(&self.pool)
            .await?;

        rows_to_size_counts(rows)
    }
}
