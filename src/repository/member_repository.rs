use chrono::{NaiveDate, NaiveDateTime};
use sqlx::{Database, FromRow, Transaction};

use crate::{
    domain::{Member, TShirtSize, YesNo},
    error::{AppError, Result},
};

// Row as returned by every SELECT/RETURNING in `sql/`.
#[derive(FromRow)]
pub(crate) struct MemberRow {
    id_member: i64,
    member_name: String,
    phone_number: String,
    t_shirt: String,
    food_allergy: String,
    sower: String,
    ministry_position: String,
    date_birth: NaiveDate,
    email: Option<String>,
    create_date: NaiveDateTime,
    update_date: NaiveDateTime,
}

pub(crate) fn row_to_member(row: MemberRow) -> Result<Member> {
    Ok(Member {
        id_member: row.id_member,
        member_name: row.member_name,
        phone_number: row.phone_number,
        t_shirt: parse_stored(&row.t_shirt)?,
        food_allergy: parse_stored::<YesNo>(&row.food_allergy)?,
        sower: parse_stored::<YesNo>(&row.sower)?,
        ministry_position: parse_stored::<YesNo>(&row.ministry_position)?,
        date_birth: row.date_birth,
        email: row.email,
        create_date: row.create_date,
        update_date: row.update_date,
    })
}

pub(crate) fn rows_to_size_counts(rows: Vec<(String, i64)>) -> Result<Vec<(TShirtSize, i64)>> {
    rows.into_iter()
        .map(|(size, count)| Ok((parse_stored::<TShirtSize>(&size)?, count)))
        .collect()
}

fn parse_stored<T>(value: &str) -> Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    value
        .parse()
        .map_err(|e| AppError::Storage(format!("Invalid value in youth_members: {}", e)))
}

pub(crate) fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Member {} not found", id))
}

/// A conflict on the composite identity becomes `DuplicateMember`; anything
/// else is passed through untouched.
pub(crate) fn insert_error(err: sqlx::Error) -> AppError {
    match err {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            tracing::debug!("Insert rejected by {:?}: {}", db.constraint(), db.message());
            AppError::DuplicateMember
        }
        other => AppError::Database(other),
    }
}

/// Update failures are reported generically; the cause only goes to the log.
pub(crate) fn fold_update_error(err: AppError) -> AppError {
    match err {
        AppError::NotFound(_) => err,
        other => {
            tracing::error!("Member update failed: {}", other);
            AppError::Storage("Unexpected error, please try again".to_string())
        }
    }
}

/// Commits when the work succeeded and rolls back otherwise, so no caller
/// sees a half-applied mutation.
pub(crate) async fn finish<DB, T>(tx: Transaction<'_, DB>, outcome: Result<T>) -> Result<T>
where
    DB: Database,
{
    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!("Rollback failed: {}", rollback_err);
            }
            Err(err)
        }
    }
}
