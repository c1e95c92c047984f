#![allow(dead_code)]

use chrono::NaiveDate;
use sqlx::sqlite::SqlitePoolOptions;
use youth_registry::{
    db::DbPool,
    domain::{NewMember, TShirtSize, YesNo},
    validation::MemberInput,
};

/// A fresh in-memory store with the schema in place. A single, never
/// recycled connection keeps every query on the same database.
pub async fn memory_store() -> anyhow::Result<DbPool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    let db = DbPool::Sqlite(pool);
    db.create_schema().await?;
    Ok(db)
}

pub fn new_member(name: &str, phone: &str, t_shirt: TShirtSize) -> NewMember {
    NewMember {
        member_name: name.to_string(),
        phone_number: phone.to_string(),
        t_shirt,
        food_allergy: YesNo::No,
        sower: YesNo::Yes,
        ministry_position: YesNo::No,
        date_birth: NaiveDate::from_ymd_opt(2007, 5, 21).unwrap(),
        email: Some("joao@example.com".to_string()),
    }
}

pub fn member_input(name: &str) -> MemberInput {
    MemberInput {
        member_name: name.to_string(),
        phone_number: "(11) 94002-8922".to_string(),
        t_shirt: "M".to_string(),
        food_allergy: "Não".to_string(),
        sower: "Sim".to_string(),
        ministry_position: "Não".to_string(),
        date_birth: NaiveDate::from_ymd_opt(2006, 11, 2),
        email: Some("maria@example.com".to_string()),
    }
}
