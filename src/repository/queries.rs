//! SQL text for every repository operation, compiled into the binary.
//!
//! Statements use `$N` placeholders, which both the Postgres and the SQLite
//! drivers bind positionally.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    InsertMember,
    GetAllMembers,
    GetMemberById,
    UpdateMember,
    ValidateIdMember,
    DeleteMember,
    CountByTShirt,
    Ping,
}

impl Query {
    pub fn sql(self) -> &'static str {
        match self {
            Query::InsertMember => include_str!("../../sql/insert_member.sql"),
            Query::GetAllMembers => include_str!("../../sql/get_all_members.sql"),
            Query::GetMemberById => include_str!("../../sql/get_member_by_id.sql"),
            Query::UpdateMember => include_str!("../../sql/update_member.sql"),
            Query::ValidateIdMember => include_str!("../../sql/validate_id_member.sql"),
            Query::DeleteMember => include_str!("../../sql/delete_member.sql"),
            Query::CountByTShirt => include_str!("../../sql/count_by_t_shirt.sql"),
            Query::Ping => include_str!("../../sql/ping.sql"),
        }
    }
}
