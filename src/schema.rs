//! Storage shape of the `youth_members` table.
//!
//! The table is declared once as data and rendered to DDL for whichever
//! backend the process runs against. Field widths declared here are the
//! same ones the validation layer enforces.

pub const MEMBER_NAME_MIN: u64 = 3;
pub const MEMBER_NAME_MAX: u64 = 255;
pub const PHONE_NUMBER_MIN: u64 = 10;
pub const PHONE_NUMBER_MAX: u64 = 15;
pub const EMAIL_MAX: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    Sqlite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Storage-generated surrogate key.
    Identity,
    VarChar(u64),
    Date,
    /// Timestamp defaulting to the time of insert.
    Timestamp,
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
    pub nullable: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct UniqueConstraint {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
    pub unique: &'static [UniqueConstraint],
}

const fn column(name: &'static str, ty: ColumnType, nullable: bool) -> ColumnDef {
    ColumnDef { name, ty, nullable }
}

pub const YOUTH_MEMBERS: TableDef = TableDef {
    name: "youth_members",
    columns: &[
        column("id_member", ColumnType::Identity, false),
        column("member_name", ColumnType::VarChar(MEMBER_NAME_MAX), false),
        column("phone_number", ColumnType::VarChar(PHONE_NUMBER_MAX), false),
        column("t_shirt", ColumnType::VarChar(2), false),
        column("food_allergy", ColumnType::VarChar(3), false),
        column("sower", ColumnType::VarChar(3), false),
        column("ministry_position", ColumnType::VarChar(3), false),
        column("date_birth", ColumnType::Date, false),
        column("email", ColumnType::VarChar(EMAIL_MAX), true),
        column("create_date", ColumnType::Timestamp, false),
        column("update_date", ColumnType::Timestamp, false),
    ],
    unique: &[UniqueConstraint {
        name: "uq_member_composite",
        columns: &["member_name", "phone_number", "t_shirt"],
    }],
};

impl ColumnType {
    fn sql(&self, dialect: Dialect) -> String {
        match (self, dialect) {
            (ColumnType::Identity, Dialect::Postgres) => "BIGSERIAL PRIMARY KEY".to_string(),
            (ColumnType::Identity, Dialect::Sqlite) => "INTEGER PRIMARY KEY AUTOINCREMENT".to_string(),
            (ColumnType::VarChar(width), _) => format!("VARCHAR({})", width),
            (ColumnType::Date, _) => "DATE".to_string(),
            (ColumnType::Timestamp, _) => "TIMESTAMP".to_string(),
        }
    }
}

impl ColumnDef {
    fn sql(&self, dialect: Dialect) -> String {
        let mut def = format!("{} {}", self.name, self.ty.sql(dialect));
        // The primary key clause already implies NOT NULL.
        if !self.nullable && self.ty != ColumnType::Identity {
            def.push_str(" NOT NULL");
        }
        if self.ty == ColumnType::Timestamp {
            def.push_str(" DEFAULT CURRENT_TIMESTAMP");
        }
        def
    }
}

impl TableDef {
    pub fn create_table_sql(&self, dialect: Dialect) -> String {
        let mut lines: Vec<String> = self.columns.iter().map(|c| c.sql(dialect)).collect();
        for constraint in self.unique {
            lines.push(format!(
                "CONSTRAINT {} UNIQUE ({})",
                constraint.name,
                constraint.columns.join(", ")
            ));
        }

        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
            self.name,
            lines.join(",\n    ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postgres_ddl_declares_composite_identity() {
        let ddl = YOUTH_MEMBERS.create_table_sql(Dialect::Postgres);
        assert!(ddl.starts_with("CREATE TABLE IF NOT EXISTS youth_members ("));
        assert!(ddl.contains("id_member BIGSERIAL PRIMARY KEY,"));
        assert!(ddl.contains("member_name VARCHAR(255) NOT NULL"));
        assert!(ddl.contains("CONSTRAINT uq_member_composite UNIQUE (member_name, phone_number, t_shirt)"));
    }

    #[test]
    fn sqlite_ddl_uses_autoincrement_key() {
        let ddl = YOUTH_MEMBERS.create_table_sql(Dialect::Sqlite);
        assert!(ddl.contains("id_member INTEGER PRIMARY KEY AUTOINCREMENT,"));
        assert!(ddl.contains("update_date TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP"));
    }

    #[test]
    fn email_is_the_only_nullable_column() {
        let nullable: Vec<_> = YOUTH_MEMBERS
            .columns
            .iter()
            .filter(|c| c.nullable)
            .map(|c| c.name)
            .collect();
        assert_eq!(nullable, vec!["email"]);

        let ddl = YOUTH_MEMBERS.create_table_sql(Dialect::Postgres);
        assert!(ddl.contains("email VARCHAR(50),"));
    }

    #[test]
    fn unique_columns_exist_in_table() {
        let names: Vec<_> = YOUTH_MEMBERS.columns.iter().map(|c| c.name).collect();
        for constraint in YOUTH_MEMBERS.unique {
            for col in constraint.columns {
                assert!(names.contains(col), "{} missing", col);
            }
        }
    }
}
