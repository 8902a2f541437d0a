//! MySQL DDL and INSERT generation from inferred columns.

use seed_core::{ColumnSpec, ColumnType, Destination};

/// Trait for generating DDL type strings.
pub trait ToDdl {
    /// Convert a ColumnType to a DDL type string.
    fn to_ddl(&self, column_type: ColumnType) -> &'static str;

    /// Generate a complete CREATE TABLE statement with every column nullable.
    fn to_create_table(&self, destination: &Destination, columns: &[ColumnSpec]) -> String;

    /// Generate a DROP TABLE statement.
    fn to_drop_table(&self, destination: &Destination) -> String;
}

/// Quote an identifier, doubling embedded backticks.
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// MySQL DDL generator.
pub struct MySQLDdl;

impl ToDdl for MySQLDdl {
    fn to_ddl(&self, column_type: ColumnType) -> &'static str {
        match column_type {
            // Boolean - MySQL uses TINYINT(1)
            ColumnType::Bool => "TINYINT(1)",
            ColumnType::SmallInt => "SMALLINT",
            ColumnType::Int => "INT",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Real => "FLOAT",
            ColumnType::Double => "DOUBLE",
            ColumnType::Text => "TEXT",
            ColumnType::Timestamp => "DATETIME(6)",
            ColumnType::TimestampTz => "TIMESTAMP(6)",
            ColumnType::Structured => "TEXT",
        }
    }

    fn to_create_table(&self, destination: &Destination, columns: &[ColumnSpec]) -> String {
        let column_defs: Vec<String> = columns
            .iter()
            .map(|c| format!("  {} {} NULL", quote_ident(&c.name), self.to_ddl(c.column_type)))
            .collect();

        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
            destination.quoted_mysql(),
            column_defs.join(",\n")
        )
    }

    fn to_drop_table(&self, destination: &Destination) -> String {
        format!("DROP TABLE IF EXISTS {}", destination.quoted_mysql())
    }
}

impl MySQLDdl {
    /// Generate a positional INSERT for `row_count` rows of `columns`.
    pub fn to_insert(&self, destination: &Destination, columns: &[String], row_count: usize) -> String {
        let row = format!("({})", vec!["?"; columns.len()].join(", "));
        let rows = vec![row; row_count];

        format!(
            "INSERT INTO {} ({}) VALUES {}",
            destination.quoted_mysql(),
            columns
                .iter()
                .map(|c| quote_ident(c))
                .collect::<Vec<_>>()
                .join(", "),
            rows.join(", ")
        )
    }

    /// Generate a row count query.
    pub fn to_count(&self, destination: &Destination) -> String {
        format!("SELECT COUNT(*) FROM {}", destination.quoted_mysql())
    }
}
