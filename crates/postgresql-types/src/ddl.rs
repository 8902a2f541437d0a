//! PostgreSQL DDL and INSERT generation from inferred columns.

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

/// Quote an identifier, doubling embedded double quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// PostgreSQL DDL generator.
pub struct PostgreSQLDdl;

impl ToDdl for PostgreSQLDdl {
    fn to_ddl(&self, column_type: ColumnType) -> &'static str {
        match column_type {
            ColumnType::Bool => "BOOLEAN",
            ColumnType::SmallInt => "SMALLINT",
            ColumnType::Int => "INTEGER",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Real => "REAL",
            ColumnType::Double => "DOUBLE PRECISION",
            ColumnType::Text => "TEXT",
            ColumnType::Timestamp => "TIMESTAMP",
            ColumnType::TimestampTz => "TIMESTAMPTZ",
            // Nested values arrive as structured text
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
            destination.quoted_postgres(),
            column_defs.join(",\n")
        )
    }

    fn to_drop_table(&self, destination: &Destination) -> String {
        format!("DROP TABLE IF EXISTS {}", destination.quoted_postgres())
    }
}

impl PostgreSQLDdl {
    /// Generate a parameterized INSERT for `row_count` rows of `columns`.
    ///
    /// Placeholders are numbered row by row: `($1, $2), ($3, $4)`.
    pub fn to_insert(&self, destination: &Destination, columns: &[String], row_count: usize) -> String {
        let col_count = columns.len();
        let rows: Vec<String> = (0..row_count)
            .map(|row| {
                let placeholders: Vec<String> = (1..=col_count)
                    .map(|col| format!("${}", row * col_count + col))
                    .collect();
                format!("({})", placeholders.join(", "))
            })
            .collect();

        format!(
            "INSERT INTO {} ({}) VALUES {}",
            destination.quoted_postgres(),
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
        format!("SELECT COUNT(*) FROM {}", destination.quoted_postgres())
    }
}
