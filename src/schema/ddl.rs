use anyhow::{Result, anyhow};

use super::table::{ColumnDescriptor, TableSchema};
use crate::io::SourceUri;

/// Vocabulary used for column types in generated DDL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dialect {
    /// Arrow type names as-is, no translation
    #[default]
    Native,
    /// PostgreSQL type names, with `NOT NULL` on required columns
    Postgres,
}

impl Dialect {
    /// Parse dialect from string (case-insensitive)
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "native" | "arrow" => Ok(Dialect::Native),
            "postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
            _ => Err(anyhow!(
                "Unsupported dialect: {}. Supported dialects: native, postgres",
                s
            )),
        }
    }

    fn column_definition(&self, col: &ColumnDescriptor) -> String {
        match self {
            Dialect::Native => format!("{} {}", col.name, col.native_type_name()),
            Dialect::Postgres => {
                let nullable_clause = if col.nullable { "" } else { " NOT NULL" };
                format!("{} {}{}", col.name, col.sql_type(), nullable_clause)
            }
        }
    }
}

/// Generate a single-line CREATE TABLE statement
///
/// Columns appear in schema order. A schema without columns yields an empty
/// parenthesized list.
pub fn generate_ddl(table_name: &str, schema: &TableSchema, dialect: Dialect) -> String {
    let column_defs: Vec<String> = schema
        .columns
        .iter()
        .map(|col| dialect.column_definition(col))
        .collect();

    format!("CREATE TABLE {} ({})", table_name, column_defs.join(", "))
}

/// Table name for a source: its file name without the final extension
pub fn table_name_from_source(source: &SourceUri) -> Result<String> {
    source
        .file_stem()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("Cannot derive a table name from '{}'", source))
}
