use arrow::datatypes::{DataType, Schema};

use super::sql_type::SqlType;

/// A column in a table schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, data_type: DataType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable,
        }
    }

    /// Type name exactly as Arrow renders it (`Int64`, `Utf8`, ...)
    pub fn native_type_name(&self) -> String {
        self.data_type.to_string()
    }

    pub fn sql_type(&self) -> SqlType {
        SqlType::from_arrow(&self.data_type)
    }
}

/// Ordered collection of columns read from a file's metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSchema {
    pub columns: Vec<ColumnDescriptor>,
}

impl TableSchema {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// One `name  type` line per column, names padded to the widest one
    ///
    /// Every column is listed; wide tables are never elided.
    pub fn type_listing(&self) -> String {
        let width = self
            .columns
            .iter()
            .map(|col| col.name.chars().count())
            .max()
            .unwrap_or(0);

        self.columns
            .iter()
            .map(|col| {
                format!(
                    "{:<width$}  {}",
                    col.name,
                    col.native_type_name(),
                    width = width
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Top-level fields only; nested children are part of their parent's type
impl From<&Schema> for TableSchema {
    fn from(schema: &Schema) -> Self {
        let columns = schema
            .fields()
            .iter()
            .map(|field| {
                ColumnDescriptor::new(
                    field.name().clone(),
                    field.data_type().clone(),
                    field.is_nullable(),
                )
            })
            .collect();

        TableSchema { columns }
    }
}
