//! Schema layer - column descriptors, SQL type mapping and DDL generation

pub mod ddl;
pub mod sql_type;
pub mod table;

pub use ddl::{Dialect, generate_ddl, table_name_from_source};
pub use sql_type::SqlType;
pub use table::{ColumnDescriptor, TableSchema};
