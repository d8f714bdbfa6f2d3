//! High-level runner API for the schema tools.
//!
//! This module hides source parsing, S3 client setup and Parquet decoding
//! behind two calls, one per tool. It is the primary API for the CLI.

use anyhow::{Context, Result};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use tracing::info;

use crate::formats::ReaderFactory;
use crate::io::SourceUri;
use crate::schema::{generate_ddl, table_name_from_source};

pub use crate::error::{SourceError, SourceErrorKind, source_error_kind};
pub use crate::formats::FileMetadata;
pub use crate::io::{S3ConnectArgs, S3ConnectArgsBuilder};
pub use crate::schema::{ColumnDescriptor, Dialect, SqlType, TableSchema};

/// Arguments for printing a CREATE TABLE statement
#[derive(Debug, Clone)]
pub struct DdlArgs {
    /// Local path, file:// URI or s3://bucket/key
    pub source_uri: String,
    /// Overrides the table name derived from the file name
    pub table: Option<String>,
    pub dialect: Dialect,
    /// Only used when the source is an S3 URI
    pub s3: S3ConnectArgs,
}

/// Arguments for listing the column types of a file
#[derive(Debug, Clone)]
pub struct InspectArgs {
    pub source_uri: String,
    /// Also read this many rows from the start of the file
    pub head: Option<usize>,
    pub s3: S3ConnectArgs,
}

/// Everything the inspector learned about a file
#[derive(Debug)]
pub struct Inspection {
    pub schema: TableSchema,
    pub metadata: FileMetadata,
    pub head: Option<Vec<RecordBatch>>,
}

impl Inspection {
    /// Text printed by the inspector: the type listing, then the rows if any
    ///
    /// The rows are preceded by a line saying how much of the file they cover.
    pub fn render(&self) -> Result<String> {
        let mut out = self.schema.type_listing();

        if let Some(ref batches) = self.head {
            let shown: usize = batches.iter().map(RecordBatch::num_rows).sum();
            let table = pretty_format_batches(batches).context("Failed to format rows")?;
            out.push_str("\n\n");
            out.push_str(&format!(
                "Showing {} of {} rows ({} row groups, {} bytes)\n",
                shown,
                self.metadata.num_rows,
                self.metadata.num_row_groups,
                self.metadata.file_size_bytes
            ));
            out.push_str(&table.to_string());
        }

        Ok(out)
    }
}

/// Read a file's schema and build its CREATE TABLE statement
///
/// # Example
///
/// ```no_run
/// use parquet_ddl::runner::{DdlArgs, Dialect, S3ConnectArgsBuilder, run_ddl};
///
/// # async fn example() -> anyhow::Result<()> {
/// let args = DdlArgs {
///     source_uri: "flights/flights.parquet".to_string(),
///     table: None,
///     dialect: Dialect::Native,
///     s3: S3ConnectArgsBuilder::default().build()?,
/// };
///
/// println!("{}", run_ddl(args).await?);
/// # Ok(())
/// # }
/// ```
pub async fn run_ddl(args: DdlArgs) -> Result<String> {
    let source = SourceUri::parse(&args.source_uri)?;

    // Fail on a bad name before touching the source
    let table_name = match args.table {
        Some(table) => table,
        None => table_name_from_source(&source)?,
    };

    let factory = ReaderFactory::new(args.s3);
    let reader = factory
        .create_reader(&source)
        .await
        .with_context(|| format!("Failed to open {}", source))?;

    let schema = TableSchema::from(&*reader.schema());
    info!(table = %table_name, columns = schema.len(), "Generating DDL");

    Ok(generate_ddl(&table_name, &schema, args.dialect))
}

/// Read a file's schema, and optionally its first rows
pub async fn run_inspect(args: InspectArgs) -> Result<Inspection> {
    let source = SourceUri::parse(&args.source_uri)?;

    let factory = ReaderFactory::new(args.s3);
    let reader = factory
        .create_reader(&source)
        .await
        .with_context(|| format!("Failed to open {}", source))?;

    let schema = TableSchema::from(&*reader.schema());
    let metadata = reader.metadata();

    let head = match args.head {
        Some(limit) => Some(
            reader
                .read_rows(Some(limit))
                .await
                .with_context(|| format!("Failed to read rows from {}", source))?,
        ),
        None => None,
    };

    Ok(Inspection {
        schema,
        metadata,
        head,
    })
}
