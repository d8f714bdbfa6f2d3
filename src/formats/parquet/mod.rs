//! Parquet file format support.
//!
//! This module reads Apache Parquet files from any ByteReader. It includes:
//! - ByteReader adapter for the AsyncRead+AsyncSeek interface the Parquet
//!   stream builder expects
//! - GenericParquetReader that implements the FileReader trait

mod adapter;
mod reader;

pub use reader::GenericParquetReader;
