//! Parquet file reader implementation.

use anyhow::{Context, Result};
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use futures::TryStreamExt;
use parquet::arrow::async_reader::ParquetRecordBatchStreamBuilder;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::SourceError;
use crate::formats::reader::{FileMetadata, FileReader};
use crate::io::ByteReader;

use super::adapter::ByteReaderAdapter;

/// Parquet file reader that works with any ByteReader implementation
///
/// Only the footer is read on construction; row data is fetched on demand.
pub struct GenericParquetReader<R: ByteReader> {
    reader: Arc<R>,
    schema: SchemaRef,
    metadata: FileMetadata,
}

impl<R: ByteReader + 'static> GenericParquetReader<R> {
    /// Create a new ParquetReader by reading the file metadata
    pub async fn new(reader: R) -> Result<Self> {
        let reader = Arc::new(reader);
        let (builder, file_size_bytes) = Self::open(&reader).await?;

        let parquet_metadata = builder.metadata();
        let metadata = FileMetadata {
            file_size_bytes,
            num_rows: parquet_metadata.file_metadata().num_rows() as u64,
            num_row_groups: parquet_metadata.num_row_groups(),
        };
        let schema = Arc::clone(builder.schema());

        info!(
            columns = schema.fields().len(),
            rows = metadata.num_rows,
            row_groups = metadata.num_row_groups,
            bytes = metadata.file_size_bytes,
            "Read Parquet footer"
        );

        Ok(Self {
            reader,
            schema,
            metadata,
        })
    }

    /// Open a fresh adapter and decode the footer into a stream builder
    async fn open(
        reader: &Arc<R>,
    ) -> Result<(ParquetRecordBatchStreamBuilder<ByteReaderAdapter<R>>, u64)> {
        let adapter = ByteReaderAdapter::new(Arc::clone(reader))
            .await
            .context("Failed to open data source")?;
        let file_size = adapter.object_size();

        let builder = ParquetRecordBatchStreamBuilder::new(adapter)
            .await
            .map_err(SourceError::from)
            .context("Failed to read Parquet metadata")?;

        Ok((builder, file_size))
    }
}

#[async_trait]
impl<R: ByteReader + 'static> FileReader for GenericParquetReader<R> {
    fn schema(&self) -> SchemaRef {
        Arc::clone(&self.schema)
    }

    fn metadata(&self) -> FileMetadata {
        self.metadata.clone()
    }

    async fn read_rows(&self, limit: Option<usize>) -> Result<Vec<RecordBatch>> {
        if limit == Some(0) {
            return Ok(Vec::new());
        }

        let (builder, _) = Self::open(&self.reader).await?;
        let builder = match limit {
            Some(limit) => builder.with_limit(limit),
            None => builder,
        };

        let stream = builder
            .build()
            .map_err(SourceError::from)
            .context("Failed to build Parquet stream")?;

        let batches: Vec<RecordBatch> = stream
            .try_collect()
            .await
            .map_err(SourceError::from)
            .context("Failed to read record batch")?;

        debug!(
            batches = batches.len(),
            rows = batches.iter().map(RecordBatch::num_rows).sum::<usize>(),
            "Read Parquet rows"
        );

        Ok(batches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SourceErrorKind, source_error_kind};
    use crate::io::LocalFileByteReader;
    use arrow::array::{Float64Array, Int32Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use parquet::arrow::ArrowWriter;
    use parquet::file::properties::WriterProperties;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper to create a test Parquet file
    fn create_test_parquet_file(num_rows: usize, row_group_size: usize) -> NamedTempFile {
        let temp_file = NamedTempFile::new().unwrap();

        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int32, false),
            Field::new("name", DataType::Utf8, true),
            Field::new("value", DataType::Float64, true),
        ]));

        let props = WriterProperties::builder()
            .set_max_row_group_size(row_group_size)
            .build();

        let file = std::fs::File::create(temp_file.path()).unwrap();
        let mut writer = ArrowWriter::try_new(file, Arc::clone(&schema), Some(props)).unwrap();

        let batch = RecordBatch::try_new(
            Arc::clone(&schema),
            vec![
                Arc::new(Int32Array::from_iter_values(0..num_rows as i32)),
                Arc::new(StringArray::from_iter_values(
                    (0..num_rows).map(|i| format!("name_{}", i)),
                )),
                Arc::new(Float64Array::from_iter_values(
                    (0..num_rows).map(|i| i as f64 * 1.5),
                )),
            ],
        )
        .unwrap();

        writer.write(&batch).unwrap();
        writer.close().unwrap();
        temp_file
    }

    #[tokio::test]
    async fn test_parquet_reader_metadata() {
        let temp_file = create_test_parquet_file(1000, 100);
        let reader = LocalFileByteReader::new(temp_file.path());

        let parquet_reader = GenericParquetReader::new(reader).await.unwrap();
        let metadata = parquet_reader.metadata();

        assert!(metadata.file_size_bytes > 0);
        assert_eq!(metadata.num_rows, 1000);
        assert_eq!(metadata.num_row_groups, 10);
    }

    #[tokio::test]
    async fn test_schema_keeps_declared_order() {
        let temp_file = create_test_parquet_file(10, 100);
        let reader = LocalFileByteReader::new(temp_file.path());

        let parquet_reader = GenericParquetReader::new(reader).await.unwrap();
        let schema = parquet_reader.schema();

        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names, vec!["id", "name", "value"]);
        assert_eq!(schema.field(0).data_type(), &DataType::Int32);
        assert!(!schema.field(0).is_nullable());
    }

    #[tokio::test]
    async fn test_read_rows_with_limit() {
        let temp_file = create_test_parquet_file(1000, 100);
        let reader = LocalFileByteReader::new(temp_file.path());
        let parquet_reader = GenericParquetReader::new(reader).await.unwrap();

        let batches = parquet_reader.read_rows(Some(5)).await.unwrap();
        let rows: usize = batches.iter().map(RecordBatch::num_rows).sum();
        assert_eq!(rows, 5);

        let ids = batches[0]
            .column(0)
            .as_any()
            .downcast_ref::<Int32Array>()
            .unwrap();
        assert_eq!(ids.value(0), 0);
    }

    #[tokio::test]
    async fn test_read_all_rows() {
        let temp_file = create_test_parquet_file(1000, 100);
        let reader = LocalFileByteReader::new(temp_file.path());
        let parquet_reader = GenericParquetReader::new(reader).await.unwrap();

        let batches = parquet_reader.read_rows(None).await.unwrap();
        let rows: usize = batches.iter().map(RecordBatch::num_rows).sum();
        assert_eq!(rows, 1000);
    }

    #[tokio::test]
    async fn test_zero_limit_reads_nothing() {
        let temp_file = create_test_parquet_file(10, 100);
        let reader = LocalFileByteReader::new(temp_file.path());
        let parquet_reader = GenericParquetReader::new(reader).await.unwrap();

        assert!(parquet_reader.read_rows(Some(0)).await.unwrap().is_empty());
    }

    /// Reports a size but refuses every range request
    struct ForbiddenReader;

    #[async_trait]
    impl ByteReader for ForbiddenReader {
        async fn size(&self) -> Result<u64> {
            Ok(4096)
        }

        async fn read_range(&self, _start: u64, _end: u64) -> Result<Vec<u8>> {
            Err(SourceError::AccessDenied {
                bucket: "datalake".to_string(),
                key: "flights.parquet".to_string(),
                source: "403 Forbidden".into(),
            }
            .into())
        }
    }

    #[tokio::test]
    async fn test_failed_range_read_keeps_category() {
        let err = GenericParquetReader::new(ForbiddenReader).await.err().unwrap();
        assert_eq!(source_error_kind(&err), Some(SourceErrorKind::AccessDenied));
        assert!(format!("{:#}", err).contains("Access denied"));
    }

    #[tokio::test]
    async fn test_not_parquet_is_decode_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "id,name").unwrap();
        writeln!(temp_file, "1,Alice").unwrap();
        temp_file.flush().unwrap();

        let reader = LocalFileByteReader::new(temp_file.path());
        let err = GenericParquetReader::new(reader).await.err().unwrap();
        assert_eq!(source_error_kind(&err), Some(SourceErrorKind::Decode));
    }
}
