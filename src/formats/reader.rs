use anyhow::Result;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::parquet::GenericParquetReader;
use crate::io::s3_client::s3_client;
use crate::io::{LocalFileByteReader, S3ByteReader, S3ConnectArgs, SourceUri};

/// Metadata about an opened data file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub file_size_bytes: u64,
    pub num_rows: u64,
    pub num_row_groups: usize,
}

/// Trait for reading columnar files from any source
#[async_trait]
pub trait FileReader: Send + Sync {
    /// Schema embedded in the file, in declared column order
    fn schema(&self) -> SchemaRef;

    /// Get metadata about the file
    fn metadata(&self) -> FileMetadata;

    /// Read rows from the start of the file, at most `limit` when given
    async fn read_rows(&self, limit: Option<usize>) -> Result<Vec<RecordBatch>>;
}

/// Factory for creating FileReader instances based on URI
///
/// The S3 client is only built the first time an S3 source is opened, so
/// local files never touch the AWS configuration chain.
pub struct ReaderFactory {
    s3_args: S3ConnectArgs,
    s3_client: OnceCell<Arc<S3Client>>,
}

impl ReaderFactory {
    /// Create a new ReaderFactory
    pub fn new(s3_args: S3ConnectArgs) -> Self {
        Self {
            s3_args,
            s3_client: OnceCell::new(),
        }
    }

    async fn s3_client(&self) -> Arc<S3Client> {
        let client = self
            .s3_client
            .get_or_init(|| async { Arc::new(s3_client(&self.s3_args).await) })
            .await;
        Arc::clone(client)
    }

    /// Create a FileReader based on source URI
    pub async fn create_reader(&self, source_uri: &SourceUri) -> Result<Arc<dyn FileReader>> {
        match source_uri {
            SourceUri::Local(path) => {
                let byte_reader = LocalFileByteReader::new(path);
                let reader = GenericParquetReader::new(byte_reader).await?;
                Ok(Arc::new(reader) as Arc<dyn FileReader>)
            }

            SourceUri::S3 { bucket, key } => {
                let byte_reader = S3ByteReader::new(
                    self.s3_client().await,
                    self.s3_args.endpoint().to_string(),
                    bucket.clone(),
                    key.clone(),
                );
                let reader = GenericParquetReader::new(byte_reader).await?;
                Ok(Arc::new(reader) as Arc<dyn FileReader>)
            }
        }
    }
}
