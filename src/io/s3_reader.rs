use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::SdkError;
use std::sync::Arc;

use super::byte_reader::ByteReader;
use crate::error::SourceError;

/// ByteReader implementation for S3 objects
#[derive(Clone)]
pub struct S3ByteReader {
    s3_client: Arc<S3Client>,
    endpoint: String,
    bucket: String,
    key: String,
}

impl S3ByteReader {
    /// Create a new S3ByteReader
    pub fn new(s3_client: Arc<S3Client>, endpoint: String, bucket: String, key: String) -> Self {
        Self {
            s3_client,
            endpoint,
            bucket,
            key,
        }
    }

    /// Map an SDK failure to one of the source error categories
    fn classify<E>(&self, err: SdkError<E, HttpResponse>) -> SourceError
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        if matches!(err, SdkError::DispatchFailure(_) | SdkError::TimeoutError(_)) {
            return SourceError::Unreachable {
                endpoint: self.endpoint.clone(),
                source: Box::new(err),
            };
        }

        let status = err.raw_response().map(|raw| raw.status().as_u16());
        match status {
            Some(404) => SourceError::ObjectNotFound {
                bucket: self.bucket.clone(),
                key: self.key.clone(),
            },
            Some(401) | Some(403) => SourceError::AccessDenied {
                bucket: self.bucket.clone(),
                key: self.key.clone(),
                source: Box::new(err),
            },
            _ => SourceError::Service {
                bucket: self.bucket.clone(),
                key: self.key.clone(),
                source: Box::new(err),
            },
        }
    }
}

#[async_trait]
impl ByteReader for S3ByteReader {
    async fn size(&self) -> Result<u64> {
        // Use HeadObject to get object size
        let head_response = self
            .s3_client
            .head_object()
            .bucket(&self.bucket)
            .key(&self.key)
            .send()
            .await
            .map_err(|e| self.classify(e))
            .context("Failed to get S3 object metadata")?;

        let size = head_response
            .content_length()
            .ok_or_else(|| anyhow::anyhow!("S3 object missing content-length"))?
            as u64;

        Ok(size)
    }

    async fn read_range(&self, start: u64, end: u64) -> Result<Vec<u8>> {
        if start >= end {
            return Ok(Vec::new());
        }

        // Use S3 range request to read the data
        let range = format!("bytes={}-{}", start, end - 1);

        let response = self
            .s3_client
            .get_object()
            .bucket(&self.bucket)
            .key(&self.key)
            .range(range)
            .send()
            .await
            .map_err(|e| self.classify(e))
            .context("Failed to read range from S3")?;

        let bytes = response
            .body
            .collect()
            .await
            .context("Failed to collect S3 response body")?
            .into_bytes()
            .to_vec();

        Ok(bytes)
    }
}
