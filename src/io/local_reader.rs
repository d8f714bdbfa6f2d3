use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, BufReader};

use super::byte_reader::ByteReader;
use crate::error::SourceError;

/// ByteReader implementation for local files
#[derive(Clone)]
pub struct LocalFileByteReader {
    file_path: PathBuf,
}

impl LocalFileByteReader {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    async fn open(&self) -> Result<File, SourceError> {
        File::open(&self.file_path)
            .await
            .map_err(|e| SourceError::from_io(&self.file_path, e))
    }
}

#[async_trait]
impl ByteReader for LocalFileByteReader {
    async fn size(&self) -> Result<u64> {
        let file = self.open().await?;
        let metadata = file
            .metadata()
            .await
            .map_err(|e| SourceError::from_io(&self.file_path, e))?;
        Ok(metadata.len())
    }

    async fn read_range(&self, start: u64, end: u64) -> Result<Vec<u8>> {
        let file = self.open().await?;
        let io_err = |e| SourceError::from_io(&self.file_path, e);

        let mut file = BufReader::new(file);
        file.seek(std::io::SeekFrom::Start(start))
            .await
            .map_err(io_err)?;

        let size = end.saturating_sub(start);
        let mut buffer = Vec::with_capacity(size as usize);
        file.take(size)
            .read_to_end(&mut buffer)
            .await
            .map_err(io_err)?;

        Ok(buffer)
    }
}
