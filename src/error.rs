//! Error categories for failures at the data source boundary.
//!
//! Everything above the source layer uses `anyhow`; these variants are wrapped
//! into `anyhow::Error` and can be recovered with `downcast_ref`.

use parquet::errors::ParquetError;
use std::path::PathBuf;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Coarse classification of a failed source operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    NotFound,
    AccessDenied,
    Unreachable,
    Io,
    Decode,
    Service,
    InvalidUri,
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Local file not found: {}", path.display())]
    LocalNotFound { path: PathBuf },

    #[error("Object not found: s3://{bucket}/{key}")]
    ObjectNotFound { bucket: String, key: String },

    #[error("Access denied for s3://{bucket}/{key} (check access key and secret)")]
    AccessDenied {
        bucket: String,
        key: String,
        #[source]
        source: BoxError,
    },

    #[error("Object store endpoint unreachable: {endpoint}")]
    Unreachable {
        endpoint: String,
        #[source]
        source: BoxError,
    },

    #[error("I/O error reading {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode Parquet data")]
    Decode {
        #[source]
        source: ParquetError,
    },

    #[error("Object store request failed for s3://{bucket}/{key}")]
    Service {
        bucket: String,
        key: String,
        #[source]
        source: BoxError,
    },

    #[error("Invalid source URI '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },
}

impl SourceError {
    pub fn kind(&self) -> SourceErrorKind {
        match self {
            SourceError::LocalNotFound { .. } | SourceError::ObjectNotFound { .. } => {
                SourceErrorKind::NotFound
            }
            SourceError::AccessDenied { .. } => SourceErrorKind::AccessDenied,
            SourceError::Unreachable { .. } => SourceErrorKind::Unreachable,
            SourceError::Io { .. } => SourceErrorKind::Io,
            SourceError::Decode { .. } => SourceErrorKind::Decode,
            SourceError::Service { .. } => SourceErrorKind::Service,
            SourceError::InvalidUri { .. } => SourceErrorKind::InvalidUri,
        }
    }

    /// Classify an I/O error raised while accessing a local file
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            SourceError::LocalNotFound { path }
        } else {
            SourceError::Io { path, source }
        }
    }
}

impl From<ParquetError> for SourceError {
    /// Source failures raised by a `ByteReader` reach the Parquet reader as
    /// `io::Error`s wrapping a `SourceError`; those keep their category.
    /// Everything else is a decode failure.
    fn from(err: ParquetError) -> Self {
        match err {
            ParquetError::External(external) => match unwrap_source_error(external) {
                Ok(source) => source,
                Err(external) => SourceError::Decode {
                    source: ParquetError::External(external),
                },
            },
            other => SourceError::Decode { source: other },
        }
    }
}

fn unwrap_source_error(err: BoxError) -> Result<SourceError, BoxError> {
    let io_err = err.downcast::<std::io::Error>()?;
    if !io_err.get_ref().is_some_and(|inner| inner.is::<SourceError>()) {
        return Err(io_err as BoxError);
    }

    match (*io_err).into_inner() {
        Some(inner) => inner.downcast::<SourceError>().map(|source| *source),
        None => Err("I/O error without a source".into()),
    }
}

/// Find the source category anywhere in an `anyhow` error chain
pub fn source_error_kind(err: &anyhow::Error) -> Option<SourceErrorKind> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<SourceError>())
        .map(SourceError::kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_io_not_found_is_classified() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = SourceError::from_io("/data/flights.parquet", io);
        assert_eq!(err.kind(), SourceErrorKind::NotFound);
        assert!(err.to_string().contains("/data/flights.parquet"));
    }

    #[test]
    fn test_other_io_errors_stay_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err = SourceError::from_io("/data/flights.parquet", io);
        assert_eq!(err.kind(), SourceErrorKind::Io);
    }

    #[test]
    fn test_kind_found_through_context() {
        let result: anyhow::Result<()> = Err(SourceError::ObjectNotFound {
            bucket: "datalake".to_string(),
            key: "flights.parquet".to_string(),
        })
        .context("Failed to read Parquet metadata");

        let err = result.unwrap_err();
        assert_eq!(source_error_kind(&err), Some(SourceErrorKind::NotFound));
    }

    #[test]
    fn test_parquet_error_wrapping_source_error_keeps_kind() {
        let denied = SourceError::AccessDenied {
            bucket: "datalake".to_string(),
            key: "flights.parquet".to_string(),
            source: "403 Forbidden".into(),
        };
        let parquet_err = ParquetError::from(std::io::Error::other(denied));

        let err = SourceError::from(parquet_err);
        assert_eq!(err.kind(), SourceErrorKind::AccessDenied);
    }

    #[test]
    fn test_plain_parquet_errors_are_decode() {
        let err = SourceError::from(ParquetError::General("bad magic".to_string()));
        assert_eq!(err.kind(), SourceErrorKind::Decode);

        let eof = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short read");
        let err = SourceError::from(ParquetError::from(eof));
        assert_eq!(err.kind(), SourceErrorKind::Decode);
    }

    #[test]
    fn test_kind_absent_for_unrelated_errors() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(source_error_kind(&err), None);
    }
}
