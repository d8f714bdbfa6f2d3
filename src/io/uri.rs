use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::SourceError;

/// Represents a parsed source URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceUri {
    Local(PathBuf),
    S3 { bucket: String, key: String },
}

impl SourceUri {
    /// Parse a URI string into a SourceUri
    pub fn parse(uri: &str) -> Result<Self> {
        let invalid = |reason: &str| SourceError::InvalidUri {
            uri: uri.to_string(),
            reason: reason.to_string(),
        };

        // Object keys are taken verbatim: running them through Url would
        // percent-encode spaces and cut the key at '#' or '?'
        if let Some(rest) = strip_s3_scheme(uri) {
            let (bucket, key) = rest.split_once('/').unwrap_or((rest, ""));

            if bucket.is_empty() {
                return Err(invalid("missing bucket").into());
            }
            if key.is_empty() || key.ends_with('/') {
                return Err(invalid("missing object key").into());
            }

            return Ok(SourceUri::S3 {
                bucket: bucket.to_string(),
                key: key.to_string(),
            });
        }

        // Try parsing as URL first
        if let Ok(url) = Url::parse(uri) {
            match url.scheme() {
                "file" => {
                    let path = url
                        .to_file_path()
                        .map_err(|_| invalid("not a valid file:// path"))?;
                    Ok(SourceUri::Local(path))
                }
                // Windows drive letters parse as a one-letter scheme
                scheme if scheme.len() == 1 => Ok(SourceUri::Local(PathBuf::from(uri))),
                scheme => Err(invalid(&format!("unsupported scheme '{}'", scheme)).into()),
            }
        } else {
            // Treat as local file path
            Ok(SourceUri::Local(PathBuf::from(uri)))
        }
    }

    /// Last path segment of the file or object key
    pub fn file_name(&self) -> Option<&str> {
        match self {
            SourceUri::Local(path) => path.file_name().and_then(|n| n.to_str()),
            SourceUri::S3 { key, .. } => key.rsplit('/').next().filter(|n| !n.is_empty()),
        }
    }

    /// File name without its final extension (`flights.parquet` -> `flights`)
    pub fn file_stem(&self) -> Option<&str> {
        self.file_name()
            .and_then(|name| Path::new(name).file_stem())
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
    }
}

/// Remainder after `s3://` or `s3a://` (case-insensitive scheme)
///
/// s3a:// is what Hadoop-flavoured tooling writes for the same thing.
fn strip_s3_scheme(uri: &str) -> Option<&str> {
    let (scheme, rest) = uri.split_once("://")?;
    (scheme.eq_ignore_ascii_case("s3") || scheme.eq_ignore_ascii_case("s3a")).then_some(rest)
}

impl fmt::Display for SourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceUri::Local(path) => write!(f, "{}", path.display()),
            SourceUri::S3 { bucket, key } => write!(f, "s3://{}/{}", bucket, key),
        }
    }
}
