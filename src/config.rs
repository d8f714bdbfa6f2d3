//! Configuration constants for the schema tools
//!
//! This module centralizes the connection defaults and I/O tunables used
//! throughout the application.

use std::time::Duration;

// ============================================================================
// Object Store Defaults
// ============================================================================

/// Endpoint of the local MinIO instance the inspector talks to by default
pub const DEFAULT_S3_ENDPOINT: &str = "http://localhost:9000";

pub const DEFAULT_S3_ACCESS_KEY: &str = "trino";

pub const DEFAULT_S3_SECRET_KEY: &str = "trino123";

/// MinIO ignores the region but the SDK signer requires one
pub const DEFAULT_S3_REGION: &str = "us-east-1";

// ============================================================================
// Connection Configuration
// ============================================================================

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound for a single S3 request (HEAD or ranged GET)
pub const OPERATION_TIMEOUT: Duration = Duration::from_secs(120); // 2 minutes

// ============================================================================
// I/O Configuration
// ============================================================================

/// Buffer size for parquet async I/O adapter
///
/// Reads near the end of an object fetch the last 256KB, so the 8-byte
/// trailer and a footer of up to 256KB arrive in one ranged request. Larger
/// footers take one more. Larger buffers mean fewer round trips to the object
/// store when reading row groups for `--head`.
pub const PARQUET_BUFFER_SIZE: usize = 256 * 1024; // 256 KB

