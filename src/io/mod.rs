//! I/O abstraction layer for reading bytes from different sources

pub mod byte_reader;
pub mod local_reader;
pub mod s3_client;
pub mod s3_reader;
pub mod uri;

pub use byte_reader::ByteReader;
pub use local_reader::LocalFileByteReader;
pub use s3_client::{S3ConnectArgs, S3ConnectArgsBuilder};
pub use s3_reader::S3ByteReader;
pub use uri::SourceUri;
