//! Construction of an S3 client for S3-compatible endpoints (MinIO and friends).
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_credential_types::provider::SharedCredentialsProvider;
use aws_sdk_s3::Client as S3Client;
use derive_builder::Builder;

use crate::config::{
    CONNECT_TIMEOUT, DEFAULT_S3_ACCESS_KEY, DEFAULT_S3_ENDPOINT, DEFAULT_S3_REGION,
    DEFAULT_S3_SECRET_KEY, OPERATION_TIMEOUT,
};

/// Static credentials never expire, so the provider name is only used in logs
const CREDENTIALS_PROVIDER_NAME: &str = "parquet-ddl-static";

#[derive(Builder, Clone)]
pub struct S3ConnectArgs {
    #[builder(setter(into), default = "DEFAULT_S3_ENDPOINT.to_string()")]
    endpoint: String,
    #[builder(setter(into), default = "DEFAULT_S3_ACCESS_KEY.to_string()")]
    access_key: String,
    #[builder(setter(into), default = "DEFAULT_S3_SECRET_KEY.to_string()")]
    secret_key: String,
    #[builder(setter(into), default = "Region::new(DEFAULT_S3_REGION)")]
    region: Region,
}

impl S3ConnectArgs {
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for S3ConnectArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3ConnectArgs")
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &"** redacted **")
            .field("region", &self.region)
            .finish()
    }
}

/// Build an S3 client bound to the given endpoint
///
/// Requests use path-style addressing (`endpoint/bucket/key`) because most
/// S3-compatible servers do not resolve virtual-hosted bucket names. Retries
/// are disabled: a failed request surfaces immediately.
pub async fn s3_client(args: &S3ConnectArgs) -> S3Client {
    let credentials = Credentials::new(
        &args.access_key,
        &args.secret_key,
        None,
        None,
        CREDENTIALS_PROVIDER_NAME,
    );

    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(args.region.clone())
        .endpoint_url(&args.endpoint)
        .credentials_provider(SharedCredentialsProvider::new(credentials))
        .retry_config(RetryConfig::disabled())
        .timeout_config(
            TimeoutConfig::builder()
                .connect_timeout(CONNECT_TIMEOUT)
                .operation_timeout(OPERATION_TIMEOUT)
                .build(),
        )
        .load()
        .await;

    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(true)
        .build();

    tracing::debug!(endpoint = %args.endpoint, region = %args.region, "built S3 client");

    S3Client::from_conf(s3_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let args = S3ConnectArgsBuilder::default().build().unwrap();
        assert_eq!(args.endpoint(), DEFAULT_S3_ENDPOINT);
        assert_eq!(args.access_key, DEFAULT_S3_ACCESS_KEY);
        assert_eq!(args.region, Region::new(DEFAULT_S3_REGION));
    }

    #[test]
    fn test_builder_overrides() {
        let args = S3ConnectArgsBuilder::default()
            .endpoint("http://minio:9000")
            .access_key("admin")
            .secret_key("hunter2")
            .region(Region::new("eu-west-1"))
            .build()
            .unwrap();

        assert_eq!(args.endpoint(), "http://minio:9000");
        assert_eq!(args.region, Region::new("eu-west-1"));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let args = S3ConnectArgsBuilder::default()
            .secret_key("hunter2")
            .build()
            .unwrap();

        let rendered = format!("{:?}", args);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("redacted"));
    }
}
