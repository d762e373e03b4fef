use std::time::Duration;

use aws_config::timeout::TimeoutConfig;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client as S3Client;
use lambda_runtime::{run, service_fn, tracing, Error};
mod error;
mod event_handler;
mod notification;
mod store;
#[cfg(test)]
mod testing;
mod thumbnail;
use event_handler::function_handler;
use thumbnail::ThumbnailConfig;

/// Upper bound for a single S3 call, retries included.
const S3_OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::subscriber::fmt().json().init();
    let shared_config = aws_config::defaults(BehaviorVersion::v2025_01_17())
        .timeout_config(
            TimeoutConfig::builder()
                .operation_timeout(S3_OPERATION_TIMEOUT)
                .build(),
        )
        .load()
        .await;
    let s3_client = S3Client::new(&shared_config);
    let config = ThumbnailConfig::default();
    run(service_fn(|event| function_handler(event, &s3_client, &config))).await
}
