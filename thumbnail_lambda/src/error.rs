use image::ImageError;
use thiserror::Error;

/// Errors raised by an [`ObjectStore`](crate::store::ObjectStore).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("object not found: s3://{bucket}/{key}")]
    NotFound { bucket: String, key: String },

    /// Access denied, quota, network or body stream failures.
    #[error("{message}")]
    Service { message: String },
}

/// Everything that can make a single invocation fail.
#[derive(Error, Debug)]
pub enum ThumbnailError {
    #[error("invalid S3 notification: {0}")]
    InvalidNotification(&'static str),

    #[error("failed to read s3://{bucket}/{key}: {source}")]
    StoreRead {
        bucket: String,
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("failed to decode image: {0}")]
    Decode(#[source] ImageError),

    #[error("failed to encode thumbnail: {0}")]
    Encode(#[source] ImageError),

    #[error("failed to write s3://{bucket}/{key}: {source}")]
    StoreWrite {
        bucket: String,
        key: String,
        #[source]
        source: StoreError,
    },
}
