use std::fmt;

use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{tracing, Error, LambdaEvent};
use serde::Serialize;

use crate::error::ThumbnailError;
use crate::notification::UploadNotification;
use crate::store::ObjectStore;
use crate::thumbnail::{self, Thumbnail, ThumbnailConfig};

/// What a successful invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThumbnailOutcome {
    /// The key is already under the thumbnail prefix.
    Skipped,
    Created { thumbnail_key: String },
}

impl fmt::Display for ThumbnailOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThumbnailOutcome::Skipped => write!(f, "Thumbnail skipped"),
            ThumbnailOutcome::Created { thumbnail_key } => {
                write!(f, "Thumbnail créé: {}", thumbnail_key)
            }
        }
    }
}

/// The result handed back to the Lambda runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: String,
}

impl From<Result<ThumbnailOutcome, ThumbnailError>> for InvocationResponse {
    fn from(result: Result<ThumbnailOutcome, ThumbnailError>) -> Self {
        match result {
            Ok(outcome) => Self {
                status_code: 200,
                body: outcome.to_string(),
            },
            Err(err) => Self {
                status_code: 500,
                body: err.to_string(),
            },
        }
    }
}

/// The original label is kept unless the bytes were re-encoded in another
/// format, or there was no label to keep.
fn thumbnail_content_type(original: Option<String>, thumbnail: &Thumbnail) -> String {
    match original {
        Some(content_type) if !thumbnail.fallback => content_type,
        _ => thumbnail.mime_type().to_string(),
    }
}

async fn create_thumbnail<S: ObjectStore + ?Sized>(
    store: &S,
    config: &ThumbnailConfig,
    event: &S3Event,
) -> Result<ThumbnailOutcome, ThumbnailError> {
    let notification = UploadNotification::from_event(event)?;
    if notification.is_under(&config.prefix) {
        tracing::info!("Skipping {}/{}", notification.bucket, notification.key);
        return Ok(ThumbnailOutcome::Skipped);
    }

    let thumbnail_key = notification.derived_key(&config.prefix);
    let UploadNotification { bucket, key } = notification;
    tracing::info!("Generating thumbnail for {}/{}", bucket, key);

    let original = store
        .get(&bucket, &key)
        .await
        .map_err(|source| ThumbnailError::StoreRead {
            bucket: bucket.clone(),
            key: key.clone(),
            source,
        })?;
    let thumbnail = thumbnail::generate(&original.bytes, config)?;

    if thumbnail.fallback {
        tracing::warn!(
            "Re-encoded {}/{} as {} instead of {:?}",
            bucket,
            key,
            thumbnail.mime_type(),
            original.content_type
        );
    }
    let content_type = thumbnail_content_type(original.content_type, &thumbnail);

    let (width, height) = (thumbnail.width, thumbnail.height);
    store
        .put(&bucket, &thumbnail_key, thumbnail.bytes, &content_type)
        .await
        .map_err(|source| ThumbnailError::StoreWrite {
            bucket: bucket.clone(),
            key: thumbnail_key.clone(),
            source,
        })?;
    tracing::info!(
        "Wrote {}/{} ({}x{}, {})",
        bucket,
        thumbnail_key,
        width,
        height,
        content_type
    );

    Ok(ThumbnailOutcome::Created { thumbnail_key })
}

pub(crate) async fn function_handler<S: ObjectStore + ?Sized>(
    event: LambdaEvent<S3Event>,
    store: &S,
    config: &ThumbnailConfig,
) -> Result<InvocationResponse, Error> {
    let result = create_thumbnail(store, config, &event.payload).await;
    if let Err(err) = &result {
        tracing::error!("Erreur: {}", err);
    }
    Ok(result.into())
}
