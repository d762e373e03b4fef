use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;

use crate::error::StoreError;

/// An object as read from the store.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// The two store operations one invocation needs.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Reads the full object body and its content type.
    async fn get(&self, bucket: &str, key: &str) -> Result<StoredObject, StoreError>;

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError>;
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn get(&self, bucket: &str, key: &str) -> Result<StoredObject, StoreError> {
        let output = self
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| match err.into_service_error() {
                GetObjectError::NoSuchKey(_) => StoreError::NotFound {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                },
                other => StoreError::Service {
                    message: DisplayErrorContext(&other).to_string(),
                },
            })?;
        let content_type = output.content_type().map(str::to_owned);
        let body = output.body.collect().await.map_err(|e| StoreError::Service {
            message: format!("failed to read object body: {}", e),
        })?;
        Ok(StoredObject {
            bytes: body.into_bytes().to_vec(),
            content_type,
        })
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError> {
        self.put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|err| StoreError::Service {
                message: DisplayErrorContext(&err.into_service_error()).to_string(),
            })?;
        Ok(())
    }
}
