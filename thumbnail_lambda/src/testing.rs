//! Fixtures shared by the unit tests.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;

use async_trait::async_trait;
use aws_lambda_events::event::s3::{S3Bucket, S3Entity, S3Event, S3EventRecord, S3Object};
use image::{DynamicImage, ImageFormat, ImageOutputFormat, Rgb, RgbImage};

use crate::error::StoreError;
use crate::store::{ObjectStore, StoredObject};

pub(crate) fn s3_event(bucket: &str, key: &str) -> S3Event {
    let record = S3EventRecord {
        s3: S3Entity {
            bucket: S3Bucket {
                name: Some(bucket.to_string()),
                ..Default::default()
            },
            object: S3Object {
                key: Some(key.to_string()),
                size: Some(1234),
                ..Default::default()
            },
            schema_version: Some("1.0".to_string()),
            configuration_id: Some("thumbnail-trigger".to_string()),
        },
        ..Default::default()
    };
    S3Event {
        records: vec![record],
    }
}

/// A gradient so resized output is not trivially uniform.
pub(crate) fn fixture_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let output = match format {
        ImageFormat::Jpeg => ImageOutputFormat::Jpeg(80),
        other => other.into(),
    };
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut out, output)
        .unwrap();
    out.into_inner()
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WrittenObject {
    pub bucket: String,
    pub key: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// In-memory store that records every call.
#[derive(Default)]
pub(crate) struct MemoryStore {
    objects: Mutex<HashMap<(String, String), StoredObject>>,
    reads: Mutex<Vec<(String, String)>>,
    writes: Mutex<Vec<WrittenObject>>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn with_object(bucket: &str, key: &str, bytes: Vec<u8>, content_type: &str) -> Self {
        let store = Self::default();
        store.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                bytes,
                content_type: Some(content_type.to_string()),
            },
        );
        store
    }

    pub fn with_untyped_object(bucket: &str, key: &str, bytes: Vec<u8>) -> Self {
        let store = Self::default();
        store.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                bytes,
                content_type: None,
            },
        );
        store
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn reads(&self) -> Vec<(String, String)> {
        self.reads.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<WrittenObject> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<StoredObject, StoreError> {
        self.reads
            .lock()
            .unwrap()
            .push((bucket.to_string(), key.to_string()));
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Service {
                message: "Access Denied".to_string(),
            });
        }
        self.writes.lock().unwrap().push(WrittenObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            bytes,
            content_type: content_type.to_string(),
        });
        Ok(())
    }
}
