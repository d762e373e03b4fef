use aws_lambda_events::event::s3::S3Event;
use percent_encoding::percent_decode_str;

use crate::error::ThumbnailError;

/// The object an upload notification points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadNotification {
    pub bucket: String,
    pub key: String,
}

impl UploadNotification {
    /// Takes the first record of the event. Any further records are ignored.
    pub fn from_event(event: &S3Event) -> Result<Self, ThumbnailError> {
        let record = event
            .records
            .first()
            .ok_or(ThumbnailError::InvalidNotification("no records found in S3 event"))?;
        let bucket = record
            .s3
            .bucket
            .name
            .clone()
            .ok_or(ThumbnailError::InvalidNotification("no bucket name found in S3 event"))?;
        let key = record
            .s3
            .object
            .key
            .as_deref()
            .map(decode_key)
            .ok_or(ThumbnailError::InvalidNotification("no object key found in S3 event"))?;
        Ok(Self { bucket, key })
    }

    pub fn is_under(&self, prefix: &str) -> bool {
        self.key.starts_with(prefix)
    }

    pub fn derived_key(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.key)
    }
}

/// S3 form-encodes keys in notifications: `+` is a space, the rest is
/// percent-encoded.
fn decode_key(raw: &str) -> String {
    let plus_decoded = raw.replace('+', " ");
    percent_decode_str(&plus_decoded)
        .decode_utf8_lossy()
        .into_owned()
}
