use crate::error::UploadError;
use crate::log_record::LogRecord;
use reqwest::{StatusCode, Url};
use std::time::Duration;

/// Posts log records to the ingestion endpoint, one request per record.
///
/// The inner client is connection-pooled and safe to share between file
/// tasks behind an `Arc`.
#[derive(Debug)]
pub struct Uploader {
    client: reqwest::Client,
    url: Url,
}

impl Uploader {
    pub fn new(url: &str, timeout: Option<Duration>) -> Result<Self, UploadError> {
        let url = Url::parse(url).map_err(|e| UploadError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(UploadError::Client)?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Sends `record` once and waits for the whole response.
    ///
    /// Only `200 OK` counts as delivered; any other status is returned with
    /// the body the server sent.
    pub async fn upload(&self, record: &LogRecord) -> Result<(), UploadError> {
        // The URL was validated up front, so a builder error can only come
        // from encoding the record.
        let response = self
            .client
            .post(self.url.clone())
            .json(record)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    UploadError::Serialization(e)
                } else {
                    UploadError::Transport(e)
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(UploadError::Transport)?;

        if status != StatusCode::OK {
            return Err(UploadError::Status { status, body });
        }

        Ok(())
    }
}
