//! Majors: a small unpaginated vocabulary used to tag books.

#[cfg(test)]
#[path = "majors_test.rs"]
mod majors_test;

use crate::error::ClientError;
use crate::forms::MajorName;
use crate::http::{ApiClient, ApiRequest};
use crate::types::Major;

pub const MAJORS_ENDPOINT: &str = "/majors";

fn major_endpoint(major_id: i64) -> String {
    format!("{MAJORS_ENDPOINT}/{major_id}")
}

#[derive(Clone)]
pub struct Majors {
    client: ApiClient,
}

impl Majors {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Any [`ClientError`] from the authenticated pipeline or decoding.
    pub async fn list(&self) -> Result<Vec<Major>, ClientError> {
        self.client.fetch(ApiRequest::get(MAJORS_ENDPOINT)).await
    }

    /// # Errors
    ///
    /// Any [`ClientError`] from the authenticated pipeline.
    pub async fn create(&self, major: &MajorName) -> Result<(), ClientError> {
        self.client.execute(ApiRequest::post(MAJORS_ENDPOINT).json(major)?).await
    }

    /// # Errors
    ///
    /// Any [`ClientError`] from the authenticated pipeline.
    pub async fn rename(&self, major_id: i64, major: &MajorName) -> Result<(), ClientError> {
        self.client.execute(ApiRequest::put(major_endpoint(major_id)).json(major)?).await
    }

    /// # Errors
    ///
    /// Any [`ClientError`] from the authenticated pipeline.
    pub async fn delete(&self, major_id: i64) -> Result<(), ClientError> {
        self.client.execute(ApiRequest::delete(major_endpoint(major_id))).await?;
        tracing::info!(major_id, "major deleted");
        Ok(())
    }
}
