//! Shelving locations.

#[cfg(test)]
#[path = "locations_test.rs"]
mod locations_test;

use async_trait::async_trait;

use crate::error::ClientError;
use crate::forms::NewLocation;
use crate::http::{ApiClient, ApiRequest};
use crate::types::{Location, Page};
use crate::views::{ListQuery, ListSource};

pub const LOCATIONS_ENDPOINT: &str = "/locations";

/// Page size used when a form needs every location as options.
const ALL_LOCATIONS_LIMIT: u32 = 1000;

fn location_endpoint(location_id: i64) -> String {
    format!("{LOCATIONS_ENDPOINT}/{location_id}")
}

#[derive(Clone)]
pub struct Locations {
    client: ApiClient,
}

impl Locations {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Any [`ClientError`] from the authenticated pipeline or decoding.
    pub async fn list(&self, query: &ListQuery) -> Result<Page<Location>, ClientError> {
        let request = ApiRequest::get(LOCATIONS_ENDPOINT).query_pairs(query.to_params());
        self.client.fetch(request).await
    }

    /// Every location in one request, for select options.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the authenticated pipeline or decoding.
    pub async fn all(&self) -> Result<Vec<Location>, ClientError> {
        let request = ApiRequest::get(LOCATIONS_ENDPOINT).query("limit", ALL_LOCATIONS_LIMIT);
        let page: Page<Location> = self.client.fetch(request).await?;
        Ok(page.data)
    }

    /// # Errors
    ///
    /// Any [`ClientError`] from the authenticated pipeline or decoding.
    pub async fn get(&self, location_id: i64) -> Result<Location, ClientError> {
        self.client.fetch(ApiRequest::get(location_endpoint(location_id))).await
    }

    /// # Errors
    ///
    /// Any [`ClientError`] from the authenticated pipeline.
    pub async fn create(&self, location: &NewLocation) -> Result<(), ClientError> {
        self.client.execute(ApiRequest::post(LOCATIONS_ENDPOINT).json(location)?).await?;
        tracing::info!(branch = %location.branch_name, "location created");
        Ok(())
    }
}

#[async_trait]
impl ListSource for Locations {
    type Item = Location;

    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<Location>, ClientError> {
        self.list(query).await
    }
}
