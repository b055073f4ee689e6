//! Account administration.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use async_trait::async_trait;

use crate::error::ClientError;
use crate::forms::UserPayload;
use crate::http::{ApiClient, ApiRequest};
use crate::types::{Page, UserDetail, UserProfile};
use crate::views::{ListQuery, ListSource};

pub const USERS_ENDPOINT: &str = "/users";

/// Filter key for `GET /users`; value is a lowercase role name.
pub const ROLE_FILTER: &str = "role";

fn user_endpoint(user_id: i64) -> String {
    format!("{USERS_ENDPOINT}/{user_id}")
}

#[derive(Clone)]
pub struct Users {
    client: ApiClient,
}

impl Users {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Any [`ClientError`] from the authenticated pipeline or decoding.
    pub async fn list(&self, query: &ListQuery) -> Result<Page<UserProfile>, ClientError> {
        let request = ApiRequest::get(USERS_ENDPOINT).query_pairs(query.to_params());
        self.client.fetch(request).await
    }

    /// Profile plus loan history.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the authenticated pipeline or decoding.
    pub async fn get(&self, user_id: i64) -> Result<UserDetail, ClientError> {
        self.client.fetch(ApiRequest::get(user_endpoint(user_id))).await
    }

    /// # Errors
    ///
    /// Any [`ClientError`] from the authenticated pipeline.
    pub async fn create(&self, user: &UserPayload) -> Result<(), ClientError> {
        self.client.execute(ApiRequest::post(USERS_ENDPOINT).json(user)?).await?;
        tracing::info!(username = %user.username, role = user.role.as_str(), "user created");
        Ok(())
    }

    /// # Errors
    ///
    /// Any [`ClientError`] from the authenticated pipeline.
    pub async fn update(&self, user_id: i64, user: &UserPayload) -> Result<(), ClientError> {
        self.client.execute(ApiRequest::put(user_endpoint(user_id)).json(user)?).await
    }
}

#[async_trait]
impl ListSource for Users {
    type Item = UserProfile;

    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<UserProfile>, ClientError> {
        self.list(query).await
    }
}
