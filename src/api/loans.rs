//! Circulation: lending and returning copies.

#[cfg(test)]
#[path = "loans_test.rs"]
mod loans_test;

use async_trait::async_trait;

use crate::error::ClientError;
use crate::forms::NewLoan;
use crate::http::{ApiClient, ApiRequest};
use crate::types::{Loan, Page};
use crate::views::{ListQuery, ListSource, SortOrder};

pub const LOANS_ENDPOINT: &str = "/loans";

/// `"true"` for open loans, `"false"` for returned ones, absent for both.
pub const ACTIVE_FILTER: &str = "isActive";

fn return_endpoint(loan_id: i64) -> String {
    format!("{LOANS_ENDPOINT}/{loan_id}/return")
}

#[derive(Clone)]
pub struct Loans {
    client: ApiClient,
}

impl Loans {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Newest loans first.
    #[must_use]
    pub fn default_query(limit: u32) -> ListQuery {
        ListQuery::new(limit).sorted_by("loan_id", SortOrder::Desc)
    }

    /// # Errors
    ///
    /// Any [`ClientError`] from the authenticated pipeline or decoding.
    pub async fn list(&self, query: &ListQuery) -> Result<Page<Loan>, ClientError> {
        let request = ApiRequest::get(LOANS_ENDPOINT).query_pairs(query.to_params());
        self.client.fetch(request).await
    }

    /// Lend a copy. Eligibility is decided by the server.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the authenticated pipeline; a refusal keeps
    /// the server's message.
    pub async fn create(&self, loan: &NewLoan) -> Result<(), ClientError> {
        self.client.execute(ApiRequest::post(LOANS_ENDPOINT).json(loan)?).await?;
        tracing::info!(user_id = loan.user_id, copy_id = loan.copy_id, "loan created");
        Ok(())
    }

    /// Mark a loan returned. Fines are computed by the server.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the authenticated pipeline.
    pub async fn return_loan(&self, loan_id: i64) -> Result<(), ClientError> {
        self.client.execute(ApiRequest::put(return_endpoint(loan_id))).await?;
        tracing::info!(loan_id, "loan returned");
        Ok(())
    }
}

#[async_trait]
impl ListSource for Loans {
    type Item = Loan;

    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<Loan>, ClientError> {
        self.list(query).await
    }
}
