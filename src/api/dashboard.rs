//! Landing-page reports.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use crate::error::ClientError;
use crate::http::{ApiClient, ApiRequest};
use crate::types::{BorrowedBook, DashboardStats, TopBorrower};

pub const DASHBOARD_ENDPOINT: &str = "/dashboard";
pub const MOST_BORROWED_ENDPOINT: &str = "/most-borrowed-books";
pub const TOP_BORROWERS_ENDPOINT: &str = "/users-most-loans";

const TOP_N: u32 = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardReport {
    pub stats: DashboardStats,
    pub most_borrowed: Vec<BorrowedBook>,
    pub top_borrowers: Vec<TopBorrower>,
}

#[derive(Clone)]
pub struct Dashboard {
    client: ApiClient,
}

impl Dashboard {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch the three reports concurrently.
    ///
    /// # Errors
    ///
    /// The first [`ClientError`] among the three; partial results are dropped.
    pub async fn load(&self) -> Result<DashboardReport, ClientError> {
        let (stats, most_borrowed, top_borrowers) = tokio::try_join!(
            self.client.fetch::<DashboardStats>(ApiRequest::get(DASHBOARD_ENDPOINT)),
            self.client
                .fetch::<Vec<BorrowedBook>>(ApiRequest::get(MOST_BORROWED_ENDPOINT).query("limit", TOP_N)),
            self.client
                .fetch::<Vec<TopBorrower>>(ApiRequest::get(TOP_BORROWERS_ENDPOINT).query("limit", TOP_N)),
        )?;
        Ok(DashboardReport { stats, most_borrowed, top_borrowers })
    }
}
