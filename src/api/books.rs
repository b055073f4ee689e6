//! `/books` catalog.

#[cfg(test)]
#[path = "books_test.rs"]
mod books_test;

use async_trait::async_trait;

use crate::error::ClientError;
use crate::forms::NewBook;
use crate::http::{ApiClient, ApiRequest};
use crate::types::{Book, Page};
use crate::views::{ListQuery, ListSource};

pub const BOOKS_ENDPOINT: &str = "/books";

/// Filter keys understood by `GET /books`.
pub const TITLE_FILTER: &str = "title";
pub const AUTHOR_FILTER: &str = "author";
pub const CATEGORY_FILTER: &str = "category";
pub const MAJOR_FILTER: &str = "majorId";

fn book_endpoint(book_id: i64) -> String {
    format!("{BOOKS_ENDPOINT}/{book_id}")
}

#[derive(Clone)]
pub struct Books {
    client: ApiClient,
}

impl Books {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Any [`ClientError`] from the authenticated pipeline or decoding.
    pub async fn list(&self, query: &ListQuery) -> Result<Page<Book>, ClientError> {
        let request = ApiRequest::get(BOOKS_ENDPOINT).query_pairs(query.to_params());
        self.client.fetch(request).await
    }

    /// # Errors
    ///
    /// Any [`ClientError`] from the authenticated pipeline or decoding.
    pub async fn get(&self, book_id: i64) -> Result<Book, ClientError> {
        self.client.fetch(ApiRequest::get(book_endpoint(book_id))).await
    }

    /// # Errors
    ///
    /// Any [`ClientError`] from the authenticated pipeline.
    pub async fn create(&self, book: &NewBook) -> Result<(), ClientError> {
        self.client.execute(ApiRequest::post(BOOKS_ENDPOINT).json(book)?).await?;
        tracing::info!(isbn = %book.isbn, "book created");
        Ok(())
    }
}

#[async_trait]
impl ListSource for Books {
    type Item = Book;

    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<Book>, ClientError> {
        self.list(query).await
    }
}
