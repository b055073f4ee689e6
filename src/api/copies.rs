//! Physical copies of catalog books.
//!
//! Barcodes follow `BARCODE_{bookId}_{n}`; a new copy is offered the next
//! free `n` for its book.

#[cfg(test)]
#[path = "copies_test.rs"]
mod copies_test;

use crate::error::ClientError;
use crate::forms::NewCopy;
use crate::http::{ApiClient, ApiRequest};
use crate::types::BookCopy;

pub const COPIES_ENDPOINT: &str = "/book-copies";
pub const AVAILABLE_COPIES_ENDPOINT: &str = "/book-copies/available";

const BARCODE_PREFIX: &str = "BARCODE";

fn book_copies_endpoint(book_id: i64) -> String {
    format!("/books/{book_id}/copies")
}

/// Next barcode for `book_id` given its existing copies.
///
/// Only barcodes of the form `BARCODE_{book_id}_{n}` with a numeric `n`
/// count; anything else is ignored. `None` when the highest `n` has no
/// successor; the barcode must then be entered by hand.
#[must_use]
pub fn next_barcode(book_id: i64, copies: &[BookCopy]) -> Option<String> {
    let book = book_id.to_string();
    let last = copies
        .iter()
        .filter_map(|copy| {
            let mut parts = copy.barcode.split('_');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(BARCODE_PREFIX), Some(id), Some(n)) if id == book => n.parse::<u64>().ok(),
                _ => None,
            }
        })
        .max()
        .unwrap_or(0);
    let next = last.checked_add(1)?;
    Some(format!("{BARCODE_PREFIX}_{book_id}_{next}"))
}

#[derive(Clone)]
pub struct Copies {
    client: ApiClient,
}

impl Copies {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Copies of one book. The server answers `404` for a book without
    /// copies, which is reported as an empty list.
    ///
    /// # Errors
    ///
    /// Any other [`ClientError`] from the authenticated pipeline or decoding.
    pub async fn for_book(&self, book_id: i64) -> Result<Vec<BookCopy>, ClientError> {
        match self.client.fetch(ApiRequest::get(book_copies_endpoint(book_id))).await {
            Err(e) if e.status() == Some(404) => Ok(Vec::new()),
            other => other,
        }
    }

    /// Copies that can be lent right now.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the authenticated pipeline or decoding.
    pub async fn available(&self) -> Result<Vec<BookCopy>, ClientError> {
        self.client.fetch(ApiRequest::get(AVAILABLE_COPIES_ENDPOINT)).await
    }

    /// Suggested barcode for a new copy; `None` leaves the field for manual entry.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from fetching the book's copies.
    pub async fn suggest_barcode(&self, book_id: i64) -> Result<Option<String>, ClientError> {
        let copies = self.for_book(book_id).await?;
        let barcode = next_barcode(book_id, &copies);
        if barcode.is_none() {
            tracing::warn!(book_id, "no barcode suggestion; existing suffixes exhausted");
        }
        Ok(barcode)
    }

    /// # Errors
    ///
    /// Any [`ClientError`] from the authenticated pipeline.
    pub async fn create(&self, copy: &NewCopy) -> Result<(), ClientError> {
        self.client.execute(ApiRequest::post(COPIES_ENDPOINT).json(copy)?).await?;
        tracing::info!(book_id = copy.book_id, barcode = %copy.barcode, "copy registered");
        Ok(())
    }
}
