//! Paginated, filterable list state.
//!
//! DESIGN
//! ======
//! `ListQuery` is the complete input of one list fetch. `ListView` owns the
//! current query together with the last page it produced, and refetches only
//! when the query actually changes. Any change to search, filters or sort
//! sends the view back to page 1.
//!
//! ERROR HANDLING
//! ==============
//! A failed fetch keeps the previously shown rows and records a display
//! message; the next successful fetch clears it.

#[cfg(test)]
#[path = "list_test.rs"]
mod list_test;

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::ClientError;
use crate::types::{Page, total_pages};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Parameters of one list request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    /// Resource-specific filters (`role`, `isActive`, `majorId`, ...).
    /// Empty values are not sent.
    pub filters: BTreeMap<String, String>,
    pub sort: Option<(String, SortOrder)>,
    pub page: u32,
    pub limit: u32,
}

impl ListQuery {
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self { search: String::new(), filters: BTreeMap::new(), sort: None, page: 1, limit }
    }

    #[must_use]
    pub fn sorted_by(mut self, field: &str, order: SortOrder) -> Self {
        self.sort = Some((field.to_owned(), order));
        self
    }

    #[must_use]
    pub fn filter(mut self, key: &str, value: impl ToString) -> Self {
        self.filters.insert(key.to_owned(), value.to_string());
        self
    }

    /// Query-string pairs in wire order: search, filters, sort, paging.
    #[must_use]
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        let search = self.search.trim();
        if !search.is_empty() {
            params.push(("search".to_owned(), search.to_owned()));
        }
        for (key, value) in &self.filters {
            if !value.is_empty() {
                params.push((key.clone(), value.clone()));
            }
        }
        if let Some((field, order)) = &self.sort {
            params.push(("sortBy".to_owned(), field.clone()));
            params.push(("order".to_owned(), order.as_str().to_owned()));
        }
        params.push(("page".to_owned(), self.page.to_string()));
        params.push(("limit".to_owned(), self.limit.to_string()));
        params
    }

    fn same_selection(&self, other: &Self) -> bool {
        self.search == other.search && self.filters == other.filters && self.sort == other.sort
    }
}

/// A paginated collection endpoint.
#[async_trait]
pub trait ListSource: Send + Sync {
    type Item: Send;

    async fn fetch_page(&self, query: &ListQuery) -> Result<Page<Self::Item>, ClientError>;
}

pub struct ListView<S: ListSource> {
    source: S,
    query: ListQuery,
    rows: Vec<S::Item>,
    total: u64,
    error: Option<String>,
}

impl<S: ListSource> ListView<S> {
    /// Empty view; nothing is fetched until [`ListView::reload`].
    pub fn new(source: S, query: ListQuery) -> Self {
        Self { source, query, rows: Vec::new(), total: 0, error: None }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn rows(&self) -> &[S::Item] {
        &self.rows
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.query.limit)
    }

    /// Message of the last failed fetch, if it has not been superseded.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetch the current query once.
    ///
    /// # Errors
    ///
    /// Returns the fetch error after recording its display message.
    pub async fn reload(&mut self) -> Result<(), ClientError> {
        match self.source.fetch_page(&self.query).await {
            Ok(page) => {
                self.rows = page.data;
                self.total = page.total;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, page = self.query.page, "list fetch failed");
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Edit the query. A changed selection resets to page 1; an unchanged
    /// query issues no request.
    ///
    /// # Errors
    ///
    /// See [`ListView::reload`].
    pub async fn update<F>(&mut self, edit: F) -> Result<(), ClientError>
    where
        F: FnOnce(&mut ListQuery),
    {
        let before = self.query.clone();
        edit(&mut self.query);
        if !self.query.same_selection(&before) {
            self.query.page = 1;
        }
        if self.query == before {
            return Ok(());
        }
        self.reload().await
    }

    /// # Errors
    ///
    /// See [`ListView::reload`].
    pub async fn set_search(&mut self, search: &str) -> Result<(), ClientError> {
        self.update(|q| q.search = search.to_owned()).await
    }

    /// Set one filter; an empty value removes it.
    ///
    /// # Errors
    ///
    /// See [`ListView::reload`].
    pub async fn set_filter(&mut self, key: &str, value: &str) -> Result<(), ClientError> {
        self.update(|q| {
            if value.is_empty() {
                q.filters.remove(key);
            } else {
                q.filters.insert(key.to_owned(), value.to_owned());
            }
        })
        .await
    }

    /// # Errors
    ///
    /// See [`ListView::reload`].
    pub async fn set_sort(&mut self, field: &str, order: SortOrder) -> Result<(), ClientError> {
        self.update(|q| q.sort = Some((field.to_owned(), order))).await
    }

    /// Jump to `page`, clamped to `[1, total_pages]`.
    ///
    /// # Errors
    ///
    /// See [`ListView::reload`].
    pub async fn go_to(&mut self, page: u32) -> Result<(), ClientError> {
        let last = self.total_pages().max(1);
        self.update(|q| q.page = page.clamp(1, last)).await
    }

    /// # Errors
    ///
    /// See [`ListView::reload`].
    pub async fn next_page(&mut self) -> Result<(), ClientError> {
        let page = self.query.page.saturating_add(1);
        self.go_to(page).await
    }

    /// # Errors
    ///
    /// See [`ListView::reload`].
    pub async fn prev_page(&mut self) -> Result<(), ClientError> {
        let page = self.query.page.saturating_sub(1);
        self.go_to(page).await
    }

    /// Refetch after a create, update, delete or return.
    ///
    /// # Errors
    ///
    /// See [`ListView::reload`].
    pub async fn after_mutation(&mut self) -> Result<(), ClientError> {
        self.reload().await
    }
}
