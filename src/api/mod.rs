//! Typed resource clients for the library REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every call here goes through [`ApiClient`], so credential attachment and
//! the one-shot refresh-and-retry apply uniformly. The resource clients add
//! no caching and no optimistic updates: lists are refetched after each
//! mutation by the views that own them.

pub mod books;
pub mod copies;
pub mod dashboard;
pub mod loans;
pub mod locations;
pub mod majors;
pub mod users;

pub use books::Books;
pub use copies::{Copies, next_barcode};
pub use dashboard::{Dashboard, DashboardReport};
pub use loans::Loans;
pub use locations::Locations;
pub use majors::Majors;
pub use users::Users;

use crate::http::ApiClient;

/// Entry point handing out one client per resource, all sharing the same
/// authenticated pipeline.
#[derive(Clone)]
pub struct Library {
    client: ApiClient,
}

impl Library {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    #[must_use]
    pub fn books(&self) -> Books {
        Books::new(self.client.clone())
    }

    #[must_use]
    pub fn copies(&self) -> Copies {
        Copies::new(self.client.clone())
    }

    #[must_use]
    pub fn loans(&self) -> Loans {
        Loans::new(self.client.clone())
    }

    #[must_use]
    pub fn locations(&self) -> Locations {
        Locations::new(self.client.clone())
    }

    #[must_use]
    pub fn majors(&self) -> Majors {
        Majors::new(self.client.clone())
    }

    #[must_use]
    pub fn users(&self) -> Users {
        Users::new(self.client.clone())
    }

    #[must_use]
    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(self.client.clone())
    }
}
