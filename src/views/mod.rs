//! View-model state shared by the list screens.
//!
//! Screens never cache or patch rows locally: every parameter change issues
//! exactly one fetch, and every mutation is followed by a full refetch.

pub mod list;

pub use list::{ListQuery, ListSource, ListView, SortOrder};
