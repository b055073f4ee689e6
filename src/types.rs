//! Wire DTOs for the library REST API.
//!
//! DESIGN
//! ======
//! These types mirror the server payloads. The backend mixes `snake_case` and
//! `camelCase` between endpoints, so renames are declared per field rather
//! than per struct.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// USERS
// =============================================================================

/// Account role.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
    Guest,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Guest => "guest",
        }
    }
}

/// User snapshot returned by login, refresh, and the `/users` collection.
///
/// Login and refresh payloads may carry only `id` and `username`; the
/// remaining fields are filled for full user records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(alias = "user_id")]
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, alias = "fullName")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// `GET /users/{id}`: a user record with its loan history.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub profile: UserProfile,
    #[serde(default)]
    pub loans: Vec<Loan>,
}

/// One row of the "users with most loans" report.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TopBorrower {
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(rename = "loanCount")]
    pub loan_count: u64,
}

// =============================================================================
// CATALOG
// =============================================================================

/// Physical shelving location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub location_id: i64,
    pub branch_name: String,
    #[serde(default)]
    pub floor: Option<String>,
    #[serde(default)]
    pub shelf: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// University major a book can be tagged with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Major {
    #[serde(rename = "majorId")]
    pub major_id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub book_id: i64,
    pub isbn: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub publish_year: Option<i32>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub copies_total: u32,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub majors: Vec<Major>,
}

/// Circulation status of a single copy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyStatus {
    #[default]
    Available,
    Loaned,
    Lost,
    Damaged,
}

impl CopyStatus {
    /// Parse the lowercase wire form.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "available" => Some(Self::Available),
            "loaned" => Some(Self::Loaned),
            "lost" => Some(Self::Lost),
            "damaged" => Some(Self::Damaged),
            _ => None,
        }
    }
}

/// Minimal book reference embedded in copies and loans.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BookRef {
    pub book_id: i64,
    pub title: String,
    #[serde(default)]
    pub isbn: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BookCopy {
    pub copy_id: i64,
    #[serde(default)]
    pub book: Option<BookRef>,
    pub barcode: String,
    #[serde(default)]
    pub status: CopyStatus,
    #[serde(default)]
    pub acquisition_date: Option<String>,
}

// =============================================================================
// LOANS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoanUser {
    pub user_id: i64,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoanCopy {
    pub copy_id: i64,
    #[serde(default)]
    pub book: Option<BookRef>,
    #[serde(default)]
    pub barcode: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub loan_id: i64,
    pub loan_date: String,
    pub due_date: String,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default)]
    pub fine_amount: Option<f64>,
    #[serde(default)]
    pub user: Option<LoanUser>,
    #[serde(default)]
    pub copy: Option<LoanCopy>,
}

impl Loan {
    /// A loan stays active until the server records a return date.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.return_date.is_none()
    }
}

// =============================================================================
// REPORTS
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_books: u64,
    pub total_copies: u64,
    pub total_users: u64,
    pub active_loans: u64,
    pub overdue_loans: u64,
}

/// One row of the "most borrowed books" report.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BorrowedBook {
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(rename = "loanCount")]
    pub loan_count: u64,
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Paginated list envelope `{data, total, page, limit}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl<T> Page<T> {
    /// `ceil(total / limit)`; zero when the collection is empty.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.limit)
    }
}

pub(crate) fn total_pages(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    u32::try_from(total.div_ceil(u64::from(limit))).unwrap_or(u32::MAX)
}
