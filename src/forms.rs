//! Client-side form validation.
//!
//! Each form holds raw user input and validates into the typed payload the
//! matching endpoint expects. Validation happens before any request is sent;
//! business rules (loan eligibility, fines) stay on the server.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use serde::Serialize;

use crate::types::{CopyStatus, Role};

/// A form rejected before submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field} is invalid: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::Missing(field))
    } else {
        Ok(trimmed.to_owned())
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn valid_email(value: &str) -> Result<String, FormError> {
    let email = required(value, "email")?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(FormError::Invalid { field: "email", reason: "must look like name@domain" }),
    }
}

// =============================================================================
// AUTH
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    /// Trimmed `(username, password)`. The password is only checked for presence.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Missing`] for an empty field.
    pub fn validate(&self) -> Result<(String, String), FormError> {
        let username = required(&self.username, "username")?;
        if self.password.is_empty() {
            return Err(FormError::Missing("password"));
        }
        Ok((username, self.password.clone()))
    }
}

/// `POST /auth/register` payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
}

#[derive(Clone, Debug, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
}

impl RegisterForm {
    /// # Errors
    ///
    /// Returns [`FormError`] for a missing field or malformed email.
    pub fn validate(&self) -> Result<Registration, FormError> {
        Ok(Registration {
            username: required(&self.username, "username")?,
            email: valid_email(&self.email)?,
            password: required(&self.password, "password")?,
            full_name: required(&self.full_name, "full name")?,
        })
    }
}

// =============================================================================
// CATALOG
// =============================================================================

/// `POST /books` payload.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewBook {
    pub isbn: String,
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub copies_total: u32,
    pub location_id: i64,
    pub majors: Vec<i64>,
}

#[derive(Clone, Debug, Default)]
pub struct BookForm {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub publish_year: String,
    pub category: String,
    pub copies_total: u32,
    pub location_id: Option<i64>,
    pub majors: Vec<i64>,
}

impl BookForm {
    /// ISBN, title, author and location are mandatory.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] for a missing mandatory field or a non-numeric year.
    pub fn validate(&self) -> Result<NewBook, FormError> {
        let isbn = required(&self.isbn, "ISBN")?;
        let title = required(&self.title, "title")?;
        let author = required(&self.author, "author")?;
        let location_id = self.location_id.ok_or(FormError::Missing("location"))?;
        let publish_year = match optional(&self.publish_year) {
            Some(raw) => Some(
                raw.parse::<i32>()
                    .map_err(|_| FormError::Invalid { field: "publish year", reason: "must be a number" })?,
            ),
            None => None,
        };

        Ok(NewBook {
            isbn,
            title,
            author,
            publisher: optional(&self.publisher),
            publish_year,
            category: optional(&self.category),
            copies_total: self.copies_total,
            location_id,
            majors: self.majors.clone(),
        })
    }
}

/// `POST /book-copies` payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewCopy {
    #[serde(rename = "bookId")]
    pub book_id: i64,
    pub barcode: String,
    pub status: CopyStatus,
    /// Sent as `null` when left empty.
    #[serde(rename = "acquisitionDate")]
    pub acquisition_date: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct CopyForm {
    pub barcode: String,
    pub status: String,
    pub acquisition_date: String,
}

impl CopyForm {
    /// # Errors
    ///
    /// Returns [`FormError`] for an empty barcode or an unknown status.
    pub fn validate(&self, book_id: i64) -> Result<NewCopy, FormError> {
        let barcode = required(&self.barcode, "barcode")?;
        let status = if self.status.trim().is_empty() {
            CopyStatus::Available
        } else {
            CopyStatus::parse(&self.status).ok_or(FormError::Invalid {
                field: "status",
                reason: "must be available, loaned, lost or damaged",
            })?
        };
        Ok(NewCopy { book_id, barcode, status, acquisition_date: optional(&self.acquisition_date) })
    }
}

/// `POST /locations` payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewLocation {
    pub branch_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LocationForm {
    pub branch_name: String,
    pub floor: String,
    pub shelf: String,
    pub description: String,
}

impl LocationForm {
    /// # Errors
    ///
    /// Returns [`FormError::Missing`] for an empty branch name.
    pub fn validate(&self) -> Result<NewLocation, FormError> {
        Ok(NewLocation {
            branch_name: required(&self.branch_name, "branch name")?,
            floor: optional(&self.floor),
            shelf: optional(&self.shelf),
            description: optional(&self.description),
        })
    }
}

/// `POST /majors` and `PUT /majors/{id}` payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MajorName {
    pub name: String,
}

/// Trimmed major name; empty names are rejected.
///
/// # Errors
///
/// Returns [`FormError::Missing`] for a blank name.
pub fn major_name(raw: &str) -> Result<MajorName, FormError> {
    Ok(MajorName { name: required(raw, "major name")? })
}

// =============================================================================
// CIRCULATION
// =============================================================================

/// `POST /loans` payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct NewLoan {
    pub user_id: i64,
    pub copy_id: i64,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LoanForm {
    pub user_id: Option<i64>,
    pub copy_id: Option<i64>,
}

impl LoanForm {
    /// # Errors
    ///
    /// Returns [`FormError::Missing`] unless both a user and a copy are selected.
    pub fn validate(&self) -> Result<NewLoan, FormError> {
        match (self.user_id, self.copy_id) {
            (Some(user_id), Some(copy_id)) => Ok(NewLoan { user_id, copy_id }),
            (None, _) => Err(FormError::Missing("user")),
            (_, None) => Err(FormError::Missing("book copy")),
        }
    }
}

// =============================================================================
// USERS
// =============================================================================

/// `POST /users` and `PUT /users/{id}` payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserPayload {
    pub username: String,
    pub email: String,
    /// Required on create; omitted on update when left blank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub role: Role,
}

#[derive(Clone, Debug, Default)]
pub struct UserForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
}

impl UserForm {
    /// Validate for `POST /users`; a password is mandatory.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] for a missing field or malformed email.
    pub fn validate_create(&self) -> Result<UserPayload, FormError> {
        let mut payload = self.validate_common()?;
        payload.password = Some(required(&self.password, "password")?);
        Ok(payload)
    }

    /// Validate for `PUT /users/{id}`; a blank password keeps the current one.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] for a missing field or malformed email.
    pub fn validate_update(&self) -> Result<UserPayload, FormError> {
        let mut payload = self.validate_common()?;
        payload.password = optional(&self.password);
        Ok(payload)
    }

    fn validate_common(&self) -> Result<UserPayload, FormError> {
        Ok(UserPayload {
            username: required(&self.username, "username")?,
            email: valid_email(&self.email)?,
            password: None,
            full_name: required(&self.full_name, "full name")?,
            role: self.role,
        })
    }
}
