//! Business Logic
//!
//! Pure functions that can be unit tested without a terminal or a server:
//! - errors: Error classification and notice wording
//! - files: Download naming and Content-Disposition parsing
//! - formatting: Currency, date, size and number display
//! - pagination: Page window around the current page
//! - query: Request query building and empty-filter stripping
//! - ui: Option cycling and selection movement

pub mod errors;
pub mod files;
pub mod formatting;
pub mod pagination;
pub mod query;
pub mod ui;
