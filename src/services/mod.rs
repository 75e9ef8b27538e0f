//! External Services
//!
//! - api: API request queue service

pub mod api;

pub use api::{ApiRequest, ApiResponse, OptionsPurpose, Priority};
