//! Event Handlers
//!
//! - api: responses from the background worker
//! - keyboard: user keyboard input

pub mod api;
pub mod keyboard;

pub use api::handle_api_response;
pub use keyboard::handle_key;
