//! Tenderdesk Library
//!
//! Terminal console for the procurement management REST API. The binary in
//! `main.rs` only sets up the terminal; everything else lives here so the
//! coordinator can be driven from tests.

use std::sync::atomic::{AtomicBool, Ordering};

pub mod api;
pub mod app;
pub mod config;
pub mod handlers;
pub mod logic;
pub mod model;
pub mod services;
pub mod ui;
pub mod utils;

pub use app::App;

// Global flag for debug mode
pub static DEBUG_MODE: AtomicBool = AtomicBool::new(false);

pub fn log_debug(msg: &str) {
    // Only log if debug mode is enabled
    if !DEBUG_MODE.load(Ordering::Relaxed) {
        return;
    }

    use std::fs::OpenOptions;
    use std::io::Write;
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(utils::get_debug_log_path())
    {
        let _ = writeln!(
            file,
            "{} {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            msg
        );
    }
}
