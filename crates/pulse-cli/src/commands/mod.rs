//! CLI command implementations
//!
//! Commands are organized by output:
//! - `core` - Shared utilities (load_engine, load_snapshot, resolve_as_of)
//! - `forecast` - Month-by-month projection table
//! - `alerts` - Alerts with caller-side dismissals
//! - `summary` - Runway and headline figures
//! - `config` - Active engine settings

pub mod alerts;
pub mod config;
pub mod core;
pub mod forecast;
pub mod summary;

// Re-export command functions for main.rs
pub use alerts::*;
pub use config::*;
pub use core::*;
pub use forecast::*;
pub use summary::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
