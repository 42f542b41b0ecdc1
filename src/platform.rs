//! # Cross-Platform Abstractions
//!
//! Clock and task helpers that work on both desktop and web, plus the default
//! configuration constants used by the dashboard.

use std::time::Duration;

// Monotonic clock; `std::time::Instant` panics on wasm32-unknown-unknown
#[cfg(not(target_family = "wasm"))]
pub use std::time::Instant;
#[cfg(target_family = "wasm")]
pub use web_time::Instant;

use dioxus::core::{Task, spawn as dioxus_spawn};

/// Display helpers for elapsed time
pub mod time {
    use super::*;

    /// Renders an age as `"42s ago"`, `"3m ago"` or `"2h ago"`.
    pub fn format_age(age: Duration) -> String {
        match age.as_secs() {
            secs @ 0..60 => format!("{secs}s ago"),
            secs @ 60..3600 => format!("{}m ago", secs / 60),
            secs => format!("{}h ago", secs / 3600),
        }
    }
}

/// Dioxus task helpers
pub mod task {
    use super::*;

    /// Spawns `future` on the current dioxus scope, tracing its start and end.
    ///
    /// Dropping the future through [`Task::cancel`] skips the completion trace.
    pub fn spawn_named<F>(name: &'static str, future: F) -> Task
    where
        F: std::future::Future<Output = ()> + 'static,
    {
        dioxus_spawn(async move {
            tracing::debug!("🚀 [TASK] Starting {}", name);
            future.await;
            tracing::debug!("🏁 [TASK] Completed {}", name);
        })
    }
}

/// Built-in defaults, overridable through [`crate::config::DashboardConfig`]
pub mod config {
    use super::*;

    /// Base URL of the spreadsheet-backed metrics API
    pub const DEFAULT_API_BASE_URL: &str = "https://api.sheetbest.com/sheets/seo-dashboard";

    pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

    /// Rows per page of the long-tail keyword table
    pub const DEFAULT_KEYWORD_PAGE_SIZE: usize = 10;

    /// Rows per page of the competitor table
    pub const DEFAULT_COMPETITOR_PAGE_SIZE: usize = 5;
}

pub use config::*;
pub use time::format_age;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_age_buckets() {
        assert_eq!(format_age(Duration::from_secs(0)), "0s ago");
        assert_eq!(format_age(Duration::from_secs(59)), "59s ago");
        assert_eq!(format_age(Duration::from_secs(60)), "1m ago");
        assert_eq!(format_age(Duration::from_secs(150)), "2m ago");
        assert_eq!(format_age(Duration::from_secs(3600)), "1h ago");
        assert_eq!(format_age(Duration::from_secs(7200)), "2h ago");
    }

    #[test]
    fn test_instant_measures_elapsed_time() {
        let start = Instant::now();
        assert!(start.elapsed() < DEFAULT_CACHE_TTL);
    }
}
