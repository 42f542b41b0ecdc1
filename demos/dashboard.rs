//! SEO Dashboard Demo
//!
//! Launches the dashboard against the API configured through `SEO_DASHBOARD_*`
//! environment variables, falling back to the built-in defaults.

use dioxus::prelude::*;
use seo_dashboard::prelude::*;

fn app() -> Element {
    let config = use_hook(|| match DashboardConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::warn!("❌ {error}; using defaults");
            DashboardConfig::default()
        }
    });

    rsx! {
        div { style: "padding: 20px; font-family: sans-serif;",
            h1 { "SEO Dashboard" }
            p { "Source: {config.base_url}" }
            Dashboard { config }
        }
    }
}

fn main() {
    // Initialize tracing for debug logs
    tracing_subscriber::fmt::init();

    launch(app);
}
