#![doc = include_str!("../README.md")]

// Core modules
pub mod api;
pub mod cache;
pub mod config;
pub mod controller;
pub mod errors;
pub mod model;
pub mod pagination;
pub mod pie;
pub mod platform;
pub mod state;
pub mod view;

// Dioxus integration
pub mod components;
pub mod hooks;

pub mod prelude {
    //! The prelude exports the types needed to embed the dashboard.

    // Data loading
    pub use crate::api::{DataSource, Endpoint, HttpDataSource, fetch_all};
    pub use crate::cache::{DatasetCache, TtlCache};
    pub use crate::config::DashboardConfig;
    pub use crate::controller::{DashboardController, LoadOutcome, LoadPlan, LoadTicket};
    pub use crate::errors::{DashboardError, DashboardResult};

    // Data model and derived views
    pub use crate::model::{
        Competitor, Country, Dataset, DomainInfo, KeywordTypeShare, LanguageVariant,
        LongTailKeyword, Selection,
    };
    pub use crate::state::LoadState;
    pub use crate::view::{DashboardView, DifficultyBand};

    // Rendering helpers
    pub use crate::pagination::Paginator;
    pub use crate::pie::{PieEntry, PieGeometry, PieSlice, pie_slices};

    // Hooks and components
    pub use crate::components::Dashboard;
    pub use crate::hooks::{DashboardHandle, use_dashboard};
}
