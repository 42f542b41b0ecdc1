//! # Dashboard Hooks
//!
//! [`use_dashboard`] keeps a [`DashboardController`] in a signal and drives its loads
//! from dioxus tasks. It loads once on mount; selection changes reload through the cache
//! and `refresh`/`retry` bypass it.
//!
//! Superseded loads are handled twice over: the previous task is cancelled, and should
//! it still complete, the controller discards its result by generation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dioxus::prelude::*;
//! use seo_dashboard::prelude::*;
//!
//! #[component]
//! fn Page(source: HttpDataSource, config: DashboardConfig) -> Element {
//!     let dashboard = use_dashboard(source, &config);
//!     let key = dashboard.controller().read().view().key.clone();
//!     rsx! { p { "Showing {key}" } }
//! }
//! ```

use dioxus::core::Task;
use dioxus::prelude::*;

use crate::{
    api::DataSource,
    config::DashboardConfig,
    controller::{DashboardController, LoadPlan},
    model::{Country, LanguageVariant},
    platform::task::spawn_named,
};

/// Copyable handle to the dashboard state of one component tree
pub struct DashboardHandle<S: DataSource> {
    controller: Signal<DashboardController<S>>,
    in_flight: Signal<Option<Task>>,
}

impl<S: DataSource> Clone for DashboardHandle<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: DataSource> Copy for DashboardHandle<S> {}

impl<S: DataSource> PartialEq for DashboardHandle<S> {
    fn eq(&self, other: &Self) -> bool {
        self.controller == other.controller && self.in_flight == other.in_flight
    }
}

impl<S: DataSource> DashboardHandle<S> {
    /// The controller signal, for reading state and the derived view
    pub fn controller(&self) -> Signal<DashboardController<S>> {
        self.controller
    }

    /// Whether a fetch task is currently running
    pub fn is_fetching(&self) -> bool {
        self.in_flight.read().is_some()
    }

    /// Starts a load, cancelling any fetch still in flight.
    pub fn load(mut self, force: bool) {
        let plan = self.controller.write().begin_load(force);

        if let Some(previous) = self.in_flight.write().take() {
            previous.cancel();
        }

        let LoadPlan::Fetch(ticket) = plan else {
            return;
        };

        let source = self.controller.peek().source().clone();
        let mut controller = self.controller;
        let mut in_flight = self.in_flight;

        let task = spawn_named("dashboard-load", async move {
            let result = source.fetch_all().await;
            let mut ctrl = controller.write();
            ctrl.complete_load(ticket, result);
            if ctrl.generation() == ticket.generation {
                in_flight.set(None);
            }
        });
        self.in_flight.set(Some(task));
    }

    /// Reloads from the API, bypassing the cache.
    pub fn refresh(self) {
        self.load(true);
    }

    /// Retries after an error, bypassing the cache.
    pub fn retry(self) {
        self.load(true);
    }

    pub fn select_country(mut self, country: Country) {
        let changed = self.controller.write().set_country(country);
        if changed {
            self.load(false);
        }
    }

    pub fn select_variant(mut self, variant: LanguageVariant) {
        let changed = self.controller.write().set_variant(variant);
        if changed {
            self.load(false);
        }
    }

    pub fn toggle_variant(mut self) {
        let changed = self.controller.write().toggle_variant();
        if changed {
            self.load(false);
        }
    }

    pub fn go_to_keyword_page(mut self, page: usize) {
        self.controller.write().keywords_mut().go_to_page(page);
    }

    pub fn set_keyword_page_size(mut self, page_size: usize) {
        self.controller.write().keywords_mut().set_page_size(page_size);
    }

    pub fn go_to_competitor_page(mut self, page: usize) {
        self.controller.write().competitors_mut().go_to_page(page);
    }

    pub fn set_competitor_page_size(mut self, page_size: usize) {
        self.controller.write().competitors_mut().set_page_size(page_size);
    }
}

/// Creates the dashboard state for this component and loads it on mount.
///
/// `source` and `config` are only read on the first render. The mount load runs from a
/// spawned task so no signal is written while the component renders.
pub fn use_dashboard<S: DataSource>(source: S, config: &DashboardConfig) -> DashboardHandle<S> {
    let controller = use_signal(|| DashboardController::new(source, config));
    let in_flight = use_signal(|| None::<Task>);
    let handle = DashboardHandle {
        controller,
        in_flight,
    };

    use_hook(move || {
        spawn_named("dashboard-mount", async move { handle.load(false) });
    });

    handle
}
