//! # Dashboard Controller
//!
//! Owns the selection, the dataset cache, the current [`LoadState`] and the two table
//! paginators, and derives the [`DashboardView`] for the rendering layer.
//!
//! ## Loading
//!
//! A load is split in two so the controller is never borrowed across an `.await`:
//!
//! 1. [`begin_load`](DashboardController::begin_load) bumps the generation counter and
//!    either serves the cached dataset or hands out a [`LoadTicket`].
//! 2. [`complete_load`](DashboardController::complete_load) applies the fetch result,
//!    unless a newer load has started in the meantime, in which case the result is
//!    discarded.
//!
//! [`load`](DashboardController::load), [`refresh`](DashboardController::refresh) and
//! [`retry`](DashboardController::retry) combine both steps for callers that own the
//! controller exclusively.
//!
//! ## Failure policy
//!
//! A failed load moves to [`LoadState::Error`] and clears the displayed data. The cache
//! slot is left untouched; `retry` bypasses it anyway.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    api::DataSource,
    cache::DatasetCache,
    config::DashboardConfig,
    errors::{DashboardError, DashboardResult},
    model::{Competitor, Country, Dataset, LanguageVariant, LongTailKeyword, Selection},
    pagination::Paginator,
    state::LoadState,
    view::DashboardView,
};

/// State of the dataset as seen by the UI
pub type DatasetState = LoadState<Arc<Dataset>, DashboardError>;

/// Identifies one in-flight fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub selection: Selection,
}

/// What `begin_load` decided to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPlan {
    /// The cached dataset was applied; nothing to fetch
    Cached,
    /// A fetch is required; pass the ticket back to `complete_load`
    Fetch(LoadTicket),
}

/// Result of handing a fetch result back to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Failed,
    /// A newer load superseded this one
    Discarded,
}

pub struct DashboardController<S: DataSource> {
    source: S,
    cache: DatasetCache,
    selection: Selection,
    state: DatasetState,
    generation: u64,
    view: DashboardView,
    keywords: Paginator<LongTailKeyword>,
    competitors: Paginator<Competitor>,
}

impl<S: DataSource> DashboardController<S> {
    pub fn new(source: S, config: &DashboardConfig) -> Self {
        Self::with_cache(source, DatasetCache::new(config.cache_ttl), config)
    }

    /// Uses an existing cache, e.g. one shared across controllers.
    pub fn with_cache(source: S, cache: DatasetCache, config: &DashboardConfig) -> Self {
        let selection = Selection::default();
        Self {
            source,
            cache,
            selection,
            state: LoadState::Idle,
            generation: 0,
            view: DashboardView::empty(selection),
            keywords: Paginator::new(Vec::new(), config.keyword_page_size),
            competitors: Paginator::new(Vec::new(), config.competitor_page_size),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &DatasetCache {
        &self.cache
    }

    pub fn state(&self) -> &DatasetState {
        &self.state
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn keywords(&self) -> &Paginator<LongTailKeyword> {
        &self.keywords
    }

    pub fn keywords_mut(&mut self) -> &mut Paginator<LongTailKeyword> {
        &mut self.keywords
    }

    pub fn competitors(&self) -> &Paginator<Competitor> {
        &self.competitors
    }

    pub fn competitors_mut(&mut self) -> &mut Paginator<Competitor> {
        &mut self.competitors
    }

    /// Starts a load for the current selection.
    ///
    /// Unless `force` is set, an unexpired cached dataset is applied immediately. A
    /// forced load invalidates the cache first.
    pub fn begin_load(&mut self, force: bool) -> LoadPlan {
        self.generation += 1;

        if force {
            self.cache.invalidate();
        } else if let Some(dataset) = self.cache.get() {
            debug!(
                "📦 [LOAD] Generation {} served from cache for {}",
                self.generation,
                self.selection.composite_key()
            );
            self.apply(dataset);
            return LoadPlan::Cached;
        }

        debug!(
            "🔄 [LOAD] Generation {} fetching for {}",
            self.generation,
            self.selection.composite_key()
        );
        self.state = LoadState::Loading {
            generation: self.generation,
        };
        LoadPlan::Fetch(LoadTicket {
            generation: self.generation,
            selection: self.selection,
        })
    }

    /// Applies the result of the fetch identified by `ticket`.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: DashboardResult<Dataset>) -> LoadOutcome {
        if ticket.generation != self.generation {
            debug!(
                "⏭️ [LOAD] Discarding generation {} (current is {})",
                ticket.generation, self.generation
            );
            return LoadOutcome::Discarded;
        }

        match result {
            Ok(dataset) => {
                let dataset = self.cache.set(dataset);
                info!(
                    "✅ [LOAD] Generation {} loaded {} rows",
                    ticket.generation,
                    dataset.row_count()
                );
                self.apply(dataset);
                LoadOutcome::Applied
            }
            Err(error) => {
                warn!("❌ [LOAD] Generation {} failed: {}", ticket.generation, error);
                self.state = LoadState::Error(error);
                self.set_view(DashboardView::empty(self.selection));
                LoadOutcome::Failed
            }
        }
    }

    /// Loads through the cache.
    pub async fn load(&mut self) -> LoadOutcome {
        self.run(false).await
    }

    /// Reloads from the source, bypassing the cache.
    pub async fn refresh(&mut self) -> LoadOutcome {
        self.run(true).await
    }

    /// Retries after a failure; same as [`refresh`](Self::refresh).
    pub async fn retry(&mut self) -> LoadOutcome {
        self.run(true).await
    }

    async fn run(&mut self, force: bool) -> LoadOutcome {
        match self.begin_load(force) {
            LoadPlan::Cached => LoadOutcome::Applied,
            LoadPlan::Fetch(ticket) => {
                let result = self.source.fetch_all().await;
                self.complete_load(ticket, result)
            }
        }
    }

    /// Changes the selection and re-derives the view from the loaded dataset.
    ///
    /// Returns whether the selection changed. Callers normally follow up with a load,
    /// which is served from the cache while it is fresh.
    pub fn select(&mut self, selection: Selection) -> bool {
        if selection == self.selection {
            return false;
        }
        self.selection = selection;
        let view = match &self.state {
            LoadState::Success(dataset) => DashboardView::derive(dataset, selection),
            _ => DashboardView::empty(selection),
        };
        self.set_view(view);
        true
    }

    pub fn set_country(&mut self, country: Country) -> bool {
        self.select(Selection::new(country, self.selection.variant))
    }

    pub fn set_variant(&mut self, variant: LanguageVariant) -> bool {
        self.select(Selection::new(self.selection.country, variant))
    }

    pub fn toggle_variant(&mut self) -> bool {
        self.set_variant(self.selection.variant.toggled())
    }

    fn apply(&mut self, dataset: Arc<Dataset>) {
        let view = DashboardView::derive(&dataset, self.selection);
        self.state = LoadState::Success(dataset);
        self.set_view(view);
    }

    /// Installs a new view; the paginators reset only when their rows changed.
    fn set_view(&mut self, view: DashboardView) {
        if self.keywords.items() != view.long_tail_keywords.as_slice() {
            self.keywords.set_items(view.long_tail_keywords.clone());
        }
        if self.competitors.items() != view.competitors.as_slice() {
            self.competitors.set_items(view.competitors.clone());
        }
        self.view = view;
    }
}
