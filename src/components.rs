//! # Dashboard Components
//!
//! Dioxus components that render the dashboard. The leaf components only take plain
//! data and event handlers; [`Dashboard`] wires them to [`use_dashboard`].
//!
//! Styling is left to the host application; elements carry class names only.

use dioxus::prelude::*;

use crate::{
    api::{DataSource, HttpDataSource},
    config::DashboardConfig,
    hooks::{DashboardHandle, use_dashboard},
    model::{Competitor, Country, LongTailKeyword, Selection},
    pagination::PAGE_SIZE_OPTIONS,
    pie::{PieGeometry, PieSlice},
    platform::format_age,
    state::LoadState,
    view::{
        DifficultyBand, OverviewCard, format_cpc, format_float, format_number, format_percent,
        format_relevance, format_score,
    },
};

/// Full dashboard backed by the HTTP API described by `config`
#[component]
pub fn Dashboard(config: DashboardConfig) -> Element {
    let source = use_hook(|| HttpDataSource::new(config.clone()));

    match source {
        Ok(source) => rsx! { DashboardBody { source, config } },
        Err(error) => rsx! {
            div { class: "dashboard-error",
                h2 { "Dashboard is misconfigured" }
                p { "{error}" }
            }
        },
    }
}

#[component]
fn DashboardBody(source: HttpDataSource, config: DashboardConfig) -> Element {
    let dashboard = use_dashboard(source, &config);
    render_dashboard(dashboard)
}

/// Page-number buttons shown around the current page
const PAGE_WINDOW: usize = 5;

/// Renders any dashboard handle: loading indicator, error page or the full view.
pub fn render_dashboard<S: DataSource>(dashboard: DashboardHandle<S>) -> Element {
    let controller = dashboard.controller();
    let ctrl = controller.read();
    let selection = ctrl.selection();
    let geometry = PieGeometry::default();

    let body = match ctrl.state() {
        LoadState::Idle | LoadState::Loading { .. } => rsx! { LoadingIndicator {} },
        LoadState::Error(error) => rsx! {
            ErrorPanel {
                message: error.to_string(),
                on_retry: move |_| dashboard.retry(),
            }
        },
        LoadState::Success(_) => {
            let view = ctrl.view();
            let keywords = ctrl.keywords();
            let competitors = ctrl.competitors();
            let updated = ctrl.cache().age().map(format_age);
            let rows = ctrl.state().data().map_or(0, |dataset| dataset.row_count());

            rsx! {
                if let Some(updated) = updated {
                    p { class: "dashboard-updated", "Updated {updated}, {rows} rows" }
                }
                OverviewCards { cards: view.overview_cards() }
                div { class: "dashboard-charts",
                    PieChart {
                        title: "Brand keyword intent",
                        slices: view.brand_pie(&geometry),
                        geometry,
                    }
                    PieChart {
                        title: "Non-brand keyword intent",
                        slices: view.non_brand_pie(&geometry),
                        geometry,
                    }
                }
                KeywordTable { rows: keywords.visible().to_vec() }
                PaginationBar {
                    page: keywords.current_page(),
                    total_pages: keywords.total_pages(),
                    page_size: keywords.page_size(),
                    range: keywords.range(),
                    pages: keywords.page_numbers(PAGE_WINDOW),
                    total_items: keywords.len(),
                    on_page: move |page| dashboard.go_to_keyword_page(page),
                    on_page_size: move |size| dashboard.set_keyword_page_size(size),
                }
                CompetitorTable { rows: competitors.visible().to_vec() }
                PaginationBar {
                    page: competitors.current_page(),
                    total_pages: competitors.total_pages(),
                    page_size: competitors.page_size(),
                    range: competitors.range(),
                    pages: competitors.page_numbers(PAGE_WINDOW),
                    total_items: competitors.len(),
                    on_page: move |page| dashboard.go_to_competitor_page(page),
                    on_page_size: move |size| dashboard.set_competitor_page_size(size),
                }
            }
        }
    };

    rsx! {
        div { class: "dashboard",
            SelectionBar {
                selection,
                refreshing: ctrl.state().is_loading(),
                on_country: move |country| dashboard.select_country(country),
                on_toggle_variant: move |_| dashboard.toggle_variant(),
                on_refresh: move |_| dashboard.refresh(),
            }
            {body}
        }
    }
}

#[component]
pub fn LoadingIndicator() -> Element {
    rsx! {
        div { class: "dashboard-loading", "Loading SEO data..." }
    }
}

/// Full-page error with a retry button
#[component]
pub fn ErrorPanel(message: String, on_retry: EventHandler<()>) -> Element {
    rsx! {
        div { class: "dashboard-error",
            h2 { "Could not load SEO data" }
            p { "{message}" }
            button { onclick: move |_| on_retry.call(()), "Retry" }
        }
    }
}

/// Country picker, language toggle and refresh button
#[component]
pub fn SelectionBar(
    selection: Selection,
    refreshing: bool,
    on_country: EventHandler<Country>,
    on_toggle_variant: EventHandler<()>,
    on_refresh: EventHandler<()>,
) -> Element {
    let variant_label = selection.variant.toggled().label();

    rsx! {
        div { class: "dashboard-selection",
            for country in Country::ALL {
                button {
                    key: "{country.code()}",
                    class: if country == selection.country { "country active" } else { "country" },
                    onclick: move |_| on_country.call(country),
                    "{country}"
                }
            }
            button {
                class: "variant-toggle",
                onclick: move |_| on_toggle_variant.call(()),
                "Show {variant_label}"
            }
            button {
                class: "refresh",
                disabled: refreshing,
                onclick: move |_| on_refresh.call(()),
                "Refresh"
            }
        }
    }
}

#[component]
pub fn OverviewCards(cards: Vec<OverviewCard>) -> Element {
    rsx! {
        div { class: "dashboard-cards",
            for card in cards {
                div { class: "card",
                    h3 { "{card.title}" }
                    match card.band {
                        Some(band) => rsx! {
                            p {
                                class: "card-value",
                                style: "color: {band.color()}",
                                "{card.value} "
                                span { class: "band", "{band.label()}" }
                            }
                        },
                        None => rsx! {
                            p { class: "card-value", "{card.value}" }
                        },
                    }
                }
            }
        }
    }
}

/// SVG pie chart with a legend
#[component]
pub fn PieChart(title: String, slices: Vec<PieSlice>, geometry: PieGeometry) -> Element {
    let view_box = geometry.view_box();

    rsx! {
        div { class: "pie-chart",
            h3 { "{title}" }
            if slices.is_empty() {
                p { class: "no-data", "No data" }
            } else {
                svg { view_box: "{view_box}", width: "200", height: "200",
                    for slice in slices.iter() {
                        path { d: "{slice.path}", fill: "{slice.color}" }
                    }
                    for slice in slices.iter() {
                        if let Some(label) = &slice.label_anchor {
                            text {
                                x: "{label.x}",
                                y: "{label.y}",
                                text_anchor: "middle",
                                dominant_baseline: "middle",
                                fill: "#fff",
                                "{label.text}"
                            }
                        }
                    }
                }
                ul { class: "pie-legend",
                    for slice in slices.iter() {
                        li {
                            span { class: "swatch", style: "background: {slice.color}" }
                            "{slice.label} {format_percent(slice.share * 100.0)}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn KeywordTable(rows: Vec<LongTailKeyword>) -> Element {
    rsx! {
        table { class: "keyword-table",
            thead {
                tr {
                    th { "Keyword" }
                    th { "Position" }
                    th { "Volume" }
                    th { "Difficulty" }
                    th { "Traffic" }
                    th { "CPC" }
                    th { "Intent" }
                }
            }
            tbody {
                if rows.is_empty() {
                    tr { td { colspan: "7", class: "no-data", "No keywords for this selection" } }
                }
                for row in rows {
                    tr {
                        td { "{row.keyword}" }
                        td { "{row.position}" }
                        td { "{format_number(row.search_volume)}" }
                        td {
                            style: "color: {DifficultyBand::from_score(row.difficulty).color()}",
                            "{format_score(row.difficulty)}"
                        }
                        td { "{format_float(row.traffic)}" }
                        td { "{format_cpc(row.cpc)}" }
                        td { "{row.intent}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn CompetitorTable(rows: Vec<Competitor>) -> Element {
    rsx! {
        table { class: "competitor-table",
            thead {
                tr {
                    th { "Domain" }
                    th { "Relevance" }
                    th { "Common keywords" }
                    th { "Organic keywords" }
                    th { "Organic traffic" }
                    th { "Organic cost" }
                    th { "Paid keywords" }
                }
            }
            tbody {
                if rows.is_empty() {
                    tr { td { colspan: "7", class: "no-data", "No competitors for this country" } }
                }
                for row in rows {
                    tr {
                        td { "{row.domain}" }
                        td { "{format_relevance(row.relevance)}" }
                        td { "{format_number(row.common_keywords)}" }
                        td { "{format_number(row.organic_keywords)}" }
                        td { "{format_number(row.organic_traffic)}" }
                        td { "{format_float(row.organic_cost)}" }
                        td { "{format_number(row.paid_keywords)}" }
                    }
                }
            }
        }
    }
}

/// Previous/next navigation, page numbers and page-size picker
#[component]
pub fn PaginationBar(
    page: usize,
    total_pages: usize,
    page_size: usize,
    #[props(!optional)]
    range: Option<(usize, usize)>,
    // Window from `Paginator::page_numbers`
    pages: Vec<usize>,
    total_items: usize,
    on_page: EventHandler<usize>,
    on_page_size: EventHandler<usize>,
) -> Element {
    let summary = match range {
        Some((first, last)) => format!("{first}–{last} of {total_items}"),
        None => "0 of 0".to_string(),
    };

    rsx! {
        div { class: "pagination",
            span { class: "pagination-summary", "{summary}" }
            button {
                disabled: page <= 1,
                onclick: move |_| on_page.call(page.saturating_sub(1)),
                "Previous"
            }
            for number in pages {
                button {
                    key: "{number}",
                    class: if number == page { "page active" } else { "page" },
                    onclick: move |_| on_page.call(number),
                    "{number}"
                }
            }
            button {
                disabled: page >= total_pages,
                onclick: move |_| on_page.call(page + 1),
                "Next"
            }
            select {
                value: "{page_size}",
                onchange: move |event: Event<FormData>| {
                    if let Ok(size) = event.value().parse::<usize>() {
                        on_page_size.call(size);
                    }
                },
                for size in PAGE_SIZE_OPTIONS {
                    option { key: "{size}", value: "{size}", "{size} per page" }
                }
            }
        }
    }
}
