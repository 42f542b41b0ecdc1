//! # Derived View
//!
//! [`DashboardView`] is the read-only slice of a [`Dataset`] that matches the current
//! [`Selection`]. Deriving never mutates the dataset. A missing domain summary or empty
//! collections are ordinary display states, rendered as zeros or empty tables.
//!
//! The formatting helpers here turn raw metrics into card and table text.

use crate::{
    model::{Competitor, Dataset, DomainInfo, KeywordTypeShare, LongTailKeyword, Selection},
    pie::{PieEntry, PieGeometry, PieSlice, pie_slices},
};

/// Keyword difficulty buckets used for color coding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyBand {
    /// 0–30
    Low,
    /// 31–70
    Medium,
    /// Above 70
    High,
}

impl DifficultyBand {
    pub fn from_score(score: f64) -> Self {
        if score <= 30.0 {
            DifficultyBand::Low
        } else if score <= 70.0 {
            DifficultyBand::Medium
        } else {
            DifficultyBand::High
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            DifficultyBand::Low => "#22c55e",
            DifficultyBand::Medium => "#eab308",
            DifficultyBand::High => "#ef4444",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DifficultyBand::Low => "Easy",
            DifficultyBand::Medium => "Medium",
            DifficultyBand::High => "Hard",
        }
    }
}

/// One overview card
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewCard {
    pub title: &'static str,
    pub value: String,
    /// Set for difficulty cards
    pub band: Option<DifficultyBand>,
}

/// Rows of the dataset that belong to one selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    pub selection: Selection,
    pub key: String,
    pub domain_info: Option<DomainInfo>,
    pub brand_shares: Vec<KeywordTypeShare>,
    pub non_brand_shares: Vec<KeywordTypeShare>,
    pub long_tail_keywords: Vec<LongTailKeyword>,
    pub competitors: Vec<Competitor>,
}

impl DashboardView {
    /// The view of a selection with no data loaded
    pub fn empty(selection: Selection) -> Self {
        Self {
            selection,
            key: selection.composite_key(),
            ..Default::default()
        }
    }

    /// Filters `dataset` down to `selection`.
    ///
    /// Domain info, keyword shares and long-tail keywords match the composite key;
    /// competitors match the country code alone.
    pub fn derive(dataset: &Dataset, selection: Selection) -> Self {
        let key = selection.composite_key();
        let country = selection.competitor_key();

        let by_key = |row_key: &str| same_key(row_key, &key);

        Self {
            selection,
            domain_info: dataset
                .domain_info
                .iter()
                .find(|row| by_key(&row.key))
                .cloned(),
            brand_shares: dataset
                .brand_keyword_types
                .iter()
                .filter(|row| by_key(&row.key))
                .cloned()
                .collect(),
            non_brand_shares: dataset
                .non_brand_keyword_types
                .iter()
                .filter(|row| by_key(&row.key))
                .cloned()
                .collect(),
            long_tail_keywords: dataset
                .long_tail_keywords
                .iter()
                .filter(|row| by_key(&row.key))
                .cloned()
                .collect(),
            competitors: dataset
                .competitors
                .iter()
                .filter(|row| same_key(country_part(&row.key), country))
                .cloned()
                .collect(),
            key,
        }
    }

    pub fn has_data(&self) -> bool {
        self.domain_info.is_some()
            || !self.brand_shares.is_empty()
            || !self.non_brand_shares.is_empty()
            || !self.long_tail_keywords.is_empty()
            || !self.competitors.is_empty()
    }

    pub fn brand_pie(&self, geometry: &PieGeometry) -> Vec<PieSlice> {
        pie_slices(&share_entries(&self.brand_shares), geometry)
    }

    pub fn non_brand_pie(&self, geometry: &PieGeometry) -> Vec<PieSlice> {
        pie_slices(&share_entries(&self.non_brand_shares), geometry)
    }

    /// Summary cards; a missing domain row renders as zeros
    pub fn overview_cards(&self) -> Vec<OverviewCard> {
        let info = self.domain_info.clone().unwrap_or_default();
        vec![
            OverviewCard {
                title: "Total keywords",
                value: format_number(info.total_keywords),
                band: None,
            },
            OverviewCard {
                title: "Brand keywords",
                value: format_number(info.brand_keywords),
                band: None,
            },
            OverviewCard {
                title: "Non-brand keywords",
                value: format_number(info.non_brand_keywords),
                band: None,
            },
            OverviewCard {
                title: "Brand difficulty",
                value: format_score(info.avg_difficulty_brand),
                band: Some(DifficultyBand::from_score(info.avg_difficulty_brand)),
            },
            OverviewCard {
                title: "Non-brand difficulty",
                value: format_score(info.avg_difficulty_non_brand),
                band: Some(DifficultyBand::from_score(info.avg_difficulty_non_brand)),
            },
            OverviewCard {
                title: "Big opportunities",
                value: format_number(info.big_opportunity_keywords),
                band: None,
            },
        ]
    }
}

fn share_entries(shares: &[KeywordTypeShare]) -> Vec<PieEntry> {
    shares
        .iter()
        .map(|share| PieEntry::new(share.category.clone(), share.percent, share.color.clone()))
        .collect()
}

fn same_key(row_key: &str, key: &str) -> bool {
    row_key.trim().eq_ignore_ascii_case(key)
}

/// `PL` for `PL`, `PL-PL` and `PL-EN`
fn country_part(row_key: &str) -> &str {
    row_key.split('-').next().unwrap_or(row_key)
}

/// Integer with thousands separators, e.g. `1,200`
pub fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Rounded float with thousands separators
pub fn format_float(value: f64) -> String {
    if !value.is_finite() || value <= 0.0 {
        return "0".to_string();
    }
    format_number(value.round() as u64)
}

/// Difficulty or relevance score rounded to a whole number
pub fn format_score(value: f64) -> String {
    if value.is_finite() {
        format!("{:.0}", value)
    } else {
        "0".to_string()
    }
}

/// Cost-per-click with two decimals
pub fn format_cpc(value: f64) -> String {
    if value.is_finite() {
        format!("${value:.2}")
    } else {
        "$0.00".to_string()
    }
}

/// Percentage on the 0–100 scale, rounded
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_score(value))
}

/// Relevance on the 0–1 scale as a percentage
pub fn format_relevance(value: f64) -> String {
    format_percent(value * 100.0)
}
