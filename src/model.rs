//! # Data Model
//!
//! Value records fetched from the metrics API, the static country table and the
//! selection types that produce the composite join key.
//!
//! Rows deserialize from either `snake_case` or `camelCase` field names. Missing fields
//! fall back to zero or an empty string; the API is not validated at load time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Color used for intent categories without a dedicated entry
pub const FALLBACK_INTENT_COLOR: &str = "#94a3b8";

/// Fixed category → color table for keyword intents
const INTENT_COLORS: &[(&str, &str)] = &[
    ("commercial", "#3b82f6"),
    ("informational", "#10b981"),
    ("navigational", "#f59e0b"),
    ("transactional", "#ef4444"),
    ("local", "#8b5cf6"),
];

/// Look up the display color for an intent category (case-insensitive)
pub fn intent_color(category: &str) -> &'static str {
    let category = category.trim();
    INTENT_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(category))
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_INTENT_COLOR)
}

/// Summary metrics for one (country, language variant) key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainInfo {
    #[serde(
        alias = "country",
        alias = "countryKey",
        alias = "country_key",
        deserialize_with = "lenient::string"
    )]
    pub key: String,
    #[serde(
        alias = "countryName",
        alias = "country_name",
        alias = "displayName",
        deserialize_with = "lenient::string"
    )]
    pub name: String,
    #[serde(alias = "domainName", alias = "domain_name", deserialize_with = "lenient::string")]
    pub domain: String,
    #[serde(alias = "totalKeywords", deserialize_with = "lenient::u64")]
    pub total_keywords: u64,
    #[serde(alias = "brandKeywords", deserialize_with = "lenient::u64")]
    pub brand_keywords: u64,
    #[serde(alias = "nonBrandKeywords", deserialize_with = "lenient::u64")]
    pub non_brand_keywords: u64,
    #[serde(alias = "avgDifficultyBrand", deserialize_with = "lenient::f64")]
    pub avg_difficulty_brand: f64,
    #[serde(alias = "avgDifficultyNonBrand", deserialize_with = "lenient::f64")]
    pub avg_difficulty_non_brand: f64,
    #[serde(
        alias = "bigOpportunityKeywords",
        alias = "bigOpportunities",
        deserialize_with = "lenient::u64"
    )]
    pub big_opportunity_keywords: u64,
}

impl DomainInfo {
    /// Whether brand + non-brand counts stay within the total.
    ///
    /// Advisory only: the source does not enforce it and neither do we.
    pub fn counts_consistent(&self) -> bool {
        self.brand_keywords.saturating_add(self.non_brand_keywords) <= self.total_keywords
    }
}

/// Share of one intent category for a key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordTypeShare {
    #[serde(
        alias = "country",
        alias = "countryKey",
        alias = "country_key",
        deserialize_with = "lenient::string"
    )]
    pub key: String,
    #[serde(
        alias = "type",
        alias = "name",
        alias = "keywordType",
        alias = "keyword_type",
        deserialize_with = "lenient::string"
    )]
    pub category: String,
    /// Percent share on the 0–100 scale after ingestion
    #[serde(
        alias = "percentage",
        alias = "share",
        alias = "value",
        deserialize_with = "lenient::f64"
    )]
    pub percent: f64,
    /// Assigned from [`intent_color`] during ingestion
    #[serde(deserialize_with = "lenient::string")]
    pub color: String,
}

/// One tracked long-tail keyword
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LongTailKeyword {
    #[serde(
        alias = "country",
        alias = "countryKey",
        alias = "country_key",
        deserialize_with = "lenient::string"
    )]
    pub key: String,
    #[serde(deserialize_with = "lenient::string")]
    pub keyword: String,
    #[serde(deserialize_with = "lenient::u32")]
    pub position: u32,
    #[serde(alias = "searchVolume", alias = "volume", deserialize_with = "lenient::u64")]
    pub search_volume: u64,
    #[serde(
        alias = "keywordDifficulty",
        alias = "keyword_difficulty",
        deserialize_with = "lenient::f64"
    )]
    pub difficulty: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub traffic: f64,
    #[serde(
        alias = "CPC",
        alias = "costPerClick",
        alias = "cost_per_click",
        deserialize_with = "lenient::f64"
    )]
    pub cpc: f64,
    #[serde(alias = "searchIntent", alias = "search_intent", deserialize_with = "lenient::string")]
    pub intent: String,
}

/// A competing domain for one country
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Competitor {
    #[serde(
        alias = "country",
        alias = "countryCode",
        alias = "country_code",
        deserialize_with = "lenient::string"
    )]
    pub key: String,
    #[serde(
        alias = "competitor",
        alias = "competitorDomain",
        alias = "competitor_domain",
        deserialize_with = "lenient::string"
    )]
    pub domain: String,
    #[serde(
        alias = "competitorRelevance",
        alias = "competitor_relevance",
        deserialize_with = "lenient::f64"
    )]
    pub relevance: f64,
    #[serde(alias = "commonKeywords", deserialize_with = "lenient::u64")]
    pub common_keywords: u64,
    #[serde(
        alias = "organicKeywords",
        alias = "seKeywords",
        alias = "se_keywords",
        deserialize_with = "lenient::u64"
    )]
    pub organic_keywords: u64,
    #[serde(alias = "organicTraffic", deserialize_with = "lenient::u64")]
    pub organic_traffic: u64,
    #[serde(alias = "organicCost", deserialize_with = "lenient::f64")]
    pub organic_cost: f64,
    #[serde(
        alias = "adwordsKeywords",
        alias = "adwords_keywords",
        alias = "paidKeywords",
        deserialize_with = "lenient::u64"
    )]
    pub paid_keywords: u64,
}

/// Everything one load fetches, replaced wholesale
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub domain_info: Vec<DomainInfo>,
    pub brand_keyword_types: Vec<KeywordTypeShare>,
    pub non_brand_keyword_types: Vec<KeywordTypeShare>,
    pub long_tail_keywords: Vec<LongTailKeyword>,
    pub competitors: Vec<Competitor>,
}

impl Dataset {
    /// Total number of rows across all collections
    pub fn row_count(&self) -> usize {
        self.domain_info.len()
            + self.brand_keyword_types.len()
            + self.non_brand_keyword_types.len()
            + self.long_tail_keywords.len()
            + self.competitors.len()
    }
}

/// Countries the dashboard knows about
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Country {
    #[default]
    Poland,
    Spain,
    France,
    Germany,
    Netherlands,
}

impl Country {
    pub const ALL: [Country; 5] = [
        Country::Poland,
        Country::Spain,
        Country::France,
        Country::Germany,
        Country::Netherlands,
    ];

    /// Two-letter code used in the data's join keys
    pub fn code(self) -> &'static str {
        match self {
            Country::Poland => "PL",
            Country::Spain => "ES",
            Country::France => "FR",
            Country::Germany => "DE",
            Country::Netherlands => "NL",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Country::Poland => "Poland",
            Country::Spain => "Spain",
            Country::France => "France",
            Country::Germany => "Germany",
            Country::Netherlands => "Netherlands",
        }
    }

    /// Key of the native-language rows, e.g. `PL-PL`
    pub fn native_key(self) -> String {
        format!("{0}-{0}", self.code())
    }

    /// Key of the English-language rows, e.g. `PL-EN`
    pub fn english_key(self) -> String {
        format!("{}-EN", self.code())
    }

    /// Parse a country code (case-insensitive)
    pub fn from_code(code: &str) -> Option<Country> {
        Country::ALL
            .into_iter()
            .find(|country| country.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Native vs English view of a country's data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LanguageVariant {
    #[default]
    Native,
    English,
}

impl LanguageVariant {
    pub fn toggled(self) -> Self {
        match self {
            LanguageVariant::Native => LanguageVariant::English,
            LanguageVariant::English => LanguageVariant::Native,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LanguageVariant::Native => "Native",
            LanguageVariant::English => "English",
        }
    }
}

/// The user's current country/language choice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    pub country: Country,
    pub variant: LanguageVariant,
}

impl Selection {
    pub fn new(country: Country, variant: LanguageVariant) -> Self {
        Self { country, variant }
    }

    /// Join key for domain info, keyword-type and long-tail rows
    pub fn composite_key(&self) -> String {
        match self.variant {
            LanguageVariant::Native => self.country.native_key(),
            LanguageVariant::English => self.country.english_key(),
        }
    }

    /// Join key for competitor rows, which are not split by language
    pub fn competitor_key(&self) -> &'static str {
        self.country.code()
    }
}

/// Number parsing that tolerates spreadsheet cells.
///
/// Cells arrive as JSON numbers, numeric strings (`"1,200"`, `"35%"`), empty strings or
/// null. Anything unparseable becomes zero.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn to_f64(value: &Value) -> f64 {
        let parsed = match value {
            Value::Number(number) => number.as_f64().unwrap_or(0.0),
            Value::String(text) => text
                .trim()
                .trim_end_matches('%')
                .replace([',', ' '], "")
                .parse()
                .unwrap_or(0.0),
            Value::Bool(flag) => f64::from(u8::from(*flag)),
            _ => 0.0,
        };
        if parsed.is_finite() { parsed } else { 0.0 }
    }

    pub fn f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(to_f64(&Value::deserialize(deserializer)?))
    }

    pub fn u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let value = to_f64(&Value::deserialize(deserializer)?);
        Ok(if value > 0.0 { value.round() as u64 } else { 0 })
    }

    pub fn u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let value = to_f64(&Value::deserialize(deserializer)?);
        Ok(value.clamp(0.0, f64::from(u32::MAX)).round() as u32)
    }

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(text) => text,
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }
}
