//! # Data Fetch & Normalize
//!
//! Free functions that load the five metric collections from the spreadsheet-backed API
//! and assemble them into one [`Dataset`].
//!
//! Every endpoint answers with an envelope object whose single field is named after the
//! resource:
//!
//! ```json
//! { "domainInfo": [ { "country": "PL-PL", "totalKeywords": 1200 } ] }
//! ```
//!
//! Field names may be `camelCase` or `snake_case`; see [`crate::model`]. Keyword-type
//! rows are normalized onto the 0–100 scale and colored by intent.
//!
//! [`DataSource`] is the seam the controller loads through; [`HttpDataSource`] is the
//! reqwest-backed implementation.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{collections::HashMap, future::Future, sync::Arc};
use tracing::{debug, info, warn};

use crate::{
    config::DashboardConfig,
    errors::{DashboardError, DashboardResult},
    model::{Competitor, Dataset, DomainInfo, KeywordTypeShare, LongTailKeyword, intent_color},
};

/// The five resources the dashboard reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    DomainInfo,
    KeywordTypesBrand,
    KeywordTypesNonBrand,
    LongTailKeywords,
    Competitors,
}

impl Endpoint {
    pub const ALL: [Endpoint; 5] = [
        Endpoint::DomainInfo,
        Endpoint::KeywordTypesBrand,
        Endpoint::KeywordTypesNonBrand,
        Endpoint::LongTailKeywords,
        Endpoint::Competitors,
    ];

    /// Path segment appended to the base URL; also the envelope key of the response
    pub fn segment(self) -> &'static str {
        match self {
            Endpoint::DomainInfo => "domainInfo",
            Endpoint::KeywordTypesBrand => "keywordTypesBrand",
            Endpoint::KeywordTypesNonBrand => "keywordTypesNonBrand",
            Endpoint::LongTailKeywords => "longTailKeywords",
            Endpoint::Competitors => "competitors",
        }
    }
}

/// Something that can produce a full dataset
///
/// The controller only depends on this trait, so tests and demos can drive it with
/// canned data.
pub trait DataSource: Clone + 'static {
    fn fetch_all(&self) -> impl Future<Output = DashboardResult<Dataset>>;
}

/// Loads the dataset over HTTP
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    client: reqwest::Client,
    config: Arc<DashboardConfig>,
}

impl HttpDataSource {
    pub fn new(config: DashboardConfig) -> DashboardResult<Self> {
        config.validate()?;
        Ok(Self {
            client: reqwest::Client::new(),
            config: Arc::new(config),
        })
    }

    /// Uses an existing client, e.g. one shared with the rest of the application.
    pub fn with_client(client: reqwest::Client, config: DashboardConfig) -> DashboardResult<Self> {
        config.validate()?;
        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }
}

/// Two sources are interchangeable when they talk to the same API with the same settings.
impl PartialEq for HttpDataSource {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
    }
}

impl DataSource for HttpDataSource {
    fn fetch_all(&self) -> impl Future<Output = DashboardResult<Dataset>> {
        let source = self.clone();
        async move { fetch_all(&source.client, &source.config).await }
    }
}

/// Fetches all five collections concurrently and assembles the dataset.
///
/// All requests are awaited even if one fails early; the first failure in endpoint
/// order is returned.
pub async fn fetch_all(client: &reqwest::Client, config: &DashboardConfig) -> DashboardResult<Dataset> {
    debug!("🌐 [FETCH] Loading dataset from {}", config.base_url);

    let (domain_info, brand, non_brand, long_tail, competitors) = futures::join!(
        fetch_domain_info(client, config),
        fetch_keyword_types(client, config, Endpoint::KeywordTypesBrand),
        fetch_keyword_types(client, config, Endpoint::KeywordTypesNonBrand),
        fetch_long_tail_keywords(client, config),
        fetch_competitors(client, config),
    );

    let dataset = Dataset {
        domain_info: domain_info?,
        brand_keyword_types: brand?,
        non_brand_keyword_types: non_brand?,
        long_tail_keywords: long_tail?,
        competitors: competitors?,
    };

    info!("✅ [FETCH] Loaded dataset with {} rows", dataset.row_count());
    Ok(dataset)
}

pub async fn fetch_domain_info(
    client: &reqwest::Client,
    config: &DashboardConfig,
) -> DashboardResult<Vec<DomainInfo>> {
    fetch_rows(client, config, Endpoint::DomainInfo).await
}

/// Fetches brand or non-brand keyword-type shares, normalized and colored.
pub async fn fetch_keyword_types(
    client: &reqwest::Client,
    config: &DashboardConfig,
    endpoint: Endpoint,
) -> DashboardResult<Vec<KeywordTypeShare>> {
    fetch_rows(client, config, endpoint)
        .await
        .map(normalize_shares)
}

pub async fn fetch_long_tail_keywords(
    client: &reqwest::Client,
    config: &DashboardConfig,
) -> DashboardResult<Vec<LongTailKeyword>> {
    fetch_rows(client, config, Endpoint::LongTailKeywords).await
}

pub async fn fetch_competitors(
    client: &reqwest::Client,
    config: &DashboardConfig,
) -> DashboardResult<Vec<Competitor>> {
    fetch_rows(client, config, Endpoint::Competitors).await
}

/// GETs one endpoint and decodes its rows.
pub async fn fetch_rows<T: DeserializeOwned>(
    client: &reqwest::Client,
    config: &DashboardConfig,
    endpoint: Endpoint,
) -> DashboardResult<Vec<T>> {
    let name = endpoint.segment();
    let url = config.endpoint_url(name);
    debug!("🌐 [FETCH] GET {}", url);

    let response = client
        .get(&url)
        .timeout(config.request_timeout)
        .send()
        .await
        .map_err(|error| DashboardError::from_reqwest(name, error))?;

    let status = response.status();
    if !status.is_success() {
        warn!("❌ [FETCH] {} answered HTTP {}", name, status.as_u16());
        return Err(DashboardError::HttpStatus {
            endpoint: name.to_string(),
            status: status.as_u16(),
        });
    }

    let body: Value = response
        .json()
        .await
        .map_err(|error| DashboardError::from_reqwest(name, error))?;

    parse_envelope(endpoint, body)
}

/// Unwraps `{ "<segment>": [rows] }` and decodes each row.
///
/// A bare array body is accepted as well.
pub fn parse_envelope<T: DeserializeOwned>(endpoint: Endpoint, body: Value) -> DashboardResult<Vec<T>> {
    let name = endpoint.segment();
    let parse_error = |message: String| DashboardError::DataParsing {
        endpoint: name.to_string(),
        message,
    };

    let rows = match body {
        Value::Object(mut envelope) => match envelope.remove(name) {
            Some(Value::Array(rows)) => rows,
            Some(other) => {
                return Err(parse_error(format!(
                    "field '{name}' is {} instead of a list",
                    json_kind(&other)
                )));
            }
            None => return Err(parse_error(format!("missing field '{name}'"))),
        },
        Value::Array(rows) => {
            debug!("🌐 [FETCH] {} returned a bare list", name);
            rows
        }
        other => {
            return Err(parse_error(format!(
                "expected an object, got {}",
                json_kind(&other)
            )));
        }
    };

    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            serde_json::from_value(row).map_err(|error| parse_error(format!("row {index}: {error}")))
        })
        .collect()
}

/// Puts keyword-type shares on the 0–100 scale and assigns intent colors.
///
/// Shares are grouped by key. A group whose values are all within 0–1 and add up to
/// at most 1 is taken to be fractional and multiplied by 100; anything else is
/// already a percentage. Values are never renormalized to sum to 100.
pub fn normalize_shares(mut rows: Vec<KeywordTypeShare>) -> Vec<KeywordTypeShare> {
    let mut groups: HashMap<String, (f64, f64)> = HashMap::new();
    for row in &rows {
        let (sum, max) = groups.entry(row.key.clone()).or_insert((0.0, 0.0));
        *sum += row.percent;
        *max = max.max(row.percent);
    }

    for row in &mut rows {
        let fractional = groups
            .get(&row.key)
            .is_some_and(|(sum, max)| *sum > 0.0 && *max <= 1.0 && *sum <= 1.0 + 1e-6);
        if fractional {
            row.percent *= 100.0;
        }
        row.color = intent_color(&row.category).to_string();
    }

    rows
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
