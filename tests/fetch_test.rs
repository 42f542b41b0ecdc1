// Fetching and normalizing the five endpoints against a mock API

use seo_dashboard::api::{Endpoint, fetch_all, fetch_keyword_types};
use seo_dashboard::prelude::*;
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount(server: &MockServer, endpoint: Endpoint, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", endpoint.segment())))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_all(server: &MockServer) {
    mount(
        server,
        Endpoint::DomainInfo,
        json!({ "domainInfo": [
            {
                "country": "PL-PL",
                "countryName": "Poland",
                "domainName": "example.pl",
                "totalKeywords": 1200,
                "brandKeywords": 200,
                "nonBrandKeywords": 1000,
                "avgDifficultyBrand": 25,
                "avgDifficultyNonBrand": 48,
                "bigOpportunityKeywords": 35
            },
            {
                "key": "PL-EN",
                "name": "Poland",
                "domain": "example.pl",
                "total_keywords": "310",
                "avg_difficulty_brand": "12.5"
            }
        ]}),
    )
    .await;
    mount(
        server,
        Endpoint::KeywordTypesBrand,
        json!({ "keywordTypesBrand": [
            { "country": "PL-PL", "type": "Navigational", "percentage": 0.8 },
            { "country": "PL-PL", "type": "Commercial", "percentage": 0.2 }
        ]}),
    )
    .await;
    mount(
        server,
        Endpoint::KeywordTypesNonBrand,
        json!({ "keywordTypesNonBrand": [
            { "country": "PL-PL", "category": "Informational", "percent": 55 },
            { "country": "PL-PL", "category": "Commercial", "percent": 30 },
            { "country": "PL-PL", "category": "Seasonal", "percent": 15 }
        ]}),
    )
    .await;
    mount(
        server,
        Endpoint::LongTailKeywords,
        json!({ "longTailKeywords": [
            {
                "country": "PL-PL",
                "keyword": "buty do biegania damskie",
                "position": 4,
                "searchVolume": 880,
                "keywordDifficulty": 22,
                "traffic": 96.4,
                "CPC": 0.65,
                "searchIntent": "Commercial"
            }
        ]}),
    )
    .await;
    mount(
        server,
        Endpoint::Competitors,
        json!({ "competitors": [
            {
                "country": "PL",
                "competitor": "rival.pl",
                "competitorRelevance": 0.42,
                "commonKeywords": 640,
                "seKeywords": 12000,
                "organicTraffic": 54000,
                "organicCost": 21000.5,
                "adwordsKeywords": 12
            }
        ]}),
    )
    .await;
}

fn config(server: &MockServer) -> DashboardConfig {
    DashboardConfig::new(server.uri())
}

#[tokio::test]
async fn test_fetch_all_assembles_dataset() {
    let server = MockServer::start().await;
    mount_all(&server).await;

    let client = reqwest::Client::new();
    let dataset = fetch_all(&client, &config(&server)).await.unwrap();

    assert_eq!(dataset.domain_info.len(), 2);
    assert_eq!(dataset.domain_info[0].total_keywords, 1200);
    assert_eq!(dataset.domain_info[1].key, "PL-EN");
    assert_eq!(dataset.domain_info[1].total_keywords, 310);
    assert_eq!(dataset.domain_info[1].avg_difficulty_brand, 12.5);

    assert_eq!(dataset.long_tail_keywords[0].search_volume, 880);
    assert_eq!(dataset.long_tail_keywords[0].intent, "Commercial");

    let competitor = &dataset.competitors[0];
    assert_eq!(competitor.domain, "rival.pl");
    assert_eq!(competitor.organic_keywords, 12000);
    assert_eq!(competitor.paid_keywords, 12);
}

#[tokio::test]
async fn test_keyword_types_are_normalized_and_colored() {
    let server = MockServer::start().await;
    mount_all(&server).await;

    let client = reqwest::Client::new();
    let brand = fetch_keyword_types(&client, &config(&server), Endpoint::KeywordTypesBrand)
        .await
        .unwrap();
    assert!((brand[0].percent - 80.0).abs() < 1e-9);
    assert!((brand[1].percent - 20.0).abs() < 1e-9);
    assert_eq!(brand[0].color, seo_dashboard::model::intent_color("Navigational"));

    let non_brand = fetch_keyword_types(&client, &config(&server), Endpoint::KeywordTypesNonBrand)
        .await
        .unwrap();
    assert_eq!(non_brand[0].percent, 55.0);
    assert_eq!(non_brand[2].color, seo_dashboard::model::FALLBACK_INTENT_COLOR);
}

#[tokio::test]
async fn test_failing_endpoint_fails_the_whole_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/competitors"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    mount_all(&server).await;

    let client = reqwest::Client::new();
    let error = fetch_all(&client, &config(&server)).await.unwrap_err();
    assert_eq!(
        error,
        DashboardError::HttpStatus {
            endpoint: "competitors".to_string(),
            status: 503,
        }
    );
}

#[tokio::test]
async fn test_malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domainInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;
    mount_all(&server).await;

    let client = reqwest::Client::new();
    let error = fetch_all(&client, &config(&server)).await.unwrap_err();
    assert!(matches!(error, DashboardError::DataParsing { ref endpoint, .. } if endpoint == "domainInfo"));
}

#[tokio::test]
async fn test_slow_endpoint_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/longTailKeywords"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "longTailKeywords": [] }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    mount_all(&server).await;

    let client = reqwest::Client::new();
    let config = config(&server).with_request_timeout(Duration::from_millis(200));
    let error = fetch_all(&client, &config).await.unwrap_err();
    assert_eq!(
        error,
        DashboardError::Timeout {
            endpoint: "longTailKeywords".to_string(),
        }
    );
}

#[tokio::test]
async fn test_unreachable_api_is_a_network_error() {
    let source = HttpDataSource::new(DashboardConfig::new("http://127.0.0.1:9")).unwrap();
    let error = source.fetch_all().await.unwrap_err();
    assert!(error.is_transient());
    assert_eq!(error.endpoint(), Some("domainInfo"));
}
