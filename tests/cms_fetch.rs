//! End-to-end fetch tests against a mock CMS, plus fetch → generate.
//!
//! The mock server stands in for the CMS query endpoint; `cms.base_url`
//! points the client at it. Queries are matched by their exact query string,
//! built with the same `Query` type the client uses.

use httpmock::prelude::*;
use tempfile::TempDir;

use brochure::cms::{CmsClient, Query};
use brochure::config::{CmsConfig, SiteConfig};
use brochure::generate;

fn config_for(server: &MockServer) -> SiteConfig {
    let mut config = SiteConfig::default();
    config.cms.base_url = Some(server.base_url());
    config
}

fn client_for(server: &MockServer) -> CmsClient {
    CmsClient::new(&CmsConfig {
        base_url: Some(server.base_url()),
        ..CmsConfig::default()
    })
    .unwrap()
}

const QUERY_PATH: &str = "/v2024-01-01/data/query/production";

fn review_query() -> String {
    Query::records("review")
        .order_by("_createdAt desc")
        .field("_id")
        .field("name")
        .field("position")
        .field("testimonial")
        .to_query_string()
}

fn card_query() -> String {
    Query::records("serviceCard")
        .order_by("_createdAt asc")
        .field("_id")
        .field("title")
        .field("price")
        .field("features")
        .field("icon")
        .field("\"imageUrl\": image.asset->url")
        .to_query_string()
}

fn section_query() -> String {
    Query::document("servicesSection")
        .field("title")
        .field("description")
        .field("mainService")
        .field("levelsTitle")
        .field("collaborationLevels")
        .to_query_string()
}

#[tokio::test]
async fn fetch_snapshot_assembles_all_sections() {
    let server = MockServer::start();

    let reviews = server.mock(|when, then| {
        when.method(GET)
            .path(QUERY_PATH)
            .query_param("query", review_query());
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "result": [
                    {"_id": "t1", "name": "Anna Novak", "position": "CEO", "testimonial": "Flawless work."},
                    {"_id": "t2", "name": "Boris Kral", "testimonial": "Would hire again."}
                ]
            }));
    });

    let cards = server.mock(|when, then| {
        when.method(GET)
            .path(QUERY_PATH)
            .query_param("query", card_query());
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "result": [
                    {"_id": "c1", "title": "Basic", "price": "from €900",
                     "features": ["Floor plan", "Two revisions"],
                     "imageUrl": "https://cdn.test/basic.jpg"},
                    {"_id": "c2", "title": "Premium", "price": "from €2400",
                     "features": ["Everything in Basic", "Site visits"]}
                ]
            }));
    });

    let section = server.mock(|when, then| {
        when.method(GET)
            .path(QUERY_PATH)
            .query_param("query", section_query());
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "result": {
                    "title": "Our services",
                    "description": "Design from sketch to keys",
                    "mainService": {
                        "heading": "Full project design",
                        "subheading": "From study to permit",
                        "text": [
                            {"style": "normal", "children": [{"text": "We cover the whole process."}]}
                        ],
                        "image": {"asset": {"url": "https://cdn.test/hero.jpg"}, "alt": "Studio"},
                        "features": [{"title": "Permits", "description": "Handled for you"}]
                    },
                    "levelsTitle": "Levels of collaboration",
                    "collaborationLevels": [
                        {"title": "Full service", "quote": "You dream, we build",
                         "description": [{"style": "h3", "children": [{"text": "Everything included"}]}],
                         "label": "From start to finish"}
                    ]
                }
            }));
    });

    let client = client_for(&server);
    let snapshot = client.fetch_snapshot(config_for(&server)).await;

    reviews.assert();
    cards.assert();
    section.assert();

    assert_eq!(snapshot.testimonials.len(), 2);
    assert_eq!(snapshot.testimonials[0].name, "Anna Novak");
    assert_eq!(snapshot.testimonials[1].position, None);

    assert_eq!(snapshot.service_cards.len(), 2);
    assert_eq!(
        snapshot.service_cards[0].image_url.as_deref(),
        Some("https://cdn.test/basic.jpg")
    );
    assert_eq!(snapshot.service_cards[1].image_url, None);

    let section = snapshot.services_section.unwrap();
    assert_eq!(section.main.heading, "Full project design");
    assert_eq!(section.levels.len(), 1);
    assert_eq!(section.main.image_url.as_deref(), Some("https://cdn.test/hero.jpg"));
}

#[tokio::test]
async fn failed_section_is_empty_while_others_land() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET)
            .path(QUERY_PATH)
            .query_param("query", review_query());
        then.status(500);
    });

    server.mock(|when, then| {
        when.method(GET)
            .path(QUERY_PATH)
            .query_param("query", card_query());
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "result": [{"_id": "c1", "title": "Basic", "price": "from €900"}]
            }));
    });

    server.mock(|when, then| {
        when.method(GET)
            .path(QUERY_PATH)
            .query_param("query", section_query());
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"result": null}));
    });

    let client = client_for(&server);
    let snapshot = client.fetch_snapshot(config_for(&server)).await;

    // Fetch failure is degradation, not an error: the section is empty.
    assert!(snapshot.testimonials.is_empty());
    assert_eq!(snapshot.service_cards.len(), 1);
    assert!(snapshot.services_section.is_none());
}

#[tokio::test]
async fn undecodable_response_empties_the_section() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path(QUERY_PATH);
        then.status(200)
            .header("Content-Type", "application/json")
            .body("not json at all");
    });

    let client = client_for(&server);
    let snapshot = client.fetch_snapshot(config_for(&server)).await;

    assert!(snapshot.testimonials.is_empty());
    assert!(snapshot.service_cards.is_empty());
    assert!(snapshot.services_section.is_none());
}

#[tokio::test]
async fn fetch_error_propagates_from_single_fetch() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path(QUERY_PATH);
        then.status(503);
    });

    let client = client_for(&server);
    let result = client.fetch_testimonials().await;
    assert!(matches!(
        result,
        Err(brochure::cms::FetchError::Status(503))
    ));
}

#[tokio::test]
async fn fetched_snapshot_generates_a_page() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET)
            .path(QUERY_PATH)
            .query_param("query", review_query());
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "result": [
                    {"_id": "t1", "name": "Anna Novak", "position": "CEO", "testimonial": "Flawless work."}
                ]
            }));
    });

    server.mock(|when, then| {
        when.method(GET)
            .path(QUERY_PATH)
            .query_param("query", card_query());
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"result": []}));
    });

    server.mock(|when, then| {
        when.method(GET)
            .path(QUERY_PATH)
            .query_param("query", section_query());
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"result": null}));
    });

    let client = client_for(&server);
    let snapshot = client.fetch_snapshot(config_for(&server)).await;

    let tmp = TempDir::new().unwrap();
    let snapshot_path = tmp.path().join("content.json");
    std::fs::write(
        &snapshot_path,
        serde_json::to_string_pretty(&snapshot).unwrap(),
    )
    .unwrap();

    let output_dir = tmp.path().join("dist");
    generate::generate(&snapshot_path, &output_dir).unwrap();

    let html = std::fs::read_to_string(output_dir.join("index.html")).unwrap();
    assert!(html.contains("Anna Novak"));
    assert!(html.contains("Flawless work."));
    // The services fetch returned no records: empty state, not loading.
    assert!(html.contains("No services to show."));
    assert!(!html.contains("Loading"));
}
