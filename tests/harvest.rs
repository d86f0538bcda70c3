//! End-to-end portal harvest tests against a mock server.
//!
//! Discovery enters at the department level because the mock server speaks
//! plain HTTP while the institution-root classifier only accepts HTTPS
//! department links; the department heuristic itself is covered by unit
//! tests in `services::links`.

use std::sync::Arc;

use lectern::models::Config;
use lectern::services::{PortalCrawler, fetch};
use lectern::storage::{DatasetStorage, LocalStorage};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> Arc<Config> {
    let mut config = Config::default();
    config.crawler.request_delay_ms = 0;
    config.crawler.max_concurrent = 4;
    config.crawler.timeout_secs = 5;
    Arc::new(config)
}

fn crawler(config: &Arc<Config>) -> PortalCrawler {
    let client = fetch::create_client(&config.crawler).expect("client");
    PortalCrawler::new(Arc::clone(config), client)
}

async fn mount_page(server: &MockServer, page_path: &str, anchors: &[&str]) {
    let body: String = anchors
        .iter()
        .map(|href| format!("<a href=\"{href}\">link</a>"))
        .collect();
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(format!("<html><body>{body}</body></html>")),
        )
        .mount(server)
        .await;
}

async fn mount_json(server: &MockServer, json_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(json_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(body.as_bytes().to_vec(), "application/json"),
        )
        .mount(server)
        .await;
}

/// Mount one department subtree with two good series and one broken one.
async fn mount_department_tree(server: &MockServer) {
    mount_page(
        server,
        "/lectures/d-phys.html",
        &["/lectures/d-phys/2018.html"],
    )
    .await;

    mount_page(
        server,
        "/lectures/d-phys/2018.html",
        &["/lectures/d-phys/2018/autumn.html"],
    )
    .await;

    // The first series link is repeated; the crawler must dedup it.
    mount_page(
        server,
        "/lectures/d-phys/2018/autumn.html",
        &[
            "/lectures/d-phys/2018/autumn/001.html",
            "/lectures/d-phys/2018/autumn/001.html",
            "/lectures/d-phys/2018/autumn/002.html",
            "/lectures/d-phys/2018/autumn/003.html",
        ],
    )
    .await;

    mount_json(
        server,
        "/lectures/d-phys/2018/autumn/001.series-metadata.json",
        r#"{"title": "Quantum Mechanics I", "protection": "NONE",
            "episodes": [{}, {}], "createdBy": "A. Lecturer"}"#,
    )
    .await;

    mount_json(
        server,
        "/lectures/d-phys/2018/autumn/002.series-metadata.json",
        r#"{"title": "Members Only", "protection": "TOKEN",
            "episodes": [{}],
            "selectedEpisode": {"createdBy": ["B. Reader", "C. Helper"]}}"#,
    )
    .await;

    // 003 has no descriptor: its failure must be recorded, not fatal.
}

#[tokio::test]
async fn harvest_department_extracts_and_reports_failures() {
    let server = MockServer::start().await;
    mount_department_tree(&server).await;

    let config = test_config();
    let department_url = format!("{}/lectures/d-phys.html", server.uri());

    let outcome = crawler(&config)
        .harvest_department(&department_url)
        .await
        .expect("harvest");

    assert_eq!(outcome.discovered, 3);
    assert_eq!(outcome.branch_failures, 0);
    assert_eq!(outcome.series.len(), 2);
    assert_eq!(outcome.failures.len(), 1);
    assert!(outcome.failures[0].link.ends_with("/003.html"));

    let quantum = outcome
        .series
        .iter()
        .find(|s| s.url.ends_with("/001.html"))
        .expect("series 001");
    assert_eq!(quantum.title.as_deref(), Some("Quantum Mechanics I"));
    assert_eq!(quantum.department, "d-phys");
    assert_eq!(quantum.year, "2018");
    assert_eq!(quantum.episode_count, 2);
    assert_eq!(quantum.lecturer.as_deref(), Some("A. Lecturer"));
    assert!(quantum.accessible);

    let restricted = outcome
        .series
        .iter()
        .find(|s| s.url.ends_with("/002.html"))
        .expect("series 002");
    assert!(!restricted.accessible);
    assert_eq!(restricted.lecturer.as_deref(), Some("B. Reader, C. Helper"));
}

#[tokio::test]
async fn harvest_is_idempotent_against_an_unchanged_site() {
    let server = MockServer::start().await;
    mount_department_tree(&server).await;

    let config = test_config();
    let department_url = format!("{}/lectures/d-phys.html", server.uri());
    let portal = crawler(&config);

    let first = portal.harvest_department(&department_url).await.unwrap();
    let second = portal.harvest_department(&department_url).await.unwrap();

    let urls = |outcome: &lectern::models::HarvestOutcome| {
        let mut urls: Vec<String> = outcome.series.iter().map(|s| s.url.clone()).collect();
        urls.sort();
        urls
    };
    assert_eq!(urls(&first), urls(&second));
}

#[tokio::test]
async fn failed_branch_is_skipped_not_fatal() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/lectures/d-phys.html",
        &[
            "/lectures/d-phys/2018.html",
            "/lectures/d-phys/2019.html",
        ],
    )
    .await;

    // 2018 works end to end; 2019 is broken.
    mount_page(
        &server,
        "/lectures/d-phys/2018.html",
        &["/lectures/d-phys/2018/spring.html"],
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/lectures/d-phys/2019.html"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    mount_page(
        &server,
        "/lectures/d-phys/2018/spring.html",
        &["/lectures/d-phys/2018/spring/101.html"],
    )
    .await;
    mount_json(
        &server,
        "/lectures/d-phys/2018/spring/101.series-metadata.json",
        r#"{"protection": "NONE", "episodes": []}"#,
    )
    .await;

    let config = test_config();
    let department_url = format!("{}/lectures/d-phys.html", server.uri());

    let outcome = crawler(&config)
        .harvest_department(&department_url)
        .await
        .expect("harvest");

    assert_eq!(outcome.branch_failures, 1);
    assert_eq!(outcome.series.len(), 1);
    assert_eq!(outcome.series[0].year, "2018");
}

#[tokio::test]
async fn run_harvest_persists_the_snapshot() {
    let server = MockServer::start().await;
    mount_department_tree(&server).await;

    let config = test_config();
    let department_url = format!("{}/lectures/d-phys.html", server.uri());
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::new(dir.path());
    let client = fetch::create_client(&config.crawler).unwrap();

    lectern::pipeline::run_harvest(
        Arc::clone(&config),
        &storage,
        client,
        Some(department_url.as_str()),
    )
    .await
    .expect("pipeline");

    let snapshot = storage.load_series().await.unwrap().expect("snapshot");
    assert_eq!(snapshot.count, 2);
    // No two records share a URL.
    let mut urls: Vec<_> = snapshot.series.iter().map(|s| s.url.as_str()).collect();
    urls.sort_unstable();
    urls.dedup();
    assert_eq!(urls.len(), snapshot.series.len());
}
