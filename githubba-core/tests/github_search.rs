//! GitHub search client against a mock server, and the per-feed query plans.

use chrono::NaiveDate;
use githubba_core::github::{GithubClient, GithubError};
use githubba_core::search::{FeedQuery, SearchCriteria, PER_PAGE, RANDOM_MAX_PAGE, STAR_BUCKETS};
use githubba_core::types::FeedType;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn repo_json(id: u64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "full_name": format!("octo/{name}"),
        "owner": { "login": "octo", "id": 1, "avatar_url": "https://avatars.example/1" },
        "html_url": format!("https://github.com/octo/{name}"),
        "description": null,
        "fork": false,
        "created_at": "2026-09-01T10:00:00Z",
        "updated_at": "2026-10-01T10:00:00Z",
        "stargazers_count": 42,
        "watchers_count": 42,
        "forks_count": 3,
        "language": "Rust",
        "topics": ["cli", "tui"],
        "license": { "key": "mit", "name": "MIT License", "spdx_id": "MIT" }
    })
}

fn new_feed_request() -> githubba_core::search::SearchRequest {
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    FeedQuery::new(FeedType::New, Some("Rust".into()), today, 0).next_request()
}

#[tokio::test]
async fn parses_search_items_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(query_param("q", "stars:>=5 language:Rust created:>=2026-09-19"))
        .and(query_param("sort", "created"))
        .and(query_param("order", "desc"))
        .and(query_param("per_page", "30"))
        .and(query_param("page", "1"))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 2,
            "incomplete_results": false,
            "items": [repo_json(7, "alpha"), repo_json(9, "beta")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GithubClient::new(&server.uri(), None).unwrap();
    let items = client.search(&new_feed_request()).await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, 7);
    assert_eq!(items[1].full_name, "octo/beta");
    assert_eq!(items[0].license.as_ref().and_then(|l| l.spdx_id.as_deref()), Some("MIT"));
    assert_eq!(items[0].owner.html_url, "", "missing owner url defaults to empty");
}

#[tokio::test]
async fn sends_bearer_token_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GithubClient::new(&format!("{}/", server.uri()), Some(" s3cret ")).unwrap();
    let items = client.search(&new_feed_request()).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn exhausted_quota_maps_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", "1760000000")
                .set_body_json(json!({ "message": "API rate limit exceeded" })),
        )
        .mount(&server)
        .await;

    let client = GithubClient::new(&server.uri(), None).unwrap();
    let err = client.search(&new_feed_request()).await.unwrap_err();
    assert!(
        matches!(err, GithubError::RateLimited { reset_at: Some(1_760_000_000) }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn other_failures_carry_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "message": "Validation Failed" })),
        )
        .mount(&server)
        .await;

    let client = GithubClient::new(&server.uri(), None).unwrap();
    match client.search(&new_feed_request()).await {
        Err(GithubError::Status { status, message }) => {
            assert_eq!(status, 422);
            assert_eq!(message, "Validation Failed");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let client = GithubClient::new(&server.uri(), None).unwrap();
    let err = client.search(&new_feed_request()).await.unwrap_err();
    assert!(matches!(err, GithubError::Decode(_)), "got {err:?}");
}

#[test]
fn new_feed_walks_pages_in_order() {
    let today = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
    let mut query = FeedQuery::new(FeedType::New, None, today, 0);

    let pages: Vec<u32> = (0..3).map(|_| query.next_request().page).collect();
    assert_eq!(pages, vec![1, 2, 3]);

    let request = query.next_request();
    assert_eq!(request.criteria.to_query(), "stars:>=5 created:>=2026-02-03");
    assert_eq!(request.per_page, PER_PAGE);
}

#[test]
fn random_feed_is_deterministic_per_seed_and_in_range() {
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let mut a = FeedQuery::new(FeedType::Random, Some("Go".into()), today, 42);
    let mut b = FeedQuery::new(FeedType::Random, Some("Go".into()), today, 42);

    for _ in 0..50 {
        let (ra, rb) = (a.next_request(), b.next_request());
        assert_eq!(ra, rb);
        assert!(STAR_BUCKETS.contains(&ra.criteria.stars.as_str()));
        assert!((1..=RANDOM_MAX_PAGE).contains(&ra.page));
        assert_eq!(ra.sort, None);
        assert_eq!(ra.criteria.language.as_deref(), Some("Go"));
    }
}

#[test]
fn random_feed_reaches_every_bucket_and_both_page_bounds() {
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let mut query = FeedQuery::new(FeedType::Random, None, today, 7);
    let requests: Vec<_> = (0..500).map(|_| query.next_request()).collect();

    for bucket in STAR_BUCKETS {
        assert!(requests.iter().any(|r| r.criteria.stars == *bucket), "bucket {bucket} never drawn");
    }
    assert!(requests.iter().any(|r| r.page == 1));
    assert!(requests.iter().any(|r| r.page == RANDOM_MAX_PAGE));

    let other: Vec<_> = {
        let mut q = FeedQuery::new(FeedType::Random, None, today, 8);
        (0..20).map(|_| q.next_request()).collect()
    };
    assert_ne!(requests[..20], other[..], "different seeds give different sequences");
}

#[test]
fn blank_language_means_all_languages() {
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let query = FeedQuery::new(FeedType::Random, Some("  ".into()), today, 1);
    assert_eq!(query.language(), None);
}

#[test]
fn multi_word_languages_are_quoted() {
    let criteria = SearchCriteria {
        stars: "10..50".into(),
        language: Some("Jupyter Notebook".into()),
        created: None,
    };
    assert_eq!(criteria.to_query(), "stars:10..50 language:\"Jupyter Notebook\"");
}
