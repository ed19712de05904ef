//! Integration tests against the live Crossref API.
//!
//! Run with: `cargo test --features integration -- --nocapture`

#![cfg(feature = "integration")]

use journal_works::client::CrossrefClient;
use journal_works::config::Config;
use journal_works::models::JournalWorksRequest;
use journal_works::works::assemble;

/// Nature.
const NATURE_ISSN: &str = "0028-0836";

fn create_client() -> CrossrefClient {
    let client = CrossrefClient::new(Config::default()).expect("Failed to create client");
    client.with_mailto(std::env::var("CROSSREF_MAILTO").ok().as_deref())
}

#[tokio::test]
async fn test_journal_works_with_count() {
    let client = create_client();
    let request = JournalWorksRequest {
        query_text: Some("cancer".into()),
        max_items: 3,
        include_count: true,
        ..JournalWorksRequest::new(NATURE_ISSN)
    };

    let resp = assemble(&client, &request, &Config::default()).await.expect("request should succeed");

    assert_eq!(resp.items.len(), 3);
    assert!(resp.count.unwrap_or(0) >= 3);
}

#[tokio::test]
async fn test_journal_works_recent_sorted() {
    let client = create_client();
    let request = JournalWorksRequest {
        from_year: Some(2023),
        sort_field: Some("published".into()),
        sort_order: Some("desc".into()),
        max_items: 5,
        ..JournalWorksRequest::new(NATURE_ISSN)
    };

    let resp = assemble(&client, &request, &Config::default()).await.expect("request should succeed");
    assert!(!resp.items.is_empty());
}

#[tokio::test]
async fn test_unknown_journal_fails_iteration() {
    let client = create_client();
    let request = JournalWorksRequest { max_items: 1, ..JournalWorksRequest::new("0000-0000") };

    let err = assemble(&client, &request, &Config::default()).await.unwrap_err();
    assert!(err.to_string().contains("CrossRef iteration error"));
}
