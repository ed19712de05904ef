//! Property-based tests for bounded consumption.

use proptest::prelude::*;
use serde_json::json;

use journal_works::config::Config;
use journal_works::error::ClientResult;
use journal_works::models::{JournalWorksRequest, WorkItem, WorksPage};
use journal_works::works::{WorksQuery, WorksSource, assemble};

/// Journal of `len` works served in pages, cursor = offset.
struct SizedJournal {
    len: usize,
}

#[async_trait::async_trait]
impl WorksSource for SizedJournal {
    async fn fetch_page(&self, _query: &WorksQuery, cursor: &str, rows: u32) -> ClientResult<WorksPage> {
        let start: usize = if cursor == "*" { 0 } else { cursor.parse().unwrap_or(self.len) };
        let end = (start + rows as usize).min(self.len);
        Ok(WorksPage {
            items: (start..end).map(|i| WorkItem(json!({ "n": i }))).collect(),
            total_results: self.len as u64,
            next_cursor: Some(end.to_string()),
        })
    }

    async fn count(&self, _query: &WorksQuery) -> ClientResult<u64> {
        Ok(self.len as u64)
    }
}

proptest! {
    /// len(items) == min(max_items, journal size), in journal order.
    #[test]
    fn items_are_capped_at_min_of_limit_and_supply(
        len in 0usize..120,
        max_items in 0i64..150,
        max_rows in 1u32..40,
    ) {
        let source = SizedJournal { len };
        let config = Config { max_rows, ..Config::default() };
        let req = JournalWorksRequest { max_items, ..JournalWorksRequest::new("1234-5678") };

        let resp = futures::executor::block_on(assemble(&source, &req, &config)).expect("assemble");

        let expected = len.min(max_items as usize);
        prop_assert_eq!(resp.items.len(), expected);
        for (i, item) in resp.items.iter().enumerate() {
            prop_assert_eq!(&item.0["n"], &json!(i));
        }
    }

    /// Non-positive limits never produce items.
    #[test]
    fn non_positive_limits_yield_nothing(len in 0usize..50, max_items in i64::MIN..=0) {
        let source = SizedJournal { len };
        let req = JournalWorksRequest { max_items, ..JournalWorksRequest::new("1234-5678") };

        let resp = futures::executor::block_on(assemble(&source, &req, &Config::default())).expect("assemble");
        prop_assert!(resp.items.is_empty());
    }

    /// The year filter always becomes `from-online-pub-date:<year>`.
    #[test]
    fn year_filter_is_stringified(year in 1000i32..=9999) {
        let req = JournalWorksRequest { from_year: Some(year), ..JournalWorksRequest::new("1234-5678") };
        let query = journal_works::works::build_query(&SizedJournal { len: 0 }, &req).expect("query");

        let expected = format!("from-online-pub-date:{year}");
        prop_assert_eq!(query.filter_param(), Some(expected));
    }
}
