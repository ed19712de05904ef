//! Journal works querying.
//!
//! A [`WorksSource`] is anything that can serve a journal's works: the Crossref
//! client in production, in-memory sources in tests. [`works_stream`] turns a
//! source and a [`WorksQuery`] into a lazy item sequence that only fetches a page
//! when the consumer asks for more, and [`assemble`] drains it into a response.

mod assemble;
mod query;

pub use assemble::assemble;
pub use query::{WorksQuery, build_query};

use futures::Stream;

use crate::config::api;
use crate::error::{ClientResult, QueryError};
use crate::models::{WorkItem, WorksPage};

/// Remote capability serving journal works.
#[async_trait::async_trait]
pub trait WorksSource: Send + Sync {
    /// Scope a query to one journal's works. Must not perform I/O.
    fn journal_works(&self, issn: &str) -> Result<WorksQuery, QueryError> {
        WorksQuery::for_journal(issn)
    }

    /// Fetch the page of `rows` items at `cursor`.
    async fn fetch_page(&self, query: &WorksQuery, cursor: &str, rows: u32) -> ClientResult<WorksPage>;

    /// Total number of works matching `query`.
    async fn count(&self, query: &WorksQuery) -> ClientResult<u64>;
}

/// Lazily walk every work matching `query`, `page_size` items per request.
///
/// The walk ends on an empty or short page, or when no next cursor is returned.
/// The first error ends the stream.
pub fn works_stream<'a, S>(
    source: &'a S,
    query: &'a WorksQuery,
    page_size: u32,
) -> impl Stream<Item = ClientResult<WorkItem>> + Send + 'a
where
    S: WorksSource + ?Sized,
{
    async_stream::try_stream! {
        let mut cursor = api::INITIAL_CURSOR.to_string();
        let mut page_number = 0u32;

        loop {
            let page = source.fetch_page(query, &cursor, page_size).await?;
            page_number += 1;

            let full = page.items.len() >= page_size as usize;
            tracing::debug!(
                issn = query.issn(),
                page = page_number,
                items = page.items.len(),
                total = page.total_results,
                "Fetched works page"
            );

            for item in page.items {
                yield item;
            }

            match page.next_cursor {
                Some(next) if full => cursor = next,
                _ => break,
            }
        }
    }
}
