//! Bounded draining of a works stream into a response.

use futures::{StreamExt, TryStreamExt};

use super::{WorksSource, build_query, works_stream};
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::models::{JournalWorksRequest, JournalWorksResponse};

/// Answer a journal works request against `source`.
///
/// Collects at most `request.max_items` items (none, and no item request, when it is
/// zero or negative), then fetches the total count if asked. Any failure fails the
/// whole request; items already collected are discarded.
pub async fn assemble<S>(
    source: &S,
    request: &JournalWorksRequest,
    config: &Config,
) -> ApiResult<JournalWorksResponse>
where
    S: WorksSource + ?Sized,
{
    let query = build_query(source, request)?;
    tracing::debug!(issn = query.issn(), params = ?query.params(), "Built works query");

    let limit = request.item_limit();
    let items = if limit > 0 {
        works_stream(source, &query, config.page_size(limit))
            .take(limit)
            .try_collect::<Vec<_>>()
            .await
            .map_err(ApiError::UpstreamIteration)?
    } else {
        Vec::new()
    };

    let count = if request.include_count {
        Some(source.count(&query).await.map_err(ApiError::UpstreamCount)?)
    } else {
        None
    };

    tracing::info!(
        issn = query.issn(),
        items = items.len(),
        count = ?count,
        "Assembled journal works response"
    );

    Ok(JournalWorksResponse { items, count })
}
