//! Works query construction.
//!
//! Builders only record parameters; nothing here touches the network.

use std::sync::LazyLock;

use regex::Regex;

use super::WorksSource;
use crate::config::{filters, sorts};
use crate::error::QueryError;
use crate::models::{JournalWorksRequest, SortOrder};

static DATE_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}(-\d{2}(-\d{2})?)?$").expect("valid date regex"));

/// A works query scoped to one journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksQuery {
    issn: String,
    text: Option<String>,
    filters: Vec<(String, String)>,
    sort: Option<String>,
    order: Option<SortOrder>,
}

impl WorksQuery {
    /// Scope a query to the works of the journal identified by `issn`.
    ///
    /// The ISSN format is not checked here; Crossref rejects unknown journals.
    pub fn for_journal(issn: &str) -> Result<Self, QueryError> {
        let issn = issn.trim();
        if issn.is_empty() {
            return Err(QueryError::EmptyIssn);
        }

        Ok(Self {
            issn: issn.to_string(),
            text: None,
            filters: Vec::new(),
            sort: None,
            order: None,
        })
    }

    /// Free-text query across the journal's works.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add a filter. Underscores in the name are read as hyphens.
    pub fn with_filter(mut self, name: &str, value: impl Into<String>) -> Result<Self, QueryError> {
        let name = name.replace('_', "-");
        let value = value.into();

        if !filters::is_supported(&name) {
            return Err(QueryError::UnknownFilter(name));
        }
        if filters::is_date_filter(&name) && !DATE_VALUE.is_match(&value) {
            return Err(QueryError::InvalidFilterValue { name, value });
        }

        self.filters.push((name, value));
        Ok(self)
    }

    pub fn with_sort(mut self, field: &str) -> Result<Self, QueryError> {
        if !sorts::SUPPORTED.contains(&field) {
            return Err(QueryError::UnknownSort(field.to_string()));
        }
        self.sort = Some(field.to_string());
        Ok(self)
    }

    #[must_use]
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    #[must_use]
    pub fn issn(&self) -> &str {
        &self.issn
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[must_use]
    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }

    #[must_use]
    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    #[must_use]
    pub const fn order(&self) -> Option<SortOrder> {
        self.order
    }

    /// Filters in Crossref's `name:value,name:value` form.
    #[must_use]
    pub fn filter_param(&self) -> Option<String> {
        if self.filters.is_empty() {
            return None;
        }
        let joined = self
            .filters
            .iter()
            .map(|(name, value)| format!("{name}:{value}"))
            .collect::<Vec<_>>()
            .join(",");
        Some(joined)
    }

    /// Query-string parameters describing this query, excluding paging.
    #[must_use]
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(ref text) = self.text {
            params.push(("query".to_string(), text.clone()));
        }
        if let Some(filter) = self.filter_param() {
            params.push(("filter".to_string(), filter));
        }
        if let Some(ref sort) = self.sort {
            params.push(("sort".to_string(), sort.clone()));
        }
        if let Some(order) = self.order {
            params.push(("order".to_string(), order.to_string()));
        }

        params
    }
}

/// Translate a parsed request into a works query.
///
/// Applied in order: free text, online-publication year filter, sort field, sort order.
/// The order must be `asc` or `desc`.
pub fn build_query<S>(source: &S, request: &JournalWorksRequest) -> Result<WorksQuery, QueryError>
where
    S: WorksSource + ?Sized,
{
    let mut query = source.journal_works(&request.issn)?;

    if let Some(ref text) = request.query_text {
        query = query.with_text(text.as_str());
    }
    if let Some(year) = request.from_year {
        query = query.with_filter(filters::FROM_ONLINE_PUB_DATE, year.to_string())?;
    }
    if let Some(ref field) = request.sort_field {
        query = query.with_sort(field)?;
    }
    if let Some(ref order) = request.sort_order {
        query = query.with_order(order.parse()?);
    }

    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_journal_rejects_blank_issn() {
        assert_eq!(WorksQuery::for_journal("  "), Err(QueryError::EmptyIssn));
        assert_eq!(WorksQuery::for_journal("1234-5678").unwrap().issn(), "1234-5678");
    }

    #[test]
    fn test_year_filter_uses_online_pub_date_key() {
        let query = WorksQuery::for_journal("1234-5678")
            .unwrap()
            .with_filter(filters::FROM_ONLINE_PUB_DATE, 2020.to_string())
            .unwrap();

        assert_eq!(query.filters(), &[("from-online-pub-date".to_string(), "2020".to_string())]);
        assert_eq!(query.filter_param().as_deref(), Some("from-online-pub-date:2020"));
    }

    #[test]
    fn test_filter_name_underscores_become_hyphens() {
        let query = WorksQuery::for_journal("1234-5678")
            .unwrap()
            .with_filter("from_online_pub_date", "2019-05")
            .unwrap()
            .with_filter("type", "journal-article")
            .unwrap();

        assert_eq!(
            query.filter_param().as_deref(),
            Some("from-online-pub-date:2019-05,type:journal-article")
        );
    }

    #[test]
    fn test_filter_validation() {
        let base = WorksQuery::for_journal("1234-5678").unwrap();

        let err = base.clone().with_filter("from-moon-date", "2020").unwrap_err();
        assert_eq!(err, QueryError::UnknownFilter("from-moon-date".into()));

        let err = base.clone().with_filter("from-online-pub-date", "-5").unwrap_err();
        assert!(matches!(err, QueryError::InvalidFilterValue { .. }));

        assert!(base.with_filter("until-pub-date", "2021-12-31").is_ok());
    }

    #[test]
    fn test_sort_validation() {
        let base = WorksQuery::for_journal("1234-5678").unwrap();
        assert!(base.clone().with_sort("published").is_ok());
        assert_eq!(base.with_sort("title").unwrap_err(), QueryError::UnknownSort("title".into()));
    }

    #[test]
    fn test_params_order() {
        let query = WorksQuery::for_journal("1234-5678")
            .unwrap()
            .with_text("cancer")
            .with_filter("from-online-pub-date", "2020")
            .unwrap()
            .with_sort("published")
            .unwrap()
            .with_order(SortOrder::Desc);

        let keys: Vec<_> = query.params().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["query", "filter", "sort", "order"]);
    }

    #[test]
    fn test_empty_query_has_no_params() {
        let query = WorksQuery::for_journal("1234-5678").unwrap();
        assert!(query.params().is_empty());
        assert!(query.filter_param().is_none());
    }
}
