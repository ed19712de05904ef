//! Crossref works payloads.

use serde::{Deserialize, Serialize};

/// A work record exactly as Crossref returned it.
///
/// The record is never interpreted, only forwarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkItem(pub serde_json::Value);

impl From<serde_json::Value> for WorkItem {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Crossref response envelope: `{"status", "message-type", "message"}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Envelope<T> {
    /// "ok" on success.
    #[serde(default)]
    pub status: Option<String>,

    /// e.g. "work-list".
    #[serde(default)]
    pub message_type: Option<String>,

    pub message: T,
}

/// `message` body of a `work-list` response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WorkList {
    /// Works on this page.
    #[serde(default)]
    pub items: Vec<WorkItem>,

    /// Total works matching the query.
    #[serde(default)]
    pub total_results: u64,

    /// Cursor for the following page when deep paging.
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// One page of a cursor walk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorksPage {
    pub items: Vec<WorkItem>,
    pub total_results: u64,
    pub next_cursor: Option<String>,
}

impl From<WorkList> for WorksPage {
    fn from(list: WorkList) -> Self {
        Self { items: list.items, total_results: list.total_results, next_cursor: list.next_cursor }
    }
}

/// Response body of `GET /api/journals/{issn}/works`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JournalWorksResponse {
    /// Works in Crossref order, capped at the requested maximum.
    pub items: Vec<WorkItem>,

    /// Total matching works, present only when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}
