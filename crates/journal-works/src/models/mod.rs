//! Data models for journal works requests and Crossref payloads.
//!
//! Crossref uses kebab-case keys (`total-results`, `next-cursor`); work records
//! themselves pass through untouched.

mod request;
mod work;

pub use request::{JournalWorksRequest, SortOrder, WorksParams};
pub use work::{Envelope, JournalWorksResponse, WorkItem, WorkList, WorksPage};
