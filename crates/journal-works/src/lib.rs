//! Journal Works API
//!
//! A small HTTP service that forwards journal works queries to the Crossref REST API
//! and hosts a prebuilt web frontend.
//!
//! # Features
//!
//! - **Query translation**: free text, online-publication year filter, sort and order
//!   mapped onto a Crossref `/journals/{issn}/works` query
//! - **Bounded paging**: lazy cursor walk, drained only up to `max_items`
//! - **Typed upstream errors**: iteration, count and generic failures become `502`s
//! - **Polite pool**: per-request `mailto` identification
//!
//! # Example
//!
//! ```no_run
//! use journal_works::{CrossrefClient, config::Config, models::JournalWorksRequest, works};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = CrossrefClient::new(config.clone())?;
//!
//!     let mut request = JournalWorksRequest::new("0028-0836");
//!     request.query_text = Some("cancer".into());
//!     request.include_count = true;
//!
//!     let response = works::assemble(&client, &request, &config).await?;
//!     println!("{} of {:?}", response.items.len(), response.count);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod works;

pub use client::CrossrefClient;
pub use config::Config;
pub use error::{ApiError, ClientError, QueryError};
