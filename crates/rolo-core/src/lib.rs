//! Batch contact enrichment against a people-data API.
//!
//! This crate implements the full pipeline behind the `rolo` CLI:
//!
//! - Delimited-table input (`;`-separated, Latin-1) and output (CSV)
//! - Local contact cache keyed by (firstname, lastname, company)
//! - HTTP client for the person API with company-first query priority
//! - Per-row outcomes and a run summary instead of print diagnostics
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use rolo_core::{enrich_table, ClientConfig, ContactCache, PersonClient};
//!
//! # async fn example() -> rolo_core::EnrichResult<()> {
//! let client = PersonClient::new(ClientConfig::from_env().with_api_key("secret"))?;
//! let mut cache = ContactCache::load("cache.csv")?;
//! let mut table = rolo_core::table::read_input(Path::new("contacts.csv"))?;
//!
//! let summary = enrich_table(&client, &mut cache, &mut table).await?;
//! println!("resolved {} of {} rows", summary.resolved, summary.total);
//!
//! rolo_core::table::write_output(Path::new("out.csv"), &table)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `ROLO_API_URL` | Person API base URL (default: `https://api.lusha.co`) |
//! | `ROLO_API_KEY` | API key, sent as the `api_key` request header |
//! | `ROLO_API_TIMEOUT` | Request timeout in seconds (default: 30) |

pub mod cache;
pub mod client;
pub mod enrich;
pub mod error;
pub mod table;
pub mod types;

// Re-export main types
pub use cache::{CacheHit, ContactCache};
pub use client::{LookupOutcome, NoResultReason, PersonClient, SearchScope};
pub use enrich::{enrich_table, RowOutcome, RunSummary};
pub use error::{EnrichError, EnrichResult};
pub use table::{InputRow, InputTable};
pub use types::{CacheRow, ClientConfig, ContactRecord, PersonData};
