//! The per-row enrichment pipeline.
//!
//! Strictly sequential: one cache check, then at most two remote queries
//! (company first, domain as fallback), then merge and flush. No row is
//! processed before the previous one finished.

use tracing::{debug, info, warn};

use crate::cache::ContactCache;
use crate::client::{LookupOutcome, NoResultReason, PersonClient, SearchScope};
use crate::error::EnrichResult;
use crate::table::InputTable;
use crate::types::ContactRecord;

/// How one row was (or was not) resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// Satisfied from the cache; no remote query issued.
    CacheHit,
    /// Resolved by a remote query and appended to the cache.
    Resolved,
    /// Remote queries were issued but produced nothing usable.
    NoResult(NoResultReason),
    /// Neither company nor domain was set; no query possible.
    Skipped,
}

/// Per-outcome counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Total rows processed.
    pub total: usize,
    /// Rows satisfied from the cache.
    pub cache_hits: usize,
    /// Rows resolved remotely.
    pub resolved: usize,
    /// Rows whose remote queries found nothing.
    pub no_result: usize,
    /// Rows with no company and no domain.
    pub skipped: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: RowOutcome) {
        self.total += 1;
        match outcome {
            RowOutcome::CacheHit => self.cache_hits += 1,
            RowOutcome::Resolved => self.resolved += 1,
            RowOutcome::NoResult(_) => self.no_result += 1,
            RowOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// Enrich every row of `table` in place.
///
/// Cache hits are answered locally; misses go to the API with company-first
/// priority. Freshly resolved rows are appended to the cache, which is
/// flushed to disk after every append. Output persistence is the caller's
/// job ([`crate::table::write_output`]).
pub async fn enrich_table(
    client: &PersonClient,
    cache: &mut ContactCache,
    table: &mut InputTable,
) -> EnrichResult<RunSummary> {
    let mut summary = RunSummary::default();

    for row in &mut table.rows {
        let outcome = if let Some(hit) = cache.lookup(&row.contact) {
            debug!(
                firstname = %row.contact.firstname,
                lastname = %row.contact.lastname,
                "found in cache"
            );
            row.emails = Some(hit.emails);
            row.phones = Some(hit.phones);
            RowOutcome::CacheHit
        } else {
            match resolve_remote(client, &row.contact).await? {
                Some(LookupOutcome::Found(data)) => {
                    cache.append(&row.contact, &data)?;
                    row.emails = Some(data.emails);
                    row.phones = Some(data.phones);
                    RowOutcome::Resolved
                }
                Some(LookupOutcome::NoResult(reason)) => RowOutcome::NoResult(reason),
                None => {
                    warn!(
                        firstname = %row.contact.firstname,
                        lastname = %row.contact.lastname,
                        "no company and no domain given, skipping"
                    );
                    RowOutcome::Skipped
                }
            }
        };
        summary.record(outcome);
    }

    info!(
        total = summary.total,
        cache_hits = summary.cache_hits,
        resolved = summary.resolved,
        no_result = summary.no_result,
        skipped = summary.skipped,
        "enrichment run finished"
    );

    Ok(summary)
}

/// Query the API for one contact with company-first priority.
///
/// A usable company result suppresses the domain query entirely; the domain
/// query runs only when the company query found nothing (or no company was
/// given). Returns `None` without issuing any query when the contact has
/// neither company nor domain.
async fn resolve_remote(
    client: &PersonClient,
    contact: &ContactRecord,
) -> EnrichResult<Option<LookupOutcome>> {
    if let Some(company) = contact.company.as_deref() {
        let outcome = client
            .lookup(
                &contact.firstname,
                &contact.lastname,
                SearchScope::Company(company),
            )
            .await?;
        if matches!(outcome, LookupOutcome::Found(_)) {
            return Ok(Some(outcome));
        }
        if let Some(domain) = contact.domain.as_deref() {
            debug!(
                firstname = %contact.firstname,
                lastname = %contact.lastname,
                domain = %domain,
                "company query found nothing, retrying by domain"
            );
            return client
                .lookup(
                    &contact.firstname,
                    &contact.lastname,
                    SearchScope::Domain(domain),
                )
                .await
                .map(Some);
        }
        return Ok(Some(outcome));
    }

    let Some(domain) = contact.domain.as_deref() else {
        return Ok(None);
    };
    client
        .lookup(
            &contact.firstname,
            &contact.lastname,
            SearchScope::Domain(domain),
        )
        .await
        .map(Some)
}
