use crate::constants::RATE_LIMIT_PAUSE_SECS;
use crate::error::Result;
use crate::types::{DiscogsApi, RecordQuery};
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Summary of a complete import run
#[derive(Debug, Serialize)]
pub struct ImportReport {
    pub visited: usize,
    pub added: usize,
    pub skipped: usize,
    pub throttled: usize,
}

/// One batch run against a user's collection. Owns no state across runs.
pub struct ImportSession {
    api: Arc<dyn DiscogsApi>,
    username: String,
    limit: usize,
    pause: Duration,
}

impl ImportSession {
    /// `limit` bounds the total records visited; 0 means unlimited.
    pub fn new(api: Arc<dyn DiscogsApi>, username: String, limit: usize) -> Self {
        Self {
            api,
            username,
            limit,
            pause: Duration::from_secs(RATE_LIMIT_PAUSE_SECS),
        }
    }

    /// Overrides the rate-limit pause length (tests use a zero pause)
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Updates the user's Discogs collection with every release that resolves.
    /// A failed search skips the record and continues; a failed add aborts
    /// the whole run. Pauses when the remote rate budget runs low.
    #[instrument(skip(self, records), fields(username = %self.username))]
    pub async fn update_collection(&self, records: &[RecordQuery]) -> Result<ImportReport> {
        info!("Starting import of {} records", records.len());
        let mut report = ImportReport {
            visited: 0,
            added: 0,
            skipped: 0,
            throttled: 0,
        };

        for record in records {
            report.visited += 1;

            let release = match self.api.search(record).await {
                Ok(release) => release,
                Err(err) => {
                    // Search failures are per-record recoverable; the add
                    // path below is intentionally stricter.
                    debug!("Skipping record after failed search: {}", err);
                    report.skipped += 1;
                    if self.reached_limit(report.visited) {
                        break;
                    }
                    continue;
                }
            };

            print!("Adding {} to collection...", release.title);
            let _ = std::io::stdout().flush();
            let budget = self.api.add_to_collection(&self.username, &release).await?;
            println!("Done!");
            report.added += 1;

            if self.reached_limit(report.visited) {
                break;
            }

            // Only a successful add reports a budget, so consecutive search
            // failures are never throttled.
            if budget.is_low() {
                info!(
                    "Rate limit low ({} calls remaining), pausing",
                    budget.remaining
                );
                println!(
                    "Discogs API rate limit reached. Pausing for {} seconds...",
                    self.pause.as_secs()
                );
                report.throttled += 1;
                tokio::time::sleep(self.pause).await;
            }
        }

        info!(
            "Import finished: {} visited, {} added, {} skipped, {} pauses",
            report.visited, report.added, report.skipped, report.throttled
        );
        Ok(report)
    }

    fn reached_limit(&self, visited: usize) -> bool {
        self.limit != 0 && visited >= self.limit
    }
}
