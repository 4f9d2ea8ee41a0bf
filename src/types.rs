use crate::constants::{RATE_LIMIT_FLOOR, SEARCH_COUNTRY, SEARCH_KIND};
use crate::error::Result;
use reqwest::header::HeaderMap;

/// One row of the source collection, ready to be searched
#[derive(Debug, Clone)]
pub struct RecordQuery {
    pub artist: String,
    pub title: String,
    pub year: String,
    pub kind: &'static str,
    pub country: &'static str,
}

impl RecordQuery {
    pub fn new(artist: String, title: String, year: String) -> Self {
        Self {
            artist,
            title,
            year,
            kind: SEARCH_KIND,
            country: SEARCH_COUNTRY,
        }
    }

    /// Query parameters in the order the search endpoint receives them
    pub fn params(&self) -> [(&'static str, &str); 5] {
        [
            ("artist", self.artist.as_str()),
            ("release_title", self.title.as_str()),
            ("year", self.year.as_str()),
            ("type", self.kind),
            ("country", self.country),
        ]
    }
}

/// The first search hit for a RecordQuery, as reported by the database
#[derive(Debug, Clone)]
pub struct ResolvedRelease {
    pub id: String,
    pub title: String,
}

/// Remaining-call budget reported by the API on each response
#[derive(Debug, Clone, Copy)]
pub struct RateBudget {
    pub remaining: i64,
}

impl RateBudget {
    /// Reads X-Discogs-Ratelimit-Remaining; missing or unparseable counts as 0
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let remaining = headers
            .get("X-Discogs-Ratelimit-Remaining")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<i64>().ok())
            .unwrap_or(0);
        Self { remaining }
    }

    pub fn is_low(&self) -> bool {
        self.remaining < RATE_LIMIT_FLOOR
    }
}

/// Remote catalog operations the updater drives. The real implementation
/// lives on DiscogsClient; tests script this seam.
#[async_trait::async_trait]
pub trait DiscogsApi: Send + Sync {
    /// Search the database and return the first matching release
    async fn search(&self, query: &RecordQuery) -> Result<ResolvedRelease>;

    /// Add a resolved release to the user's Uncategorized folder and
    /// report the remaining rate budget
    async fn add_to_collection(
        &self,
        username: &str,
        release: &ResolvedRelease,
    ) -> Result<RateBudget>;
}
