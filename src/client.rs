use crate::constants::{API_HOST, TOKEN_FILE, UNCATEGORIZED_FOLDER_ID, USER_AGENT_TAG};
use crate::error::{ImporterError, Result};
use crate::types::{DiscogsApi, RateBudget, RecordQuery, ResolvedRelease};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use serde_json::Value;
use std::fs;
use tracing::{debug, instrument, warn};

/// Discogs API client. Attaches the Authorization and User-Agent headers to
/// every outgoing request.
pub struct DiscogsClient {
    http: reqwest::Client,
    base_url: String,
}

impl DiscogsClient {
    /// Builds a client from the personal access token stored in TOKEN_FILE.
    /// The token is not validated locally; an invalid token surfaces as
    /// authentication failures from the remote side during later calls.
    pub fn authenticate(username: &str) -> Result<Self> {
        let contents = fs::read_to_string(TOKEN_FILE).map_err(|err| {
            ImporterError::Config(format!(
                "Failed to read access token from {TOKEN_FILE}: {err}"
            ))
        })?;
        let token = contents.lines().next().unwrap_or("").trim();
        Self::with_base_url(username, token, API_HOST)
    }

    /// Builds a client against an arbitrary base URL (tests point this at a
    /// local mock server).
    pub fn with_base_url(username: &str, token: &str, base_url: &str) -> Result<Self> {
        let auth = HeaderValue::from_str(&format!("Discogs token={token}"))
            .map_err(|err| ImporterError::Config(format!("Invalid access token: {err}")))?;
        let agent = HeaderValue::from_str(&format!("{username}/{USER_AGENT_TAG}"))
            .map_err(|err| ImporterError::Config(format!("Invalid username: {err}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(USER_AGENT, agent);

        // No request timeout is configured; a hanging endpoint blocks the run.
        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self, query: &RecordQuery) -> String {
        let mut url = format!("{}/database/search?", self.base_url);
        // Values are appended verbatim with no percent-encoding, so an artist
        // or title containing '&' or '=' corrupts the query.
        for (param, value) in query.params() {
            url.push_str(&format!("{param}={value}&"));
        }
        url
    }

    async fn search_release(&self, query: &RecordQuery) -> Result<ResolvedRelease> {
        let res = self.http.get(self.search_url(query)).send().await?;
        let status = res.status().as_u16();

        let data: Value = match res.json().await {
            Ok(data) => data,
            Err(_) => return Err(ImporterError::UnexpectedApi { status }),
        };
        if status != 200 || data.get("results").is_none() {
            return Err(ImporterError::UnexpectedApi { status });
        }

        let first = match data["results"].as_array() {
            Some(results) if !results.is_empty() => &results[0],
            _ => return Err(ImporterError::NoResults),
        };

        let id = match &first["id"] {
            Value::Number(id) => id.to_string(),
            Value::String(id) => id.clone(),
            _ => return Err(ImporterError::MissingField("id".to_string())),
        };
        let title = first["title"]
            .as_str()
            .ok_or_else(|| ImporterError::MissingField("title".to_string()))?
            .to_string();

        debug!("Resolved release {} ({})", title, id);
        Ok(ResolvedRelease { id, title })
    }
}

#[async_trait::async_trait]
impl DiscogsApi for DiscogsClient {
    #[instrument(skip(self, query), fields(artist = %query.artist, title = %query.title))]
    async fn search(&self, query: &RecordQuery) -> Result<ResolvedRelease> {
        match self.search_release(query).await {
            Ok(release) => Ok(release),
            Err(err) => {
                warn!(
                    "Failed to find release for search {:?} in Discogs database: {}",
                    query.params(),
                    err
                );
                Err(err)
            }
        }
    }

    async fn add_to_collection(
        &self,
        username: &str,
        release: &ResolvedRelease,
    ) -> Result<RateBudget> {
        let url = format!(
            "{}/users/{}/collection/folders/{}/releases/{}",
            self.base_url, username, UNCATEGORIZED_FOLDER_ID, release.id
        );
        let res = self.http.post(&url).send().await?;
        let status = res.status().as_u16();
        if status != 201 {
            return Err(ImporterError::AddFailed {
                title: release.title.clone(),
                status,
            });
        }
        Ok(RateBudget::from_headers(res.headers()))
    }
}
