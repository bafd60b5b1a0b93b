/// HTTP client for the hosted ranking backend (PostgREST-style API).
///
/// The backend owns the tables, row-level security and the
/// `handle_comparison` procedure; this client only reads the ranked
/// working set and submits winner/loser picks.
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use shelfrank_core::{BackendError, ItemRating, RankedItem, RatingBackend};

/// Configuration for the backend endpoint.
pub struct ApiConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
}

pub struct RankingApi {
    client: Client,
    config: ApiConfig,
}

#[derive(Serialize)]
struct HandleComparisonParams {
    winner_id: i64,
    loser_id: i64,
}

impl RankingApi {
    pub fn new(client: Client, config: ApiConfig) -> Self {
        RankingApi { client, config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.endpoint.trim_end_matches('/'))
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => builder.bearer_auth(key).header("apikey", key.as_str()),
            None => builder,
        }
    }

    /// Fetch the ranked working set, ordered by rating ascending.
    pub async fn fetch_ranked_items(&self) -> Result<Vec<RankedItem>, String> {
        let url = self.url("items?status=eq.ranked&rating=not.is.null&select=id,name,rating,status&order=rating.asc");

        let resp = self
            .authed(self.client.get(&url))
            .send()
            .await
            .map_err(|e| format!("HTTP request failed: {e}"))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(format!("Backend returned {status}: {}", &body[..body.len().min(200)]));
        }

        resp.json::<Vec<RankedItem>>()
            .await
            .map_err(|e| format!("Failed to parse items response: {e}"))
    }
}

#[async_trait]
impl RatingBackend for RankingApi {
    /// Invoke the remote `handle_comparison` procedure — the
    /// authoritative Elo update.
    async fn submit_comparison(&self, winner_id: i64, loser_id: i64) -> Result<(), BackendError> {
        let url = self.url("rpc/handle_comparison");
        let params = HandleComparisonParams { winner_id, loser_id };

        let resp = self
            .authed(self.client.post(&url).json(&params))
            .send()
            .await
            .map_err(|e| BackendError::Submit(format!("HTTP request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(BackendError::Submit(format!(
                "backend returned {status}: {}",
                &body[..body.len().min(200)]
            )));
        }

        Ok(())
    }

    /// Read back the two items' post-update ratings.
    async fn fetch_ratings(&self, ids: [i64; 2]) -> Result<Vec<ItemRating>, BackendError> {
        let url = self.url(&format!("items?id=in.({},{})&select=id,rating", ids[0], ids[1]));

        let resp = self
            .authed(self.client.get(&url))
            .send()
            .await
            .map_err(|e| BackendError::Fetch(format!("HTTP request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(BackendError::Fetch(format!(
                "backend returned {status}: {}",
                &body[..body.len().min(200)]
            )));
        }

        resp.json::<Vec<ItemRating>>()
            .await
            .map_err(|e| BackendError::Fetch(format!("failed to parse ratings response: {e}")))
    }
}
