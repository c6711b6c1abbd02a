//! Homework statuses API client.

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::error;

use crate::config::Config;
use crate::error::{BotError, RequestDiagnostics, Result};

/// Source of homework status responses.
#[allow(async_fn_in_trait)]
pub trait HomeworkSource {
    /// Fetch the raw response for homework updated since `from_date`.
    async fn fetch(&self, from_date: i64) -> Result<Value>;
}

/// Client for the homework statuses endpoint.
pub struct PracticumClient {
    endpoint: String,
    token: String,
    http_client: Client,
}

impl PracticumClient {
    pub fn new(config: &Config) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            token: config.practicum_token.clone(),
            http_client: Client::new(),
        }
    }

    fn diagnostics(&self, from_date: i64) -> RequestDiagnostics {
        RequestDiagnostics {
            endpoint: self.endpoint.clone(),
            headers: vec![(AUTHORIZATION.to_string(), "OAuth ***".to_string())],
            params: vec![("from_date".to_string(), from_date.to_string())],
        }
    }

    /// GET the endpoint and decode the body as JSON.
    ///
    /// Only HTTP 200 counts as success. Nothing is retried here.
    pub async fn get_api_answer(&self, from_date: i64) -> Result<Value> {
        let resp = self
            .http_client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|source| {
                let diagnostics = self.diagnostics(from_date);
                error!("Request to homework API failed: {diagnostics}: {source}");
                // The URL carries from_date; keep it out of the error text.
                let source = source.without_url();
                if source.is_connect() {
                    BotError::EndpointUnavailable {
                        diagnostics,
                        source,
                    }
                } else {
                    BotError::RequestFailed {
                        diagnostics,
                        source,
                    }
                }
            })?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(BotError::UnexpectedStatusCode {
                code: status.as_u16(),
            });
        }

        let body = resp.bytes().await.map_err(|source| BotError::RequestFailed {
            diagnostics: self.diagnostics(from_date),
            source: source.without_url(),
        })?;

        serde_json::from_slice(&body).map_err(|e| {
            BotError::MalformedResponse(format!("response body is not valid JSON: {e}"))
        })
    }
}

impl HomeworkSource for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value> {
        self.get_api_answer(from_date).await
    }
}
