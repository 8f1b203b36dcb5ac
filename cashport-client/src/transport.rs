//! HTTP transport for the GraphQL endpoint.
//!
//! Owns the per-request concerns the pipeline stays out of: bearer auth
//! headers, JSON encoding, status/empty-body checks and a small bounded
//! retry on transient failures.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Value, json};

use crate::queries::QuerySpec;

const RETRY_ATTEMPTS: u32 = 3;

/// Anything that can execute one named query with one set of variables and
/// hand back the raw response envelope. Tests swap in scripted doubles.
#[allow(async_fn_in_trait)]
pub trait QueryTransport {
    async fn send(&self, query: &QuerySpec, variables: &Map<String, Value>) -> Result<Value>;
}

pub struct HttpTransport {
    client: reqwest::Client,
    graphql_url: String,
}

impl HttpTransport {
    pub fn new(graphql_url: impl Into<String>, access_token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {access_token}"))
                .context("access token is not a valid header value")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("building http client")?;

        Ok(Self { client, graphql_url: graphql_url.into() })
    }

    async fn post_once(&self, query: &QuerySpec, body: &Value) -> Result<reqwest::Response> {
        let mut request = self.client.post(&self.graphql_url).json(body);
        for (name, value) in query.extra_headers {
            request = request.header(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            );
        }
        Ok(request.send().await?)
    }
}

impl QueryTransport for HttpTransport {
    async fn send(&self, query: &QuerySpec, variables: &Map<String, Value>) -> Result<Value> {
        let body = json!({
            "operationName": query.operation,
            "query": query.document,
            "variables": variables,
        });

        let mut attempt = 0;
        let response = loop {
            attempt += 1;
            match self.post_once(query, &body).await {
                Ok(resp) if resp.status().is_server_error() && attempt < RETRY_ATTEMPTS => {
                    println!("{}: got {}, retrying", query.name, resp.status());
                }
                Ok(resp) => break resp,
                Err(err) if attempt < RETRY_ATTEMPTS => {
                    println!("{}: {err:#}, retrying", query.name);
                }
                Err(err) => {
                    return Err(err).with_context(|| format!("sending {}", query.name));
                }
            }
            tokio::time::sleep(Duration::from_millis(500 * u64::from(attempt))).await;
        };

        let status = response.status();
        if !status.is_success() {
            bail!("query {} failed with status {status}", query.name);
        }
        let text = response.text().await.with_context(|| format!("reading {} response", query.name))?;
        if text.is_empty() {
            bail!("empty body received from {} query", query.name);
        }
        let envelope: Value = serde_json::from_str(&text)
            .with_context(|| format!("decoding {} response", query.name))?;

        if let Some(errors) = envelope.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                bail!("query {} returned errors: {}", query.name, Value::Array(errors.clone()));
            }
        }

        Ok(envelope)
    }
}
