use crate::errors::ClientError;
use crate::models::{CatchDraft, CatchId, CatchRecord};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// The remote store that owns catch records. The dashboard never writes to
/// its own cache; it goes through here and then re-lists.
#[async_trait]
pub trait CatchBackend: Send + Sync {
    async fn list(&self) -> Result<Vec<CatchRecord>, ClientError>;

    async fn create(&self, draft: &CatchDraft) -> Result<(), ClientError>;

    /// Success is judged by HTTP status alone.
    async fn update(&self, id: CatchId, draft: &CatchDraft) -> Result<(), ClientError>;

    async fn delete(&self, id: CatchId) -> Result<(), ClientError>;
}

#[derive(Debug, Deserialize)]
struct CatchList {
    #[serde(default)]
    data: Option<Vec<CatchRecord>>,
}

#[derive(Debug, Deserialize)]
struct Outcome {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// REST client for the catch backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl CatchBackend for HttpBackend {
    async fn list(&self) -> Result<Vec<CatchRecord>, ClientError> {
        let response = self.client.get(self.url("/catches")).send().await?;
        let body = checked_body(response).await?;
        let list: CatchList = serde_json::from_str(&body)?;
        let records = list.data.unwrap_or_default();
        debug!("fetched {} catches", records.len());
        Ok(records)
    }

    async fn create(&self, draft: &CatchDraft) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.url("/log-catch"))
            .json(draft)
            .send()
            .await?;
        expect_success(response).await
    }

    async fn update(&self, id: CatchId, draft: &CatchDraft) -> Result<(), ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/edit-catch/{id}")))
            .json(draft)
            .send()
            .await?;
        checked_body(response).await.map(|_| ())
    }

    async fn delete(&self, id: CatchId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/delete-catch/{id}")))
            .send()
            .await?;
        expect_success(response).await
    }
}

async fn checked_body(response: Response) -> Result<String, ClientError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(rejection(status, &body));
    }
    Ok(body)
}

async fn expect_success(response: Response) -> Result<(), ClientError> {
    let status = response.status();
    let body = checked_body(response).await?;
    let outcome: Outcome = serde_json::from_str(&body)?;
    if outcome.success {
        Ok(())
    } else {
        Err(ClientError::rejected(
            status.as_u16(),
            outcome.message.unwrap_or(body),
        ))
    }
}

/// Pulls the most useful explanation out of an error body: FastAPI-style
/// `detail`, then `message`, then the raw text.
fn rejection(status: StatusCode, body: &str) -> ClientError {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let field = |name: &str| {
        parsed
            .as_ref()
            .and_then(|value| value.get(name))
            .map(|detail| match detail {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
    };

    let message = field("detail")
        .or_else(|| field("message"))
        .or_else(|| Some(body.trim().to_string()).filter(|text| !text.is_empty()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

    ClientError::rejected(status.as_u16(), message)
}
