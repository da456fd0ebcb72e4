use crate::domain::errors::CuraError;
use crate::domain::ports::{Mapping, Transport};
use async_trait::async_trait;
use reqwest::{Client, Response, header::CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;

// Thin wrapper around reqwest for Cura API calls.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    // Bound each exchange; an elapsed exchange surfaces as a transport error.
    pub fn with_timeout(timeout: Duration) -> Result<Self, CuraError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CuraError::transport)?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<Mapping, CuraError> {
        tracing::debug!(%url, "cura GET");
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(CuraError::transport)?;
        read_mapping(res).await
    }

    async fn post(&self, url: &str, body: Vec<u8>) -> Result<Mapping, CuraError> {
        tracing::debug!(%url, bytes = body.len(), "cura POST");
        let res = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(CuraError::transport)?;
        read_mapping(res).await
    }
}

// Status codes are not interpreted; Cura reports semantic errors in the body.
async fn read_mapping(res: Response) -> Result<Mapping, CuraError> {
    let status = res.status();
    // `bytes` drains the body and hands the connection back to the pool.
    let body = res.bytes().await.map_err(CuraError::transport)?;
    if !status.is_success() {
        tracing::debug!(%status, "cura replied with non-success status");
    }
    decode_mapping(&body)
}

// Keep top-level string fields; anything else in the object is ignored.
pub fn decode_mapping(body: &[u8]) -> Result<Mapping, CuraError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|err| CuraError::Decode(err.to_string()))?;
    let Value::Object(object) = value else {
        return Err(CuraError::Decode("response body is not a JSON object".into()));
    };

    Ok(object
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(text) => Some((key, text)),
            _ => None,
        })
        .collect())
}
