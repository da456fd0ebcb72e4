use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::errors::CuraError;

// Flat view of a JSON reply: top-level string fields only.
pub type Mapping = HashMap<String, String>;

// The protocol depends on this trait, not on a concrete HTTP client.
// Implementations read each body to completion before returning.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Mapping, CuraError>;

    // POST with `Content-Type: application/json`.
    async fn post(&self, url: &str, body: Vec<u8>) -> Result<Mapping, CuraError>;
}
