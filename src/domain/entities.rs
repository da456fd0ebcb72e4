use serde::Serialize;

use crate::domain::errors::CuraError;
use crate::domain::ports::Mapping;

// Message value the check endpoint uses for an approved request.
pub const AUTHORIZED_MESSAGE: &str = "authorized";

// Payload POSTed to `/auth/request`. Empty fields are still serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthRequest {
    pub application: String,
    pub user: String,
    pub hostname: String,
    pub exclusion_key: String,
}

impl AuthRequest {
    pub fn new(application: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            application: application.into(),
            user: user.into(),
            hostname: String::new(),
            exclusion_key: String::new(),
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, CuraError> {
        serde_json::to_vec(self)
            .map_err(|err| CuraError::Protocol(format!("auth request encode: {err}")))
    }
}

// Reply to `/auth/request`; only the pending id matters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub id: String,
}

impl AuthResponse {
    pub fn from_mapping(mut mapping: Mapping) -> Result<Self, CuraError> {
        match mapping.remove("id") {
            Some(id) if !id.is_empty() => Ok(Self { id }),
            Some(_) => Err(CuraError::Protocol("auth request returned an empty id".into())),
            None => Err(CuraError::Protocol("auth request reply has no id".into())),
        }
    }
}

// Reply to `/auth/check/<id>`. Missing message means still pending.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckResponse {
    pub message: Option<String>,
}

impl CheckResponse {
    pub fn from_mapping(mut mapping: Mapping) -> Self {
        Self {
            message: mapping.remove("message"),
        }
    }

    // Denied and pending are indistinguishable here.
    pub fn is_authorized(&self) -> bool {
        self.message.as_deref() == Some(AUTHORIZED_MESSAGE)
    }
}
