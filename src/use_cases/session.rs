use std::time::Duration;

use crate::domain::errors::CuraError;
use crate::domain::ports::Transport;
use crate::frameworks::config::SessionConfig;
use crate::interface_adapters::clients::ReqwestTransport;
use crate::interface_adapters::urls::base_api;
use crate::use_cases::poll::{DEFAULT_POLL_INTERVAL, wait_or_timeout};
use crate::use_cases::protocol;

pub const DEFAULT_API_VERSION: u32 = 1;
// Substituted when the caller passes no timeout or a zero one.
pub const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_secs(30);

/// A client session against one Cura server on behalf of one application.
///
/// The session holds no credential until [`Session::request_auth`] succeeds,
/// after which [`Session::auth_id`] returns the server-issued id. Failed or
/// timed-out attempts leave the session untouched.
pub struct Session<T = ReqwestTransport> {
    address: String,
    api_version: u32,
    application: String,
    auth_id: Option<String>,
    poll_interval: Duration,
    default_timeout: Duration,
    transport: T,
}

impl Session<ReqwestTransport> {
    pub fn new(address: impl Into<String>, application: impl Into<String>) -> Self {
        Self::with_transport(address, application, ReqwestTransport::new())
    }

    pub fn from_config(config: SessionConfig) -> Result<Self, CuraError> {
        let transport = match config.http_timeout {
            Some(timeout) => ReqwestTransport::with_timeout(timeout)?,
            None => ReqwestTransport::new(),
        };
        let mut session = Self::with_transport(config.address, config.application, transport)
            .with_api_version(config.api_version)
            .with_poll_interval(config.poll_interval);
        session.default_timeout = config.auth_timeout;
        // Surface a bad address at construction rather than on the first attempt.
        session.get_api()?;
        Ok(session)
    }
}

impl<T: Transport> Session<T> {
    pub fn with_transport(
        address: impl Into<String>,
        application: impl Into<String>,
        transport: T,
    ) -> Self {
        Self {
            address: address.into(),
            api_version: DEFAULT_API_VERSION,
            application: application.into(),
            auth_id: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            default_timeout: DEFAULT_AUTH_TIMEOUT,
            transport,
        }
    }

    pub fn with_api_version(mut self, version: u32) -> Self {
        self.api_version = version;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    pub fn api_version(&self) -> u32 {
        self.api_version
    }

    pub fn auth_id(&self) -> Option<&str> {
        self.auth_id.as_deref()
    }

    pub fn is_authorized(&self) -> bool {
        self.auth_id.is_some()
    }

    pub fn get_api(&self) -> Result<String, CuraError> {
        base_api(&self.address, self.api_version)
    }

    /// Ask Cura to authorize `user` and wait for the decision.
    ///
    /// `None` or a zero timeout waits for the session default (30s). The call
    /// may overrun the timeout by the latency of one check exchange.
    #[tracing::instrument(
        name = "request_auth",
        skip_all,
        fields(user = %user, application = %self.application)
    )]
    pub async fn request_auth(
        &mut self,
        user: &str,
        timeout: Option<Duration>,
    ) -> Result<(), CuraError> {
        // The granted id is assigned once per session.
        if self.auth_id.is_some() {
            return Err(CuraError::AlreadyAuthorized);
        }

        let api = self.get_api()?;
        let id = protocol::request_auth(&self.transport, &api, &self.application, user).await?;
        tracing::info!(auth_id = %id, "authorization pending.");

        let timeout = match timeout {
            Some(timeout) if !timeout.is_zero() => timeout,
            _ => self.default_timeout,
        };

        let transport = &self.transport;
        let (api, pending) = (api.as_str(), id.as_str());
        let outcome = wait_or_timeout(
            || protocol::check_auth(transport, api, pending),
            timeout,
            self.poll_interval,
        )
        .await;

        match outcome {
            Ok(()) => {
                tracing::info!(auth_id = %id, "authorization granted.");
                self.auth_id = Some(id);
                Ok(())
            }
            Err(err) => {
                if err.is_timeout() {
                    tracing::warn!(?timeout, "authorization timed out.");
                } else {
                    tracing::debug!(error = %err, "authorization failed.");
                }
                Err(err)
            }
        }
    }
}
