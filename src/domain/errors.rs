use std::error::Error;
use std::fmt;
use std::time::Duration;

// Boxed cause for transport failures so any adapter can report its own error type.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

// Errors surfaced by every layer of the authorization handshake.
#[derive(Debug)]
pub enum CuraError {
    // Malformed address, version, endpoint, or path segment.
    Config(String),
    // Network-level failure issuing or reading an exchange.
    Transport(BoxError),
    // Response body is not a JSON object.
    Decode(String),
    // Response parsed but a required field is missing.
    Protocol(String),
    // Deadline elapsed without a decision.
    Timeout(Duration),
    // The session already holds a granted authorization id.
    AlreadyAuthorized,
}

impl CuraError {
    pub fn transport(err: impl Into<BoxError>) -> Self {
        CuraError::Transport(err.into())
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, CuraError::Timeout(_))
    }
}

impl fmt::Display for CuraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CuraError::Config(message) => write!(f, "cura config error: {message}"),
            CuraError::Transport(err) => write!(f, "cura transport error: {err}"),
            CuraError::Decode(message) => write!(f, "cura response decode error: {message}"),
            CuraError::Protocol(message) => write!(f, "cura protocol error: {message}"),
            CuraError::Timeout(after) => {
                write!(f, "cura authorization timed out after {}ms", after.as_millis())
            }
            CuraError::AlreadyAuthorized => write!(f, "cura session is already authorized"),
        }
    }
}

impl Error for CuraError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CuraError::Transport(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}
