use crate::domain::entities::{AuthRequest, AuthResponse, CheckResponse};
use crate::domain::errors::CuraError;
use crate::domain::ports::Transport;
use crate::interface_adapters::urls::{AUTH_CHECK, AUTH_REQUEST, compose};

// POST a new authorization request and return the pending id.
pub async fn request_auth<T>(
    transport: &T,
    base: &str,
    application: &str,
    user: &str,
) -> Result<String, CuraError>
where
    T: Transport + ?Sized,
{
    let url = compose(base, AUTH_REQUEST, "")?;
    let body = AuthRequest::new(application, user).to_json()?;
    let reply = transport.post(&url, body).await?;
    Ok(AuthResponse::from_mapping(reply)?.id)
}

// Ask whether the pending id has been approved.
pub async fn check_auth<T>(transport: &T, base: &str, id: &str) -> Result<bool, CuraError>
where
    T: Transport + ?Sized,
{
    let url = compose(base, AUTH_CHECK, id)?;
    let reply = transport.get(&url).await?;
    Ok(CheckResponse::from_mapping(reply).is_authorized())
}
