use url::Url;

use crate::domain::errors::CuraError;

pub const AUTH_REQUEST: &str = "/auth/request";
pub const AUTH_CHECK: &str = "/auth/check";

// Build `http://<address>/api/v<version>`. The address is validated, never rewritten.
pub fn base_api(address: &str, version: u32) -> Result<String, CuraError> {
    validate_address(address)?;
    if version == 0 {
        return Err(CuraError::Config("api version must be positive".into()));
    }
    Ok(format!("http://{address}/api/v{version}"))
}

// Append an endpoint and an optional trailing path segment to an API base.
pub fn compose(base: &str, endpoint: &str, data: &str) -> Result<String, CuraError> {
    if base.ends_with('/') {
        return Err(CuraError::Config(format!(
            "api base `{base}` has a trailing slash"
        )));
    }
    if !endpoint.starts_with('/') || endpoint.ends_with('/') {
        return Err(CuraError::Config(format!(
            "endpoint `{endpoint}` must start with `/` and not end with one"
        )));
    }
    if data.contains('/') {
        return Err(CuraError::Config(format!(
            "path segment `{data}` contains a slash"
        )));
    }

    if data.is_empty() {
        Ok(format!("{base}{endpoint}"))
    } else {
        Ok(format!("{base}{endpoint}/{data}"))
    }
}

fn validate_address(address: &str) -> Result<(), CuraError> {
    if address.is_empty() {
        return Err(CuraError::Config("address is empty".into()));
    }
    if address.contains("://") {
        return Err(CuraError::Config(format!(
            "address `{address}` must not carry a scheme"
        )));
    }
    if address
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '@'))
    {
        return Err(CuraError::Config(format!(
            "address `{address}` must be a bare host[:port]"
        )));
    }

    // Let the url parser reject bad hosts and out-of-range ports.
    let parsed = Url::parse(&format!("http://{address}"))
        .map_err(|err| CuraError::Config(format!("address `{address}`: {err}")))?;
    if parsed.host_str().is_none() {
        return Err(CuraError::Config(format!("address `{address}` has no host")));
    }
    Ok(())
}
