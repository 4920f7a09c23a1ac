//! Host-facing link operations and the shortening seam.
//!
//! Parameter validation always runs first; a malformed parameter object
//! rejects the whole call before the service adapter is touched.

use serde_json::Value;
use thiserror::Error;

use crate::builder::build_long_link;
use crate::params::{LinkParams, LinkParamsError, Suffix};

/// Seam to the native shortening backend. Transport is the adapter's
/// problem; the bridge only hands over a finished long link.
pub trait ShortLinkService {
    fn shorten(&self, long_link: &str, suffix: Option<Suffix>) -> Result<String, LinkServiceError>;
}

#[derive(Debug, Error)]
pub enum LinkServiceError {
    #[error("short link backend failure: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("malformed link parameters: {0}")]
    MalformedParameters(#[from] LinkParamsError),
    #[error(transparent)]
    Service(#[from] LinkServiceError),
}

/// Validates the parameter object and builds the long dynamic link.
pub fn create_dynamic_link(params: &Value) -> Result<String, LinkError> {
    let params = parse_params(params)?;
    Ok(build_long_link(&params))
}

/// Validates the parameter object, builds the long link, and asks the
/// service to shorten it.
pub fn create_short_dynamic_link(
    params: &Value,
    service: &dyn ShortLinkService,
) -> Result<String, LinkError> {
    let params = parse_params(params)?;
    let long_link = build_long_link(&params);
    Ok(service.shorten(&long_link, params.suffix)?)
}

fn parse_params(params: &Value) -> Result<LinkParams, LinkError> {
    LinkParams::from_json(params).map_err(|err| {
        log::error!("rejecting dynamic link call: {err}");
        err.into()
    })
}
