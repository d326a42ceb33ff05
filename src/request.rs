//! Turns [`Endpoint`] descriptions into transport-ready requests.
//!
//! Building is pure: the same endpoint always yields the same
//! [`PreparedRequest`], and nothing here performs I/O.

use url::Url;

use crate::endpoint::{Endpoint, HttpMethod};
use crate::error::RouterError;

/// A fully assembled request: absolute URL (query included) plus method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedRequest {
    pub url: Url,
    pub method: HttpMethod,
}

/// Renders the endpoint's parameters as `(name, value)` pairs.
///
/// Pairs are sorted by name so repeated calls on the same endpoint produce
/// the same query string regardless of map iteration order.
pub fn build_parameters<E: Endpoint + ?Sized>(endpoint: &E) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = endpoint
        .params()
        .into_iter()
        .map(|(name, value)| (name, value.to_string()))
        .collect();
    pairs.sort();
    pairs
}

/// Resolves base URL, path and parameters into a [`PreparedRequest`].
///
/// The endpoint path replaces the path of the base URL; any query already
/// present on the base URL is replaced by the endpoint parameters.
///
/// # Errors
///
/// [`RouterError::InvalidBaseUrl`] when the base URL does not parse or
/// cannot carry a path, [`RouterError::InvalidComponents`] when the path is
/// not absolute or the assembled URL does not serialize to an absolute URL.
pub fn build_request<E: Endpoint + ?Sized>(endpoint: &E) -> Result<PreparedRequest, RouterError> {
    let mut url = Url::parse(&endpoint.base_url()).map_err(|_| RouterError::InvalidBaseUrl)?;
    if url.cannot_be_a_base() {
        return Err(RouterError::InvalidBaseUrl);
    }

    let path = endpoint.path();
    if !path.is_empty() && !path.starts_with('/') {
        return Err(RouterError::InvalidComponents);
    }
    url.set_path(&path);

    let params = build_parameters(endpoint);
    if params.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(params.iter());
    }

    // Serialize and re-parse so only URLs that survive a round trip leave here.
    let url = Url::parse(url.as_str()).map_err(|_| RouterError::InvalidComponents)?;

    Ok(PreparedRequest {
        url,
        method: endpoint.method(),
    })
}
