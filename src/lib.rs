//! Typed async client core for the GitHub REST API.
//!
//! Public API layers:
//! - [`Endpoint`]: declarative description of one API call.
//! - [`build_request`]/[`build_parameters`]: pure request assembly.
//! - [`ResponseDecoder`]: JSON decoding with `snake_case` key translation.
//! - [`ApiService`]/[`ApiRequestable`]: build, dispatch, validate, decode.
//! - [`Transport`]: injected HTTP exchange, [`ReqwestTransport`] by default.
//! - [`ConnectivityGate`]: optional fast-fail when the network is down.
//! - [`ClientError`]: unified error type used by every layer.

mod connectivity;
mod datasource;
mod decode;
mod endpoint;
mod error;
mod request;
mod service;
mod transport;

/// Network reachability snapshot and its single writer.
pub use connectivity::{ConnectivityGate, ConnectivityUpdater, PathStatus};
/// Data sources layered on an injected service.
pub use datasource::RemoteDataSource;
/// JSON response decoding.
pub use decode::{KeyDecoding, ResponseDecoder};
/// Endpoint descriptions.
pub use endpoint::{DEFAULT_BASE_URL, Endpoint, HttpMethod, ParamValue, Params};
/// Error types returned by all client operations.
pub use error::{ClientError, GitHubApiError, RouterError};
/// Request assembly.
pub use request::{PreparedRequest, build_parameters, build_request};
/// Request sending.
pub use service::{ApiRequestable, ApiService};
/// Transport boundary.
pub use transport::{MockTransport, RawResponse, ReqwestTransport, Transport, TransportConfig};
