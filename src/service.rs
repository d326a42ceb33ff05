use std::future::Future;

use bytes::Bytes;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{Span, debug, field, instrument, warn};

use crate::connectivity::ConnectivityGate;
use crate::decode::ResponseDecoder;
use crate::endpoint::Endpoint;
use crate::error::{ClientError, GitHubApiError};
use crate::request::{self, PreparedRequest};
use crate::transport::{MockTransport, ReqwestTransport, Transport};

/// Sends [`Endpoint`] requests and decodes their responses.
///
/// `build_parameters`, `build_request` and `decode` come with default
/// implementations operating purely on the endpoint, so implementors only
/// need to provide [`ApiRequestable::send`].
pub trait ApiRequestable: Send + Sync {
    /// Sends the request described by `endpoint` and decodes the body as `T`.
    fn send<T, E>(&self, endpoint: &E) -> impl Future<Output = Result<T, ClientError>> + Send
    where
        T: DeserializeOwned,
        E: Endpoint + Sync + ?Sized;

    /// Renders the endpoint's query parameters. See [`crate::build_parameters`].
    fn build_parameters<E: Endpoint + ?Sized>(&self, endpoint: &E) -> Vec<(String, String)> {
        request::build_parameters(endpoint)
    }

    /// Builds the transport-ready request. See [`crate::build_request`].
    fn build_request<E: Endpoint + ?Sized>(
        &self,
        endpoint: &E,
    ) -> Result<PreparedRequest, ClientError> {
        Ok(request::build_request(endpoint)?)
    }

    /// Decodes a response body with the default [`ResponseDecoder`].
    fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, ClientError> {
        Ok(ResponseDecoder::new().decode(body)?)
    }
}

/// Default [`ApiRequestable`] implementation over a [`Transport`].
///
/// Each call runs independently; the optional connectivity gate is the only
/// state shared between concurrent calls.
#[derive(Debug)]
pub struct ApiService<C = ReqwestTransport> {
    transport: C,
    connectivity: Option<ConnectivityGate>,
    decoder: ResponseDecoder,
}

impl ApiService {
    /// Creates a service talking to the network through [`ReqwestTransport`].
    pub fn github() -> Result<Self, ClientError> {
        Ok(Self::new(ReqwestTransport::new()?))
    }
}

impl ApiService<MockTransport> {
    /// Creates a service whose every call receives `status` and `body`.
    pub fn mocked(status: u16, body: impl Into<Bytes>) -> Self {
        Self::new(MockTransport::new(status, body))
    }
}

impl<C: Transport> ApiService<C> {
    /// Creates a service bound to `transport`, without a connectivity gate.
    pub fn new(transport: C) -> Self {
        Self {
            transport,
            connectivity: None,
            decoder: ResponseDecoder::new(),
        }
    }

    /// Returns a service that fails fast with [`ClientError::Offline`]
    /// whenever `gate` reports no connectivity.
    #[must_use]
    pub fn with_connectivity(mut self, gate: ConnectivityGate) -> Self {
        self.connectivity = Some(gate);
        self
    }

    /// Returns a service decoding responses with `decoder`.
    #[must_use]
    pub fn with_decoder(mut self, decoder: ResponseDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    /// The underlying transport.
    pub fn transport(&self) -> &C {
        &self.transport
    }

    fn is_offline(&self) -> bool {
        self.connectivity
            .as_ref()
            .is_some_and(|gate| !gate.is_available())
    }

    fn decode_with_config<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, ClientError> {
        Ok(self.decoder.decode(body)?)
    }
}

impl<C: Transport> ApiRequestable for ApiService<C> {
    #[instrument(
        name = "api_request",
        skip(self, endpoint),
        fields(
            http.method = %endpoint.method(),
            http.url = field::Empty,
            http.status_code = field::Empty,
        )
    )]
    async fn send<T, E>(&self, endpoint: &E) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        E: Endpoint + Sync + ?Sized,
    {
        if self.is_offline() {
            warn!("network unavailable, request not sent");
            return Err(ClientError::Offline);
        }

        let request = self.build_request(endpoint)?;
        Span::current().record("http.url", request.url.as_str());
        debug!("dispatching request");

        let response = self.transport.execute(request).await?;
        let status =
            StatusCode::from_u16(response.status).map_err(|_| ClientError::InvalidResponse)?;
        Span::current().record("http.status_code", status.as_u16());

        if !status.is_success() {
            let payload = GitHubApiError::from_body(&response.body);
            warn!(
                status = status.as_u16(),
                message = payload.as_ref().map(|p| p.message.as_str()),
                "request failed"
            );
            let (message, documentation_url) = match payload {
                Some(payload) => (Some(payload.message), payload.documentation_url),
                None => (None, None),
            };
            return Err(ClientError::Http {
                status: status.as_u16(),
                message,
                documentation_url,
            });
        }

        debug!(bytes = response.body.len(), "decoding response");
        self.decode_with_config(&response.body)
    }

    fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, ClientError> {
        self.decode_with_config(body)
    }
}
