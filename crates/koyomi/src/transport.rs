//! The transport seam between the client and the actual network.
//!
//! [`Client`](crate::Client) is generic over [`Transport`], so tests can
//! observe requests through a stub while production code uses
//! [`HttpTransport`] over `reqwest`.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// Uniform per-request timeout applied by [`HttpTransport`].
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One outbound GET: a fully formed absolute URL plus header pairs.
#[derive(Debug, Clone)]
pub struct Request {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
}

/// Raw response: status code plus undecoded body bytes.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

/// A transport-level failure (DNS, connection, timeout). Opaque; the
/// client passes it through to the caller unchanged.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self(err.to_string())
    }
}

/// The external HTTP collaborator: perform one GET and hand back status
/// and body, or fail with a transport error.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send;
}

impl<T: Transport> Transport for &T {
    fn send(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send {
        (**self).send(request)
    }
}

/// Default transport over `reqwest` with a uniform 30 second timeout.
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Use a caller-configured `reqwest` client (proxy, custom timeout)
    /// instead of the default one.
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let mut req = self.http.get(&request.url).timeout(REQUEST_TIMEOUT);
        for (name, value) in &request.headers {
            req = req.header(*name, value);
        }
        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?.to_vec();
        Ok(Response { status, body })
    }
}
