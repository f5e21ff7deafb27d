use async_trait::async_trait;
use reqwest::{header::HeaderMap, Method, StatusCode};
use url::Url;

/// Possible issues while talking to the provider at the transport level.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error("{0}")]
    Other(String),
}

/// A fully-assembled request, ready to be put on the wire.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// The status and raw body of a response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// The body as text, for diagnostics. Invalid UTF-8 is replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Anything capable of executing a single HTTP request.
///
/// Connection pooling, TLS, redirects and timeouts all live behind this trait.
/// Neither the authorizer nor the API client retry: one call is one `send`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// The default transport, backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing client, e.g. one configured with a timeout or proxy.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .request(request.method, request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_text_is_lossy() {
        let response = HttpResponse::new(StatusCode::BAD_REQUEST, vec![b'o', b'k', 0xff]);
        assert_eq!(response.text(), "ok\u{fffd}");
    }

    #[tokio::test]
    async fn mock_transport_records_requests() {
        let transport = mock::MockTransport::new().respond(200, "{}");
        let request = HttpRequest {
            method: Method::POST,
            url: Url::parse("https://api.example/v3/account.get").unwrap(),
            headers: HeaderMap::new(),
            body: b"{}".to_vec(),
        };

        let response = transport.send(request).await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(transport.requests().len(), 1);

        // Once canned responses run out, we get a transport failure.
        let request = transport.requests().remove(0);
        assert!(transport.send(request).await.is_err());
    }
}
