use super::{authorize, AccessToken};
use crate::{
    endpoints::Endpoints,
    error::{Error, Result},
    http_client::{HttpRequest, ReqwestTransport, Transport},
};
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Method,
};
use std::{fmt, sync::Arc};
use tracing::{debug, warn};
use url::Url;

/// The client ID and secret registered with FullContact for this application.
#[derive(Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Performs the OAuth2 authorization-code grant against FullContact.
///
/// An `Authorizer` holds no per-user state: the same instance can serve every
/// login, and the tokens it hands out belong to the caller.
pub struct Authorizer<T = ReqwestTransport> {
    credentials: ClientCredentials,
    endpoints: Endpoints,
    transport: Arc<T>,
}

impl Authorizer<ReqwestTransport> {
    /// Creates an authorizer against the production endpoints.
    pub fn new(credentials: ClientCredentials) -> Self {
        Self::with_transport(
            credentials,
            Endpoints::default(),
            Arc::new(ReqwestTransport::new()),
        )
    }
}

impl<T: Transport> Authorizer<T> {
    pub fn with_transport(
        credentials: ClientCredentials,
        endpoints: Endpoints,
        transport: Arc<T>,
    ) -> Self {
        Self {
            credentials,
            endpoints,
            transport,
        }
    }

    pub fn credentials(&self) -> &ClientCredentials {
        &self.credentials
    }

    /// The URL to send the user's browser to, using our configured client ID.
    pub fn authorize_url(&self, redirect_uri: &str, scopes: &[&str]) -> Url {
        authorize::authorize_url(
            &self.endpoints.authorize_url(),
            redirect_uri,
            &self.credentials.client_id,
            scopes,
        )
    }

    /// Exchanges an authorization code for an access token.
    ///
    /// `redirect_uri` must be the same one used to build the authorize URL.
    /// This is a single request; nothing is retried.
    pub async fn exchange_code(&self, redirect_uri: &str, code: &str) -> Result<AccessToken> {
        let form = [
            ("redirect_uri", redirect_uri),
            ("code", code),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
        ];
        let body = serde_urlencoded::to_string(&form[..])
            .map_err(|e| Error::InvalidRequest(e.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let url = self.endpoints.token_url();
        debug!(endpoint = %url, "exchanging authorization code");

        let response = self
            .transport
            .send(HttpRequest {
                method: Method::POST,
                url,
                headers,
                body: body.into_bytes(),
            })
            .await
            .map_err(|e| {
                warn!(error = %e, "unable to reach token endpoint");
                Error::AuthTransport(e)
            })?;

        // Any non-2xx response means the exchange was refused.
        // We keep the raw body around as the provider explains itself there.
        if !response.status.is_success() {
            warn!(status = %response.status, "token exchange refused");
            return Err(Error::Auth {
                status: response.status,
                body: response.text(),
            });
        }

        let token: AccessToken = serde_json::from_slice(&response.body)?;
        debug!("obtained access token");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::mock::MockTransport;
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;

    fn authorizer(transport: MockTransport) -> (Authorizer<MockTransport>, Arc<MockTransport>) {
        let transport = Arc::new(transport);
        let authorizer = Authorizer::with_transport(
            ClientCredentials::new("cid123", "s3cret"),
            Endpoints::default(),
            transport.clone(),
        );
        (authorizer, transport)
    }

    #[tokio::test]
    async fn exchanges_code_for_token() {
        let (authorizer, transport) =
            authorizer(MockTransport::new().respond(200, r#"{"access_token":"abc"}"#));

        let token = authorizer
            .exchange_code("https://app.example/login", "the code")
            .await
            .unwrap();
        assert_eq!(token.secret(), "abc");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(
            request.url.as_str(),
            "https://api.fullcontact.com/v3/oauth.exchangeAuthCode"
        );
        assert_eq!(
            request.headers.get(header::CONTENT_TYPE).unwrap(),
            "application/x-www-form-urlencoded"
        );
        assert_eq!(
            String::from_utf8(request.body.clone()).unwrap(),
            "redirect_uri=https%3A%2F%2Fapp.example%2Flogin&code=the+code\
             &client_id=cid123&client_secret=s3cret"
        );
    }

    #[tokio::test]
    async fn refused_exchange_is_auth_error() {
        let (authorizer, _) =
            authorizer(MockTransport::new().respond(400, r#"{"error":"invalid_grant"}"#));

        let error = authorizer
            .exchange_code("https://app.example/login", "stale")
            .await
            .unwrap_err();
        match error {
            Error::Auth { status, body } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(body, r#"{"error":"invalid_grant"}"#);
            }
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_auth_error() {
        let (authorizer, _) = authorizer(MockTransport::new().fail("connection refused"));

        let error = authorizer
            .exchange_code("https://app.example/login", "code")
            .await
            .unwrap_err();
        assert!(error.is_auth());
    }

    #[tokio::test]
    async fn malformed_token_is_decode_error() {
        let (authorizer, _) = authorizer(MockTransport::new().respond(200, "<html>"));

        let error = authorizer
            .exchange_code("https://app.example/login", "code")
            .await
            .unwrap_err();
        assert!(matches!(error, Error::Decode(_)));
    }

    #[test]
    fn authorize_url_uses_configured_client() {
        let (authorizer, transport) = authorizer(MockTransport::new());
        let url = authorizer.authorize_url("http://localhost:8080/login", &["contacts.read"]);

        let expected = "https://alpha.fullcontact.com/oauth/authorize\
                        ?response_type=code&client_id=cid123";
        assert!(url.as_str().starts_with(expected));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn debug_hides_client_secret() {
        let rendered = format!("{:?}", ClientCredentials::new("cid", "s3cret"));
        assert!(rendered.contains("cid"));
        assert!(!rendered.contains("s3cret"));
    }
}
