use super::{ApiRequest, MultipartForm, RequestBody};
use crate::{
    endpoints::Endpoints,
    error::{Error, Result},
    http_client::{HttpRequest, ReqwestTransport, Transport},
};
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Performs authenticated calls against the versioned CAB API.
///
/// The client holds no tokens of its own. Every call carries the token it
/// should be made with, so a single client can be shared across users.
pub struct ApiClient<T = ReqwestTransport> {
    endpoints: Endpoints,
    transport: Arc<T>,
}

impl ApiClient<ReqwestTransport> {
    /// Creates a new API client against the production endpoints.
    pub fn new() -> Self {
        Self::with_transport(Endpoints::default(), Arc::new(ReqwestTransport::new()))
    }
}

impl Default for ApiClient<ReqwestTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(endpoints: Endpoints, transport: Arc<T>) -> Self {
        Self {
            endpoints,
            transport,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Performs a single call and decodes its JSON response.
    pub async fn call(&self, request: ApiRequest) -> Result<Value> {
        let ApiRequest {
            resource,
            method,
            body,
            headers: extra_headers,
            token,
            anonymous,
        } = request;

        // An empty token is as good as none at all.
        let mut headers = HeaderMap::new();
        match token.filter(|token| !token.is_empty()) {
            Some(token) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|_| Error::InvalidRequest("malformed access token".to_string()))?;
                value.set_sensitive(true);
                headers.insert(header::AUTHORIZATION, value);
            }
            None if anonymous => {}
            None => return Err(Error::AuthMissing { resource }),
        }
        if body.is_json() {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        }

        // Caller-supplied headers win over anything we set above.
        headers.extend(extra_headers);

        let url = self.endpoints.resource_url(&resource)?;
        debug!(%resource, %method, "calling CAB API");

        let response = self
            .transport
            .send(HttpRequest {
                method,
                url,
                headers,
                body: body.into_bytes(),
            })
            .await
            .map_err(|e| {
                warn!(%resource, error = %e, "request failed");
                Error::Transport(e)
            })?;

        debug!(%resource, status = %response.status, "received response");
        if !response.status.is_success() {
            warn!(%resource, status = %response.status, "CAB API returned an error");
            return Err(Error::Http {
                resource,
                status: response.status,
                body: response.text(),
            });
        }

        Ok(serde_json::from_slice(&response.body)?)
    }

    /// Performs a call with a `multipart/form-data` body.
    ///
    /// The form replaces the request's body, and its `Content-Type` replaces
    /// any the caller set.
    pub async fn call_multipart(&self, request: ApiRequest, form: MultipartForm) -> Result<Value> {
        let content_type = HeaderValue::from_str(&form.content_type())
            .map_err(|_| Error::InvalidRequest(format!("invalid boundary `{}`", form.boundary())))?;
        let request = request
            .body(RequestBody::Raw(form.encode()))
            .header(header::CONTENT_TYPE, content_type);
        self.call(request).await
    }
}
