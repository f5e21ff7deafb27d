use crate::oauth::AccessToken;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Method,
};
use serde::Serialize;
use serde_json::Value;

/// What we send as the body of an API call.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Serialized as JSON when sent.
    Json(Value),
    /// Sent byte-for-byte, without any re-encoding.
    Raw(Vec<u8>),
}

impl RequestBody {
    /// Serializes any value into a JSON body up front.
    pub fn json<T: Serialize>(value: &T) -> serde_json::Result<Self> {
        serde_json::to_value(value).map(Self::Json)
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        match self {
            // Displaying a `Value` is its compact JSON serialization.
            Self::Json(value) => value.to_string().into_bytes(),
            Self::Raw(bytes) => bytes,
        }
    }
}

impl Default for RequestBody {
    fn default() -> Self {
        Self::Raw(Vec::new())
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<String> for RequestBody {
    fn from(body: String) -> Self {
        Self::Raw(body.into_bytes())
    }
}

impl From<&str> for RequestBody {
    fn from(body: &str) -> Self {
        Self::Raw(body.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(body: Vec<u8>) -> Self {
        Self::Raw(body)
    }
}

/// A single call against a `/v3/<resource>` endpoint.
///
/// Defaults to `POST` with an empty body. A token must be attached with
/// [`ApiRequest::bearer`] unless the call is explicitly marked
/// [`ApiRequest::anonymous`].
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub(crate) resource: String,
    pub(crate) method: Method,
    pub(crate) body: RequestBody,
    pub(crate) headers: HeaderMap,
    pub(crate) token: Option<String>,
    pub(crate) anonymous: bool,
}

impl ApiRequest {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            method: Method::POST,
            body: RequestBody::default(),
            headers: HeaderMap::new(),
            token: None,
            anonymous: false,
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = body.into();
        self
    }

    /// Adds a header, replacing any earlier value under the same name.
    /// These are applied after `Authorization`, so they can override it.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn bearer(mut self, token: &AccessToken) -> Self {
        self.token = Some(token.secret().to_string());
        self
    }

    /// Allows this call to go out without a token.
    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_are_raw_values_are_json() {
        assert_eq!(
            RequestBody::from("{\"not\": \"reencoded\"}"),
            RequestBody::Raw(b"{\"not\": \"reencoded\"}".to_vec())
        );
        assert!(RequestBody::from(json!({"a": 1})).is_json());
        assert_eq!(
            RequestBody::from(json!({"a": [1, 2]})).into_bytes(),
            br#"{"a":[1,2]}"#.to_vec()
        );
    }

    #[test]
    fn json_from_serializable() {
        #[derive(Serialize)]
        struct Query {
            query: &'static str,
        }

        let body = RequestBody::json(&Query { query: "ada" }).unwrap();
        assert_eq!(body, RequestBody::Json(json!({"query": "ada"})));
    }

    #[test]
    fn later_headers_replace_earlier_ones() {
        let name = HeaderName::from_static("x-trace");
        let request = ApiRequest::new("account.get")
            .header(name.clone(), HeaderValue::from_static("one"))
            .header(name.clone(), HeaderValue::from_static("two"));
        assert_eq!(request.headers.get(&name).unwrap(), "two");
        assert_eq!(request.method, Method::POST);
        assert!(request.token.is_none());
    }
}
