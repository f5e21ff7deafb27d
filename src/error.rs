use crate::http_client::TransportError;
use reqwest::StatusCode;

/// Possible error types while working with the CAB API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The token endpoint refused to exchange our authorization code.
    #[error("FullContact auth error: token endpoint returned {status}: {body}")]
    Auth { status: StatusCode, body: String },

    /// We were unable to reach the token endpoint at all.
    #[error("FullContact auth error: {0}")]
    AuthTransport(#[source] TransportError),

    /// A call was made without an access token.
    #[error("no access token available for `{resource}`")]
    AuthMissing { resource: String },

    /// A resource endpoint returned a non-2xx response.
    #[error("`{resource}` returned {status}: {body}")]
    Http {
        resource: String,
        status: StatusCode,
        body: String,
    },

    /// A response body was not the JSON we expected.
    #[error("unable to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A resource endpoint could not be reached.
    #[error("request failed: {0}")]
    Transport(#[from] TransportError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Whether the token exchange itself failed.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. } | Self::AuthTransport(_))
    }

    /// Whether the user needs to go through the authorization flow again.
    pub fn requires_login(&self) -> bool {
        match self {
            Self::Auth { .. } | Self::AuthTransport(_) | Self::AuthMissing { .. } => true,
            Self::Http { status, .. } => {
                *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: StatusCode) -> Error {
        Error::Http {
            resource: "contacts.scroll".to_string(),
            status,
            body: String::new(),
        }
    }

    #[test]
    fn login_is_required_for_auth_failures() {
        let missing = Error::AuthMissing {
            resource: "account.get".to_string(),
        };
        assert!(missing.requires_login());
        assert!(!missing.is_auth());

        let rejected = Error::Auth {
            status: StatusCode::BAD_REQUEST,
            body: "invalid_grant".to_string(),
        };
        assert!(rejected.requires_login());
        assert!(rejected.is_auth());

        assert!(http(StatusCode::UNAUTHORIZED).requires_login());
        assert!(http(StatusCode::FORBIDDEN).requires_login());
        assert!(!http(StatusCode::INTERNAL_SERVER_ERROR).requires_login());
    }

    #[test]
    fn http_error_mentions_resource_and_status() {
        let message = http(StatusCode::NOT_FOUND).to_string();
        assert_eq!(message, "`contacts.scroll` returned 404 Not Found: ");
    }
}
