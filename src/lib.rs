//! A client for the FullContact CAB contact-management API.
//!
//! Obtain a token once per user with an [`Authorizer`], then hand it to each
//! [`ApiClient`] call:
//!
//! ```no_run
//! # async fn run() -> fullcontact_cab::Result<()> {
//! use fullcontact_cab::{AccessToken, ApiClient, Authorizer, ClientCredentials};
//! use reqwest::header::HeaderMap;
//! use serde_json::json;
//!
//! let authorizer = Authorizer::new(ClientCredentials::new("client-id", "client-secret"));
//! let redirect_uri = "http://localhost:8080/login";
//! println!("visit {}", authorizer.authorize_url(redirect_uri, &["contacts.read"]));
//!
//! let token: AccessToken = authorizer.exchange_code(redirect_uri, "code-from-redirect").await?;
//! let _contacts = ApiClient::new()
//!     .contacts_scroll(&token, json!({}), HeaderMap::new())
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod endpoints;
pub mod error;
pub mod http_client;
pub mod oauth;

pub use api::{ApiClient, ApiRequest, MultipartForm, Resource};
pub use endpoints::Endpoints;
pub use error::{Error, Result};
pub use http_client::{ReqwestTransport, Transport};
pub use oauth::{AccessToken, Authorizer, ClientCredentials};
