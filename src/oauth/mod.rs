mod authorize;
mod oauth_client;
mod token;

pub use authorize::{authorize_url, code_from_redirect};
pub use oauth_client::{Authorizer, ClientCredentials};
pub use token::AccessToken;
