use crate::error::{Error, Result};
use url::Url;

/// The API host, also serving the token exchange.
pub const DEFAULT_API_BASE: &str = "https://api.fullcontact.com";

/// The host users are sent to in their browser to grant access.
pub const DEFAULT_AUTHORIZE_BASE: &str = "https://alpha.fullcontact.com";

/// The versioned prefix shared by every resource.
const API_VERSION: &str = "v3";

/// Base URLs for the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api_base: Url,
    authorize_base: Url,
}

impl Endpoints {
    /// Validates both base URLs. Trailing slashes are ignored.
    pub fn new(api_base: &str, authorize_base: &str) -> Result<Self> {
        Ok(Self {
            api_base: parse_base(api_base)?,
            authorize_base: parse_base(authorize_base)?,
        })
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    pub fn authorize_base(&self) -> &Url {
        &self.authorize_base
    }

    /// `<authorize-base>/oauth/authorize`
    pub fn authorize_url(&self) -> Url {
        join(&self.authorize_base, &["oauth", "authorize"])
    }

    /// `<api-base>/v3/oauth.exchangeAuthCode`
    pub fn token_url(&self) -> Url {
        join(&self.api_base, &[API_VERSION, "oauth.exchangeAuthCode"])
    }

    /// `<api-base>/v3/<resource>`
    pub fn resource_url(&self, resource: &str) -> Result<Url> {
        if resource.is_empty() || resource.contains(['/', '?', '#']) {
            return Err(Error::InvalidRequest(format!(
                "invalid resource name `{resource}`"
            )));
        }
        Ok(join(&self.api_base, &[API_VERSION, resource]))
    }
}

impl Default for Endpoints {
    // Both bases are constants, checked by `default_endpoints`; this can't
    // fail at runtime.
    fn default() -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base should be valid"),
            authorize_base: Url::parse(DEFAULT_AUTHORIZE_BASE)
                .expect("default authorize base should be valid"),
        }
    }
}

fn parse_base(base: &str) -> Result<Url> {
    let url = Url::parse(base).map_err(|e| Error::InvalidRequest(format!("{base}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidRequest(format!("{base}: not a base URL")));
    }
    Ok(url)
}

/// Appends path segments to `base`, keeping any path the base already has.
fn join(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    // `parse_base` has already rejected URLs that cannot be a base.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}
