use url::Url;

/// Builds the URL a user should visit to grant us access.
///
/// This makes no network request. After the user approves, the provider
/// redirects their browser to `redirect_uri` with a `code` query parameter,
/// which can then be given to [`Authorizer::exchange_code`].
///
/// [`Authorizer::exchange_code`]: super::Authorizer::exchange_code
pub fn authorize_url(
    authorize_endpoint: &Url,
    redirect_uri: &str,
    client_id: &str,
    scopes: &[&str],
) -> Url {
    let mut url = authorize_endpoint.clone();
    {
        let mut query = url.query_pairs_mut();
        // Standard OAuth2 query parameters.
        query
            .append_pair("response_type", "code")
            .append_pair("client_id", client_id)
            .append_pair("redirect_uri", redirect_uri);

        // Scopes are space-separated, per the OAuth2 convention.
        if !scopes.is_empty() {
            query.append_pair("scope", &scopes.join(" "));
        }
    }
    url
}

/// Pulls the authorization code out of the URL the provider redirected to.
///
/// Anything that isn't a URL is assumed to be the code itself.
pub fn code_from_redirect(input: &str) -> Option<String> {
    let input = input.trim();
    let Ok(location) = Url::parse(input) else {
        return (!input.is_empty()).then(|| input.to_string());
    };

    // Our OAuth2 authorization code should be present within the "code" query parameter.
    location
        .query_pairs()
        .find(|(name, _)| name == "code")
        .map(|(_, code)| code.into_owned())
        .filter(|code| !code.is_empty())
}
