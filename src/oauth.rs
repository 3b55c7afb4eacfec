//! OAuth authorization URL construction

use crate::config::DEFAULT_BASE_URL;

/// Authorization page path, relative to the API root
pub const AUTHORIZE_PATH: &str = "/oauth/authorize";

/// Build the URL a user is redirected to in order to grant `scopes` to `client_id`.
///
/// Purely local. Inputs are not validated, so malformed inputs give a malformed URL.
pub fn build_obtain_token_url<S: AsRef<str>>(
    client_id: &str,
    redirect_uri: &str,
    scopes: &[S],
) -> String {
    authorize_url(DEFAULT_BASE_URL, client_id, redirect_uri, scopes)
}

pub(crate) fn authorize_url<S: AsRef<str>>(
    base_url: &str,
    client_id: &str,
    redirect_uri: &str,
    scopes: &[S],
) -> String {
    let scope = scopes
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<&str>>()
        .join(" ");

    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("client_id", client_id)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("scope", &scope)
        .append_pair("response_type", "code")
        .finish();

    format!("{base_url}{AUTHORIZE_PATH}?{query}")
}
