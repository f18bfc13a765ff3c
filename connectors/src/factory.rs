//! Client selection from host parameters.

use chain_client::ClientFactory;

use crate::error::ConnectorError;

/// Pick the constructor from optional host parameters.
///
/// Empty strings count as absent; a token without a URL is ignored.
pub fn build_client<F: ClientFactory + ?Sized>(
    factory: &F,
    url: Option<&str>,
    access_token: Option<&str>,
) -> Result<F::Client, ConnectorError> {
    let url = url.filter(|u| !u.is_empty());
    let access_token = access_token.filter(|t| !t.is_empty());
    let client = match (url, access_token) {
        (Some(url), Some(token)) => factory.with_url_and_token(url, token),
        (Some(url), None) => factory.with_url(url),
        (None, _) => factory.default_client(),
    };
    client.map_err(|source| ConnectorError::Client { source })
}
