use super::http_request::request_common::RequestError;

/// A simple wrapper around `reqwest::Client` used to manage HTTP requests
/// with a preconfigured base URL and the session's bearer credential.
///
/// This client is used for making REST API calls to the clinic backend.
/// It sets a fixed timeout and allows easy reuse of the HTTP client infrastructure.
#[derive(Debug)]
pub(crate) struct HTTPClient {
    /// The underlying `reqwest::Client` used to perform HTTP requests.
    client: reqwest::Client,
    /// Base URL for the API, prepended to all endpoint paths.
    base_url: String,
    /// Whether the session carries a credential. Requests that require
    /// authentication are rejected locally when this is `false`.
    authenticated: bool,
}

impl HTTPClient {
    /// Constructs a new `HTTPClient` with the given base URL and optional
    /// bearer token.
    ///
    /// The token, when present, is attached to every request as an
    /// `Authorization: Bearer` default header. The client has a default
    /// request timeout of 5 seconds.
    ///
    /// # Arguments
    /// * `base_url` – The root URL for all HTTP requests (e.g., `"http://localhost:8000/api"`).
    /// * `token` – The bearer credential obtained at login, if any.
    ///
    /// # Errors
    /// `RequestError::InvalidCredential` if the token cannot be encoded as a
    /// header value.
    pub(crate) fn new(base_url: &str, token: Option<&str>) -> Result<HTTPClient, RequestError> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(tok) = token {
            let mut value =
                reqwest::header::HeaderValue::from_str(&format!("Bearer {tok}"))
                    .map_err(|_| RequestError::InvalidCredential)?;
            value.set_sensitive(true);
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(5))
            .default_headers(headers)
            .build()
            .map_err(|_| RequestError::ClientBuild)?;
        Ok(HTTPClient { client, base_url: String::from(base_url), authenticated: token.is_some() })
    }

    /// Returns a reference to the internal `reqwest::Client`.
    pub(super) fn client(&self) -> &reqwest::Client { &self.client }
    /// Returns the base URL that the client was initialized with.
    pub(crate) fn url(&self) -> &str { self.base_url.as_str() }
    /// Whether this session holds a bearer credential.
    pub(crate) fn is_authenticated(&self) -> bool { self.authenticated }
}
