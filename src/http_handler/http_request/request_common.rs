use crate::http_handler::common::HTTPError;
use crate::http_handler::http_client::HTTPClient;
use crate::http_handler::http_response::response_common::{HTTPResponseType, ResponseError};
use strum_macros::Display;

/// The HTTP method a request type maps to.
#[derive(Debug, Copy, Clone)]
pub(crate) enum HTTPRequestMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl From<HTTPRequestMethod> for reqwest::Method {
    fn from(value: HTTPRequestMethod) -> Self {
        match value {
            HTTPRequestMethod::Get => reqwest::Method::GET,
            HTTPRequestMethod::Post => reqwest::Method::POST,
            HTTPRequestMethod::Put => reqwest::Method::PUT,
            HTTPRequestMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Common interface of all typed endpoint requests.
///
/// Each REST endpoint gets one implementor that pins down its path, method,
/// query/header parameters, and expected response type.
pub(crate) trait HTTPRequestType {
    /// Type of the expected response.
    type Response: HTTPResponseType;
    /// `str` object representing the specific endpoint.
    fn endpoint(&self) -> &str;
    /// The corresponding HTTP Request Method.
    fn request_method(&self) -> HTTPRequestMethod;
    /// Additional header parameters, empty by default.
    fn header_params(&self) -> reqwest::header::HeaderMap {
        reqwest::header::HeaderMap::default()
    }
    /// Additional query parameters, empty by default.
    fn query_params(&self) -> Vec<(&'static str, String)> { Vec::new() }
}

fn prepare<T: HTTPRequestType + ?Sized>(req: &T, client: &HTTPClient) -> reqwest::RequestBuilder {
    client
        .client()
        .request(req.request_method().into(), format!("{}{}", client.url(), req.endpoint()))
        .query(&req.query_params())
        .headers(req.header_params())
}

/// Request types without a payload.
pub(crate) trait NoBodyHTTPRequestType: HTTPRequestType {
    async fn send_request(
        &self,
        client: &HTTPClient,
    ) -> Result<<Self::Response as HTTPResponseType>::ParsedResponseType, HTTPError> {
        let response = prepare(self, client)
            .send()
            .await
            .map_err(|e| HTTPError::HTTPResponseError(ResponseError::from(e)))?;
        Self::Response::read_response(response).await.map_err(HTTPError::HTTPResponseError)
    }
}

/// Request types carrying a JSON body.
pub(crate) trait JSONBodyHTTPRequestType: HTTPRequestType {
    /// The type of the json body.
    type Body: serde::Serialize;
    /// Returns the serializable object.
    fn body(&self) -> &Self::Body;

    async fn send_request(
        &self,
        client: &HTTPClient,
    ) -> Result<<Self::Response as HTTPResponseType>::ParsedResponseType, HTTPError> {
        let response = prepare(self, client)
            .json(self.body())
            .send()
            .await
            .map_err(|e| HTTPError::HTTPResponseError(ResponseError::from(e)))?;
        Self::Response::read_response(response).await.map_err(HTTPError::HTTPResponseError)
    }
}

/// Failures while constructing a request or the client it is sent with.
#[derive(Debug, Display)]
pub enum RequestError {
    /// The login credential cannot be encoded as an `Authorization` header.
    InvalidCredential,
    /// The underlying HTTP client could not be built.
    ClientBuild,
}

impl std::error::Error for RequestError {}
