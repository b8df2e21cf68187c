use std::collections::BTreeMap;
use strum_macros::Display;

pub(crate) trait JSONBodyHTTPResponseType: HTTPResponseType {
    async fn parse_json_body(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError>
    where Self::ParsedResponseType: for<'de> serde::Deserialize<'de> {
        Ok(response.json::<Self::ParsedResponseType>().await?)
    }
}

/// Marker for responses that are plain `serde`-deserializable JSON bodies.
/// Implementors get `HTTPResponseType` for free through the blanket impls below.
pub(crate) trait SerdeJSONBodyHTTPResponseType {}

impl<T> JSONBodyHTTPResponseType for T
where
    T: SerdeJSONBodyHTTPResponseType,
    for<'de> T: serde::Deserialize<'de>,
{
}

impl<T> HTTPResponseType for T
where
    T: SerdeJSONBodyHTTPResponseType,
    for<'de> T: serde::Deserialize<'de>,
{
    type ParsedResponseType = T;

    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError> {
        let resp = Self::unwrap_return_code(response).await?;
        Self::parse_json_body(resp).await
    }
}

pub(crate) trait HTTPResponseType {
    type ParsedResponseType;
    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError>;

    async fn unwrap_return_code(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ResponseError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else if status == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
            Err(ResponseError::Validation(response.json().await?))
        } else if status.is_server_error() {
            Err(ResponseError::InternalServer)
        } else if status.is_client_error() {
            Err(ResponseError::BadRequest)
        } else {
            Err(ResponseError::Unknown)
        }
    }
}

/// Body of a 422 response: `{"errors": {"field": ["message", ...], ...}}`.
#[derive(Debug, serde::Deserialize)]
pub struct ValidationErrorReturn {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrorReturn {
    /// Fields checked before falling back to the alphabetically first one, so
    /// the surfaced message is deterministic regardless of server map order.
    const FIELD_PRIORITY: [&'static str; 4] =
        ["appointment_time", "appointment_date", "consultation_type_id", "doctor_id"];

    /// The first field-level error message, if the body carried any.
    pub fn first_message(&self) -> Option<&str> {
        for field in Self::FIELD_PRIORITY {
            if let Some(msg) = self.errors.get(field).and_then(|msgs| msgs.first()) {
                return Some(msg.as_str());
            }
        }
        self.errors.values().find_map(|msgs| msgs.first()).map(String::as_str)
    }
}

#[derive(Debug, Display)]
pub enum ResponseError {
    InternalServer,
    Validation(ValidationErrorReturn),
    BadRequest,
    NoConnection,
    Unknown,
}

impl std::error::Error for ResponseError {}
impl From<reqwest::Error> for ResponseError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() || value.is_redirect() {
            ResponseError::InternalServer
        } else if value.is_connect() {
            ResponseError::NoConnection
        } else if value.is_request() {
            ResponseError::BadRequest
        } else {
            ResponseError::Unknown
        }
    }
}
