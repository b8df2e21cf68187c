use crate::http_handler::common::ConsultationType;
use crate::http_handler::http_response::response_common::SerdeJSONBodyHTTPResponseType;

#[derive(serde::Deserialize, Debug)]
#[serde(transparent)]
pub struct ConsultationTypeListResponse {
    consultation_types: Vec<ConsultationType>,
}

impl SerdeJSONBodyHTTPResponseType for ConsultationTypeListResponse {}

impl ConsultationTypeListResponse {
    pub fn into_consultation_types(self) -> Vec<ConsultationType> { self.consultation_types }
}
