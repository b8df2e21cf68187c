use super::consultation_types::ConsultationTypeListResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};

#[derive(Debug)]
pub struct ConsultationTypesRequest {}

impl NoBodyHTTPRequestType for ConsultationTypesRequest {}

impl HTTPRequestType for ConsultationTypesRequest {
    type Response = ConsultationTypeListResponse;
    fn endpoint(&self) -> &'static str { "/consultation-types" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}
