use super::doctor_list::DoctorListResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};

/// Request type for the `/doctors` endpoint, optionally filtered by specialty.
#[derive(Debug)]
pub struct DoctorListRequest {
    pub specialty: Option<String>,
}

impl NoBodyHTTPRequestType for DoctorListRequest {}

impl HTTPRequestType for DoctorListRequest {
    type Response = DoctorListResponse;
    fn endpoint(&self) -> &'static str { "/doctors" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
    fn query_params(&self) -> Vec<(&'static str, String)> {
        self.specialty.iter().map(|s| ("specialty", s.clone())).collect()
    }
}
