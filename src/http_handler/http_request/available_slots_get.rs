use super::available_slots::AvailableSlotsResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};

/// Request type for the per-doctor `/available-slots` endpoint.
#[derive(Debug)]
pub struct AvailableSlotsRequest {
    endpoint: String,
    date: chrono::NaiveDate,
}

impl AvailableSlotsRequest {
    pub fn new(doctor_id: u32, date: chrono::NaiveDate) -> Self {
        Self { endpoint: format!("/doctors/{doctor_id}/available-slots"), date }
    }
}

impl NoBodyHTTPRequestType for AvailableSlotsRequest {}

impl HTTPRequestType for AvailableSlotsRequest {
    type Response = AvailableSlotsResponse;
    fn endpoint(&self) -> &str { &self.endpoint }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
    fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![("date", self.date.format("%Y-%m-%d").to_string())]
    }
}
