use super::cancel_appointment::CancelAppointmentResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};

/// Request type for the per-appointment `/cancel` endpoint.
#[derive(Debug)]
pub struct CancelAppointmentRequest {
    endpoint: String,
}

impl CancelAppointmentRequest {
    pub fn new(appointment_id: u64) -> Self {
        Self { endpoint: format!("/appointments/{appointment_id}/cancel") }
    }
}

impl NoBodyHTTPRequestType for CancelAppointmentRequest {}

impl HTTPRequestType for CancelAppointmentRequest {
    type Response = CancelAppointmentResponse;
    fn endpoint(&self) -> &str { &self.endpoint }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}
