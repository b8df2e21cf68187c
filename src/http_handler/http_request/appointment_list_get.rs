use super::appointment_list::AppointmentListResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};

/// Request type for the authenticated patient's own appointments.
#[derive(Debug)]
pub struct AppointmentListRequest {}

impl NoBodyHTTPRequestType for AppointmentListRequest {}

impl HTTPRequestType for AppointmentListRequest {
    type Response = AppointmentListResponse;
    fn endpoint(&self) -> &'static str { "/appointments" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}
