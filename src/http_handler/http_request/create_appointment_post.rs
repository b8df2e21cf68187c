use super::create_appointment::CreateAppointmentResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType};

/// Request type for the `/appointments` creation endpoint.
///
/// The serialized field names are the wire contract; `appointment_date` renders
/// as `YYYY-MM-DD` and `appointment_time` as zero-padded `HH:MM`.
#[derive(serde::Serialize, Debug)]
pub struct CreateAppointmentRequest {
    pub doctor_id: u32,
    pub appointment_date: chrono::NaiveDate,
    pub appointment_time: String,
    pub consultation_type_id: u32,
}

impl JSONBodyHTTPRequestType for CreateAppointmentRequest {
    type Body = CreateAppointmentRequest;
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for CreateAppointmentRequest {
    type Response = CreateAppointmentResponse;
    fn endpoint(&self) -> &'static str { "/appointments" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}
