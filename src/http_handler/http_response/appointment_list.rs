use crate::http_handler::common::Appointment;
use crate::http_handler::http_response::response_common::SerdeJSONBodyHTTPResponseType;

#[derive(serde::Deserialize, Debug)]
#[serde(transparent)]
pub struct AppointmentListResponse {
    appointments: Vec<Appointment>,
}

impl SerdeJSONBodyHTTPResponseType for AppointmentListResponse {}

impl AppointmentListResponse {
    pub fn appointments(&self) -> &[Appointment] { &self.appointments }
}
