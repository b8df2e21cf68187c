use crate::http_handler::common::Appointment;
use crate::http_handler::http_response::response_common::SerdeJSONBodyHTTPResponseType;

#[derive(serde::Deserialize, Debug)]
#[serde(transparent)]
pub struct CancelAppointmentResponse {
    appointment: Appointment,
}

impl SerdeJSONBodyHTTPResponseType for CancelAppointmentResponse {}

impl CancelAppointmentResponse {
    pub fn into_appointment(self) -> Appointment { self.appointment }
}
