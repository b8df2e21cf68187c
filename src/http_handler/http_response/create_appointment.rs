use crate::http_handler::common::Appointment;
use crate::http_handler::http_response::response_common::SerdeJSONBodyHTTPResponseType;

#[derive(serde::Deserialize, Debug)]
#[serde(transparent)]
pub struct CreateAppointmentResponse {
    appointment: Appointment,
}

impl SerdeJSONBodyHTTPResponseType for CreateAppointmentResponse {}

impl CreateAppointmentResponse {
    pub fn into_appointment(self) -> Appointment { self.appointment }
}
