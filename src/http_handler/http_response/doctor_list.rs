use crate::http_handler::common::Doctor;
use crate::http_handler::http_response::response_common::SerdeJSONBodyHTTPResponseType;

#[derive(serde::Deserialize, Debug)]
#[serde(transparent)]
pub struct DoctorListResponse {
    doctors: Vec<Doctor>,
}

impl SerdeJSONBodyHTTPResponseType for DoctorListResponse {}

impl DoctorListResponse {
    pub fn doctors(&self) -> &[Doctor] { &self.doctors }
}
