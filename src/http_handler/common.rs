use super::http_request::request_common::RequestError;
use super::http_response::response_common::ResponseError;
use strum_macros::Display;

/// A bookable time interval for one (doctor, date) pair, as served by the API.
#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    value: String,
    label: String,
}

impl Slot {
    /// Time-of-day identifier, zero-padded 24h `"HH:MM"`.
    pub fn value(&self) -> &str { &self.value }
    pub fn label(&self) -> &str { &self.label }
}

/// Read-only reference data, fetched once per session.
#[derive(serde::Deserialize, Debug, Clone)]
pub struct ConsultationType {
    id: u32,
    name: String,
    description: String,
}

impl ConsultationType {
    pub fn id(&self) -> u32 { self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn description(&self) -> &str { &self.description }
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Doctor {
    id: u32,
    name: String,
    specialty: String,
}

impl Doctor {
    pub fn id(&self) -> u32 { self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn specialty(&self) -> &str { &self.specialty }
}

/// Lifecycle state of an appointment. Closed set, matched exhaustively at every
/// consumption site.
#[derive(serde::Deserialize, serde::Serialize, Debug, Display, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Only not-yet-held appointments can still be cancelled.
    pub fn is_cancellable(self) -> bool {
        match self {
            AppointmentStatus::Pending | AppointmentStatus::Confirmed => true,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled => false,
        }
    }
}

/// An appointment as returned by the create/list/cancel endpoints.
#[derive(serde::Deserialize, Debug, Clone)]
pub struct Appointment {
    id: u64,
    doctor_id: u32,
    appointment_date: chrono::NaiveDate,
    appointment_time: String,
    consultation_type_id: u32,
    status: AppointmentStatus,
}

impl Appointment {
    pub fn id(&self) -> u64 { self.id }
    pub fn doctor_id(&self) -> u32 { self.doctor_id }
    pub fn appointment_date(&self) -> chrono::NaiveDate { self.appointment_date }
    pub fn appointment_time(&self) -> &str { &self.appointment_time }
    pub fn consultation_type_id(&self) -> u32 { self.consultation_type_id }
    pub fn status(&self) -> AppointmentStatus { self.status }
}

#[derive(Debug, Display)]
pub enum HTTPError {
    HTTPRequestError(RequestError),
    HTTPResponseError(ResponseError),
}

impl std::error::Error for HTTPError {}
