use super::selection::Selection;
use crate::event;
use crate::http_handler::common::{Appointment, ConsultationType, HTTPError};
use crate::http_handler::http_client::HTTPClient;
use crate::http_handler::http_request::create_appointment_post::CreateAppointmentRequest;
use crate::http_handler::http_request::request_common::JSONBodyHTTPRequestType;
use crate::http_handler::http_response::response_common::ResponseError;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A client-detected reason a submission cannot proceed. Detected before any
/// network call, each with its own user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionError {
    NotAuthenticated,
    NoTimeSelected,
    NoConsultationType,
    UnknownConsultationType(u32),
}

impl fmt::Display for PreconditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreconditionError::NotAuthenticated => write!(f, "log in to book an appointment"),
            PreconditionError::NoTimeSelected => write!(f, "select a time slot"),
            PreconditionError::NoConsultationType => write!(f, "select a consultation type"),
            PreconditionError::UnknownConsultationType(id) => {
                write!(f, "unknown consultation type {id}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    Precondition(PreconditionError),
    /// First field-level message of a 422 response, shown verbatim.
    Validation(String),
    Transport,
    /// A previous submit has not resolved yet; resubmission stays disabled
    /// until it does.
    AlreadyInFlight,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Precondition(p) => write!(f, "{p}"),
            SubmitError::Validation(msg) => write!(f, "{msg}"),
            SubmitError::Transport => write!(f, "could not book the appointment, please retry"),
            SubmitError::AlreadyInFlight => write!(f, "a booking request is already in flight"),
        }
    }
}

impl std::error::Error for SubmitError {}

/// Validates local selection completeness and submits the creation request.
pub struct BookingSubmitter {
    client: Arc<HTTPClient>,
    in_flight: AtomicBool,
}

impl BookingSubmitter {
    pub fn new(client: Arc<HTTPClient>) -> Self {
        Self { client, in_flight: AtomicBool::new(false) }
    }

    pub fn is_in_flight(&self) -> bool { self.in_flight.load(Ordering::SeqCst) }

    /// Submits the selection for `doctor_id`. Exactly one creation request per
    /// user-initiated submit: precondition failures and an in-flight previous
    /// submit both return before anything is sent.
    pub async fn submit(
        &self,
        selection: &Selection,
        doctor_id: u32,
        known_types: &[ConsultationType],
    ) -> Result<Appointment, SubmitError> {
        if !self.client.is_authenticated() {
            return Err(SubmitError::Precondition(PreconditionError::NotAuthenticated));
        }
        let time = selection
            .time()
            .ok_or(SubmitError::Precondition(PreconditionError::NoTimeSelected))?
            .to_string();
        let type_id = selection
            .consultation_type_id()
            .ok_or(SubmitError::Precondition(PreconditionError::NoConsultationType))?;
        if !known_types.iter().any(|t| t.id() == type_id) {
            return Err(SubmitError::Precondition(PreconditionError::UnknownConsultationType(
                type_id,
            )));
        }
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(SubmitError::AlreadyInFlight);
        }

        let request = CreateAppointmentRequest {
            doctor_id,
            appointment_date: selection.date(),
            appointment_time: time,
            consultation_type_id: type_id,
        };
        let result = request.send_request(&self.client).await;
        self.in_flight.store(false, Ordering::SeqCst);

        match result {
            Ok(response) => Ok(response.into_appointment()),
            Err(HTTPError::HTTPResponseError(ResponseError::Validation(body))) => {
                Err(SubmitError::Validation(
                    body.first_message().unwrap_or("the server rejected the booking").to_string(),
                ))
            }
            Err(err) => {
                event!("Appointment creation failed: {err}");
                Err(SubmitError::Transport)
            }
        }
    }
}
