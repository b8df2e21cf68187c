use super::availability::BoardStatus;
use super::notice::Notice;
use super::submitter::SubmitError;
use crate::http_handler::common::ConsultationType;
use crate::http_handler::http_request::appointment_list_get::AppointmentListRequest;
use crate::http_handler::http_request::cancel_appointment_post::CancelAppointmentRequest;
use crate::http_handler::http_request::consultation_types_get::ConsultationTypesRequest;
use crate::http_handler::http_request::doctor_list_get::DoctorListRequest;
use crate::http_handler::http_request::request_common::NoBodyHTTPRequestType;
use crate::keychain::Keychain;
use crate::{event, info, log, warn};
use chrono::NaiveDate;
use tokio::sync::mpsc::Receiver;

/// One user interaction, applied in issue order by the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingEvent {
    SetDate(NaiveDate),
    SetTime(String),
    SetConsultationType(u32),
    SetDoctor(u32),
    ShowSlots,
    ShowTypes,
    ShowDoctors(Option<String>),
    ListAppointments,
    Submit,
    Cancel(u64),
    Quit,
}

/// The single-threaded owner of the booking flow.
///
/// Consumes `BookingEvent`s in the order they were issued, keeps the selection
/// and the slot board coupled (date changes trigger refreshes, chosen times
/// must be members of the current board), and drives the submitter. Every
/// failure becomes a transient notice; the loop itself never dies on one.
pub struct BookingCoordinator {
    keychain: Keychain,
    doctor_id: u32,
    consultation_types: Vec<ConsultationType>,
    event_rx: Receiver<BookingEvent>,
}

impl BookingCoordinator {
    pub fn new(keychain: Keychain, doctor_id: u32, event_rx: Receiver<BookingEvent>) -> Self {
        Self { keychain, doctor_id, consultation_types: Vec::new(), event_rx }
    }

    pub async fn run(mut self) {
        self.load_consultation_types().await;
        let date = self.keychain.selection().snapshot().date();
        self.keychain.availability().refresh(self.doctor_id, date);
        while let Some(ev) = self.event_rx.recv().await {
            if ev == BookingEvent::Quit {
                break;
            }
            self.handle_event(ev).await;
        }
    }

    pub(crate) async fn handle_event(&mut self, ev: BookingEvent) {
        event!("Handling {ev:?}");
        match ev {
            BookingEvent::SetDate(date) => self.set_date(date),
            BookingEvent::SetTime(time) => self.set_time(time).await,
            BookingEvent::SetConsultationType(id) => self.set_consultation_type(id),
            BookingEvent::SetDoctor(id) => self.set_doctor(id),
            BookingEvent::ShowSlots => self.show_slots().await,
            BookingEvent::ShowTypes => self.show_types().await,
            BookingEvent::ShowDoctors(specialty) => self.show_doctors(specialty).await,
            BookingEvent::ListAppointments => self.list_appointments().await,
            BookingEvent::Submit => self.submit().await,
            BookingEvent::Cancel(id) => self.cancel(id).await,
            BookingEvent::Quit => {}
        }
    }

    fn set_date(&self, date: NaiveDate) {
        if date < chrono::Local::now().date_naive() {
            self.notify(Notice::warning("appointments cannot be booked in the past"));
            return;
        }
        if self.keychain.selection().set_date(date) {
            self.keychain.availability().refresh(self.doctor_id, date);
        }
    }

    fn set_doctor(&mut self, id: u32) {
        if id == self.doctor_id {
            return;
        }
        self.doctor_id = id;
        // A chosen time was only ever checked against the previous doctor's
        // board, so it does not carry over.
        self.keychain.selection().clear_time();
        let date = self.keychain.selection().snapshot().date();
        self.keychain.availability().refresh(id, date);
    }

    /// A time is only accepted while it is a member of the most recently
    /// fetched slot set for the current doctor and the selected date.
    async fn set_time(&self, time: String) {
        if self.keychain.availability().is_loading() {
            self.notify(Notice::warning("still checking availability, try again shortly"));
            return;
        }
        let date = self.keychain.selection().snapshot().date();
        let accepted = self.keychain.availability().board().await.is_some_and(|board| {
            board.doctor_id() == self.doctor_id && board.date() == date && board.contains(&time)
        });
        if accepted {
            self.keychain.selection().set_time(time);
        } else {
            self.notify(Notice::warning(format!("slot {time} is not available on {date}")));
        }
    }

    fn set_consultation_type(&self, id: u32) {
        match self.consultation_types.iter().find(|t| t.id() == id) {
            Some(t) => {
                info!("Consultation type: {}", t.name());
                self.keychain.selection().set_consultation_type(id);
            }
            None => self.notify(Notice::warning(format!("unknown consultation type {id}"))),
        }
    }

    async fn show_slots(&self) {
        if self.keychain.availability().is_loading() {
            // Never show "no slots" while a fetch is pending.
            log!("Checking availability...");
            return;
        }
        match self.keychain.availability().board().await {
            None => log!("No availability fetched yet"),
            Some(board) => match board.status() {
                BoardStatus::Failed => {
                    warn!("Could not check availability for {}", board.date());
                }
                BoardStatus::Fresh if board.slots().is_empty() => {
                    log!("Doctor {} is fully booked on {}", board.doctor_id(), board.date());
                }
                BoardStatus::Fresh => {
                    log!("Open slots for doctor {} on {}:", board.doctor_id(), board.date());
                    for slot in board.slots() {
                        log!("  {} ({})", slot.value(), slot.label());
                    }
                }
            },
        }
    }

    async fn show_types(&mut self) {
        if self.consultation_types.is_empty() && !self.load_consultation_types().await {
            return;
        }
        for t in &self.consultation_types {
            log!("  {} {} - {}", t.id(), t.name(), t.description());
        }
    }

    async fn show_doctors(&self, specialty: Option<String>) {
        match (DoctorListRequest { specialty }.send_request(&self.keychain.client()).await) {
            Ok(response) => {
                for doc in response.doctors() {
                    log!("  {} {} ({})", doc.id(), doc.name(), doc.specialty());
                }
            }
            Err(err) => {
                event!("Doctor list fetch failed: {err}");
                self.notify(Notice::error("could not load the doctor list"));
            }
        }
    }

    async fn list_appointments(&self) {
        if !self.keychain.client().is_authenticated() {
            self.notify(Notice::warning("log in to view your appointments"));
            return;
        }
        match (AppointmentListRequest {}.send_request(&self.keychain.client()).await) {
            Ok(response) => {
                for appt in response.appointments() {
                    let hint =
                        if appt.status().is_cancellable() { " (cancellable)" } else { "" };
                    log!(
                        "  #{} doctor {} on {} at {} [{}]{hint}",
                        appt.id(),
                        appt.doctor_id(),
                        appt.appointment_date(),
                        appt.appointment_time(),
                        appt.status()
                    );
                }
            }
            Err(err) => {
                event!("Appointment list fetch failed: {err}");
                self.notify(Notice::error("could not load your appointments"));
            }
        }
    }

    async fn submit(&self) {
        let selection = self.keychain.selection().snapshot();
        let result = self
            .keychain
            .submitter()
            .submit(&selection, self.doctor_id, &self.consultation_types)
            .await;
        match result {
            Ok(appt) => {
                info!(
                    "Booked appointment #{} on {} at {} [{}]",
                    appt.id(),
                    appt.appointment_date(),
                    appt.appointment_time(),
                    appt.status()
                );
                // The just-booked slot has to disappear from the board, and the
                // user re-picks a time for any further booking.
                self.keychain.selection().clear_time();
                self.keychain.availability().refresh(self.doctor_id, selection.date());
            }
            Err(err @ SubmitError::AlreadyInFlight) => {
                self.notify(Notice::warning(err.to_string()));
            }
            Err(err) => self.notify(Notice::error(err.to_string())),
        }
    }

    async fn cancel(&self, appointment_id: u64) {
        match CancelAppointmentRequest::new(appointment_id)
            .send_request(&self.keychain.client())
            .await
        {
            Ok(response) => {
                let appt = response.into_appointment();
                info!("Appointment #{} is now {}", appt.id(), appt.status());
                // The freed slot belongs on the board again if it is in view.
                if appt.appointment_date() == self.keychain.selection().snapshot().date() {
                    self.keychain.availability().refresh(self.doctor_id, appt.appointment_date());
                }
            }
            Err(err) => {
                event!("Cancel of appointment {appointment_id} failed: {err}");
                self.notify(Notice::error("could not cancel the appointment"));
            }
        }
    }

    async fn load_consultation_types(&mut self) -> bool {
        match (ConsultationTypesRequest {}.send_request(&self.keychain.client()).await) {
            Ok(response) => {
                self.consultation_types = response.into_consultation_types();
                true
            }
            Err(err) => {
                event!("Consultation type fetch failed: {err}");
                self.notify(Notice::error("could not load consultation types"));
                false
            }
        }
    }

    fn notify(&self, notice: Notice) {
        let _ = self.keychain.notice_tx().try_send(notice);
    }

    #[cfg(test)]
    pub(crate) fn consultation_types(&self) -> &[ConsultationType] { &self.consultation_types }
}
