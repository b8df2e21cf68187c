use super::common::{Appointment, AppointmentStatus, ConsultationType, Slot};
use super::http_response::response_common::ValidationErrorReturn;
use serde_json::json;

#[test]
fn validation_return_prefers_time_field() {
    let body: ValidationErrorReturn = serde_json::from_value(json!({
        "errors": {
            "doctor_id": ["no such doctor"],
            "appointment_time": ["slot taken", "outside opening hours"],
        }
    }))
    .unwrap();
    assert_eq!(body.first_message(), Some("slot taken"));
}

#[test]
fn validation_return_falls_back_to_first_field() {
    let body: ValidationErrorReturn = serde_json::from_value(json!({
        "errors": {
            "patient_notes": ["too long"],
            "insurance_number": ["invalid checksum"],
        }
    }))
    .unwrap();
    // Neither field is a known priority field, alphabetical order decides.
    assert_eq!(body.first_message(), Some("invalid checksum"));
}

#[test]
fn validation_return_may_be_empty() {
    let body: ValidationErrorReturn = serde_json::from_value(json!({"errors": {}})).unwrap();
    assert_eq!(body.first_message(), None);
}

#[test]
fn appointment_status_wire_format_round_trips() {
    let status: AppointmentStatus = serde_json::from_value(json!("confirmed")).unwrap();
    assert_eq!(status, AppointmentStatus::Confirmed);
    assert_eq!(status.to_string(), "confirmed");
    assert_eq!(serde_json::to_value(status).unwrap(), json!("confirmed"));
}

#[test]
fn appointment_status_rejects_unknown_values() {
    assert!(serde_json::from_value::<AppointmentStatus>(json!("double_booked")).is_err());
}

#[test]
fn only_open_appointments_are_cancellable() {
    assert!(AppointmentStatus::Pending.is_cancellable());
    assert!(AppointmentStatus::Confirmed.is_cancellable());
    assert!(!AppointmentStatus::Completed.is_cancellable());
    assert!(!AppointmentStatus::Cancelled.is_cancellable());
}

#[test]
fn appointment_deserializes_from_wire_shape() {
    let appt: Appointment = serde_json::from_value(json!({
        "id": 41,
        "doctor_id": 7,
        "appointment_date": "2030-03-10",
        "appointment_time": "09:00",
        "consultation_type_id": 2,
        "status": "pending",
    }))
    .unwrap();
    assert_eq!(appt.id(), 41);
    assert_eq!(appt.appointment_date().to_string(), "2030-03-10");
    assert_eq!(appt.appointment_time(), "09:00");
    assert_eq!(appt.status(), AppointmentStatus::Pending);
}

#[test]
fn slot_and_consultation_type_deserialize() {
    let slot: Slot = serde_json::from_value(json!({"value": "09:00", "label": "9h-10h"})).unwrap();
    assert_eq!(slot.value(), "09:00");
    assert_eq!(slot.label(), "9h-10h");

    let ct: ConsultationType =
        serde_json::from_value(json!({"id": 2, "name": "teleconsultation", "description": "remote"}))
            .unwrap();
    assert_eq!(ct.id(), 2);
    assert_eq!(ct.name(), "teleconsultation");
}
