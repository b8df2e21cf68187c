pub mod response_common;

pub mod appointment_list;
pub mod available_slots;
pub mod cancel_appointment;
pub mod consultation_types;
pub mod create_appointment;
pub mod doctor_list;
