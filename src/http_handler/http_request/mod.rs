use super::http_response::{
    appointment_list, available_slots, cancel_appointment, consultation_types,
    create_appointment, doctor_list,
};

pub mod appointment_list_get;
pub mod available_slots_get;
pub mod cancel_appointment_post;
pub mod consultation_types_get;
pub mod create_appointment_post;
pub mod doctor_list_get;
pub mod request_common;
