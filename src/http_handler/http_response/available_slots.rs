use crate::http_handler::common::Slot;
use crate::http_handler::http_response::response_common::SerdeJSONBodyHTTPResponseType;

#[derive(serde::Deserialize, Debug)]
#[serde(transparent)]
pub struct AvailableSlotsResponse {
    slots: Vec<Slot>,
}

impl SerdeJSONBodyHTTPResponseType for AvailableSlotsResponse {}

impl AvailableSlotsResponse {
    pub fn into_slots(self) -> Vec<Slot> { self.slots }
}
