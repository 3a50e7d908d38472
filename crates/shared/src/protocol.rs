use serde::{Deserialize, Serialize};

use crate::domain::RoomId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub room_id: RoomId,
    pub guest_name: String,
    pub check_in: String,
    pub check_out: String,
}

