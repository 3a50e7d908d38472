use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

macro_rules! id_newtype {
    ($name:ident, $inner:ty) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

id_newtype!(RoomId, i64);
id_newtype!(ReservationId, String);

impl Copy for RoomId {}

impl From<&str> for ReservationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A bookable room. Only `id` and `name` are interpreted; every other field the
/// server sends is carried through untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Room {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: RoomId(id),
            name: name.into(),
            extra: Map::new(),
        }
    }
}

/// A booking of a room for one guest. Dates stay as the `YYYY-MM-DD` strings the
/// server sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: ReservationId,
    pub room_id: RoomId,
    pub guest_name: String,
    pub check_in: String,
    pub check_out: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
