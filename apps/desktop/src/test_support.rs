//! In-memory reservation API and silent dialogs for host-side tests.

use std::sync::Mutex;

use async_trait::async_trait;
use client_core::{BookingApi, BookingApiError, BookingViewController, HostDialogs, ViewState};
use shared::{
    domain::{Reservation, ReservationId, Room},
    protocol::CreateReservationRequest,
};

pub struct StubApi {
    rooms: Option<Vec<Room>>,
    rejections: Mutex<Vec<BookingApiError>>,
    posted: Mutex<Vec<CreateReservationRequest>>,
}

impl StubApi {
    pub fn with_rooms(rooms: &[(i64, &str)]) -> Self {
        Self {
            rooms: Some(rooms.iter().map(|(id, name)| Room::new(*id, *name)).collect()),
            rejections: Mutex::new(Vec::new()),
            posted: Mutex::new(Vec::new()),
        }
    }

    /// Every room listing answers 500.
    pub fn failing_room_load() -> Self {
        Self {
            rooms: None,
            ..Self::with_rooms(&[])
        }
    }

    /// Queues a failure for the next create; later creates succeed.
    pub fn rejecting(self, err: BookingApiError) -> Self {
        self.rejections.lock().expect("rejections").push(err);
        self
    }

    pub fn posted(&self) -> Vec<CreateReservationRequest> {
        self.posted.lock().expect("posted").clone()
    }
}

#[async_trait]
impl BookingApi for StubApi {
    async fn list_rooms(&self) -> Result<Vec<Room>, BookingApiError> {
        self.rooms.clone().ok_or(BookingApiError::Status {
            status: 500,
            message: None,
        })
    }

    async fn list_reservations(&self) -> Result<Vec<Reservation>, BookingApiError> {
        Ok(Vec::new())
    }

    async fn create_reservation(
        &self,
        request: &CreateReservationRequest,
    ) -> Result<Option<Reservation>, BookingApiError> {
        self.posted.lock().expect("posted").push(request.clone());
        match self.rejections.lock().expect("rejections").pop() {
            Some(err) => Err(err),
            None => Ok(None),
        }
    }

    async fn cancel_reservation(&self, _id: &ReservationId) -> Result<(), BookingApiError> {
        Ok(())
    }
}

pub struct SilentDialogs;

impl HostDialogs for SilentDialogs {
    fn confirm(&self, _message: &str) -> bool {
        true
    }

    fn alert(&self, _message: &str) {}
}

pub async fn controller_with(api: StubApi) -> BookingViewController<StubApi, SilentDialogs> {
    let mut controller =
        BookingViewController::with_state(api, SilentDialogs, ViewState::new("2025-03-01"));
    controller.mount().await;
    controller
}
