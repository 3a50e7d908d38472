//! One-shot subcommands that drive a mounted controller.

use anyhow::{anyhow, bail, Result};
use client_core::{BookingApi, BookingViewController, HostDialogs};
use shared::domain::RoomId;

#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub room: RoomId,
    pub guest: String,
    pub check_in: String,
    pub check_out: String,
}

/// Books `request.room` through the modal flow. Fails when the room is not in
/// the loaded snapshot or the submission leaves a booking error behind.
pub async fn book_room<A: BookingApi, H: HostDialogs>(
    controller: &mut BookingViewController<A, H>,
    request: BookingRequest,
) -> Result<()> {
    let state = controller.state();
    let selected = state
        .rooms
        .iter()
        .find(|candidate| candidate.id == request.room)
        .cloned()
        .ok_or_else(|| match &state.error {
            Some(err) => anyhow!("no room with id {}: {err}", request.room),
            None => anyhow!("no room with id {}", request.room),
        })?;

    controller.select_room(&selected);
    let form = controller.booking_form_mut();
    form.guest_name = request.guest;
    form.check_in = request.check_in;
    form.check_out = request.check_out;
    controller.submit_booking().await;

    if let Some(err) = &controller.state().booking_error {
        bail!("booking failed: {err}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use client_core::{BookingApiError, View};

    use super::*;
    use crate::test_support::{controller_with, StubApi};

    fn request(room: i64, check_in: &str, check_out: &str) -> BookingRequest {
        BookingRequest {
            room: RoomId(room),
            guest: "Ada Lovelace".to_string(),
            check_in: check_in.to_string(),
            check_out: check_out.to_string(),
        }
    }

    #[tokio::test]
    async fn books_room_and_lands_on_reservations() {
        let mut controller = controller_with(StubApi::with_rooms(&[(1, "Room 101")])).await;

        book_room(&mut controller, request(1, "2025-03-05", "2025-03-10"))
            .await
            .expect("booking");

        let posted = controller.api().posted();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].room_id, RoomId(1));
        assert_eq!(posted[0].guest_name, "Ada Lovelace");
        assert!(!controller.state().show_modal);
        assert_eq!(controller.state().current_view, View::Reservations);
    }

    #[tokio::test]
    async fn unknown_room_is_an_error_without_posting() {
        let mut controller = controller_with(StubApi::with_rooms(&[(1, "Room 101")])).await;

        let err = book_room(&mut controller, request(7, "2025-03-05", "2025-03-10"))
            .await
            .expect_err("missing room");

        assert_eq!(err.to_string(), "no room with id 7");
        assert!(controller.api().posted().is_empty());
        assert!(!controller.state().show_modal);
    }

    #[tokio::test]
    async fn unknown_room_mentions_load_failure() {
        let mut controller = controller_with(StubApi::failing_room_load()).await;

        let err = book_room(&mut controller, request(1, "2025-03-05", "2025-03-10"))
            .await
            .expect_err("missing room");

        assert_eq!(err.to_string(), "no room with id 1: Failed to load rooms");
    }

    #[tokio::test]
    async fn rejected_booking_fails_with_server_message() {
        let api = StubApi::with_rooms(&[(1, "Room 101")]).rejecting(BookingApiError::Status {
            status: 409,
            message: Some("Room already booked".to_string()),
        });
        let mut controller = controller_with(api).await;

        let err = book_room(&mut controller, request(1, "2025-03-05", "2025-03-10"))
            .await
            .expect_err("rejected");

        assert_eq!(err.to_string(), "booking failed: Room already booked");
        assert!(controller.state().show_modal);
    }

    #[tokio::test]
    async fn invalid_dates_fail_before_posting() {
        let mut controller = controller_with(StubApi::with_rooms(&[(1, "Room 101")])).await;

        let err = book_room(&mut controller, request(1, "2025-03-10", "2025-03-05"))
            .await
            .expect_err("reversed dates");

        assert_eq!(
            err.to_string(),
            "booking failed: Check-out date must be after check-in date"
        );
        assert!(controller.api().posted().is_empty());
    }
}
