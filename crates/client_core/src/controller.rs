//! Booking view-state machine: list loading, the booking modal, and cancellation.

use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use shared::{
    domain::{Reservation, ReservationId, Room, RoomId},
    protocol::CreateReservationRequest,
};
use tracing::{debug, error, info};

use crate::{error::BookingApiError, host::HostDialogs, BookingApi};

pub const UNKNOWN_ROOM: &str = "Unknown Room";
pub const INVALID_DATE: &str = "Invalid Date";
pub const CHECK_OUT_BEFORE_CHECK_IN: &str = "Check-out date must be after check-in date";
pub const CANCEL_CONFIRMATION: &str = "Are you sure you want to cancel this reservation?";

const LOAD_ROOMS_FAILED: &str = "Failed to load rooms";
const LOAD_RESERVATIONS_FAILED: &str = "Failed to load reservations";
const CREATE_RESERVATION_FAILED: &str = "Failed to create reservation";
const CANCEL_RESERVATION_FAILED: &str = "Failed to cancel reservation";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Rooms,
    Reservations,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub guest_name: String,
    pub check_in: String,
    pub check_out: String,
}

impl BookingForm {
    /// `YYYY-MM-DD` strings order lexically the same way the dates order in time.
    fn dates_in_order(&self) -> bool {
        self.check_out > self.check_in
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub current_view: View,
    pub rooms: Vec<Room>,
    pub reservations: Vec<Reservation>,
    pub loading: bool,
    pub error: Option<String>,
    pub show_modal: bool,
    pub selected_room: Option<Room>,
    pub booking_form: BookingForm,
    pub booking_error: Option<String>,
    pub submitting: bool,
    /// Local date at startup, `YYYY-MM-DD`. Earliest selectable check-in.
    pub today: String,
}

impl ViewState {
    pub fn new(today: impl Into<String>) -> Self {
        Self {
            today: today.into(),
            ..Self::default()
        }
    }

    fn close_modal(&mut self) {
        self.show_modal = false;
        self.selected_room = None;
        self.booking_error = None;
    }
}

#[derive(Debug, Clone, Copy)]
enum BusyFlag {
    Loading,
    Submitting,
}

impl BusyFlag {
    fn slot(self, state: &mut ViewState) -> &mut bool {
        match self {
            Self::Loading => &mut state.loading,
            Self::Submitting => &mut state.submitting,
        }
    }
}

/// Raises a busy flag for as long as it is alive and lowers it on drop, whichever
/// way the guarded operation exits.
struct BusyGuard<'a> {
    state: &'a mut ViewState,
    flag: BusyFlag,
}

impl<'a> BusyGuard<'a> {
    fn begin(state: &'a mut ViewState, flag: BusyFlag) -> Self {
        *flag.slot(state) = true;
        Self { state, flag }
    }
}

impl Deref for BusyGuard<'_> {
    type Target = ViewState;

    fn deref(&self) -> &ViewState {
        &*self.state
    }
}

impl DerefMut for BusyGuard<'_> {
    fn deref_mut(&mut self) -> &mut ViewState {
        &mut *self.state
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *self.flag.slot(&mut *self.state) = false;
    }
}

pub struct BookingViewController<A, H> {
    api: A,
    host: H,
    state: ViewState,
}

impl<A: BookingApi, H: HostDialogs> BookingViewController<A, H> {
    pub fn new(api: A, host: H) -> Self {
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        Self::with_state(api, host, ViewState::new(today))
    }

    pub fn with_state(api: A, host: H, state: ViewState) -> Self {
        Self { api, host, state }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Input binding for the booking modal's fields.
    pub fn booking_form_mut(&mut self) -> &mut BookingForm {
        &mut self.state.booking_form
    }

    pub fn show_view(&mut self, view: View) {
        self.state.current_view = view;
    }

    /// Startup hook: fetches both lists at once.
    pub async fn mount(&mut self) {
        let api = &self.api;
        let mut state = BusyGuard::begin(&mut self.state, BusyFlag::Loading);
        state.error = None;
        let (rooms, reservations) = futures::join!(api.list_rooms(), api.list_reservations());
        apply_rooms(&mut state, rooms);
        apply_reservations(&mut state, reservations);
    }

    pub async fn load_rooms(&mut self) {
        load_rooms_into(&self.api, &mut self.state).await;
    }

    pub async fn load_reservations(&mut self) {
        load_reservations_into(&self.api, &mut self.state).await;
    }

    /// Reloads rooms, then reservations.
    pub async fn refresh(&mut self) {
        refresh_into(&self.api, &mut self.state).await;
    }

    pub fn select_room(&mut self, room: &Room) {
        self.state.selected_room = Some(room.clone());
        self.state.show_modal = true;
        self.state.booking_error = None;
        self.state.booking_form = BookingForm::default();
    }

    /// Leaves `booking_form` as is; the next `select_room` clears it.
    pub fn close_modal(&mut self) {
        self.state.close_modal();
    }

    pub async fn submit_booking(&mut self) {
        let Some(room_id) = self.state.selected_room.as_ref().map(|room| room.id) else {
            return;
        };

        if !self.state.booking_form.dates_in_order() {
            self.state.booking_error = Some(CHECK_OUT_BEFORE_CHECK_IN.to_string());
            return;
        }

        let api = &self.api;
        let mut state = BusyGuard::begin(&mut self.state, BusyFlag::Submitting);
        state.booking_error = None;

        let request = CreateReservationRequest {
            room_id,
            guest_name: state.booking_form.guest_name.clone(),
            check_in: state.booking_form.check_in.clone(),
            check_out: state.booking_form.check_out.clone(),
        };

        match api.create_reservation(&request).await {
            Ok(created) => {
                info!(
                    room_id = %room_id,
                    reservation_id = created.as_ref().map(|r| r.id.0.as_str()).unwrap_or("?"),
                    "reservation created"
                );
                refresh_into(api, &mut state).await;
                state.close_modal();
                state.current_view = View::Reservations;
            }
            Err(err) => {
                error!("error creating reservation: {err}");
                state.booking_error =
                    Some(mutation_failure_message(&err, CREATE_RESERVATION_FAILED));
            }
        }
    }

    pub async fn cancel_reservation(&mut self, id: &ReservationId) {
        if !self.host.confirm(CANCEL_CONFIRMATION) {
            return;
        }

        match self.api.cancel_reservation(id).await {
            Ok(()) => {
                info!(reservation_id = %id, "reservation cancelled");
                self.refresh().await;
            }
            Err(err) => {
                error!("error cancelling reservation: {err}");
                let message = mutation_failure_message(&err, CANCEL_RESERVATION_FAILED);
                self.host.alert(&format!("Error cancelling reservation: {message}"));
            }
        }
    }

    pub fn room_name(&self, room_id: RoomId) -> &str {
        self.state
            .rooms
            .iter()
            .find(|room| room.id == room_id)
            .map_or(UNKNOWN_ROOM, |room| room.name.as_str())
    }
}

async fn load_rooms_into<A: BookingApi + ?Sized>(api: &A, state: &mut ViewState) {
    let mut state = BusyGuard::begin(state, BusyFlag::Loading);
    state.error = None;
    let result = api.list_rooms().await;
    apply_rooms(&mut state, result);
}

async fn load_reservations_into<A: BookingApi + ?Sized>(api: &A, state: &mut ViewState) {
    let mut state = BusyGuard::begin(state, BusyFlag::Loading);
    state.error = None;
    let result = api.list_reservations().await;
    apply_reservations(&mut state, result);
}

async fn refresh_into<A: BookingApi + ?Sized>(api: &A, state: &mut ViewState) {
    load_rooms_into(api, state).await;
    load_reservations_into(api, state).await;
}

fn apply_rooms(state: &mut ViewState, result: Result<Vec<Room>, BookingApiError>) {
    match result {
        Ok(rooms) => {
            debug!(count = rooms.len(), "loaded rooms");
            state.rooms = rooms;
        }
        Err(err) => {
            error!("error loading rooms: {err}");
            state.error = Some(list_failure_message(&err, LOAD_ROOMS_FAILED));
        }
    }
}

fn apply_reservations(state: &mut ViewState, result: Result<Vec<Reservation>, BookingApiError>) {
    match result {
        Ok(reservations) => {
            debug!(count = reservations.len(), "loaded reservations");
            state.reservations = reservations;
        }
        Err(err) => {
            error!("error loading reservations: {err}");
            state.error = Some(list_failure_message(&err, LOAD_RESERVATIONS_FAILED));
        }
    }
}

fn list_failure_message(err: &BookingApiError, fallback: &str) -> String {
    match err.status() {
        Some(_) => fallback.to_string(),
        None => err.to_string(),
    }
}

fn mutation_failure_message(err: &BookingApiError, fallback: &str) -> String {
    match err.status() {
        Some(_) => err.server_message().unwrap_or(fallback).to_string(),
        None => err.to_string(),
    }
}

/// Renders an ISO date as e.g. "January 5, 2025". Full timestamps are accepted
/// and rendered by their date part.
pub fn format_date(date: &str) -> String {
    let date = date.trim();
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(date)
                .ok()
                .map(|dt| dt.date_naive())
        });

    match parsed {
        Some(day) => day.format("%B %-d, %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
