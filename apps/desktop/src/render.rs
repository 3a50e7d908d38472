//! Plain-text rendering of the booking view state.

use std::fmt::Write as _;

use client_core::{format_date, BookingApi, BookingViewController, HostDialogs, View, ViewState};
use serde_json::{Map, Value};

pub fn render<A: BookingApi, H: HostDialogs>(controller: &BookingViewController<A, H>) -> String {
    let state = controller.state();
    let mut out = String::new();

    render_status(state, &mut out);
    match state.current_view {
        View::Rooms => render_rooms(state, &mut out),
        View::Reservations => {
            let _ = writeln!(out, "Reservations");
            if state.reservations.is_empty() {
                let _ = writeln!(out, "  No reservations yet.");
            }
            for reservation in &state.reservations {
                let _ = writeln!(
                    out,
                    "  {}  {}  {}  {} to {}",
                    reservation.id,
                    controller.room_name(reservation.room_id),
                    reservation.guest_name,
                    format_date(&reservation.check_in),
                    format_date(&reservation.check_out),
                );
            }
        }
    }
    if state.show_modal {
        out.push_str(&render_modal(state));
    }

    out
}

pub fn render_modal(state: &ViewState) -> String {
    let mut out = String::new();
    if let Some(room) = &state.selected_room {
        let _ = writeln!(out, "Book {} [{}]", room.name, room.id);
    }
    if state.submitting {
        let _ = writeln!(out, "  Submitting...");
    }
    if let Some(err) = &state.booking_error {
        let _ = writeln!(out, "  ! {err}");
    }
    out
}

fn render_status(state: &ViewState, out: &mut String) {
    if state.loading {
        let _ = writeln!(out, "Loading...");
    }
    if let Some(err) = &state.error {
        let _ = writeln!(out, "Error: {err}");
    }
}

fn render_rooms(state: &ViewState, out: &mut String) {
    let _ = writeln!(out, "Rooms");
    if state.rooms.is_empty() {
        let _ = writeln!(out, "  No rooms available.");
    }
    for room in &state.rooms {
        let details = describe_extra(&room.extra);
        if details.is_empty() {
            let _ = writeln!(out, "  [{}] {}", room.id, room.name);
        } else {
            let _ = writeln!(out, "  [{}] {}  ({details})", room.id, room.name);
        }
    }
}

fn describe_extra(extra: &Map<String, Value>) -> String {
    extra
        .iter()
        .map(|(key, value)| match value {
            Value::String(text) => format!("{key}: {text}"),
            other => format!("{key}: {other}"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
