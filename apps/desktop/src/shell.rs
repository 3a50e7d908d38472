//! Interactive loop over the booking controller.

use std::io;

use anyhow::Result;
use client_core::{BookingApi, BookingViewController, HostDialogs, View};
use shared::domain::{ReservationId, RoomId};

use crate::{dialogs::prompt, render};

const HELP: &str = "\
commands:
  rooms                    show rooms
  reservations             show reservations
  refresh                  reload rooms and reservations
  book <room-id>           book a room
  cancel <reservation-id>  cancel a reservation
  help                     show this help
  quit                     leave";

#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    Empty,
    Rooms,
    Reservations,
    Refresh,
    Book(RoomId),
    Cancel(ReservationId),
    Help,
    Quit,
}

impl ShellCommand {
    fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(Self::Empty);
        };
        let argument = words.next();

        match (command, argument) {
            ("rooms", None) => Ok(Self::Rooms),
            ("reservations", None) => Ok(Self::Reservations),
            ("refresh", None) => Ok(Self::Refresh),
            ("help", None) => Ok(Self::Help),
            ("quit" | "exit", None) => Ok(Self::Quit),
            ("book", Some(id)) => id
                .parse::<i64>()
                .map(|id| Self::Book(RoomId(id)))
                .map_err(|_| format!("room id must be a number, got '{id}'")),
            ("book", None) => Err("usage: book <room-id>".to_string()),
            ("cancel", Some(id)) => Ok(Self::Cancel(ReservationId::from(id))),
            ("cancel", None) => Err("usage: cancel <reservation-id>".to_string()),
            _ => Err(format!("unknown command '{}'; try `help`", line.trim())),
        }
    }
}

pub async fn run_shell<A: BookingApi, H: HostDialogs>(
    controller: &mut BookingViewController<A, H>,
) -> Result<()> {
    print!("{}", render::render(controller));
    println!("{HELP}");

    while let Some(line) = prompt("booking> ")? {
        match ShellCommand::parse(&line) {
            Ok(ShellCommand::Empty) => continue,
            Ok(ShellCommand::Help) => {
                println!("{HELP}");
                continue;
            }
            Ok(ShellCommand::Quit) => break,
            Ok(ShellCommand::Rooms) => controller.show_view(View::Rooms),
            Ok(ShellCommand::Reservations) => controller.show_view(View::Reservations),
            Ok(ShellCommand::Refresh) => controller.refresh().await,
            Ok(ShellCommand::Book(room_id)) => {
                book_interactively(controller, room_id, prompt).await?
            }
            Ok(ShellCommand::Cancel(id)) => controller.cancel_reservation(&id).await,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        }
        print!("{}", render::render(controller));
    }

    Ok(())
}

/// Keeps the booking modal open, re-prompting after each failed submission,
/// until the booking goes through or the user leaves the guest name empty.
async fn book_interactively<A, H, F>(
    controller: &mut BookingViewController<A, H>,
    room_id: RoomId,
    mut ask: F,
) -> Result<()>
where
    A: BookingApi,
    H: HostDialogs,
    F: FnMut(&str) -> io::Result<Option<String>>,
{
    let Some(room) = controller
        .state()
        .rooms
        .iter()
        .find(|room| room.id == room_id)
        .cloned()
    else {
        eprintln!("no room with id {room_id}; try `refresh`");
        return Ok(());
    };

    controller.select_room(&room);
    while controller.state().show_modal {
        print!("{}", render::render_modal(controller.state()));

        let guest = ask("guest name (empty to close): ")?.unwrap_or_default();
        if guest.is_empty() {
            controller.close_modal();
            break;
        }
        let today = controller.state().today.clone();
        let Some(check_in) = ask(&format!("check-in (YYYY-MM-DD, {today} or later): "))? else {
            controller.close_modal();
            break;
        };
        let Some(check_out) = ask("check-out (YYYY-MM-DD): ")? else {
            controller.close_modal();
            break;
        };

        let form = controller.booking_form_mut();
        form.guest_name = guest;
        form.check_in = check_in;
        form.check_out = check_out;
        controller.submit_booking().await;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use client_core::BookingApiError;

    use super::*;
    use crate::test_support::{controller_with, StubApi};

    /// Answers prompts from a script, then reports end of input.
    struct Script {
        answers: VecDeque<&'static str>,
        labels: Vec<String>,
    }

    impl Script {
        fn new(answers: &[&'static str]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                labels: Vec::new(),
            }
        }

        fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
            self.labels.push(label.to_string());
            Ok(self.answers.pop_front().map(str::to_string))
        }
    }

    #[test]
    fn parses_commands() {
        assert_eq!(ShellCommand::parse("   "), Ok(ShellCommand::Empty));
        assert_eq!(ShellCommand::parse("rooms"), Ok(ShellCommand::Rooms));
        assert_eq!(
            ShellCommand::parse(" book 2 "),
            Ok(ShellCommand::Book(RoomId(2)))
        );
        assert_eq!(
            ShellCommand::parse("cancel 5f1c-aa"),
            Ok(ShellCommand::Cancel(ReservationId::from("5f1c-aa")))
        );
        assert_eq!(ShellCommand::parse("exit"), Ok(ShellCommand::Quit));
    }

    #[test]
    fn rejects_malformed_commands() {
        assert!(ShellCommand::parse("book two").is_err());
        assert!(ShellCommand::parse("book").is_err());
        assert!(ShellCommand::parse("cancel").is_err());
        assert!(ShellCommand::parse("rooms please").is_err());
        assert!(ShellCommand::parse("dance").is_err());
    }

    #[tokio::test]
    async fn booking_prompt_retries_until_accepted() {
        let api = StubApi::with_rooms(&[(1, "Room 101")]).rejecting(BookingApiError::Status {
            status: 409,
            message: Some("Room already booked".to_string()),
        });
        let mut controller = controller_with(api).await;
        let mut script = Script::new(&[
            "Ada", "2025-03-05", "2025-03-10",
            "Ada", "2025-03-12", "2025-03-14",
        ]);

        book_interactively(&mut controller, RoomId(1), |label| script.ask(label))
            .await
            .expect("interactive booking");

        let posted = controller.api().posted();
        assert_eq!(posted.len(), 2);
        assert_eq!(posted[1].check_in, "2025-03-12");
        let state = controller.state();
        assert!(!state.show_modal);
        assert_eq!(state.booking_error, None);
        assert_eq!(state.current_view, View::Reservations);
        assert!(script.labels[1].contains("2025-03-01 or later"));
    }

    #[tokio::test]
    async fn empty_guest_name_closes_booking_prompt() {
        let mut controller = controller_with(StubApi::with_rooms(&[(1, "Room 101")])).await;
        let mut script = Script::new(&[""]);

        book_interactively(&mut controller, RoomId(1), |label| script.ask(label))
            .await
            .expect("interactive booking");

        assert!(!controller.state().show_modal);
        assert_eq!(controller.state().selected_room, None);
        assert!(controller.api().posted().is_empty());
    }

    #[tokio::test]
    async fn end_of_input_closes_booking_prompt() {
        let mut controller = controller_with(StubApi::with_rooms(&[(1, "Room 101")])).await;
        let mut script = Script::new(&["Ada"]);

        book_interactively(&mut controller, RoomId(1), |label| script.ask(label))
            .await
            .expect("interactive booking");

        assert!(!controller.state().show_modal);
        assert!(controller.api().posted().is_empty());
    }

    #[tokio::test]
    async fn booking_unknown_room_asks_nothing() {
        let mut controller = controller_with(StubApi::with_rooms(&[(1, "Room 101")])).await;
        let mut script = Script::new(&["Ada"]);

        book_interactively(&mut controller, RoomId(9), |label| script.ask(label))
            .await
            .expect("interactive booking");

        assert!(script.labels.is_empty());
        assert!(!controller.state().show_modal);
    }
}
