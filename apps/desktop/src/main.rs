use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use client_core::{BookingViewController, HostDialogs, HttpBookingApi, View};
use shared::domain::{ReservationId, RoomId};
use tracing::info;

mod commands;
mod config;
mod dialogs;
mod render;
mod shell;
#[cfg(test)]
mod test_support;

use commands::{book_room, BookingRequest};
use config::{load_settings, normalize_base_url, DEFAULT_CONFIG_FILE};
use dialogs::{AutoConfirm, TerminalDialogs};

#[derive(Parser, Debug)]
#[command(name = "booking", about = "Browse rooms and manage reservations")]
struct Args {
    /// Reservation API base url; overrides the config file and environment.
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print rooms or reservations.
    List {
        #[arg(long, value_enum, default_value_t = ViewArg::Rooms)]
        view: ViewArg,
    },
    /// Book a room for a date range.
    Book {
        #[arg(long)]
        room: i64,
        #[arg(long)]
        guest: String,
        #[arg(long)]
        check_in: String,
        #[arg(long)]
        check_out: String,
    },
    /// Cancel a reservation.
    Cancel {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Interactive session (default).
    Shell,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ViewArg {
    Rooms,
    Reservations,
}

impl From<ViewArg> for View {
    fn from(value: ViewArg) -> Self {
        match value {
            ViewArg::Rooms => View::Rooms,
            ViewArg::Reservations => View::Reservations,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(&args.config);
    if let Some(url) = &args.server_url {
        settings.api_base_url = normalize_base_url(url);
    }

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    let api = HttpBookingApi::with_timeout(
        &settings.api_base_url,
        Duration::from_secs(settings.request_timeout_secs),
    )
    .context("failed to build reservation API client")?;
    info!(api = %api.base_url(), "starting booking client");

    let command = args.command.unwrap_or(Command::Shell);
    if matches!(command, Command::Cancel { yes: true, .. }) {
        run(BookingViewController::new(api, AutoConfirm(TerminalDialogs)), command).await
    } else {
        run(BookingViewController::new(api, TerminalDialogs), command).await
    }
}

async fn run<H: HostDialogs>(
    mut controller: BookingViewController<HttpBookingApi, H>,
    command: Command,
) -> Result<()> {
    controller.mount().await;

    match command {
        Command::List { view } => {
            controller.show_view(view.into());
            print!("{}", render::render(&controller));
        }
        Command::Book {
            room,
            guest,
            check_in,
            check_out,
        } => {
            let request = BookingRequest {
                room: RoomId(room),
                guest,
                check_in,
                check_out,
            };
            let booked = book_room(&mut controller, request).await;
            print!("{}", render::render(&controller));
            booked?;
        }
        Command::Cancel { id, .. } => {
            controller.cancel_reservation(&ReservationId(id)).await;
            controller.show_view(View::Reservations);
            print!("{}", render::render(&controller));
        }
        Command::Shell => shell::run_shell(&mut controller).await?,
    }

    Ok(())
}
