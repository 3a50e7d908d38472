use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Reservation, ReservationId, Room},
    error::ErrorBody,
    protocol::CreateReservationRequest,
};
use tracing::debug;
use url::Url;

pub mod controller;
pub mod error;
pub mod host;

pub use controller::{format_date, BookingForm, BookingViewController, View, ViewState};
pub use error::BookingApiError;
pub use host::HostDialogs;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The reservation HTTP API as seen by the booking controller.
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn list_rooms(&self) -> Result<Vec<Room>, BookingApiError>;
    async fn list_reservations(&self) -> Result<Vec<Reservation>, BookingApiError>;
    /// Returns the created reservation when the success body decodes as one.
    async fn create_reservation(
        &self,
        request: &CreateReservationRequest,
    ) -> Result<Option<Reservation>, BookingApiError>;
    async fn cancel_reservation(&self, id: &ReservationId) -> Result<(), BookingApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpBookingApi {
    http: Client,
    base_url: Url,
}

impl HttpBookingApi {
    pub fn new(base_url: &str) -> Result<Self, BookingApiError> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, BookingApiError> {
        let base_url = parse_base_url(base_url)?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // parse_base_url rejects cannot-be-a-base urls, so this always applies.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, BookingApiError> {
        let url = self.endpoint(segments);
        debug!(%url, "GET");
        let res = self.http.get(url).send().await?;
        let body = check_status(res).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn list_rooms(&self) -> Result<Vec<Room>, BookingApiError> {
        self.get_json(&["api", "rooms"]).await
    }

    async fn list_reservations(&self) -> Result<Vec<Reservation>, BookingApiError> {
        self.get_json(&["api", "reservations"]).await
    }

    async fn create_reservation(
        &self,
        request: &CreateReservationRequest,
    ) -> Result<Option<Reservation>, BookingApiError> {
        let url = self.endpoint(&["api", "reservations"]);
        debug!(%url, room_id = %request.room_id, "POST");
        let res = self.http.post(url).json(request).send().await?;
        let body = check_status(res).await?.bytes().await?;
        Ok(serde_json::from_slice(&body).ok())
    }

    async fn cancel_reservation(&self, id: &ReservationId) -> Result<(), BookingApiError> {
        let url = self.endpoint(&["api", "reservations", id.0.as_str()]);
        debug!(%url, "DELETE");
        let res = self.http.delete(url).send().await?;
        check_status(res).await?;
        Ok(())
    }
}

fn parse_base_url(raw: &str) -> Result<Url, BookingApiError> {
    let url = Url::parse(raw.trim()).map_err(|err| BookingApiError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(BookingApiError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "url cannot carry a path".to_string(),
        });
    }
    Ok(url)
}

async fn check_status(res: Response) -> Result<Response, BookingApiError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let message = res
        .bytes()
        .await
        .ok()
        .and_then(|body| ErrorBody::message_from_bytes(&body));
    Err(BookingApiError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/mock_server.rs"]
mod mock_server;
