use crate::api::models::{BookingCreate, ChatRequest, RestaurantSettings};
use crate::booking::RefreshTicket;
use crate::error::ApiError;
use crate::event::{AppEvent, EventSink};
use crate::session::Session;
use futures_util::Stream;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::time::{self, Duration};

pub mod http;
pub mod models;
pub mod stream;

use http::HttpApi;

/// Runs API calls on the tokio runtime and reports their outcome to the UI
/// as [`AppEvent`]s.
#[derive(Clone)]
pub struct CrmClient {
    api: HttpApi,
    sink: EventSink,
    runtime_handle: Handle,
    ticker_started: Arc<AtomicBool>,
}

impl CrmClient {
    pub fn new(api: HttpApi, sink: EventSink, runtime_handle: Handle) -> Self {
        Self {
            api,
            sink,
            runtime_handle,
            ticker_started: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Starts the periodic slot refresh. Calling it again is a no-op.
    pub fn start(&self, refresh_interval: Duration) {
        if self
            .ticker_started
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }

        let sink = self.sink.clone();
        self.runtime_handle.spawn(async move {
            let mut ticker = time::interval(refresh_interval);
            ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
            // The first tick completes immediately.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if !sink.send(AppEvent::SlotRefreshDue) {
                    tracing::debug!("slot ticker stopping, UI is gone");
                    break;
                }
            }
        });
    }

    pub fn login(&self, username: String, password: String) {
        let api = self.api.clone();
        let sink = self.sink.clone();

        self.runtime_handle.spawn(async move {
            match api.login(&username, &password).await {
                Ok(session) => {
                    tracing::info!(%username, "logged in");
                    sink.send(AppEvent::LoggedIn(session));
                }
                Err(err) => {
                    tracing::warn!(%username, error = %err, "login failed");
                    sink.send(AppEvent::LoginFailed(err.detail_or("Login failed")));
                }
            }
        });
    }

    pub fn fetch_slots(&self, session: &Session, restaurant_id: i64, ticket: RefreshTicket) {
        let api = self.api.clone();
        let sink = self.sink.clone();
        let session = session.clone();

        self.runtime_handle.spawn(async move {
            let result = api.fetch_slots(&session, restaurant_id, ticket.date).await;
            if expired(&sink, &result) {
                return;
            }
            let result = result
                .map_err(|err| {
                    tracing::warn!(date = %ticket.date, error = %err, "slot fetch failed");
                    err.detail_or("Could not load slots")
                })
                .and_then(|response| {
                    response.into_slots_for(restaurant_id, ticket.date).inspect_err(|mismatch| {
                        tracing::warn!(date = %ticket.date, %mismatch, "slot response does not match request");
                    })
                });
            sink.send(AppEvent::SlotsLoaded { ticket, result });
        });
    }

    pub fn create_booking(&self, session: &Session, booking: BookingCreate) {
        let api = self.api.clone();
        let sink = self.sink.clone();
        let session = session.clone();

        self.runtime_handle.spawn(async move {
            let result = api.create_booking(&session, &booking).await;
            if expired(&sink, &result) {
                return;
            }
            match result {
                Ok(created) => {
                    tracing::info!(
                        booking_id = created.booking_id,
                        status = created.status.as_deref().unwrap_or("created"),
                        date = %booking.date,
                        slot = %booking.time_slot,
                        "booking created"
                    );
                    sink.send(AppEvent::BookingCreated(created.booking_id));
                }
                Err(err) => {
                    tracing::warn!(error = %err, "booking failed");
                    sink.send(AppEvent::BookingFailed(err.detail_or("Booking failed")));
                }
            }
        });
    }

    pub fn load_settings(&self, session: &Session, restaurant_id: i64) {
        let api = self.api.clone();
        let sink = self.sink.clone();
        let session = session.clone();

        self.runtime_handle.spawn(async move {
            let result = api.fetch_settings(&session, restaurant_id).await;
            if expired(&sink, &result) {
                return;
            }
            match result {
                Ok(settings) => {
                    sink.send(AppEvent::SettingsLoaded(settings));
                }
                Err(err) => {
                    tracing::warn!(error = %err, "settings fetch failed");
                    sink.send(AppEvent::SettingsLoadFailed(
                        err.detail_or("Could not load settings"),
                    ));
                }
            }
        });
    }

    pub fn save_settings(&self, session: &Session, restaurant_id: i64, settings: RestaurantSettings) {
        let api = self.api.clone();
        let sink = self.sink.clone();
        let session = session.clone();

        self.runtime_handle.spawn(async move {
            let result = api.update_settings(&session, restaurant_id, &settings).await;
            if expired(&sink, &result) {
                return;
            }
            match result {
                Ok(_) => {
                    sink.send(AppEvent::SettingsSaved);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "settings save failed");
                    sink.send(AppEvent::SettingsSaveFailed(
                        err.detail_or("Could not save settings"),
                    ));
                }
            }
        });
    }

    /// Best-effort save after an info trigger. Failures are only logged.
    pub fn save_info(&self, session: &Session, restaurant_id: i64, settings: RestaurantSettings) {
        let api = self.api.clone();
        let sink = self.sink.clone();
        let session = session.clone();

        self.runtime_handle.spawn(async move {
            if let Err(err) = api.update_settings(&session, restaurant_id, &settings).await {
                tracing::warn!(error = %err, "info update from assistant was not saved");
                sink.send(AppEvent::InfoSaveFailed(err.to_string()));
            }
        });
    }

    /// Streams one assistant reply. Ends with exactly one `ChatClosed`.
    pub fn send_chat(&self, session: &Session, request: ChatRequest) {
        let api = self.api.clone();
        let sink = self.sink.clone();
        let session = session.clone();

        self.runtime_handle.spawn(async move {
            let opened = api
                .open_chat_stream(&session, &request)
                .await
                .map(|response| response.bytes_stream());
            relay_chat(opened, &sink).await;
        });
    }
}

/// Forwards a reply stream to the UI as `ChatEvent`s, then sends exactly one
/// `ChatClosed`. A failure to open the stream or a broken body becomes the
/// closing failure.
async fn relay_chat<S, B, E>(opened: Result<S, ApiError>, sink: &EventSink)
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
{
    let failure = match opened {
        Ok(body) => {
            let forwarded = stream::pump_events(body, |event| {
                if sink.send(AppEvent::ChatEvent(event)) {
                    ControlFlow::Continue(())
                } else {
                    ControlFlow::Break(())
                }
            })
            .await;
            forwarded.err().map(|err| {
                tracing::warn!(error = %err, "assistant stream interrupted");
                err.to_string()
            })
        }
        Err(err) => {
            tracing::warn!(error = %err, "assistant stream unavailable");
            Some(err.detail_or("Could not reach the assistant"))
        }
    };

    sink.send(AppEvent::ChatClosed { failure });
}

fn expired<T>(sink: &EventSink, result: &Result<T, ApiError>) -> bool {
    match result {
        Err(err) if err.is_unauthorized() => {
            tracing::info!("session rejected by server");
            sink.send(AppEvent::SessionExpired);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::relay_chat;
    use crate::api::stream::StreamEvent;
    use crate::chat::ChatState;
    use crate::error::ApiError;
    use crate::event::{AppEvent, EventSink};
    use eframe::egui;
    use futures_util::stream;
    use std::io;
    use std::sync::mpsc;

    type Chunk = Result<&'static [u8], io::Error>;

    fn sink() -> (EventSink, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel();
        (EventSink::new(tx, egui::Context::default()), rx)
    }

    fn replay(chat: &mut ChatState, events: Vec<AppEvent>) {
        for event in events {
            match event {
                AppEvent::ChatEvent(event) => {
                    chat.apply(event);
                }
                AppEvent::ChatClosed { failure } => chat.end_turn(failure),
                other => panic!("unexpected event {other:?}"),
            }
        }
    }

    fn closings(events: &[AppEvent]) -> Vec<Option<String>> {
        events
            .iter()
            .filter_map(|event| match event {
                AppEvent::ChatClosed { failure } => Some(failure.clone()),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn finished_stream_closes_once_without_failure() {
        let (sink, rx) = sink();
        let body = stream::iter(vec![
            Chunk::Ok(b"data: {\"delta\":\"Hi\"}\n\n"),
            Chunk::Ok(b"data: {\"done\":true}\n\n"),
        ]);
        relay_chat(Ok(body), &sink).await;

        let events: Vec<AppEvent> = rx.try_iter().collect();
        assert_eq!(closings(&events), vec![None]);
        assert!(matches!(events.last(), Some(AppEvent::ChatClosed { .. })));
    }

    #[tokio::test]
    async fn broken_body_closes_once_with_failure() {
        let (sink, rx) = sink();
        let body = stream::iter(vec![
            Chunk::Ok(b"data: {\"delta\":\"Partial\"}\n\n"),
            Chunk::Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset")),
        ]);
        relay_chat(Ok(body), &sink).await;

        let events: Vec<AppEvent> = rx.try_iter().collect();
        assert_eq!(closings(&events), vec![Some("connection reset".to_string())]);

        let mut chat = ChatState::new(None);
        chat.begin_turn("hi", "asst");
        replay(&mut chat, events);
        let contents: Vec<&str> = chat.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["hi", "Partial", "Error: connection reset"]);
        assert!(!chat.is_streaming());
    }

    #[tokio::test]
    async fn rejected_request_closes_once_with_server_detail() {
        let (sink, rx) = sink();
        let opened: Result<stream::Iter<std::vec::IntoIter<Chunk>>, ApiError> =
            Err(ApiError::Status {
                status: 500,
                detail: "Assistant unavailable".to_string(),
            });
        relay_chat(opened, &sink).await;

        let events: Vec<AppEvent> = rx.try_iter().collect();
        assert_eq!(events.len(), 1);
        assert_eq!(closings(&events), vec![Some("Assistant unavailable".to_string())]);
    }

    #[tokio::test]
    async fn events_arrive_in_stream_order_before_closing() {
        let (sink, rx) = sink();
        let body = stream::iter(vec![Chunk::Ok(
            b"data: {\"thread_id\":\"t1\"}\n\ndata: {\"delta\":\"a\"}\n\n",
        )]);
        relay_chat(Ok(body), &sink).await;

        let events: Vec<AppEvent> = rx.try_iter().collect();
        let streamed: Vec<StreamEvent> = events
            .iter()
            .filter_map(|event| match event {
                AppEvent::ChatEvent(event) => Some(event.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(streamed.len(), 2);
        assert_eq!(streamed[0].thread_id.as_deref(), Some("t1"));
        assert_eq!(streamed[1].delta.as_deref(), Some("a"));
        assert_eq!(closings(&events), vec![None]);
    }
}
