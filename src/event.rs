use crate::api::models::{RestaurantSettings, SlotInfo};
use crate::api::stream::StreamEvent;
use crate::booking::RefreshTicket;
use crate::session::Session;
use eframe::egui;
use std::sync::mpsc;

#[derive(Debug, Clone)]
pub enum AppEvent {
    LoggedIn(Session),
    LoginFailed(String),
    SessionExpired,
    SlotRefreshDue,
    SlotsLoaded {
        ticket: RefreshTicket,
        result: Result<Vec<SlotInfo>, String>,
    },
    BookingCreated(i64),
    BookingFailed(String),
    SettingsLoaded(RestaurantSettings),
    SettingsLoadFailed(String),
    SettingsSaved,
    SettingsSaveFailed(String),
    InfoSaveFailed(String),
    ChatEvent(StreamEvent),
    ChatClosed { failure: Option<String> },
}

/// Sending half of the UI event channel. Every send wakes the UI so the event
/// is drained on the next frame.
#[derive(Clone)]
pub struct EventSink {
    tx: mpsc::Sender<AppEvent>,
    ctx: egui::Context,
}

impl EventSink {
    pub fn new(tx: mpsc::Sender<AppEvent>, ctx: egui::Context) -> Self {
        Self { tx, ctx }
    }

    /// Returns false once the UI has gone away.
    pub fn send(&self, event: AppEvent) -> bool {
        let delivered = self.tx.send(event).is_ok();
        self.ctx.request_repaint();
        delivered
    }
}
