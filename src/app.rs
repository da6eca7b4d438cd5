use crate::api::models::RestaurantSettings;
use crate::api::CrmClient;
use crate::chat::ChatEffect;
use crate::config::Config;
use crate::event::AppEvent;
use crate::pages::bookings::BookingsPage;
use crate::pages::clients::ClientsPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::login::LoginPage;
use crate::pages::settings::SettingsPage;
use crate::pages::{finance, Page, PageAction};
use crate::session::store::SessionStore;
use crate::session::{Session, StoredSession};
use crate::theme::Theme;
use chrono::NaiveDate;
use eframe::egui::{self, RichText, ScrollArea};
use std::sync::mpsc::{Receiver, TryRecvError};

pub struct HostdeskApp {
    rx: Receiver<AppEvent>,
    client: CrmClient,
    restaurant_id: i64,
    theme: Theme,
    store: SessionStore,
    stored: StoredSession,
    session: Option<Session>,
    page: Page,
    login: LoginPage,
    bookings: BookingsPage,
    settings: SettingsPage,
    dashboard: DashboardPage,
    clients: ClientsPage,
    alerts: Vec<String>,
    diagnostics_log: Vec<String>,
}

impl HostdeskApp {
    pub fn new(
        rx: Receiver<AppEvent>,
        client: CrmClient,
        config: &Config,
        store: SessionStore,
        theme: Theme,
        today: NaiveDate,
    ) -> Self {
        let (stored, warning) = store.load();
        let session = stored.session();
        let thread_id = stored.thread_id.clone();

        let mut app = Self {
            rx,
            client,
            restaurant_id: config.restaurant.id,
            theme,
            store,
            stored,
            session,
            page: Page::Bookings,
            login: LoginPage::new(config.login.default_username.as_deref()),
            bookings: BookingsPage::new(config.restaurant.id, &config.bookings, today),
            settings: SettingsPage::new(
                config.restaurant.hostess_options.clone(),
                config.assistant_id().map(str::to_string),
                thread_id,
            ),
            dashboard: DashboardPage::default(),
            clients: ClientsPage::default(),
            alerts: Vec::new(),
            diagnostics_log: Vec::new(),
        };

        if let Some(warning) = warning {
            app.log_diagnostic(format!("session load warning: {warning}"));
        }
        if app.session.is_some() {
            app.log_diagnostic("restored saved session");
            app.refresh_slots();
        }

        app
    }

    fn timestamp() -> String {
        chrono::Local::now().format("%H:%M:%S").to_string()
    }

    fn log_diagnostic(&mut self, message: impl Into<String>) {
        self.diagnostics_log
            .push(format!("[{}] {}", Self::timestamp(), message.into()));
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save(&self.stored) {
            tracing::warn!(path = %self.store.path().display(), error = %err, "failed to persist session");
            self.log_diagnostic(format!("failed to persist session: {err}"));
        }
    }

    fn refresh_slots(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let ticket = self.bookings.begin_refresh();
        self.client.fetch_slots(session, self.restaurant_id, ticket);
    }

    fn load_settings(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        self.settings.begin_loading();
        self.client.load_settings(session, self.restaurant_id);
    }

    fn navigate(&mut self, page: Page) {
        if self.page == page {
            return;
        }
        self.page = page;
        match page {
            Page::Bookings => self.refresh_slots(),
            Page::Settings => self.load_settings(),
            Page::Dashboard | Page::Clients | Page::Finance => {}
        }
    }

    /// Forgets the token and returns to the login view. The assistant thread
    /// stays pinned.
    fn end_session(&mut self, reason: Option<String>) {
        self.session = None;
        self.stored.token = None;
        self.persist();

        self.login.reset();
        if let Some(reason) = reason {
            self.login.failed(reason);
        }
        self.page = Page::Bookings;
        self.bookings.reset_pending();
        self.settings.save_finished();
    }

    fn drain_events(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(event) => self.apply_event(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.log_diagnostic("event channel disconnected");
                    break;
                }
            }
        }
    }

    fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::LoggedIn(session) => {
                self.stored.token = Some(session.token().to_string());
                self.session = Some(session);
                self.persist();
                self.login.reset();
                self.log_diagnostic("signed in");
                self.page = Page::Bookings;
                self.refresh_slots();
            }
            AppEvent::LoginFailed(message) => {
                self.log_diagnostic(format!("login failed: {message}"));
                self.login.failed(message);
            }
            AppEvent::SessionExpired => {
                if self.session.is_some() {
                    self.log_diagnostic("session expired");
                    self.end_session(Some("Session expired, please sign in again".to_string()));
                }
            }
            AppEvent::SlotRefreshDue => {
                if self.page == Page::Bookings {
                    self.refresh_slots();
                }
            }
            AppEvent::SlotsLoaded { ticket, result } => {
                if let Err(err) = &result {
                    self.log_diagnostic(format!("slot fetch failed: {err}"));
                }
                if !self.bookings.board_mut().apply(ticket, result) {
                    tracing::debug!(seq = ticket.seq, date = %ticket.date, "discarding stale slot response");
                }
            }
            AppEvent::BookingCreated(booking_id) => {
                self.bookings.booking_created();
                self.alerts.push(format!("Booking #{booking_id} created"));
                self.refresh_slots();
            }
            AppEvent::BookingFailed(message) => {
                self.bookings.booking_failed();
                self.alerts.push(message);
            }
            AppEvent::SettingsLoaded(record) => {
                if let Some(merged) = self.settings.loaded(&record) {
                    self.log_diagnostic("applying assistant info received while loading");
                    self.save_info(merged);
                }
            }
            AppEvent::SettingsLoadFailed(message) => {
                self.log_diagnostic(format!("settings load failed: {message}"));
                self.settings.load_failed(message);
            }
            AppEvent::SettingsSaved => {
                self.settings.save_finished();
                self.alerts.push("Settings updated".to_string());
            }
            AppEvent::SettingsSaveFailed(message) => {
                self.settings.save_finished();
                self.alerts.push(message);
            }
            AppEvent::InfoSaveFailed(message) => {
                self.log_diagnostic(format!("assistant info update not saved: {message}"));
            }
            AppEvent::ChatEvent(event) => {
                let effects = self.settings.chat.apply(event);
                self.settings.transcript_changed();
                for effect in effects {
                    self.apply_chat_effect(effect);
                }
            }
            AppEvent::ChatClosed { failure } => {
                if let Some(failure) = &failure {
                    self.log_diagnostic(format!("assistant stream failed: {failure}"));
                }
                self.settings.chat.end_turn(failure);
                self.settings.transcript_changed();
            }
        }
    }

    fn apply_chat_effect(&mut self, effect: ChatEffect) {
        match effect {
            ChatEffect::PinThread(thread_id) => {
                self.log_diagnostic(format!("assistant thread pinned: {thread_id}"));
                self.stored.thread_id = Some(thread_id);
                self.persist();
            }
            ChatEffect::AppendInfo(fragment) => match self.settings.add_info_fragment(&fragment) {
                Some(record) => {
                    self.log_diagnostic("restaurant info updated by assistant");
                    self.save_info(record);
                }
                None => self.log_diagnostic("assistant info queued until settings load"),
            },
        }
    }

    fn save_info(&self, record: RestaurantSettings) {
        if let Some(session) = self.session.as_ref() {
            self.client.save_info(session, self.restaurant_id, record);
        }
    }

    fn handle_action(&mut self, action: PageAction) {
        if let PageAction::Login { username, password } = action {
            self.client.login(username, password);
            return;
        }

        let Some(session) = self.session.clone() else {
            self.log_diagnostic("action ignored, not signed in");
            return;
        };

        match action {
            PageAction::Login { .. } => {}
            PageAction::SelectDate(date) => {
                if self.bookings.select_date(date) {
                    self.refresh_slots();
                }
            }
            PageAction::RefreshSlots => self.refresh_slots(),
            PageAction::CreateBooking(booking) => {
                self.client.create_booking(&session, booking);
            }
            PageAction::SaveSettings(record) => {
                self.client.save_settings(&session, self.restaurant_id, record);
            }
            PageAction::SendChat(request) => self.client.send_chat(&session, request),
        }
    }

    fn render_nav_panel(&mut self, ctx: &egui::Context) {
        let mut target = None;
        let mut logout = false;

        egui::SidePanel::left("navigation")
            .resizable(false)
            .exact_width(200.0)
            .show(ctx, |ui| {
                ui.add_space(self.theme.spacing_12);
                ui.heading("CRM");
                ui.separator();

                for page in Page::NAVIGATION {
                    let button = egui::Button::new(page.title())
                        .selected(self.page == page)
                        .min_size(egui::vec2(ui.available_width(), 32.0));
                    if ui.add(button).clicked() {
                        target = Some(page);
                    }
                }

                ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                    ui.add_space(self.theme.spacing_12);
                    if ui.button("Log out").clicked() {
                        logout = true;
                    }
                });
            });

        if logout {
            self.log_diagnostic("signed out");
            self.end_session(None);
        } else if let Some(page) = target {
            self.navigate(page);
        }
    }

    fn render_diagnostics(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("diagnostics").show(ctx, |ui| {
            egui::CollapsingHeader::new("Diagnostics")
                .default_open(false)
                .show(ui, |ui| {
                    ScrollArea::vertical()
                        .id_salt("diagnostics_log")
                        .max_height(90.0)
                        .stick_to_bottom(true)
                        .show(ui, |ui| {
                            for entry in &self.diagnostics_log {
                                ui.label(RichText::new(entry).small().color(self.theme.text_muted));
                            }
                        });
                });
        });
    }

    fn render_center_panel(&mut self, ctx: &egui::Context) {
        let mut action = None;

        egui::CentralPanel::default().show(ctx, |ui| match self.page {
            Page::Bookings => action = self.bookings.show(ui, &self.theme),
            Page::Settings => action = self.settings.show(ui, &self.theme),
            Page::Dashboard => self.dashboard.show(ui, &self.theme),
            Page::Clients => self.clients.show(ui, &self.theme),
            Page::Finance => finance::show(ui, &self.theme),
        });

        if let Some(action) = action {
            self.handle_action(action);
        }
    }

    fn render_alerts(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alerts.first() else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(self.theme.spacing_8);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.alerts.remove(0);
        }
    }
}

impl eframe::App for HostdeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        if self.session.is_none() {
            if let Some(action) = self.login.show(ctx, &self.theme) {
                self.handle_action(action);
            }
        } else {
            self.render_nav_panel(ctx);
            self.render_diagnostics(ctx);
            self.render_center_panel(ctx);
        }

        self.render_alerts(ctx);
    }
}
