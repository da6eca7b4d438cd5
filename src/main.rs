mod api;
mod app;
mod booking;
mod calendar;
mod chat;
mod config;
mod demo;
mod error;
mod event;
mod pages;
mod phone;
mod session;
mod theme;

use anyhow::{anyhow, Context as _};
use api::http::HttpApi;
use api::CrmClient;
use app::HostdeskApp;
use config::Config;
use eframe::egui;
use event::EventSink;
use session::store::SessionStore;
use std::sync::mpsc;
use theme::Theme;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hostdesk=info")),
        )
        .init();

    let config = Config::load()?;
    tracing::info!(base_url = %config.api.base_url, restaurant_id = config.restaurant.id, "starting hostdesk");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("hostdesk-runtime")
        .build()
        .context("failed to start async runtime")?;

    let api = HttpApi::new(&config.api)?;
    let store = SessionStore::at_default_location();
    let handle = runtime.handle().clone();
    let _runtime = runtime;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Hostdesk")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([1024.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Hostdesk",
        native_options,
        Box::new(move |creation_context| {
            let (tx, rx) = mpsc::channel();
            let sink = EventSink::new(tx, creation_context.egui_ctx.clone());
            let client = CrmClient::new(api, sink, handle);
            client.start(config.bookings.refresh_interval());

            let theme = Theme::default();
            theme.apply_visuals(&creation_context.egui_ctx);

            let today = chrono::Local::now().date_naive();
            Ok(Box::new(HostdeskApp::new(rx, client, &config, store, theme, today)))
        }),
    )
    .map_err(|err| anyhow!("ui failed: {err}"))?;

    Ok(())
}
