use crate::demo::{self, Recording, Speaker};
use crate::theme::Theme;
use eframe::egui::{self, RichText};
use std::collections::HashMap;
use std::time::{Duration, Instant};

const PLAYBACK_LENGTH: Duration = Duration::from_secs(60);

#[derive(Debug, Default)]
struct CardState {
    open: bool,
    playing_since: Option<Instant>,
    position: f32,
}

impl CardState {
    /// Simulated playback position in `0.0..=1.0`. Playback stops itself at
    /// the end and keeps the bar full.
    fn progress(&mut self, now: Instant) -> f32 {
        if let Some(started) = self.playing_since {
            let elapsed = now.duration_since(started).as_secs_f32();
            self.position = (elapsed / PLAYBACK_LENGTH.as_secs_f32()).min(1.0);
            if self.position >= 1.0 {
                self.playing_since = None;
            }
        }
        self.position
    }

    /// Pausing rewinds to the start.
    fn toggle_playback(&mut self, now: Instant) {
        self.position = 0.0;
        self.playing_since = match self.playing_since {
            Some(_) => None,
            None => Some(now),
        };
    }
}

#[derive(Debug, Default)]
pub struct DashboardPage {
    query: String,
    cards: HashMap<&'static str, CardState>,
}

impl DashboardPage {
    pub fn show(&mut self, ui: &mut egui::Ui, theme: &Theme) {
        ui.heading("Dashboard");

        ui.columns(demo::STATS.len(), |columns| {
            for (column, stat) in columns.iter_mut().zip(demo::STATS) {
                theme.card_frame().show(column, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(stat.title).color(theme.text_muted));
                    ui.label(RichText::new(stat.value).size(24.0).strong());
                    if let Some(sublabel) = stat.sublabel {
                        ui.label(RichText::new(sublabel).small().color(theme.text_muted));
                    }
                    ui.add(
                        egui::ProgressBar::new(f32::from(stat.percent) / 100.0)
                            .text(format!("{}%", stat.percent)),
                    );
                });
            }
        });

        theme.card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.strong("Call recordings");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.query)
                            .hint_text("Search: name or phone")
                            .desired_width(280.0),
                    );
                });
            });
        });

        let now = Instant::now();
        let mut any_playing = false;
        egui::ScrollArea::vertical().id_salt("recordings").show(ui, |ui| {
            for recording in demo::filter_recordings(demo::RECORDINGS, &self.query) {
                let card = self.cards.entry(recording.id).or_default();
                show_recording(ui, theme, recording, card, now);
                any_playing |= card.playing_since.is_some();
            }
        });

        if any_playing {
            ui.ctx().request_repaint_after(Duration::from_millis(200));
        }
    }
}

fn show_recording(ui: &mut egui::Ui, theme: &Theme, rec: &Recording, card: &mut CardState, now: Instant) {
    theme.card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            let play_label = if card.playing_since.is_some() { "Pause" } else { "Play" };
            if ui.button(play_label).clicked() {
                card.toggle_playback(now);
            }
            let progress = card.progress(now);
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.strong(rec.title);
                    ui.label(RichText::new(rec.duration).color(theme.text_muted));
                });
                ui.add(egui::ProgressBar::new(progress).desired_width(ui.available_width() - 60.0));
            });
            let toggle = if card.open { "Hide" } else { "Show" };
            if ui.button(toggle).clicked() {
                card.open = !card.open;
            }
        });

        if card.open {
            let caller = [rec.caller_name, rec.phone]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" | ");
            if !caller.is_empty() {
                ui.label(RichText::new(caller).color(theme.text_muted));
            }
            for line in rec.transcript {
                let from_agent = line.speaker == Speaker::Agent;
                theme.bubble_frame(from_agent).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    let who = if from_agent { "Agent" } else { "Caller" };
                    ui.label(RichText::new(who).small().color(theme.text_muted));
                    ui.label(line.text);
                });
            }
        }
    });
}
