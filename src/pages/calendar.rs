use crate::calendar::{iso, MonthView, WEEKDAY_LABELS};
use crate::theme::Theme;
use chrono::NaiveDate;
use eframe::egui::{self, RichText};

const CELL_SIZE: egui::Vec2 = egui::vec2(32.0, 28.0);

/// Month grid with previous/next navigation. Returns the clicked date.
pub fn date_picker(
    ui: &mut egui::Ui,
    id_salt: &str,
    view: &mut MonthView,
    selected: NaiveDate,
    today: NaiveDate,
    theme: &Theme,
) -> Option<NaiveDate> {
    let selected_iso = iso(selected);
    let today_iso = iso(today);
    let mut picked = None;

    theme.card_frame().show(ui, |ui| {
        ui.horizontal(|ui| {
            if ui.small_button("<").clicked() {
                view.previous();
            }
            ui.strong(view.label());
            if ui.small_button(">").clicked() {
                view.next();
            }
        });

        egui::Grid::new(("date_picker", id_salt))
            .num_columns(7)
            .spacing([4.0, 4.0])
            .show(ui, |ui| {
                for label in WEEKDAY_LABELS {
                    ui.label(RichText::new(label).small().color(theme.text_muted));
                }
                ui.end_row();

                for (index, cell) in view.cells().iter().enumerate() {
                    match (cell.date, cell.iso()) {
                        (Some(date), Some(cell_iso)) => {
                            let mut text = RichText::new(date.format("%-d").to_string());
                            if cell_iso == today_iso {
                                text = text.strong().color(theme.accent);
                            }
                            let button = egui::Button::new(text)
                                .selected(cell_iso == selected_iso)
                                .min_size(CELL_SIZE);
                            if ui.add(button).clicked() {
                                picked = Some(date);
                            }
                        }
                        _ => {
                            let _ = ui.allocate_exact_size(CELL_SIZE, egui::Sense::hover());
                        }
                    }
                    if index % 7 == 6 {
                        ui.end_row();
                    }
                }
            });
    });

    picked
}
