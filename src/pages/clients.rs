use crate::demo;
use crate::theme::Theme;
use eframe::egui::{self, RichText};

#[derive(Debug, Default)]
pub struct ClientsPage {
    query: String,
    open_id: Option<&'static str>,
}

impl ClientsPage {
    pub fn show(&mut self, ui: &mut egui::Ui, theme: &Theme) {
        ui.heading("Clients");

        theme.card_frame().show(ui, |ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.query)
                    .hint_text("Search: name or phone")
                    .desired_width(f32::INFINITY),
            );
        });

        egui::ScrollArea::vertical().id_salt("client_list").show(ui, |ui| {
            for client in demo::filter_clients(demo::CLIENTS, &self.query) {
                let open = self.open_id == Some(client.id);
                theme.card_frame().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.strong(client.name);
                            ui.label(RichText::new(client.phone).color(theme.text_muted));
                        });
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button(if open { "Hide" } else { "Show" }).clicked() {
                                self.open_id = if open { None } else { Some(client.id) };
                            }
                        });
                    });
                    if open {
                        ui.label(client.note);
                    }
                });
            }
        });
    }
}
