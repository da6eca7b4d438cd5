use crate::pages::PageAction;
use crate::theme::Theme;
use eframe::egui::{self, RichText};

#[derive(Debug, Default)]
pub struct LoginPage {
    username: String,
    password: String,
    error: Option<String>,
    pending: bool,
}

impl LoginPage {
    pub fn new(default_username: Option<&str>) -> Self {
        Self {
            username: default_username.unwrap_or_default().to_string(),
            ..Self::default()
        }
    }

    pub fn failed(&mut self, message: String) {
        self.pending = false;
        self.error = Some(message);
    }

    /// Clears the form after a successful login or before showing it again.
    pub fn reset(&mut self) {
        self.password.clear();
        self.error = None;
        self.pending = false;
    }

    pub fn show(&mut self, ctx: &egui::Context, theme: &Theme) -> Option<PageAction> {
        let mut action = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.2);
                ui.set_max_width(360.0);

                theme.card_frame().show(ui, |ui| {
                    ui.heading("Sign in to CRM");
                    ui.add_space(theme.spacing_12);

                    ui.label("Username");
                    ui.add(egui::TextEdit::singleline(&mut self.username).desired_width(f32::INFINITY));
                    ui.label("Password");
                    let password = ui.add(
                        egui::TextEdit::singleline(&mut self.password)
                            .password(true)
                            .desired_width(f32::INFINITY),
                    );

                    if let Some(error) = &self.error {
                        ui.label(RichText::new(error).color(theme.danger));
                    }

                    let submit_on_enter =
                        password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    let clicked = ui
                        .add_enabled(
                            !self.pending,
                            egui::Button::new("Sign in").min_size(egui::vec2(ui.available_width(), 32.0)),
                        )
                        .clicked();

                    if (clicked || submit_on_enter) && !self.pending {
                        self.pending = true;
                        self.error = None;
                        action = Some(PageAction::Login {
                            username: self.username.clone(),
                            password: self.password.clone(),
                        });
                    }
                });
            });
        });

        action
    }
}
