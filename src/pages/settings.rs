use crate::api::models::RestaurantSettings;
use crate::chat::trigger::append_info;
use crate::chat::{ChatState, Role};
use crate::pages::PageAction;
use crate::theme::Theme;
use eframe::egui::{self, RichText, ScrollArea};

/// Editable copy of the restaurant settings. Empty fields mean "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsForm {
    pub host_choice: String,
    pub greeting_text: String,
    pub info_text: String,
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl SettingsForm {
    pub fn from_record(record: &RestaurantSettings) -> Self {
        Self {
            host_choice: record.host_choice.clone().unwrap_or_default(),
            greeting_text: record.greeting_text.clone().unwrap_or_default(),
            info_text: record.info_text.clone().unwrap_or_default(),
        }
    }

    pub fn to_record(&self) -> RestaurantSettings {
        RestaurantSettings {
            host_choice: non_empty(&self.host_choice),
            greeting_text: non_empty(&self.greeting_text),
            info_text: non_empty(&self.info_text),
        }
    }
}

pub struct SettingsPage {
    hostess_options: Vec<String>,
    assistant_id: Option<String>,
    pub form: SettingsForm,
    pub chat: ChatState,
    loading: bool,
    /// Set once the form mirrors the server record.
    synced: bool,
    /// Assistant info fragments received before the record was loaded.
    pending_info: Vec<String>,
    saving: bool,
    error: Option<String>,
    input: String,
    scroll_to_bottom: bool,
}

impl SettingsPage {
    pub fn new(hostess_options: Vec<String>, assistant_id: Option<String>, thread_id: Option<String>) -> Self {
        Self {
            hostess_options,
            assistant_id,
            form: SettingsForm::default(),
            chat: ChatState::new(thread_id),
            loading: false,
            synced: false,
            pending_info: Vec::new(),
            saving: false,
            error: None,
            input: String::new(),
            scroll_to_bottom: false,
        }
    }

    pub fn begin_loading(&mut self) {
        self.loading = true;
        self.synced = false;
        self.error = None;
    }

    /// Replaces the form with the server record. Fragments queued while the
    /// record was loading are appended, and the merged record is returned so
    /// it can be saved.
    pub fn loaded(&mut self, record: &RestaurantSettings) -> Option<RestaurantSettings> {
        self.loading = false;
        self.synced = true;
        self.form = SettingsForm::from_record(record);
        if self.pending_info.is_empty() {
            return None;
        }
        for fragment in std::mem::take(&mut self.pending_info) {
            self.form.info_text = append_info(&self.form.info_text, &fragment);
        }
        Some(self.form.to_record())
    }

    /// Appends an assistant info fragment. Returns the record to save, or
    /// `None` when the form is not loaded yet and the fragment was queued.
    pub fn add_info_fragment(&mut self, fragment: &str) -> Option<RestaurantSettings> {
        if !self.synced {
            self.pending_info.push(fragment.to_string());
            return None;
        }
        self.form.info_text = append_info(&self.form.info_text, fragment);
        Some(self.form.to_record())
    }

    pub fn load_failed(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    pub fn save_finished(&mut self) {
        self.saving = false;
    }

    pub fn transcript_changed(&mut self) {
        self.scroll_to_bottom = true;
    }

    pub fn show(&mut self, ui: &mut egui::Ui, theme: &Theme) -> Option<PageAction> {
        let mut action = None;
        let half = (ui.available_width() - theme.spacing_16) / 2.0;

        ui.horizontal_top(|ui| {
            ui.vertical(|ui| {
                ui.set_width(half);
                if let Some(chat) = self.show_chat(ui, theme) {
                    action = Some(chat);
                }
            });
            ui.vertical(|ui| {
                ui.set_width(half);
                if let Some(save) = self.show_form(ui, theme) {
                    action = Some(save);
                }
            });
        });

        action
    }

    fn show_chat(&mut self, ui: &mut egui::Ui, theme: &Theme) -> Option<PageAction> {
        let mut action = None;

        theme.card_frame().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Chat");
                if let Some(thread_id) = self.chat.thread_id() {
                    ui.label(
                        RichText::new(format!("thread {thread_id}"))
                            .small()
                            .color(theme.text_muted),
                    );
                }
            });
            ui.separator();

            let transcript_height = (ui.available_height() - 80.0).max(200.0);
            ScrollArea::vertical()
                .id_salt("assistant_transcript")
                .max_height(transcript_height)
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    if self.chat.messages().is_empty() {
                        ui.label(
                            RichText::new("Ask the assistant a question.").color(theme.text_muted),
                        );
                    }
                    for message in self.chat.messages() {
                        let from_user = message.role == Role::User;
                        theme.bubble_frame(from_user).show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            let who = if from_user { "You" } else { "Assistant" };
                            ui.label(RichText::new(who).small().color(theme.text_muted));
                            ui.label(&message.content);
                        });
                    }
                    if self.scroll_to_bottom {
                        ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                    }
                });
            self.scroll_to_bottom = false;

            ui.separator();
            let streaming = self.chat.is_streaming();
            let hint = match (&self.assistant_id, streaming) {
                (None, _) => "Assistant is not configured",
                (Some(_), true) => "Waiting for response...",
                (Some(_), false) => "Type a message",
            };
            let input_enabled = self.assistant_id.is_some() && !streaming;

            let mut send_now = false;
            ui.horizontal(|ui| {
                let response = ui.add_enabled(
                    input_enabled,
                    egui::TextEdit::singleline(&mut self.input)
                        .desired_width(ui.available_width() - 80.0)
                        .hint_text(hint),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    send_now = true;
                }
                let label = if streaming { "Sending..." } else { "Send" };
                send_now |= ui
                    .add_enabled(input_enabled, egui::Button::new(label))
                    .clicked();
            });

            if send_now && input_enabled {
                if let Some(assistant_id) = self.assistant_id.as_deref() {
                    if let Some(request) = self.chat.begin_turn(&self.input, assistant_id) {
                        self.input.clear();
                        self.scroll_to_bottom = true;
                        action = Some(PageAction::SendChat(request));
                    }
                }
            }
        });

        action
    }

    fn show_form(&mut self, ui: &mut egui::Ui, theme: &Theme) -> Option<PageAction> {
        let mut action = None;

        theme.card_frame().show(ui, |ui| {
            ui.heading("Restaurant settings");
            ui.separator();

            if self.loading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading...");
                });
                return;
            }

            ui.strong("Hostess");
            let selected = if self.form.host_choice.is_empty() {
                "Not selected".to_string()
            } else {
                self.form.host_choice.clone()
            };
            egui::ComboBox::from_id_salt("host_choice")
                .selected_text(selected)
                .width(ui.available_width())
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.form.host_choice, String::new(), "Not selected");
                    for name in &self.hostess_options {
                        ui.selectable_value(&mut self.form.host_choice, name.clone(), name.as_str());
                    }
                });

            ui.strong("Greeting");
            ui.add(
                egui::TextEdit::multiline(&mut self.form.greeting_text)
                    .desired_rows(4)
                    .desired_width(f32::INFINITY),
            );

            ui.strong("General restaurant information");
            ui.add(
                egui::TextEdit::multiline(&mut self.form.info_text)
                    .desired_rows(6)
                    .desired_width(f32::INFINITY),
            );

            if let Some(error) = &self.error {
                ui.label(RichText::new(error).color(theme.danger));
            }

            let label = if self.saving { "Updating..." } else { "Update" };
            // An unloaded form would overwrite the stored fields with blanks.
            let can_save = self.synced && !self.saving;
            if ui.add_enabled(can_save, egui::Button::new(label)).clicked() {
                self.saving = true;
                action = Some(PageAction::SaveSettings(self.form.to_record()));
            }
        });

        action
    }
}

#[cfg(test)]
mod tests {
    use super::{SettingsForm, SettingsPage};
    use crate::api::models::RestaurantSettings;

    fn page() -> SettingsPage {
        SettingsPage::new(vec!["Anna".to_string()], Some("asst".to_string()), None)
    }

    fn stored() -> RestaurantSettings {
        RestaurantSettings {
            host_choice: Some("Anna".to_string()),
            greeting_text: Some("Welcome!".to_string()),
            info_text: Some("Open daily".to_string()),
        }
    }

    #[test]
    fn empty_fields_are_sent_as_null() {
        let form = SettingsForm {
            host_choice: String::new(),
            greeting_text: "Welcome!".to_string(),
            info_text: String::new(),
        };
        assert_eq!(
            form.to_record(),
            RestaurantSettings {
                host_choice: None,
                greeting_text: Some("Welcome!".to_string()),
                info_text: None,
            }
        );
    }

    #[test]
    fn missing_record_fields_become_empty_text() {
        let form = SettingsForm::from_record(&RestaurantSettings {
            host_choice: Some("Anna".to_string()),
            ..RestaurantSettings::default()
        });
        assert_eq!(form.host_choice, "Anna");
        assert!(form.greeting_text.is_empty());
        assert!(form.info_text.is_empty());
    }

    #[test]
    fn fragment_before_load_is_queued_not_saved() {
        let mut page = page();
        page.begin_loading();
        assert!(page.add_info_fragment("Terrace open").is_none());
        assert!(page.form.info_text.is_empty());

        let merged = page.loaded(&stored()).expect("queued fragment should be saved");
        assert_eq!(merged.host_choice.as_deref(), Some("Anna"));
        assert_eq!(merged.greeting_text.as_deref(), Some("Welcome!"));
        assert_eq!(merged.info_text.as_deref(), Some("Open daily\nTerrace open"));
        assert_eq!(page.form.info_text, "Open daily\nTerrace open");
    }

    #[test]
    fn fragment_after_load_keeps_other_fields() {
        let mut page = page();
        page.begin_loading();
        assert!(page.loaded(&stored()).is_none());

        let record = page.add_info_fragment("parking available").expect("form is loaded");
        assert_eq!(record.greeting_text.as_deref(), Some("Welcome!"));
        assert_eq!(record.info_text.as_deref(), Some("Open daily\nparking available"));
    }

    #[test]
    fn failed_load_keeps_fragment_for_the_next_load() {
        let mut page = page();
        page.begin_loading();
        page.load_failed("Could not load settings".to_string());
        assert!(page.add_info_fragment("Live music on Fridays").is_none());

        page.begin_loading();
        let merged = page.loaded(&stored()).expect("queued fragment should be saved");
        assert_eq!(merged.info_text.as_deref(), Some("Open daily\nLive music on Fridays"));
    }

    #[test]
    fn reload_does_not_drop_a_fragment_applied_meanwhile() {
        let mut page = page();
        page.begin_loading();
        page.loaded(&stored());

        page.begin_loading();
        assert!(page.add_info_fragment("Terrace open").is_none());
        let merged = page.loaded(&stored()).expect("queued fragment should be saved");
        assert_eq!(merged.info_text.as_deref(), Some("Open daily\nTerrace open"));
    }
}
