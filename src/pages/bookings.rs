use crate::booking::{can_book, is_busy, BookingDraft, RefreshTicket, SlotBoard};
use crate::calendar::{iso, MonthView};
use crate::config::BookingsConfig;
use crate::pages::calendar::date_picker;
use crate::pages::PageAction;
use crate::theme::Theme;
use chrono::NaiveDate;
use eframe::egui::{self, RichText, ScrollArea};

pub struct BookingsPage {
    restaurant_id: i64,
    busy_threshold: u32,
    tag_options: Vec<String>,
    today: NaiveDate,
    board: SlotBoard,
    view: MonthView,
    draft: Option<BookingDraft>,
    draft_view: MonthView,
    submitting: bool,
}

impl BookingsPage {
    pub fn new(restaurant_id: i64, config: &BookingsConfig, today: NaiveDate) -> Self {
        Self {
            restaurant_id,
            busy_threshold: config.busy_threshold,
            tag_options: config.tag_options.clone(),
            today,
            board: SlotBoard::new(today),
            view: MonthView::containing(today),
            draft: None,
            draft_view: MonthView::containing(today),
            submitting: false,
        }
    }

    pub fn board_mut(&mut self) -> &mut SlotBoard {
        &mut self.board
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.board.begin_refresh()
    }

    /// Returns true when the slots need refetching.
    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        if let Some(draft) = self.draft.as_mut() {
            draft.date = date;
        }
        self.board.select_date(date)
    }

    pub fn booking_created(&mut self) {
        self.submitting = false;
        self.draft = None;
    }

    pub fn booking_failed(&mut self) {
        self.submitting = false;
    }

    /// Forgets an in-flight submission without touching the open form.
    pub fn reset_pending(&mut self) {
        self.submitting = false;
    }

    /// A new form may only open once the previous submission has settled.
    fn open_draft(&mut self, time: &str) -> bool {
        if self.submitting {
            return false;
        }
        let date = self.board.date();
        self.draft = Some(BookingDraft::for_slot(date, time));
        self.draft_view = MonthView::containing(date);
        true
    }

    pub fn show(&mut self, ui: &mut egui::Ui, theme: &Theme) -> Option<PageAction> {
        let mut action = None;

        ui.horizontal_top(|ui| {
            ui.vertical(|ui| {
                ui.set_width(280.0);
                ui.strong("Pick a date");
                if let Some(date) = date_picker(
                    ui,
                    "bookings",
                    &mut self.view,
                    self.board.date(),
                    self.today,
                    theme,
                ) {
                    action = Some(PageAction::SelectDate(date));
                }
            });

            ui.vertical(|ui| {
                theme.card_frame().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.strong(format!("Slots for {}", iso(self.board.date())));
                        if self.board.is_loading() {
                            ui.spinner();
                        }
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Refresh").clicked() {
                                action = Some(PageAction::RefreshSlots);
                            }
                        });
                    });
                    ui.separator();

                    if let Some(time) = self.show_slots(ui, theme) {
                        self.open_draft(&time);
                    }
                });
            });
        });

        if let Some(booking) = self.show_draft_window(ui.ctx(), theme) {
            action = Some(booking);
        }

        action
    }

    fn show_slots(&self, ui: &mut egui::Ui, theme: &Theme) -> Option<String> {
        if let Some(error) = self.board.error() {
            ui.label(RichText::new(error).color(theme.danger));
            return None;
        }
        if self.board.slots().is_empty() {
            let text = if self.board.is_loading() { "Loading..." } else { "No slots for this date" };
            ui.label(RichText::new(text).color(theme.text_muted));
            return None;
        }

        let mut clicked = None;
        ScrollArea::vertical().id_salt("slot_list").show(ui, |ui| {
            for slot in self.board.slots() {
                let frame = if is_busy(slot, self.busy_threshold) {
                    theme.busy_frame()
                } else {
                    theme.card_frame()
                };
                frame.show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.label(RichText::new(&slot.time).size(18.0).strong());
                            ui.label(
                                RichText::new(format!("Booked: {} | Free: {}", slot.booked, slot.free))
                                    .color(theme.text_muted),
                            );
                        });
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let enabled = can_book(slot) && !self.submitting;
                            if ui.add_enabled(enabled, egui::Button::new("Add")).clicked() {
                                clicked = Some(slot.time.clone());
                            }
                        });
                    });
                });
            }
        });
        clicked
    }

    fn show_draft_window(&mut self, ctx: &egui::Context, theme: &Theme) -> Option<PageAction> {
        let mut draft = self.draft.take()?;
        let mut open = true;
        let mut cancel = false;
        let mut action = None;

        egui::Window::new("New booking")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.horizontal_top(|ui| {
                    ui.vertical(|ui| {
                        ui.label("Date");
                        if let Some(date) = date_picker(
                            ui,
                            "booking_draft",
                            &mut self.draft_view,
                            draft.date,
                            self.today,
                            theme,
                        ) {
                            action = Some(PageAction::SelectDate(date));
                        }
                    });
                    ui.vertical(|ui| {
                        ui.label("Time (from / to)");
                        ui.horizontal(|ui| {
                            let mut start = draft.start_time.clone();
                            if ui
                                .add(egui::TextEdit::singleline(&mut start).hint_text("HH:MM").desired_width(70.0))
                                .changed()
                            {
                                draft.set_start_time(&start);
                            }
                            ui.add(
                                egui::TextEdit::singleline(&mut draft.end_time)
                                    .hint_text("HH:MM")
                                    .desired_width(70.0),
                            );
                        });

                        ui.label("Phone");
                        let mut phone = draft.phone.clone();
                        if ui
                            .add(egui::TextEdit::singleline(&mut phone).hint_text("+7 (___) ___-__-__"))
                            .changed()
                        {
                            draft.set_phone_input(&phone);
                        }

                        ui.label("Booking name*");
                        ui.add(egui::TextEdit::singleline(&mut draft.client_name).hint_text("Ivan Ivanov"));

                        ui.label("Guests");
                        ui.add(
                            egui::TextEdit::singleline(&mut draft.guest_count)
                                .hint_text("4")
                                .desired_width(70.0),
                        );

                        ui.label("Deposit");
                        ui.horizontal(|ui| {
                            ui.radio_value(&mut draft.deposit, false, "No deposit");
                            ui.radio_value(&mut draft.deposit, true, "With deposit");
                        });
                    });
                });

                ui.label("Comment");
                ui.add(
                    egui::TextEdit::multiline(&mut draft.comment)
                        .desired_rows(3)
                        .desired_width(f32::INFINITY),
                );

                ui.label("Tags");
                ui.horizontal_wrapped(|ui| {
                    for tag in &self.tag_options {
                        let mut selected = draft.has_tag(tag);
                        if ui.checkbox(&mut selected, tag.as_str()).changed() {
                            draft.set_tag(tag, selected);
                        }
                    }
                });

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                    let enabled = draft.can_submit() && !self.submitting;
                    if ui.add_enabled(enabled, egui::Button::new("Add")).clicked() {
                        if let Some(request) = draft.to_request(self.restaurant_id) {
                            self.submitting = true;
                            action = Some(PageAction::CreateBooking(request));
                        }
                    }
                    if self.submitting {
                        ui.spinner();
                    }
                });
            });

        if open && !cancel {
            self.draft = Some(draft);
        }
        action
    }
}

#[cfg(test)]
mod tests {
    use super::BookingsPage;
    use crate::config::BookingsConfig;
    use chrono::NaiveDate;

    fn page() -> BookingsPage {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid test date");
        BookingsPage::new(1, &BookingsConfig::default(), today)
    }

    #[test]
    fn slot_form_cannot_be_replaced_while_a_booking_is_in_flight() {
        let mut page = page();
        assert!(page.open_draft("19:00"));
        page.submitting = true;

        assert!(!page.open_draft("20:00"));
        assert!(page.submitting);
        let draft = page.draft.as_ref().expect("form stays open");
        assert_eq!(draft.time_slot, "19:00");
    }

    #[test]
    fn reset_pending_keeps_the_open_form() {
        let mut page = page();
        page.open_draft("19:00");
        page.submitting = true;

        page.reset_pending();
        assert!(!page.submitting);
        assert!(page.draft.is_some());
        assert!(page.open_draft("20:00"));
    }

    #[test]
    fn created_booking_closes_the_form() {
        let mut page = page();
        page.open_draft("19:00");
        page.submitting = true;

        page.booking_created();
        assert!(page.draft.is_none());
        assert!(!page.submitting);
    }
}
