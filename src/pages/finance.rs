use crate::demo::{INVOICES, PAYMENT_CARD, PLAN};
use crate::theme::Theme;
use eframe::egui::{self, RichText};

pub fn show(ui: &mut egui::Ui, theme: &Theme) {
    ui.heading("Billing");

    ui.columns(2, |columns| {
        theme.card_frame().show(&mut columns[0], |ui| {
            ui.set_width(ui.available_width());
            ui.strong("Current plan");
            muted(ui, theme, format!("Plan: {}", PLAN.name));
            muted(ui, theme, format!("Price: {}", PLAN.price));
            muted(ui, theme, format!("Next charge: {}", PLAN.next_charge));
            ui.horizontal(|ui| {
                // Payment actions are not wired to a billing provider.
                ui.add_enabled(false, egui::Button::new("Pay now"));
                ui.add_enabled(false, egui::Button::new("Change plan"));
            });
        });

        theme.card_frame().show(&mut columns[1], |ui| {
            ui.set_width(ui.available_width());
            ui.strong("Payment method");
            muted(ui, theme, format!("Card: {}", PAYMENT_CARD.masked_number));
            muted(ui, theme, format!("Holder: {}", PAYMENT_CARD.holder));
            muted(ui, theme, format!("Valid until: {}", PAYMENT_CARD.expires));
            ui.add_enabled(false, egui::Button::new("Update card"));
        });
    });

    theme.card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.strong("Invoice history");
        egui::Grid::new("invoice_history")
            .num_columns(4)
            .striped(true)
            .spacing([32.0, 8.0])
            .show(ui, |ui| {
                for header in ["Date", "Amount", "Status", "Invoice"] {
                    ui.label(RichText::new(header).color(theme.text_muted));
                }
                ui.end_row();

                for invoice in INVOICES {
                    ui.label(invoice.date);
                    ui.label(invoice.amount);
                    ui.label(invoice.status);
                    ui.add_enabled(false, egui::Link::new("Download PDF"));
                    ui.end_row();
                }
            });
    });
}

fn muted(ui: &mut egui::Ui, theme: &Theme, text: String) {
    ui.label(RichText::new(text).color(theme.text_muted));
}
