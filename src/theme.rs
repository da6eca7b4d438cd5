use eframe::egui::{self, Color32, CornerRadius, FontId, Frame, Margin, Stroke, TextStyle};

/// Light admin palette shared by every page.
#[derive(Debug, Clone)]
pub struct Theme {
    pub page_fill: Color32,
    pub card_fill: Color32,
    pub field_fill: Color32,
    pub accent: Color32,
    pub accent_soft: Color32,
    pub danger: Color32,
    pub busy_fill: Color32,
    pub busy_border: Color32,
    pub text: Color32,
    pub text_muted: Color32,
    pub border: Color32,
    pub spacing_8: f32,
    pub spacing_12: f32,
    pub spacing_16: f32,
    pub card_radius: u8,
    pub bubble_radius: u8,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            page_fill: Color32::from_rgb(0xF9, 0xFA, 0xFB),
            card_fill: Color32::WHITE,
            field_fill: Color32::from_rgb(0xF3, 0xF4, 0xF6),
            accent: Color32::from_rgb(0x37, 0x41, 0x51),
            accent_soft: Color32::from_rgb(0xD1, 0xD5, 0xDB),
            danger: Color32::from_rgb(0xDC, 0x26, 0x26),
            busy_fill: Color32::from_rgb(0xFE, 0xF2, 0xF2),
            busy_border: Color32::from_rgb(0xFC, 0xA5, 0xA5),
            text: Color32::from_rgb(0x11, 0x18, 0x27),
            text_muted: Color32::from_rgb(0x6B, 0x72, 0x80),
            border: Color32::from_rgb(0xE5, 0xE7, 0xEB),
            spacing_8: 8.0,
            spacing_12: 12.0,
            spacing_16: 16.0,
            card_radius: Self::CARD_RADIUS,
            bubble_radius: Self::BUBBLE_RADIUS,
        }
    }
}

impl Theme {
    pub const CARD_RADIUS: u8 = 12;
    pub const BUBBLE_RADIUS: u8 = 8;

    pub fn apply_visuals(&self, ctx: &egui::Context) {
        let mut visuals = egui::Visuals::light();
        visuals.panel_fill = self.page_fill;
        visuals.override_text_color = Some(self.text);
        visuals.widgets.noninteractive.bg_fill = self.card_fill;
        visuals.widgets.noninteractive.weak_bg_fill = self.card_fill;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border);
        visuals.widgets.inactive.bg_fill = self.field_fill;
        visuals.widgets.inactive.weak_bg_fill = self.field_fill;
        visuals.widgets.hovered.bg_fill = self.accent_soft;
        visuals.widgets.hovered.weak_bg_fill = self.accent_soft;
        visuals.widgets.active.bg_fill = self.accent;
        visuals.widgets.active.fg_stroke.color = Color32::WHITE;
        visuals.selection.bg_fill = self.accent_soft;
        visuals.selection.stroke = Stroke::new(1.0, self.accent);
        visuals.hyperlink_color = self.accent;
        visuals.window_fill = self.card_fill;
        visuals.window_stroke = Stroke::new(1.0, self.border);
        visuals.window_corner_radius = CornerRadius::same(self.card_radius);

        let mut style = (*ctx.style()).clone();
        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(8.0, 8.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
        style.text_styles.insert(TextStyle::Heading, FontId::proportional(20.0));
        style.text_styles.insert(TextStyle::Body, FontId::proportional(14.0));
        style.text_styles.insert(TextStyle::Button, FontId::proportional(14.0));
        style.text_styles.insert(TextStyle::Small, FontId::proportional(12.0));
        ctx.set_style(style);
    }

    pub fn card_frame(&self) -> Frame {
        Frame::new()
            .fill(self.card_fill)
            .inner_margin(Margin::same(self.spacing_16 as i8))
            .corner_radius(CornerRadius::same(self.card_radius))
            .stroke(Stroke::new(1.0, self.border))
    }

    /// Slot card once bookings reach the busy threshold.
    pub fn busy_frame(&self) -> Frame {
        self.card_frame()
            .fill(self.busy_fill)
            .stroke(Stroke::new(1.0, self.busy_border))
    }

    pub fn bubble_frame(&self, from_user: bool) -> Frame {
        let fill = if from_user { self.field_fill } else { self.card_fill };
        Frame::new()
            .fill(fill)
            .inner_margin(Margin::same(self.spacing_12 as i8))
            .corner_radius(CornerRadius::same(self.bubble_radius))
            .stroke(Stroke::new(1.0, self.border))
    }
}
