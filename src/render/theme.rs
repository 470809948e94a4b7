//! Colors and shared text styles

use eframe::egui::{self, Color32, RichText, Stroke};

pub const PRIMARY: Color32 = Color32::from_rgb(0, 243, 255);
pub const SECONDARY: Color32 = Color32::from_rgb(188, 19, 254);
pub const BACKGROUND: Color32 = Color32::from_rgb(6, 6, 12);
pub const SURFACE: Color32 = Color32::from_rgb(18, 18, 24);
pub const BORDER: Color32 = Color32::from_rgb(39, 39, 42);
pub const MUTED: Color32 = Color32::from_gray(161);
pub const DIM: Color32 = Color32::from_gray(82);
pub const SUCCESS: Color32 = Color32::from_rgb(74, 222, 128);

/// Install the dark neon visuals
pub fn apply(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = BACKGROUND;
    visuals.window_fill = SURFACE;
    visuals.extreme_bg_color = Color32::BLACK;
    visuals.hyperlink_color = PRIMARY;
    visuals.selection.bg_fill = PRIMARY.gamma_multiply(0.35);
    visuals.selection.stroke = Stroke::new(1.0, PRIMARY);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, BORDER);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, PRIMARY);
    visuals.widgets.active.bg_stroke = Stroke::new(1.5, PRIMARY);
    ctx.set_visuals(visuals);
}

/// `# TITLE` section heading
pub fn section_heading(ui: &mut egui::Ui, title: &str) {
    ui.vertical_centered(|ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new("#").size(40.0).strong().color(SECONDARY));
            ui.label(RichText::new(title).size(40.0).strong().color(Color32::WHITE));
        });
    });
}

/// Sub-heading with a glowing bullet
pub fn bullet_heading(ui: &mut egui::Ui, title: &str, color: Color32) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
        ui.painter().circle_filled(rect.center(), 4.0, color);
        ui.label(RichText::new(title).size(22.0).strong().color(color));
    });
}
