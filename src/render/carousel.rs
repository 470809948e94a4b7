//! Skills carousel widget
//!
//! Draws the previous, active and next cards with arrow buttons and dot
//! indicators. All navigation goes through the [`Carousel`] controller.

use std::time::Instant;

use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Stroke, Vec2};

use crate::carousel::{Carousel, Direction, Slot, SlotPosition};

use super::theme::{BORDER, DIM, MUTED, PRIMARY, SECONDARY, SUCCESS, SURFACE};

/// What the user asked for this frame
enum CarouselAction {
    Navigate(Direction),
    Select(usize),
    Open(String),
}

#[derive(Clone)]
pub struct CarouselViewSettings {
    pub card_width: f32,
    pub height: f32,
    /// Scale of the side cards relative to the active one
    pub side_scale: f32,
    /// Seconds for cards to settle into a new position
    pub settle_time: f32,
}

impl Default for CarouselViewSettings {
    fn default() -> Self {
        Self {
            card_width: 230.0,
            height: 420.0,
            side_scale: 0.75,
            settle_time: 0.3,
        }
    }
}

#[derive(Default)]
pub struct CarouselView {
    pub settings: CarouselViewSettings,
}

impl CarouselView {
    pub fn show(&self, ui: &mut egui::Ui, carousel: &mut Carousel, now: Instant) -> egui::Response {
        let size = egui::vec2(ui.available_width(), self.settings.height);
        let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
        carousel.set_hovering(ui.rect_contains_pointer(rect), now);

        if carousel.is_empty() {
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                "NO DATA",
                FontId::monospace(14.0),
                DIM,
            );
            return response;
        }

        let mut actions = Vec::new();
        let card_area = Rect::from_min_max(rect.min, egui::pos2(rect.max.x, rect.max.y - 24.0));

        // Side cards first so the active card paints and hit-tests on top
        let mut slots = carousel.visible();
        slots.sort_by_key(|s| s.position == SlotPosition::Active);
        let count = carousel.len();
        for slot in &slots {
            if let Some(action) = self.card(ui, card_area, slot, count) {
                actions.push(action);
            }
        }
        drop(slots);

        // Arrows
        let arrow_size = egui::vec2(36.0, 36.0);
        let left = Rect::from_center_size(
            egui::pos2(rect.left() + 28.0, card_area.center().y),
            arrow_size,
        );
        let right = Rect::from_center_size(
            egui::pos2(rect.right() - 28.0, card_area.center().y),
            arrow_size,
        );
        if ui.put(left, egui::Button::new("◀")).clicked() {
            actions.push(CarouselAction::Navigate(Direction::Backward));
        }
        if ui.put(right, egui::Button::new("▶")).clicked() {
            actions.push(CarouselAction::Navigate(Direction::Forward));
        }

        // Dot indicators
        let dot_y = rect.bottom() - 10.0;
        let widths: Vec<f32> = (0..count)
            .map(|i| if i == carousel.active() { 32.0 } else { 16.0 })
            .collect();
        let gap = 8.0;
        let total = widths.iter().sum::<f32>() + gap * count.saturating_sub(1) as f32;
        let mut x = rect.center().x - total / 2.0;
        for (i, width) in widths.into_iter().enumerate() {
            let dot = Rect::from_min_size(egui::pos2(x, dot_y - 2.0), egui::vec2(width, 4.0));
            let hit = ui.interact(dot.expand(4.0), ui.id().with(("carousel_dot", i)), Sense::click());
            let color = if i == carousel.active() {
                PRIMARY
            } else if hit.hovered() {
                MUTED
            } else {
                BORDER
            };
            ui.painter().rect_filled(dot, 0.0, color);
            if hit.clicked() {
                actions.push(CarouselAction::Select(i));
            }
            x += width + gap;
        }

        for action in actions {
            match action {
                CarouselAction::Navigate(direction) => carousel.navigate(direction),
                CarouselAction::Select(index) => {
                    carousel.select(index);
                }
                CarouselAction::Open(url) => ui.ctx().open_url(egui::OpenUrl::new_tab(url)),
            }
        }

        response
    }

    fn card(
        &self,
        ui: &mut egui::Ui,
        area: Rect,
        slot: &Slot<'_>,
        count: usize,
    ) -> Option<CarouselAction> {
        let ctx = ui.ctx().clone();
        let is_active = slot.position == SlotPosition::Active;

        // Key animations by item so a card glides between positions; with
        // fewer than three items one item fills several slots.
        let key = if count >= 3 {
            ui.id().with(("carousel_card", slot.index))
        } else {
            ui.id().with(("carousel_card", slot.index, slot.position))
        };
        let settle = self.settings.settle_time;
        let offset = ctx.animate_value_with_time(key.with("x"), slot.position.offset(), settle);
        let scale = ctx.animate_value_with_time(
            key.with("scale"),
            if is_active { 1.0 } else { self.settings.side_scale },
            settle,
        );
        let alpha = ctx.animate_value_with_time(key.with("alpha"), if is_active { 1.0 } else { 0.5 }, settle);

        let spacing = self.settings.card_width * 0.95;
        let center = area.center() + egui::vec2(offset * spacing, 0.0);
        let size = Vec2::new(self.settings.card_width, area.height() * 0.9) * scale;
        let card = Rect::from_center_size(center, size);
        let painter = ui.painter_at(area);

        let (border, accent) = if is_active {
            (PRIMARY, SECONDARY)
        } else {
            (BORDER, Color32::from_gray(63))
        };

        if is_active {
            painter.rect_filled(card.expand(6.0), 0.0, PRIMARY.gamma_multiply(0.08));
        }
        painter.rect(
            card,
            0.0,
            SURFACE.gamma_multiply(alpha.max(0.6)),
            Stroke::new(if is_active { 2.0 } else { 1.0 }, border.gamma_multiply(alpha)),
        );
        corner_markers(&painter, card, 14.0 * scale, border, accent);

        // Icon plate with the item initial
        let plate_side = card.width() - 32.0 * scale;
        let plate = Rect::from_min_size(
            card.min + egui::vec2(16.0 * scale, 16.0 * scale),
            egui::vec2(plate_side, plate_side * 0.8),
        );
        painter.rect(plate, 0.0, Color32::from_black_alpha(140), Stroke::new(1.0, BORDER));
        let initial: String = slot.item.title.chars().take(2).collect();
        painter.text(
            plate.center(),
            Align2::CENTER_CENTER,
            initial.to_uppercase(),
            FontId::monospace(40.0 * scale),
            (if is_active { PRIMARY } else { DIM }).gamma_multiply(alpha),
        );

        // Title and description
        let mut y = plate.bottom() + 14.0 * scale;
        let title = painter.layout(
            slot.item.title.clone(),
            FontId::proportional(20.0 * scale),
            if is_active { PRIMARY } else { MUTED.gamma_multiply(0.6) },
            card.width() - 16.0,
        );
        painter.galley(egui::pos2(card.center().x - title.size().x / 2.0, y), title.clone(), PRIMARY);
        y += title.size().y + 6.0 * scale;

        let description = painter.layout(
            slot.item.description.clone(),
            FontId::monospace(11.0 * scale),
            DIM.gamma_multiply(alpha.max(0.7)),
            card.width() - 24.0,
        );
        painter.galley(
            egui::pos2(card.center().x - description.size().x / 2.0, y),
            description,
            DIM,
        );

        // Status indicator
        let status_y = card.bottom() - 18.0 * scale;
        let (status, status_color) = if is_active {
            ("SELECTED", SUCCESS)
        } else {
            ("IDLE", DIM)
        };
        painter.rect_filled(
            Rect::from_center_size(egui::pos2(card.center().x - 40.0 * scale, status_y), egui::vec2(6.0, 6.0)),
            0.0,
            status_color,
        );
        painter.text(
            egui::pos2(card.center().x - 30.0 * scale, status_y),
            Align2::LEFT_CENTER,
            status,
            FontId::monospace(10.0),
            status_color,
        );

        let response = ui
            .interact(card, key.with("hit"), Sense::click())
            .on_hover_text(&slot.item.image);
        if !response.clicked() {
            return None;
        }
        if !is_active {
            Some(CarouselAction::Select(slot.index))
        } else {
            slot.item.link.clone().map(CarouselAction::Open)
        }
    }
}

/// L-shaped markers in each corner of `rect`
fn corner_markers(painter: &egui::Painter, rect: Rect, len: f32, top: Color32, bottom: Color32) {
    let top_stroke = Stroke::new(2.0, top);
    let bottom_stroke = Stroke::new(2.0, bottom);
    let corners = [
        (rect.left_top(), egui::vec2(1.0, 1.0), top_stroke),
        (rect.right_top(), egui::vec2(-1.0, 1.0), top_stroke),
        (rect.left_bottom(), egui::vec2(1.0, -1.0), bottom_stroke),
        (rect.right_bottom(), egui::vec2(-1.0, -1.0), bottom_stroke),
    ];
    for (corner, dir, stroke) in corners {
        painter.line_segment([corner, corner + egui::vec2(dir.x * len, 0.0)], stroke);
        painter.line_segment([corner, corner + egui::vec2(0.0, dir.y * len)], stroke);
    }
}
