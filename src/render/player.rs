//! Floating music player widget
//!
//! Compact layout: cover, title and a play button. Clicking anywhere else on
//! it expands it. Expanded layout: disc, seek bar, transport and volume, and
//! a collapse button as the only way back.

use std::f32::consts::TAU;

use eframe::egui::{self, Align, Align2, Color32, FontId, Layout, RichText, Sense, Stroke};

use crate::audio::PlaybackResource;
use crate::player::{format_time, ClickTarget, Player, Track};

use super::theme::{BORDER, DIM, MUTED, PRIMARY, SECONDARY};

const COMPACT_SIZE: egui::Vec2 = egui::vec2(300.0, 80.0);
const EXPANDED_SIZE: egui::Vec2 = egui::vec2(350.0, 550.0);

/// Seconds per disc revolution while playing
const DISC_PERIOD: f32 = 4.0;

#[derive(Default)]
pub struct PlayerWidget {
    /// Disc rotation in radians, advanced only while playing
    disc_angle: f32,
}

impl PlayerWidget {
    pub fn show<R: PlaybackResource>(&mut self, ctx: &egui::Context, player: &mut Player<R>, track: &Track) {
        let dt = ctx.input(|i| i.stable_dt).min(0.1);
        if player.is_playing() {
            self.disc_angle = (self.disc_angle + TAU * dt / DISC_PERIOD) % TAU;
        }

        let id = egui::Id::new("music_player");
        let target = if player.is_minimized() {
            COMPACT_SIZE
        } else {
            EXPANDED_SIZE
        };
        let size = egui::vec2(
            ctx.animate_value_with_time(id.with("w"), target.x, 0.25),
            ctx.animate_value_with_time(id.with("h"), target.y, 0.25),
        );

        let mut clicks = Vec::new();

        egui::Area::new(id)
            .anchor(Align2::RIGHT_BOTTOM, egui::vec2(-24.0, -24.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                // The body is registered before any nested control so the
                // controls win hit-testing and a click never reaches both.
                let (rect, mut body) = ui.allocate_exact_size(size, Sense::click());
                if player.is_minimized() {
                    body = body.on_hover_cursor(egui::CursorIcon::PointingHand);
                }
                let fill = if player.is_minimized() && body.hovered() {
                    Color32::from_black_alpha(190)
                } else {
                    Color32::from_black_alpha(160)
                };
                ui.painter()
                    .rect(rect, 20.0, fill, Stroke::new(1.0, Color32::from_white_alpha(24)));

                let inner = rect.shrink(16.0);
                let mut content = ui.new_child(
                    egui::UiBuilder::new()
                        .max_rect(inner)
                        .layout(Layout::top_down(Align::Center)),
                );
                content.set_clip_rect(rect);

                if player.is_minimized() {
                    self.compact(&mut content, player, track, &mut clicks);
                } else {
                    self.expanded(&mut content, player, track, &mut clicks);
                }

                if body.clicked() {
                    clicks.push(ClickTarget::Body);
                }
            });

        for target in clicks {
            player.click(target);
        }
    }

    fn compact<R: PlaybackResource>(
        &self,
        ui: &mut egui::Ui,
        player: &Player<R>,
        track: &Track,
        clicks: &mut Vec<ClickTarget>,
    ) {
        ui.horizontal_centered(|ui| {
            let (cover, _) = ui.allocate_exact_size(egui::vec2(48.0, 48.0), Sense::hover());
            ui.painter().rect_filled(cover, 8.0, Color32::from_rgb(24, 24, 27));
            ui.painter().text(
                cover.center(),
                Align2::CENTER_CENTER,
                "♪",
                FontId::proportional(22.0),
                PRIMARY,
            );

            let text_width = ui.available_width() - 48.0;
            ui.allocate_ui(egui::vec2(text_width, 48.0), |ui| {
                ui.vertical(|ui| {
                    ui.add(egui::Label::new(RichText::new(&track.title).strong().color(Color32::WHITE)).truncate());
                    ui.add(egui::Label::new(RichText::new(&track.artist).small().color(MUTED)).truncate());
                });
            });

            if ui.add(round_button(play_glyph(player), 36.0, false)).clicked() {
                clicks.push(ClickTarget::PlayPause);
            }
        });

        // Progress hairline along the bottom edge
        let rect = ui.max_rect();
        let y = rect.bottom() + 10.0;
        let width = rect.width() * player.progress();
        ui.painter().line_segment(
            [egui::pos2(rect.left(), y), egui::pos2(rect.left() + width, y)],
            Stroke::new(2.0, PRIMARY.gamma_multiply(0.7)),
        );
    }

    fn expanded<R: PlaybackResource>(
        &self,
        ui: &mut egui::Ui,
        player: &mut Player<R>,
        track: &Track,
        clicks: &mut Vec<ClickTarget>,
    ) {
        // Header
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new("NOW PLAYING").small().strong().color(PRIMARY));
                ui.label(RichText::new("System Audio").small().color(DIM));
            });
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.add(egui::Button::new("🗕").frame(false)).clicked() {
                    clicks.push(ClickTarget::Collapse);
                }
            });
        });
        ui.add_space(16.0);

        self.disc(ui, player.is_playing(), 200.0)
            .on_hover_text(&track.cover);
        ui.add_space(16.0);

        ui.add(egui::Label::new(RichText::new(&track.title).size(20.0).strong().color(Color32::WHITE)).truncate());
        ui.label(RichText::new(&track.artist).color(PRIMARY));
        ui.add_space(12.0);

        // Seek bar
        let width = ui.available_width();
        ui.spacing_mut().slider_width = width;
        let mut position = player.current_time();
        if ui
            .add(egui::Slider::new(&mut position, 0.0..=player.seek_max()).show_value(false))
            .changed()
        {
            player.seek(position);
        }
        ui.horizontal(|ui| {
            ui.label(RichText::new(format_time(player.current_time())).monospace().small().color(DIM));
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let total = player.duration().unwrap_or(0.0);
                ui.label(RichText::new(format_time(total)).monospace().small().color(DIM));
            });
        });
        ui.add_space(12.0);

        // Transport; single track, so skip controls stay inert
        ui.horizontal(|ui| {
            let spare = (ui.available_width() - (28.0 * 2.0 + 64.0 + 2.0 * 32.0)).max(0.0);
            ui.add_space(spare / 2.0);
            ui.add_enabled(false, egui::Button::new(RichText::new("⏮").size(20.0)).frame(false));
            ui.add_space(32.0);
            if ui.add(round_button(play_glyph(player), 64.0, true)).clicked() {
                clicks.push(ClickTarget::PlayPause);
            }
            ui.add_space(32.0);
            ui.add_enabled(false, egui::Button::new(RichText::new("⏭").size(20.0)).frame(false));
        });
        ui.add_space(12.0);

        // Volume
        ui.horizontal(|ui| {
            ui.label(RichText::new("🔊").color(MUTED));
            ui.spacing_mut().slider_width = ui.available_width() - 8.0;
            let mut volume = player.volume();
            if ui
                .add(egui::Slider::new(&mut volume, 0.0..=1.0).show_value(false))
                .changed()
            {
                player.set_volume(volume);
            }
        });
    }

    /// Spinning disc with tech rings around the centre label
    fn disc(&self, ui: &mut egui::Ui, playing: bool, diameter: f32) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(egui::vec2(diameter, diameter), Sense::hover());
        let painter = ui.painter_at(rect.expand(8.0));
        let center = rect.center();
        let r = diameter / 2.0;

        let ring = if playing { PRIMARY } else { BORDER };
        painter.circle_stroke(center, r + 3.0, Stroke::new(3.0, ring));
        painter.circle_filled(center, r, Color32::from_rgb(12, 12, 14));

        for (inset, color) in [
            (0.08, PRIMARY.gamma_multiply(0.4)),
            (0.16, SECONDARY.gamma_multiply(0.3)),
            (0.20, Color32::from_gray(63)),
            (0.24, PRIMARY.gamma_multiply(if playing { 0.6 } else { 0.3 })),
        ] {
            painter.circle_stroke(center, r * (1.0 - inset), Stroke::new(1.0, color));
        }

        // HUD ticks rotate with the disc
        for i in 0..4 {
            let a = self.disc_angle + i as f32 * TAU / 4.0;
            let dir = egui::vec2(a.cos(), a.sin());
            painter.line_segment(
                [center + dir * r * 0.80, center + dir * r * 0.88],
                Stroke::new(3.0, PRIMARY.gamma_multiply(0.6)),
            );
        }

        // Label
        painter.circle_filled(center, r * 0.6, Color32::from_rgb(20, 20, 26));
        painter.circle_stroke(center, r * 0.6, Stroke::new(2.0, PRIMARY.gamma_multiply(0.5)));
        painter.text(center, Align2::CENTER_CENTER, "♪", FontId::proportional(r * 0.5), PRIMARY);

        response
    }
}

fn play_glyph<R: PlaybackResource>(player: &Player<R>) -> &'static str {
    if player.is_playing() {
        "⏸"
    } else {
        "▶"
    }
}

fn round_button(glyph: &str, diameter: f32, filled: bool) -> egui::Button<'static> {
    let (text_color, fill) = if filled {
        (Color32::BLACK, PRIMARY)
    } else {
        (Color32::WHITE, Color32::from_white_alpha(26))
    };
    egui::Button::new(RichText::new(glyph.to_string()).size(diameter * 0.4).color(text_color))
        .fill(fill)
        .rounding(diameter / 2.0)
        .min_size(egui::vec2(diameter, diameter))
}
