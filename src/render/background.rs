//! Animated parallax backdrop
//!
//! Two layers drift with the page scroll at different rates: a faint grid at
//! 10% and floating shapes at 30%. Scanlines sit on top.

use std::f32::consts::TAU;

use eframe::egui::{self, Color32, Painter, Pos2, Rect, Shape, Stroke};

use super::theme::{PRIMARY, SECONDARY};

/// A floating shape, positioned in fractions of the viewport
struct Hexagon {
    anchor: (f32, f32),
    radius: f32,
    color: Color32,
    /// Seconds per revolution; negative spins the other way
    period: f32,
}

#[derive(Clone)]
pub struct BackgroundSettings {
    pub grid_spacing: f32,
    pub grid_rate: f32,
    pub shape_rate: f32,
    pub scanline_spacing: f32,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            grid_spacing: 50.0,
            grid_rate: 0.1,
            shape_rate: 0.3,
            scanline_spacing: 4.0,
        }
    }
}

pub struct Background {
    pub settings: BackgroundSettings,
    hexagons: Vec<Hexagon>,
}

impl Default for Background {
    fn default() -> Self {
        Self::new()
    }
}

impl Background {
    pub fn new() -> Self {
        Self {
            settings: BackgroundSettings::default(),
            hexagons: vec![
                Hexagon {
                    anchor: (0.05, 0.10),
                    radius: 100.0,
                    color: PRIMARY.gamma_multiply(0.12),
                    period: 60.0,
                },
                Hexagon {
                    anchor: (0.85, 0.40),
                    radius: 150.0,
                    color: SECONDARY.gamma_multiply(0.10),
                    period: -90.0,
                },
                Hexagon {
                    anchor: (0.90, 0.15),
                    radius: 60.0,
                    color: PRIMARY.gamma_multiply(0.30),
                    period: 0.0,
                },
            ],
        }
    }

    /// Paint the backdrop into `rect` for time `t` (seconds) and the current
    /// scroll offset.
    pub fn paint(&self, painter: &Painter, rect: Rect, t: f32, scroll: f32) {
        self.paint_grid(painter, rect, scroll);
        self.paint_shapes(painter, rect, t, scroll);
        self.paint_scanlines(painter, rect);
    }

    fn paint_grid(&self, painter: &Painter, rect: Rect, scroll: f32) {
        let spacing = self.settings.grid_spacing;
        let stroke = Stroke::new(1.0, PRIMARY.gamma_multiply(0.04));
        let offset = layer_offset(scroll, self.settings.grid_rate, spacing);

        let mut x = rect.left();
        while x <= rect.right() {
            painter.line_segment([egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())], stroke);
            x += spacing;
        }
        let mut y = rect.top() - offset;
        while y <= rect.bottom() {
            if y >= rect.top() {
                painter.line_segment([egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)], stroke);
            }
            y += spacing;
        }
    }

    fn paint_shapes(&self, painter: &Painter, rect: Rect, t: f32, scroll: f32) {
        let lift = scroll * self.settings.shape_rate;

        for hex in &self.hexagons {
            let center = egui::pos2(
                rect.left() + hex.anchor.0 * rect.width(),
                rect.top() + hex.anchor.1 * rect.height() - lift,
            );
            let angle = if hex.period == 0.0 {
                0.0
            } else {
                TAU * t / hex.period
            };
            let points = hexagon_points(center, hex.radius, angle);
            painter.add(Shape::closed_line(points, Stroke::new(1.0, hex.color)));
        }

        // Pulsing dots
        let dots = [
            ((0.75, 0.25), 3.0, PRIMARY, 0.0),
            ((0.20, 0.55), 4.0, SECONDARY, 1.0),
            ((0.65, 0.75), 2.0, PRIMARY, 0.5),
        ];
        for ((fx, fy), radius, color, delay) in dots {
            let pulse = 0.5 + 0.5 * (TAU * (t - delay) / 2.0).sin();
            let center = egui::pos2(
                rect.left() + fx * rect.width(),
                rect.top() + fy * rect.height() - lift,
            );
            painter.circle_filled(center, radius, color.gamma_multiply(0.2 + 0.3 * pulse));
        }
    }

    fn paint_scanlines(&self, painter: &Painter, rect: Rect) {
        let stroke = Stroke::new(1.0, Color32::from_black_alpha(12));
        let mut y = rect.top();
        while y <= rect.bottom() {
            painter.line_segment([egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)], stroke);
            y += self.settings.scanline_spacing;
        }
    }
}

/// How far a layer moving at `rate` of the scroll has shifted, wrapped to
/// one tile.
fn layer_offset(scroll: f32, rate: f32, tile: f32) -> f32 {
    (scroll * rate).rem_euclid(tile)
}

/// Corners of a regular hexagon, pointy side up, rotated by `angle` radians
fn hexagon_points(center: Pos2, radius: f32, angle: f32) -> Vec<Pos2> {
    (0..6)
        .map(|i| {
            let a = angle - TAU / 4.0 + i as f32 * TAU / 6.0;
            center + radius * egui::vec2(a.cos(), a.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_offset_wraps() {
        assert_eq!(layer_offset(0.0, 0.1, 50.0), 0.0);
        assert!((layer_offset(600.0, 0.1, 50.0) - 10.0).abs() < 1e-4);
        assert!((layer_offset(1000.0, 0.1, 50.0)).abs() < 1e-3);
        let wrapped = layer_offset(-120.0, 0.3, 50.0);
        assert!((0.0..50.0).contains(&wrapped));
    }

    #[test]
    fn test_hexagon_points_on_circle() {
        let center = egui::pos2(10.0, 20.0);
        let points = hexagon_points(center, 5.0, 0.3);
        assert_eq!(points.len(), 6);
        for p in points {
            assert!((p.distance(center) - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_unrotated_hexagon_points_up() {
        let points = hexagon_points(egui::pos2(0.0, 0.0), 1.0, 0.0);
        assert!((points[0].x).abs() < 1e-5);
        assert!((points[0].y + 1.0).abs() < 1e-5);
    }
}
