//! Page sections: hero, experience & skills, projects

use std::time::Instant;

use eframe::egui::{self, Align, Color32, Layout, RichText, Stroke};

use crate::carousel::Carousel;
use crate::content::{Portfolio, Project};

use super::carousel::CarouselView;
use super::theme::{self, BORDER, DIM, MUTED, PRIMARY, SECONDARY, SUCCESS};

/// Requests raised by the hero buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroAction {
    StartMission,
}

fn open(ui: &egui::Ui, url: &str) {
    ui.ctx().open_url(egui::OpenUrl::new_tab(url));
}

/// Number of project columns for the available width
pub fn grid_columns(width: f32) -> usize {
    if width >= 1024.0 {
        3
    } else if width >= 768.0 {
        2
    } else {
        1
    }
}

pub fn hero(ui: &mut egui::Ui, portfolio: &Portfolio) -> Option<HeroAction> {
    let profile = &portfolio.profile;
    let mut action = None;
    let min_height = ui.ctx().screen_rect().height() * 0.9;

    ui.allocate_ui(egui::vec2(ui.available_width(), min_height), |ui| {
        ui.set_min_height(min_height);
        ui.columns(2, |cols| {
            let ui = &mut cols[0];
            ui.add_space(min_height * 0.2);

            egui::Frame::none()
                .stroke(Stroke::new(1.0, PRIMARY.gamma_multiply(0.5)))
                .fill(PRIMARY.gamma_multiply(0.1))
                .rounding(12.0)
                .inner_margin(egui::Margin::symmetric(12.0, 4.0))
                .show(ui, |ui| {
                    ui.label(RichText::new(&profile.role).color(PRIMARY));
                });
            ui.add_space(16.0);

            ui.label(RichText::new("HI, I'M").size(64.0).strong().color(Color32::WHITE));
            ui.label(
                RichText::new(profile.name.to_uppercase())
                    .size(64.0)
                    .strong()
                    .color(PRIMARY),
            );
            ui.add_space(16.0);

            ui.label(RichText::new(&profile.degree).size(20.0).color(MUTED));
            ui.label(RichText::new(&profile.school).size(20.0).color(SECONDARY));
            ui.add_space(12.0);
            ui.label(RichText::new(&profile.tagline).size(16.0).color(DIM));
            ui.add_space(24.0);

            ui.horizontal(|ui| {
                let start = egui::Button::new(RichText::new("START MISSION").strong().color(PRIMARY))
                    .fill(PRIMARY.gamma_multiply(0.1))
                    .stroke(Stroke::new(2.0, PRIMARY))
                    .min_size(egui::vec2(160.0, 40.0));
                if ui.add(start).clicked() {
                    action = Some(HeroAction::StartMission);
                }

                let comms = egui::Button::new("✉ COMMS LINK")
                    .stroke(Stroke::new(2.0, BORDER))
                    .min_size(egui::vec2(140.0, 40.0));
                if ui.add(comms).on_hover_text(&profile.email).clicked() {
                    open(ui, &portfolio.mailto());
                }

                if let Some(linkedin) = &profile.linkedin {
                    let button = egui::Button::new("in")
                        .stroke(Stroke::new(2.0, BORDER))
                        .min_size(egui::vec2(40.0, 40.0));
                    if ui.add(button).on_hover_text(linkedin).clicked() {
                        open(ui, linkedin);
                    }
                }
            });

            let ui = &mut cols[1];
            ui.add_space(min_height * 0.15);
            profile_card(ui, portfolio);
        });
    });

    action
}

fn profile_card(ui: &mut egui::Ui, portfolio: &Portfolio) {
    let profile = &portfolio.profile;
    ui.vertical_centered(|ui| {
        egui::Frame::none()
            .fill(Color32::from_rgb(14, 14, 22))
            .stroke(Stroke::new(1.0, PRIMARY.gamma_multiply(0.5)))
            .rounding(24.0)
            .inner_margin(24.0)
            .show(ui, |ui| {
                ui.set_width(280.0);
                ui.vertical_centered(|ui| {
                    let (rect, _) = ui.allocate_exact_size(egui::vec2(160.0, 160.0), egui::Sense::hover());
                    ui.painter().circle_filled(rect.center(), 80.0, SECONDARY.gamma_multiply(0.2));
                    ui.painter()
                        .circle_stroke(rect.center(), 80.0, Stroke::new(2.0, PRIMARY.gamma_multiply(0.6)));
                    let initials: String = profile
                        .name
                        .split_whitespace()
                        .filter_map(|w| w.chars().next())
                        .collect();
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        initials,
                        egui::FontId::proportional(56.0),
                        Color32::WHITE,
                    );
                    ui.add_space(12.0);
                    ui.label(RichText::new(&profile.name).size(24.0).strong().color(Color32::WHITE));
                    ui.label(RichText::new(&profile.role).color(MUTED));
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("●").color(SUCCESS));
                        ui.label(RichText::new("Available for Hire").small().color(SUCCESS));
                    });
                    ui.add_space(8.0);
                    if ui.button("Contact Me").clicked() {
                        open(ui, &portfolio.mailto());
                    }
                });
            });
    });
}

pub fn experience(
    ui: &mut egui::Ui,
    portfolio: &Portfolio,
    carousel: &mut Carousel,
    view: &CarouselView,
    now: Instant,
) {
    ui.add_space(96.0);
    theme::section_heading(ui, "EXPERIENCE & SKILLS");
    ui.add_space(48.0);

    ui.columns(2, |cols| {
        timeline(&mut cols[0], portfolio);

        let ui = &mut cols[1];
        theme::bullet_heading(ui, "TECH ARSENAL", SECONDARY);
        ui.add_space(16.0);
        view.show(ui, carousel, now);
        ui.add_space(24.0);
        certifications(ui, portfolio);
    });
}

fn timeline(ui: &mut egui::Ui, portfolio: &Portfolio) {
    theme::bullet_heading(ui, "CAREER & EDUCATION", PRIMARY);
    ui.add_space(24.0);

    let top = ui.cursor().top();
    let rail_x = ui.cursor().left() + 12.0;
    let mut markers = Vec::new();

    ui.indent("timeline", |ui| {
        ui.add_space(4.0);
        for job in &portfolio.experience {
            markers.push((ui.cursor().top() + 10.0, SECONDARY));
            ui.label(RichText::new(&job.role).size(20.0).strong().color(Color32::WHITE));
            ui.label(
                RichText::new(format!("{} | {}", job.company, job.period))
                    .monospace()
                    .color(SECONDARY),
            );
            ui.label(RichText::new(&job.description).color(MUTED));
            ui.add_space(32.0);
        }
        for edu in &portfolio.education {
            markers.push((ui.cursor().top() + 10.0, Color32::from_gray(82)));
            ui.label(RichText::new(&edu.school).size(20.0).strong().color(Color32::WHITE));
            ui.label(
                RichText::new(format!("{} | {}", edu.degree, edu.year))
                    .monospace()
                    .color(DIM),
            );
            if let Some(gpa) = &edu.gpa {
                egui::Frame::none()
                    .stroke(Stroke::new(1.0, PRIMARY))
                    .inner_margin(egui::Margin::symmetric(6.0, 2.0))
                    .show(ui, |ui| {
                        ui.label(RichText::new(format!("CGPA: {}", gpa)).small().color(PRIMARY));
                    });
            }
            ui.add_space(32.0);
        }
    });

    let bottom = ui.cursor().top();
    let painter = ui.painter();
    painter.line_segment(
        [egui::pos2(rail_x, top), egui::pos2(rail_x, bottom)],
        Stroke::new(2.0, BORDER),
    );
    for (y, color) in markers {
        painter.circle_filled(egui::pos2(rail_x, y), 7.0, color);
        painter.circle_stroke(egui::pos2(rail_x, y), 7.0, Stroke::new(3.0, theme::BACKGROUND));
    }
}

fn certifications(ui: &mut egui::Ui, portfolio: &Portfolio) {
    if portfolio.certifications.is_empty() {
        return;
    }
    egui::Frame::none()
        .fill(Color32::from_rgba_unmultiplied(24, 24, 27, 80))
        .stroke(Stroke::new(1.0, SECONDARY.gamma_multiply(0.4)))
        .inner_margin(24.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                RichText::new("CERTIFICATIONS_UNLOCKED")
                    .size(20.0)
                    .strong()
                    .color(Color32::WHITE),
            );
            ui.add_space(12.0);
            for cert in &portfolio.certifications {
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new("[PASSED]").monospace().color(SUCCESS));
                    ui.label(RichText::new(cert).color(MUTED));
                });
            }
        });
}

/// Project grid. When `focus` is set the section scrolls itself into view.
pub fn projects(ui: &mut egui::Ui, portfolio: &Portfolio, focus: bool) {
    ui.add_space(96.0);
    let heading = ui
        .vertical_centered(|ui| {
            theme::section_heading(ui, "MISSION_LOG");
            ui.add_space(12.0);
            ui.label(
                RichText::new("Completed operations that showcase system engineering capabilities.")
                    .size(16.0)
                    .color(MUTED),
            );
        })
        .response;
    if focus {
        heading.scroll_to_me(Some(Align::TOP));
    }
    ui.add_space(48.0);

    let columns = grid_columns(ui.available_width());
    ui.columns(columns, |cols| {
        for (i, project) in portfolio.projects.iter().enumerate() {
            project_card(&mut cols[i % columns], project, i);
        }
    });
    ui.add_space(160.0);
}

/// A project card that fades in while it is on screen
fn project_card(ui: &mut egui::Ui, project: &Project, index: usize) {
    let id = ui.id().with(("project_card", index));
    let probe = egui::Rect::from_min_size(ui.cursor().min, egui::vec2(ui.available_width(), 80.0));
    let shown = ui.ctx().animate_bool_with_time(id, ui.is_rect_visible(probe), 0.8);

    ui.scope(|ui| {
        ui.set_opacity(shown);
        let hovered_last_frame = ui.ctx().data(|d| d.get_temp::<bool>(id.with("hover"))).unwrap_or(false);
        let border = if hovered_last_frame {
            PRIMARY.gamma_multiply(0.7)
        } else {
            BORDER
        };

        let frame = egui::Frame::none()
            .fill(Color32::from_rgba_unmultiplied(24, 24, 27, 160))
            .stroke(Stroke::new(2.0, border))
            .inner_margin(24.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());

                ui.horizontal_wrapped(|ui| {
                    for tag in project.visible_tags() {
                        egui::Frame::none()
                            .stroke(Stroke::new(1.0, PRIMARY.gamma_multiply(0.3)))
                            .fill(Color32::from_black_alpha(200))
                            .inner_margin(egui::Margin::symmetric(8.0, 4.0))
                            .show(ui, |ui| {
                                ui.label(RichText::new(tag.to_uppercase()).small().strong().color(PRIMARY));
                            });
                    }
                });
                ui.add_space(12.0);

                ui.horizontal(|ui| {
                    ui.label(RichText::new("■").small().color(PRIMARY));
                    let title_color = if hovered_last_frame { PRIMARY } else { Color32::WHITE };
                    ui.add(egui::Label::new(RichText::new(&project.title).size(22.0).strong().color(title_color)).wrap());
                });
                ui.add_space(8.0);
                ui.label(RichText::new(&project.description).monospace().color(MUTED));
                ui.add_space(16.0);

                ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                    let demo = project.demo_link();
                    let initialize = egui::Button::new(RichText::new("↗ INITIALIZE").strong().color(Color32::BLACK))
                        .fill(PRIMARY);
                    let response = ui.add_enabled(demo.is_some(), initialize);
                    if let Some(url) = demo {
                        if response.clicked() {
                            open(ui, url);
                        }
                    }

                    if let Some(repo) = &project.repo_url {
                        let source = egui::Button::new("SOURCE").stroke(Stroke::new(1.0, Color32::from_gray(82)));
                        if ui.add(source).on_hover_text(repo).clicked() {
                            open(ui, repo);
                        }
                    }
                });
            });

        let hovered = ui.rect_contains_pointer(frame.response.rect);
        ui.ctx().data_mut(|d| d.insert_temp(id.with("hover"), hovered));
    });
    ui.add_space(32.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_columns_breakpoints() {
        assert_eq!(grid_columns(320.0), 1);
        assert_eq!(grid_columns(767.9), 1);
        assert_eq!(grid_columns(768.0), 2);
        assert_eq!(grid_columns(1023.0), 2);
        assert_eq!(grid_columns(1024.0), 3);
        assert_eq!(grid_columns(2560.0), 3);
    }
}
