//! folio - personal portfolio viewer
//!
//! Single scrolling page with an animated backdrop and a music player that
//! floats above everything.

use std::time::{Duration, Instant};

use eframe::egui;

use folio_rs::audio::FileResource;
use folio_rs::carousel::Carousel;
use folio_rs::content::Portfolio;
use folio_rs::player::Player;
use folio_rs::render::{sections, theme, Background, CarouselView, PlayerWidget};
use folio_rs::settings::AppSettings;

fn main() -> eframe::Result<()> {
    env_logger::init();
    log::info!("Starting folio");

    let settings = AppSettings::load();
    let portfolio = Portfolio::load(settings.content_path.as_deref());
    let title = format!("{} | Portfolio", portfolio.profile.name);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_width, settings.window_height])
            .with_min_inner_size([480.0, 600.0])
            .with_title(&title),
        ..Default::default()
    };

    eframe::run_native(
        "folio",
        options,
        Box::new(move |cc| Ok(Box::new(FolioApp::new(cc, settings, portfolio)))),
    )
}

struct FolioApp {
    portfolio: Portfolio,
    background: Background,
    carousel: Carousel,
    carousel_view: CarouselView,
    player: Player<FileResource>,
    player_widget: PlayerWidget,
    started: Instant,
    scroll_offset: f32,
    focus_projects: bool,
}

impl FolioApp {
    fn new(cc: &eframe::CreationContext<'_>, settings: AppSettings, portfolio: Portfolio) -> Self {
        theme::apply(&cc.egui_ctx);

        let now = Instant::now();
        let carousel = Carousel::new(portfolio.skills.clone(), settings.carousel_interval(), now);
        let resource = FileResource::open(settings.asset(&portfolio.track.audio));
        let player = Player::new(resource, settings.initial_volume);

        Self {
            portfolio,
            background: Background::new(),
            carousel,
            carousel_view: CarouselView::default(),
            player,
            player_widget: PlayerWidget::default(),
            started: now,
            scroll_offset: 0.0,
            focus_projects: false,
        }
    }
}

impl eframe::App for FolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.carousel.tick(now);
        self.player.pump();

        // The backdrop animates continuously
        ctx.request_repaint_after(Duration::from_millis(16));

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(theme::BACKGROUND))
            .show(ctx, |ui| {
                let elapsed = now.duration_since(self.started).as_secs_f32();
                self.background
                    .paint(ui.painter(), ui.max_rect(), elapsed, self.scroll_offset);

                let output = egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        ui.set_max_width(ui.available_width());
                        egui::Frame::none()
                            .inner_margin(egui::Margin::symmetric(48.0, 0.0))
                            .show(ui, |ui| {
                                if let Some(sections::HeroAction::StartMission) =
                                    sections::hero(ui, &self.portfolio)
                                {
                                    self.focus_projects = true;
                                }
                                sections::experience(
                                    ui,
                                    &self.portfolio,
                                    &mut self.carousel,
                                    &self.carousel_view,
                                    now,
                                );
                                sections::projects(ui, &self.portfolio, self.focus_projects);
                            });
                    });
                self.scroll_offset = output.state.offset.y;
                self.focus_projects = false;
            });

        self.player_widget
            .show(ctx, &mut self.player, &self.portfolio.track);
    }
}

impl Drop for FolioApp {
    fn drop(&mut self) {
        self.carousel.dispose();
        log::info!("Shutting down folio");
    }
}
