use crate::audio::KiraOutput;
use crate::config::Settings;
use crate::game::{Choice, Game};
use crate::player::{Artwork, LoftyTagReader, PlaybackState, Player};
use eframe::egui;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(190, 155, 65);
const NOW_PLAYING: egui::Color32 = egui::Color32::from_rgb(255, 210, 80);

fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn load_icon() -> Option<egui::IconData> {
    let icon_path = exe_dir().join("assets/icon.ico");
    let img = image::open(&icon_path).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

pub fn run(audio: KiraOutput, settings: Settings) -> Result<(), eframe::Error> {
    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(settings.window_size)
        .with_title(settings.title)
        .with_resizable(false);

    if let Some(icon) = load_icon() {
        viewport = viewport.with_icon(std::sync::Arc::new(icon));
    }

    let options = eframe::NativeOptions {
        centered: true,
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        settings.title,
        options,
        Box::new(move |cc| Ok(Box::new(RpsPlayerApp::new(cc, audio, settings)))),
    )
}

pub struct RpsPlayerApp {
    game: Game,
    player: Player<KiraOutput, LoftyTagReader>,
    art_size: egui::Vec2,
    audio_extensions: &'static [&'static str],
    textures: HashMap<PathBuf, egui::TextureHandle>,
}

impl RpsPlayerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, audio: KiraOutput, settings: Settings) -> Self {
        let mut visuals = egui::Visuals::dark();
        visuals.selection.bg_fill = egui::Color32::from_rgb(170, 120, 25);
        visuals.selection.stroke = egui::Stroke::new(1.0, egui::Color32::from_rgb(220, 175, 55));
        visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, egui::Color32::from_rgb(195, 158, 50));
        visuals.widgets.active.bg_stroke = egui::Stroke::new(1.0, egui::Color32::from_rgb(220, 178, 60));
        cc.egui_ctx.set_visuals(visuals);

        let player = Player::new(audio, LoftyTagReader, &settings);
        Self {
            game: Game::new(),
            player,
            art_size: egui::vec2(settings.art_size as f32, settings.art_size as f32),
            audio_extensions: settings.audio_extensions,
            textures: HashMap::new(),
        }
    }

    fn add_music(&mut self) {
        let Some(files) = rfd::FileDialog::new()
            .add_filter("Audio Files", self.audio_extensions)
            .pick_files()
        else {
            return;
        };
        self.player.add_tracks(files);
    }

    fn game_panel(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("Rock Paper Scissors").size(12.0).color(ACCENT));
                ui.label(self.game.score().to_string());

                ui.horizontal(|ui| {
                    let btn = egui::vec2(80.0, 24.0);
                    let total_w = btn.x * 3.0 + ui.spacing().item_spacing.x * 2.0;
                    ui.add_space((ui.available_width() - total_w).max(0.0) / 2.0);
                    for choice in Choice::ALL {
                        if ui.add_sized(btn, egui::Button::new(choice.label())).clicked() {
                            self.game.play(choice);
                        }
                    }
                });

                ui.label(self.game.result_text());
            });
        });
    }

    fn artwork(&mut self, ui: &mut egui::Ui) {
        let art = self
            .player
            .displayed()
            .and_then(|(path, metadata)| metadata.artwork.as_ref().map(|art| (path, art)));

        match art {
            Some((path, art)) => {
                let texture = artwork_texture(ui.ctx(), &mut self.textures, path, art);
                ui.image(egui::load::SizedTexture::new(texture.id(), self.art_size));
            }
            None => paint_placeholder(ui, self.art_size),
        }
    }

    fn metadata_lines(&self, ui: &mut egui::Ui) {
        let (title, artist, album) = match self.player.displayed() {
            Some((_, m)) => (m.title.as_str(), m.artist.as_str(), m.album.as_str()),
            None => ("-", "-", "-"),
        };
        ui.label(format!("Title: {}", title));
        ui.label(format!("Artist: {}", artist));
        ui.label(format!("Album: {}", album));
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let btn = egui::vec2(32.0, 24.0);

            if ui.add_sized(btn, egui::Button::new("🎵")).clicked() {
                self.add_music();
            }

            let glyph = self.player.state().transport_glyph();
            if ui.add_sized(btn, egui::Button::new(glyph)).clicked() {
                self.player.toggle_playback();
            }

            if ui.add_sized(btn, egui::Button::new("⏹")).clicked() {
                self.player.stop();
            }

            ui.spacing_mut().slider_width = (ui.available_width() - 10.0).max(40.0);
            let mut volume = self.player.volume();
            if ui
                .add(
                    egui::Slider::new(&mut volume, 0.0..=1.0)
                        .step_by(0.01)
                        .show_value(false),
                )
                .changed()
            {
                self.player.set_volume(volume);
            }
        });
    }

    fn playlist(&mut self, ui: &mut egui::Ui) {
        let names = self.player.playlist().display_names();
        let selected = self.player.playlist().selected();
        let current = match self.player.state() {
            PlaybackState::Stopped => None,
            PlaybackState::Playing | PlaybackState::Paused => self.player.current(),
        };
        let mut clicked = None;

        egui::ScrollArea::vertical()
            .max_height(ui.available_height())
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if names.is_empty() {
                    ui.add_space(12.0);
                    ui.vertical_centered(|ui| {
                        ui.label(egui::RichText::new("No songs added").size(13.0).color(egui::Color32::GRAY));
                    });
                    return;
                }

                for (i, name) in names.iter().enumerate() {
                    let mut text = egui::RichText::new(name);
                    if current == Some(i) {
                        text = text.color(NOW_PLAYING);
                    }
                    if ui.selectable_label(selected == Some(i), text).clicked() {
                        clicked = Some(i);
                    }
                }
            });

        if let Some(index) = clicked {
            self.player.select_track(index);
        }
    }
}

fn artwork_texture(
    ctx: &egui::Context,
    textures: &mut HashMap<PathBuf, egui::TextureHandle>,
    path: &Path,
    art: &Artwork,
) -> egui::TextureHandle {
    textures
        .entry(path.to_path_buf())
        .or_insert_with(|| {
            let (w, h) = art.dimensions();
            let color_image =
                egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], art.as_raw());
            ctx.load_texture(
                format!("artwork:{}", path.display()),
                color_image,
                egui::TextureOptions::LINEAR,
            )
        })
        .clone()
}

fn paint_placeholder(ui: &mut egui::Ui, size: egui::Vec2) {
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    if ui.is_rect_visible(rect) {
        ui.painter().rect_filled(rect, 0.0, egui::Color32::LIGHT_GRAY);
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "♪",
            egui::FontId::new(50.0, egui::FontFamily::Proportional),
            egui::Color32::WHITE,
        );
    }
}

impl eframe::App for RpsPlayerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.game_panel(ui);
            ui.add_space(6.0);

            ui.group(|ui| {
                ui.set_width(ui.available_width());
                ui.set_min_height(ui.available_height());
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new("Music Player").size(12.0).color(ACCENT));
                    ui.add_space(4.0);
                    self.artwork(ui);
                    ui.add_space(4.0);
                    self.metadata_lines(ui);
                });
                ui.add_space(4.0);
                self.controls(ui);
                ui.add_space(4.0);
                self.playlist(ui);
            });
        });
    }
}
