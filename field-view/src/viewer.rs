//! Interactive field-simulation viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the simulation state
//! (grid, pixel buffer, configuration) and implements [`eframe::App`]
//! to render and control the simulation through an egui UI.

use eframe::App;
use field_core::{
    config::{EdgePolicy, EvolutionMode, SimConfig},
    gravity::GravityModel,
    grid::FieldGrid,
};

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The simulation core: [`FieldGrid`] plus its RGBA pixel buffer.
/// - A pending [`SimConfig`] edited in the side panel; run-level
///   settings only take effect when applied, which rebuilds and
///   reseeds the grid.
/// - eframe/egui callbacks for drawing and user interaction.
///
/// The typical per-frame update is:
/// 1. Handle UI interactions / input.
/// 2. If `running` is `true` and enough time has passed, call
///    [`Viewer::step_once`].
/// 3. Upload the colorized field as a texture and draw it.
pub struct Viewer {
    grid: FieldGrid,
    pending: SimConfig,

    pixels: Vec<u8>,
    texture: Option<egui::TextureHandle>,

    running: bool,
    steps_per_frame: usize,

    step_interval: f64,
    last_step_time: f64,
    last_step_dt: f64,
}

impl Viewer {
    /// Creates a viewer over a freshly seeded default-config grid.
    pub fn new() -> Self {
        let cfg = SimConfig::default();
        let grid = FieldGrid::new(cfg);
        let mut viewer = Self {
            grid,
            pending: cfg,
            pixels: vec![0; cfg.width * cfg.height * 4],
            texture: None,
            running: false,
            steps_per_frame: 1,
            step_interval: 0.02,
            last_step_time: 0.0,
            last_step_dt: 0.0,
        };
        viewer.refresh_pixels();
        viewer
    }

    /// Rebuilds the grid from the pending configuration and reseeds.
    ///
    /// This is the only place run-level settings (gravity model,
    /// evolution mode, edge policy, grid size, dt, eps) take effect.
    fn apply_pending(&mut self) {
        self.grid = FieldGrid::new(self.pending);
        self.pixels = vec![0; self.pending.width * self.pending.height * 4];
        self.texture = None;
        self.running = false;
        self.refresh_pixels();
    }

    /// Reseeds the current grid, keeping its configuration.
    fn reset(&mut self) {
        self.grid.seed();
        self.running = false;
        self.refresh_pixels();
    }

    /// Advances the simulation by `steps_per_frame` generations and
    /// recolorizes.
    fn step_once(&mut self) {
        for _ in 0..self.steps_per_frame {
            self.grid.step();
        }
        self.refresh_pixels();
    }

    fn refresh_pixels(&mut self) {
        self.grid.colorize_into(&mut self.pixels);
    }

    /// Uploads the pixel buffer as the display texture.
    fn upload_texture(&mut self, ctx: &egui::Context) {
        let cfg = self.grid.config();
        let image =
            egui::ColorImage::from_rgba_unmultiplied([cfg.width, cfg.height], &self.pixels);
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture("field", image, egui::TextureOptions::NEAREST));
            }
        }
    }

    /// Helper to draw a labeled `usize` [`egui::DragValue`].
    fn labeled_drag_usize(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut usize,
        range: std::ops::RangeInclusive<usize>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Helper to draw a labeled `f64` [`egui::DragValue`].
    fn labeled_drag_f64(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f64,
        range: std::ops::RangeInclusive<f64>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel UI (run controls, stepping, reseeding).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                ui.add(
                    egui::DragValue::new(&mut self.step_interval)
                        .prefix("dt target = ")
                        .range(0.0..=1.0)
                        .speed(0.01),
                );

                Self::labeled_drag_usize(ui, "steps/frame:", &mut self.steps_per_frame, 1..=64, 1.0);

                if ui.button("Step").clicked() {
                    let now = ctx.input(|i| i.time);
                    if self.last_step_time > 0.0 {
                        self.last_step_dt = now - self.last_step_time;
                    }
                    self.step_once();
                    self.last_step_time = now;
                }

                if ui.button("Reseed").clicked() {
                    self.reset();
                }
            });
        });
    }

    /// Builds the bottom status bar (step timing, generation, peak
    /// field magnitude).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt target = {:.3} s", self.step_interval));
                ui.label(format!("dt last = {:.3} s", self.last_step_dt));
                ui.separator();
                ui.label(format!("generation = {}", self.grid.generation()));
                ui.label(format!("peak |field| = {:.3}", self.grid.peak_magnitude()));
            });
        });
    }

    /// Builds the right-hand configuration panel. Edits land in
    /// `pending` and only reach the simulation through "Apply".
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                ui.separator();
                ui.label("Gravity model");
                egui::ComboBox::from_id_salt("gravity_model")
                    .selected_text(self.pending.gravity.label())
                    .show_ui(ui, |ui| {
                        for model in GravityModel::ALL {
                            ui.selectable_value(&mut self.pending.gravity, model, model.label());
                        }
                    });

                ui.label("Evolution mode");
                egui::ComboBox::from_id_salt("evolution_mode")
                    .selected_text(self.pending.evolution.label())
                    .show_ui(ui, |ui| {
                        for mode in EvolutionMode::ALL {
                            ui.selectable_value(&mut self.pending.evolution, mode, mode.label());
                        }
                    });

                ui.label("Edge policy");
                egui::ComboBox::from_id_salt("edge_policy")
                    .selected_text(self.pending.edge.label())
                    .show_ui(ui, |ui| {
                        for edge in EdgePolicy::ALL {
                            ui.selectable_value(&mut self.pending.edge, edge, edge.label());
                        }
                    });

                ui.separator();
                ui.label("Grid");
                Self::labeled_drag_usize(ui, "width:", &mut self.pending.width, 16..=1024, 8.0);
                Self::labeled_drag_usize(ui, "height:", &mut self.pending.height, 16..=1024, 8.0);

                ui.separator();
                ui.label("Integration");
                Self::labeled_drag_f64(ui, "dt:", &mut self.pending.dt, 0.001..=1.0, 0.005);
                Self::labeled_drag_f64(ui, "eps:", &mut self.pending.eps, 0.1..=4.0, 0.05);
                ui.checkbox(&mut self.pending.conserve_amplitude, "conserve amplitude");

                ui.separator();
                if ui.button("Apply & reseed").clicked() {
                    self.apply_pending();
                }
                if ui.button("Reset cfg to default").clicked() {
                    self.pending = SimConfig::default();
                }
            });
    }

    /// Builds the central panel where the colorized field is drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            // Auto-run simulation if requested.
            if self.running {
                let now = ctx.input(|i| i.time);
                let elapsed = now - self.last_step_time;
                if elapsed >= self.step_interval {
                    if self.last_step_time > 0.0 {
                        self.last_step_dt = elapsed;
                    }
                    self.step_once();
                    self.last_step_time = now;
                }

                ctx.request_repaint();
            }

            self.upload_texture(ui.ctx());

            if let Some(texture) = &self.texture {
                // Letterbox the grid into the available rect.
                let cfg = self.grid.config();
                let aspect = cfg.width as f32 / cfg.height as f32;
                let avail = ui.available_rect_before_wrap();
                let mut size = avail.size();
                if size.x / size.y > aspect {
                    size.x = size.y * aspect;
                } else {
                    size.y = size.x / aspect;
                }
                let rect = egui::Rect::from_center_size(avail.center(), size);
                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                ui.painter().image(texture.id(), rect, uv, egui::Color32::WHITE);
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    ///
    /// This method:
    /// - Renders the top control bar and status bar.
    /// - Renders the config side panel.
    /// - Draws the central field view and advances the simulation.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_viewer_matches_its_default_config() {
        let viewer = Viewer::new();
        let cfg = viewer.grid.config();

        assert_eq!(viewer.pixels.len(), cfg.width * cfg.height * 4);
        assert_eq!(viewer.grid.generation(), 0);
        assert!(!viewer.running);

        // The seeded field is colorized immediately: every pixel is
        // opaque.
        assert!(viewer.pixels.chunks_exact(4).all(|p| p[3] == 255));
    }

    #[test]
    fn step_once_advances_by_steps_per_frame() {
        let mut viewer = Viewer::new();
        viewer.steps_per_frame = 3;

        viewer.step_once();

        assert_eq!(viewer.grid.generation(), 3);
    }

    #[test]
    fn apply_pending_rebuilds_the_grid() {
        let mut viewer = Viewer::new();
        viewer.pending.width = 32;
        viewer.pending.height = 16;
        viewer.pending.gravity = GravityModel::None;
        viewer.pending.evolution = EvolutionMode::SchrodingerLike;

        viewer.apply_pending();

        assert_eq!(viewer.grid.config().width, 32);
        assert_eq!(viewer.grid.config().height, 16);
        assert_eq!(viewer.grid.config().gravity, GravityModel::None);
        assert_eq!(viewer.pixels.len(), 32 * 16 * 4);
        assert_eq!(viewer.grid.generation(), 0);
        assert!(!viewer.running);
    }

    #[test]
    fn reseed_restores_generation_zero() {
        let mut viewer = Viewer::new();
        viewer.step_once();
        assert!(viewer.grid.generation() > 0);

        viewer.reset();

        assert_eq!(viewer.grid.generation(), 0);
        assert!(!viewer.running);
    }
}
