//! Settings panel for live-tuning the field (feature `egui`).
//!
//! Every edit produces a whole new [`ParticleConfig`]; the host hands it to
//! the controller, which rebuilds the particle set from scratch.

use crate::color::{Background, Color};
use crate::config::ParticleConfig;

/// Angle used when the gradient toggle is switched on.
const DEFAULT_GRADIENT_ANGLE: f32 = 135.0;

pub struct SettingsPanel {
    open: bool,
    draft: ParticleConfig,
    gradient: bool,
    gradient_angle: f32,
    color1: Color,
    color2: Color,
}

impl SettingsPanel {
    pub fn new(config: &ParticleConfig) -> Self {
        let (gradient, gradient_angle, color1, color2) = match config.background {
            Background::Solid { color } => {
                let fallback = Background::default().stops().2;
                (false, DEFAULT_GRADIENT_ANGLE, color, fallback)
            }
            Background::LinearGradient { angle_deg, from, to } => (true, angle_deg, from, to),
        };
        Self {
            open: true,
            draft: config.clone(),
            gradient,
            gradient_angle,
            color1,
            color2,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Configuration as currently shown in the panel.
    pub fn draft(&self) -> &ParticleConfig {
        &self.draft
    }

    /// Draw the panel. Returns the new configuration if anything changed.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<ParticleConfig> {
        if !self.open {
            return None;
        }

        let before = self.draft.clone();
        let mut open = self.open;

        egui::Window::new("Particle background")
            .open(&mut open)
            .default_pos([16.0, 16.0])
            .resizable(false)
            .show(ctx, |ui| {
                self.background_section(ui);
                ui.separator();
                self.interaction_section(ui);
                ui.separator();
                self.particle_section(ui);
                ui.separator();
                ui.weak("Space: pause   F1: hide panel   Esc: quit");
            });

        self.open = open;
        (self.draft != before).then(|| self.draft.clone())
    }

    fn background_section(&mut self, ui: &mut egui::Ui) {
        ui.heading("Background");
        let mut changed = ui
            .checkbox(&mut self.gradient, "Use gradient background")
            .changed();
        changed |= color_row(ui, "Background colour 1", &mut self.color1);
        if self.gradient {
            changed |= color_row(ui, "Background colour 2", &mut self.color2);
        }
        if changed {
            self.draft.background = self.background();
        }
    }

    fn interaction_section(&mut self, ui: &mut egui::Ui) {
        ui.heading("Interaction");
        ui.add(egui::Slider::new(&mut self.draft.spawn_on_click_count, 0..=20).text("Spawn on click"));
        ui.add(
            egui::Slider::new(&mut self.draft.repulse_radius, 0.0..=200.0)
                .step_by(10.0)
                .text("Repulse radius"),
        );
    }

    fn particle_section(&mut self, ui: &mut egui::Ui) {
        ui.heading("Particles");
        color_row(ui, "Dot colour", &mut self.draft.dot_color);
        color_row(ui, "Line colour", &mut self.draft.line_color);
        ui.add(
            egui::Slider::new(&mut self.draft.particle_radius, 1.0..=20.0)
                .step_by(0.5)
                .text("Particle radius"),
        );
        ui.add(
            egui::Slider::new(&mut self.draft.line_width, 0.5..=5.0)
                .step_by(0.1)
                .text("Line width"),
        );
        ui.add(
            egui::Slider::new(&mut self.draft.proximity_threshold, 50.0..=300.0)
                .step_by(10.0)
                .text("Proximity"),
        );

        let mut min_speed = self.draft.min_speed;
        if ui
            .add(egui::Slider::new(&mut min_speed, 0.1..=2.0).step_by(0.1).text("Min speed"))
            .changed()
        {
            self.draft.set_min_speed(min_speed);
        }
        let mut max_speed = self.draft.max_speed;
        if ui
            .add(egui::Slider::new(&mut max_speed, 0.1..=2.0).step_by(0.1).text("Max speed"))
            .changed()
        {
            self.draft.set_max_speed(max_speed);
        }

        ui.add(
            egui::Slider::new(&mut self.draft.particle_count, 50..=300)
                .step_by(10.0)
                .text("Density"),
        );
    }

    fn background(&self) -> Background {
        if self.gradient {
            Background::gradient(self.gradient_angle, self.color1, self.color2)
        } else {
            Background::solid(self.color1)
        }
    }
}

fn color_row(ui: &mut egui::Ui, label: &str, color: &mut Color) -> bool {
    ui.horizontal(|ui| {
        let mut srgb = to_srgb8(*color);
        let changed = ui.color_edit_button_srgb(&mut srgb).changed();
        ui.label(label);
        if changed {
            *color = Color::from_rgb8(srgb[0], srgb[1], srgb[2]).with_alpha(color.a);
        }
        changed
    })
    .inner
}

fn to_srgb8(color: Color) -> [u8; 3] {
    let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [quantize(color.r), quantize(color.g), quantize(color.b)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_reads_gradient_background() {
        let panel = SettingsPanel::new(&ParticleConfig::interactive());
        assert!(panel.gradient);
        assert_eq!(panel.background(), ParticleConfig::interactive().background);
    }

    #[test]
    fn test_solid_background_keeps_second_colour_for_later() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let config = ParticleConfig::default().with_background(Background::solid(red));
        let mut panel = SettingsPanel::new(&config);
        assert!(!panel.gradient);
        assert_eq!(panel.background(), Background::solid(red));

        panel.gradient = true;
        match panel.background() {
            Background::LinearGradient { angle_deg, from, .. } => {
                assert_eq!(angle_deg, DEFAULT_GRADIENT_ANGLE);
                assert_eq!(from, red);
            }
            other => panic!("expected gradient, got {:?}", other),
        }
    }

    #[test]
    fn test_srgb8_round_trip() {
        let color = Color::from_rgb8(0x5c, 0xbd, 0xaa);
        assert_eq!(to_srgb8(color), [0x5c, 0xbd, 0xaa]);
    }

    #[test]
    fn test_show_without_input_changes_nothing() {
        let ctx = egui::Context::default();
        let mut panel = SettingsPanel::new(&ParticleConfig::interactive());
        let mut result = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            result = panel.show(ctx);
        });
        assert!(result.is_none());
        assert!(panel.is_open());
    }

    #[test]
    fn test_closed_panel_draws_nothing() {
        let ctx = egui::Context::default();
        let mut panel = SettingsPanel::new(&ParticleConfig::default());
        panel.toggle();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            assert!(panel.show(ctx).is_none());
        });
    }
}
