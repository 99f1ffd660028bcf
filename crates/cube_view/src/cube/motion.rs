use glam::Vec2;
use settings::ZoomMode;

use super::controller::{ControllerState, CubeController};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Up,
    Down,
    Left,
    Right,
}

impl PanDirection {
    /// Screen-space unit offset; y grows downward.
    fn unit(self) -> Vec2 {
        match self {
            PanDirection::Up => Vec2::NEG_Y,
            PanDirection::Down => Vec2::Y,
            PanDirection::Left => Vec2::NEG_X,
            PanDirection::Right => Vec2::X,
        }
    }
}

impl CubeController {
    pub(crate) fn begin_drag(&mut self) {
        self.state = match self.state {
            ControllerState::AutoRotating => ControllerState::Dragging {
                resume_auto_rotation: true,
            },
            ControllerState::Paused => ControllerState::Dragging {
                resume_auto_rotation: false,
            },
            dragging @ ControllerState::Dragging { .. } => dragging,
        };
    }

    pub(crate) fn end_drag(&mut self) {
        if let ControllerState::Dragging {
            resume_auto_rotation,
        } = self.state
        {
            self.state = if resume_auto_rotation {
                ControllerState::AutoRotating
            } else {
                ControllerState::Paused
            };
        }
    }

    /// Horizontal motion spins around Y, vertical motion around X.
    pub fn apply_drag(&mut self, dx: f32, dy: f32) -> bool {
        if !self.is_dragging() || !dx.is_finite() || !dy.is_finite() {
            return false;
        }
        let k = self.settings.drag_degrees_per_pixel;
        self.rotation.advance(dy * k, dx * k);
        true
    }

    /// Steps the scale and clamps it to the configured bounds. Returns the new scale.
    pub fn zoom(&mut self, direction: ZoomDirection) -> f32 {
        let step = self.settings.zoom_step;
        let next = match (self.settings.zoom_mode, direction) {
            (ZoomMode::Additive, ZoomDirection::In) => self.scale + step,
            (ZoomMode::Additive, ZoomDirection::Out) => self.scale - step,
            (ZoomMode::Multiplicative, ZoomDirection::In) => self.scale * (1.0 + step),
            (ZoomMode::Multiplicative, ZoomDirection::Out) => self.scale * (1.0 - step),
        };
        self.scale = next.clamp(self.settings.min_scale, self.settings.max_scale);
        self.scale
    }

    pub fn pan(&mut self, direction: PanDirection) -> Vec2 {
        self.pan += direction.unit() * self.settings.pan_step;
        self.pan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use settings::CubeSettings;

    #[test]
    fn six_zoom_outs_clamp_at_minimum() {
        let mut cube = CubeController::new(&CubeSettings::default());
        for _ in 0..6 {
            cube.zoom(ZoomDirection::Out);
        }
        assert_eq!(cube.scale(), 0.5);
    }

    #[test]
    fn scale_stays_in_bounds_for_any_sequence() {
        for mode in [ZoomMode::Additive, ZoomMode::Multiplicative] {
            let mut cube = CubeController::new(&CubeSettings {
                zoom_mode: mode,
                ..CubeSettings::default()
            });
            for i in 0..200 {
                let direction = if (i / 7) % 3 == 0 {
                    ZoomDirection::Out
                } else {
                    ZoomDirection::In
                };
                let scale = cube.zoom(direction);
                assert!((0.5..=2.0).contains(&scale), "{mode:?} {scale}");
            }
        }
    }

    #[test]
    fn loaded_bounds_cannot_widen_scale_range() {
        let loaded: settings::UserSettings =
            serde_json::from_str(r#"{ "cube": { "max_scale": 5.0, "min_scale": 0.1 } }"#).unwrap();
        for mode in [ZoomMode::Additive, ZoomMode::Multiplicative] {
            let mut cube = CubeController::new(&CubeSettings {
                zoom_mode: mode,
                ..loaded.cube.clone()
            });
            for _ in 0..40 {
                cube.zoom(ZoomDirection::In);
            }
            assert_eq!(cube.scale(), 2.0, "{mode:?}");
            for _ in 0..80 {
                cube.zoom(ZoomDirection::Out);
            }
            assert_eq!(cube.scale(), 0.5, "{mode:?}");
        }
    }

    #[test]
    fn multiplicative_zoom_scales_by_ten_percent() {
        let mut cube = CubeController::new(&CubeSettings {
            zoom_mode: ZoomMode::Multiplicative,
            ..CubeSettings::default()
        });
        assert!((cube.zoom(ZoomDirection::In) - 1.1).abs() < 1e-6);
        assert!((cube.zoom(ZoomDirection::Out) - 0.99).abs() < 1e-6);
    }

    #[test]
    fn drag_maps_half_degree_per_pixel() {
        let mut cube = CubeController::new(&CubeSettings::default());
        assert!(!cube.apply_drag(30.0, -10.0), "not dragging yet");
        cube.begin_drag();
        assert!(cube.apply_drag(30.0, -10.0));
        assert_eq!(cube.rotation().angle_y, 15.0);
        assert_eq!(cube.rotation().angle_x, -5.0);
        assert!(!cube.apply_drag(f32::NAN, 1.0));
    }

    #[test]
    fn pan_moves_in_fixed_steps() {
        let mut cube = CubeController::new(&CubeSettings::default());
        cube.pan(PanDirection::Up);
        cube.pan(PanDirection::Right);
        cube.pan(PanDirection::Right);
        assert_eq!(cube.pan_offset(), Vec2::new(100.0, -50.0));
    }
}
