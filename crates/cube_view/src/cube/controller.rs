use glam::Vec2;
use settings::CubeSettings;

/// Past this magnitude an angle is rewound by whole turns to keep f32 precision.
const REWIND_THRESHOLD_DEG: f32 = 3600.0;

/// Group orientation in degrees. Angles are not wrapped every frame so CSS
/// transitions never take the long way round; they are only rewound by whole
/// turns once they grow large.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    pub angle_x: f32,
    pub angle_y: f32,
}

impl RotationState {
    pub const ZERO: Self = Self {
        angle_x: 0.0,
        angle_y: 0.0,
    };

    /// Adds a rotation, first rewinding any large angle by whole turns.
    /// Rewinding by multiples of 360 degrees leaves the orientation unchanged.
    pub(super) fn advance(&mut self, delta_x: f32, delta_y: f32) {
        let rewind = |angle: f32| {
            if angle.abs() >= REWIND_THRESHOLD_DEG {
                angle.rem_euclid(360.0)
            } else {
                angle
            }
        };
        self.angle_x = rewind(self.angle_x) + delta_x;
        self.angle_y = rewind(self.angle_y) + delta_y;
    }

    /// Both angles wrapped into `[0, 360)`.
    pub fn normalized(&self) -> Self {
        Self {
            angle_x: self.angle_x.rem_euclid(360.0),
            angle_y: self.angle_y.rem_euclid(360.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    AutoRotating,
    Paused,
    /// Pointer held down. Auto-rotation is suppressed until release, after
    /// which the cube returns to the remembered idle state.
    Dragging { resume_auto_rotation: bool },
}

#[derive(Debug)]
pub struct CubeController {
    pub(super) rotation: RotationState,
    pub(super) scale: f32,
    pub(super) pan: Vec2,
    pub(super) state: ControllerState,
    pub(super) rotation_speed_dps: f32,
    pub(super) settings: CubeSettings,
}

impl CubeController {
    pub fn new(settings: &CubeSettings) -> Self {
        let settings = settings.sanitized();
        let state = if settings.auto_rotate {
            ControllerState::AutoRotating
        } else {
            ControllerState::Paused
        };
        Self {
            rotation: RotationState::ZERO,
            scale: settings.initial_scale,
            pan: Vec2::ZERO,
            state,
            rotation_speed_dps: settings.rotation_speed_dps,
            settings,
        }
    }

    /// Advances auto-rotation by `dt_secs`. Returns true when the rotation changed.
    pub fn tick(&mut self, dt_secs: f32) -> bool {
        if self.state != ControllerState::AutoRotating {
            return false;
        }
        if !dt_secs.is_finite() || dt_secs <= 0.0 || self.rotation_speed_dps == 0.0 {
            return false;
        }
        let step = self.rotation_speed_dps * dt_secs;
        self.rotation.advance(step, step);
        true
    }

    /// Sets the auto-rotation preference. While dragging it only takes effect on release.
    pub fn set_auto_rotating(&mut self, enabled: bool) {
        self.state = match self.state {
            ControllerState::Dragging { .. } => ControllerState::Dragging {
                resume_auto_rotation: enabled,
            },
            _ if enabled => ControllerState::AutoRotating,
            _ => ControllerState::Paused,
        };
        tracing::debug!(enabled, state = ?self.state, "auto-rotation preference set");
    }

    /// Flips between auto-rotating and paused. Ignored while dragging.
    /// Returns the resulting auto-rotation flag.
    pub fn toggle_rotation(&mut self) -> bool {
        match self.state {
            ControllerState::AutoRotating => self.state = ControllerState::Paused,
            ControllerState::Paused => self.state = ControllerState::AutoRotating,
            ControllerState::Dragging { .. } => {
                tracing::debug!("toggle ignored while dragging");
            }
        }
        self.auto_rotation_enabled()
    }

    /// Back to the initial orientation at unit scale, auto-rotating.
    /// Valid from any state.
    pub fn reset(&mut self) {
        self.rotation = RotationState::ZERO;
        self.scale = 1.0_f32.clamp(self.settings.min_scale, self.settings.max_scale);
        self.pan = Vec2::ZERO;
        self.state = ControllerState::AutoRotating;
        tracing::debug!("cube view reset");
    }

    pub fn set_rotation_speed(&mut self, degrees_per_second: f32) {
        if degrees_per_second.is_finite() {
            self.rotation_speed_dps = degrees_per_second.max(0.0);
        }
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed_dps
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Group translation in CSS pixels.
    pub fn pan_offset(&self) -> Vec2 {
        self.pan
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, ControllerState::Dragging { .. })
    }

    /// The auto-rotation preference, including the one remembered during a drag.
    pub fn auto_rotation_enabled(&self) -> bool {
        match self.state {
            ControllerState::AutoRotating => true,
            ControllerState::Paused => false,
            ControllerState::Dragging {
                resume_auto_rotation,
            } => resume_auto_rotation,
        }
    }

    pub fn settings(&self) -> &CubeSettings {
        &self.settings
    }

    /// Applies new tunables without disturbing orientation; scale is re-clamped.
    pub fn sync_with_settings(&mut self, settings: &CubeSettings) {
        self.settings = settings.sanitized();
        self.rotation_speed_dps = self.settings.rotation_speed_dps;
        self.scale = self
            .scale
            .clamp(self.settings.min_scale, self.settings.max_scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use settings::CubePreset;

    fn controller() -> CubeController {
        CubeController::new(&CubeSettings::default())
    }

    #[test]
    fn tick_advances_both_axes_by_speed_times_dt() {
        let mut cube = controller();
        cube.set_rotation_speed(40.0);
        for dt in [0.0, 0.25, 0.5, 1.0] {
            let before = cube.rotation();
            cube.tick(dt);
            assert_eq!(cube.rotation().angle_y - before.angle_y, 40.0 * dt);
            assert_eq!(cube.rotation().angle_x - before.angle_x, 40.0 * dt);
        }
    }

    #[test]
    fn tick_ignores_negative_and_non_finite_dt() {
        let mut cube = controller();
        assert!(!cube.tick(-1.0));
        assert!(!cube.tick(f32::NAN));
        assert!(!cube.tick(f32::INFINITY));
        assert_eq!(cube.rotation(), RotationState::ZERO);
    }

    #[test]
    fn paused_cube_does_not_rotate() {
        let mut cube = controller();
        assert!(!cube.toggle_rotation());
        assert_eq!(cube.state(), ControllerState::Paused);
        assert!(!cube.tick(1.0));
        assert_eq!(cube.rotation(), RotationState::ZERO);
        assert!(cube.toggle_rotation());
        assert!(cube.tick(1.0));
    }

    #[test]
    fn drag_suppresses_tick_and_restores_idle_state() {
        let mut cube = controller();
        cube.begin_drag();
        assert!(cube.is_dragging());
        assert!(!cube.tick(1.0));
        assert_eq!(cube.rotation(), RotationState::ZERO);
        cube.end_drag();
        assert_eq!(cube.state(), ControllerState::AutoRotating);

        cube.set_auto_rotating(false);
        cube.begin_drag();
        cube.end_drag();
        assert_eq!(cube.state(), ControllerState::Paused);
    }

    #[test]
    fn toggle_is_ignored_while_dragging() {
        let mut cube = controller();
        cube.begin_drag();
        assert!(cube.toggle_rotation());
        assert_eq!(
            cube.state(),
            ControllerState::Dragging {
                resume_auto_rotation: true
            }
        );
        // an explicit preference is remembered for release
        cube.set_auto_rotating(false);
        cube.end_drag();
        assert_eq!(cube.state(), ControllerState::Paused);
    }

    #[test]
    fn reset_is_idempotent_from_any_state() {
        let mut cube = controller();
        cube.tick(2.0);
        cube.zoom(crate::cube::ZoomDirection::In);
        cube.pan(crate::cube::PanDirection::Left);
        cube.set_auto_rotating(false);
        cube.begin_drag();
        cube.apply_drag(10.0, 10.0);

        for _ in 0..2 {
            cube.reset();
            assert_eq!(cube.rotation(), RotationState::ZERO);
            assert_eq!(cube.scale(), 1.0);
            assert_eq!(cube.pan_offset(), Vec2::ZERO);
            assert_eq!(cube.state(), ControllerState::AutoRotating);
            assert!(!cube.is_dragging());
        }
    }

    #[test]
    fn starts_from_preset_values() {
        let compact = CubeController::new(&CubePreset::Compact.settings());
        assert_eq!(compact.scale(), 0.5);

        let still = CubeController::new(&CubeSettings {
            auto_rotate: false,
            ..CubeSettings::default()
        });
        assert_eq!(still.state(), ControllerState::Paused);
    }

    #[test]
    fn speed_is_never_negative() {
        let mut cube = controller();
        cube.set_rotation_speed(-3.0);
        assert_eq!(cube.rotation_speed(), 0.0);
        cube.set_rotation_speed(f32::NAN);
        assert_eq!(cube.rotation_speed(), 0.0);
        assert!(!cube.tick(1.0));
    }

    #[test]
    fn tick_keeps_full_step_after_long_spins() {
        let mut cube = controller();
        cube.rotation = RotationState {
            angle_x: 9_000_000.0,
            angle_y: 9_000_000.0 + 90.0,
        };
        let before = cube.rotation().normalized();
        assert!(cube.tick(1.0 / 60.0));
        let after = cube.rotation().normalized();
        assert!((after.angle_y - before.angle_y - 0.5).abs() < 1e-4);
        assert!((after.angle_x - before.angle_x - 0.5).abs() < 1e-4);
        assert!(cube.rotation().angle_y.abs() < 360.0 + 1.0);

        // an hour at 120 fps still advances every frame
        for _ in 0..(120 * 3600) {
            let prev = cube.rotation();
            cube.tick(1.0 / 120.0);
            assert_ne!(cube.rotation(), prev);
        }
        assert!(cube.rotation().angle_y.abs() < REWIND_THRESHOLD_DEG + 1.0);
    }

    #[test]
    fn normalized_wraps_into_one_turn() {
        let r = RotationState {
            angle_x: 370.0,
            angle_y: -90.0,
        }
        .normalized();
        assert_eq!(r.angle_x, 10.0);
        assert_eq!(r.angle_y, 270.0);
    }

    #[test]
    fn settings_sync_reclamps_scale() {
        let mut cube = controller();
        for _ in 0..20 {
            cube.zoom(crate::cube::ZoomDirection::In);
        }
        assert_eq!(cube.scale(), 2.0);
        cube.sync_with_settings(&CubeSettings {
            max_scale: 1.5,
            rotation_speed_dps: 12.0,
            ..CubeSettings::default()
        });
        assert_eq!(cube.scale(), 1.5);
        assert_eq!(cube.rotation_speed(), 12.0);
    }
}
