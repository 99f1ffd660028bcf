use glam::Vec2;

use super::controller::CubeController;

/// Raw pointer input in CSS pixels, as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
    Leave,
}

/// Turns pointer events into incremental drag deltas for a [`CubeController`].
#[derive(Debug, Default)]
pub struct GestureTracker {
    last_pointer: Option<Vec2>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the event changed controller state.
    pub fn handle(&mut self, controller: &mut CubeController, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { x, y } => self.on_pointer_down(controller, x, y),
            PointerEvent::Move { x, y } => self.on_pointer_move(controller, x, y),
            PointerEvent::Up => self.on_pointer_up(controller),
            PointerEvent::Leave => self.on_pointer_leave(controller),
        }
    }

    /// Starts a drag at `(x, y)`. Returns false when the position is unusable.
    pub fn on_pointer_down(&mut self, controller: &mut CubeController, x: f32, y: f32) -> bool {
        let position = Vec2::new(x, y);
        if !position.is_finite() {
            return false;
        }
        self.last_pointer = Some(position);
        controller.begin_drag();
        true
    }

    pub fn on_pointer_move(&mut self, controller: &mut CubeController, x: f32, y: f32) -> bool {
        let last = match self.last_pointer {
            Some(pos) => pos,
            None => return false,
        };
        if !controller.is_dragging() {
            // the controller was reset under us
            self.last_pointer = None;
            return false;
        }

        let position = Vec2::new(x, y);
        if !position.is_finite() {
            return false;
        }
        let delta = position - last;
        self.last_pointer = Some(position);
        controller.apply_drag(delta.x, delta.y)
    }

    pub fn on_pointer_up(&mut self, controller: &mut CubeController) -> bool {
        self.release(controller)
    }

    pub fn on_pointer_leave(&mut self, controller: &mut CubeController) -> bool {
        self.release(controller)
    }

    pub fn is_tracking(&self) -> bool {
        self.last_pointer.is_some()
    }

    /// Forgets the pointer without touching the controller.
    pub fn clear(&mut self) {
        self.last_pointer = None;
    }

    fn release(&mut self, controller: &mut CubeController) -> bool {
        let was_dragging = controller.is_dragging();
        self.last_pointer = None;
        controller.end_drag();
        was_dragging
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::ControllerState;
    use settings::CubeSettings;

    fn setup() -> (GestureTracker, CubeController) {
        (GestureTracker::new(), CubeController::new(&CubeSettings::default()))
    }

    #[test]
    fn drag_scenario_applies_pixel_deltas() {
        let (mut tracker, mut cube) = setup();
        tracker.on_pointer_down(&mut cube, 100.0, 100.0);
        assert!(tracker.on_pointer_move(&mut cube, 130.0, 90.0));
        assert_eq!(cube.rotation().angle_y, 15.0);
        assert_eq!(cube.rotation().angle_x, -5.0);

        // deltas are incremental, not from the press point
        tracker.on_pointer_move(&mut cube, 140.0, 90.0);
        assert_eq!(cube.rotation().angle_y, 20.0);
    }

    #[test]
    fn move_without_down_is_ignored() {
        let (mut tracker, mut cube) = setup();
        assert!(!tracker.on_pointer_move(&mut cube, 50.0, 50.0));
        assert!(!tracker.on_pointer_up(&mut cube));
        assert_eq!(cube.state(), ControllerState::AutoRotating);
        assert_eq!(cube.rotation().angle_y, 0.0);
    }

    #[test]
    fn tick_is_suppressed_between_down_and_up() {
        let (mut tracker, mut cube) = setup();
        tracker.handle(&mut cube, PointerEvent::Down { x: 0.0, y: 0.0 });
        let before = cube.rotation();
        for _ in 0..10 {
            cube.tick(0.016);
        }
        assert_eq!(cube.rotation(), before);

        assert!(tracker.handle(&mut cube, PointerEvent::Leave));
        assert!(!tracker.is_tracking());
        assert!(cube.tick(0.016));
    }

    #[test]
    fn moves_after_reset_do_not_rotate() {
        let (mut tracker, mut cube) = setup();
        tracker.on_pointer_down(&mut cube, 10.0, 10.0);
        cube.reset();
        assert!(!tracker.on_pointer_move(&mut cube, 40.0, 40.0));
        assert!(!tracker.is_tracking());
        assert_eq!(cube.rotation().angle_y, 0.0);
    }

    #[test]
    fn non_finite_press_does_not_start_a_drag() {
        let (mut tracker, mut cube) = setup();
        assert!(!tracker.handle(&mut cube, PointerEvent::Down { x: f32::NAN, y: 0.0 }));
        assert!(!tracker.is_tracking());
        assert_eq!(cube.state(), ControllerState::AutoRotating);
        assert!(tracker.handle(&mut cube, PointerEvent::Down { x: 1.0, y: 2.0 }));
        assert!(cube.is_dragging());
    }

    #[test]
    fn release_restores_paused_state() {
        let (mut tracker, mut cube) = setup();
        cube.toggle_rotation();
        tracker.on_pointer_down(&mut cube, 0.0, 0.0);
        tracker.on_pointer_up(&mut cube);
        assert_eq!(cube.state(), ControllerState::Paused);
    }
}
