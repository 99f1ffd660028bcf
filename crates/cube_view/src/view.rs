use std::{rc::Rc, sync::Arc};

use cube_content::{
    ComponentSelected, ContentReference, ContentResolver, SelectionBus, SelectionSubscription,
};
use faces::Face;
use settings::{speed_from_slider, UserSettings};

use crate::{
    animation::{AnimationLoop, FrameRequestId, FrameScheduler},
    compositor::{CubeFrame, FaceCompositor, ResolveTicket},
    cube::{CubeController, GestureTracker, PanDirection, PointerEvent, ZoomDirection},
    diagnostics::Diagnostics,
};

/// One mounted cube: controller, gesture tracking, faces and the frame loop.
///
/// Constructed explicitly with its collaborators. Dropping the view (or
/// calling [`CubeView::dispose`]) withdraws the pending frame request and
/// leaves the selection bus.
pub struct CubeView<S: FrameScheduler> {
    controller: CubeController,
    gesture: GestureTracker,
    compositor: FaceCompositor,
    diagnostics: Diagnostics,
    animation: AnimationLoop<S>,
    resolver: Rc<dyn ContentResolver>,
    bus: Arc<SelectionBus>,
    subscription: SelectionSubscription,
}

impl<S: FrameScheduler> CubeView<S> {
    pub fn init(
        settings: &UserSettings,
        resolver: Rc<dyn ContentResolver>,
        bus: Arc<SelectionBus>,
        scheduler: S,
    ) -> Self {
        let controller = CubeController::new(&settings.cube);
        let compositor = FaceCompositor::new(controller.settings().face_size, &settings.layout);
        let subscription = bus.subscribe();

        let mut view = Self {
            controller,
            gesture: GestureTracker::new(),
            compositor,
            diagnostics: Diagnostics::new(),
            animation: AnimationLoop::new(scheduler),
            resolver,
            bus,
            subscription,
        };
        let resolved = view.resolve_pending();
        view.animation.start();
        tracing::info!(
            resolved,
            listening = view.compositor.listening_faces().len(),
            "cube view initialised"
        );
        view
    }

    /// Tears the view down. Equivalent to dropping it.
    pub fn dispose(self) {
        tracing::info!("cube view disposed");
    }

    pub fn toggle_rotation(&mut self) -> bool {
        self.controller.toggle_rotation()
    }

    pub fn set_auto_rotating(&mut self, enabled: bool) {
        self.controller.set_auto_rotating(enabled);
    }

    /// Resets orientation and restarts the frame loop from a fresh timestamp.
    pub fn reset(&mut self) {
        self.gesture.clear();
        self.controller.reset();
        self.animation.stop();
        self.animation.start();
    }

    pub fn zoom(&mut self, direction: ZoomDirection) -> f32 {
        self.controller.zoom(direction)
    }

    pub fn pan(&mut self, direction: PanDirection) {
        self.controller.pan(direction);
    }

    pub fn set_rotation_speed(&mut self, degrees_per_second: f32) {
        self.controller.set_rotation_speed(degrees_per_second);
    }

    /// Applies a value from the 0-10 speed slider.
    pub fn set_speed_from_slider(&mut self, value: f32) {
        self.controller.set_rotation_speed(speed_from_slider(value));
    }

    pub fn pointer(&mut self, event: PointerEvent) -> bool {
        self.gesture.handle(&mut self.controller, event)
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.gesture.on_pointer_down(&mut self.controller, x, y)
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.gesture.on_pointer_move(&mut self.controller, x, y)
    }

    pub fn pointer_up(&mut self) -> bool {
        self.gesture.on_pointer_up(&mut self.controller)
    }

    pub fn pointer_leave(&mut self) -> bool {
        self.gesture.on_pointer_leave(&mut self.controller)
    }

    /// Handles a delivered animation frame. Returns `None` for a frame that
    /// is not the loop's outstanding request.
    pub fn on_frame(&mut self, id: FrameRequestId, timestamp_ms: f64) -> Option<CubeFrame> {
        let dt = self.animation.on_frame(id, timestamp_ms)?;
        self.pump_selection();
        self.resolve_pending();
        self.controller.tick(dt);
        Some(self.compose())
    }

    pub fn compose(&self) -> CubeFrame {
        self.compositor.compose(&self.controller)
    }

    /// Applies queued selection events to listening faces. Returns how many
    /// events were handled.
    pub fn pump_selection(&mut self) -> usize {
        let events = self.subscription.drain();
        for event in &events {
            self.apply_selection(event);
        }
        events.len()
    }

    fn apply_selection(&mut self, event: &ComponentSelected) -> Vec<ResolveTicket> {
        let tickets = self.compositor.apply_selection(event);
        if tickets.is_empty() {
            tracing::debug!(content = %event.content.id, "selection ignored, no listening face");
        } else {
            self.diagnostics.info(format!(
                "selected {} on {} face(s)",
                event.content.id,
                tickets.len()
            ));
        }
        tickets
    }

    /// Assigns content to a single face and resolves it.
    pub fn assign(&mut self, face: Face, reference: ContentReference) {
        self.compositor.request(face, reference);
        self.resolve_pending();
    }

    fn resolve_pending(&mut self) -> usize {
        self.compositor
            .resolve_pending(self.resolver.as_ref(), &mut self.diagnostics)
    }

    pub fn controller(&self) -> &CubeController {
        &self.controller
    }

    pub fn compositor(&self) -> &FaceCompositor {
        &self.compositor
    }

    pub fn compositor_mut(&mut self) -> &mut FaceCompositor {
        &mut self.compositor
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn is_running(&self) -> bool {
        self.animation.is_running()
    }

    pub fn scheduler(&self) -> &S {
        self.animation.scheduler()
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        self.animation.scheduler_mut()
    }
}

impl<S: FrameScheduler> Drop for CubeView<S> {
    fn drop(&mut self) {
        self.animation.stop();
        self.bus.unsubscribe(self.subscription.id());
    }
}
