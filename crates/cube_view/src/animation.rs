//! Cooperative frame loop.
//!
//! The host owns the real scheduler (`requestAnimationFrame`, a vsync callback,
//! a test harness). Each delivered frame asks for the next one, so the loop
//! never blocks and stops as soon as the pending request is withdrawn.

/// Handle for a single outstanding frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequestId(pub u64);

pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameRequestId;
    fn cancel_frame(&mut self, id: FrameRequestId);
}

/// Largest step handed to the controller, so a stalled tab does not spin the cube.
pub const MAX_FRAME_DT_SECS: f32 = 0.25;

#[derive(Debug)]
pub struct AnimationLoop<S: FrameScheduler> {
    scheduler: S,
    pending: Option<FrameRequestId>,
    last_timestamp_ms: Option<f64>,
    max_dt_secs: f32,
}

impl<S: FrameScheduler> AnimationLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            last_timestamp_ms: None,
            max_dt_secs: MAX_FRAME_DT_SECS,
        }
    }

    /// Requests the first frame. Calling it while running is a no-op.
    pub fn start(&mut self) {
        if self.pending.is_none() {
            self.last_timestamp_ms = None;
            self.pending = Some(self.scheduler.request_frame());
            tracing::debug!("animation loop started");
        }
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<FrameRequestId> {
        self.pending
    }

    /// Handles a delivered frame and schedules the next one. Returns the
    /// elapsed time in seconds, or `None` when `id` is not the outstanding request.
    pub fn on_frame(&mut self, id: FrameRequestId, timestamp_ms: f64) -> Option<f32> {
        if self.pending != Some(id) {
            return None;
        }

        let dt = match self.last_timestamp_ms {
            Some(last) if timestamp_ms.is_finite() => {
                (((timestamp_ms - last) / 1000.0) as f32).clamp(0.0, self.max_dt_secs)
            }
            _ => 0.0,
        };
        if timestamp_ms.is_finite() {
            self.last_timestamp_ms = Some(timestamp_ms);
        }

        self.pending = Some(self.scheduler.request_frame());
        Some(dt)
    }

    /// Withdraws the outstanding request.
    pub fn stop(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel_frame(id);
            tracing::debug!(frame = id.0, "animation loop stopped");
        }
        self.last_timestamp_ms = None;
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl<S: FrameScheduler> Drop for AnimationLoop<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// How many cancelled request ids a [`ManualScheduler`] remembers.
pub const CANCELLED_HISTORY: usize = 64;

/// Scheduler driven by hand, for headless runs and tests.
/// Only the most recent [`CANCELLED_HISTORY`] cancellations are kept.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    outstanding: Vec<FrameRequestId>,
    cancelled: Vec<FrameRequestId>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oldest request still waiting to be delivered.
    pub fn next_due(&self) -> Option<FrameRequestId> {
        self.outstanding.first().copied()
    }

    /// Removes and returns the oldest outstanding request.
    pub fn take_due(&mut self) -> Option<FrameRequestId> {
        if self.outstanding.is_empty() {
            None
        } else {
            Some(self.outstanding.remove(0))
        }
    }

    pub fn outstanding(&self) -> &[FrameRequestId] {
        &self.outstanding
    }

    /// Recently cancelled requests, oldest first.
    pub fn cancelled(&self) -> &[FrameRequestId] {
        &self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameRequestId {
        self.next_id += 1;
        let id = FrameRequestId(self.next_id);
        self.outstanding.push(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        self.outstanding.retain(|pending| *pending != id);
        self.cancelled.push(id);
        if self.cancelled.len() > CANCELLED_HISTORY {
            let excess = self.cancelled.len() - CANCELLED_HISTORY;
            self.cancelled.drain(..excess);
        }
    }
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for &mut T {
    fn request_frame(&mut self) -> FrameRequestId {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        (**self).cancel_frame(id)
    }
}
