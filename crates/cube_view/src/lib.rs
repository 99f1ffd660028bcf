//! Interactive six-face card cube.
//!
//! [`CubeView`] ties together the rotation/zoom state machine, pointer
//! gesture tracking, face composition and a cooperative frame loop.

pub mod animation;
pub mod compositor;
pub mod cube;
pub mod diagnostics;
pub mod view;

pub use animation::{AnimationLoop, FrameRequestId, FrameScheduler, ManualScheduler};
pub use compositor::{ComposedFace, CubeFrame, FaceCompositor, FaceContent, ResolveTicket};
pub use cube::{
    ControllerState, CubeController, GestureTracker, PanDirection, PointerEvent, RotationState,
    ZoomDirection,
};
pub use diagnostics::{DiagnosticEntry, DiagnosticLevel, Diagnostics};
pub use view::CubeView;
