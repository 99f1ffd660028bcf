mod controller;
mod gesture;
mod motion;

pub use controller::{ControllerState, CubeController, RotationState};
pub use gesture::{GestureTracker, PointerEvent};
pub use motion::{PanDirection, ZoomDirection};
