//! Places the six faces and tracks what each one shows.
//!
//! Content resolution may complete out of order. Every request bumps the
//! face's generation, and a completion is only accepted for the generation it
//! was issued for, so the last request for a face always wins.

use cube_content::{
    CardFragment, ComponentSelected, ContentError, ContentReference, ContentResolver,
    ContentResult,
};
use faces::Face;
use glam::{Mat4, Vec2, Vec3};
use settings::FaceLayout;

use crate::cube::{CubeController, RotationState};
use crate::diagnostics::Diagnostics;

pub const NO_COMPONENT_TEXT: &str = "No component specified";
pub const LOADING_TEXT: &str = "Loading...";

#[derive(Debug, Clone, PartialEq)]
pub enum FaceContent {
    Unassigned,
    Loading,
    Ready(CardFragment),
    Failed { content: String, message: String },
}

impl FaceContent {
    /// Text shown in place of content, if any.
    pub fn placeholder_text(&self) -> Option<String> {
        match self {
            FaceContent::Unassigned => Some(NO_COMPONENT_TEXT.to_owned()),
            FaceContent::Loading => Some(LOADING_TEXT.to_owned()),
            FaceContent::Ready(_) => None,
            FaceContent::Failed { content, .. } => {
                Some(format!("Failed to load component: {content}"))
            }
        }
    }

    /// Card title when ready, otherwise the placeholder text.
    pub fn summary(&self) -> String {
        match self {
            FaceContent::Ready(fragment) => fragment.title.clone(),
            other => other.placeholder_text().unwrap_or_default(),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, FaceContent::Ready(_))
    }
}

/// Identifies one outstanding resolution for a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolveTicket {
    pub face: Face,
    generation: u64,
}

#[derive(Debug)]
struct FaceSlot {
    assignment: ContentReference,
    content: FaceContent,
    generation: u64,
    dispatched: bool,
    listening: bool,
    upright: bool,
}

impl FaceSlot {
    fn empty() -> Self {
        Self {
            assignment: ContentReference::default(),
            content: FaceContent::Unassigned,
            generation: 0,
            dispatched: true,
            listening: false,
            upright: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComposedFace {
    pub face: Face,
    /// Local placement, e.g. `translateX(100px) rotateY(90deg)`.
    pub transform: String,
    /// Counter-rotation applied to the content when the face keeps it upright.
    pub content_transform: Option<&'static str>,
    pub content: FaceContent,
    /// Group transform times local placement.
    pub matrix: Mat4,
}

impl ComposedFace {
    pub fn matrix3d(&self) -> String {
        matrix3d(&self.matrix)
    }

    /// Whether the face's outward normal points toward the viewer.
    pub fn is_front_facing(&self) -> bool {
        self.matrix.transform_vector3(Vec3::Z).z > 0.0
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeFrame {
    pub group_transform: String,
    pub group_matrix: Mat4,
    pub faces: Vec<ComposedFace>,
    pub facing: Face,
    pub rotation: RotationState,
    pub scale: f32,
    pub pan: Vec2,
}

impl CubeFrame {
    pub fn face(&self, face: Face) -> &ComposedFace {
        &self.faces[face.index()]
    }
}

#[derive(Debug)]
pub struct FaceCompositor {
    face_size: f32,
    slots: [FaceSlot; 6],
}

impl FaceCompositor {
    /// Builds the slots from `layout` and queues resolution for every
    /// assigned face.
    pub fn new(face_size: f32, layout: &FaceLayout) -> Self {
        let mut compositor = Self {
            face_size,
            slots: Face::ALL.map(|_| FaceSlot::empty()),
        };
        for face in Face::ALL {
            if let Some(config) = layout.slot(face) {
                let slot = compositor.slot_mut(face);
                slot.listening = config.listens_for_selection;
                slot.upright = config.upright;
                let reference =
                    ContentReference::with_properties(config.content.as_str(), config.properties.clone());
                compositor.request(face, reference);
            }
        }
        compositor
    }

    pub fn face_size(&self) -> f32 {
        self.face_size
    }

    pub fn assignment(&self, face: Face) -> &ContentReference {
        &self.slot(face).assignment
    }

    pub fn content(&self, face: Face) -> &FaceContent {
        &self.slot(face).content
    }

    pub fn is_listening(&self, face: Face) -> bool {
        self.slot(face).listening
    }

    pub fn set_listening(&mut self, face: Face, listening: bool) {
        self.slot_mut(face).listening = listening;
    }

    pub fn listening_faces(&self) -> Vec<Face> {
        Face::ALL
            .into_iter()
            .filter(|face| self.slot(*face).listening)
            .collect()
    }

    /// Replaces a face's assignment. Returns the ticket to complete, or `None`
    /// when the reference is empty and the face shows the unassigned placeholder.
    pub fn request(&mut self, face: Face, reference: ContentReference) -> Option<ResolveTicket> {
        let slot = self.slot_mut(face);
        slot.generation += 1;
        slot.assignment = reference;
        if slot.assignment.is_empty() {
            slot.content = FaceContent::Unassigned;
            slot.dispatched = true;
            return None;
        }
        slot.content = FaceContent::Loading;
        slot.dispatched = false;
        tracing::debug!(%face, content = %slot.assignment.id, "content requested");
        Some(ResolveTicket {
            face,
            generation: slot.generation,
        })
    }

    /// Requests not yet handed to a resolver. They are marked as dispatched.
    pub fn take_pending(&mut self) -> Vec<(ResolveTicket, ContentReference)> {
        let mut pending = Vec::new();
        for face in Face::ALL {
            let slot = self.slot_mut(face);
            if !slot.dispatched {
                slot.dispatched = true;
                pending.push((
                    ResolveTicket {
                        face,
                        generation: slot.generation,
                    },
                    slot.assignment.clone(),
                ));
            }
        }
        pending
    }

    /// Applies a resolution result. Returns false for a superseded ticket.
    pub fn complete(
        &mut self,
        ticket: ResolveTicket,
        result: ContentResult<CardFragment>,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        let slot = self.slot_mut(ticket.face);
        if slot.generation != ticket.generation {
            tracing::debug!(face = %ticket.face, "ignoring superseded content result");
            return false;
        }
        slot.dispatched = true;
        slot.content = match result {
            Ok(fragment) => FaceContent::Ready(fragment),
            Err(ContentError::EmptyReference) => FaceContent::Unassigned,
            Err(err) => {
                let content = slot.assignment.id.as_str().to_owned();
                diagnostics.error(format!(
                    "{} face: failed to load component {content}: {err}",
                    ticket.face
                ));
                FaceContent::Failed {
                    content,
                    message: err.to_string(),
                }
            }
        };
        true
    }

    /// Resolves every queued request synchronously. Returns how many were applied.
    pub fn resolve_pending(
        &mut self,
        resolver: &dyn ContentResolver,
        diagnostics: &mut Diagnostics,
    ) -> usize {
        let mut applied = 0;
        for (ticket, reference) in self.take_pending() {
            let result = resolver.resolve(&reference);
            if self.complete(ticket, result, diagnostics) {
                applied += 1;
            }
        }
        applied
    }

    /// Reassigns every listening face to the selected content.
    pub fn apply_selection(&mut self, event: &ComponentSelected) -> Vec<ResolveTicket> {
        self.listening_faces()
            .into_iter()
            .filter_map(|face| self.request(face, event.content.clone()))
            .collect()
    }

    pub fn compose(&self, controller: &CubeController) -> CubeFrame {
        let rotation = controller.rotation();
        let scale = controller.scale();
        let pan = controller.pan_offset();
        let group_matrix = group_matrix(rotation, scale, pan);

        let composed = Face::ALL
            .into_iter()
            .map(|face| {
                let slot = self.slot(face);
                ComposedFace {
                    face,
                    transform: face.css_transform(self.face_size),
                    content_transform: if slot.upright {
                        face.counter_rotation()
                    } else {
                        None
                    },
                    content: slot.content.clone(),
                    matrix: group_matrix * face.local_matrix(self.face_size),
                }
            })
            .collect();

        CubeFrame {
            group_transform: group_transform(rotation, scale, pan),
            group_matrix,
            faces: composed,
            facing: faces::facing_face(rotation.angle_x, rotation.angle_y),
            rotation,
            scale,
            pan,
        }
    }

    fn slot(&self, face: Face) -> &FaceSlot {
        &self.slots[face.index()]
    }

    fn slot_mut(&mut self, face: Face) -> &mut FaceSlot {
        &mut self.slots[face.index()]
    }
}

/// CSS for the whole group: optional pan, then scale, rotateX, rotateY.
pub fn group_transform(rotation: RotationState, scale: f32, pan: Vec2) -> String {
    let base = format!(
        "scale({scale}) rotateX({}deg) rotateY({}deg)",
        rotation.angle_x, rotation.angle_y
    );
    if pan == Vec2::ZERO {
        base
    } else {
        format!("translate({}px, {}px) {base}", pan.x, pan.y)
    }
}

pub fn group_matrix(rotation: RotationState, scale: f32, pan: Vec2) -> Mat4 {
    Mat4::from_translation(pan.extend(0.0))
        * Mat4::from_scale(Vec3::splat(scale))
        * faces::group_rotation(rotation.angle_x, rotation.angle_y)
}

/// CSS `matrix3d(...)` in column-major order.
pub fn matrix3d(matrix: &Mat4) -> String {
    let values: Vec<String> = matrix
        .to_cols_array()
        .iter()
        .map(|v| {
            // avoid "-0" in output
            let v = if v.abs() < 1e-6 { 0.0 } else { *v };
            format!("{v}")
        })
        .collect();
    format!("matrix3d({})", values.join(", "))
}
