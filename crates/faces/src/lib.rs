//! Geometry of the six cube faces.
//!
//! Coordinates follow the CSS 3D convention: +X right, +Y down, +Z toward the
//! viewer. Each face is placed by translating half the face size along its
//! outward normal and then rotating so its content faces outward.

use std::{fmt, str::FromStr};

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Front,
    Back,
    Right,
    Left,
    Top,
    Bottom,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Right,
        Face::Left,
        Face::Top,
        Face::Bottom,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Face::Front => "front",
            Face::Back => "back",
            Face::Right => "right",
            Face::Left => "left",
            Face::Top => "top",
            Face::Bottom => "bottom",
        }
    }

    /// Position of this face in [`Face::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Face::Front => 0,
            Face::Back => 1,
            Face::Right => 2,
            Face::Left => 3,
            Face::Top => 4,
            Face::Bottom => 5,
        }
    }

    /// Outward unit normal in cube-local space.
    pub fn normal(self) -> Vec3 {
        match self {
            Face::Front => Vec3::Z,
            Face::Back => Vec3::NEG_Z,
            Face::Right => Vec3::X,
            Face::Left => Vec3::NEG_X,
            // y grows downward, so "up" is -Y
            Face::Top => Vec3::NEG_Y,
            Face::Bottom => Vec3::Y,
        }
    }

    /// Local rotation `(x, y)` in degrees applied after the translation.
    pub const fn rotation_deg(self) -> (f32, f32) {
        match self {
            Face::Front => (0.0, 0.0),
            Face::Back => (0.0, 180.0),
            Face::Right => (0.0, 90.0),
            Face::Left => (0.0, -90.0),
            Face::Top => (90.0, 0.0),
            Face::Bottom => (-90.0, 0.0),
        }
    }

    pub fn placement(self, face_size: f32) -> FacePlacement {
        let (rotate_x_deg, rotate_y_deg) = self.rotation_deg();
        FacePlacement {
            translate: self.normal() * (face_size * 0.5),
            rotate_x_deg,
            rotate_y_deg,
        }
    }

    /// CSS transform establishing this face's place in the cube,
    /// e.g. `translateX(100px) rotateY(90deg)` for the right face of a 200px cube.
    pub fn css_transform(self, face_size: f32) -> String {
        self.placement(face_size).css()
    }

    pub fn local_matrix(self, face_size: f32) -> Mat4 {
        self.placement(face_size).matrix()
    }

    /// Inverse of the face's local rotation, used by content that wants to
    /// stay upright regardless of which face hosts it.
    pub const fn counter_rotation(self) -> Option<&'static str> {
        match self {
            Face::Front => None,
            Face::Back => Some("rotateY(180deg)"),
            Face::Right => Some("rotateY(-90deg)"),
            Face::Left => Some("rotateY(90deg)"),
            Face::Top => Some("rotateX(-90deg)"),
            Face::Bottom => Some("rotateX(90deg)"),
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFaceError(String);

impl fmt::Display for ParseFaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown cube face `{}`", self.0)
    }
}

impl std::error::Error for ParseFaceError {}

impl FromStr for Face {
    type Err = ParseFaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Face::ALL
            .into_iter()
            .find(|face| face.label() == lowered)
            .ok_or(ParseFaceError(s.to_owned()))
    }
}

/// Translate-then-rotate placement of a single face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacePlacement {
    pub translate: Vec3,
    pub rotate_x_deg: f32,
    pub rotate_y_deg: f32,
}

impl FacePlacement {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translate)
            * Mat4::from_rotation_x(self.rotate_x_deg.to_radians())
            * Mat4::from_rotation_y(self.rotate_y_deg.to_radians())
    }

    pub fn css(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        let t = self.translate;
        if t.x != 0.0 {
            parts.push(format!("translateX({}px)", t.x));
        }
        if t.y != 0.0 {
            parts.push(format!("translateY({}px)", t.y));
        }
        if t.z != 0.0 {
            parts.push(format!("translateZ({}px)", t.z));
        }
        if self.rotate_x_deg != 0.0 {
            parts.push(format!("rotateX({}deg)", self.rotate_x_deg));
        }
        if self.rotate_y_deg != 0.0 {
            parts.push(format!("rotateY({}deg)", self.rotate_y_deg));
        }
        parts.join(" ")
    }
}

/// Group rotation matching CSS `rotateX(x) rotateY(y)`.
pub fn group_rotation(angle_x_deg: f32, angle_y_deg: f32) -> Mat4 {
    Mat4::from_rotation_x(angle_x_deg.to_radians()) * Mat4::from_rotation_y(angle_y_deg.to_radians())
}

/// Face whose outward normal points most toward the viewer after the group
/// rotation. Ties resolve in [`Face::ALL`] order.
pub fn facing_face(angle_x_deg: f32, angle_y_deg: f32) -> Face {
    let rotation = group_rotation(angle_x_deg, angle_y_deg);
    let mut best = Face::Front;
    let mut best_z = f32::NEG_INFINITY;
    for face in Face::ALL {
        let z = rotation.transform_vector3(face.normal()).z;
        if z > best_z + 1e-5 {
            best = face;
            best_z = z;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn css_transforms_match_cube_table() {
        assert_eq!(Face::Front.css_transform(200.0), "translateZ(100px)");
        assert_eq!(
            Face::Back.css_transform(200.0),
            "translateZ(-100px) rotateY(180deg)"
        );
        assert_eq!(
            Face::Right.css_transform(200.0),
            "translateX(100px) rotateY(90deg)"
        );
        assert_eq!(
            Face::Left.css_transform(200.0),
            "translateX(-100px) rotateY(-90deg)"
        );
        assert_eq!(
            Face::Top.css_transform(200.0),
            "translateY(-100px) rotateX(90deg)"
        );
        assert_eq!(
            Face::Bottom.css_transform(200.0),
            "translateY(100px) rotateX(-90deg)"
        );
    }

    #[test]
    fn local_matrix_points_content_outward() {
        for face in Face::ALL {
            let m = face.local_matrix(400.0);
            assert!(approx(m.transform_vector3(Vec3::Z), face.normal()), "{face}");
            assert!(
                approx(m.transform_point3(Vec3::ZERO), face.normal() * 200.0),
                "{face}"
            );
        }
    }

    #[test]
    fn counter_rotation_undoes_local_rotation() {
        assert_eq!(Face::Front.counter_rotation(), None);
        for face in Face::ALL {
            let (x, y) = face.rotation_deg();
            let expected = if x != 0.0 {
                Some(format!("rotateX({}deg)", -x))
            } else if y != 0.0 && y != 180.0 {
                Some(format!("rotateY({}deg)", -y))
            } else if y == 180.0 {
                Some("rotateY(180deg)".to_owned())
            } else {
                None
            };
            assert_eq!(face.counter_rotation().map(str::to_owned), expected, "{face}");
        }
    }

    #[test]
    fn facing_face_follows_group_rotation() {
        assert_eq!(facing_face(0.0, 0.0), Face::Front);
        assert_eq!(facing_face(0.0, 90.0), Face::Left);
        assert_eq!(facing_face(0.0, -90.0), Face::Right);
        assert_eq!(facing_face(0.0, 180.0), Face::Back);
        assert_eq!(facing_face(90.0, 0.0), Face::Bottom);
        assert_eq!(facing_face(-90.0, 0.0), Face::Top);
        assert_eq!(facing_face(0.0, 720.0 + 10.0), Face::Front);
    }

    #[test]
    fn parses_face_names() {
        assert_eq!("Front".parse::<Face>(), Ok(Face::Front));
        assert_eq!(" bottom ".parse::<Face>(), Ok(Face::Bottom));
        assert!("side".parse::<Face>().is_err());
        let json = serde_json::to_string(&Face::Left).unwrap();
        assert_eq!(json, "\"left\"");
    }

    #[test]
    fn indices_follow_all_order() {
        for (i, face) in Face::ALL.iter().enumerate() {
            assert_eq!(face.index(), i);
        }
    }
}
