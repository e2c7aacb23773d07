use std::f32::consts::{FRAC_PI_2, PI};

use cgmath::{Quaternion, Rad, Rotation3, Vector3};

use crate::{Axis, Face, Sign};

/// Side length of a wall proxy.
pub const WALL_SIZE: f32 = 3.0;

/// Invisible picking plane for one face of the cube.
///
/// Walls pass through the cube center and never move. They classify the
/// direction of a drag that starts on them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WallProxy {
    face: Face,
    /// How the plane is mounted. The unrotated plane spans local X and Y and
    /// faces +Z.
    orientation: Quaternion<f32>,
    /// For each world axis of the drag displacement, the requested turn axis
    /// and a sign multiplier.
    axis_map: [(Axis, Sign); 3],
}
impl WallProxy {
    /// Constructs the wall proxy for a face.
    pub fn new(face: Face) -> Self {
        use Axis::*;
        use Sign::*;

        let about = |axis: Axis, angle: f32| Quaternion::from_axis_angle(axis.unit_vec3(), Rad(angle));

        let (orientation, axis_map) = match face {
            Face::Right => (about(Y, FRAC_PI_2), [(X, Pos), (Z, Neg), (X, Pos)]),
            Face::Left => (about(Y, -FRAC_PI_2), [(X, Pos), (Z, Pos), (X, Neg)]),
            Face::Top => (about(X, -FRAC_PI_2), [(Z, Pos), (Y, Pos), (Y, Neg)]),
            Face::Bottom => (about(X, FRAC_PI_2), [(Z, Neg), (Y, Pos), (Y, Pos)]),
            Face::Front => (about(X, 0.0), [(X, Neg), (Y, Pos), (Z, Pos)]),
            Face::Back => (about(X, PI), [(X, Pos), (Y, Neg), (Z, Neg)]),
        };

        Self {
            face,
            orientation,
            axis_map,
        }
    }

    /// Returns the face this wall stands in for.
    pub fn face(&self) -> Face {
        self.face
    }
    /// Returns the mounting rotation of the plane.
    pub fn orientation(&self) -> Quaternion<f32> {
        self.orientation
    }
    /// Returns the direction the visible side of the plane faces.
    pub fn normal(&self) -> Vector3<f32> {
        self.orientation * Vector3::unit_z()
    }

    /// Maps the dominant axis of a drag displacement to the requested turn
    /// axis and a sign multiplier.
    ///
    /// The entry for the wall's own normal axis is never reached by a real
    /// drag, since the displacement lies in the plane.
    pub fn map_drag_axis(&self, drag_axis: Axis) -> (Axis, Sign) {
        self.axis_map[drag_axis as usize]
    }
}
