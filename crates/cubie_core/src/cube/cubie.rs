use cgmath::{Quaternion, Vector3};
use strum::IntoEnumIterator;

use super::{CUBIE_SPACING, CubeColors, FaceColors, NodeId};
use crate::Face;
use crate::math::{self, lattice_to_f32};

/// One of the 27 unit sub-cubes.
#[derive(Debug, Clone, PartialEq)]
pub struct Cubie {
    /// Logical slot, updated on every turn that includes this cubie.
    lattice: Vector3<i32>,
    /// Logical slot at construction.
    initial_lattice: Vector3<i32>,

    /// Live orientation. Turns compose onto it; they never replace it.
    pub orientation: Quaternion<f32>,
    /// Offset of the rendered cubie from its resting place. Zero except while
    /// solving.
    pub position: Vector3<f32>,

    colors: FaceColors,
    /// Handle to the scene node that draws this cubie. The scene owns the
    /// node.
    pub node: Option<NodeId>,

    /// Index into the cube's in-flight turn records while a turn is animating.
    pub(crate) in_flight: Option<usize>,
}
impl Cubie {
    pub(super) fn new(lattice: Vector3<i32>, palette: &CubeColors) -> Self {
        let mut colors = FaceColors([palette.default; 6]);
        for face in Face::iter().filter(|face| face.touches(lattice)) {
            colors[face] = palette.face(face);
        }

        Self {
            lattice,
            initial_lattice: lattice,

            orientation: math::identity(),
            position: Vector3::new(0.0, 0.0, 0.0),

            colors,
            node: None,

            in_flight: None,
        }
    }

    /// Returns the current logical slot.
    pub fn lattice(&self) -> Vector3<i32> {
        self.lattice
    }
    pub(crate) fn set_lattice(&mut self, lattice: Vector3<i32>) {
        self.lattice = lattice;
    }
    /// Returns the logical slot at construction.
    pub fn initial_lattice(&self) -> Vector3<i32> {
        self.initial_lattice
    }
    /// Returns the colors of each face, as assigned at construction.
    pub fn colors(&self) -> &FaceColors {
        &self.colors
    }
    /// Returns the number of faces that show a wall color.
    pub fn colored_face_count(&self) -> usize {
        Face::iter()
            .filter(|&face| face.touches(self.initial_lattice))
            .count()
    }

    /// Returns whether a turn involving this cubie is currently animating.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns the center of the unrotated cubie mesh, relative to the cube
    /// center.
    pub fn mesh_offset(&self) -> Vector3<f32> {
        lattice_to_f32(self.initial_lattice) * CUBIE_SPACING
    }
    /// Returns where the cubie is currently drawn.
    pub fn world_center(&self) -> Vector3<f32> {
        self.position + self.orientation * self.mesh_offset()
    }
}
