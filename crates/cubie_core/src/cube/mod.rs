//! The 27 cubies and the 6 wall proxies.

use std::collections::HashSet;
use std::fmt;
use std::ops::{Index, IndexMut};

use cgmath::{Quaternion, Vector3};
use itertools::{Itertools, iproduct};
use smallvec::SmallVec;
use strum::IntoEnumIterator;

mod colors;
mod cubie;
mod wall;

pub use colors::{CubeColors, FaceColors};
pub use cubie::Cubie;
pub use wall::{WALL_SIZE, WallProxy};

use crate::{Axis, Face, ParseError};

/// Number of cubies in the puzzle.
pub const CUBIE_COUNT: usize = 27;
/// Number of cubies in one layer.
pub const SLICE_SIZE: usize = 9;
/// Distance between the centers of adjacent cubies when drawn.
pub const CUBIE_SPACING: f32 = 1.075;

/// Cubies in one layer.
pub type Slice = SmallVec<[CubieId; SLICE_SIZE]>;

/// Index of a cubie, in construction order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubieId(u8);
impl fmt::Display for CubieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cubie #{}", self.0)
    }
}
impl TryFrom<usize> for CubieId {
    type Error = ParseError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        if index < CUBIE_COUNT {
            Ok(CubieId(index as u8))
        } else {
            Err(ParseError::CubieOutOfRange(index))
        }
    }
}
impl CubieId {
    /// Returns the index of the cubie.
    pub fn index(self) -> usize {
        self.0 as usize
    }
    /// Returns an iterator over all cubie IDs.
    pub fn iter() -> impl Clone + Iterator<Item = CubieId> {
        (0..CUBIE_COUNT as u8).map(CubieId)
    }
}

/// Handle to a node owned by the scene graph.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// Target of an animating turn for one cubie.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InFlightTurn {
    /// Orientation the cubie snaps to when the turn finishes.
    pub target: Quaternion<f32>,
}

/// The full puzzle: cubies, walls, and in-flight turn records.
#[derive(Debug, Clone)]
pub struct Cube {
    cubies: Vec<Cubie>,
    walls: Vec<WallProxy>,
    in_flight: Vec<InFlightTurn>,
}
impl Index<CubieId> for Cube {
    type Output = Cubie;

    fn index(&self, id: CubieId) -> &Self::Output {
        &self.cubies[id.index()]
    }
}
impl IndexMut<CubieId> for Cube {
    fn index_mut(&mut self, id: CubieId) -> &mut Self::Output {
        &mut self.cubies[id.index()]
    }
}
impl Default for Cube {
    fn default() -> Self {
        Self::new(&CubeColors::default())
    }
}
impl Cube {
    /// Constructs a solved cube.
    pub fn new(colors: &CubeColors) -> Self {
        let cubies = iproduct!(-1..=1, -1..=1, -1..=1)
            .map(|(x, y, z)| Cubie::new(Vector3::new(x, y, z), colors))
            .collect_vec();
        debug_assert_eq!(cubies.len(), CUBIE_COUNT);

        Self {
            cubies,
            walls: Face::iter().map(WallProxy::new).collect(),
            in_flight: vec![],
        }
    }

    /// Returns all cubies, in ID order.
    pub fn cubies(&self) -> &[Cubie] {
        &self.cubies
    }
    /// Returns an iterator over all cubies and their IDs.
    pub fn iter(&self) -> impl Iterator<Item = (CubieId, &Cubie)> {
        CubieId::iter().zip(&self.cubies)
    }
    /// Returns an iterator over all cubies and their IDs, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (CubieId, &mut Cubie)> {
        CubieId::iter().zip(&mut self.cubies)
    }

    /// Returns all wall proxies, in [`Face`] order.
    pub fn walls(&self) -> &[WallProxy] {
        &self.walls
    }
    /// Returns the wall proxy for a face.
    pub fn wall(&self, face: Face) -> &WallProxy {
        &self.walls[face as usize]
    }

    /// Returns the cubie currently occupying a lattice point.
    pub fn cubie_at(&self, lattice: Vector3<i32>) -> Option<CubieId> {
        self.iter()
            .find(|(_, cubie)| cubie.lattice() == lattice)
            .map(|(id, _)| id)
    }

    /// Returns every cubie whose coordinate along `axis` equals
    /// `coordinate`.
    pub fn select_slice(&self, axis: Axis, coordinate: i32) -> Slice {
        self.iter()
            .filter(|(_, cubie)| axis.component(cubie.lattice()) == coordinate)
            .map(|(id, _)| id)
            .collect()
    }

    /// Returns whether the cubies occupy exactly the 27 lattice points, one
    /// each.
    pub fn is_permutation(&self) -> bool {
        let occupied: HashSet<[i32; 3]> = self.cubies.iter().map(|c| c.lattice().into()).collect();
        occupied.len() == CUBIE_COUNT
            && occupied
                .iter()
                .all(|p| p.iter().all(|c| (-1..=1).contains(c)))
    }

    /// Returns whether every cubie is back in its initial slot.
    pub fn is_at_initial_lattice(&self) -> bool {
        self.cubies
            .iter()
            .all(|c| c.lattice() == c.initial_lattice())
    }

    /// Moves every cubie's logical slot back to where it started.
    pub fn reset_lattice(&mut self) {
        for cubie in &mut self.cubies {
            let initial = cubie.initial_lattice();
            cubie.set_lattice(initial);
        }
    }

    /// Records the orientation a cubie will have when the current turn
    /// finishes.
    pub(crate) fn begin_in_flight(&mut self, id: CubieId, target: Quaternion<f32>) {
        let index = self.in_flight.len();
        self.in_flight.push(InFlightTurn { target });
        self[id].in_flight = Some(index);
    }
    /// Returns the in-flight record for a cubie, if it is turning.
    pub fn in_flight(&self, id: CubieId) -> Option<&InFlightTurn> {
        self[id].in_flight.map(|i| &self.in_flight[i])
    }
    /// Drops every in-flight record.
    pub(crate) fn clear_in_flight(&mut self) {
        self.in_flight.clear();
        for cubie in &mut self.cubies {
            cubie.in_flight = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_cube_construction() {
        let cube = Cube::default();
        assert_eq!(cube.cubies().len(), CUBIE_COUNT);
        assert_eq!(cube.walls().len(), 6);
        assert!(cube.is_permutation());
        assert!(cube.is_at_initial_lattice());

        // Enumeration order is x, then y, then z.
        assert_eq!(cube.cubies()[0].lattice(), Vector3::new(-1, -1, -1));
        assert_eq!(cube.cubies()[1].lattice(), Vector3::new(-1, -1, 0));
        assert_eq!(cube.cubies()[26].lattice(), Vector3::new(1, 1, 1));
    }

    #[test]
    fn test_cubie_face_colors() {
        let colors = CubeColors::default();
        let cube = Cube::new(&colors);

        let count_by_colored_faces = cube
            .cubies()
            .iter()
            .map(|c| c.colored_face_count())
            .counts();
        assert_eq!(count_by_colored_faces[&3], 8); // corners
        assert_eq!(count_by_colored_faces[&2], 12); // edges
        assert_eq!(count_by_colored_faces[&1], 6); // centers
        assert_eq!(count_by_colored_faces[&0], 1); // core

        let corner = &cube[cube.cubie_at(Vector3::new(1, 1, 1)).expect("corner")];
        assert_eq!(corner.colors()[Face::Right], colors.right);
        assert_eq!(corner.colors()[Face::Top], colors.top);
        assert_eq!(corner.colors()[Face::Front], colors.front);
        assert_eq!(corner.colors()[Face::Left], colors.default);

        let core = &cube[cube.cubie_at(Vector3::new(0, 0, 0)).expect("core")];
        assert_eq!(core.colors().0, [colors.default; 6]);
    }

    #[test]
    fn test_select_slice() {
        let cube = Cube::default();
        for axis in Axis::iter() {
            for coordinate in -1..=1 {
                let slice = cube.select_slice(axis, coordinate);
                assert_eq!(slice.len(), SLICE_SIZE);
                assert!(
                    slice
                        .iter()
                        .all(|&id| axis.component(cube[id].lattice()) == coordinate)
                );
            }
        }
    }

    #[test]
    fn test_cubie_id_range() {
        assert!(CubieId::try_from(26).is_ok());
        assert_eq!(
            CubieId::try_from(27),
            Err(ParseError::CubieOutOfRange(27)),
        );
    }
}
