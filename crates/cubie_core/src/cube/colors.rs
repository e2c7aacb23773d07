use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::{Face, Rgb};

/// Color for each wall of the cube, plus a neutral color for faces that are
/// not on the outside.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(default)]
#[allow(missing_docs)]
pub struct CubeColors {
    pub top: Rgb,
    pub bottom: Rgb,
    pub left: Rgb,
    pub right: Rgb,
    pub front: Rgb,
    pub back: Rgb,
    pub default: Rgb,
}
impl Default for CubeColors {
    fn default() -> Self {
        Self {
            top: Rgb::from_u32(0x719382),
            bottom: Rgb::from_u32(0xaebb8f),
            left: Rgb::from_u32(0xdc9770),
            right: Rgb::from_u32(0xcc7161),
            front: Rgb::from_u32(0x894c4a),
            back: Rgb::from_u32(0xebd79c),
            default: Rgb::from_u32(0x524744),
        }
    }
}
impl CubeColors {
    /// Returns the color of a wall.
    pub fn face(&self, face: Face) -> Rgb {
        match face {
            Face::Right => self.right,
            Face::Left => self.left,
            Face::Top => self.top,
            Face::Bottom => self.bottom,
            Face::Front => self.front,
            Face::Back => self.back,
        }
    }
}

/// Colors of the six faces of one cubie, indexed by [`Face`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FaceColors(pub [Rgb; 6]);
impl Index<Face> for FaceColors {
    type Output = Rgb;

    fn index(&self, face: Face) -> &Self::Output {
        &self.0[face as usize]
    }
}
impl IndexMut<Face> for FaceColors {
    fn index_mut(&mut self, face: Face) -> &mut Self::Output {
        &mut self.0[face as usize]
    }
}
