use std::fmt;
use std::str::FromStr;

use cgmath::Vector3;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::{Axis, ParseError, Sign};

/// One of the six faces of the assembled cube.
///
/// The discriminants follow the order in which a cubie's face materials are
/// listed: +X, -X, +Y, -Y, +Z, -Z.
#[derive(
    Serialize, Deserialize, EnumIter, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Face {
    /// +X
    #[default]
    Right = 0,
    /// -X
    Left = 1,
    /// +Y
    Top = 2,
    /// -Y
    Bottom = 3,
    /// +Z, facing the camera at startup
    Front = 4,
    /// -Z
    Back = 5,
}
impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
impl FromStr for Face {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Face::*;

        match s.trim().to_ascii_lowercase().as_str() {
            "right" | "r" => Ok(Right),
            "left" | "l" => Ok(Left),
            "top" | "u" => Ok(Top),
            "bottom" | "d" => Ok(Bottom),
            "front" | "f" => Ok(Front),
            "back" | "b" => Ok(Back),
            _ => Err(ParseError::UnknownFace(s.to_string())),
        }
    }
}
impl Face {
    /// Returns the lowercase name of the face.
    pub fn name(self) -> &'static str {
        use Face::*;

        match self {
            Right => "right",
            Left => "left",
            Top => "top",
            Bottom => "bottom",
            Front => "front",
            Back => "back",
        }
    }

    /// Returns the axis perpendicular to the face.
    pub fn axis(self) -> Axis {
        use Face::*;

        match self {
            Right | Left => Axis::X,
            Top | Bottom => Axis::Y,
            Front | Back => Axis::Z,
        }
    }
    /// Returns which end of [`Self::axis()`] the face is on.
    pub fn sign(self) -> Sign {
        use Face::*;

        match self {
            Right | Top | Front => Sign::Pos,
            Left | Bottom | Back => Sign::Neg,
        }
    }
    /// Returns the outward unit normal of the face.
    pub fn normal(self) -> Vector3<f32> {
        self.axis().unit_vec3() * self.sign().float()
    }

    /// Returns whether a cubie at `lattice` lies flush against this face.
    pub fn touches(self, lattice: Vector3<i32>) -> bool {
        self.axis().component(lattice) == self.sign().int()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_parse_face() {
        for face in Face::iter() {
            assert_eq!(face.name().parse::<Face>(), Ok(face));
        }
        assert_eq!(" F ".parse::<Face>(), Ok(Face::Front));
        assert_eq!("u".parse::<Face>(), Ok(Face::Top));
        assert_eq!(
            "middle".parse::<Face>(),
            Err(ParseError::UnknownFace("middle".to_string())),
        );
    }
}
