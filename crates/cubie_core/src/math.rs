//! Axes, signs, and quaternion helpers.

use std::fmt;
use std::ops::{Mul, Neg};

use cgmath::{InnerSpace, Quaternion, Vector3};

/// 3-dimensional axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// X axis (right).
    X = 0,
    /// Y axis (up).
    Y = 1,
    /// Z axis (towards the camera).
    Z = 2,
}
impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}
impl Axis {
    /// All three axes, in order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns an iterator over all axes.
    pub fn iter() -> impl Clone + Iterator<Item = Axis> {
        Self::ALL.into_iter()
    }

    /// Returns the axis held constant when turning a layer in response to a
    /// request along `self`.
    ///
    /// Drag axes and rotation axes are related by the fixed table
    /// `x → y`, `y → x`, `z → z`. This is not a general permutation.
    pub fn complementary(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
            Axis::Z => Axis::Z,
        }
    }

    /// Returns the unit vector along this axis.
    pub fn unit_vec3(self) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::unit_x(),
            Axis::Y => Vector3::unit_y(),
            Axis::Z => Vector3::unit_z(),
        }
    }

    /// Returns the component of `v` along this axis.
    pub fn component<T: Copy>(self, v: Vector3<T>) -> T {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }
}

/// Positive or negative; the direction of a quarter turn.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    /// Negative.
    Neg = -1,
    /// Positive.
    #[default]
    Pos = 1,
}
impl Neg for Sign {
    type Output = Sign;
    fn neg(self) -> Sign {
        match self {
            Sign::Neg => Sign::Pos,
            Sign::Pos => Sign::Neg,
        }
    }
}
impl Mul<Sign> for Sign {
    type Output = Sign;
    fn mul(self, rhs: Sign) -> Sign {
        match self {
            Sign::Neg => -rhs,
            Sign::Pos => rhs,
        }
    }
}
impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.int())
    }
}
impl Sign {
    /// Returns the sign of `x`, treating zero as positive.
    pub fn of(x: f32) -> Sign {
        if x < 0.0 { Sign::Neg } else { Sign::Pos }
    }
    /// Returns an integer representation of the sign (either -1 or 1).
    pub const fn int(self) -> i32 {
        match self {
            Sign::Neg => -1,
            Sign::Pos => 1,
        }
    }
    /// Returns a floating-point representation of the sign (either -1.0 or
    /// 1.0).
    pub const fn float(self) -> f32 {
        self.int() as f32
    }
    /// Returns an iterator over both signs.
    pub fn iter() -> impl Clone + Iterator<Item = Sign> {
        [Sign::Neg, Sign::Pos].into_iter()
    }
}

/// Returns the identity rotation.
pub fn identity() -> Quaternion<f32> {
    Quaternion::new(1.0, 0.0, 0.0, 0.0)
}

/// Returns the angle of the smallest rotation taking `a` to `b`, in radians.
pub fn angle_between(a: Quaternion<f32>, b: Quaternion<f32>) -> f32 {
    2.0 * a.dot(b).abs().clamp(-1.0, 1.0).acos()
}

/// Rotates `from` toward `to` by at most `step` radians along the shortest
/// arc. Never overshoots `to`.
pub fn rotate_towards(from: Quaternion<f32>, to: Quaternion<f32>, step: f32) -> Quaternion<f32> {
    let angle = angle_between(from, to);
    if angle <= f32::EPSILON {
        return to;
    }
    let t = (step / angle).clamp(0.0, 1.0);
    // `q` and `-q` are the same rotation; pick the nearer one.
    let to = if from.dot(to) < 0.0 { -to } else { to };
    from.slerp(to, t).normalize()
}

/// Converts an integer lattice point to floating-point coordinates.
pub fn lattice_to_f32(v: Vector3<i32>) -> Vector3<f32> {
    Vector3::new(v.x as f32, v.y as f32, v.z as f32)
}

/// Rounds each coordinate to the nearest integer.
pub fn round_to_lattice(v: Vector3<f32>) -> Vector3<i32> {
    Vector3::new(v.x.round() as i32, v.y.round() as i32, v.z.round() as i32)
}
