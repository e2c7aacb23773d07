//! Cube state machine for an animated 3x3x3 twisty puzzle.
//!
//! The puzzle is made of 27 [`Cubie`]s on the integer lattice
//! `{-1, 0, 1}³`. Layer turns are animated by a frame-driven
//! [`TransitionScheduler`], and at most one animated operation runs at a time
//! (see [`PlayState`]).

pub mod cube;
mod errors;
mod face;
pub mod math;
pub mod pick;
mod rgb;
mod state;
pub mod transition;
mod turn;


pub use cube::{Cube, CubeColors, Cubie, CubieId, FaceColors, InFlightTurn, NodeId, WallProxy};
pub use errors::ParseError;
pub use face::Face;
pub use math::{Axis, Sign};
pub use pick::{PickTarget, Ray, RayHit};
pub use rgb::Rgb;
pub use state::{PlayState, Puzzle, PuzzleEvent, SolvePhase};
pub use transition::{TransitionScheduler, TransitionTick};
pub use turn::{TURN_ANGLE, TurnRequest};

/// Default duration of a single layer turn.
pub const DEFAULT_TURN_DURATION: web_time::Duration = web_time::Duration::from_millis(150);
