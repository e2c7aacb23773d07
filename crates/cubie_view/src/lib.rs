//! Interaction and orchestration for the cubie puzzle: pointer gestures,
//! scrambles, the solve animation, and the per-frame simulation that ties
//! them to a scene graph and camera.

mod camera;
pub mod gesture;
mod scene;
mod scramble;
mod simulation;
mod solve;

pub use camera::OrbitCamera;
pub use gesture::{DragAnchor, GestureResolver, PointerEvent, PRIMARY_BUTTON};
pub use scene::{CameraControl, CubieMesh, NodeTransform, SceneGraph};
pub use scramble::{ScrambleParams, Scrambler};
pub use simulation::CubeSimulation;
pub use solve::SolveAnimation;
