//! Running the simulation without a window.

use cubie_core::{NodeId, PlayState, Puzzle, TurnRequest};
use cubie_view::{CubeSimulation, CubieMesh, NodeTransform, SceneGraph};
use eyre::{Result, bail};
use serde::Serialize;
use web_time::Duration;

/// Time between frames, for 60 frames per second.
const FRAME_TIME: Duration = Duration::from_micros(16_667);
/// Frames after which an animation is assumed to be stuck.
const MAX_FRAMES: usize = 100_000;

/// Scene graph that only remembers the latest transform of each node.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    nodes: Vec<(CubieMesh, Option<NodeTransform>)>,
    frames_rendered: usize,
}
impl SceneGraph for HeadlessScene {
    fn add_node(&mut self, mesh: CubieMesh) -> NodeId {
        self.nodes.push((mesh, None));
        NodeId(self.nodes.len() as u32 - 1)
    }
    fn set_transform(&mut self, node: NodeId, transform: NodeTransform) {
        match self.nodes.get_mut(node.0 as usize) {
            Some((_, t)) => *t = Some(transform),
            None => log::warn!("no scene node {node:?}"),
        }
    }
    fn render_frame(&mut self) {
        self.frames_rendered += 1;
    }
}

/// Frame clock that advances by a fixed step.
#[derive(Debug, Default)]
pub struct FrameClock {
    now: Duration,
}
impl FrameClock {
    /// Renders frames until no animation is running. Returns the number of
    /// frames rendered.
    pub fn run_until_idle(
        &mut self,
        sim: &mut CubeSimulation,
        scene: &mut HeadlessScene,
    ) -> Result<usize> {
        let mut frames = 0;
        while sim.is_animating() {
            if frames >= MAX_FRAMES {
                bail!("animation did not finish after {frames} frames");
            }
            sim.frame(self.now);
            sim.sync_scene(scene);
            self.now += FRAME_TIME;
            frames += 1;
        }
        log::trace!("idle after {frames} frames ({} rendered total)", scene.frames_rendered);
        Ok(frames)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TurnSnapshot {
    pub cubie: usize,
    pub axis: String,
    pub direction: i32,
}
impl From<&TurnRequest> for TurnSnapshot {
    fn from(request: &TurnRequest) -> Self {
        Self {
            cubie: request.cubie.index(),
            axis: request.axis.to_string(),
            direction: request.direction.int(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CubieSnapshot {
    pub id: usize,
    pub lattice: [i32; 3],
    pub initial_lattice: [i32; 3],
    /// `[w, x, y, z]`
    pub orientation: [f32; 4],
    pub position: [f32; 3],
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CubeSnapshot {
    pub state: String,
    pub at_initial_lattice: bool,
    pub cubies: Vec<CubieSnapshot>,
}
impl CubeSnapshot {
    pub fn new(puzzle: &Puzzle) -> Self {
        let cube = puzzle.cube();
        let state = match puzzle.state() {
            PlayState::Idle => "idle".to_string(),
            other => format!("{other:?}"),
        };
        Self {
            state,
            at_initial_lattice: cube.is_at_initial_lattice(),
            cubies: cube
                .iter()
                .map(|(id, cubie)| {
                    let q = cubie.orientation;
                    CubieSnapshot {
                        id: id.index(),
                        lattice: cubie.lattice().into(),
                        initial_lattice: cubie.initial_lattice().into(),
                        orientation: [q.s, q.v.x, q.v.y, q.v.z],
                        position: cubie.position.into(),
                    }
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use cubie_view::ScrambleParams;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_headless_scramble_and_solve() {
        let mut sim = CubeSimulation::default();
        let mut scene = HeadlessScene::default();
        sim.attach(&mut scene);
        let mut clock = FrameClock::default();

        assert!(sim.randomize(ScrambleParams::new("headless")));
        let frames = clock.run_until_idle(&mut sim, &mut scene).unwrap();
        // Each turn needs at least one frame to set its time origin and nine
        // more to cover 150 ms.
        assert!(frames >= 30 * 10);
        assert_eq!(scene.frames_rendered, frames);

        let snapshot = CubeSnapshot::new(sim.puzzle());
        assert_eq!(snapshot.state, "idle");
        assert_eq!(snapshot.cubies.len(), 27);

        assert!(sim.solve());
        clock.run_until_idle(&mut sim, &mut scene).unwrap();
        let snapshot = CubeSnapshot::new(sim.puzzle());
        assert!(snapshot.at_initial_lattice);
        for (cubie, (_, transform)) in snapshot.cubies.iter().zip(&scene.nodes) {
            assert_eq!(cubie.orientation, [1.0, 0.0, 0.0, 0.0]);
            assert_eq!(transform.map(|t| t.position), Some(cgmath::Vector3::new(0.0, 0.0, 0.0)));
        }
    }

    #[test]
    fn test_turn_snapshot() {
        let request = TurnRequest {
            cubie: cubie_core::CubieId::try_from(4).unwrap(),
            axis: cubie_core::Axis::Z,
            direction: cubie_core::Sign::Neg,
        };
        assert_eq!(
            TurnSnapshot::from(&request),
            TurnSnapshot {
                cubie: 4,
                axis: "z".to_string(),
                direction: -1,
            },
        );
    }
}
