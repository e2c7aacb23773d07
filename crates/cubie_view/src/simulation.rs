use std::sync::mpsc;

use cubie_core::{Cube, PlayState, Puzzle, PuzzleEvent, TransitionScheduler, TurnRequest};
use cubie_prefs::Preferences;
use web_time::Duration;

use crate::{
    CameraControl, CubieMesh, GestureResolver, NodeTransform, PointerEvent, SceneGraph,
    ScrambleParams, Scrambler, SolveAnimation,
};

/// Puzzle simulation, which owns the puzzle state and drives its animations
/// once per rendered frame.
#[derive(Debug)]
pub struct CubeSimulation {
    puzzle: Puzzle,
    scheduler: TransitionScheduler<Puzzle>,
    /// Events sent by transition callbacks, drained every frame.
    events: mpsc::Receiver<PuzzleEvent>,
    subscribers: Vec<mpsc::Sender<PuzzleEvent>>,

    gesture: GestureResolver,
    solve: SolveAnimation,

    scramble_moves: usize,
    /// Latest scramble, including one that is still running.
    scramble: Option<Scrambler>,
}
impl Default for CubeSimulation {
    fn default() -> Self {
        Self::new(&Preferences::default())
    }
}
impl CubeSimulation {
    /// Constructs a simulation of a solved cube.
    pub fn new(prefs: &Preferences) -> Self {
        let (puzzle, events) = Puzzle::new(Cube::new(&prefs.colors));
        let puzzle = puzzle.with_turn_duration(prefs.animation.turn_duration());

        Self {
            puzzle,
            scheduler: TransitionScheduler::new(),
            events,
            subscribers: vec![],

            gesture: GestureResolver::new(prefs.interaction.drag_threshold),
            solve: SolveAnimation::from_prefs(&prefs.animation),

            scramble_moves: prefs.interaction.scramble_moves,
            scramble: None,
        }
    }

    /// Returns the puzzle state.
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }
    /// Returns the cube.
    pub fn cube(&self) -> &Cube {
        self.puzzle.cube()
    }
    /// Returns whether a new operation may start.
    pub fn can_play(&self) -> bool {
        self.puzzle.can_play()
    }
    /// Returns whether any transition is still running.
    pub fn is_animating(&self) -> bool {
        !self.scheduler.is_empty()
    }
    /// Returns the gesture resolver.
    pub fn gesture(&self) -> &GestureResolver {
        &self.gesture
    }

    /// Returns the latest scramble, or `None` if the puzzle has never been
    /// scrambled.
    pub fn scramble(&self) -> Option<&Scrambler> {
        self.scramble.as_ref()
    }

    /// Returns a channel that receives every event after the simulation has
    /// handled it.
    pub fn subscribe(&mut self) -> mpsc::Receiver<PuzzleEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Advances every animation to `now`, then handles the events they sent.
    ///
    /// `now` must come from a clock that is shared by all frames.
    pub fn frame(&mut self, now: Duration) {
        self.scheduler.tick(&mut self.puzzle, now);

        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
            self.subscribers.retain(|tx| tx.send(event).is_ok());
        }
    }

    fn handle_event(&mut self, event: PuzzleEvent) {
        match event {
            PuzzleEvent::TurnComplete(_) => {
                if self.puzzle.state() == PlayState::Scrambling {
                    self.continue_scramble();
                }
            }
            PuzzleEvent::SolvePhaseComplete(phase) => {
                self.solve
                    .on_phase_complete(phase, &self.puzzle, &mut self.scheduler);
            }
        }
    }

    /// Turns one layer. Returns `false` if another operation is running.
    pub fn rotate_slice(&mut self, request: TurnRequest) -> bool {
        self.puzzle.rotate_slice(&mut self.scheduler, request)
    }

    /// Starts the solve animation. Does nothing if another operation is
    /// running.
    pub fn solve(&mut self) -> bool {
        self.solve.begin(&mut self.puzzle, &mut self.scheduler)
    }

    /// Starts a scramble with the configured number of turns. Does nothing if
    /// another operation is running.
    pub fn randomize(&mut self, params: ScrambleParams) -> bool {
        if !self.puzzle.try_begin(PlayState::Scrambling) {
            return false;
        }
        log::info!(
            "scrambling with {} turns from seed {:?}",
            self.scramble_moves,
            params.seed,
        );
        self.scramble = Some(Scrambler::new(params, self.scramble_moves));
        self.continue_scramble();
        true
    }

    /// Issues the next scramble turn, or releases the puzzle if there are no
    /// more.
    fn continue_scramble(&mut self) {
        let next = self.scramble.as_mut().and_then(Scrambler::next_request);
        match next {
            Some(request) => {
                self.puzzle.turn(&mut self.scheduler, request);
            }
            None => {
                self.puzzle.finish(PlayState::Scrambling);
                log::info!("scramble finished");
            }
        }
    }

    /// Handles a pointer press.
    pub fn pointer_down(&mut self, camera: &mut dyn CameraControl, event: PointerEvent) {
        self.gesture.pointer_down(&self.puzzle, camera, event);
    }
    /// Handles pointer motion. Returns the turn it started, if any.
    pub fn pointer_move(
        &mut self,
        camera: &dyn CameraControl,
        event: PointerEvent,
    ) -> Option<TurnRequest> {
        self.gesture
            .pointer_move(&mut self.puzzle, &mut self.scheduler, camera, event)
    }
    /// Handles a pointer release.
    pub fn pointer_up(&mut self, camera: &mut dyn CameraControl) {
        self.gesture.pointer_up(camera);
    }

    /// Adds a node to `scene` for each cubie that does not have one yet.
    pub fn attach(&mut self, scene: &mut dyn SceneGraph) {
        for (id, cubie) in self.puzzle.cube_mut().iter_mut() {
            if cubie.node.is_some() {
                continue;
            }
            let node = scene.add_node(CubieMesh {
                cubie: id,
                colors: *cubie.colors(),
                offset: cubie.mesh_offset(),
                size: 1.0,
            });
            cubie.node = Some(node);
        }
    }

    /// Pushes every cubie's transform to `scene` and renders a frame.
    pub fn sync_scene(&self, scene: &mut dyn SceneGraph) {
        for (_, cubie) in self.cube().iter() {
            if let Some(node) = cubie.node {
                scene.set_transform(
                    node,
                    NodeTransform {
                        position: cubie.position,
                        orientation: cubie.orientation,
                    },
                );
            }
        }
        scene.render_frame();
    }
}
