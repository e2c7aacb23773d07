use std::sync::mpsc;

use web_time::Duration;

use crate::{Cube, DEFAULT_TURN_DURATION, TurnRequest};

/// Stage of the solve animation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SolvePhase {
    /// Cubies fly outward from the center.
    Explode,
    /// Cubies stay exploded for a moment.
    Hold,
    /// Cubies fly back to the center while unrotating.
    Implode,
}

/// Which animated operation, if any, currently owns the puzzle.
///
/// Only one operation runs at a time. Every entry point that starts one must
/// go through [`Puzzle::try_begin()`], which succeeds only from
/// [`PlayState::Idle`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PlayState {
    /// Accepting input.
    #[default]
    Idle,
    /// A single layer turn requested by the user is animating.
    TurningSlice,
    /// A scramble sequence is running.
    Scrambling,
    /// The solve animation is running.
    Solving(SolvePhase),
}

/// Notification sent when an animated step finishes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PuzzleEvent {
    /// A layer turn has reached its final frame.
    TurnComplete(TurnRequest),
    /// A phase of the solve animation has reached its final frame.
    SolvePhaseComplete(SolvePhase),
}

/// Cube plus the state that guards it. This is the context that transition
/// callbacks mutate.
#[derive(Debug)]
pub struct Puzzle {
    cube: Cube,
    state: PlayState,
    events: mpsc::Sender<PuzzleEvent>,
    pub(crate) turn_duration: Duration,
}
impl Puzzle {
    /// Wraps a cube and returns the receiving end of its event channel.
    pub fn new(cube: Cube) -> (Self, mpsc::Receiver<PuzzleEvent>) {
        let (events, rx) = mpsc::channel();
        let puzzle = Self {
            cube,
            state: PlayState::Idle,
            events,
            turn_duration: DEFAULT_TURN_DURATION,
        };
        (puzzle, rx)
    }
    /// Sets how long each layer turn takes to animate.
    #[must_use]
    pub fn with_turn_duration(mut self, turn_duration: Duration) -> Self {
        self.turn_duration = turn_duration;
        self
    }

    /// Returns the cube.
    pub fn cube(&self) -> &Cube {
        &self.cube
    }
    /// Returns the cube mutably.
    pub fn cube_mut(&mut self) -> &mut Cube {
        &mut self.cube
    }

    /// Returns the operation currently running.
    pub fn state(&self) -> PlayState {
        self.state
    }
    /// Returns whether a new operation may start.
    pub fn can_play(&self) -> bool {
        self.state == PlayState::Idle
    }

    /// Claims the puzzle for `op`. Returns `false` (and changes nothing) if
    /// another operation is running.
    pub fn try_begin(&mut self, op: PlayState) -> bool {
        if op == PlayState::Idle {
            return false;
        }
        if !self.can_play() {
            log::trace!("ignoring {op:?} while {:?}", self.state);
            return false;
        }
        self.state = op;
        true
    }
    /// Moves a running operation from one stage to the next. Returns `false`
    /// if `from` is not the current state.
    pub fn advance(&mut self, from: PlayState, to: PlayState) -> bool {
        if self.state != from || from == PlayState::Idle {
            log::warn!("cannot advance from {from:?} to {to:?} while {:?}", self.state);
            return false;
        }
        self.state = to;
        true
    }
    /// Releases the puzzle if `op` is the operation holding it.
    pub fn finish(&mut self, op: PlayState) {
        if self.state == op {
            self.state = PlayState::Idle;
        } else {
            log::warn!("{op:?} finished while {:?}", self.state);
        }
    }

    /// Notifies listeners.
    pub fn emit(&self, event: PuzzleEvent) {
        // ignore channel error; nobody is listening
        let _ = self.events.send(event);
    }
}
