//! Layer turns.

use std::f32::consts::FRAC_PI_2;
use std::fmt;

use cgmath::{InnerSpace, Quaternion, Rad, Rotation3};

use crate::cube::Slice;
use crate::math::{lattice_to_f32, rotate_towards, round_to_lattice};
use crate::{Axis, CubieId, PlayState, Puzzle, PuzzleEvent, Sign, TransitionScheduler};

/// Angle of a single layer turn.
pub const TURN_ANGLE: f32 = FRAC_PI_2;

/// Request to turn the layer containing a cubie.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TurnRequest {
    /// Any cubie in the layer to turn.
    pub cubie: CubieId,
    /// Requested axis. The layer is selected and rotated about
    /// [`Axis::complementary()`] of this axis.
    pub axis: Axis,
    /// Direction of the quarter turn.
    pub direction: Sign,
}
impl fmt::Display for TurnRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            cubie,
            axis,
            direction,
        } = self;
        write!(f, "{cubie} along {axis} ({direction})")
    }
}
impl TurnRequest {
    /// Returns the axis that is held constant to select the layer, which is
    /// also the axis of rotation.
    pub fn slice_axis(self) -> Axis {
        self.axis.complementary()
    }
    /// Returns the world-space rotation applied by the turn.
    pub fn rotation(self) -> Quaternion<f32> {
        Quaternion::from_axis_angle(
            self.slice_axis().unit_vec3(),
            Rad(self.direction.float() * TURN_ANGLE),
        )
    }
}

impl Puzzle {
    /// Turns the layer containing `request.cubie`, if no other operation is
    /// running. Returns whether the turn was started.
    ///
    /// The logical state changes immediately. The visible orientation of the
    /// layer animates over the configured turn duration, after which the
    /// puzzle accepts input again and [`PuzzleEvent::TurnComplete`] is sent.
    pub fn rotate_slice(
        &mut self,
        scheduler: &mut TransitionScheduler<Puzzle>,
        request: TurnRequest,
    ) -> bool {
        if !self.try_begin(PlayState::TurningSlice) {
            return false;
        }
        self.turn(scheduler, request);
        true
    }

    /// Turns a layer on behalf of an operation that already holds the puzzle
    /// (see [`Puzzle::try_begin()`]). Returns the cubies in the layer, or an
    /// empty slice if nothing holds the puzzle.
    ///
    /// If the holding operation is [`PlayState::TurningSlice`], the puzzle is
    /// released when the turn finishes. Any other operation is responsible
    /// for releasing it, typically on [`PuzzleEvent::TurnComplete`].
    pub fn turn(
        &mut self,
        scheduler: &mut TransitionScheduler<Puzzle>,
        request: TurnRequest,
    ) -> Slice {
        if self.can_play() {
            log::warn!("ignoring {request} because nothing holds the puzzle");
            return Slice::new();
        }

        let slice_axis = request.slice_axis();
        let rotation = request.rotation();
        let coordinate = slice_axis.component(self.cube()[request.cubie].lattice());
        let slice = self.cube().select_slice(slice_axis, coordinate);

        let cube = self.cube_mut();
        for &id in &slice {
            let cubie = &mut cube[id];
            // Premultiply so that the rotation is about the fixed world axis,
            // not the cubie's local axis.
            let target = (rotation * cubie.orientation).normalize();
            let lattice = round_to_lattice(rotation * lattice_to_f32(cubie.lattice()));
            cubie.set_lattice(lattice);
            cube.begin_in_flight(id, target);
        }
        log::debug!("turning {} cubies for {request}", slice.len());

        let moving = slice.clone();
        scheduler.schedule(self.turn_duration, move |puzzle: &mut Puzzle, tick| {
            if tick.is_complete() {
                puzzle.complete_turn(&moving, request);
            } else {
                let step = tick.ratio_delta * TURN_ANGLE;
                let cube = puzzle.cube_mut();
                for &id in &moving {
                    if let Some(in_flight) = cube.in_flight(id).copied() {
                        let cubie = &mut cube[id];
                        cubie.orientation = rotate_towards(cubie.orientation, in_flight.target, step);
                    }
                }
            }
        });

        slice
    }

    fn complete_turn(&mut self, slice: &[CubieId], request: TurnRequest) {
        let cube = self.cube_mut();
        for &id in slice {
            if let Some(in_flight) = cube.in_flight(id).copied() {
                cube[id].orientation = in_flight.target;
            }
        }
        cube.clear_in_flight();

        if self.state() == PlayState::TurningSlice {
            self.finish(PlayState::TurningSlice);
        }
        log::debug!("finished {request}");
        self.emit(PuzzleEvent::TurnComplete(request));
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector3;
    use pretty_assertions::assert_eq;
    use web_time::Duration;

    use super::*;
    use crate::math::angle_between;
    use crate::{Cube, CubieId};

    const FRAME: Duration = Duration::from_millis(16);

    fn run_until_idle(puzzle: &mut Puzzle, scheduler: &mut TransitionScheduler<Puzzle>, now: &mut Duration) {
        while !scheduler.is_empty() {
            scheduler.tick(puzzle, *now);
            *now += FRAME;
        }
    }

    fn cubie_at(puzzle: &Puzzle, x: i32, y: i32, z: i32) -> CubieId {
        puzzle
            .cube()
            .cubie_at(Vector3::new(x, y, z))
            .expect("lattice point is occupied")
    }

    #[test]
    fn test_turn_moves_one_layer() {
        let (mut puzzle, rx) = Puzzle::new(Cube::default());
        let mut scheduler = TransitionScheduler::new();
        let mut now = Duration::ZERO;

        let request = TurnRequest {
            cubie: cubie_at(&puzzle, 1, 1, 1),
            axis: Axis::X,
            direction: Sign::Pos,
        };
        assert!(puzzle.rotate_slice(&mut scheduler, request));
        assert!(!puzzle.can_play());

        // The top layer (y = 1) turns about +Y, taking +Z to +X.
        let moving = CubieId::iter()
            .filter(|&id| puzzle.cube()[id].is_in_flight())
            .count();
        assert_eq!(moving, 9);
        let front_top = cubie_at(&puzzle, 1, 1, -1);
        assert_eq!(puzzle.cube()[front_top].initial_lattice(), Vector3::new(1, 1, 1));

        run_until_idle(&mut puzzle, &mut scheduler, &mut now);
        assert!(puzzle.can_play());
        assert!(puzzle.cube().is_permutation());
        assert_eq!(rx.try_recv(), Ok(PuzzleEvent::TurnComplete(request)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_orientation_snaps_to_exact_target() {
        let (mut puzzle, _rx) = Puzzle::new(Cube::default());
        let mut scheduler = TransitionScheduler::new();

        let request = TurnRequest {
            cubie: cubie_at(&puzzle, -1, 0, 1),
            axis: Axis::Z,
            direction: Sign::Neg,
        };
        let expected = request.rotation();
        let slice = {
            assert!(puzzle.try_begin(PlayState::TurningSlice));
            puzzle.turn(&mut scheduler, request)
        };
        // Uneven frame times must not leave interpolation residue.
        for t in [0, 7, 31, 64, 101, 170] {
            scheduler.tick(&mut puzzle, Duration::from_millis(t));
        }
        let mut now = Duration::from_millis(186);
        run_until_idle(&mut puzzle, &mut scheduler, &mut now);

        for &id in &slice {
            let q = puzzle.cube()[id].orientation;
            assert_eq!(q, expected.normalize());
            for axis in Axis::iter() {
                let diff = q * axis.unit_vec3() - expected * axis.unit_vec3();
                assert!(diff.magnitude() < 1e-6);
            }
            assert!(!puzzle.cube()[id].is_in_flight());
        }
        assert!(angle_between(puzzle.cube()[slice[0]].orientation, expected) < 1e-6);
    }

    #[test]
    fn test_orientation_interpolates_monotonically() {
        let (mut puzzle, _rx) = Puzzle::new(Cube::default());
        let mut scheduler = TransitionScheduler::new();
        let request = TurnRequest {
            cubie: cubie_at(&puzzle, 0, -1, 0),
            axis: Axis::Y,
            direction: Sign::Pos,
        };
        let id = request.cubie;
        let target = request.rotation();
        assert!(puzzle.rotate_slice(&mut scheduler, request));

        let mut last_remaining = angle_between(puzzle.cube()[id].orientation, target);
        for t in (0..=150).step_by(15) {
            scheduler.tick(&mut puzzle, Duration::from_millis(t));
            let remaining = angle_between(puzzle.cube()[id].orientation, target);
            assert!(remaining <= last_remaining + 1e-6);
            last_remaining = remaining;
        }
    }

    #[test]
    fn test_four_turns_restore_layer() {
        let (mut puzzle, _rx) = Puzzle::new(Cube::default());
        let mut scheduler = TransitionScheduler::new();
        let mut now = Duration::ZERO;

        let reference = cubie_at(&puzzle, 1, 0, -1);
        let before = puzzle.cube().clone();
        for _ in 0..4 {
            let request = TurnRequest {
                cubie: reference,
                axis: Axis::Y,
                direction: Sign::Neg,
            };
            assert!(puzzle.rotate_slice(&mut scheduler, request));
            run_until_idle(&mut puzzle, &mut scheduler, &mut now);
        }

        for (id, cubie) in puzzle.cube().iter() {
            assert_eq!(cubie.lattice(), before[id].lattice());
            assert!(angle_between(cubie.orientation, before[id].orientation) < 1e-4);
        }
    }

    #[test]
    fn test_turn_while_locked_is_ignored() {
        let (mut puzzle, rx) = Puzzle::new(Cube::default());
        let mut scheduler = TransitionScheduler::new();

        let first = TurnRequest {
            cubie: cubie_at(&puzzle, 0, 0, 1),
            axis: Axis::Z,
            direction: Sign::Pos,
        };
        assert!(puzzle.rotate_slice(&mut scheduler, first));
        let snapshot = puzzle.cube().clone();

        let second = TurnRequest {
            cubie: cubie_at(&puzzle, 1, 0, 0),
            axis: Axis::X,
            direction: Sign::Pos,
        };
        assert!(!puzzle.rotate_slice(&mut scheduler, second));
        assert_eq!(scheduler.len(), 1);
        for (id, cubie) in puzzle.cube().iter() {
            assert_eq!(cubie, &snapshot[id]);
        }

        let mut now = Duration::ZERO;
        run_until_idle(&mut puzzle, &mut scheduler, &mut now);
        assert_eq!(rx.try_iter().count(), 1);
    }

    #[test]
    fn test_turn_without_holder_is_ignored() {
        let (mut puzzle, rx) = Puzzle::new(Cube::default());
        let mut scheduler = TransitionScheduler::new();

        let request = TurnRequest {
            cubie: cubie_at(&puzzle, 1, 1, 1),
            axis: Axis::Y,
            direction: Sign::Neg,
        };
        assert!(puzzle.turn(&mut scheduler, request).is_empty());
        assert!(puzzle.can_play());
        assert!(scheduler.is_empty());
        assert!(puzzle.cube().is_at_initial_lattice());
        assert!(CubieId::iter().all(|id| !puzzle.cube()[id].is_in_flight()));

        // A real turn can still start afterwards.
        assert!(puzzle.rotate_slice(&mut scheduler, request));
        let mut now = Duration::ZERO;
        run_until_idle(&mut puzzle, &mut scheduler, &mut now);
        assert!(puzzle.can_play());
        assert_eq!(rx.try_iter().count(), 1);
    }
}
