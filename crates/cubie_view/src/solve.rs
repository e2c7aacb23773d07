use cgmath::Vector3;
use cubie_core::math::{angle_between, identity, lattice_to_f32, rotate_towards};
use cubie_core::{PlayState, Puzzle, PuzzleEvent, SolvePhase, TransitionScheduler};
use cubie_prefs::AnimationPreferences;
use web_time::Duration;

/// Scripted animation that returns every cubie to where it started.
///
/// The cubies fly apart, pause, then fly back together while unrotating.
/// This does not use layer turns.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveAnimation {
    /// Duration of the explode and implode phases.
    pub phase_duration: Duration,
    /// Duration of the pause between them.
    pub hold_duration: Duration,
    /// Distance of each cubie from its resting place at the peak of the
    /// explosion, as a multiple of its lattice position.
    pub explode_distance: f32,
}
impl Default for SolveAnimation {
    fn default() -> Self {
        Self::from_prefs(&AnimationPreferences::default())
    }
}
impl SolveAnimation {
    /// Constructs a solve animation using durations from preferences.
    pub fn from_prefs(prefs: &AnimationPreferences) -> Self {
        Self {
            phase_duration: prefs.solve_phase_duration(),
            hold_duration: prefs.solve_hold_duration(),
            explode_distance: prefs.explode_distance,
        }
    }

    /// Starts the animation. Returns `false` if another operation is running.
    pub fn begin(&self, puzzle: &mut Puzzle, scheduler: &mut TransitionScheduler<Puzzle>) -> bool {
        if !puzzle.try_begin(PlayState::Solving(SolvePhase::Explode)) {
            return false;
        }
        log::info!("solving");
        self.explode(scheduler);
        true
    }

    /// Starts the phase after `phase`.
    pub fn on_phase_complete(
        &self,
        phase: SolvePhase,
        puzzle: &Puzzle,
        scheduler: &mut TransitionScheduler<Puzzle>,
    ) {
        match phase {
            SolvePhase::Explode => self.hold(scheduler),
            SolvePhase::Hold => self.implode(puzzle, scheduler),
            SolvePhase::Implode => log::info!("solved"),
        }
    }

    fn explode(&self, scheduler: &mut TransitionScheduler<Puzzle>) {
        let distance = self.explode_distance;
        scheduler.schedule(self.phase_duration, move |puzzle: &mut Puzzle, tick| {
            for (_, cubie) in puzzle.cube_mut().iter_mut() {
                cubie.position = lattice_to_f32(cubie.lattice()) * (distance * tick.ratio);
            }
            if tick.is_complete() {
                end_phase(puzzle, SolvePhase::Explode, Some(SolvePhase::Hold));
            }
        });
    }

    fn hold(&self, scheduler: &mut TransitionScheduler<Puzzle>) {
        scheduler.schedule(self.hold_duration, |puzzle: &mut Puzzle, tick| {
            if tick.is_complete() {
                end_phase(puzzle, SolvePhase::Hold, Some(SolvePhase::Implode));
            }
        });
    }

    fn implode(&self, puzzle: &Puzzle, scheduler: &mut TransitionScheduler<Puzzle>) {
        let distance = self.explode_distance;
        // Each cubie unrotates at its own rate so that they all finish
        // together.
        let angles: Vec<f32> = puzzle
            .cube()
            .cubies()
            .iter()
            .map(|cubie| angle_between(cubie.orientation, identity()))
            .collect();

        scheduler.schedule(self.phase_duration, move |puzzle: &mut Puzzle, tick| {
            let cube = puzzle.cube_mut();
            if tick.is_complete() {
                for (_, cubie) in cube.iter_mut() {
                    cubie.position = Vector3::new(0.0, 0.0, 0.0);
                    cubie.orientation = identity();
                }
                cube.reset_lattice();
                end_phase(puzzle, SolvePhase::Implode, None);
            } else {
                for ((_, cubie), &angle) in cube.iter_mut().zip(&angles) {
                    cubie.position = lattice_to_f32(cubie.lattice()) * (distance * (1.0 - tick.ratio));
                    cubie.orientation =
                        rotate_towards(cubie.orientation, identity(), tick.ratio_delta * angle);
                }
            }
        });
    }
}

fn end_phase(puzzle: &mut Puzzle, phase: SolvePhase, next: Option<SolvePhase>) {
    let current = PlayState::Solving(phase);
    match next {
        Some(next) => {
            puzzle.advance(current, PlayState::Solving(next));
        }
        None => puzzle.finish(current),
    }
    log::debug!("finished solve phase {phase:?}");
    puzzle.emit(PuzzleEvent::SolvePhaseComplete(phase));
}

#[cfg(test)]
mod tests {
    use cgmath::InnerSpace;
    use cubie_core::Cube;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_explode_moves_cubies_outward() {
        let (mut puzzle, rx) = Puzzle::new(Cube::default());
        let mut scheduler = TransitionScheduler::new();
        let solve = SolveAnimation::default();

        assert!(solve.begin(&mut puzzle, &mut scheduler));
        assert!(!solve.begin(&mut puzzle, &mut scheduler));
        assert_eq!(scheduler.len(), 1);

        scheduler.tick(&mut puzzle, Duration::ZERO);
        scheduler.tick(&mut puzzle, Duration::from_millis(175));
        let corner = puzzle.cube().cubie_at(Vector3::new(1, -1, 1)).unwrap();
        let position = puzzle.cube()[corner].position;
        assert!((position - Vector3::new(4.0, -4.0, 4.0)).magnitude() < 1e-4);
        assert_eq!(puzzle.state(), PlayState::Solving(SolvePhase::Explode));

        scheduler.tick(&mut puzzle, Duration::from_millis(350));
        assert!(scheduler.is_empty());
        assert_eq!(puzzle.state(), PlayState::Solving(SolvePhase::Hold));
        assert_eq!(
            rx.try_recv(),
            Ok(PuzzleEvent::SolvePhaseComplete(SolvePhase::Explode)),
        );
        assert_eq!(puzzle.cube()[corner].position, Vector3::new(8.0, -8.0, 8.0));
    }
}
