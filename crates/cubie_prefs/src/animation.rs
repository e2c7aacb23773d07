use eyre::ensure;
use serde::{Deserialize, Serialize};
use web_time::Duration;

/// Durations are in seconds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationPreferences {
    pub turn_duration: f32,
    pub solve_phase_duration: f32,
    pub solve_hold_duration: f32,
    /// How far apart cubies fly during the solve animation, as a multiple of
    /// their lattice position.
    pub explode_distance: f32,
}
impl Default for AnimationPreferences {
    fn default() -> Self {
        Self {
            turn_duration: 0.15,
            solve_phase_duration: 0.35,
            solve_hold_duration: 0.35,
            explode_distance: 8.0,
        }
    }
}
impl AnimationPreferences {
    pub fn turn_duration(&self) -> Duration {
        secs(self.turn_duration)
    }
    pub fn solve_phase_duration(&self) -> Duration {
        secs(self.solve_phase_duration)
    }
    pub fn solve_hold_duration(&self) -> Duration {
        secs(self.solve_hold_duration)
    }

    pub(crate) fn validate(&self) -> eyre::Result<()> {
        for (name, value) in [
            ("turn_duration", self.turn_duration),
            ("solve_phase_duration", self.solve_phase_duration),
            ("solve_hold_duration", self.solve_hold_duration),
        ] {
            ensure!(
                value.is_finite() && value >= 0.0,
                "animation.{name} must be a non-negative number of seconds, got {value}",
            );
        }
        ensure!(
            self.explode_distance.is_finite(),
            "animation.explode_distance must be finite",
        );
        Ok(())
    }
}

fn secs(value: f32) -> Duration {
    Duration::try_from_secs_f32(value.max(0.0)).unwrap_or_default()
}
