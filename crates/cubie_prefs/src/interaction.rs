use eyre::ensure;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InteractionPreferences {
    /// Distance in world units that a drag must cover on a wall before it
    /// turns a layer.
    pub drag_threshold: f32,
    /// Number of turns in a scramble.
    pub scramble_moves: usize,
}
impl Default for InteractionPreferences {
    fn default() -> Self {
        Self {
            drag_threshold: 0.5,
            scramble_moves: 30,
        }
    }
}
impl InteractionPreferences {
    pub(crate) fn validate(&self) -> eyre::Result<()> {
        ensure!(
            self.drag_threshold.is_finite() && self.drag_threshold > 0.0,
            "interaction.drag_threshold must be positive, got {}",
            self.drag_threshold,
        );
        Ok(())
    }
}
