use eyre::ensure;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ViewPreferences {
    /// Vertical field of view, in degrees.
    pub fov_degrees: f32,
    /// Initial distance from the camera to the cube center.
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}
impl Default for ViewPreferences {
    fn default() -> Self {
        Self {
            fov_degrees: 50.0,
            distance: 25.0,
            min_distance: 5.0,
            max_distance: 50.0,
        }
    }
}
impl ViewPreferences {
    pub(crate) fn validate(&self) -> eyre::Result<()> {
        ensure!(
            self.fov_degrees > 0.0 && self.fov_degrees < 180.0,
            "view.fov_degrees must be between 0 and 180, got {}",
            self.fov_degrees,
        );
        ensure!(
            0.0 < self.min_distance && self.min_distance <= self.max_distance,
            "view.min_distance must be positive and at most view.max_distance",
        );
        Ok(())
    }
}
