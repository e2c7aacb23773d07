use cgmath::{Deg, EuclideanSpace, InnerSpace, Point2, Point3, Rad, Vector3};
use cubie_core::Ray;
use cubie_prefs::ViewPreferences;

use crate::CameraControl;

/// Pitch is kept just short of straight up or down so that the camera basis
/// stays well-defined.
const MAX_PITCH: Deg<f32> = Deg(89.0);

/// Perspective camera orbiting the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Vertical field of view.
    pub fov: Deg<f32>,
    distance: f32,
    min_distance: f32,
    max_distance: f32,

    /// Rotation of the camera about the vertical axis. Zero looks along -Z.
    yaw: Rad<f32>,
    /// Elevation of the camera above the horizontal plane.
    pitch: Rad<f32>,

    /// Width and height of the viewport in pixels.
    pub viewport_size: [f32; 2],
    orbit_enabled: bool,
}
impl OrbitCamera {
    /// Constructs a camera looking at the front of the cube.
    pub fn new(prefs: &ViewPreferences) -> Self {
        let mut ret = Self {
            fov: Deg(prefs.fov_degrees),
            distance: prefs.distance,
            min_distance: prefs.min_distance,
            max_distance: prefs.max_distance,

            yaw: Rad(0.0),
            pitch: Rad(0.0),

            viewport_size: [1.0, 1.0],
            orbit_enabled: true,
        };
        ret.zoom_by(1.0); // clamp
        ret
    }

    /// Returns the distance from the camera to the origin.
    pub fn distance(&self) -> f32 {
        self.distance
    }
    /// Multiplies the distance to the origin by `factor`, within the
    /// configured limits.
    pub fn zoom_by(&mut self, factor: f32) {
        self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
    }

    /// Returns whether pointer orbiting is enabled.
    pub fn is_orbit_enabled(&self) -> bool {
        self.orbit_enabled
    }
    /// Rotates the camera around the origin. Does nothing while orbiting is
    /// disabled.
    pub fn orbit(&mut self, yaw: impl Into<Rad<f32>>, pitch: impl Into<Rad<f32>>) {
        if !self.orbit_enabled {
            return;
        }
        self.set_angles(self.yaw + yaw.into(), self.pitch + pitch.into());
    }
    /// Sets the camera angles directly.
    pub fn set_angles(&mut self, yaw: impl Into<Rad<f32>>, pitch: impl Into<Rad<f32>>) {
        let max_pitch: Rad<f32> = MAX_PITCH.into();
        self.yaw = yaw.into();
        self.pitch = Rad(pitch.into().0.clamp(-max_pitch.0, max_pitch.0));
    }

    /// Returns the position of the camera.
    pub fn eye(&self) -> Point3<f32> {
        let (sin_yaw, cos_yaw) = self.yaw.0.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.0.sin_cos();
        Point3::new(
            self.distance * cos_pitch * sin_yaw,
            self.distance * sin_pitch,
            self.distance * cos_pitch * cos_yaw,
        )
    }
    /// Returns the forward, right, and up unit vectors of the camera.
    fn basis(&self) -> [Vector3<f32>; 3] {
        let forward = -self.eye().to_vec().normalize();
        let right = forward.cross(Vector3::unit_y()).normalize();
        let up = right.cross(forward);
        [forward, right, up]
    }
}
impl CameraControl for OrbitCamera {
    fn ndc_ray(&self, ndc: Point2<f32>) -> Ray {
        let [forward, right, up] = self.basis();
        let [w, h] = self.viewport_size;
        let aspect = if h > 0.0 { w / h } else { 1.0 };
        let tan_half_fov = (Rad::from(self.fov).0 / 2.0).tan();

        let direction =
            forward + right * (ndc.x * tan_half_fov * aspect) + up * (ndc.y * tan_half_fov);
        Ray::new(self.eye(), direction)
    }

    fn viewport_size(&self) -> [f32; 2] {
        self.viewport_size
    }

    fn set_orbit_enabled(&mut self, enabled: bool) {
        self.orbit_enabled = enabled;
    }
}
