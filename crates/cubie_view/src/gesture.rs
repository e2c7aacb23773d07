//! Resolving pointer drags into layer turns.

use cgmath::{InnerSpace, Point2, Point3, Vector3};
use cubie_core::pick::{first_cubie, first_wall};
use cubie_core::{
    Axis, CubieId, Face, Puzzle, Sign, TransitionScheduler, TurnRequest, WallProxy,
};

use crate::CameraControl;

/// Button ID of the primary pointer button.
pub const PRIMARY_BUTTON: u8 = 0;

/// Pointer input in client coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerEvent {
    /// Pixels from the top left of the viewport.
    pub client: Point2<f32>,
    /// Which button is involved. Ignored for moves.
    pub button: u8,
}
impl PointerEvent {
    /// Constructs an event for the primary button.
    pub fn primary(x: f32, y: f32) -> Self {
        Self {
            client: Point2::new(x, y),
            button: PRIMARY_BUTTON,
        }
    }
}

/// Where a drag started.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DragAnchor {
    /// Wall proxy under the pointer.
    pub wall: Face,
    /// Cubie under the pointer.
    pub cubie: CubieId,
    /// Point on the wall under the pointer.
    pub point: Point3<f32>,
    /// Whether this drag has already turned a layer.
    pub consumed: bool,
}

/// Turns pointer drags across the wall proxies into layer turns.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureResolver {
    /// Minimum distance in world units between the anchor and the current
    /// point on the wall.
    pub threshold: f32,
    anchor: Option<DragAnchor>,
}
impl GestureResolver {
    /// Constructs a resolver with no active drag.
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            anchor: None,
        }
    }

    /// Returns the active drag, if any.
    pub fn anchor(&self) -> Option<&DragAnchor> {
        self.anchor.as_ref()
    }

    /// Starts a drag if the pointer is over both a wall and a cubie. While a
    /// drag is active, the camera does not orbit.
    pub fn pointer_down(
        &mut self,
        puzzle: &Puzzle,
        camera: &mut dyn CameraControl,
        event: PointerEvent,
    ) {
        self.anchor = None;
        if event.button != PRIMARY_BUTTON || !puzzle.can_play() {
            return;
        }

        let ray = camera.ndc_ray(camera.client_to_ndc(event.client));
        let hits = puzzle.cube().cast_ray(ray);
        if let (Some((wall, point)), Some(cubie)) = (first_wall(&hits), first_cubie(&hits)) {
            log::trace!("drag anchored on {wall} wall at {cubie}");
            self.anchor = Some(DragAnchor {
                wall,
                cubie,
                point,
                consumed: false,
            });
            camera.set_orbit_enabled(false);
        }
    }

    /// Continues a drag. Once the pointer has moved far enough across the
    /// same wall it started on, turns the layer containing the anchored
    /// cubie and returns the request. A drag turns at most one layer.
    pub fn pointer_move(
        &mut self,
        puzzle: &mut Puzzle,
        scheduler: &mut TransitionScheduler<Puzzle>,
        camera: &dyn CameraControl,
        event: PointerEvent,
    ) -> Option<TurnRequest> {
        let anchor = self.anchor.as_mut()?;
        if anchor.consumed || !puzzle.can_play() {
            return None;
        }

        let ray = camera.ndc_ray(camera.client_to_ndc(event.client));
        let hits = puzzle.cube().cast_ray(ray);
        let (wall, point) = first_wall(&hits)?;
        if wall != anchor.wall {
            return None;
        }

        let (axis, direction) =
            resolve_drag(puzzle.cube().wall(wall), point - anchor.point, self.threshold)?;
        let request = TurnRequest {
            cubie: anchor.cubie,
            axis,
            direction,
        };
        if puzzle.rotate_slice(scheduler, request) {
            anchor.consumed = true;
            Some(request)
        } else {
            None
        }
    }

    /// Ends the drag and lets the camera orbit again.
    pub fn pointer_up(&mut self, camera: &mut dyn CameraControl) {
        self.anchor = None;
        camera.set_orbit_enabled(true);
    }
}

/// Classifies a drag displacement across `wall`. Returns the requested turn
/// axis and direction, or `None` if the displacement is not longer than
/// `threshold`.
///
/// The dominant component of the displacement wins. Ties go to the earlier
/// axis.
pub fn resolve_drag(
    wall: &WallProxy,
    displacement: Vector3<f32>,
    threshold: f32,
) -> Option<(Axis, Sign)> {
    if displacement.magnitude() <= threshold {
        return None;
    }

    let mut drag_axis = Axis::X;
    for axis in [Axis::Y, Axis::Z] {
        if axis.component(displacement).abs() > drag_axis.component(displacement).abs() {
            drag_axis = axis;
        }
    }

    let (axis, sign) = wall.map_drag_axis(drag_axis);
    Some((axis, sign * Sign::of(drag_axis.component(displacement))))
}
