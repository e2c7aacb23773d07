use cgmath::{Point2, Quaternion, Vector3};
use cubie_core::{CubieId, FaceColors, NodeId, Ray};

/// Everything a scene graph needs to build the mesh for one cubie.
#[derive(Debug, Clone, PartialEq)]
pub struct CubieMesh {
    /// Cubie that the node draws.
    pub cubie: CubieId,
    /// Face colors, in [`cubie_core::Face`] order.
    pub colors: FaceColors,
    /// Translation baked into the mesh geometry.
    pub offset: Vector3<f32>,
    /// Side length of the box.
    pub size: f32,
}

/// Transform of a scene node, applied on top of its mesh geometry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NodeTransform {
    /// Translation.
    pub position: Vector3<f32>,
    /// Rotation about the scene origin.
    pub orientation: Quaternion<f32>,
}

/// Scene graph and renderer that draws the puzzle.
pub trait SceneGraph {
    /// Adds a node to the scene and returns a handle to it.
    fn add_node(&mut self, mesh: CubieMesh) -> NodeId;
    /// Updates the transform of a node.
    fn set_transform(&mut self, node: NodeId, transform: NodeTransform);
    /// Renders one frame.
    fn render_frame(&mut self);
}

/// Camera and orbit-control widget.
pub trait CameraControl {
    /// Returns the ray through a point in normalized device coordinates.
    fn ndc_ray(&self, ndc: Point2<f32>) -> Ray;
    /// Returns the width and height of the viewport, in pixels.
    fn viewport_size(&self) -> [f32; 2];
    /// Enables or disables orbiting the camera with the pointer.
    fn set_orbit_enabled(&mut self, enabled: bool);

    /// Converts client coordinates (pixels from the top left of the viewport)
    /// to normalized device coordinates.
    fn client_to_ndc(&self, client: Point2<f32>) -> Point2<f32> {
        let [w, h] = self.viewport_size();
        Point2::new(client.x / w * 2.0 - 1.0, -(client.y / h) * 2.0 + 1.0)
    }
}
