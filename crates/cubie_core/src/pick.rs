//! Ray intersection against cubies and wall proxies.

use cgmath::{EuclideanSpace, InnerSpace, Point3, Vector3};
use float_ord::FloatOrd;

use crate::cube::WALL_SIZE;
use crate::{Cube, Cubie, CubieId, Face, WallProxy};

/// Half the side length of a cubie.
const CUBIE_HALF_SIZE: f32 = 0.5;

/// Ray in world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    /// Start of the ray.
    pub origin: Point3<f32>,
    /// Unit direction of the ray.
    pub direction: Vector3<f32>,
}
impl Ray {
    /// Constructs a ray, normalizing its direction.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }
    /// Returns the point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }
}

/// Object hit by a ray.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PickTarget {
    /// Wall proxy for a face.
    Wall(Face),
    /// Cubie.
    Cubie(CubieId),
}

/// Intersection of a ray with an object.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RayHit {
    /// Object that was hit.
    pub target: PickTarget,
    /// Point of intersection in world space.
    pub point: Point3<f32>,
    /// Distance from the ray origin.
    pub distance: f32,
}

impl Cube {
    /// Returns every wall and cubie hit by `ray`, nearest first.
    pub fn cast_ray(&self, ray: Ray) -> Vec<RayHit> {
        let wall_hits = self.walls().iter().filter_map(|wall| intersect_wall(wall, ray));
        let cubie_hits = self
            .iter()
            .filter_map(|(id, cubie)| intersect_cubie(id, cubie, ray));
        let mut hits: Vec<RayHit> = wall_hits.chain(cubie_hits).collect();
        hits.sort_by_key(|hit| FloatOrd(hit.distance));
        hits
    }
}

/// Returns the nearest wall hit in `hits`.
pub fn first_wall(hits: &[RayHit]) -> Option<(Face, Point3<f32>)> {
    hits.iter().find_map(|hit| match hit.target {
        PickTarget::Wall(face) => Some((face, hit.point)),
        PickTarget::Cubie(_) => None,
    })
}

/// Returns the nearest cubie hit in `hits`.
pub fn first_cubie(hits: &[RayHit]) -> Option<CubieId> {
    hits.iter().find_map(|hit| match hit.target {
        PickTarget::Cubie(id) => Some(id),
        PickTarget::Wall(_) => None,
    })
}

/// Intersects the visible side of a wall plane.
fn intersect_wall(wall: &WallProxy, ray: Ray) -> Option<RayHit> {
    let normal = wall.normal();
    let denom = ray.direction.dot(normal);
    if denom > -f32::EPSILON {
        return None; // parallel or seen from behind
    }
    // Every wall passes through the origin.
    let t = -ray.origin.to_vec().dot(normal) / denom;
    if t < 0.0 {
        return None;
    }
    let point = ray.at(t);
    let local = wall.orientation().conjugate() * point.to_vec();
    let half = WALL_SIZE / 2.0;
    (local.x.abs() <= half && local.y.abs() <= half).then_some(RayHit {
        target: PickTarget::Wall(wall.face()),
        point,
        distance: t,
    })
}

/// Intersects the oriented box of a cubie using the slab method.
fn intersect_cubie(id: CubieId, cubie: &Cubie, ray: Ray) -> Option<RayHit> {
    let inverse = cubie.orientation.conjugate();
    let origin = inverse * (ray.origin.to_vec() - cubie.position) - cubie.mesh_offset();
    let direction = inverse * ray.direction;

    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    for i in 0..3 {
        let (o, d) = (origin[i], direction[i]);
        if d.abs() < f32::EPSILON {
            if o.abs() > CUBIE_HALF_SIZE {
                return None;
            }
            continue;
        }
        let t0 = (-CUBIE_HALF_SIZE - o) / d;
        let t1 = (CUBIE_HALF_SIZE - o) / d;
        t_near = t_near.max(t0.min(t1));
        t_far = t_far.min(t0.max(t1));
    }
    if t_near > t_far || t_far < 0.0 {
        return None;
    }
    let t = if t_near >= 0.0 { t_near } else { t_far };
    Some(RayHit {
        target: PickTarget::Cubie(id),
        point: ray.at(t),
        distance: t,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray_from_camera(x: f32, y: f32) -> Ray {
        Ray::new(Point3::new(x, y, 25.0), -Vector3::unit_z())
    }

    #[test]
    fn test_front_wall_hit_behind_front_cubie() {
        let cube = Cube::default();
        let hits = cube.cast_ray(ray_from_camera(1.0, 1.0));

        let (face, point) = first_wall(&hits).expect("front wall");
        assert_eq!(face, Face::Front);
        assert!(point.z.abs() < 1e-4);

        let id = first_cubie(&hits).expect("cubie");
        assert_eq!(cube[id].lattice(), Vector3::new(1, 1, 1));

        // The cubie's outer face is in front of the wall through the center.
        assert!(matches!(hits[0].target, PickTarget::Cubie(_)));
        assert!((hits[0].point.z - (CUBIE_HALF_SIZE + 1.075)).abs() < 1e-4);
    }

    #[test]
    fn test_back_wall_not_visible_from_front() {
        let cube = Cube::default();
        let hits = cube.cast_ray(ray_from_camera(0.2, -0.3));
        assert!(
            hits.iter()
                .all(|hit| hit.target != PickTarget::Wall(Face::Back))
        );
    }

    #[test]
    fn test_miss() {
        let cube = Cube::default();
        assert!(cube.cast_ray(ray_from_camera(5.0, 0.0)).is_empty());
    }

    #[test]
    fn test_hits_sorted_by_distance() {
        let cube = Cube::default();
        let hits = cube.cast_ray(Ray::new(
            Point3::new(10.0, 8.0, 12.0),
            Vector3::new(-10.0, -8.0, -12.0),
        ));
        assert!(!hits.is_empty());
        assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
    }
}
