//! Ray casting against scene nodes.
//!
//! Rays are transformed into each node's local space through the inverse of
//! its world matrix, so non-uniform scale and rotation are handled by the
//! shape tests for free. Distances are reported in world units.

use glam::{Mat4, Vec3};

use crate::scene::graph::{NodeId, SceneSubtree, Shape};

const EPSILON: f32 = 1e-6;

/// World-space ray with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing the direction. Returns `None` for a zero direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Nearest intersection with a pickable node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub node: NodeId,
    /// Distance along the ray in world units.
    pub distance: f32,
    pub point: Vec3,
}

/// Intersection seam used by the interaction engine.
pub trait Picker {
    /// Nearest hit among `candidates`, ties resolved in candidate order.
    fn intersect(&self, ray: &Ray, subtree: &SceneSubtree, candidates: &[NodeId]) -> Option<Hit>;
}

/// Exact tests for spheres and boxes, capsule chains for cylinders and tubes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShapePicker;

impl Picker for ShapePicker {
    fn intersect(&self, ray: &Ray, subtree: &SceneSubtree, candidates: &[NodeId]) -> Option<Hit> {
        let mut nearest: Option<Hit> = None;

        for &id in candidates {
            let (Some(node), Some(world)) = (subtree.node(id), subtree.world_matrix(id)) else {
                continue;
            };
            let Some(distance) = intersect_shape(ray, &node.shape, &world) else {
                continue;
            };
            if nearest.map_or(true, |hit| distance < hit.distance) {
                nearest = Some(Hit {
                    node: id,
                    distance,
                    point: ray.at(distance),
                });
            }
        }

        nearest
    }
}

/// World distance to a shape placed by `world`, if the ray hits it in front of the origin.
pub fn intersect_shape(ray: &Ray, shape: &Shape, world: &Mat4) -> Option<f32> {
    if world.determinant().abs() < EPSILON {
        return None;
    }
    let inverse = world.inverse();
    let origin = inverse.transform_point3(ray.origin);
    let scaled = inverse.transform_vector3(ray.direction);
    let stretch = scaled.length();
    if stretch < EPSILON {
        return None;
    }
    let direction = scaled / stretch;

    let local_t = match shape {
        Shape::Sphere { radius } => ray_sphere(origin, direction, Vec3::ZERO, *radius),
        Shape::Box { half_extents } => ray_box(origin, direction, *half_extents),
        Shape::Cylinder {
            radius,
            half_height,
        } => ray_capsule(
            origin,
            direction,
            Vec3::new(0.0, -half_height, 0.0),
            Vec3::new(0.0, *half_height, 0.0),
            *radius,
        ),
        Shape::Tube(tube) => match tube.points.as_slice() {
            [] => None,
            [single] => ray_sphere(origin, direction, *single, tube.radius),
            points => points
                .windows(2)
                .filter_map(|pair| ray_capsule(origin, direction, pair[0], pair[1], tube.radius))
                .min_by(|a, b| a.total_cmp(b)),
        },
    }?;

    Some(local_t / stretch)
}

/// Nearest non-negative root of the ray-sphere quadratic. `direction` must be unit length.
fn ray_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(direction);
    let c = oc.length_squared() - radius * radius;
    let h = b * b - c;
    if h < 0.0 {
        return None;
    }
    let h = h.sqrt();
    let near = -b - h;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + h;
    (far >= 0.0).then_some(far)
}

/// Slab test against an origin-centred box.
fn ray_box(origin: Vec3, direction: Vec3, half_extents: Vec3) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        let h = half_extents[axis];
        if d.abs() < EPSILON {
            if o < -h || o > h {
                return None;
            }
            continue;
        }
        let t1 = (-h - o) / d;
        let t2 = (h - o) / d;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
        if t_min > t_max {
            return None;
        }
    }

    if t_max < 0.0 {
        None
    } else if t_min >= 0.0 {
        Some(t_min)
    } else {
        Some(t_max)
    }
}

/// Ray against the capsule swept by a sphere of `radius` from `a` to `b`.
/// `direction` must be unit length.
fn ray_capsule(origin: Vec3, direction: Vec3, a: Vec3, b: Vec3, radius: f32) -> Option<f32> {
    let ba = b - a;
    let oa = origin - a;
    let baba = ba.length_squared();
    if baba < EPSILON {
        return ray_sphere(origin, direction, a, radius);
    }

    let bard = ba.dot(direction);
    let baoa = ba.dot(oa);
    let rdoa = direction.dot(oa);
    let oaoa = oa.length_squared();

    let qa = baba - bard * bard;
    let qb = baba * rdoa - baoa * bard;
    let qc = baba * oaoa - baoa * baoa - radius * radius * baba;

    if qa > EPSILON {
        let h = qb * qb - qa * qc;
        // Outside the infinite cylinder means outside the capsule too.
        if h < 0.0 {
            return None;
        }
        let t = (-qb - h.sqrt()) / qa;
        let y = baoa + t * bard;
        if t >= 0.0 && y > 0.0 && y < baba {
            return Some(t);
        }
    }

    let cap_a = ray_sphere(origin, direction, a, radius);
    let cap_b = ray_sphere(origin, direction, b, radius);
    match (cap_a, cap_b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, y) => x.or(y),
    }
}
