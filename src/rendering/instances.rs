//! Conversion of scene nodes into sphere impostor instances.
//!
//! Everything is drawn as billboarded spheres. Spheres map one to one;
//! boxes, cylinders and tubes become chains of overlapping spheres along
//! their long axis.

use glam::{Mat4, Vec3};

use crate::scene::graph::{SceneSubtree, Shape};

/// Upper bound on spheres emitted for one straight segment.
const MAX_CHAIN: usize = 512;

/// Default surface response: specular strength, specular power, fresnel.
const SURFACE: [f32; 3] = [0.4, 32.0, 0.2];

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereInstance {
    pub position: [f32; 3],
    pub radius: f32,
    pub color: [f32; 4],
    /// specular strength, specular power, fresnel, emissive
    pub visual_params: [f32; 4],
}

impl SphereInstance {
    fn new(position: Vec3, radius: f32, color: [f32; 4], emissive: f32) -> Self {
        Self {
            position: position.to_array(),
            radius,
            color,
            visual_params: [SURFACE[0], SURFACE[1], SURFACE[2], emissive],
        }
    }
}

/// Instances for one frame, split by pass.
#[derive(Debug, Default)]
pub struct InstanceBatch {
    pub opaque: Vec<SphereInstance>,
    pub transparent: Vec<SphereInstance>,
}

impl InstanceBatch {
    pub fn clear(&mut self) {
        self.opaque.clear();
        self.transparent.clear();
    }

    pub fn len(&self) -> usize {
        self.opaque.len() + self.transparent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append every node of `subtree`.
    pub fn push_subtree(&mut self, subtree: &SceneSubtree) {
        for (id, node) in subtree.iter() {
            let Some(world) = subtree.world_matrix(id) else {
                continue;
            };
            // Separate opaque (alpha >= 0.99) from transparent
            let target = if node.color[3] >= 0.99 {
                &mut self.opaque
            } else {
                &mut self.transparent
            };
            emit_shape(&node.shape, &world, node.color, node.emissive, target);
        }
    }

    /// Order transparent instances far to near from `eye`.
    pub fn sort_transparent(&mut self, eye: Vec3) {
        self.transparent.sort_by(|a, b| {
            let da = Vec3::from(a.position).distance_squared(eye);
            let db = Vec3::from(b.position).distance_squared(eye);
            db.total_cmp(&da)
        });
    }
}

fn max_scale(world: &Mat4) -> f32 {
    world
        .x_axis
        .truncate()
        .length()
        .max(world.y_axis.truncate().length())
        .max(world.z_axis.truncate().length())
}

fn emit_shape(shape: &Shape, world: &Mat4, color: [f32; 4], emissive: f32, out: &mut Vec<SphereInstance>) {
    let scale = max_scale(world);
    match shape {
        Shape::Sphere { radius } => {
            out.push(SphereInstance::new(
                world.transform_point3(Vec3::ZERO),
                radius * scale,
                color,
                emissive,
            ));
        }
        Shape::Box { half_extents } => {
            let long = half_extents.max_element();
            let axis = if long == half_extents.x {
                Vec3::X
            } else if long == half_extents.y {
                Vec3::Y
            } else {
                Vec3::Z
            };
            let thickness = (*half_extents * (Vec3::ONE - axis)).max_element();
            let reach = (long - thickness).max(0.0);
            emit_chain(
                world.transform_point3(-axis * reach),
                world.transform_point3(axis * reach),
                thickness * scale,
                color,
                emissive,
                out,
            );
        }
        Shape::Cylinder { radius, half_height } => {
            emit_chain(
                world.transform_point3(Vec3::new(0.0, -half_height, 0.0)),
                world.transform_point3(Vec3::new(0.0, *half_height, 0.0)),
                radius * scale,
                color,
                emissive,
                out,
            );
        }
        Shape::Tube(tube) => {
            let radius = tube.radius * scale;
            let points: Vec<Vec3> = tube.points.iter().map(|&p| world.transform_point3(p)).collect();
            match points.as_slice() {
                [] => {}
                [only] => out.push(SphereInstance::new(*only, radius, color, emissive)),
                _ => {
                    for pair in points.windows(2) {
                        emit_chain(pair[0], pair[1], radius, color, emissive, out);
                    }
                }
            }
        }
    }
}

/// Spheres from `a` to `b`, spaced one radius apart.
fn emit_chain(a: Vec3, b: Vec3, radius: f32, color: [f32; 4], emissive: f32, out: &mut Vec<SphereInstance>) {
    if radius <= 0.0 {
        return;
    }
    let length = a.distance(b);
    let steps = ((length / radius).ceil() as usize).clamp(1, MAX_CHAIN);
    for i in 0..=steps {
        let at = a.lerp(b, i as f32 / steps as f32);
        out.push(SphereInstance::new(at, radius, color, emissive));
    }
}
