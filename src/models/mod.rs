//! Procedural geometry for every scale level.
//!
//! Each submodule exposes a `build` function returning a [`LevelModel`].
//! Random placement comes from one seeded generator so a configured seed
//! reproduces the same session.

pub mod cell;
pub mod chromatin;
pub mod chromosome;
pub mod dna;
pub mod fiber;
pub mod nucleus;
pub mod transcription;

use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::scene::graph::{ObjectInfo, SceneNode, Shape, Transform};
use crate::scene::levels::{ScaleLevel, SemanticType};
use crate::scene::traits::{LevelModel, ModelFactory};

/// Factory backing every level with the built-in procedural models.
pub struct ProceduralFactory {
    rng: StdRng,
}

impl ProceduralFactory {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl ModelFactory for ProceduralFactory {
    fn build(&mut self, level: ScaleLevel) -> LevelModel {
        log::debug!("Generating {} model", level);
        match level {
            ScaleLevel::Cell => cell::build(&mut self.rng),
            ScaleLevel::Nucleus => nucleus::build(&mut self.rng),
            ScaleLevel::Chromosome => chromosome::build(),
            ScaleLevel::ChromatinFiber => fiber::build(),
            ScaleLevel::Chromatin => chromatin::build(),
            ScaleLevel::Dna => dna::build(&mut self.rng),
            ScaleLevel::Transcription => transcription::build(),
        }
    }
}

/// Sphere node carrying object info.
pub(crate) fn labelled_sphere(
    radius: f32,
    at: Vec3,
    color: [f32; 4],
    name: impl Into<String>,
    semantic_type: SemanticType,
) -> SceneNode {
    SceneNode::new(Shape::Sphere { radius }, Transform::from_translation(at), color)
        .with_info(ObjectInfo::new(name, semantic_type))
}

/// Uniform sample in `[-span / 2, span / 2)`.
pub(crate) fn centered(rng: &mut StdRng, span: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * span
}

pub(crate) fn random_box(rng: &mut StdRng, spans: Vec3) -> Vec3 {
    Vec3::new(
        centered(rng, spans.x),
        centered(rng, spans.y),
        centered(rng, spans.z),
    )
}

/// Rotation taking local +Y onto `direction`.
pub(crate) fn y_towards(direction: Vec3) -> Quat {
    match direction.try_normalize() {
        Some(dir) => Quat::from_rotation_arc(Vec3::Y, dir),
        None => Quat::IDENTITY,
    }
}
