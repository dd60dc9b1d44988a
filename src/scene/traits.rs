//! Seams between the navigation core and its collaborators.
//!
//! Defines what a per-level geometry generator must hand back to the
//! registry, the faults the registry rejects, and the camera operations
//! navigation relies on.

use glam::{Vec2, Vec3};

use crate::interaction::picking::Ray;
use crate::scene::graph::{NodeId, SceneSubtree};
use crate::scene::levels::ScaleLevel;

/// Extra handles the transcription level needs for its animation.
#[derive(Debug, Clone)]
pub struct TranscriptionRig {
    /// Control points of the path the polymerase follows, in subtree space.
    pub path: Vec<Vec3>,
    /// Node moved along the path every frame.
    pub marker: NodeId,
    /// Node whose tube geometry is regenerated from the strand queue.
    pub strand: NodeId,
    /// Initial strand points.
    pub strand_seed: Vec<Vec3>,
}

/// Output of one factory invocation.
#[derive(Debug, Clone)]
pub struct LevelModel {
    pub subtree: SceneSubtree,
    /// Declared interactive objects, in declaration order.
    pub pick_set: Vec<NodeId>,
    pub rig: Option<TranscriptionRig>,
}

impl LevelModel {
    pub fn new(subtree: SceneSubtree, pick_set: Vec<NodeId>) -> Self {
        Self {
            subtree,
            pick_set,
            rig: None,
        }
    }

    pub fn with_rig(mut self, rig: TranscriptionRig) -> Self {
        self.rig = Some(rig);
        self
    }
}

/// Procedural generator for every scale level.
///
/// Called at most once per level per session; the registry memoizes the
/// result.
pub trait ModelFactory {
    fn build(&mut self, level: ScaleLevel) -> LevelModel;
}

/// A factory produced something the explorer cannot use. Fatal for the level.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("{0} model has no nodes")]
    EmptySubtree(ScaleLevel),
    #[error("{level} pick-set references missing node {node:?}")]
    PickOutOfRange { level: ScaleLevel, node: NodeId },
    #[error("{level} pickable node {node:?} carries no object info")]
    MissingInfo { level: ScaleLevel, node: NodeId },
    #[error("{0} model is missing its animation rig")]
    MissingRig(ScaleLevel),
    #[error("{level} animation rig is invalid: {reason}")]
    InvalidRig { level: ScaleLevel, reason: &'static str },
}

/// Camera operations used by navigation and picking.
pub trait CameraRig {
    /// Point the camera looks at and orbits around.
    fn set_target(&mut self, target: Vec3);
    /// Move the eye, keeping the current target.
    fn set_position(&mut self, position: Vec3);
    /// World ray through a point in normalized device coordinates.
    fn ray_through(&self, ndc: Vec2) -> Option<Ray>;
}
