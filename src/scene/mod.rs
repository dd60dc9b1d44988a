//! Scene data for the explorer.
//!
//! Each scale level owns one [`graph::SceneSubtree`], built on first entry by a
//! [`traits::ModelFactory`] and cached in the [`registry::LevelRegistry`].

pub mod curve;
pub mod graph;
pub mod levels;
pub mod registry;
pub mod traits;

pub use graph::{NodeId, ObjectInfo, SceneNode, SceneSubtree, Shape, Transform};
pub use levels::{ScaleLevel, SemanticType};
pub use registry::{LevelEntry, LevelRegistry};
pub use traits::{CameraRig, LevelModel, ModelError, ModelFactory, TranscriptionRig};
