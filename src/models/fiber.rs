use std::f32::consts::TAU;

use glam::Vec3;

use super::labelled_sphere;
use crate::scene::graph::{rgb, SceneSubtree};
use crate::scene::levels::SemanticType;
use crate::scene::traits::LevelModel;

const FIBER_RADIUS: f32 = 30.0;
const FIBER_HEIGHT: f32 = 200.0;
const TURNS: usize = 5;
const PER_TURN: usize = 6;

/// Solenoid of nucleosome clusters, six per turn.
pub fn build() -> LevelModel {
    let mut subtree = SceneSubtree::new();
    let total = TURNS * PER_TURN;

    let pick_set = (0..total)
        .map(|i| {
            let angle = i as f32 / PER_TURN as f32 * TAU;
            let y = (i as f32 / total as f32 - 0.5) * FIBER_HEIGHT;
            subtree.add(labelled_sphere(
                6.0,
                Vec3::new(angle.cos() * FIBER_RADIUS, y, angle.sin() * FIBER_RADIUS),
                rgb(0x6e4d6e, 1.0),
                format!("Nucleosome Cluster {}", i + 1),
                SemanticType::FiberCluster,
            ))
        })
        .collect();

    LevelModel::new(subtree, pick_set)
}
