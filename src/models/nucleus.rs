use std::f32::consts::TAU;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::Rng;

use super::{centered, labelled_sphere};
use crate::scene::graph::{rgb, SceneSubtree};
use crate::scene::levels::SemanticType;
use crate::scene::traits::LevelModel;

pub const NUCLEUS_RADIUS: f32 = 80.0;

pub fn build(rng: &mut StdRng) -> LevelModel {
    let mut subtree = SceneSubtree::new();
    let mut pick_set = Vec::new();

    pick_set.push(subtree.add(labelled_sphere(
        NUCLEUS_RADIUS,
        Vec3::ZERO,
        rgb(0x3f51b5, 0.4),
        "Nuclear Membrane",
        SemanticType::NuclearMembrane,
    )));
    subtree.add(labelled_sphere(
        NUCLEUS_RADIUS - 3.0,
        Vec3::ZERO,
        rgb(0x5c6bc0, 0.3),
        "Nucleoplasm",
        SemanticType::Nucleoplasm,
    ));

    pick_set.push(subtree.add(labelled_sphere(
        15.0,
        Vec3::new(20.0, 15.0, -10.0),
        rgb(0xff5722, 1.0),
        "Nucleolus",
        SemanticType::Nucleolus,
    )));

    // Pores are uniform on the membrane.
    for i in 0..12 {
        let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
        let theta = rng.gen::<f32>() * TAU;
        let at = NUCLEUS_RADIUS
            * Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos());
        pick_set.push(subtree.add(labelled_sphere(
            2.0,
            at,
            rgb(0x00bcd4, 1.0),
            format!("Nuclear Pore {}", i + 1),
            SemanticType::NuclearPore,
        )));
    }

    for i in 0..6 {
        let angle = i as f32 / 6.0 * TAU;
        let ring = 30.0 + rng.gen::<f32>() * 20.0;
        let y = centered(rng, 40.0);
        let radius = 8.0 + rng.gen::<f32>() * 4.0;
        pick_set.push(subtree.add(labelled_sphere(
            radius,
            Vec3::new(angle.cos() * ring, y, angle.sin() * ring),
            rgb(0xb06d7f, 0.7),
            format!("Chromatin Territory {}", i + 1),
            SemanticType::ChromatinTerritory,
        )));
    }

    LevelModel::new(subtree, pick_set)
}
