use std::f32::consts::TAU;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::Rng;

use super::{centered, labelled_sphere, random_box, y_towards};
use crate::scene::graph::{rgb, ObjectInfo, SceneNode, SceneSubtree, Shape, Transform};
use crate::scene::levels::SemanticType;
use crate::scene::traits::LevelModel;

pub const MEMBRANE_RADIUS: f32 = 200.0;

/// Organelles scattered in a box centred on the cell.
struct Scatter {
    count: usize,
    spans: Vec3,
    radius: (f32, f32),
    color: (u32, f32),
    name: &'static str,
    semantic_type: SemanticType,
}

const SCATTERED: [Scatter; 4] = [
    Scatter {
        count: 5,
        spans: Vec3::new(100.0, 80.0, 100.0),
        radius: (3.0, 2.0),
        color: (0xf44336, 1.0),
        name: "Lysosome",
        semantic_type: SemanticType::Lysosome,
    },
    Scatter {
        count: 20,
        spans: Vec3::new(150.0, 120.0, 150.0),
        radius: (1.5, 0.0),
        color: (0x795548, 1.0),
        name: "Ribosome",
        semantic_type: SemanticType::Ribosome,
    },
    Scatter {
        count: 4,
        spans: Vec3::new(120.0, 100.0, 120.0),
        radius: (4.0, 2.0),
        color: (0x4caf50, 1.0),
        name: "Peroxisome",
        semantic_type: SemanticType::Peroxisome,
    },
    Scatter {
        count: 8,
        spans: Vec3::new(140.0, 110.0, 140.0),
        radius: (2.0, 3.0),
        color: (0x9e9e9e, 0.8),
        name: "Vesicle",
        semantic_type: SemanticType::Vesicle,
    },
];

pub fn build(rng: &mut StdRng) -> LevelModel {
    let mut subtree = SceneSubtree::new();
    let mut pick_set = Vec::new();

    pick_set.push(subtree.add(labelled_sphere(
        MEMBRANE_RADIUS,
        Vec3::ZERO,
        rgb(0x4caf50, 0.3),
        "Cell Membrane",
        SemanticType::CellMembrane,
    )));
    // Cytoplasm is drawn but never picked.
    subtree.add(labelled_sphere(
        MEMBRANE_RADIUS - 5.0,
        Vec3::ZERO,
        rgb(0x81c784, 0.2),
        "Cytoplasm",
        SemanticType::Cytoplasm,
    ));

    for i in 0..8 {
        let at = ring_position(rng, i as f32 / 8.0, (80.0, 40.0), 60.0);
        let radius = 8.0 + rng.gen::<f32>() * 4.0;
        pick_set.push(subtree.add(labelled_sphere(
            radius,
            at,
            rgb(0xff9800, 1.0),
            format!("Mitochondria {}", i + 1),
            SemanticType::Mitochondria,
        )));
    }

    for i in 0..6 {
        let at = ring_position(rng, i as f32 / 6.0, (60.0, 30.0), 40.0);
        let radius = 6.0 + rng.gen::<f32>() * 3.0;
        pick_set.push(subtree.add(labelled_sphere(
            radius,
            at,
            rgb(0x9c27b0, 1.0),
            format!("Endoplasmic Reticulum {}", i + 1),
            SemanticType::EndoplasmicReticulum,
        )));
    }

    pick_set.push(subtree.add(labelled_sphere(
        12.0,
        Vec3::new(40.0, 20.0, 30.0),
        rgb(0x2196f3, 1.0),
        "Golgi Apparatus",
        SemanticType::GolgiApparatus,
    )));

    for scatter in &SCATTERED {
        for i in 0..scatter.count {
            let at = random_box(rng, scatter.spans);
            let (base, extra) = scatter.radius;
            let radius = if extra > 0.0 {
                base + rng.gen::<f32>() * extra
            } else {
                base
            };
            pick_set.push(subtree.add(labelled_sphere(
                radius,
                at,
                rgb(scatter.color.0, scatter.color.1),
                format!("{} {}", scatter.name, i + 1),
                scatter.semantic_type,
            )));
        }
    }

    let tubule_box = Vec3::new(100.0, 80.0, 100.0);
    for i in 0..6 {
        let start = random_box(rng, tubule_box);
        let end = random_box(rng, tubule_box);
        let span = end - start;
        let length = span.length();
        let local = Transform::from_translation(start + span * 0.5).with_rotation(y_towards(span));
        pick_set.push(subtree.add(
            SceneNode::new(
                Shape::Cylinder {
                    radius: 0.5,
                    half_height: length * 0.5,
                },
                local,
                rgb(0x607d8b, 1.0),
            )
            .with_info(ObjectInfo::new(
                format!("Microtubule {}", i + 1),
                SemanticType::Cytoskeleton,
            )),
        ));
    }

    LevelModel::new(subtree, pick_set)
}

/// Point on a jittered ring: `fraction` of a turn, radius `base + rand * extra`.
fn ring_position(rng: &mut StdRng, fraction: f32, (base, extra): (f32, f32), y_span: f32) -> Vec3 {
    let angle = fraction * TAU;
    let radius = base + rng.gen::<f32>() * extra;
    let y = centered(rng, y_span);
    Vec3::new(angle.cos() * radius, y, angle.sin() * radius)
}
