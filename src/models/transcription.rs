use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};

use crate::scene::curve::CatmullRom;
use crate::scene::graph::{rgb, ObjectInfo, SceneNode, SceneSubtree, Shape, Transform, TubeGeometry};
use crate::scene::levels::SemanticType;
use crate::scene::traits::{LevelModel, TranscriptionRig};

const BASE_PAIRS: usize = 40;
const HELIX_RADIUS: f32 = 8.0;
const PAIR_SPACING: f32 = 3.4;
const BACKBONE_SEGMENTS: usize = 128;
const SEED_SEGMENTS: usize = 8;

/// Straight stretch of open DNA with a polymerase and its emerging RNA.
pub fn build() -> LevelModel {
    let mut subtree = SceneSubtree::new();

    let path: Vec<Vec3> = (0..BASE_PAIRS)
        .map(|i| Vec3::new(0.0, (i as f32 - BASE_PAIRS as f32 / 2.0) * PAIR_SPACING, 0.0))
        .collect();

    let backbone = CatmullRom::new(path.clone())
        .map(|curve| curve.points(BACKBONE_SEGMENTS))
        .unwrap_or_default();
    for (x, color) in [(-HELIX_RADIUS, 0x8a6e99), (HELIX_RADIUS, 0xf5a623)] {
        subtree.add(SceneNode::new(
            Shape::Tube(TubeGeometry {
                points: backbone.clone(),
                radius: 0.4,
            }),
            Transform::from_translation(Vec3::new(x, 0.0, 0.0)),
            rgb(color, 1.0),
        ));
    }

    for at in &path {
        subtree.add(SceneNode::new(
            Shape::Cylinder {
                radius: 0.2,
                half_height: HELIX_RADIUS,
            },
            Transform::from_translation(*at).with_rotation(Quat::from_rotation_z(FRAC_PI_2)),
            rgb(0xeeeeee, 1.0),
        ));
    }

    let marker = subtree.add(
        SceneNode::new(
            Shape::Sphere { radius: 12.0 },
            Transform::IDENTITY.with_scale(Vec3::new(1.2, 1.0, 0.8)),
            rgb(0xe67e22, 0.8),
        )
        .with_info(ObjectInfo::new("RNA Polymerase", SemanticType::TranscriptionEnzyme)),
    );

    let strand_seed = vec![Vec3::ZERO, Vec3::new(5.0, -5.0, 5.0)];
    let seed_points = CatmullRom::new(strand_seed.clone())
        .map(|curve| curve.points(SEED_SEGMENTS))
        .unwrap_or_default();
    let strand = subtree.add(
        SceneNode::new(
            Shape::Tube(TubeGeometry {
                points: seed_points,
                radius: 0.3,
            }),
            Transform::IDENTITY,
            rgb(0x9b59b6, 1.0),
        )
        .with_info(ObjectInfo::new("Emerging RNA Strand", SemanticType::TranscriptionProduct)),
    );

    LevelModel::new(subtree, vec![marker, strand]).with_rig(TranscriptionRig {
        path,
        marker,
        strand,
        strand_seed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_polymerase_and_strand_are_pickable() {
        let model = build();
        assert_eq!(model.subtree.len(), 2 + BASE_PAIRS + 2);
        let names: Vec<_> = model
            .pick_set
            .iter()
            .map(|&id| model.subtree.info(id).unwrap().display_name.as_str())
            .collect();
        assert_eq!(names, ["RNA Polymerase", "Emerging RNA Strand"]);
    }

    #[test]
    fn test_rig_points_at_its_nodes() {
        let model = build();
        let rig = model.rig.as_ref().unwrap();
        assert_eq!(rig.path.len(), BASE_PAIRS);
        assert_eq!(rig.marker, model.pick_set[0]);
        assert_eq!(rig.strand, model.pick_set[1]);
        assert!(matches!(
            model.subtree.node(rig.strand).unwrap().shape,
            Shape::Tube(_)
        ));
    }

    #[test]
    fn test_rungs_span_the_helix() {
        let model = build();
        let rung = model.subtree.node(crate::scene::graph::NodeId(2)).unwrap();
        let tip = rung.local.to_mat4().transform_point3(Vec3::new(0.0, HELIX_RADIUS, 0.0));
        assert!((tip.x.abs() - HELIX_RADIUS).abs() < 1e-4);
    }
}
