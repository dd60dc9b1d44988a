//! Double helix of twenty base pairs.
//!
//! Every nucleotide is a sugar, a base and a phosphate sharing one
//! correlation id (`2 * pair + strand`). Hydrogen bonds are pickable but
//! belong to no nucleotide.

use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::Rng;

use super::y_towards;
use crate::scene::graph::{rgb, ObjectInfo, SceneNode, SceneSubtree, Shape, Transform};
use crate::scene::levels::SemanticType;
use crate::scene::traits::LevelModel;

pub const BASE_PAIRS: usize = 20;
const HELIX_RADIUS: f32 = 8.0;
const PAIR_SPACING: f32 = 3.4;
const TWIST_DEGREES: f32 = 36.0;
const BOND_SPACING: f32 = 0.4;

const SUGAR: (&str, u32) = ("Deoxyribose Sugar", 0x8a6e99);
const PHOSPHATE: (&str, u32) = ("Phosphate Group", 0xf5a623);

/// Purine box, then pyrimidine box, in full extents.
const PURINE: Vec3 = Vec3::new(3.0, 1.0, 1.5);
const PYRIMIDINE: Vec3 = Vec3::new(2.2, 1.0, 1.5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pairing {
    AdenineThymine,
    GuanineCytosine,
}

impl Pairing {
    fn bases(self) -> [(&'static str, u32); 2] {
        match self {
            Pairing::AdenineThymine => [("Adenine", 0x0952a2), ("Thymine", 0xdb4d56)],
            Pairing::GuanineCytosine => [("Guanine", 0x59a651), ("Cytosine", 0xf2d670)],
        }
    }

    fn hydrogen_bonds(self) -> usize {
        match self {
            Pairing::AdenineThymine => 2,
            Pairing::GuanineCytosine => 3,
        }
    }
}

fn part(shape: Shape, local: Transform, (name, color): (&str, u32), nucleotide: u32) -> SceneNode {
    SceneNode::new(shape, local, rgb(color, 1.0)).with_info(
        ObjectInfo::new(name, SemanticType::DnaComponent).with_correlation(nucleotide),
    )
}

/// Rotation taking local +Z onto `direction`.
fn z_towards(direction: Vec3) -> Quat {
    match direction.try_normalize() {
        Some(dir) => Quat::from_rotation_arc(Vec3::Z, dir),
        None => Quat::IDENTITY,
    }
}

pub fn build(rng: &mut StdRng) -> LevelModel {
    let mut subtree = SceneSubtree::new();
    let mut pick_set = Vec::new();
    let mut sugars: [Vec<Vec3>; 2] = [Vec::new(), Vec::new()];

    for i in 0..BASE_PAIRS {
        let y = (i as f32 - BASE_PAIRS as f32 / 2.0) * PAIR_SPACING;
        let angle = (i as f32 * TWIST_DEGREES).to_radians();
        let strand_at = |a: f32| Vec3::new(HELIX_RADIUS * a.cos(), y, HELIX_RADIUS * a.sin());
        let ends = [strand_at(angle), strand_at(angle + std::f32::consts::PI)];
        let mid = (ends[0] + ends[1]) * 0.5;
        let ids = [2 * i as u32, 2 * i as u32 + 1];

        let pairing = if rng.gen::<f32>() > 0.5 {
            Pairing::AdenineThymine
        } else {
            Pairing::GuanineCytosine
        };
        let bases = pairing.bases();

        let mut base_at = [Vec3::ZERO; 2];
        for strand in 0..2 {
            let here = ends[strand];
            let there = ends[1 - strand];
            base_at[strand] = here.lerp(mid, 0.4);
            let extents = if strand == 0 { PURINE } else { PYRIMIDINE };

            pick_set.push(subtree.add(part(
                Shape::Sphere { radius: 0.8 },
                Transform::from_translation(here),
                SUGAR,
                ids[strand],
            )));
            pick_set.push(subtree.add(part(
                Shape::Box {
                    half_extents: extents * 0.5,
                },
                Transform::from_translation(base_at[strand])
                    .with_rotation(z_towards(there - base_at[strand])),
                bases[strand],
                ids[strand],
            )));
            sugars[strand].push(here);
        }

        let bond = base_at[1] - base_at[0];
        let count = pairing.hydrogen_bonds();
        for j in 0..count {
            let offset = (j as f32 - (count as f32 - 1.0) / 2.0) * BOND_SPACING;
            let at = base_at[0].lerp(base_at[1], 0.5) + Vec3::Y * offset;
            pick_set.push(subtree.add(
                SceneNode::new(
                    Shape::Cylinder {
                        radius: 0.15,
                        half_height: bond.length() * 0.5,
                    },
                    Transform::from_translation(at).with_rotation(y_towards(bond)),
                    rgb(0xeeeeee, 1.0),
                )
                .with_info(ObjectInfo::new("Hydrogen Bond", SemanticType::DnaComponent).as_bond()),
            ));
        }
    }

    for (strand, positions) in sugars.iter().enumerate() {
        for (i, at) in backbone_midpoints(positions).into_iter().enumerate() {
            pick_set.push(subtree.add(part(
                Shape::Sphere { radius: 0.5 },
                Transform::from_translation(at),
                PHOSPHATE,
                (2 * i + strand) as u32,
            )));
        }
    }

    LevelModel::new(subtree, pick_set)
}

/// One phosphate per sugar, halfway to the next sugar. The last one
/// continues the previous step.
fn backbone_midpoints(sugars: &[Vec3]) -> Vec<Vec3> {
    let n = sugars.len();
    (0..n)
        .map(|i| match (sugars.get(i + 1), i.checked_sub(1)) {
            (Some(next), _) => sugars[i].lerp(*next, 0.5),
            (None, Some(prev)) => sugars[i] + (sugars[i] - sugars[prev]) * 0.5,
            (None, None) => sugars[i],
        })
        .collect()
}
