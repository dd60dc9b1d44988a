//! Beads-on-a-string: nine histones and one open transcription site on a
//! continuous DNA tube.
//!
//! Nothing here is declared pickable individually. Every node is offered and
//! the level's pick filter keeps the histones and the complex parts.

use std::f32::consts::TAU;

use glam::Vec3;

use super::labelled_sphere;
use crate::scene::curve::CatmullRom;
use crate::scene::graph::{rgb, ObjectInfo, SceneNode, SceneSubtree, Shape, Transform, TubeGeometry};
use crate::scene::levels::SemanticType;
use crate::scene::traits::LevelModel;

const SITES: usize = 10;
const COMPLEX_SITE: usize = 5;
const HISTONE_RADIUS: f32 = 8.0;
const WRAPS: f32 = 1.65;
const RISE: f32 = 10.0;
const SITE_RING: f32 = 30.0;
const WRAP_SAMPLES: usize = 60;
const LINKER_SAMPLES: usize = 20;
const LINKER_SAG: f32 = 20.0;
const DNA_RADIUS: f32 = 0.5;

/// Basis the DNA wraps in around each histone.
struct WrapFrame {
    side: Vec3,
    forward: Vec3,
    turns: f32,
}

impl WrapFrame {
    fn new() -> Self {
        let up = Vec3::new(0.2, 1.0, 0.0).normalize();
        let side = Vec3::new(1.0, 0.0, 0.2).normalize();
        Self {
            side,
            forward: up.cross(side),
            turns: WRAPS * TAU,
        }
    }

    fn at(&self, centre: Vec3, angle: f32) -> Vec3 {
        centre + self.side * angle.cos() * HISTONE_RADIUS + self.forward * angle.sin() * HISTONE_RADIUS
    }

    fn entry(&self, centre: Vec3) -> Vec3 {
        self.at(centre, -self.turns / 2.0)
    }

    fn wrap(&self, centre: Vec3) -> impl Iterator<Item = Vec3> + '_ {
        (0..=WRAP_SAMPLES).map(move |j| {
            let t = j as f32 / WRAP_SAMPLES as f32;
            self.at(centre, t * self.turns - self.turns / 2.0)
        })
    }
}

pub fn build() -> LevelModel {
    let mut subtree = SceneSubtree::new();
    let frame = WrapFrame::new();
    let mut path: Vec<Vec3> = Vec::new();

    for i in 0..SITES {
        let angle = i as f32;
        let centre = Vec3::new(angle.cos() * SITE_RING, i as f32 * RISE, angle.sin() * SITE_RING);
        let complex = i == COMPLEX_SITE;

        if let Some(&previous) = path.last() {
            let entry = if complex { centre } else { frame.entry(centre) };
            path.extend(linker(previous, entry));
        }

        if complex {
            if path.is_empty() {
                path.push(centre);
            }
            add_complex(&mut subtree, centre);
        } else {
            subtree.add(labelled_sphere(
                HISTONE_RADIUS,
                centre,
                rgb(0x8a6e99, 1.0),
                "Histone Protein Complex",
                SemanticType::Histone,
            ));
            // The linker already ended on the entry point.
            let skip = usize::from(!path.is_empty());
            path.extend(frame.wrap(centre).skip(skip));
        }
    }

    let tube = match CatmullRom::new(path) {
        Some(curve) => {
            let divisions = curve.control_points().len() * 2;
            curve.points(divisions)
        }
        None => Vec::new(),
    };
    subtree.add(SceneNode::new(
        Shape::Tube(TubeGeometry {
            points: tube,
            radius: DNA_RADIUS,
        }),
        Transform::IDENTITY,
        rgb(0x0952a2, 1.0),
    ));

    let pick_set = subtree.all_ids();
    LevelModel::new(subtree, pick_set)
}

/// Sagging linker from `from` to `to`, without its first point.
fn linker(from: Vec3, to: Vec3) -> Vec<Vec3> {
    let control = from.lerp(to, 0.5) - Vec3::Y * LINKER_SAG;
    match CatmullRom::new(vec![from, control, to]) {
        Some(curve) => curve.points(LINKER_SAMPLES).into_iter().skip(1).collect(),
        None => Vec::new(),
    }
}

/// Polymerase flanked by two general transcription factors.
fn add_complex(subtree: &mut SceneSubtree, centre: Vec3) {
    subtree.add(
        SceneNode::new(
            Shape::Sphere { radius: 10.0 },
            Transform::from_translation(centre + Vec3::new(0.0, 5.0, 0.0))
                .with_scale(Vec3::new(1.0, 1.3, 0.8)),
            rgb(0xe67e22, 1.0),
        )
        .with_info(ObjectInfo::new("RNA Polymerase", SemanticType::TranscriptionComplex)),
    );
    for (offset, color) in [
        (Vec3::new(-12.0, -2.0, 3.0), 0x2980b9),
        (Vec3::new(12.0, -2.0, -3.0), 0x27ae60),
    ] {
        subtree.add(labelled_sphere(
            3.0,
            centre + offset,
            rgb(color, 1.0),
            "General Transcription Factor",
            SemanticType::TranscriptionComplex,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::tables::passes_pick_filter;
    use crate::scene::levels::ScaleLevel;

    fn tagged(model: &LevelModel, semantic_type: SemanticType) -> usize {
        model
            .subtree
            .iter()
            .filter(|(_, n)| n.info.as_ref().map(|i| i.semantic_type) == Some(semantic_type))
            .count()
    }

    #[test]
    fn test_nine_histones_and_one_complex() {
        let model = build();
        assert_eq!(tagged(&model, SemanticType::Histone), 9);
        assert_eq!(tagged(&model, SemanticType::TranscriptionComplex), 3);
    }

    #[test]
    fn test_filter_keeps_sites_and_drops_tube() {
        let model = build();
        let kept = model
            .pick_set
            .iter()
            .filter(|&&id| {
                model
                    .subtree
                    .info(id)
                    .is_some_and(|i| passes_pick_filter(ScaleLevel::Chromatin, i.semantic_type))
            })
            .count();
        assert_eq!(model.pick_set.len(), 13);
        assert_eq!(kept, 12);
    }

    #[test]
    fn test_tube_is_continuous() {
        let model = build();
        let (_, last) = model.subtree.iter().last().unwrap();
        let Shape::Tube(tube) = &last.shape else {
            panic!("last node is not the DNA tube");
        };
        // 9 wraps of 61 points, minus shared entries, plus 9 linkers of 20.
        assert!(tube.points.len() > 1000);
        for pair in tube.points.windows(2) {
            assert!(pair[0].distance(pair[1]) < 5.0);
        }
    }

    #[test]
    fn test_wrap_starts_at_entry() {
        let frame = WrapFrame::new();
        let centre = Vec3::new(3.0, 4.0, 5.0);
        let first = frame.wrap(centre).next().unwrap();
        assert!(first.distance(frame.entry(centre)) < 1e-5);
        assert!((first.distance(centre) - HISTONE_RADIUS).abs() < 1e-4);
    }
}
