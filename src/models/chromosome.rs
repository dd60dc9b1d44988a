use glam::Vec3;

use super::labelled_sphere;
use crate::scene::curve::CatmullRom;
use crate::scene::graph::{rgb, SceneNode, SceneSubtree, Shape, Transform};
use crate::scene::levels::SemanticType;
use crate::scene::traits::LevelModel;

const ARMS: [[Vec3; 3]; 4] = [
    [Vec3::new(0.0, 15.0, 0.0), Vec3::new(20.0, 70.0, 0.0), Vec3::new(25.0, 130.0, 20.0)],
    [Vec3::new(0.0, 15.0, 0.0), Vec3::new(-20.0, 70.0, 0.0), Vec3::new(-25.0, 130.0, -20.0)],
    [Vec3::new(0.0, -15.0, 0.0), Vec3::new(20.0, -70.0, 0.0), Vec3::new(25.0, -130.0, -20.0)],
    [Vec3::new(0.0, -15.0, 0.0), Vec3::new(-20.0, -70.0, 0.0), Vec3::new(-25.0, -130.0, 20.0)],
];

const ARM_DIVISIONS: usize = 30;
/// Every third sample along an arm becomes a domain.
const DOMAIN_STRIDE: usize = 3;

pub fn build() -> LevelModel {
    let mut subtree = SceneSubtree::new();
    let mut pick_set = Vec::new();
    let color = rgb(0xb06d7f, 1.0);

    subtree.add(SceneNode::new(
        Shape::Sphere { radius: 20.0 },
        Transform::IDENTITY,
        color,
    ));

    for (arm, control) in ARMS.iter().enumerate() {
        let Some(curve) = CatmullRom::new(control.to_vec()) else {
            continue;
        };
        let samples = curve.points(ARM_DIVISIONS);
        for (j, at) in samples.into_iter().enumerate().step_by(DOMAIN_STRIDE) {
            // Numbering restarts every ten, so neighbouring arms share one number.
            let number = arm * 10 + j / DOMAIN_STRIDE + 1;
            pick_set.push(subtree.add(labelled_sphere(
                12.0,
                at,
                color,
                format!("Chromatin Domain {}", number),
                SemanticType::ChromosomeDomain,
            )));
        }
    }

    LevelModel::new(subtree, pick_set)
}
