//! Scale-level state machine.
//!
//! The controller owns the [`NavigationState`] and is the only writer of the
//! current level, the active pick-set and level visibility.

use glam::Vec3;

use crate::config::{ExplorerConfig, FramingRule};
use crate::interaction::picking::Ray;
use crate::scene::graph::NodeId;
use crate::scene::levels::ScaleLevel;
use crate::scene::registry::LevelRegistry;
use crate::scene::traits::{CameraRig, ModelError};

/// Objects currently lit up, and the level they belong to.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub level: ScaleLevel,
    pub nodes: Vec<NodeId>,
}

/// Mutable navigation state shared with the interaction engine by reference.
#[derive(Debug, Default)]
pub struct NavigationState {
    pub current_level: ScaleLevel,
    /// Effective pick-set of the current level; the only nodes ever ray-tested.
    pub pick_set: Vec<NodeId>,
    pub pointer_ray: Option<Ray>,
    pub highlighted: Option<Highlight>,
}

pub struct NavigationController {
    state: NavigationState,
    framing: Vec<FramingRule>,
}

impl NavigationController {
    pub fn new(config: &ExplorerConfig) -> Self {
        Self {
            state: NavigationState::default(),
            framing: ScaleLevel::all()
                .iter()
                .map(|&level| config.framing(level))
                .collect(),
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut NavigationState {
        &mut self.state
    }

    pub fn current_level(&self) -> ScaleLevel {
        self.state.current_level
    }

    pub fn framing(&self, level: ScaleLevel) -> FramingRule {
        self.framing[level.index()]
    }

    /// Make `level` the single visible level, anchored at `anchor` (origin when absent).
    ///
    /// Builds the level on first entry. On a factory fault nothing changes.
    pub fn enter(
        &mut self,
        registry: &mut LevelRegistry,
        camera: &mut dyn CameraRig,
        level: ScaleLevel,
        anchor: Option<Vec3>,
    ) -> Result<(), ModelError> {
        let anchor = anchor.unwrap_or(Vec3::ZERO);
        let entry = registry.ensure_built(level)?;
        entry.subtree.set_position(anchor);
        self.state.pick_set = entry.effective_pick_set().to_vec();

        for visible in registry.visible_levels() {
            registry.set_visible(visible, false);
        }
        registry.set_visible(level, true);

        let previous = self.state.current_level;
        self.state.current_level = level;

        let (target, eye) = self.framing(level).resolve(anchor);
        camera.set_target(target);
        camera.set_position(eye);

        log::info!("Entered {} from {} at {:?}", level, previous, anchor);
        Ok(())
    }

    /// Return to the parent level, anchored at the parent's stored position.
    ///
    /// No-op at the root.
    pub fn exit(
        &mut self,
        registry: &mut LevelRegistry,
        camera: &mut dyn CameraRig,
    ) -> Result<(), ModelError> {
        let current = self.state.current_level;
        let Some(parent) = current.parent() else {
            return Ok(());
        };

        let anchor = registry
            .get(parent)
            .or_else(|| registry.get(current))
            .map(|entry| entry.position());
        self.enter(registry, camera, parent, anchor)
    }

    /// Caption of the zoom-out control, `None` at the root.
    pub fn zoom_out_label(&self) -> Option<String> {
        self.state
            .current_level
            .parent()
            .map(|parent| format!("Zoom Out to {}", parent.display_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::graph::{rgb, ObjectInfo, SceneNode, SceneSubtree, Shape, Transform, TubeGeometry};
    use crate::scene::levels::SemanticType;
    use crate::scene::traits::{LevelModel, ModelFactory, TranscriptionRig};
    use glam::Vec2;

    #[derive(Default)]
    struct RecordingCamera {
        target: Vec3,
        position: Vec3,
    }

    impl CameraRig for RecordingCamera {
        fn set_target(&mut self, target: Vec3) {
            self.target = target;
        }

        fn set_position(&mut self, position: Vec3) {
            self.position = position;
        }

        fn ray_through(&self, _ndc: Vec2) -> Option<Ray> {
            Ray::new(self.position, self.target - self.position)
        }
    }

    struct OneBall;

    impl ModelFactory for OneBall {
        fn build(&mut self, level: ScaleLevel) -> LevelModel {
            let mut subtree = SceneSubtree::new();
            let id = subtree.add(
                SceneNode::new(Shape::Sphere { radius: 1.0 }, Transform::IDENTITY, rgb(0, 1.0))
                    .with_info(ObjectInfo::new("Histone Protein Complex", SemanticType::Histone)),
            );
            let mut model = LevelModel::new(subtree, vec![id]);
            if level != ScaleLevel::Transcription {
                return model;
            }
            let strand = model.subtree.add(SceneNode::new(
                Shape::Tube(TubeGeometry {
                    points: vec![Vec3::ZERO, Vec3::ONE],
                    radius: 0.3,
                }),
                Transform::IDENTITY,
                rgb(0, 1.0),
            ));
            model.with_rig(TranscriptionRig {
                path: vec![Vec3::ZERO, Vec3::Y],
                marker: id,
                strand,
                strand_seed: vec![Vec3::ZERO],
            })
        }
    }

    fn setup() -> (NavigationController, LevelRegistry, RecordingCamera) {
        let config = ExplorerConfig::default();
        (
            NavigationController::new(&config),
            LevelRegistry::new(Box::new(OneBall)),
            RecordingCamera::default(),
        )
    }

    #[test]
    fn test_enter_applies_framing_rule() {
        let (mut nav, mut registry, mut camera) = setup();
        let anchor = Vec3::new(10.0, 20.0, 30.0);
        nav.enter(&mut registry, &mut camera, ScaleLevel::Chromatin, Some(anchor))
            .unwrap();

        assert_eq!(camera.target, anchor + Vec3::new(0.0, 45.0, 0.0));
        assert_eq!(camera.position, camera.target + Vec3::new(0.0, 5.0, 200.0));
        assert_eq!(registry.get(ScaleLevel::Chromatin).unwrap().position(), anchor);
    }

    #[test]
    fn test_single_visible_level() {
        let (mut nav, mut registry, mut camera) = setup();
        for &level in ScaleLevel::all() {
            nav.enter(&mut registry, &mut camera, level, None).unwrap();
            assert_eq!(registry.visible_levels(), vec![level]);
            assert_eq!(nav.current_level(), level);
            assert_eq!(nav.state().pick_set, registry.effective_pick_set(level));
        }
    }

    #[test]
    fn test_exit_returns_to_parent_at_its_stored_position() {
        let (mut nav, mut registry, mut camera) = setup();
        let chromatin_at = Vec3::new(5.0, 0.0, 0.0);
        nav.enter(&mut registry, &mut camera, ScaleLevel::Chromatin, Some(chromatin_at))
            .unwrap();
        nav.enter(&mut registry, &mut camera, ScaleLevel::Transcription, Some(Vec3::new(9.0, 9.0, 9.0)))
            .unwrap();

        nav.exit(&mut registry, &mut camera).unwrap();
        assert_eq!(nav.current_level(), ScaleLevel::Chromatin);
        assert_eq!(registry.get(ScaleLevel::Chromatin).unwrap().position(), chromatin_at);
        assert_eq!(registry.visible_levels(), vec![ScaleLevel::Chromatin]);
    }

    #[test]
    fn test_exit_to_unbuilt_parent_uses_current_position() {
        let (mut nav, mut registry, mut camera) = setup();
        let at = Vec3::new(1.0, 2.0, 3.0);
        nav.enter(&mut registry, &mut camera, ScaleLevel::Dna, Some(at)).unwrap();

        nav.exit(&mut registry, &mut camera).unwrap();
        assert_eq!(nav.current_level(), ScaleLevel::Chromatin);
        assert_eq!(registry.get(ScaleLevel::Chromatin).unwrap().position(), at);
    }

    #[test]
    fn test_exit_at_root_is_noop() {
        let (mut nav, mut registry, mut camera) = setup();
        nav.enter(&mut registry, &mut camera, ScaleLevel::Cell, None).unwrap();
        nav.exit(&mut registry, &mut camera).unwrap();
        assert_eq!(nav.current_level(), ScaleLevel::Cell);
        assert_eq!(registry.build_count(ScaleLevel::Cell), 1);
        assert_eq!(nav.zoom_out_label(), None);
    }

    #[test]
    fn test_zoom_out_labels() {
        let (mut nav, mut registry, mut camera) = setup();
        nav.enter(&mut registry, &mut camera, ScaleLevel::Nucleus, None).unwrap();
        assert_eq!(nav.zoom_out_label().as_deref(), Some("Zoom Out to Cell"));
        nav.enter(&mut registry, &mut camera, ScaleLevel::Dna, None).unwrap();
        assert_eq!(nav.zoom_out_label().as_deref(), Some("Zoom Out to Nucleosomes"));
        nav.enter(&mut registry, &mut camera, ScaleLevel::Chromatin, None).unwrap();
        assert_eq!(nav.zoom_out_label().as_deref(), Some("Zoom Out to Chromatin Fiber"));
    }
}
