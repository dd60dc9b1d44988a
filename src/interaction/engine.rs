//! Pointer interaction: ray recast, click resolution, hover highlight.
//!
//! Input handlers only record the cursor and a pending click. Everything
//! else runs from [`InteractionEngine`] methods called once per frame, always
//! against the pick-set held in [`NavigationState`].

use glam::{Vec2, Vec3};

use crate::config::HighlightSettings;
use crate::interaction::label;
use crate::interaction::picking::{Hit, Picker};
use crate::navigation::controller::{Highlight, NavigationState};
use crate::navigation::tables::{self, ClickAction};
use crate::scene::graph::NodeId;
use crate::scene::levels::{ScaleLevel, SemanticType};
use crate::scene::registry::LevelRegistry;
use crate::scene::traits::CameraRig;

/// Request to show the detail view for a clicked object.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRequest {
    pub semantic_type: SemanticType,
    pub display_name: String,
}

/// A click that landed on a pickable object.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedClick {
    pub detail: DetailRequest,
    /// `None` when the level's table does not allow this type.
    pub action: Option<ClickAction>,
    /// World position of the clicked object.
    pub anchor: Vec3,
}

pub struct InteractionEngine {
    picker: Box<dyn Picker>,
    highlight: HighlightSettings,
    pointer: Option<Vec2>,
    pending_click: bool,
}

impl InteractionEngine {
    pub fn new(picker: Box<dyn Picker>, highlight: HighlightSettings) -> Self {
        Self {
            picker,
            highlight,
            pointer: None,
            pending_click: false,
        }
    }

    /// Record the cursor in normalized device coordinates.
    pub fn pointer_moved(&mut self, ndc: Vec2) {
        self.pointer = Some(ndc);
    }

    /// Cursor left the viewport.
    pub fn pointer_left(&mut self) {
        self.pointer = None;
    }

    /// Record a click; resolved on the next frame.
    pub fn click(&mut self) {
        self.pending_click = true;
    }

    pub fn has_pending_click(&self) -> bool {
        self.pending_click
    }

    /// Recompute the pointer ray from the last cursor position.
    pub fn update_ray(&self, state: &mut NavigationState, camera: &dyn CameraRig) {
        state.pointer_ray = self.pointer.and_then(|ndc| camera.ray_through(ndc));
    }

    /// Nearest pickable object under the pointer in the current level.
    pub fn pick(&self, state: &NavigationState, registry: &LevelRegistry) -> Option<Hit> {
        let ray = state.pointer_ray.as_ref()?;
        let entry = registry.get(state.current_level).filter(|e| e.visible)?;
        self.picker.intersect(ray, &entry.subtree, &state.pick_set)
    }

    /// Consume the pending click, if any, and resolve it against the current level.
    pub fn take_click(
        &mut self,
        state: &NavigationState,
        registry: &LevelRegistry,
    ) -> Option<ResolvedClick> {
        if !std::mem::take(&mut self.pending_click) {
            return None;
        }

        let hit = self.pick(state, registry)?;
        let entry = registry.get(state.current_level)?;
        let info = entry.subtree.info(hit.node)?;
        let anchor = entry.subtree.world_position(hit.node)?;
        let action = tables::dispatch_click(state.current_level, info.semantic_type);

        log::debug!(
            "Click on {} ({}) in {}: {:?}",
            info.display_name,
            info.semantic_type,
            state.current_level,
            action
        );

        Some(ResolvedClick {
            detail: DetailRequest {
                semantic_type: info.semantic_type,
                display_name: info.display_name.clone(),
            },
            action,
            anchor,
        })
    }

    /// Clear the previous highlight, then highlight and label whatever is under the pointer.
    pub fn hover(&self, state: &mut NavigationState, registry: &mut LevelRegistry) -> Option<String> {
        clear_highlight(state, registry);

        let hit = self.pick(state, registry)?;
        let level = state.current_level;
        let entry = registry.get_mut(level)?;
        let info = entry.subtree.info(hit.node)?.clone();
        if !tables::hover_eligible(level, info.semantic_type) {
            return None;
        }

        let grouped = level == ScaleLevel::Dna && info.correlation_id.is_some();
        let (nodes, intensity, text) = if grouped {
            let group: Vec<NodeId> = state
                .pick_set
                .iter()
                .copied()
                .filter(|&id| {
                    entry
                        .subtree
                        .info(id)
                        .is_some_and(|other| other.correlation_id == info.correlation_id)
                })
                .collect();
            let text = label::nucleotide_label(&entry.subtree, hit.node, &group);
            (group, self.highlight.hover, text)
        } else if info.bond {
            (vec![hit.node], self.highlight.lone_bond, info.display_name.clone())
        } else {
            (vec![hit.node], self.highlight.hover, label::object_label(&info))
        };

        for &id in &nodes {
            if let Some(node) = entry.subtree.node_mut(id) {
                node.emissive = intensity;
            }
        }
        state.highlighted = Some(Highlight { level, nodes });
        Some(text)
    }
}

/// Remove the stored highlight, wherever it lives.
pub fn clear_highlight(state: &mut NavigationState, registry: &mut LevelRegistry) {
    let Some(previous) = state.highlighted.take() else {
        return;
    };
    if let Some(entry) = registry.get_mut(previous.level) {
        for id in previous.nodes {
            if let Some(node) = entry.subtree.node_mut(id) {
                node.emissive = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::picking::{Ray, ShapePicker};
    use crate::scene::graph::{rgb, ObjectInfo, SceneNode, SceneSubtree, Shape, Transform};
    use crate::scene::traits::{LevelModel, ModelFactory};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Picker that records every candidate list it is handed.
    struct Recording {
        seen: Rc<RefCell<Vec<Vec<NodeId>>>>,
    }

    impl Picker for Recording {
        fn intersect(&self, ray: &Ray, subtree: &SceneSubtree, candidates: &[NodeId]) -> Option<Hit> {
            self.seen.borrow_mut().push(candidates.to_vec());
            ShapePicker.intersect(ray, subtree, candidates)
        }
    }

    /// Dna-like level: a nucleotide of three parts stacked on the Z axis and a lone bond.
    struct Helix;

    impl ModelFactory for Helix {
        fn build(&mut self, _level: ScaleLevel) -> LevelModel {
            let mut subtree = SceneSubtree::new();
            let mut ids = Vec::new();
            for (i, name) in ["Adenine", "Deoxyribose Sugar", "Phosphate Group"].iter().enumerate() {
                ids.push(subtree.add(
                    SceneNode::new(
                        Shape::Sphere { radius: 1.0 },
                        Transform::from_translation(Vec3::new(0.0, 0.0, -(i as f32) * 5.0)),
                        rgb(0x0952a2, 1.0),
                    )
                    .with_info(ObjectInfo::new(*name, SemanticType::DnaComponent).with_correlation(0)),
                ));
            }
            ids.push(subtree.add(
                SceneNode::new(
                    Shape::Sphere { radius: 1.0 },
                    Transform::from_translation(Vec3::new(10.0, 0.0, 0.0)),
                    rgb(0xeeeeee, 1.0),
                )
                .with_info(ObjectInfo::new("Hydrogen Bond", SemanticType::DnaComponent).as_bond()),
            ));
            LevelModel::new(subtree, ids)
        }
    }

    fn setup() -> (NavigationState, LevelRegistry) {
        let mut registry = LevelRegistry::new(Box::new(Helix));
        let entry = registry.ensure_built(ScaleLevel::Dna).unwrap();
        entry.visible = true;
        let state = NavigationState {
            current_level: ScaleLevel::Dna,
            pick_set: entry.effective_pick_set().to_vec(),
            ..NavigationState::default()
        };
        (state, registry)
    }

    fn aim(state: &mut NavigationState, x: f32) {
        state.pointer_ray = Ray::new(Vec3::new(x, 0.0, 100.0), Vec3::NEG_Z);
    }

    fn emissive(registry: &LevelRegistry, id: u32) -> f32 {
        registry
            .get(ScaleLevel::Dna)
            .unwrap()
            .subtree
            .node(NodeId(id))
            .unwrap()
            .emissive
    }

    #[test]
    fn test_hover_highlights_whole_nucleotide() {
        let (mut state, mut registry) = setup();
        let engine = InteractionEngine::new(Box::new(ShapePicker), HighlightSettings::default());
        aim(&mut state, 0.0);

        let text = engine.hover(&mut state, &mut registry).unwrap();
        assert!(text.starts_with("HOVERING:  Adenine\n(Atoms: C, H, N)"));
        assert!(text.contains("\n Deoxyribose Sugar\n Phosphate Group"));

        let highlighted = state.highlighted.as_ref().unwrap();
        assert_eq!(highlighted.nodes.len(), 3);
        for id in 0..3 {
            assert!((emissive(&registry, id) - 0x55 as f32 / 255.0).abs() < 1e-6);
        }
        assert_eq!(emissive(&registry, 3), 0.0);
    }

    #[test]
    fn test_lone_bond_gets_stronger_highlight_and_moving_away_clears() {
        let (mut state, mut registry) = setup();
        let engine = InteractionEngine::new(Box::new(ShapePicker), HighlightSettings::default());

        aim(&mut state, 0.0);
        engine.hover(&mut state, &mut registry);
        aim(&mut state, 10.0);
        let text = engine.hover(&mut state, &mut registry).unwrap();

        assert_eq!(text, "Hydrogen Bond");
        assert!((emissive(&registry, 3) - 0xaa as f32 / 255.0).abs() < 1e-6);
        for id in 0..3 {
            assert_eq!(emissive(&registry, id), 0.0);
        }

        aim(&mut state, -50.0);
        assert!(engine.hover(&mut state, &mut registry).is_none());
        assert!(state.highlighted.is_none());
        assert_eq!(emissive(&registry, 3), 0.0);
    }

    #[test]
    fn test_only_the_active_pick_set_is_tested() {
        let (mut state, mut registry) = setup();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let engine = InteractionEngine::new(
            Box::new(Recording { seen: seen.clone() }),
            HighlightSettings::default(),
        );
        state.pick_set.truncate(2);
        aim(&mut state, 0.0);

        engine.hover(&mut state, &mut registry);
        assert_eq!(seen.borrow().as_slice(), &[vec![NodeId(0), NodeId(1)]]);
    }

    #[test]
    fn test_click_is_consumed_once_and_dispatched() {
        let (mut state, registry) = setup();
        let mut engine = InteractionEngine::new(Box::new(ShapePicker), HighlightSettings::default());
        aim(&mut state, 0.0);

        assert!(engine.take_click(&state, &registry).is_none());
        engine.click();
        let click = engine.take_click(&state, &registry).unwrap();
        assert_eq!(click.detail.semantic_type, SemanticType::DnaComponent);
        assert_eq!(click.detail.display_name, "Adenine");
        assert_eq!(click.action, Some(ClickAction::Drill(ScaleLevel::Transcription)));
        assert_eq!(click.anchor, Vec3::ZERO);
        assert!(!engine.has_pending_click());
        assert!(engine.take_click(&state, &registry).is_none());
    }

    #[test]
    fn test_click_on_nothing_is_ignored() {
        let (mut state, registry) = setup();
        let mut engine = InteractionEngine::new(Box::new(ShapePicker), HighlightSettings::default());
        aim(&mut state, 40.0);
        engine.click();
        assert!(engine.take_click(&state, &registry).is_none());
        assert!(!engine.has_pending_click());
    }

    #[test]
    fn test_hidden_level_is_not_picked() {
        let (mut state, mut registry) = setup();
        registry.set_visible(ScaleLevel::Dna, false);
        let engine = InteractionEngine::new(Box::new(ShapePicker), HighlightSettings::default());
        aim(&mut state, 0.0);
        assert!(engine.pick(&state, &registry).is_none());
    }
}
