//! Per-level scene cache.
//!
//! Each level's subtree is built on first use and kept for the rest of the
//! session. The registry also owns visibility and the validated pick-set.

use glam::Vec3;

use crate::navigation::tables;
use crate::scene::graph::{NodeId, SceneSubtree, Shape};
use crate::scene::levels::ScaleLevel;
use crate::scene::traits::{LevelModel, ModelError, ModelFactory, TranscriptionRig};

/// Cached state of one built level.
#[derive(Debug)]
pub struct LevelEntry {
    pub level: ScaleLevel,
    pub subtree: SceneSubtree,
    /// Declared nodes that carry object info and pass the level's pick filter.
    effective: Vec<NodeId>,
    pub rig: Option<TranscriptionRig>,
    pub visible: bool,
}

impl LevelEntry {
    pub fn effective_pick_set(&self) -> &[NodeId] {
        &self.effective
    }

    /// World position of the subtree root.
    pub fn position(&self) -> Vec3 {
        self.subtree.position()
    }
}

/// Lazily built, memoized level subtrees.
pub struct LevelRegistry {
    factory: Box<dyn ModelFactory>,
    entries: Vec<Option<LevelEntry>>,
    build_counts: Vec<u32>,
}

impl LevelRegistry {
    pub fn new(factory: Box<dyn ModelFactory>) -> Self {
        let levels = ScaleLevel::all().len();
        Self {
            factory,
            entries: (0..levels).map(|_| None).collect(),
            build_counts: vec![0; levels],
        }
    }

    /// The entry for a level, if it has been built.
    pub fn get(&self, level: ScaleLevel) -> Option<&LevelEntry> {
        self.entries[level.index()].as_ref()
    }

    pub fn get_mut(&mut self, level: ScaleLevel) -> Option<&mut LevelEntry> {
        self.entries[level.index()].as_mut()
    }

    pub fn is_built(&self, level: ScaleLevel) -> bool {
        self.get(level).is_some()
    }

    /// Build the level on first call; later calls return the cached entry.
    pub fn ensure_built(&mut self, level: ScaleLevel) -> Result<&mut LevelEntry, ModelError> {
        let index = level.index();
        let slot = &mut self.entries[index];
        match slot {
            Some(entry) => Ok(entry),
            None => {
                self.build_counts[index] += 1;
                let entry = validate(level, self.factory.build(level))?;
                log::info!(
                    "Built {} model: {} nodes, {} pickable",
                    level,
                    entry.subtree.len(),
                    entry.effective.len()
                );
                Ok(slot.insert(entry))
            }
        }
    }

    /// Show or hide a built level. Unbuilt levels are ignored.
    pub fn set_visible(&mut self, level: ScaleLevel, visible: bool) {
        if let Some(entry) = self.get_mut(level) {
            entry.visible = visible;
        }
    }

    /// Effective pick-set of a built level, empty otherwise.
    pub fn effective_pick_set(&self, level: ScaleLevel) -> &[NodeId] {
        self.get(level).map_or(&[], |e| e.effective_pick_set())
    }

    /// Levels currently flagged visible, in chain order.
    pub fn visible_levels(&self) -> Vec<ScaleLevel> {
        self.entries
            .iter()
            .flatten()
            .filter(|e| e.visible)
            .map(|e| e.level)
            .collect()
    }

    /// Built entries in chain order.
    pub fn entries(&self) -> impl Iterator<Item = &LevelEntry> {
        self.entries.iter().flatten()
    }

    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut LevelEntry> {
        self.entries.iter_mut().flatten()
    }

    /// Number of factory invocations for a level.
    pub fn build_count(&self, level: ScaleLevel) -> u32 {
        self.build_counts[level.index()]
    }
}

fn validate(level: ScaleLevel, model: LevelModel) -> Result<LevelEntry, ModelError> {
    let LevelModel {
        subtree,
        pick_set,
        rig,
    } = model;

    if subtree.is_empty() {
        return Err(ModelError::EmptySubtree(level));
    }

    let filtered = tables::rules(level).pick_filter.is_some();
    let mut effective = Vec::with_capacity(pick_set.len());
    for &node in &pick_set {
        if subtree.node(node).is_none() {
            return Err(ModelError::PickOutOfRange { level, node });
        }
        match subtree.info(node) {
            Some(info) if tables::passes_pick_filter(level, info.semantic_type) => {
                effective.push(node)
            }
            Some(_) => {}
            // A filtered level may declare structural nodes; the filter drops them.
            None if filtered => {}
            None => return Err(ModelError::MissingInfo { level, node }),
        }
    }

    match (level, &rig) {
        (ScaleLevel::Transcription, None) => return Err(ModelError::MissingRig(level)),
        (_, Some(rig)) => validate_rig(level, &subtree, rig)?,
        _ => {}
    }

    Ok(LevelEntry {
        level,
        subtree,
        effective,
        rig,
        visible: false,
    })
}

fn validate_rig(
    level: ScaleLevel,
    subtree: &SceneSubtree,
    rig: &TranscriptionRig,
) -> Result<(), ModelError> {
    let invalid = |reason| ModelError::InvalidRig { level, reason };

    if rig.path.len() < 2 {
        return Err(invalid("path needs at least two control points"));
    }
    if rig.strand_seed.is_empty() {
        return Err(invalid("strand seed is empty"));
    }
    if subtree.node(rig.marker).is_none() {
        return Err(invalid("marker node is missing"));
    }
    match subtree.node(rig.strand).map(|n| &n.shape) {
        Some(Shape::Tube(_)) => Ok(()),
        Some(_) => Err(invalid("strand node is not a tube")),
        None => Err(invalid("strand node is missing")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::graph::{rgb, ObjectInfo, SceneNode, Transform, TubeGeometry};
    use crate::scene::levels::SemanticType;

    /// Factory that returns one labelled ball and one bare tube for every level.
    struct FixedFactory;

    impl ModelFactory for FixedFactory {
        fn build(&mut self, _level: ScaleLevel) -> LevelModel {
            let mut subtree = SceneSubtree::new();
            let ball = subtree.add(
                SceneNode::new(Shape::Sphere { radius: 1.0 }, Transform::IDENTITY, rgb(0xffffff, 1.0))
                    .with_info(ObjectInfo::new("Ball", SemanticType::Histone)),
            );
            let tube = subtree.add(SceneNode::new(
                Shape::Tube(TubeGeometry {
                    points: vec![Vec3::ZERO, Vec3::X],
                    radius: 0.1,
                }),
                Transform::IDENTITY,
                rgb(0xffffff, 1.0),
            ));
            LevelModel::new(subtree, vec![ball, tube])
        }
    }

    #[test]
    fn test_ensure_built_memoizes() {
        let mut registry = LevelRegistry::new(Box::new(FixedFactory));
        assert!(!registry.is_built(ScaleLevel::Chromatin));

        registry.ensure_built(ScaleLevel::Chromatin).unwrap();
        registry.ensure_built(ScaleLevel::Chromatin).unwrap();

        assert_eq!(registry.build_count(ScaleLevel::Chromatin), 1);
        assert_eq!(registry.build_count(ScaleLevel::Cell), 0);
    }

    #[test]
    fn test_filtered_level_drops_structural_nodes() {
        let mut registry = LevelRegistry::new(Box::new(FixedFactory));
        let entry = registry.ensure_built(ScaleLevel::Chromatin).unwrap();
        assert_eq!(entry.subtree.len(), 2);
        assert_eq!(entry.effective_pick_set(), &[NodeId(0)]);
    }

    #[test]
    fn test_unfiltered_level_requires_info() {
        let mut registry = LevelRegistry::new(Box::new(FixedFactory));
        let err = registry.ensure_built(ScaleLevel::Cell).unwrap_err();
        assert!(matches!(
            err,
            ModelError::MissingInfo {
                level: ScaleLevel::Cell,
                node: NodeId(1)
            }
        ));
        assert!(!registry.is_built(ScaleLevel::Cell));
    }

    #[test]
    fn test_visibility_only_touches_built_levels() {
        let mut registry = LevelRegistry::new(Box::new(FixedFactory));
        registry.set_visible(ScaleLevel::Chromatin, true);
        assert!(registry.visible_levels().is_empty());

        registry.ensure_built(ScaleLevel::Chromatin).unwrap();
        registry.set_visible(ScaleLevel::Chromatin, true);
        assert_eq!(registry.visible_levels(), vec![ScaleLevel::Chromatin]);
    }

    #[test]
    fn test_transcription_requires_a_rig() {
        struct NoRig;
        impl ModelFactory for NoRig {
            fn build(&mut self, _level: ScaleLevel) -> LevelModel {
                let mut subtree = SceneSubtree::new();
                let id = subtree.add(
                    SceneNode::new(Shape::Sphere { radius: 1.0 }, Transform::IDENTITY, rgb(0, 1.0))
                        .with_info(ObjectInfo::new("RNA Polymerase", SemanticType::TranscriptionEnzyme)),
                );
                LevelModel::new(subtree, vec![id])
            }
        }
        let mut registry = LevelRegistry::new(Box::new(NoRig));
        assert!(matches!(
            registry.ensure_built(ScaleLevel::Transcription),
            Err(ModelError::MissingRig(ScaleLevel::Transcription))
        ));
        assert!(registry.ensure_built(ScaleLevel::Dna).is_ok());
    }

    #[test]
    fn test_empty_model_is_rejected() {
        struct Empty;
        impl ModelFactory for Empty {
            fn build(&mut self, _level: ScaleLevel) -> LevelModel {
                LevelModel::new(SceneSubtree::new(), Vec::new())
            }
        }
        let mut registry = LevelRegistry::new(Box::new(Empty));
        assert!(matches!(
            registry.ensure_built(ScaleLevel::Dna),
            Err(ModelError::EmptySubtree(ScaleLevel::Dna))
        ));
    }

    #[test]
    fn test_out_of_range_pick() {
        struct Dangling;
        impl ModelFactory for Dangling {
            fn build(&mut self, _level: ScaleLevel) -> LevelModel {
                let mut subtree = SceneSubtree::new();
                subtree.add(SceneNode::new(
                    Shape::Sphere { radius: 1.0 },
                    Transform::IDENTITY,
                    rgb(0, 1.0),
                ));
                LevelModel::new(subtree, vec![NodeId(4)])
            }
        }
        let mut registry = LevelRegistry::new(Box::new(Dangling));
        assert!(matches!(
            registry.ensure_built(ScaleLevel::Nucleus),
            Err(ModelError::PickOutOfRange { node: NodeId(4), .. })
        ));
    }
}
