//! Looping transcription animation.
//!
//! The polymerase marker walks the rig's path by arc length. Behind it a
//! bounded queue of strand points grows whenever the marker has moved far
//! enough, and the strand tube is regenerated from the queue.

use std::collections::VecDeque;

use glam::Vec3;

use crate::config::TranscriptionSettings;
use crate::scene::curve::CatmullRom;
use crate::scene::graph::{Shape, TubeGeometry};
use crate::scene::registry::LevelEntry;

/// Upper bound on points reserved up front; the queue grows past it on demand.
const PREALLOCATED_POINTS: usize = 64;

/// Bounded FIFO of strand control points.
#[derive(Debug, Clone)]
pub struct StrandQueue {
    points: VecDeque<Vec3>,
    capacity: usize,
    threshold: f32,
}

impl StrandQueue {
    pub fn new(seed: &[Vec3], capacity: usize, threshold: f32) -> Self {
        let mut queue = Self {
            points: VecDeque::with_capacity(capacity.saturating_add(1).min(PREALLOCATED_POINTS)),
            capacity: capacity.max(1),
            threshold,
        };
        queue.reseed(seed);
        queue
    }

    /// Replace the contents with `seed`, keeping its newest points if it is too long.
    pub fn reseed(&mut self, seed: &[Vec3]) {
        self.points.clear();
        let skip = seed.len().saturating_sub(self.capacity);
        self.points.extend(seed.iter().skip(skip).copied());
    }

    /// Append `candidate` when it is farther than the threshold from the newest point.
    ///
    /// Evicts the oldest point when over capacity. Returns whether the queue changed.
    pub fn offer(&mut self, candidate: Vec3) -> bool {
        let far_enough = self
            .points
            .back()
            .map_or(true, |last| candidate.distance(*last) > self.threshold);
        if !far_enough {
            return false;
        }
        self.points.push_back(candidate);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
        true
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn last(&self) -> Option<Vec3> {
        self.points.back().copied()
    }

    pub fn points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.points.iter().copied()
    }
}

/// Drives the transcription level while it is current.
pub struct TranscriptionAnimator {
    settings: TranscriptionSettings,
    progress: f32,
    path: Option<CatmullRom>,
    queue: StrandQueue,
    /// Strand geometries replaced and dropped so far.
    released: u64,
}

impl TranscriptionAnimator {
    pub fn new(settings: TranscriptionSettings) -> Self {
        Self {
            settings,
            progress: 0.0,
            path: None,
            queue: StrandQueue::new(&[], settings.capacity, settings.threshold),
            released: 0,
        }
    }

    /// Restart from the beginning of the path. The strand keeps its points.
    pub fn reset(&mut self) {
        self.progress = 0.0;
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn queue(&self) -> &StrandQueue {
        &self.queue
    }

    pub fn released_geometries(&self) -> u64 {
        self.released
    }

    /// Advance one frame. Returns whether the strand geometry was rebuilt.
    pub fn tick(&mut self, entry: &mut LevelEntry) -> bool {
        let Some(rig) = entry.rig.as_ref() else {
            return false;
        };

        if self.path.is_none() {
            self.path = CatmullRom::new(rig.path.clone());
            self.queue.reseed(&rig.strand_seed);
        }
        let Some(path) = self.path.as_ref() else {
            return false;
        };

        self.progress = (self.progress + self.settings.progress_step).rem_euclid(1.0);
        let marker_at = path.point_at(self.progress);
        if let Some(marker) = entry.subtree.node_mut(rig.marker) {
            marker.local.translation = marker_at;
        }

        let sag = Vec3::new(0.0, -(self.queue.len() as f32) * self.settings.sag, 0.0);
        let candidate = marker_at + self.settings.strand_offset + sag;
        if !self.queue.offer(candidate) {
            return false;
        }

        let tube = Shape::Tube(TubeGeometry {
            points: strand_points(&self.queue, self.settings.tube_segments),
            radius: self.settings.tube_radius,
        });
        if let Some(previous) = entry.subtree.replace_shape(rig.strand, tube) {
            drop(previous);
            self.released += 1;
            log::trace!(
                "Rebuilt strand from {} points, released geometry #{}",
                self.queue.len(),
                self.released
            );
        }
        true
    }
}

/// Tube centreline sampled from the queue.
fn strand_points(queue: &StrandQueue, segments: usize) -> Vec<Vec3> {
    let control: Vec<Vec3> = queue.points().collect();
    if control.len() < 2 {
        return control;
    }
    match CatmullRom::new(control) {
        Some(curve) => curve.points(segments),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::graph::{rgb, NodeId, ObjectInfo, SceneNode, SceneSubtree, Transform};
    use crate::scene::levels::{ScaleLevel, SemanticType};
    use crate::scene::registry::LevelRegistry;
    use crate::scene::traits::{LevelModel, ModelFactory, TranscriptionRig};
    use proptest::prelude::*;

    struct Rigged;

    impl ModelFactory for Rigged {
        fn build(&mut self, _level: ScaleLevel) -> LevelModel {
            let mut subtree = SceneSubtree::new();
            let marker = subtree.add(
                SceneNode::new(Shape::Sphere { radius: 12.0 }, Transform::IDENTITY, rgb(0xe67e22, 0.8))
                    .with_info(ObjectInfo::new("RNA Polymerase", SemanticType::TranscriptionEnzyme)),
            );
            let seed = vec![Vec3::ZERO, Vec3::new(5.0, -5.0, 5.0)];
            let strand = subtree.add(
                SceneNode::new(
                    Shape::Tube(TubeGeometry {
                        points: seed.clone(),
                        radius: 0.3,
                    }),
                    Transform::IDENTITY,
                    rgb(0x9b59b6, 1.0),
                )
                .with_info(ObjectInfo::new("Emerging RNA Strand", SemanticType::TranscriptionProduct)),
            );
            let path = (0..40)
                .map(|i| Vec3::new(0.0, (i as f32 - 20.0) * 3.4, 0.0))
                .collect();
            LevelModel::new(subtree, vec![marker, strand]).with_rig(TranscriptionRig {
                path,
                marker,
                strand,
                strand_seed: seed,
            })
        }
    }

    fn built_registry() -> LevelRegistry {
        let mut registry = LevelRegistry::new(Box::new(Rigged));
        registry.ensure_built(ScaleLevel::Transcription).unwrap();
        registry
    }

    fn transcription(registry: &mut LevelRegistry) -> &mut LevelEntry {
        registry.get_mut(ScaleLevel::Transcription).unwrap()
    }

    #[test]
    fn test_queue_threshold_and_capacity() {
        let mut queue = StrandQueue::new(&[Vec3::ZERO], 3, 1.0);
        assert!(!queue.offer(Vec3::new(0.5, 0.0, 0.0)));
        assert!(!queue.offer(Vec3::new(1.0, 0.0, 0.0)), "exactly at threshold is rejected");
        assert!(queue.offer(Vec3::new(1.5, 0.0, 0.0)));
        assert!(queue.offer(Vec3::new(3.0, 0.0, 0.0)));
        assert!(queue.offer(Vec3::new(5.0, 0.0, 0.0)));
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.points().next(), Some(Vec3::new(1.5, 0.0, 0.0)));
    }

    #[test]
    fn test_unbounded_capacity_accepts_points() {
        let mut queue = StrandQueue::new(&[Vec3::ZERO], usize::MAX, 1.0);
        assert_eq!(queue.capacity(), usize::MAX);
        assert_eq!(queue.len(), 1);
        for i in 1..=100 {
            assert!(queue.offer(Vec3::new(i as f32 * 2.0, 0.0, 0.0)));
        }
        assert_eq!(queue.len(), 101);
    }

    #[test]
    fn test_long_seed_is_truncated_to_newest() {
        let seed: Vec<Vec3> = (0..5).map(|i| Vec3::splat(i as f32)).collect();
        let queue = StrandQueue::new(&seed, 2, 1.0);
        assert_eq!(queue.points().collect::<Vec<_>>(), vec![Vec3::splat(3.0), Vec3::splat(4.0)]);
    }

    #[test]
    fn test_first_tick_moves_marker_and_grows_strand() {
        let mut registry = built_registry();
        let mut animator = TranscriptionAnimator::new(TranscriptionSettings::default());
        let entry = transcription(&mut registry);

        assert!(animator.tick(entry));
        assert!((animator.progress() - 0.001).abs() < 1e-6);
        assert_eq!(animator.queue().len(), 3);
        assert_eq!(animator.released_geometries(), 1);

        let marker = entry.subtree.node(NodeId(0)).unwrap().local.translation;
        assert!((marker.y - (-68.0 + 0.001 * 39.0 * 3.4)).abs() < 1e-2, "marker {:?}", marker);

        let Shape::Tube(tube) = &entry.subtree.node(NodeId(1)).unwrap().shape else {
            panic!("strand is not a tube");
        };
        assert_eq!(tube.points.len(), 33);
        assert_eq!(tube.radius, 0.3);
    }

    #[test]
    fn test_strand_only_rebuilt_when_queue_changes() {
        let mut registry = built_registry();
        let mut animator = TranscriptionAnimator::new(TranscriptionSettings::default());
        let entry = transcription(&mut registry);

        let mut rebuilds = 0;
        for _ in 0..100 {
            if animator.tick(entry) {
                rebuilds += 1;
            }
        }
        assert_eq!(animator.released_geometries(), rebuilds);
        assert!(rebuilds > 1 && rebuilds < 100, "rebuilds {}", rebuilds);
    }

    #[test]
    fn test_reset_restarts_progress_only() {
        let mut registry = built_registry();
        let mut animator = TranscriptionAnimator::new(TranscriptionSettings::default());
        let entry = transcription(&mut registry);
        for _ in 0..50 {
            animator.tick(entry);
        }
        let strand_len = animator.queue().len();
        animator.reset();
        assert_eq!(animator.progress(), 0.0);
        assert_eq!(animator.queue().len(), strand_len);
    }

    #[test]
    fn test_progress_wraps() {
        let mut registry = built_registry();
        let settings = TranscriptionSettings {
            progress_step: 0.3,
            ..TranscriptionSettings::default()
        };
        let mut animator = TranscriptionAnimator::new(settings);
        let entry = transcription(&mut registry);
        for _ in 0..4 {
            animator.tick(entry);
        }
        assert!((animator.progress() - 0.2).abs() < 1e-5);
    }

    proptest! {
        /// Progress stays in [0, 1), the queue never exceeds capacity, and
        /// consecutive appended points are farther apart than the threshold.
        #[test]
        fn prop_animator_bounds(
            step in 0.0005f32..0.2,
            threshold in 0.1f32..5.0,
            capacity in 2usize..40,
            ticks in 1usize..400,
        ) {
            let mut registry = built_registry();
            let settings = TranscriptionSettings {
                progress_step: step,
                threshold,
                capacity,
                ..TranscriptionSettings::default()
            };
            let mut animator = TranscriptionAnimator::new(settings);
            let entry = transcription(&mut registry);

            let mut appended: Vec<Vec3> = Vec::new();
            for _ in 0..ticks {
                if animator.tick(entry) {
                    appended.push(animator.queue().last().unwrap());
                }
                prop_assert!(animator.progress() >= 0.0 && animator.progress() < 1.0);
                prop_assert!(animator.queue().len() <= capacity);
            }
            for pair in appended.windows(2) {
                prop_assert!(pair[0].distance(pair[1]) > threshold);
            }
        }
    }
}
