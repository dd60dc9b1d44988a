//! Minimal scene graph used by every scale level.
//!
//! A level is one [`SceneSubtree`]: a flat arena of [`SceneNode`]s under a
//! single root transform. Nodes never move relative to their root except the
//! transcription marker and strand, so world positions are always
//! `root * local`.

use glam::{Mat4, Quat, Vec3};

use crate::scene::levels::SemanticType;

/// Index of a node inside its subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Translation, rotation and non-uniform scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Polyline with a radius, rendered and picked as a chain of capsules.
#[derive(Debug, Clone, PartialEq)]
pub struct TubeGeometry {
    pub points: Vec<Vec3>,
    pub radius: f32,
}

/// Geometric primitive of a node, in node-local space.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    Box { half_extents: Vec3 },
    /// Cylinder along local Y.
    Cylinder { radius: f32, half_height: f32 },
    Tube(TubeGeometry),
}

/// Metadata that makes a node an interactive object.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectInfo {
    pub display_name: String,
    pub semantic_type: SemanticType,
    /// Groups the parts of one nucleotide at the Dna level.
    pub correlation_id: Option<u32>,
    /// Bond-type part (hydrogen bond); excluded from nucleotide listings.
    pub bond: bool,
}

impl ObjectInfo {
    pub fn new(display_name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            display_name: display_name.into(),
            semantic_type,
            correlation_id: None,
            bond: false,
        }
    }

    pub fn with_correlation(mut self, id: u32) -> Self {
        self.correlation_id = Some(id);
        self
    }

    pub fn as_bond(mut self) -> Self {
        self.bond = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub shape: Shape,
    pub local: Transform,
    /// Linear RGBA; alpha below 1 renders in the transparent pass.
    pub color: [f32; 4],
    /// Additive highlight, 0 when not hovered.
    pub emissive: f32,
    pub info: Option<ObjectInfo>,
}

impl SceneNode {
    pub fn new(shape: Shape, local: Transform, color: [f32; 4]) -> Self {
        Self {
            shape,
            local,
            color,
            emissive: 0.0,
            info: None,
        }
    }

    pub fn with_info(mut self, info: ObjectInfo) -> Self {
        self.info = Some(info);
        self
    }
}

/// All geometry of one scale level under a single root transform.
#[derive(Debug, Clone, Default)]
pub struct SceneSubtree {
    root: Transform,
    nodes: Vec<SceneNode>,
}

impl SceneSubtree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return its id.
    pub fn add(&mut self, node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.index())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.index())
    }

    pub fn info(&self, id: NodeId) -> Option<&ObjectInfo> {
        self.node(id).and_then(|n| n.info.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    /// Ids of every node, in insertion order.
    pub fn all_ids(&self) -> Vec<NodeId> {
        (0..self.nodes.len() as u32).map(NodeId).collect()
    }

    pub fn root(&self) -> &Transform {
        &self.root
    }

    /// World position of the subtree root.
    pub fn position(&self) -> Vec3 {
        self.root.translation
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.root.translation = position;
    }

    /// Rotate the root about its own Y axis.
    pub fn spin(&mut self, angle: f32) {
        self.root.rotation = (Quat::from_rotation_y(angle) * self.root.rotation).normalize();
    }

    /// Node-to-world matrix.
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        self.node(id)
            .map(|n| self.root.to_mat4() * n.local.to_mat4())
    }

    /// World position of a node's origin.
    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        self.node(id)
            .map(|n| self.root.to_mat4().transform_point3(n.local.translation))
    }

    /// Swap a node's shape, handing the previous one back to the caller.
    pub fn replace_shape(&mut self, id: NodeId, shape: Shape) -> Option<Shape> {
        self.node_mut(id)
            .map(|n| std::mem::replace(&mut n.shape, shape))
    }
}

/// Linear RGBA from a 0xRRGGBB literal.
pub fn rgb(hex: u32, alpha: f32) -> [f32; 4] {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    [channel(16), channel(8), channel(0), alpha]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(at: Vec3) -> SceneNode {
        SceneNode::new(
            Shape::Sphere { radius: 1.0 },
            Transform::from_translation(at),
            rgb(0xffffff, 1.0),
        )
    }

    #[test]
    fn test_world_position_follows_root() {
        let mut subtree = SceneSubtree::new();
        let id = subtree.add(ball(Vec3::new(1.0, 0.0, 0.0)));
        subtree.set_position(Vec3::new(10.0, 5.0, 0.0));

        let world = subtree.world_position(id).unwrap();
        assert!((world - Vec3::new(11.0, 5.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_spin_rotates_children_about_root() {
        let mut subtree = SceneSubtree::new();
        let id = subtree.add(ball(Vec3::new(1.0, 0.0, 0.0)));
        subtree.spin(std::f32::consts::FRAC_PI_2);

        let world = subtree.world_position(id).unwrap();
        assert!((world - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5, "got {:?}", world);
    }

    #[test]
    fn test_replace_shape_returns_previous() {
        let mut subtree = SceneSubtree::new();
        let id = subtree.add(ball(Vec3::ZERO));
        let old = subtree.replace_shape(id, Shape::Sphere { radius: 2.0 });
        assert_eq!(old, Some(Shape::Sphere { radius: 1.0 }));
        assert_eq!(subtree.replace_shape(NodeId(9), Shape::Sphere { radius: 1.0 }), None);
    }

    #[test]
    fn test_rgb_channels() {
        assert_eq!(rgb(0xff0000, 0.5), [1.0, 0.0, 0.0, 0.5]);
    }
}
