//! Node hierarchy owned by a rig.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Parents are always
//! inserted before their children, so world matrices can be resolved in one
//! forward pass.

use vitrine_core::{Mat4, Rgb, Transform, Vec3};

/// Index of a node inside its [`Hierarchy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Primitive geometry attached to a node, in local units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Pure transform node with nothing to draw.
    Group,
    Sphere { radius: f32 },
    Capsule { radius: f32, length: f32 },
    Cuboid { size: Vec3 },
    Plane { width: f32, height: f32 },
    Cylinder { radius: f32, height: f32 },
}

/// Surface parameters of a drawable node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Rgb,
    pub emissive: Rgb,
    pub emissive_intensity: f32,
    pub metalness: f32,
    pub roughness: f32,
    pub opacity: f32,
    pub wireframe: bool,
}

impl Material {
    pub fn standard(color: Rgb) -> Self {
        Self {
            color,
            emissive: Rgb::BLACK,
            emissive_intensity: 1.0,
            metalness: 0.0,
            roughness: 1.0,
            opacity: 1.0,
            wireframe: false,
        }
    }

    pub fn surface(mut self, metalness: f32, roughness: f32) -> Self {
        self.metalness = metalness;
        self.roughness = roughness;
        self
    }

    pub fn glow(mut self, emissive: Rgb, intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn wireframe(mut self) -> Self {
        self.wireframe = true;
        self
    }
}

/// A named part with a local transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub shape: Shape,
    pub transform: Transform,
    pub material: Option<Material>,
    parent: Option<NodeId>,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Arena of nodes forming a tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hierarchy {
    nodes: Vec<Node>,
}

impl Hierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under `parent` (or at the root).
    ///
    /// # Panics
    /// If `parent` does not belong to this hierarchy.
    pub fn add(
        &mut self,
        parent: Option<NodeId>,
        name: impl Into<String>,
        shape: Shape,
        transform: Transform,
        material: Option<Material>,
    ) -> NodeId {
        if let Some(parent) = parent {
            assert!(parent.0 < self.nodes.len(), "parent {parent:?} out of range");
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.into(),
            shape,
            transform,
            material,
            parent,
        });
        id
    }

    /// Convenience for a transform-only node.
    pub fn group(
        &mut self,
        parent: Option<NodeId>,
        name: impl Into<String>,
        transform: Transform,
    ) -> NodeId {
        self.add(parent, name, Shape::Group, transform, None)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node with the given name. Meant for resolving handles once at
    /// construction, not for per-frame use.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn transform(&self, id: NodeId) -> &Transform {
        &self.nodes[id.0].transform
    }

    pub fn transform_mut(&mut self, id: NodeId) -> &mut Transform {
        &mut self.nodes[id.0].transform
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn materials_mut(&mut self) -> impl Iterator<Item = &mut Material> {
        self.nodes.iter_mut().filter_map(|n| n.material.as_mut())
    }

    /// World matrix of a single node.
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let node = &self.nodes[id.0];
        let local = node.transform.matrix();
        match node.parent {
            Some(parent) => self.world_matrix(parent) * local,
            None => local,
        }
    }

    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.world_matrix(id).transform_point3(Vec3::ZERO)
    }

    /// World matrices for every node, indexed like the arena.
    pub fn world_matrices(&self) -> Vec<Mat4> {
        let mut out: Vec<Mat4> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let local = node.transform.matrix();
            let world = match node.parent {
                Some(parent) => out[parent.0] * local,
                None => local,
            };
            out.push(world);
        }
        out
    }
}
