//! Component records
//!
//! A component is a named scene graph node: a local transform, appearance
//! references, animation references and ordered child references. Child
//! references are plain ids; they are looked up lazily, so a component may
//! name children declared later in the document or shared with other
//! parents.

use super::appearance::{Appearance, AppearanceRef, TextureRef};
use super::transform::{compose, TransformOp};
use crate::foundation::math::Mat4;

/// Scene graph node
#[derive(Debug, Clone)]
pub struct Component {
    /// Unique component id
    pub id: String,
    /// Composite local transform
    pub local_transform: Mat4,
    /// Material references; the first one is active
    pub materials: Vec<AppearanceRef>,
    /// Index into `materials` of the active reference
    pub active_material: usize,
    /// Texture reference and wrap lengths
    pub texture: TextureRef,
    /// Animation ids, applied in order after the local transform
    pub animations: Vec<String>,
    /// Child component ids in declaration order
    pub child_components: Vec<String>,
    /// Child primitive ids in declaration order
    pub child_primitives: Vec<String>,
    /// Appearance written by the inheritance pass
    pub(crate) resolved: Option<Appearance>,
}

impl Component {
    /// Component with identity transform, inherited appearance and no children
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            local_transform: Mat4::identity(),
            materials: vec![AppearanceRef::Inherit],
            active_material: 0,
            texture: TextureRef::default(),
            animations: Vec::new(),
            child_components: Vec::new(),
            child_primitives: Vec::new(),
            resolved: None,
        }
    }

    /// Builder: set the local transform operations
    #[must_use]
    pub fn with_transform(mut self, ops: &[TransformOp]) -> Self {
        self.local_transform = compose(ops);
        self
    }

    /// Builder: set a single material reference
    #[must_use]
    pub fn with_material(mut self, material: AppearanceRef) -> Self {
        self.materials = vec![material];
        self.active_material = 0;
        self
    }

    /// Builder: set the texture reference
    #[must_use]
    pub fn with_texture(mut self, texture: TextureRef) -> Self {
        self.texture = texture;
        self
    }

    /// Builder: append a child component reference
    #[must_use]
    pub fn with_component(mut self, id: impl Into<String>) -> Self {
        self.child_components.push(id.into());
        self
    }

    /// Builder: append a child primitive reference
    #[must_use]
    pub fn with_primitive(mut self, id: impl Into<String>) -> Self {
        self.child_primitives.push(id.into());
        self
    }

    /// Builder: append an animation reference
    #[must_use]
    pub fn with_animation(mut self, id: impl Into<String>) -> Self {
        self.animations.push(id.into());
        self
    }

    /// Active material reference
    pub fn material_ref(&self) -> &AppearanceRef {
        self.materials
            .get(self.active_material)
            .unwrap_or(&AppearanceRef::Inherit)
    }

    /// Advance to the next declared material reference, wrapping around
    pub fn cycle_material(&mut self) {
        if !self.materials.is_empty() {
            self.active_material = (self.active_material + 1) % self.materials.len();
        }
    }

    /// Appearance written by the last inheritance pass that reached this node
    pub const fn resolved_appearance(&self) -> Option<&Appearance> {
        self.resolved.as_ref()
    }
}
