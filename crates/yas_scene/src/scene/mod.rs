//! Scene data model
//!
//! Typed records produced by the loader and the [`Scene`] that owns them.
//! Everything here is created once during load and is immutable afterwards,
//! apart from the per-component resolved appearance written by the
//! inheritance pass.

mod appearance;
mod component;
mod light;
mod primitive;
mod transform;
mod view;

#[cfg(test)]
mod tests;

pub use appearance::{
    is_reserved_id, Appearance, AppearanceRef, Material, Rgba, Texture, TextureRef, INHERIT_ID,
    NONE_ID,
};
pub use component::Component;
pub use light::{Illumination, Light, LightKind};
pub use primitive::{Primitive, PrimitiveShape};
pub use transform::{compose, Axis, NamedTransform, TransformOp};
pub use view::{View, ViewKind};

use crate::diagnostics::{Diagnostics, WarnedIds};
use crate::foundation::collections::IdTable;
use crate::graph::{ComponentGraph, GraphError, InheritanceResolver};

/// A fully loaded scene
#[derive(Debug, Clone)]
pub struct Scene {
    /// Id of the root component
    pub root: String,
    /// Length of the reference axes drawn by debug overlays
    pub axis_length: f32,
    /// Views in declaration order
    pub views: IdTable<View>,
    /// Id of the default view; always names an entry of `views`
    pub default_view: String,
    /// Global ambient and background
    pub illumination: Illumination,
    /// Lights in declaration order
    pub lights: IdTable<Light>,
    /// Textures by id
    pub textures: IdTable<Texture>,
    /// Materials by id
    pub materials: IdTable<Material>,
    /// Named transformations by id
    pub transformations: IdTable<NamedTransform>,
    /// Primitives with their generated meshes
    pub primitives: IdTable<Primitive>,
    /// Component graph, resolved
    pub graph: ComponentGraph,
    /// Soft limit on active lights
    pub max_lights: usize,
    /// References already reported while loading
    pub warned: WarnedIds,
}

impl Scene {
    /// The default view
    pub fn default_view(&self) -> Option<&View> {
        self.views.get(&self.default_view)
    }

    /// Enabled lights in declaration order, capped at the light limit
    pub fn active_lights(&self) -> impl Iterator<Item = &Light> {
        self.lights
            .iter()
            .map(|(_, light)| light)
            .filter(|light| light.enabled)
            .take(self.max_lights)
    }

    /// The root component
    pub fn root_component(&self) -> Option<&Component> {
        self.graph.get(&self.root)
    }

    /// Advance every component with several materials to its next one and
    /// re-run inheritance resolution
    ///
    /// References reported while loading are not reported again.
    pub fn cycle_materials(&mut self, diagnostics: &mut Diagnostics) -> Result<(), GraphError> {
        self.graph.cycle_materials();
        diagnostics.absorb(&self.warned);
        InheritanceResolver::new(&self.materials, &self.textures)
            .resolve(&mut self.graph, &self.root, diagnostics)?;
        self.warned.extend(diagnostics.warned());
        Ok(())
    }
}
