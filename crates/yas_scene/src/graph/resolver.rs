//! Appearance inheritance
//!
//! Pre-order walk from the root carrying the nearest ancestor's resolved
//! appearance. Each node resolves its material and texture references with
//! [`InheritanceResolver::resolve_node`] and stores the result in its
//! resolved slot; a shared node keeps the value from the last path that
//! reached it.

use std::collections::HashSet;

use super::{ComponentGraph, ComponentKey, GraphError};
use crate::diagnostics::{Diagnostics, RefKind};
use crate::foundation::collections::IdTable;
use crate::scene::{Appearance, AppearanceRef, Component, Material, Texture};

/// Counters from one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// Node visits, counting shared nodes once per path
    pub visits: usize,
    /// Child references skipped because the id is undefined
    pub missing_children: usize,
}

/// Resolves `inherit` / `none` / explicit references to concrete appearances
#[derive(Debug, Clone, Copy)]
pub struct InheritanceResolver<'a> {
    materials: &'a IdTable<Material>,
    textures: &'a IdTable<Texture>,
}

impl<'a> InheritanceResolver<'a> {
    /// Create a resolver over the loaded material and texture tables
    pub const fn new(materials: &'a IdTable<Material>, textures: &'a IdTable<Texture>) -> Self {
        Self { materials, textures }
    }

    /// Resolve one node given its ancestor's appearance
    ///
    /// `parent` is `None` only for the root. An `inherit` reference with no
    /// parent is treated as `none` and warned about once. Dangling explicit
    /// references are warned about once per id and fall back to the neutral
    /// material or to no texture.
    pub fn resolve_node(
        &self,
        component: &Component,
        parent: Option<&Appearance>,
        diagnostics: &mut Diagnostics,
    ) -> Appearance {
        let material = match component.material_ref() {
            AppearanceRef::Explicit(id) => match self.materials.get(id) {
                Some(material) => material.clone(),
                None => {
                    diagnostics.warn_once(RefKind::Material, id, || {
                        format!(
                            "material '{}' referenced by component '{}' is not defined",
                            id, component.id
                        )
                    });
                    Material::neutral()
                }
            },
            AppearanceRef::Inherit => match parent {
                Some(parent) => parent.material.clone(),
                None => {
                    warn_root_inherit(diagnostics, component, "material");
                    Material::neutral()
                }
            },
            AppearanceRef::None => Material::neutral(),
        };

        let declared = &component.texture;
        let (texture, default_s, default_t) = match &declared.reference {
            AppearanceRef::Explicit(id) => match self.textures.get(id) {
                Some(texture) => (Some(texture.clone()), texture.length_s, texture.length_t),
                None => {
                    diagnostics.warn_once(RefKind::Texture, id, || {
                        format!(
                            "texture '{}' referenced by component '{}' is not defined",
                            id, component.id
                        )
                    });
                    (None, 1.0, 1.0)
                }
            },
            AppearanceRef::Inherit => match parent {
                Some(parent) => (parent.texture.clone(), parent.length_s, parent.length_t),
                None => {
                    warn_root_inherit(diagnostics, component, "texture");
                    (None, 1.0, 1.0)
                }
            },
            AppearanceRef::None => (None, 1.0, 1.0),
        };

        Appearance {
            material,
            texture,
            length_s: declared.length_s.unwrap_or(default_s),
            length_t: declared.length_t.unwrap_or(default_t),
        }
    }

    /// Resolve every component reachable from `root`, writing each node's
    /// resolved slot
    ///
    /// Missing children are warned about once per id and skipped. A component
    /// reached again on its own ancestor path is a [`GraphError::Cycle`].
    pub fn resolve(
        &self,
        graph: &mut ComponentGraph,
        root: &str,
        diagnostics: &mut Diagnostics,
    ) -> Result<ResolveReport, GraphError> {
        let root_key = graph
            .key(root)
            .ok_or_else(|| GraphError::MissingRoot(root.to_string()))?;

        let mut pass = ResolvePass {
            resolver: *self,
            diagnostics,
            path: Vec::new(),
            on_path: HashSet::new(),
            report: ResolveReport::default(),
        };
        pass.visit(graph, root_key, None)?;
        Ok(pass.report)
    }
}

fn warn_root_inherit(diagnostics: &mut Diagnostics, component: &Component, what: &str) {
    let key = format!("{}:{}", component.id, what);
    diagnostics.warn_once(RefKind::RootInherit, &key, || {
        format!(
            "root component '{}' cannot inherit a {}; using none",
            component.id, what
        )
    });
}

struct ResolvePass<'r, 'd> {
    resolver: InheritanceResolver<'r>,
    diagnostics: &'d mut Diagnostics,
    path: Vec<String>,
    on_path: HashSet<ComponentKey>,
    report: ResolveReport,
}

impl ResolvePass<'_, '_> {
    fn visit(
        &mut self,
        graph: &mut ComponentGraph,
        key: ComponentKey,
        parent: Option<&Appearance>,
    ) -> Result<(), GraphError> {
        let Some(component) = graph.nodes.get(key) else {
            return Ok(());
        };
        if !self.on_path.insert(key) {
            return Err(GraphError::Cycle {
                path: ComponentGraph::cycle_path(&self.path, &component.id),
            });
        }

        let appearance = self.resolver.resolve_node(component, parent, self.diagnostics);
        let parent_id = component.id.clone();
        let children = component.child_components.clone();
        self.path.push(parent_id.clone());
        self.report.visits += 1;

        if let Some(component) = graph.nodes.get_mut(key) {
            component.resolved = Some(appearance.clone());
        }

        for child in &children {
            match graph.key(child) {
                Some(child_key) => self.visit(graph, child_key, Some(&appearance))?,
                None => {
                    self.report.missing_children += 1;
                    self.diagnostics.warn_once(RefKind::Component, child, || {
                        format!(
                            "component '{}' references undefined component '{}'",
                            parent_id, child
                        )
                    });
                }
            }
        }

        self.path.pop();
        self.on_path.remove(&key);
        Ok(())
    }
}
