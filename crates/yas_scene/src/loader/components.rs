//! The `<components>` section
//!
//! Components are collected in one pass in declaration order. Child
//! references are stored as ids only; whether they exist is checked after
//! the whole section has been read.

use super::attributes::{optional_float, required_child, string};
use super::parser::SceneParser;
use super::LoadError;
use crate::document::DocumentNode;
use crate::foundation::collections::IdTable;
use crate::graph::{ComponentGraph, GraphError};
use crate::scene::{AppearanceRef, Component, NamedTransform, TextureRef, TransformOp};

impl SceneParser<'_, '_> {
    pub(super) fn parse_components(
        &mut self,
        node: &DocumentNode,
        transformations: &IdTable<NamedTransform>,
    ) -> Result<ComponentGraph, LoadError> {
        let mut graph = ComponentGraph::new();

        for child in node.children() {
            if child.name != "component" {
                self.unknown_tag(&child.name, "components");
                continue;
            }
            let component = self.parse_component(child, transformations)?;
            graph.insert(component).map_err(|err| match err {
                GraphError::DuplicateId(id) => LoadError::DuplicateId { category: "component", id },
                other => LoadError::Graph(other),
            })?;
        }

        self.diagnostics.info(format!("Parsed {} components", graph.len()));
        Ok(graph)
    }

    fn parse_component(
        &mut self,
        node: &DocumentNode,
        transformations: &IdTable<NamedTransform>,
    ) -> Result<Component, LoadError> {
        let id = string(node, "id", "a component")?;
        let context = format!("component '{}'", id);
        let mut component = Component::new(id);

        for block in node.children() {
            match block.name.as_str() {
                "transformation" => {
                    let ops = self.parse_component_transform(block, id, transformations, &context)?;
                    component = component.with_transform(&ops);
                }
                "materials" => {
                    component.materials = self.parse_material_refs(block, &context)?;
                    component.active_material = 0;
                }
                "texture" => {
                    let reference = AppearanceRef::from_id(string(block, "id", &context)?);
                    component.texture = TextureRef {
                        reference,
                        length_s: optional_float(block, "length_s", &context)?,
                        length_t: optional_float(block, "length_t", &context)?,
                    };
                }
                "animations" => {
                    for animation in block.children() {
                        if animation.name == "animationref" {
                            let id = string(animation, "id", &context)?;
                            component.animations.push(id.to_string());
                        } else {
                            self.unknown_tag(&animation.name, "animations");
                        }
                    }
                }
                "children" => {}
                other => self.unknown_tag(other, "component"),
            }
        }

        for reference in required_child(node, "children", &context)?.children() {
            match reference.name.as_str() {
                "componentref" => component
                    .child_components
                    .push(string(reference, "id", &context)?.to_string()),
                "primitiveref" => component
                    .child_primitives
                    .push(string(reference, "id", &context)?.to_string()),
                other => self.unknown_tag(other, "children"),
            }
        }

        Ok(component)
    }

    /// Either one `transformationref` or a list of inline operations
    fn parse_component_transform(
        &mut self,
        block: &DocumentNode,
        component: &str,
        transformations: &IdTable<NamedTransform>,
        context: &str,
    ) -> Result<Vec<TransformOp>, LoadError> {
        let Some(reference) = block.child("transformationref") else {
            return self.parse_transform_ops(block, context);
        };

        let id = string(reference, "id", context)?;
        let named = transformations
            .get(id)
            .ok_or_else(|| LoadError::UndefinedTransformation {
                component: component.to_string(),
                id: id.to_string(),
            })?;
        if block.children().len() > 1 {
            self.diagnostics.warning(format!(
                "{} mixes a transformationref with other operations; only '{}' is used",
                context, id
            ));
        }
        Ok(named.ops.clone())
    }

    fn parse_material_refs(
        &mut self,
        block: &DocumentNode,
        context: &str,
    ) -> Result<Vec<AppearanceRef>, LoadError> {
        let mut materials = Vec::new();
        for material in block.children() {
            if material.name == "material" {
                materials.push(AppearanceRef::from_id(string(material, "id", context)?));
            } else {
                self.unknown_tag(&material.name, "materials");
            }
        }
        if materials.is_empty() {
            return Err(LoadError::MissingElement {
                context: context.to_string(),
                element: "material",
            });
        }
        Ok(materials)
    }
}
