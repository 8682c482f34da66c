//! Record sections: views, ambient, lights, textures, materials,
//! transformations and primitives

use super::attributes::{
    boolean_or, float, integer, optional_float, required_child, rgba, string, vec3, vec4,
};
use super::parser::{duplicate, SceneParser};
use super::LoadError;
use crate::document::DocumentNode;
use crate::foundation::collections::IdTable;
use crate::foundation::math::Vec3;
use crate::geometry::PrimitiveFactory;
use crate::scene::{
    is_reserved_id, Axis, Illumination, Light, LightKind, Material, NamedTransform, Primitive,
    PrimitiveShape, Texture, TransformOp, View, ViewKind,
};

const SHAPE_TAGS: [&str; 5] = ["rectangle", "triangle", "cylinder", "sphere", "torus"];

impl SceneParser<'_, '_> {
    pub(super) fn parse_views(
        &mut self,
        node: &DocumentNode,
    ) -> Result<(IdTable<View>, String), LoadError> {
        let mut views = IdTable::new();

        for child in node.children() {
            let kind_tag = child.name.as_str();
            if kind_tag != "perspective" && kind_tag != "ortho" {
                self.unknown_tag(kind_tag, "views");
                continue;
            }
            let id = string(child, "id", "a view")?;
            let context = format!("view '{}'", id);

            let kind = if kind_tag == "perspective" {
                ViewKind::Perspective {
                    angle: float(child, "angle", &context)?,
                }
            } else {
                ViewKind::Orthographic {
                    left: float(child, "left", &context)?,
                    right: float(child, "right", &context)?,
                    top: float(child, "top", &context)?,
                    bottom: float(child, "bottom", &context)?,
                }
            };

            let view = View {
                id: id.to_string(),
                kind,
                near: float(child, "near", &context)?,
                far: float(child, "far", &context)?,
                from: vec3(required_child(child, "from", &context)?, &context)?,
                to: vec3(required_child(child, "to", &context)?, &context)?,
            };
            views.insert(id, view).map_err(duplicate("view"))?;
        }

        let Some((first, _)) = views.first() else {
            return Err(LoadError::Empty("view"));
        };
        let first = first.to_string();

        let default_view = match node.get_string("default") {
            Some(id) if views.contains(id) => id.to_string(),
            Some(id) => {
                self.diagnostics.warning(format!(
                    "default view '{}' is not defined; using '{}'",
                    id, first
                ));
                first
            }
            None => {
                self.diagnostics
                    .warning(format!("no default view declared; using '{}'", first));
                first
            }
        };

        self.diagnostics.info(format!("Parsed {} views", views.len()));
        Ok((views, default_view))
    }

    pub(super) fn parse_ambient(&mut self, node: &DocumentNode) -> Result<Illumination, LoadError> {
        let mut illumination = Illumination::default();
        let mut has_ambient = false;
        let mut has_background = false;

        for child in node.children() {
            match child.name.as_str() {
                "ambient" if !has_ambient => {
                    illumination.ambient = rgba(child, "the global ambient")?;
                    has_ambient = true;
                }
                "background" if !has_background => {
                    illumination.background = rgba(child, "the background")?;
                    has_background = true;
                }
                other => self.unknown_tag(other, "ambient"),
            }
        }

        if !has_ambient {
            self.diagnostics
                .warning("no global ambient declared; using black");
        }
        if !has_background {
            self.diagnostics
                .warning("no background declared; using black");
        }

        self.diagnostics.info("Parsed ambient");
        Ok(illumination)
    }

    pub(super) fn parse_lights(
        &mut self,
        node: &DocumentNode,
    ) -> Result<IdTable<Light>, LoadError> {
        let mut lights = IdTable::new();

        for child in node.children() {
            let is_spot = match child.name.as_str() {
                "omni" => false,
                "spot" => true,
                other => {
                    self.unknown_tag(other, "lights");
                    continue;
                }
            };
            let id = string(child, "id", "a light")?;
            let context = format!("light '{}'", id);

            let kind = if is_spot {
                LightKind::Spot {
                    target: vec3(required_child(child, "target", &context)?, &context)?,
                    angle: float(child, "angle", &context)?,
                    exponent: float(child, "exponent", &context)?,
                }
            } else {
                LightKind::Omni
            };

            for property in child.children() {
                let known = matches!(
                    property.name.as_str(),
                    "location" | "ambient" | "diffuse" | "specular"
                ) || (is_spot && property.name == "target");
                if !known {
                    self.unknown_tag(&property.name, &child.name);
                }
            }

            let light = Light {
                id: id.to_string(),
                kind,
                enabled: boolean_or(child, "enabled", true, &context)?,
                location: vec4(required_child(child, "location", &context)?, &context)?,
                ambient: rgba(required_child(child, "ambient", &context)?, &context)?,
                diffuse: rgba(required_child(child, "diffuse", &context)?, &context)?,
                specular: rgba(required_child(child, "specular", &context)?, &context)?,
            };
            lights.insert(id, light).map_err(duplicate("light"))?;
        }

        if lights.is_empty() {
            return Err(LoadError::Empty("light"));
        }
        if lights.len() > self.config.max_lights {
            self.diagnostics.warning(format!(
                "too many lights defined ({}); only the first {} enabled lights are used",
                lights.len(),
                self.config.max_lights
            ));
        }

        self.diagnostics.info(format!("Parsed {} lights", lights.len()));
        Ok(lights)
    }

    pub(super) fn parse_textures(
        &mut self,
        node: &DocumentNode,
    ) -> Result<IdTable<Texture>, LoadError> {
        let mut textures = IdTable::new();

        for child in node.children() {
            if child.name != "texture" {
                self.unknown_tag(&child.name, "textures");
                continue;
            }
            let id = string(child, "id", "a texture")?;
            if is_reserved_id(id) {
                return Err(LoadError::ReservedId { category: "texture", id: id.to_string() });
            }
            let context = format!("texture '{}'", id);

            let texture = Texture {
                id: id.to_string(),
                file: string(child, "file", &context)?.to_string(),
                length_s: optional_float(child, "length_s", &context)?.unwrap_or(1.0),
                length_t: optional_float(child, "length_t", &context)?.unwrap_or(1.0),
            };
            textures.insert(id, texture).map_err(duplicate("texture"))?;
        }

        if textures.is_empty() {
            return Err(LoadError::Empty("texture"));
        }
        self.diagnostics.info(format!("Parsed {} textures", textures.len()));
        Ok(textures)
    }

    pub(super) fn parse_materials(
        &mut self,
        node: &DocumentNode,
    ) -> Result<IdTable<Material>, LoadError> {
        let mut materials = IdTable::new();

        for child in node.children() {
            if child.name != "material" {
                self.unknown_tag(&child.name, "materials");
                continue;
            }
            let id = string(child, "id", "a material")?;
            if is_reserved_id(id) {
                return Err(LoadError::ReservedId { category: "material", id: id.to_string() });
            }
            let context = format!("material '{}'", id);

            let mut material = Material {
                id: id.to_string(),
                shininess: float(child, "shininess", &context)?,
                ..Material::neutral()
            };
            for colour in child.children() {
                let slot = match colour.name.as_str() {
                    "emission" => &mut material.emission,
                    "ambient" => &mut material.ambient,
                    "diffuse" => &mut material.diffuse,
                    "specular" => &mut material.specular,
                    other => {
                        self.unknown_tag(other, "material");
                        continue;
                    }
                };
                *slot = rgba(colour, &context)?;
            }
            materials.insert(id, material).map_err(duplicate("material"))?;
        }

        if materials.is_empty() {
            return Err(LoadError::Empty("material"));
        }
        self.diagnostics.info(format!("Parsed {} materials", materials.len()));
        Ok(materials)
    }

    pub(super) fn parse_transformations(
        &mut self,
        node: &DocumentNode,
    ) -> Result<IdTable<NamedTransform>, LoadError> {
        let mut transformations = IdTable::new();

        for child in node.children() {
            if child.name != "transformation" {
                self.unknown_tag(&child.name, "transformations");
                continue;
            }
            let id = string(child, "id", "a transformation")?;
            let context = format!("transformation '{}'", id);
            let ops = self.parse_transform_ops(child, &context)?;
            transformations
                .insert(id, NamedTransform { id: id.to_string(), ops })
                .map_err(duplicate("transformation"))?;
        }

        self.diagnostics
            .info(format!("Parsed {} transformations", transformations.len()));
        Ok(transformations)
    }

    /// Inline `translate` / `rotate` / `scale` children in declaration order
    pub(super) fn parse_transform_ops(
        &mut self,
        node: &DocumentNode,
        context: &str,
    ) -> Result<Vec<TransformOp>, LoadError> {
        let mut ops = Vec::new();
        for op in node.children() {
            match op.name.as_str() {
                "translate" => ops.push(TransformOp::Translate(vec3(op, context)?)),
                "scale" => ops.push(TransformOp::Scale(vec3(op, context)?)),
                "rotate" => {
                    let axis_name = string(op, "axis", context)?;
                    let axis = Axis::parse(axis_name).ok_or_else(|| LoadError::UnknownAxis {
                        context: context.to_string(),
                        axis: axis_name.to_string(),
                    })?;
                    ops.push(TransformOp::Rotate {
                        axis,
                        angle: float(op, "angle", context)?,
                    });
                }
                other => self.unknown_tag(other, &node.name),
            }
        }
        Ok(ops)
    }

    pub(super) fn parse_primitives(
        &mut self,
        node: &DocumentNode,
    ) -> Result<IdTable<Primitive>, LoadError> {
        let mut primitives = IdTable::new();

        for child in node.children() {
            if child.name != "primitive" {
                self.unknown_tag(&child.name, "primitives");
                continue;
            }
            let id = string(child, "id", "a primitive")?;
            let context = format!("primitive '{}'", id);

            let shapes: Vec<&DocumentNode> = child
                .children()
                .iter()
                .filter(|shape| SHAPE_TAGS.contains(&shape.name.as_str()))
                .collect();
            for other in child.children() {
                if !SHAPE_TAGS.contains(&other.name.as_str()) {
                    self.unknown_tag(&other.name, "primitive");
                }
            }
            let [shape_node] = shapes.as_slice() else {
                return Err(LoadError::ShapeCount { id: id.to_string(), found: shapes.len() });
            };

            let shape = parse_shape(shape_node, &context)?;
            let mesh = PrimitiveFactory::build(&shape).map_err(|source| LoadError::Geometry {
                id: id.to_string(),
                source,
            })?;
            primitives
                .insert(id, Primitive { id: id.to_string(), shape, mesh })
                .map_err(duplicate("primitive"))?;
        }

        self.diagnostics.info(format!("Parsed {} primitives", primitives.len()));
        Ok(primitives)
    }
}

fn parse_shape(node: &DocumentNode, context: &str) -> Result<PrimitiveShape, LoadError> {
    let shape = match node.name.as_str() {
        "rectangle" => PrimitiveShape::Rectangle {
            x1: float(node, "x1", context)?,
            y1: float(node, "y1", context)?,
            x2: float(node, "x2", context)?,
            y2: float(node, "y2", context)?,
        },
        "triangle" => PrimitiveShape::Triangle {
            vertices: [
                corner(node, "x1", "y1", "z1", context)?,
                corner(node, "x2", "y2", "z2", context)?,
                corner(node, "x3", "y3", "z3", context)?,
            ],
        },
        "cylinder" => PrimitiveShape::Cylinder {
            base: float(node, "base", context)?,
            top: float(node, "top", context)?,
            height: float(node, "height", context)?,
            slices: integer(node, "slices", context)?,
            stacks: integer(node, "stacks", context)?,
        },
        "sphere" => PrimitiveShape::Sphere {
            radius: float(node, "radius", context)?,
            slices: integer(node, "slices", context)?,
            stacks: integer(node, "stacks", context)?,
        },
        _ => PrimitiveShape::Torus {
            inner: float(node, "inner", context)?,
            outer: float(node, "outer", context)?,
            slices: integer(node, "slices", context)?,
            loops: integer(node, "loops", context)?,
        },
    };
    Ok(shape)
}

fn corner(
    node: &DocumentNode,
    x: &'static str,
    y: &'static str,
    z: &'static str,
    context: &str,
) -> Result<Vec3, LoadError> {
    Ok(Vec3::new(
        float(node, x, context)?,
        float(node, y, context)?,
        float(node, z, context)?,
    ))
}
