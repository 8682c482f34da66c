//! Document walk
//!
//! [`SceneParser`] visits the sections in canonical order. Each section
//! parser lives next to related ones (`records.rs`, `components.rs`) as an
//! `impl SceneParser` block.

use super::attributes::{float, string};
use super::sections::SectionNodes;
use super::LoadError;
use crate::config::LoaderConfig;
use crate::diagnostics::{Diagnostics, WarnedIds};
use crate::document::DocumentNode;
use crate::foundation::collections::DuplicateId;
use crate::graph::InheritanceResolver;
use crate::scene::Scene;

/// One load pass over a document
pub(super) struct SceneParser<'c, 'd> {
    pub(super) config: &'c LoaderConfig,
    pub(super) diagnostics: &'d mut Diagnostics,
}

impl<'c, 'd> SceneParser<'c, 'd> {
    pub fn new(config: &'c LoaderConfig, diagnostics: &'d mut Diagnostics) -> Self {
        Self { config, diagnostics }
    }

    pub fn parse(mut self, document: &DocumentNode) -> Result<Scene, LoadError> {
        if document.name != self.config.root_tag {
            return Err(LoadError::RootTag {
                expected: self.config.root_tag.clone(),
                found: document.name.clone(),
            });
        }

        let nodes =
            SectionNodes::locate(document, self.config.strict_section_order, self.diagnostics)?;

        let (root, axis_length) = self.parse_scene(nodes.scene)?;
        let (views, default_view) = self.parse_views(nodes.views)?;
        let illumination = self.parse_ambient(nodes.ambient)?;
        let lights = self.parse_lights(nodes.lights)?;
        let textures = self.parse_textures(nodes.textures)?;
        let materials = self.parse_materials(nodes.materials)?;
        let transformations = self.parse_transformations(nodes.transformations)?;
        let primitives = self.parse_primitives(nodes.primitives)?;
        let graph = self.parse_components(nodes.components, &transformations)?;

        let mut scene = Scene {
            root,
            axis_length,
            views,
            default_view,
            illumination,
            lights,
            textures,
            materials,
            transformations,
            primitives,
            graph,
            max_lights: self.config.max_lights,
            warned: WarnedIds::default(),
        };

        let references =
            scene
                .graph
                .check_references(&scene.root, &scene.primitives, self.diagnostics)?;
        log::debug!(
            "Reference check: {} reachable, {} missing components, {} missing primitives",
            references.reachable,
            references.missing_components,
            references.missing_primitives
        );

        let resolved = InheritanceResolver::new(&scene.materials, &scene.textures).resolve(
            &mut scene.graph,
            &scene.root,
            self.diagnostics,
        )?;
        self.diagnostics.info(format!(
            "Resolved appearance for {} component visits",
            resolved.visits
        ));
        scene.warned = self.diagnostics.warned().clone();
        self.diagnostics.info("Scene graph ready");

        Ok(scene)
    }

    fn parse_scene(&mut self, node: &DocumentNode) -> Result<(String, f32), LoadError> {
        let root = string(node, "root", "the <scene> block")?.to_string();
        let axis_length = float(node, "axis_length", "the <scene> block")?;
        self.diagnostics.info(format!("Parsed scene (root = {})", root));
        Ok((root, axis_length))
    }

    /// Warn about a child tag the section does not know
    pub(super) fn unknown_tag(&mut self, tag: &str, section: &str) {
        self.diagnostics
            .warning(format!("unknown tag <{}> in <{}>", tag, section));
    }
}

/// Map a table's duplicate-id error into the load taxonomy
pub(super) fn duplicate(category: &'static str) -> impl FnOnce(DuplicateId) -> LoadError {
    move |DuplicateId(id)| LoadError::DuplicateId { category, id }
}
