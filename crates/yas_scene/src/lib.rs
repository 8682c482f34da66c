//! # YAS Scene
//!
//! Loads a declarative, hierarchical 3D scene description (views, lights,
//! textures, materials, reusable transformations, primitives and a tree of
//! named components), builds an in-memory component graph with appearance
//! inheritance, and renders it through a depth-first, transform-stack
//! balanced traversal.
//!
//! ## Pipeline
//!
//! ```text
//! DocumentSource ──fetch──▶ DocumentNode tree
//!                               │
//!                         SceneLoader (sections, records, components)
//!                               │
//!                 ComponentGraph ──▶ InheritanceResolver
//!                               │
//!                         SceneRenderer ──draw──▶ Renderer backend
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use yas_scene::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     yas_scene::foundation::logging::init();
//!
//!     let source = FileSource::new("scenes/demo.xml");
//!     let scene = SceneLoader::new(LoaderConfig::default()).load_from(&source, &mut ())?;
//!
//!     let mut backend = RecordingRenderer::default();
//!     let mut renderer = SceneRenderer::new(AppearanceMode::SharedSlot);
//!     let stats = renderer.render(&scene, &mut backend);
//!     log::info!("issued {} draw calls", stats.draw_calls);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod diagnostics;
pub mod document;
pub mod foundation;
pub mod geometry;
pub mod graph;
pub mod loader;
pub mod render;
pub mod scene;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        config::{AppearanceMode, Config, ConfigError, LoaderConfig},
        diagnostics::{Diagnostic, DiagnosticSink, Diagnostics, LogSink, Severity},
        document::{DocumentError, DocumentNode, DocumentSource, FileSource, TextSource},
        foundation::math::{Mat4, Mat4Ext, Vec3, Vec4},
        geometry::{GeometryError, Mesh, PrimitiveFactory, Vertex},
        graph::{ComponentGraph, GraphError, InheritanceResolver},
        loader::{LoadError, LoadListener, SceneLoader},
        render::{
            AnimationSource, Appearance, RecordingRenderer, RenderStats, Renderer,
            SceneRenderer, TransformStack,
        },
        scene::{
            AppearanceRef, Component, Light, Material, Primitive, PrimitiveShape, Scene,
            Texture, TextureRef, TransformOp, View,
        },
    };
}
