//! Scene traversal and draw submission
//!
//! [`SceneRenderer`] walks the component graph depth-first from the root,
//! composing transforms on a [`TransformStack`] and handing each referenced
//! primitive to a backend [`Renderer`] together with the appearance in
//! effect. Missing references are skipped, never fatal; each distinct
//! missing id is reported once for the lifetime of the renderer, and not at
//! all if loading already reported it.

mod recording;
mod stack;

pub use recording::{DrawCall, RecordingRenderer};
pub use stack::{TransformScope, TransformStack};

pub use crate::scene::Appearance;

use std::collections::{HashMap, HashSet};

use crate::config::AppearanceMode;
use crate::diagnostics::{Diagnostics, RefKind};
use crate::foundation::math::Mat4;
use crate::geometry::Mesh;
use crate::graph::{ComponentKey, InheritanceResolver};
use crate::scene::Scene;

/// Backend that turns draw operations into pixels
pub trait Renderer {
    /// Called before the first draw of a frame
    fn begin_frame(&mut self) {}

    /// Draw one mesh with the given model transform and appearance
    fn draw(&mut self, transform: &Mat4, appearance: &Appearance, mesh: &Mesh);

    /// Called after the last draw of a frame
    fn end_frame(&mut self) {}
}

/// Supplies the transform an animation contributes this frame
pub trait AnimationSource {
    /// Transform for an animation id, `None` if it is unknown
    fn transform(&self, id: &str) -> Option<Mat4>;
}

impl AnimationSource for HashMap<String, Mat4> {
    fn transform(&self, id: &str) -> Option<Mat4> {
        self.get(id).copied()
    }
}

/// Counters for one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Draw operations issued
    pub draw_calls: usize,
    /// Component visits, counting shared components once per path
    pub components_visited: usize,
    /// Missing or cyclic references skipped
    pub skipped_refs: usize,
}

/// Depth-first scene graph renderer
pub struct SceneRenderer {
    mode: AppearanceMode,
    stack: TransformStack,
    diagnostics: Diagnostics,
    animations: Option<Box<dyn AnimationSource>>,
}

impl SceneRenderer {
    /// Create a renderer reporting to `log`
    pub fn new(mode: AppearanceMode) -> Self {
        Self::with_diagnostics(mode, Diagnostics::to_log())
    }

    /// Create a renderer with its own diagnostics
    pub fn with_diagnostics(mode: AppearanceMode, diagnostics: Diagnostics) -> Self {
        Self {
            mode,
            stack: TransformStack::new(),
            diagnostics,
            animations: None,
        }
    }

    /// Builder: attach an animation source
    #[must_use]
    pub fn with_animations(mut self, animations: impl AnimationSource + 'static) -> Self {
        self.animations = Some(Box::new(animations));
        self
    }

    /// Appearance lookup strategy
    pub const fn mode(&self) -> AppearanceMode {
        self.mode
    }

    /// Diagnostics emitted so far
    pub const fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Saved-transform depth; zero between frames
    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    /// Render one frame of `scene` into `backend`
    pub fn render(&mut self, scene: &Scene, backend: &mut dyn Renderer) -> RenderStats {
        self.diagnostics.absorb(&scene.warned);
        backend.begin_frame();

        let mut frame = Frame {
            scene,
            backend: &mut *backend,
            mode: self.mode,
            resolver: InheritanceResolver::new(&scene.materials, &scene.textures),
            diagnostics: &mut self.diagnostics,
            animations: self.animations.as_deref(),
            on_path: HashSet::new(),
            stats: RenderStats::default(),
        };

        match scene.graph.key(&scene.root) {
            Some(root) => frame.visit(&mut self.stack, root, None),
            None => {
                frame.stats.skipped_refs += 1;
                let root = &scene.root;
                frame.diagnostics.warn_once(RefKind::Component, root, || {
                    format!("root component '{}' is not defined; nothing to draw", root)
                });
            }
        }

        let stats = frame.stats;
        backend.end_frame();
        log::trace!(
            "Frame: {} draw calls, {} components, {} skipped references",
            stats.draw_calls,
            stats.components_visited,
            stats.skipped_refs
        );
        stats
    }
}

struct Frame<'a> {
    scene: &'a Scene,
    backend: &'a mut dyn Renderer,
    mode: AppearanceMode,
    resolver: InheritanceResolver<'a>,
    diagnostics: &'a mut Diagnostics,
    animations: Option<&'a dyn AnimationSource>,
    on_path: HashSet<ComponentKey>,
    stats: RenderStats,
}

impl Frame<'_> {
    fn visit(
        &mut self,
        stack: &mut TransformStack,
        key: ComponentKey,
        inherited: Option<&Appearance>,
    ) {
        let scene = self.scene;
        let Some(component) = scene.graph.by_key(key) else {
            return;
        };
        if !self.on_path.insert(key) {
            self.stats.skipped_refs += 1;
            self.diagnostics.warn_once(RefKind::Cycle, &component.id, || {
                format!("component '{}' is its own ancestor; skipping", component.id)
            });
            return;
        }
        self.stats.components_visited += 1;

        let mut scope = stack.push();
        scope.multiply(&component.local_transform);
        if let Some(animations) = self.animations {
            for id in &component.animations {
                match animations.transform(id) {
                    Some(matrix) => scope.multiply(&matrix),
                    None => {
                        self.diagnostics.warn_once(RefKind::Animation, id, || {
                            format!("animation '{}' is not defined; ignoring", id)
                        });
                    }
                }
            }
        }

        let appearance = match (self.mode, component.resolved_appearance()) {
            (AppearanceMode::SharedSlot, Some(resolved)) => resolved.clone(),
            _ => self.resolver.resolve_node(component, inherited, self.diagnostics),
        };

        for id in &component.child_primitives {
            match scene.primitives.get(id) {
                Some(primitive) => {
                    self.backend.draw(scope.current(), &appearance, &primitive.mesh);
                    self.stats.draw_calls += 1;
                }
                None => {
                    self.stats.skipped_refs += 1;
                    self.diagnostics.warn_once(RefKind::Primitive, id, || {
                        format!("primitive '{}' is not defined; skipping", id)
                    });
                }
            }
        }

        for id in &component.child_components {
            match scene.graph.key(id) {
                Some(child) => self.visit(&mut scope, child, Some(&appearance)),
                None => {
                    self.stats.skipped_refs += 1;
                    self.diagnostics.warn_once(RefKind::Component, id, || {
                        format!("component '{}' is not defined; skipping", id)
                    });
                }
            }
        }

        self.on_path.remove(&key);
    }
}
