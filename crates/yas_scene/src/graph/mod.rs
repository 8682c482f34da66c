//! Component graph
//!
//! Components live in a slot map arena; a string index maps document ids to
//! arena keys. Child references stay plain ids and are looked up when the
//! graph is walked, so forward references and shared children need no
//! special handling at insert time. A child listed under two parents is the
//! same arena entry, never a copy.

mod resolver;

pub use resolver::{InheritanceResolver, ResolveReport};

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::diagnostics::{Diagnostics, RefKind};
use crate::foundation::collections::{new_key_type, IdTable, SlotMap};
use crate::scene::{Component, Primitive};

new_key_type! {
    /// Arena key of a component
    pub struct ComponentKey;
}

/// Structural errors in the component graph
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two components share an id
    #[error("ID must be unique for each component (conflict: ID = {0})")]
    DuplicateId(String),

    /// The configured root component does not exist
    #[error("root component '{0}' is not defined")]
    MissingRoot(String),

    /// A component is reachable from itself
    #[error("cyclic component reference: {}", path.join(" -> "))]
    Cycle {
        /// Ids from the first occurrence of the repeated component to its
        /// second occurrence
        path: Vec<String>,
    },
}

/// Outcome of a reference check walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferenceReport {
    /// Distinct components reachable from the root
    pub reachable: usize,
    /// Child component references that name no component
    pub missing_components: usize,
    /// Primitive references that name no primitive
    pub missing_primitives: usize,
}

/// Arena of components with lookup by id
#[derive(Debug, Clone, Default)]
pub struct ComponentGraph {
    nodes: SlotMap<ComponentKey, Component>,
    index: HashMap<String, ComponentKey>,
    order: Vec<ComponentKey>,
}

impl ComponentGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component; a duplicate id leaves the graph unchanged
    pub fn insert(&mut self, component: Component) -> Result<ComponentKey, GraphError> {
        if self.index.contains_key(&component.id) {
            return Err(GraphError::DuplicateId(component.id));
        }
        let id = component.id.clone();
        let key = self.nodes.insert(component);
        self.index.insert(id, key);
        self.order.push(key);
        Ok(key)
    }

    /// Arena key for an id
    pub fn key(&self, id: &str) -> Option<ComponentKey> {
        self.index.get(id).copied()
    }

    /// Component by id
    pub fn get(&self, id: &str) -> Option<&Component> {
        self.key(id).and_then(|key| self.nodes.get(key))
    }

    /// Mutable component by id
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Component> {
        let key = self.key(id)?;
        self.nodes.get_mut(key)
    }

    /// Component by arena key
    pub fn by_key(&self, key: ComponentKey) -> Option<&Component> {
        self.nodes.get(key)
    }

    /// Whether a component with this id exists
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of components
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no components
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Components in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.order.iter().filter_map(move |key| self.nodes.get(*key))
    }

    /// Advance every component declaring several materials to its next one
    ///
    /// Resolved appearances are stale afterwards until the resolver runs
    /// again.
    pub fn cycle_materials(&mut self) -> usize {
        let mut cycled = 0;
        for (_, component) in &mut self.nodes {
            if component.materials.len() > 1 {
                component.cycle_material();
                cycled += 1;
            }
        }
        cycled
    }

    /// Walk everything reachable from `root`, warning once per missing
    /// component or primitive id and failing on a cycle
    pub fn check_references(
        &self,
        root: &str,
        primitives: &IdTable<Primitive>,
        diagnostics: &mut Diagnostics,
    ) -> Result<ReferenceReport, GraphError> {
        let root_key = self
            .key(root)
            .ok_or_else(|| GraphError::MissingRoot(root.to_string()))?;

        let mut walk = ReferenceWalk {
            graph: self,
            primitives,
            diagnostics,
            path: Vec::new(),
            on_path: HashSet::new(),
            finished: HashSet::new(),
            report: ReferenceReport::default(),
        };
        walk.visit(root_key)?;
        walk.report.reachable = walk.finished.len();
        Ok(walk.report)
    }

    /// Ids on the path from the first occurrence of `repeated` to the end
    /// of `path`, closed with `repeated` again
    pub(crate) fn cycle_path(path: &[String], repeated: &str) -> Vec<String> {
        let start = path.iter().position(|id| id == repeated).unwrap_or(0);
        let mut cycle: Vec<String> = path[start..].to_vec();
        cycle.push(repeated.to_string());
        cycle
    }
}

struct ReferenceWalk<'a> {
    graph: &'a ComponentGraph,
    primitives: &'a IdTable<Primitive>,
    diagnostics: &'a mut Diagnostics,
    path: Vec<String>,
    on_path: HashSet<ComponentKey>,
    // Shared subtrees are checked once; a finished node cannot close a cycle
    finished: HashSet<ComponentKey>,
    report: ReferenceReport,
}

impl ReferenceWalk<'_> {
    fn visit(&mut self, key: ComponentKey) -> Result<(), GraphError> {
        let graph = self.graph;
        let Some(component) = graph.nodes.get(key) else {
            return Ok(());
        };
        if self.on_path.contains(&key) {
            return Err(GraphError::Cycle {
                path: ComponentGraph::cycle_path(&self.path, &component.id),
            });
        }
        if self.finished.contains(&key) {
            return Ok(());
        }

        self.on_path.insert(key);
        self.path.push(component.id.clone());

        for primitive in &component.child_primitives {
            if !self.primitives.contains(primitive) {
                self.report.missing_primitives += 1;
                let parent = &component.id;
                self.diagnostics.warn_once(RefKind::Primitive, primitive, || {
                    format!("component '{}' references undefined primitive '{}'", parent, primitive)
                });
            }
        }

        for child in &component.child_components {
            match graph.key(child) {
                Some(child_key) => self.visit(child_key)?,
                None => {
                    self.report.missing_components += 1;
                    let parent = &component.id;
                    self.diagnostics.warn_once(RefKind::Component, child, || {
                        format!("component '{}' references undefined component '{}'", parent, child)
                    });
                }
            }
        }

        self.path.pop();
        self.on_path.remove(&key);
        self.finished.insert(key);
        Ok(())
    }
}
