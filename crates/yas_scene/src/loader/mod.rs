//! Scene loading
//!
//! Validates the document's sections, builds typed record tables, collects
//! components into the graph and runs the inheritance pass. Any fatal error
//! aborts the whole load; a scene is only ever returned complete.

mod attributes;
mod components;
mod parser;
mod records;
mod sections;

pub use sections::Sections;

use thiserror::Error;

use crate::config::LoaderConfig;
use crate::diagnostics::Diagnostics;
use crate::document::{DocumentError, DocumentNode, DocumentSource};
use crate::geometry::GeometryError;
use crate::graph::GraphError;
use crate::scene::Scene;
use parser::SceneParser;

/// Fatal load errors
#[derive(Error, Debug)]
pub enum LoadError {
    /// The document could not be fetched or parsed
    #[error("{0}")]
    Document(#[from] DocumentError),

    /// The document's root element has the wrong name
    #[error("invalid document: expected root tag <{expected}>, found <{found}>")]
    RootTag {
        /// Configured root tag
        expected: String,
        /// Tag actually found
        found: String,
    },

    /// A required section is absent
    #[error("tag <{0}> missing")]
    MissingSection(&'static str),

    /// A section appears out of canonical order under strict ordering
    #[error("tag <{0}> out of order")]
    SectionOrder(&'static str),

    /// Two records of one category share an id
    #[error("ID must be unique for each {category} (conflict: ID = {id})")]
    DuplicateId {
        /// Record category
        category: &'static str,
        /// Repeated id
        id: String,
    },

    /// A reserved sentinel id used for a user-defined record
    #[error("'{id}' is a reserved id and cannot name a {category}")]
    ReservedId {
        /// Record category
        category: &'static str,
        /// Offending id
        id: String,
    },

    /// A required attribute is absent or not a valid value
    #[error("unable to parse '{attribute}' of {context}")]
    InvalidAttribute {
        /// Where the attribute was expected
        context: String,
        /// Attribute name
        attribute: &'static str,
    },

    /// A required child element is absent
    #[error("{context}: missing <{element}>")]
    MissingElement {
        /// Where the element was expected
        context: String,
        /// Element name
        element: &'static str,
    },

    /// A category that needs at least one record has none
    #[error("at least one {0} must be defined")]
    Empty(&'static str),

    /// A primitive with zero or several shape tags
    #[error("primitive '{id}' must contain exactly one shape tag (found {found})")]
    ShapeCount {
        /// Primitive id
        id: String,
        /// Number of shape tags found
        found: usize,
    },

    /// A rotation names an axis other than x, y or z
    #[error("{context}: unknown rotation axis '{axis}'")]
    UnknownAxis {
        /// Where the rotation was declared
        context: String,
        /// Declared axis
        axis: String,
    },

    /// A component refers to a transformation that does not exist
    #[error("component '{component}' references undefined transformation '{id}'")]
    UndefinedTransformation {
        /// Component id
        component: String,
        /// Missing transformation id
        id: String,
    },

    /// Mesh construction failed
    #[error("primitive '{id}': {source}")]
    Geometry {
        /// Primitive id
        id: String,
        /// Underlying error
        #[source]
        source: GeometryError,
    },

    /// Structural error in the component graph
    #[error("{0}")]
    Graph(#[from] GraphError),
}

/// Receives the outcome of [`SceneLoader::load_from`]
///
/// Exactly one of the two methods is called per load.
pub trait LoadListener {
    /// The scene loaded and its graph is resolved
    fn on_graph_ready(&mut self, scene: &Scene);

    /// The load failed; `message` is the fatal error
    fn on_graph_failed(&mut self, message: &str);
}

impl LoadListener for () {
    fn on_graph_ready(&mut self, _scene: &Scene) {}

    fn on_graph_failed(&mut self, _message: &str) {}
}

/// Loads scenes from document trees
#[derive(Debug, Clone, Default)]
pub struct SceneLoader {
    config: LoaderConfig,
}

impl SceneLoader {
    /// Create a loader with the given configuration
    pub const fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Loader configuration
    pub const fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Build a scene from an already parsed document
    ///
    /// # Arguments
    /// * `document` - Root node of the document tree
    /// * `diagnostics` - Receives milestones, warnings and the fatal error
    ///
    /// # Returns
    /// The complete, resolved scene or the first fatal error
    pub fn load(
        &self,
        document: &DocumentNode,
        diagnostics: &mut Diagnostics,
    ) -> Result<Scene, LoadError> {
        let result = SceneParser::new(&self.config, diagnostics).parse(document);
        if let Err(err) = &result {
            diagnostics.error(err.to_string());
        }
        result
    }

    /// Fetch a document and build a scene, reporting diagnostics to `log`
    pub fn load_from(
        &self,
        source: &dyn DocumentSource,
        listener: &mut dyn LoadListener,
    ) -> Result<Scene, LoadError> {
        let mut diagnostics = Diagnostics::to_log();
        self.load_from_with(source, listener, &mut diagnostics)
    }

    /// Fetch a document and build a scene with caller-provided diagnostics
    pub fn load_from_with(
        &self,
        source: &dyn DocumentSource,
        listener: &mut dyn LoadListener,
        diagnostics: &mut Diagnostics,
    ) -> Result<Scene, LoadError> {
        diagnostics.info(format!("Loading scene from {}", source.describe()));

        let result = match source.fetch() {
            Ok(document) => self.load(&document, diagnostics),
            Err(err) => {
                let err = LoadError::from(err);
                diagnostics.error(err.to_string());
                Err(err)
            }
        };

        match &result {
            Ok(scene) => listener.on_graph_ready(scene),
            Err(err) => listener.on_graph_failed(&err.to_string()),
        }
        result
    }
}
