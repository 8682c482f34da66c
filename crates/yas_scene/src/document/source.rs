//! Document sources
//!
//! Fetching a document either delivers a complete tree or fails; there is
//! no partial delivery. The boundary is a single fallible call.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::DocumentNode;

/// Errors produced while fetching or parsing a document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// IO error
    #[error("IO error reading {path}: {source}")]
    Io {
        /// Offending path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed XML
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Malformed RON
    #[error("RON parse error: {0}")]
    Ron(String),

    /// File extension not recognised
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),
}

/// Text formats a document can be read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// XML elements and attributes
    Xml,
    /// RON serialization of [`DocumentNode`]
    Ron,
}

impl DocumentFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "xml" | "yas" => Some(Self::Xml),
            "ron" => Some(Self::Ron),
            _ => None,
        }
    }

    /// Parse text in this format into a node tree
    pub fn parse(self, text: &str) -> Result<DocumentNode, DocumentError> {
        match self {
            Self::Xml => parse_xml(text),
            Self::Ron => ron::from_str(text).map_err(|e| DocumentError::Ron(e.to_string())),
        }
    }
}

/// Something that can deliver a complete document tree
pub trait DocumentSource {
    /// Fetch and parse the document
    fn fetch(&self) -> Result<DocumentNode, DocumentError>;

    /// Name used in log messages
    fn describe(&self) -> String;
}

/// Document read from a file; the format follows the extension
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the document
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for FileSource {
    fn fetch(&self) -> Result<DocumentNode, DocumentError> {
        let format = DocumentFormat::from_path(&self.path)
            .ok_or_else(|| DocumentError::UnsupportedFormat(self.path.display().to_string()))?;
        let text = std::fs::read_to_string(&self.path).map_err(|source| DocumentError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        format.parse(&text)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Document held in memory
#[derive(Debug, Clone)]
pub struct TextSource {
    format: DocumentFormat,
    text: String,
}

impl TextSource {
    /// XML text
    pub fn xml(text: impl Into<String>) -> Self {
        Self {
            format: DocumentFormat::Xml,
            text: text.into(),
        }
    }

    /// RON text
    pub fn ron(text: impl Into<String>) -> Self {
        Self {
            format: DocumentFormat::Ron,
            text: text.into(),
        }
    }
}

impl DocumentSource for TextSource {
    fn fetch(&self) -> Result<DocumentNode, DocumentError> {
        self.format.parse(&self.text)
    }

    fn describe(&self) -> String {
        format!("<in-memory {:?} document>", self.format)
    }
}

fn parse_xml(text: &str) -> Result<DocumentNode, DocumentError> {
    let document = roxmltree::Document::parse(text)?;
    Ok(convert_element(document.root_element()))
}

fn convert_element(element: roxmltree::Node<'_, '_>) -> DocumentNode {
    DocumentNode {
        name: element.tag_name().name().to_string(),
        attributes: element
            .attributes()
            .map(|attr| (attr.name().to_string(), attr.value().to_string()))
            .collect(),
        children: element
            .children()
            .filter(roxmltree::Node::is_element)
            .map(convert_element)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_elements_become_nodes() {
        let xml = r#"<yas>
            <!-- comment -->
            <scene root="root" axis_length="5"/>
            <views default="cam"><perspective id="cam" near="0.1" far="100" angle="45"/></views>
        </yas>"#;

        let root = TextSource::xml(xml).fetch().unwrap();
        assert_eq!(root.name, "yas");
        assert_eq!(root.children().len(), 2, "comments and text are not nodes");
        assert_eq!(root.children()[0].get_string("root"), Some("root"));
        assert_eq!(root.children()[1].children()[0].get_float("angle"), Some(45.0));
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let err = TextSource::xml("<yas><scene></yas>").fetch().unwrap_err();
        assert!(matches!(err, DocumentError::Xml(_)));
    }

    #[test]
    fn test_ron_document() {
        let ron_text = r#"(
            name: "yas",
            children: [
                (name: "scene", attributes: {"root": "r", "axis_length": "2"}),
            ],
        )"#;
        let root = TextSource::ron(ron_text).fetch().unwrap();
        assert_eq!(root.children()[0].get_float("axis_length"), Some(2.0));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("scenes/a.xml")), Some(DocumentFormat::Xml));
        assert_eq!(DocumentFormat::from_path(Path::new("a.ron")), Some(DocumentFormat::Ron));
        assert_eq!(DocumentFormat::from_path(Path::new("a.json")), None);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = FileSource::new("does/not/exist.xml").fetch().unwrap_err();
        assert!(err.to_string().contains("does/not/exist.xml"));
    }
}
