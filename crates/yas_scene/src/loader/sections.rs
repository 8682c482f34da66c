//! Top-level section bookkeeping

use bitflags::bitflags;

use super::LoadError;
use crate::diagnostics::Diagnostics;
use crate::document::DocumentNode;

bitflags! {
    /// Set of top-level sections
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Sections: u16 {
        /// `<scene>`
        const SCENE = 1 << 0;
        /// `<views>`
        const VIEWS = 1 << 1;
        /// `<ambient>`
        const AMBIENT = 1 << 2;
        /// `<lights>`
        const LIGHTS = 1 << 3;
        /// `<textures>`
        const TEXTURES = 1 << 4;
        /// `<materials>`
        const MATERIALS = 1 << 5;
        /// `<transformations>`
        const TRANSFORMATIONS = 1 << 6;
        /// `<primitives>`
        const PRIMITIVES = 1 << 7;
        /// `<components>`
        const COMPONENTS = 1 << 8;
    }
}

impl Sections {
    /// Sections with their tags, in canonical order
    pub const ORDER: [(Self, &'static str); 9] = [
        (Self::SCENE, "scene"),
        (Self::VIEWS, "views"),
        (Self::AMBIENT, "ambient"),
        (Self::LIGHTS, "lights"),
        (Self::TEXTURES, "textures"),
        (Self::MATERIALS, "materials"),
        (Self::TRANSFORMATIONS, "transformations"),
        (Self::PRIMITIVES, "primitives"),
        (Self::COMPONENTS, "components"),
    ];

    /// Section for a tag name
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ORDER
            .iter()
            .find(|(_, name)| *name == tag)
            .map(|(flag, _)| *flag)
    }

    /// Tag name of a single section
    pub fn tag(self) -> Option<&'static str> {
        Self::ORDER
            .iter()
            .find(|(flag, _)| *flag == self)
            .map(|(_, name)| *name)
    }

    /// Sections that come after this one in canonical order
    fn later(self) -> Self {
        Self::from_bits_truncate(!(self.bits() | (self.bits().wrapping_sub(1))))
    }
}

/// The nine section nodes of a document
pub(super) struct SectionNodes<'n> {
    pub scene: &'n DocumentNode,
    pub views: &'n DocumentNode,
    pub ambient: &'n DocumentNode,
    pub lights: &'n DocumentNode,
    pub textures: &'n DocumentNode,
    pub materials: &'n DocumentNode,
    pub transformations: &'n DocumentNode,
    pub primitives: &'n DocumentNode,
    pub components: &'n DocumentNode,
}

impl<'n> SectionNodes<'n> {
    /// Find every required section under `root`
    ///
    /// A missing section is fatal. A section declared after one that
    /// canonically follows it is a warning, or fatal when `strict_order`
    /// is set. Unknown and repeated tags are warnings.
    pub fn locate(
        root: &'n DocumentNode,
        strict_order: bool,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self, LoadError> {
        let mut found: [Option<&'n DocumentNode>; 9] = [None; 9];
        let mut seen = Sections::empty();

        for child in root.children() {
            let Some(flag) = Sections::from_tag(&child.name) else {
                diagnostics.warning(format!("unknown tag <{}>", child.name));
                continue;
            };
            let tag = flag.tag().unwrap_or_default();
            if seen.contains(flag) {
                diagnostics
                    .warning(format!("tag <{}> declared more than once; using the first", tag));
                continue;
            }
            if seen.intersects(flag.later()) {
                if strict_order {
                    return Err(LoadError::SectionOrder(tag));
                }
                diagnostics.warning(format!("tag <{}> out of order", tag));
            }
            seen.insert(flag);
            if let Some(slot) = Sections::ORDER.iter().position(|(f, _)| *f == flag) {
                found[slot] = Some(child);
            }
        }

        let take = |index: usize| -> Result<&'n DocumentNode, LoadError> {
            let (_, tag) = Sections::ORDER[index];
            found[index].ok_or(LoadError::MissingSection(tag))
        };

        Ok(Self {
            scene: take(0)?,
            views: take(1)?,
            ambient: take(2)?,
            lights: take(3)?,
            textures: take(4)?,
            materials: take(5)?,
            transformations: take(6)?,
            primitives: take(7)?,
            components: take(8)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(tags: &[&str]) -> DocumentNode {
        DocumentNode::new("yas").with_children(tags.iter().map(|tag| DocumentNode::new(*tag)))
    }

    const CANONICAL: [&str; 9] = [
        "scene",
        "views",
        "ambient",
        "lights",
        "textures",
        "materials",
        "transformations",
        "primitives",
        "components",
    ];

    #[test]
    fn test_tag_round_trip() {
        assert_eq!(Sections::from_tag("lights"), Some(Sections::LIGHTS));
        assert_eq!(Sections::LIGHTS.tag(), Some("lights"));
        assert_eq!(Sections::from_tag("board"), None);
    }

    #[test]
    fn test_later_sections() {
        assert_eq!(Sections::COMPONENTS.later(), Sections::empty());
        assert!(Sections::SCENE.later().contains(Sections::COMPONENTS));
        assert!(!Sections::LIGHTS.later().contains(Sections::AMBIENT));
        assert!(!Sections::LIGHTS.later().contains(Sections::LIGHTS));
    }

    #[test]
    fn test_canonical_document_locates_cleanly() {
        let root = document(&CANONICAL);
        let mut diagnostics = Diagnostics::default();
        let nodes = SectionNodes::locate(&root, false, &mut diagnostics).unwrap();
        assert_eq!(nodes.components.name, "components");
        assert_eq!(diagnostics.warnings().count(), 0);
    }

    #[test]
    fn test_missing_section_is_fatal() {
        let tags: Vec<&str> = CANONICAL.iter().copied().filter(|t| *t != "textures").collect();
        let root = document(&tags);
        let mut diagnostics = Diagnostics::default();
        let err = SectionNodes::locate(&root, false, &mut diagnostics).err().unwrap();
        assert_eq!(err.to_string(), "tag <textures> missing");
    }

    #[test]
    fn test_out_of_order_warns_or_fails() {
        let mut tags = CANONICAL.to_vec();
        tags.swap(1, 3); // lights before views
        let root = document(&tags);

        let mut diagnostics = Diagnostics::default();
        assert!(SectionNodes::locate(&root, false, &mut diagnostics).is_ok());
        assert_eq!(diagnostics.count_warnings_containing("out of order"), 2);

        let mut diagnostics = Diagnostics::default();
        assert!(matches!(
            SectionNodes::locate(&root, true, &mut diagnostics),
            Err(LoadError::SectionOrder(_))
        ));
    }

    #[test]
    fn test_unknown_top_level_tag_warns() {
        let mut tags = CANONICAL.to_vec();
        tags.insert(4, "board");
        let root = document(&tags);
        let mut diagnostics = Diagnostics::default();
        assert!(SectionNodes::locate(&root, false, &mut diagnostics).is_ok());
        assert_eq!(diagnostics.count_warnings_containing("unknown tag <board>"), 1);
    }
}
