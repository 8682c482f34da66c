//! End-to-end tests: document text through loading, resolution and rendering

mod inheritance;

use crate::config::LoaderConfig;
use crate::diagnostics::Diagnostics;
use crate::document::{DocumentNode, DocumentSource, TextSource};
use crate::loader::{LoadError, SceneLoader};
use crate::scene::Scene;

/// Two primitives: a board and a ball
pub(super) const PRIMITIVES: &str = r#"
    <primitive id="board">
        <rectangle x1="-1" y1="-1" x2="1" y2="1"/>
    </primitive>
    <primitive id="ball">
        <sphere radius="0.5" slices="8" stacks="4"/>
    </primitive>
"#;

/// A table: `leg` is declared before its parent `root`
pub(super) const COMPONENTS: &str = r#"
    <component id="leg">
        <transformation>
            <translate x="1" y="0" z="1"/>
            <scale x="0.2" y="1" z="0.2"/>
        </transformation>
        <materials><material id="inherit"/></materials>
        <texture id="inherit" length_s="4" length_t="4"/>
        <children><primitiveref id="ball"/></children>
    </component>
    <component id="root">
        <transformation/>
        <materials>
            <material id="wood"/>
            <material id="metal"/>
        </materials>
        <texture id="grain"/>
        <children>
            <componentref id="leg"/>
            <componentref id="top"/>
        </children>
    </component>
    <component id="top">
        <transformation><transformationref id="lift"/></transformation>
        <materials><material id="inherit"/></materials>
        <texture id="none"/>
        <children><primitiveref id="board"/></children>
    </component>
"#;

/// Full document text around the given primitives and components
pub(super) fn document(primitives: &str, components: &str) -> String {
    format!(
        r#"<yas>
    <scene root="root" axis_length="2.0"/>
    <views default="cam">
        <perspective id="cam" near="0.1" far="500" angle="45">
            <from x="15" y="15" z="15"/>
            <to x="0" y="0" z="0"/>
        </perspective>
        <ortho id="plan" near="0.1" far="100" left="-5" right="5" top="5" bottom="-5">
            <from x="0" y="10" z="0"/>
            <to x="0" y="0" z="0"/>
        </ortho>
    </views>
    <ambient>
        <ambient r="0.2" g="0.2" b="0.2" a="1"/>
        <background r="0" g="0" b="0.1" a="1"/>
    </ambient>
    <lights>
        <omni id="sun" enabled="1">
            <location x="0" y="10" z="0" w="1"/>
            <ambient r="0" g="0" b="0" a="1"/>
            <diffuse r="1" g="1" b="1" a="1"/>
            <specular r="1" g="1" b="1" a="1"/>
        </omni>
        <spot id="lamp" enabled="0" angle="30" exponent="2">
            <target x="0" y="0" z="0"/>
            <location x="5" y="5" z="5" w="1"/>
            <ambient r="0" g="0" b="0" a="1"/>
            <diffuse r="1" g="0.9" b="0.8" a="1"/>
            <specular r="1" g="1" b="1" a="1"/>
        </spot>
    </lights>
    <textures>
        <texture id="grain" file="images/grain.png" length_s="2" length_t="2"/>
    </textures>
    <materials>
        <material id="wood" shininess="20">
            <emission r="0" g="0" b="0" a="1"/>
            <ambient r="0.2" g="0.1" b="0" a="1"/>
            <diffuse r="0.6" g="0.4" b="0.2" a="1"/>
            <specular r="0.1" g="0.1" b="0.1" a="1"/>
        </material>
        <material id="metal" shininess="80">
            <diffuse r="0.7" g="0.7" b="0.8" a="1"/>
        </material>
    </materials>
    <transformations>
        <transformation id="lift">
            <translate x="0" y="1" z="0"/>
            <rotate axis="x" angle="-90"/>
        </transformation>
    </transformations>
    <primitives>{}</primitives>
    <components>{}</components>
</yas>"#,
        primitives, components
    )
}

/// The table scene as text
pub(super) fn demo() -> String {
    document(PRIMITIVES, COMPONENTS)
}

/// Parse document text into a node tree
pub(super) fn parse(text: &str) -> DocumentNode {
    TextSource::xml(text).fetch().unwrap()
}

/// Load a node tree with default configuration
pub(super) fn load_document(document: &DocumentNode) -> (Result<Scene, LoadError>, Diagnostics) {
    load_with(document, LoaderConfig::default())
}

/// Load a node tree with the given configuration
pub(super) fn load_with(
    document: &DocumentNode,
    config: LoaderConfig,
) -> (Result<Scene, LoadError>, Diagnostics) {
    let mut diagnostics = Diagnostics::default();
    let result = SceneLoader::new(config).load(document, &mut diagnostics);
    (result, diagnostics)
}

/// Load document text with default configuration
pub(super) fn load(text: &str) -> (Result<Scene, LoadError>, Diagnostics) {
    load_document(&parse(text))
}

/// Mutable access to a top-level section
pub(super) fn section_mut<'d>(document: &'d mut DocumentNode, tag: &str) -> &'d mut DocumentNode {
    document
        .children
        .iter_mut()
        .find(|child| child.name == tag)
        .unwrap()
}
