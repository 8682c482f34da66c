//! Appearance inheritance and rendering over loaded scenes

use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::config::AppearanceMode;
use crate::diagnostics::{DiagnosticSink, Severity};
use crate::render::{RecordingRenderer, SceneRenderer};

/// Sink shared between a load and the renderers that follow it
#[derive(Clone, Default)]
struct SharedLog(Rc<RefCell<Vec<String>>>);

impl SharedLog {
    fn diagnostics(&self) -> Diagnostics {
        Diagnostics::new(Box::new(self.clone()))
    }

    fn count(&self, needle: &str) -> usize {
        self.0.borrow().iter().filter(|m| m.contains(needle)).count()
    }
}

impl DiagnosticSink for SharedLog {
    fn emit(&mut self, severity: Severity, message: &str) {
        if severity == Severity::Warning {
            self.0.borrow_mut().push(message.to_string());
        }
    }
}

fn material_of<'s>(scene: &'s Scene, id: &str) -> &'s str {
    scene
        .graph
        .get(id)
        .and_then(|c| c.resolved_appearance())
        .map(|a| a.material.id.as_str())
        .unwrap()
}

#[test]
fn test_inherit_takes_nearest_ancestor() {
    let (result, _) = load(&demo());
    let scene = result.unwrap();

    assert_eq!(material_of(&scene, "root"), "wood");
    assert_eq!(material_of(&scene, "top"), "wood");
    assert_eq!(material_of(&scene, "leg"), "wood");
    assert_eq!(
        scene.graph.get("top").unwrap().resolved_appearance().unwrap().material,
        *scene.materials.get("wood").unwrap()
    );
}

#[test]
fn test_texture_resolution_along_paths() {
    let (result, _) = load(&demo());
    let scene = result.unwrap();
    let appearance = |id: &str| scene.graph.get(id).unwrap().resolved_appearance().unwrap().clone();

    let root = appearance("root");
    assert_eq!(root.texture_id(), Some("grain"));
    assert_eq!((root.length_s, root.length_t), (2.0, 2.0));

    let leg = appearance("leg");
    assert_eq!(leg.texture_id(), Some("grain"));
    assert_eq!((leg.length_s, leg.length_t), (4.0, 4.0));

    let top = appearance("top");
    assert_eq!(top.texture_id(), None);
}

#[test]
fn test_shared_component_last_writer_wins() {
    let components = r#"
        <component id="R">
            <materials><material id="wood"/></materials>
            <texture id="none"/>
            <children><componentref id="X"/><componentref id="A"/></children>
        </component>
        <component id="A">
            <materials><material id="metal"/></materials>
            <children><componentref id="X"/></children>
        </component>
        <component id="X">
            <children><primitiveref id="board"/></children>
        </component>"#;
    let text = document(PRIMITIVES, components).replace(r#"root="root""#, r#"root="R""#);
    let (result, _) = load(&text);
    let scene = result.unwrap();

    // Visited via R first, then via A; the slot keeps A's value
    assert_eq!(material_of(&scene, "X"), "metal");

    let mut shared = RecordingRenderer::new();
    SceneRenderer::new(AppearanceMode::SharedSlot).render(&scene, &mut shared);
    let ids: Vec<_> = shared.calls().iter().map(|c| c.appearance.material.id.as_str()).collect();
    assert_eq!(ids, vec!["metal", "metal"]);

    let mut per_path = RecordingRenderer::new();
    SceneRenderer::new(AppearanceMode::PerPath).render(&scene, &mut per_path);
    let ids: Vec<_> = per_path.calls().iter().map(|c| c.appearance.material.id.as_str()).collect();
    assert_eq!(ids, vec!["wood", "metal"]);
}

#[test]
fn test_cycle_materials_re_resolves() {
    let (result, _) = load(&demo());
    let mut scene = result.unwrap();
    let mut diagnostics = Diagnostics::default();

    scene.cycle_materials(&mut diagnostics).unwrap();
    assert_eq!(material_of(&scene, "root"), "metal");
    assert_eq!(material_of(&scene, "top"), "metal", "Descendants follow the new material");

    scene.cycle_materials(&mut diagnostics).unwrap();
    assert_eq!(material_of(&scene, "leg"), "wood");
    assert_eq!(diagnostics.warnings().count(), 0);
}

#[test]
fn test_load_and_render_share_warned_ids() {
    let components = r#"
        <component id="root">
            <materials><material id="wood"/><material id="marble"/></materials>
            <texture id="none"/>
            <children>
                <componentref id="a"/>
                <componentref id="ghost"/>
                <primitiveref id="missing"/>
            </children>
        </component>
        <component id="a">
            <materials><material id="marble"/></materials>
            <children><primitiveref id="missing"/><primitiveref id="board"/></children>
        </component>"#;
    let log = SharedLog::default();
    let mut diagnostics = log.diagnostics();
    let mut scene = SceneLoader::new(LoaderConfig::default())
        .load(&parse(&document(PRIMITIVES, components)), &mut diagnostics)
        .unwrap();
    assert_eq!(log.count("'missing'"), 1);

    for mode in [AppearanceMode::SharedSlot, AppearanceMode::PerPath] {
        let mut renderer = SceneRenderer::with_diagnostics(mode, log.diagnostics());
        let mut backend = RecordingRenderer::new();
        for _ in 0..3 {
            let stats = renderer.render(&scene, &mut backend);
            assert_eq!(stats.draw_calls, 1);
            assert_eq!(stats.skipped_refs, 3);
        }
    }

    let mut cycling = log.diagnostics();
    scene.cycle_materials(&mut cycling).unwrap();
    scene.cycle_materials(&mut cycling).unwrap();

    assert_eq!(log.count("'missing'"), 1);
    assert_eq!(log.count("'ghost'"), 1);
    assert_eq!(log.count("'marble'"), 1);
}

#[test]
fn test_demo_render_pass() {
    let (result, _) = load(&demo());
    let scene = result.unwrap();

    let mut renderer = SceneRenderer::new(AppearanceMode::SharedSlot);
    let mut backend = RecordingRenderer::new();
    let first = renderer.render(&scene, &mut backend);
    let second = renderer.render(&scene, &mut backend);

    assert_eq!(first, second, "Rendering does not change the scene");
    assert_eq!(first.draw_calls, 2);
    assert_eq!(first.components_visited, 3);
    assert_eq!(first.skipped_refs, 0);
    assert_eq!(renderer.stack_depth(), 0);
    assert_eq!(backend.last_frame().len(), 2);

    // Children are visited in declaration order: leg (ball) then top (board)
    let frame = backend.last_frame();
    assert_eq!(frame[0].vertex_count, 9 * 5);
    assert_eq!(frame[1].vertex_count, 4);
    assert_eq!(frame[1].appearance.texture_id(), None);
}

#[test]
fn test_bundled_demo_shares_table_legs() {
    let (result, diagnostics) = load(include_str!("../../../../yas_viewer/scenes/demo.xml"));
    let scene = result.unwrap();
    assert_eq!(diagnostics.warnings().count(), 0);

    let leg_materials = |mode| {
        let mut backend = RecordingRenderer::new();
        let stats = SceneRenderer::new(mode).render(&scene, &mut backend);
        assert_eq!(stats.draw_calls, 9);
        backend
            .calls()
            .iter()
            .filter(|call| call.vertex_count == 17 * 3)
            .map(|call| call.appearance.material.id.clone())
            .collect::<Vec<_>>()
    };

    // One leg component shared by four corners; the brass corner is visited last
    assert_eq!(leg_materials(AppearanceMode::SharedSlot), vec!["brass"; 4]);
    assert_eq!(
        leg_materials(AppearanceMode::PerPath),
        vec!["oak", "oak", "oak", "brass"]
    );
}
