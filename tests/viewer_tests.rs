// Host-side tests for the scene controller: panel, bookmark, loading overlay
// and failure reporting, all through queued messages.

use birthday_core::bookmark::{load_bookmark, BookmarkStore, CameraBookmark, MemoryStore};
use birthday_core::overlay::{ModelState, OverlayPhase};
use birthday_core::panel::{FieldId, Handle};
use birthday_core::schedule::ModelKind;
use birthday_core::*;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn viewer() -> Viewer {
    let mut rng = StdRng::seed_from_u64(11);
    Viewer::new(&SceneConfig::default(), 800, 600, &mut rng)
}

fn edit(q: &MessageQueue, field: FieldId, text: &str) {
    q.push(SceneMessage::PanelEdit {
        field,
        text: text.to_string(),
    });
}

#[test]
fn panel_apply_places_camera() {
    let mut v = viewer();
    let mut store = MemoryStore::default();
    let q = MessageQueue::new();
    for (i, value) in ["10", "20", "30"].iter().enumerate() {
        edit(&q, FieldId::Position(i), value);
    }
    for i in 0..3 {
        edit(&q, FieldId::Target(i), "0");
    }
    edit(&q, FieldId::Step, "2.5");
    q.push(SceneMessage::PanelApply);
    v.frame(&q, 0.0, &mut store);

    let expected = CameraPose::looking_at(Vec3::new(10.0, 20.0, 30.0), Vec3::ZERO);
    assert_eq!(v.rig().pose(), expected);
    assert_eq!(v.rig().orbit_target(), Vec3::ZERO);
    assert_eq!(v.panel().step(), 2.5);
}

#[test]
fn panel_rejects_non_numeric_field() {
    let mut v = viewer();
    let mut store = MemoryStore::default();
    let q = MessageQueue::new();
    let before = v.rig().pose();
    edit(&q, FieldId::Position(1), "abc");
    q.push(SceneMessage::PanelApply);
    v.frame(&q, 0.0, &mut store);
    assert_eq!(v.rig().pose(), before);
    assert!(v.debug_log().text().contains("position.y"));
}

#[test]
fn nudge_moves_by_step() {
    let mut v = viewer();
    let mut store = MemoryStore::default();
    let q = MessageQueue::new();
    let before = v.rig().orbit_target();
    q.push(SceneMessage::PanelNudge {
        handle: Handle::Target,
        axis: 1,
        direction: -1.0,
    });
    v.frame(&q, 0.0, &mut store);
    let after = v.rig().orbit_target();
    assert!((after.y - (before.y - DEFAULT_PANEL_STEP)).abs() < 1e-4);
    assert_eq!(after.x, before.x);
}

#[test]
fn bookmark_survives_fresh_viewer() {
    let mut store = MemoryStore::default();
    let q = MessageQueue::new();

    let mut first = viewer();
    for (i, value) in ["50", "5", "-40"].iter().enumerate() {
        edit(&q, FieldId::Position(i), value);
    }
    for (i, value) in ["1", "2", "3"].iter().enumerate() {
        edit(&q, FieldId::Target(i), value);
    }
    edit(&q, FieldId::Step, "0.25");
    q.push(SceneMessage::PanelApply);
    q.push(SceneMessage::PanelSave);
    first.frame(&q, 0.0, &mut store);

    let saved = load_bookmark(&store).expect("readable").expect("saved");
    assert_eq!(
        saved,
        CameraBookmark {
            position: [50.0, 5.0, -40.0],
            target: [1.0, 2.0, 3.0],
            step: 0.25,
        }
    );

    let mut second = viewer();
    q.push(SceneMessage::PanelLoad);
    second.frame(&q, 16.0, &mut store);
    let restored = second.rig().pose();
    assert_eq!(restored.position, Vec3::new(50.0, 5.0, -40.0));
    assert_eq!(restored.orientation, first.rig().pose().orientation);
    assert_eq!(restored, first.rig().pose());
    assert_eq!(second.rig().orbit_target(), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(second.panel().step(), 0.25);
    assert_eq!(second.panel().fields(), first.panel().fields());
}

#[test]
fn load_without_bookmark_is_reported() {
    let mut v = viewer();
    let mut store = MemoryStore::default();
    let q = MessageQueue::new();
    q.push(SceneMessage::PanelLoad);
    v.frame(&q, 0.0, &mut store);
    assert!(v.debug_log().text().contains("No camera bookmark"));
}

#[test]
fn corrupt_bookmark_is_an_error_line() {
    let mut v = viewer();
    let mut store = MemoryStore::default();
    store.write(BOOKMARK_KEY, "{not json").expect("memory write");
    let q = MessageQueue::new();
    q.push(SceneMessage::PanelLoad);
    v.frame(&q, 0.0, &mut store);
    assert!(v.debug_log().text().contains("Error: camera bookmark"));
}

#[test]
fn overlay_runs_after_both_models_settle() {
    let mut v = viewer();
    let mut store = MemoryStore::default();
    let q = MessageQueue::new();
    q.push(SceneMessage::ModelLoaded(ModelKind::House));
    v.frame(&q, 0.0, &mut store);
    v.frame(&q, 5000.0, &mut store);
    assert_eq!(v.overlay().phase(), OverlayPhase::Initial);

    q.push(SceneMessage::ModelLoaded(ModelKind::Cat));
    v.frame(&q, 6000.0, &mut store);
    assert_eq!(v.overlay().status().cat, ModelState::Loaded);

    let mut phases = Vec::new();
    for t in [6500.0, 6600.0, 9600.0] {
        v.frame(&q, t, &mut store);
        phases.extend(v.take_effects().into_iter().filter_map(|e| match e {
            UiEffect::Overlay(p) => Some(p),
            _ => None,
        }));
    }
    assert_eq!(
        phases,
        vec![OverlayPhase::Ready, OverlayPhase::Animate, OverlayPhase::Cleared]
    );
}

#[test]
fn model_failure_is_fatal_and_logged() {
    let mut v = viewer();
    let mut store = MemoryStore::default();
    let q = MessageQueue::new();
    q.push(SceneMessage::ModelFailed {
        model: ModelKind::House,
        reason: "\"/cardboard_house/scene.gltf\" answered with status 404".into(),
    });
    v.frame(&q, 0.0, &mut store);
    let effects = v.take_effects();
    assert!(effects.iter().any(|e| matches!(e, UiEffect::Fatal(m) if m.contains("404"))));
    assert_eq!(v.overlay().status().house, ModelState::Failed);
    assert!(v.debug_log().text().contains("Error:"));
}
