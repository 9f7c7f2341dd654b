// Host-side tests for the click-to-zoom flight, driven through the viewer's
// message queue the same way the browser tick drives it.

use birthday_core::bookmark::MemoryStore;
use birthday_core::easing::ease_in_out_quint;
use birthday_core::mesh::Aabb;
use birthday_core::panel::FieldId;
use birthday_core::schedule::PointerButton;
use birthday_core::*;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn viewer() -> Viewer {
    let mut rng = StdRng::seed_from_u64(7);
    let mut v = Viewer::new(&SceneConfig::default(), 1280, 720, &mut rng);
    // whole view is "house" so the centre click always hits
    v.set_house_bounds(Aabb {
        min: Vec3::splat(-1000.0),
        max: Vec3::splat(1000.0),
    });
    v
}

fn click(q: &MessageQueue) {
    q.push(SceneMessage::PointerDown {
        x: 640.0,
        y: 360.0,
        button: PointerButton::Primary,
        shift: false,
    });
    q.push(SceneMessage::PointerUp { x: 640.0, y: 360.0 });
}

#[test]
fn ease_properties() {
    assert_eq!(ease_in_out_quint(0.0), 0.0);
    assert_eq!(ease_in_out_quint(1.0), 1.0);
    assert_eq!(ease_in_out_quint(0.5), 0.5);
    let samples: Vec<f32> = (0..=100).map(|i| ease_in_out_quint(i as f32 / 100.0)).collect();
    assert!(samples.windows(2).all(|w| w[1] >= w[0]));
}

#[test]
fn flight_ends_exactly_on_zoom_pose() {
    let mut v = viewer();
    let mut store = MemoryStore::default();
    let q = MessageQueue::new();
    let t0 = 12_345.0;
    click(&q);
    v.frame(&q, t0, &mut store);
    assert_eq!(v.zoom_phase(), ZoomPhase::AnimatingIn);

    v.frame(&q, t0 + 1500.0, &mut store);
    let mid = v.rig().pose().position;
    assert!(mid.distance(ZOOM_POSITION) > 1.0);

    v.frame(&q, t0 + ZOOM_DURATION_MS, &mut store);
    let expected = CameraPose::looking_at(ZOOM_POSITION, ZOOM_FOCUS);
    assert_eq!(v.zoom_phase(), ZoomPhase::Zoomed);
    assert_eq!(v.rig().pose(), expected);
    assert_eq!(v.rig().owner(), CameraOwner::Locked);
}

#[test]
fn click_while_zoomed_resets_to_idle() {
    let mut v = viewer();
    let mut store = MemoryStore::default();
    let q = MessageQueue::new();
    click(&q);
    v.frame(&q, 0.0, &mut store);
    v.frame(&q, ZOOM_DURATION_MS, &mut store);
    assert_eq!(v.zoom_phase(), ZoomPhase::Zoomed);
    let zoomed = v.rig().pose();

    click(&q);
    v.frame(&q, ZOOM_DURATION_MS + 100.0, &mut store);
    assert_eq!(v.zoom_phase(), ZoomPhase::Idle);
    assert_eq!(v.rig().owner(), CameraOwner::Orbit);
    assert!(v.rig().orbit().is_enabled());
    // reset does not start a flight; the camera stays put
    assert_eq!(v.rig().pose().position, zoomed.position);
}

#[test]
fn escape_flies_home_and_restores_orbit() {
    let mut v = viewer();
    let mut store = MemoryStore::default();
    let q = MessageQueue::new();
    let home = v.rig().pose();
    click(&q);
    v.frame(&q, 0.0, &mut store);
    v.frame(&q, ZOOM_DURATION_MS, &mut store);

    q.push(SceneMessage::from_key("Escape", false).expect("escape maps to exit"));
    v.frame(&q, 5000.0, &mut store);
    assert_eq!(v.zoom_phase(), ZoomPhase::AnimatingOut);
    v.frame(&q, 5000.0 + ZOOM_DURATION_MS, &mut store);
    assert_eq!(v.zoom_phase(), ZoomPhase::Idle);
    assert_eq!(v.rig().pose().position, home.position);
    assert_eq!(v.rig().orbit_target(), HOME_TARGET);
}

#[test]
fn resize_cancels_flight_where_it_is() {
    let mut v = viewer();
    let mut store = MemoryStore::default();
    let q = MessageQueue::new();
    click(&q);
    v.frame(&q, 0.0, &mut store);
    v.frame(&q, 1000.0, &mut store);
    let mid = v.rig().pose().position;

    q.push(SceneMessage::Resize {
        width: 640,
        height: 480,
    });
    v.frame(&q, 1016.0, &mut store);
    assert_eq!(v.zoom_phase(), ZoomPhase::Idle);
    assert_eq!(v.rig().owner(), CameraOwner::Orbit);
    assert!(v.rig().pose().position.distance(mid) < 1.0);
}

#[test]
fn wheel_is_ignored_while_flying() {
    let mut v = viewer();
    let mut store = MemoryStore::default();
    let q = MessageQueue::new();
    click(&q);
    v.frame(&q, 0.0, &mut store);
    v.frame(&q, ZOOM_DURATION_MS, &mut store);
    let zoomed = v.rig().pose();
    q.push(SceneMessage::Wheel { delta_y: 500.0 });
    v.frame(&q, ZOOM_DURATION_MS + 16.0, &mut store);
    assert_eq!(v.rig().pose(), zoomed);
}

#[test]
fn return_to_idle_keeps_unapplied_panel_edits() {
    let mut v = viewer();
    let mut store = MemoryStore::default();
    let q = MessageQueue::new();
    q.push(SceneMessage::PanelEdit {
        field: FieldId::Target(0),
        text: "7".to_string(),
    });
    click(&q);
    v.frame(&q, 0.0, &mut store);
    v.frame(&q, ZOOM_DURATION_MS, &mut store);
    click(&q);
    v.frame(&q, ZOOM_DURATION_MS + 100.0, &mut store);
    assert_eq!(v.zoom_phase(), ZoomPhase::Idle);

    let fields = v.panel().fields();
    assert_eq!(fields.get(FieldId::Target(0)), "7");
    assert_eq!(fields.get(FieldId::Position(0)), ZOOM_POSITION.x.to_string());
    assert_eq!(fields.get(FieldId::Target(1)), ZOOM_FOCUS.y.to_string());
}
