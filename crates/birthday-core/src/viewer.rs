//! The scene controller: one owner for the camera rig, zoom flight, control
//! panel, decorations and overlay, updated only through queued messages.
//!
//! The web crate pushes [`SceneMessage`]s from DOM handlers and calls
//! [`Viewer::frame`] once per animation frame. DOM-visible consequences come
//! back out as [`UiEffect`]s.

use crate::bookmark::BookmarkStore;
use crate::camera::{Camera, CameraPose};
use crate::constants::SceneConfig;
use crate::mesh::Aabb;
use crate::overlay::{DebugLog, LoadingOverlay, ModelState, ModelStatus, OverlayPhase};
use crate::panel::{ControlPanel, PanelFields};
use crate::picking::{pixel_to_ndc, ray_aabb, screen_ray};
use crate::rig::{CameraOwner, CameraRig};
use crate::schedule::{FrameClock, FrameTime, MessageQueue, ModelKind, PointerButton, SceneMessage};
use crate::sky::Sky;
use crate::zoom::{ZoomController, ZoomEvent, ZoomPhase, ZoomTransition};
use glam::Vec2;
use rand::Rng;

/// Pointer travel, in pixels, under which a press/release counts as a click.
pub const CLICK_SLOP_PX: f32 = 4.0;
pub const DEBUG_LOG_LINES: usize = 200;

#[derive(Clone, Debug, PartialEq)]
pub enum UiEffect {
    Phase(ZoomPhase),
    HoverChanged(bool),
    PanelFields(PanelFields),
    DebugVisible(bool),
    DebugLine(String),
    Overlay(OverlayPhase),
    ModelStatus(ModelStatus),
    Fatal(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum DragMode {
    Rotate,
    Pan,
}

#[derive(Clone, Copy, Debug)]
struct Drag {
    start: Vec2,
    last: Vec2,
    mode: DragMode,
    button: PointerButton,
}

pub struct Viewer {
    rig: CameraRig,
    zoom: ZoomController,
    panel: ControlPanel,
    sky: Sky,
    overlay: LoadingOverlay,
    log: DebugLog,
    clock: FrameClock,
    drag: Option<Drag>,
    viewport: (u32, u32),
    house_bounds: Option<Aabb>,
    hovered: bool,
    debug_visible: bool,
    effects: Vec<UiEffect>,
}

impl Viewer {
    pub fn new(config: &SceneConfig, width: u32, height: u32, rng: &mut impl Rng) -> Self {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        let pose = CameraPose::looking_at(config.home_position, config.home_target);
        let mut rig = CameraRig::new(Camera::new(pose, aspect), config.home_target);
        rig.install_orbit();
        let panel = ControlPanel::new(&rig);
        Self {
            zoom: ZoomController::new(config),
            panel,
            sky: Sky::generate(rng, config.cloud_count, config.snow_count),
            overlay: LoadingOverlay::new(),
            log: DebugLog::new(DEBUG_LOG_LINES),
            clock: FrameClock::new(),
            drag: None,
            viewport: (width.max(1), height.max(1)),
            house_bounds: None,
            hovered: false,
            debug_visible: false,
            effects: Vec::new(),
            rig,
        }
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn zoom_phase(&self) -> ZoomPhase {
        self.zoom.phase()
    }

    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    pub fn sky(&self) -> &Sky {
        &self.sky
    }

    pub fn overlay(&self) -> &LoadingOverlay {
        &self.overlay
    }

    pub fn debug_log(&self) -> &DebugLog {
        &self.log
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// World bounds of the clickable house, known once its mesh has loaded.
    pub fn set_house_bounds(&mut self, bounds: Aabb) {
        self.house_bounds = Some(bounds);
    }

    pub fn take_effects(&mut self) -> Vec<UiEffect> {
        std::mem::take(&mut self.effects)
    }

    /// Append to the visible debug log and the console.
    pub fn note(&mut self, line: impl Into<String>) {
        let line = line.into();
        log::info!("[scene] {line}");
        self.log.push(line.clone());
        self.effects.push(UiEffect::DebugLine(line));
    }

    /// One animation frame: drain input, advance flight, orbit, sky and
    /// overlay in that order.
    pub fn frame(
        &mut self,
        queue: &MessageQueue,
        now_ms: f64,
        store: &mut impl BookmarkStore,
    ) -> FrameTime {
        let time = self.clock.advance(now_ms);
        for msg in queue.drain() {
            self.handle(msg, now_ms, store);
        }
        if let Some(t) = self.zoom.handle(ZoomEvent::Tick, now_ms, &mut self.rig) {
            self.on_transition(t);
        }
        self.rig.tick_orbit();
        self.sky.tick(time.elapsed_sec);
        if let Some(phase) = self.overlay.tick(now_ms) {
            self.effects.push(UiEffect::Overlay(phase));
        }
        time
    }

    pub fn handle(&mut self, msg: SceneMessage, now_ms: f64, store: &mut impl BookmarkStore) {
        match msg {
            SceneMessage::PointerDown { x, y, button, shift } => {
                let p = Vec2::new(x, y);
                let mode = if button == PointerButton::Secondary || shift {
                    DragMode::Pan
                } else {
                    DragMode::Rotate
                };
                self.drag = Some(Drag { start: p, last: p, mode, button });
            }
            SceneMessage::PointerMove { x, y } => self.pointer_moved(Vec2::new(x, y)),
            SceneMessage::PointerUp { x, y } => {
                let Some(drag) = self.drag.take() else {
                    return;
                };
                let p = Vec2::new(x, y);
                let is_click = drag.button == PointerButton::Primary
                    && p.distance(drag.start) < CLICK_SLOP_PX;
                if is_click && self.hits_house(p) {
                    self.zoom_event(ZoomEvent::HouseClicked, now_ms);
                }
            }
            SceneMessage::PointerLeave => {
                self.drag = None;
                self.set_hover(false);
            }
            SceneMessage::Wheel { delta_y } => {
                if let Some(orbit) = self.rig.orbit_input() {
                    orbit.zoom(delta_y);
                }
            }
            SceneMessage::ExitRequested => self.zoom_event(ZoomEvent::ExitRequested, now_ms),
            SceneMessage::Resize { width, height } => {
                self.viewport = (width.max(1), height.max(1));
                self.rig
                    .set_aspect(self.viewport.0 as f32 / self.viewport.1 as f32);
                self.zoom_event(ZoomEvent::Cancel, now_ms);
            }
            SceneMessage::ToggleDebug => {
                self.debug_visible = !self.debug_visible;
                self.effects.push(UiEffect::DebugVisible(self.debug_visible));
            }
            SceneMessage::PanelEdit { field, text } => self.panel.edit(field, text),
            SceneMessage::PanelNudge { handle, axis, direction } => {
                let r = self.panel.nudge(&mut self.rig, handle, axis, direction);
                self.panel_result(r);
            }
            SceneMessage::PanelApply => {
                let r = self.panel.apply(&mut self.rig);
                self.panel_result(r);
            }
            SceneMessage::PanelCapture => {
                self.panel.capture(&self.rig);
                self.panel_result(Ok(()));
            }
            SceneMessage::PanelSave => match self.panel.save(&self.rig, store) {
                Ok(()) => self.note("Camera bookmark saved"),
                Err(e) => self.note(format!("Error: {e}")),
            },
            SceneMessage::PanelLoad => match self.panel.load(&mut self.rig, &*store) {
                Ok(true) => {
                    self.note("Camera bookmark loaded");
                    self.panel_result(Ok(()));
                }
                Ok(false) => self.note("No camera bookmark saved yet"),
                Err(e) => self.note(format!("Error: {e}")),
            },
            SceneMessage::ModelLoaded(model) => {
                self.set_model(model, ModelState::Loaded, now_ms);
                self.note(format!("{} model loaded successfully!", model.name()));
            }
            SceneMessage::ModelFailed { model, reason } => {
                self.set_model(model, ModelState::Failed, now_ms);
                self.note(format!("Error: {reason}"));
                self.effects.push(UiEffect::Fatal(reason));
            }
            SceneMessage::Log(line) => self.note(line),
        }
    }

    fn pointer_moved(&mut self, p: Vec2) {
        let h = self.viewport.1 as f32;
        if let Some(drag) = self.drag.as_mut() {
            let d = p - drag.last;
            drag.last = p;
            let mode = drag.mode;
            if let Some(orbit) = self.rig.orbit_input() {
                match mode {
                    DragMode::Rotate => orbit.rotate(d.x, d.y, h),
                    DragMode::Pan => orbit.pan(d.x, d.y, h),
                }
            }
            return;
        }
        let hover = self.zoom.phase() == ZoomPhase::Idle && self.hits_house(p);
        self.set_hover(hover);
    }

    fn set_hover(&mut self, hover: bool) {
        if hover != self.hovered {
            self.hovered = hover;
            self.effects.push(UiEffect::HoverChanged(hover));
        }
    }

    fn hits_house(&self, p: Vec2) -> bool {
        let Some(bounds) = self.house_bounds else {
            return false;
        };
        let (w, h) = self.viewport;
        let ray = screen_ray(self.rig.camera(), pixel_to_ndc(p, w as f32, h as f32));
        ray_aabb(&ray, &bounds).is_some()
    }

    fn zoom_event(&mut self, event: ZoomEvent, now_ms: f64) {
        if let Some(t) = self.zoom.handle(event, now_ms, &mut self.rig) {
            self.on_transition(t);
        }
    }

    fn on_transition(&mut self, t: ZoomTransition) {
        let phase = match t {
            ZoomTransition::Entered(p) => p,
            ZoomTransition::Reset => ZoomPhase::Idle,
        };
        if phase != ZoomPhase::Idle {
            self.set_hover(false);
        }
        if phase == ZoomPhase::Idle {
            // orbit owns the camera again; show where it ended up
            self.panel.refresh(&self.rig);
            self.effects.push(UiEffect::PanelFields(self.panel.fields().clone()));
        }
        self.effects.push(UiEffect::Phase(phase));
    }

    fn panel_result(&mut self, r: crate::error::Result<()>) {
        match r {
            Ok(()) => self
                .effects
                .push(UiEffect::PanelFields(self.panel.fields().clone())),
            Err(e) => {
                let hint = if self.zoom.is_animating() {
                    " (camera is animating)"
                } else if self.rig.owner() != CameraOwner::Orbit {
                    " (camera is zoomed in)"
                } else {
                    ""
                };
                self.note(format!("Panel: {e}{hint}"));
            }
        }
    }

    fn set_model(&mut self, model: ModelKind, state: ModelState, now_ms: f64) {
        match model {
            ModelKind::House => self.overlay.set_house(state, now_ms),
            ModelKind::Cat => self.overlay.set_cat(state, now_ms),
        }
        self.effects.push(UiEffect::ModelStatus(self.overlay.status()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookmark::MemoryStore;
    use crate::constants::*;
    use glam::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn viewer() -> Viewer {
        let mut rng = StdRng::seed_from_u64(2);
        let mut v = Viewer::new(&SceneConfig::default(), 800, 600, &mut rng);
        v.set_house_bounds(Aabb {
            min: Vec3::splat(-500.0),
            max: Vec3::splat(500.0),
        });
        v
    }

    fn click(q: &MessageQueue) {
        q.push(SceneMessage::PointerDown {
            x: 400.0,
            y: 300.0,
            button: PointerButton::Primary,
            shift: false,
        });
        q.push(SceneMessage::PointerUp { x: 401.0, y: 300.0 });
    }

    #[test]
    fn click_on_house_starts_flight_and_locks_orbit() {
        let mut v = viewer();
        let mut store = MemoryStore::default();
        let q = MessageQueue::new();
        click(&q);
        v.frame(&q, 0.0, &mut store);
        assert_eq!(v.zoom_phase(), ZoomPhase::AnimatingIn);
        assert_eq!(v.rig().owner(), CameraOwner::Tween);
        assert!(!v.rig().orbit().is_enabled());
        v.frame(&q, ZOOM_DURATION_MS, &mut store);
        assert_eq!(v.zoom_phase(), ZoomPhase::Zoomed);
        assert!(v.take_effects().contains(&UiEffect::Phase(ZoomPhase::Zoomed)));
    }

    #[test]
    fn drag_is_not_a_click() {
        let mut v = viewer();
        let mut store = MemoryStore::default();
        let q = MessageQueue::new();
        q.push(SceneMessage::PointerDown {
            x: 100.0,
            y: 100.0,
            button: PointerButton::Primary,
            shift: false,
        });
        q.push(SceneMessage::PointerMove { x: 160.0, y: 100.0 });
        q.push(SceneMessage::PointerUp { x: 160.0, y: 100.0 });
        let before = v.rig().pose().position;
        v.frame(&q, 0.0, &mut store);
        assert_eq!(v.zoom_phase(), ZoomPhase::Idle);
        assert!(v.rig().pose().position.distance(before) > 1e-3);
    }

    #[test]
    fn panel_ignored_while_animating() {
        let mut v = viewer();
        let mut store = MemoryStore::default();
        let q = MessageQueue::new();
        click(&q);
        v.frame(&q, 0.0, &mut store);
        let pose = v.rig().pose();
        q.push(SceneMessage::PanelApply);
        v.frame(&q, 0.0, &mut store);
        assert_eq!(v.rig().pose(), pose);
        assert!(v.debug_log().text().contains("camera is animating"));
    }

    #[test]
    fn panel_hint_names_zoomed_camera() {
        let mut v = viewer();
        let mut store = MemoryStore::default();
        let q = MessageQueue::new();
        click(&q);
        v.frame(&q, 0.0, &mut store);
        v.frame(&q, ZOOM_DURATION_MS, &mut store);
        assert_eq!(v.zoom_phase(), ZoomPhase::Zoomed);
        q.push(SceneMessage::PanelApply);
        v.frame(&q, ZOOM_DURATION_MS + 16.0, &mut store);
        let log = v.debug_log().text();
        assert!(log.contains("camera is zoomed in"));
        assert!(!log.contains("camera is animating"));
    }

    #[test]
    fn ctrl_d_toggles_debug() {
        let mut v = viewer();
        let mut store = MemoryStore::default();
        let q = MessageQueue::new();
        q.push(SceneMessage::ToggleDebug);
        v.frame(&q, 0.0, &mut store);
        assert!(v.take_effects().contains(&UiEffect::DebugVisible(true)));
    }
}
