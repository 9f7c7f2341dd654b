use crate::assets::ModelData;
use crate::overlay;
use crate::panel;
use crate::render::{self, FrameScene};
use crate::storage::LocalStore;
use birthday_core::ground::GroundTexture;
use birthday_core::schedule::ModelKind;
use birthday_core::{MessageQueue, UiEffect, Viewer};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Models fetched in the background, waiting for GPU upload on the next frame.
pub type PendingModels = Rc<RefCell<Vec<ModelData>>>;

pub struct FrameContext<'a> {
    pub viewer: Rc<RefCell<Viewer>>,
    pub queue: MessageQueue,
    pub store: LocalStore,
    pub pending: PendingModels,
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: render::GpuState<'a>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self, now_ms: f64) {
        self.upload_models();

        let mut viewer = self.viewer.borrow_mut();
        let time = viewer.frame(&self.queue, now_ms, &mut self.store);
        let effects = viewer.take_effects();
        apply_effects(&self.document, &viewer, effects);

        self.gpu
            .resize_if_needed(self.canvas.width(), self.canvas.height());
        let scene = FrameScene {
            camera: viewer.rig().camera(),
            sky: viewer.sky(),
            house_hovered: viewer.is_hovered(),
            elapsed_sec: time.elapsed_sec,
        };
        match self.gpu.render(&scene) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => self.gpu.reconfigure(),
            Err(e) => log::error!("render error: {:?}", e),
        }
    }

    fn upload_models(&mut self) {
        let ready: Vec<ModelData> = self.pending.borrow_mut().drain(..).collect();
        for model in ready {
            let bounds = self.gpu.add_model(&model);
            if model.kind == ModelKind::House {
                self.viewer.borrow_mut().set_house_bounds(bounds);
            }
        }
    }
}

fn apply_effects(document: &web::Document, viewer: &Viewer, effects: Vec<UiEffect>) {
    let mut log_dirty = false;
    for effect in effects {
        match effect {
            UiEffect::Phase(phase) => overlay::set_zoom_phase(document, phase),
            UiEffect::HoverChanged(on) => overlay::set_hover(document, on),
            UiEffect::PanelFields(fields) => panel::render_fields(document, &fields),
            UiEffect::DebugVisible(on) => overlay::set_debug_visible(document, on),
            UiEffect::DebugLine(_) => log_dirty = true,
            UiEffect::Overlay(phase) => {
                overlay::set_phase(document, phase, viewer.overlay().text())
            }
            UiEffect::ModelStatus(status) => overlay::set_status(document, status),
            UiEffect::Fatal(message) => {
                overlay::show_error(document, &message, &viewer.debug_log().text())
            }
        }
    }
    if log_dirty {
        overlay::render_debug_log(document, viewer.debug_log());
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    ground: &GroundTexture,
) -> anyhow::Result<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    render::GpuState::new(leaked_canvas, ground).await
}

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Stops the `requestAnimationFrame` loop.
#[derive(Clone)]
pub struct LoopHandle {
    cancelled: Rc<Cell<bool>>,
    raf_id: Rc<Cell<Option<i32>>>,
}

impl LoopHandle {
    pub fn cancel(&self) {
        self.cancelled.set(true);
        if let (Some(w), Some(id)) = (web::window(), self.raf_id.take()) {
            _ = w.cancel_animation_frame(id);
        }
        log::info!("[frame] loop cancelled");
    }

    fn request(&self, tick: &TickClosure) {
        if self.cancelled.get() {
            return;
        }
        if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
            self.raf_id
                .set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
        }
    }
}

/// Drive `frame` once per animation frame with `performance.now()` in ms.
pub fn start_loop(mut frame: impl FnMut(f64) + 'static) -> LoopHandle {
    let handle = LoopHandle {
        cancelled: Rc::new(Cell::new(false)),
        raf_id: Rc::new(Cell::new(None)),
    };
    let tick: TickClosure = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let handle_tick = handle.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if handle_tick.cancelled.get() {
            return;
        }
        frame(instant::now());
        handle_tick.request(&tick_clone);
    }) as Box<dyn FnMut()>));
    handle.request(&tick);
    handle
}

/// Cancel the loop when the page is torn down.
pub fn cancel_on_pagehide(handle: LoopHandle) {
    let closure = Closure::wrap(Box::new(move || handle.cancel()) as Box<dyn FnMut()>);
    if let Some(w) = web::window() {
        _ = w.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
