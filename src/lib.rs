#![cfg(target_arch = "wasm32")]
use birthday_core::diagnostics::{run_asset_probes, PROBE_PATHS};
use birthday_core::ground::GroundTexture;
use birthday_core::schedule::ModelKind;
use birthday_core::{MessageQueue, SceneConfig, SceneMessage, Viewer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod assets;
mod birthday;
mod constants;
mod diagnostics;
mod dom;
mod events;
mod fetch;
mod frame;
mod input;
mod overlay;
mod panel;
mod render;
mod storage;

use constants::*;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    let page = dom::window_document()
        .and_then(|d| d.body())
        .and_then(|b| b.get_attribute(PAGE_ATTR))
        .unwrap_or_default();
    log::info!("[start] page={:?}", page);

    match page.as_str() {
        "birthday" => {
            if let Err(e) = birthday::run() {
                log::error!("birthday page error: {:?}", e);
            }
        }
        "diagnostics" => spawn_local(async {
            if let Err(e) = diagnostics::run().await {
                log::error!("diagnostics error: {:?}", e);
            }
        }),
        _ => spawn_local(async {
            if let Err(e) = init_scene().await {
                log::error!("init error: {:?}", e);
            }
        }),
    }
    Ok(())
}

async fn init_scene() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, SCENE_CANVAS_ID)?;
    let (width, height) = dom::sync_canvas_backing_size(&canvas);

    let queue = MessageQueue::new();
    let mut rng = rand::thread_rng();
    let viewer = Rc::new(RefCell::new(Viewer::new(
        &SceneConfig::default(),
        width,
        height,
        &mut rng,
    )));
    let ground = GroundTexture::generate(&mut rng, birthday_core::GROUND_TEXTURE_SIZE);

    events::wire_canvas_resize(&canvas, queue.clone());
    events::wire_pointer_handlers(&canvas, queue.clone());
    events::wire_global_keydown(queue.clone());
    panel::wire_panel(&document, queue.clone());
    overlay::wire_buttons(&document, queue.clone());
    panel::render_fields(&document, viewer.borrow().panel().fields());

    spawn_startup_probes(queue.clone());

    let gpu = match frame::init_gpu(&canvas, &ground).await {
        Ok(gpu) => gpu,
        Err(e) => {
            let message = format!("WebGPU is not available: {e:#}");
            overlay::show_error(&document, &message, &viewer.borrow().debug_log().text());
            return Err(e);
        }
    };
    queue.push(SceneMessage::Log(format!(
        "graphics: {} / {}",
        gpu.info().vendor.as_deref().unwrap_or("unknown"),
        gpu.info().device.as_deref().unwrap_or("unknown"),
    )));

    let pending: frame::PendingModels = Rc::new(RefCell::new(Vec::new()));
    for kind in [ModelKind::House, ModelKind::Cat] {
        spawn_model_load(kind, pending.clone(), queue.clone());
    }

    let ctx = Rc::new(RefCell::new(frame::FrameContext {
        viewer,
        queue,
        store: storage::LocalStore::open(),
        pending,
        document,
        canvas,
        gpu,
    }));
    let handle = frame::start_loop(move |now_ms| ctx.borrow_mut().frame(now_ms));
    frame::cancel_on_pagehide(handle);
    Ok(())
}

fn spawn_startup_probes(queue: MessageQueue) {
    spawn_local(async move {
        let report = run_asset_probes(&fetch::GlooFetcher, &PROBE_PATHS).await;
        for line in report.lines {
            queue.push(SceneMessage::Log(line));
        }
    });
}

fn spawn_model_load(kind: ModelKind, pending: frame::PendingModels, queue: MessageQueue) {
    spawn_local(async move {
        match assets::load_model(kind).await {
            Ok(model) => {
                pending.borrow_mut().push(model);
                queue.push(SceneMessage::ModelLoaded(kind));
            }
            Err(e) => {
                log::error!("[assets] {} failed: {:#}", kind.name(), e);
                queue.push(SceneMessage::ModelFailed {
                    model: kind,
                    reason: format!("{e:#}"),
                });
            }
        }
    });
}
