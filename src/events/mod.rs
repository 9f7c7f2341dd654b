//! DOM listeners. Handlers only translate browser events into
//! [`SceneMessage`](birthday_core::SceneMessage)s; the frame tick applies them.

pub mod keyboard;
pub mod pointer;

pub use keyboard::wire_global_keydown;
pub use pointer::wire_pointer_handlers;

use crate::dom;
use birthday_core::{MessageQueue, SceneMessage};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keep the canvas backing store at CSS size times DPR and tell the viewer.
pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, queue: MessageQueue) {
    let canvas_resize = canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        let (width, height) = dom::sync_canvas_backing_size(&canvas_resize);
        queue.push(SceneMessage::Resize { width, height });
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
