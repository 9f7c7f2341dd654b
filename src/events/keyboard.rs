use birthday_core::{MessageQueue, SceneMessage};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_global_keydown(queue: MessageQueue) {
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        let ctrl = ev.ctrl_key() || ev.meta_key();
        if let Some(msg) = SceneMessage::from_key(&ev.key(), ctrl) {
            // Ctrl+D would otherwise bookmark the page
            ev.prevent_default();
            log::info!("[keys] {:?}", msg);
            queue.push(msg);
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(w) = web::window() {
        _ = w.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
