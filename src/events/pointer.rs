use crate::input;
use birthday_core::{MessageQueue, SceneMessage};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_pointer_handlers(canvas: &web::HtmlCanvasElement, queue: MessageQueue) {
    wire_pointerdown(canvas, queue.clone());
    wire_pointermove(canvas, queue.clone());
    wire_pointerup(canvas, queue.clone());
    wire_pointerleave(canvas, queue.clone());
    wire_wheel(canvas, queue.clone());
    wire_contextmenu(canvas);
}

fn wire_pointerdown(canvas: &web::HtmlCanvasElement, queue: MessageQueue) {
    let c = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let Some(button) = input::pointer_button(&ev) else {
            return;
        };
        let pos = input::pointer_canvas_px(&ev, &c);
        queue.push(SceneMessage::PointerDown {
            x: pos.x,
            y: pos.y,
            button,
            shift: ev.shift_key(),
        });
        _ = c.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(canvas: &web::HtmlCanvasElement, queue: MessageQueue) {
    let c = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &c);
        queue.push(SceneMessage::PointerMove { x: pos.x, y: pos.y });
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(canvas: &web::HtmlCanvasElement, queue: MessageQueue) {
    let c = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &c);
        queue.push(SceneMessage::PointerUp { x: pos.x, y: pos.y });
        _ = c.release_pointer_capture(ev.pointer_id());
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerleave(canvas: &web::HtmlCanvasElement, queue: MessageQueue) {
    let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        queue.push(SceneMessage::PointerLeave);
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_wheel(canvas: &web::HtmlCanvasElement, queue: MessageQueue) {
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        queue.push(SceneMessage::Wheel {
            delta_y: input::wheel_delta_px(&ev),
        });
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

// Secondary-button drags pan; keep the browser menu out of the way.
fn wire_contextmenu(canvas: &web::HtmlCanvasElement) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
    closure.forget();
}
