//! DOM side of the camera control panel: text inputs, nudge buttons and the
//! apply/capture/save/load row. Values flow through the message queue.

use crate::constants::*;
use crate::dom;
use birthday_core::panel::{FieldId, Handle, PanelFields};
use birthday_core::{MessageQueue, SceneMessage};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn input_id(field: FieldId) -> &'static str {
    match field {
        FieldId::Position(i) => PANEL_POSITION_IDS[i % 3],
        FieldId::Target(i) => PANEL_TARGET_IDS[i % 3],
        FieldId::Step => PANEL_STEP_ID,
    }
}

pub fn wire_panel(document: &web::Document, queue: MessageQueue) {
    for field in FieldId::ALL {
        wire_field(document, field, queue.clone());
    }
    let buttons = [
        (PANEL_APPLY_ID, SceneMessage::PanelApply),
        (PANEL_CAPTURE_ID, SceneMessage::PanelCapture),
        (PANEL_SAVE_ID, SceneMessage::PanelSave),
        (PANEL_LOAD_ID, SceneMessage::PanelLoad),
    ];
    for (id, msg) in buttons {
        let q = queue.clone();
        dom::add_click_listener(document, id, move || q.push(msg.clone()));
    }
    wire_nudges(document, queue);
}

fn wire_field(document: &web::Document, field: FieldId, queue: MessageQueue) {
    let Some(el) = document.get_element_by_id(input_id(field)) else {
        return;
    };
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
        else {
            return;
        };
        queue.push(SceneMessage::PanelEdit {
            field,
            text: input.value(),
        });
    }) as Box<dyn FnMut(_)>);
    _ = el.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// `<button class="panel-nudge" data-handle="position" data-axis="0" data-dir="-1">`
fn parse_nudge(el: &web::Element) -> Option<(Handle, usize, f32)> {
    let handle = match el.get_attribute("data-handle")?.as_str() {
        "position" => Handle::Position,
        "target" => Handle::Target,
        _ => return None,
    };
    let axis = el.get_attribute("data-axis")?.parse::<usize>().ok()?;
    let dir = el.get_attribute("data-dir")?.parse::<f32>().ok()?;
    (axis < 3).then_some((handle, axis, dir))
}

fn wire_nudges(document: &web::Document, queue: MessageQueue) {
    let Ok(nodes) = document.query_selector_all(&format!(".{PANEL_NUDGE_CLASS}")) else {
        return;
    };
    for i in 0..nodes.length() {
        let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        let Some((handle, axis, direction)) = parse_nudge(&el) else {
            log::warn!("[panel] nudge button without handle/axis/dir");
            continue;
        };
        let q = queue.clone();
        let closure = Closure::wrap(Box::new(move || {
            q.push(SceneMessage::PanelNudge {
                handle,
                axis,
                direction,
            });
        }) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn render_fields(document: &web::Document, fields: &PanelFields) {
    for field in FieldId::ALL {
        dom::set_input_value(document, input_id(field), fields.get(field));
    }
}
