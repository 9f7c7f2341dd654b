use crate::constants::*;
use crate::dom;
use birthday_core::overlay::{DebugLog, ModelStatus, OverlayPhase};
use birthday_core::{MessageQueue, SceneMessage, ZoomPhase};
use web_sys as web;

const PHASES: [OverlayPhase; 4] = [
    OverlayPhase::Initial,
    OverlayPhase::Ready,
    OverlayPhase::Animate,
    OverlayPhase::Cleared,
];

pub fn set_phase(document: &web::Document, phase: OverlayPhase, text: &str) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        let cl = el.class_list();
        for p in PHASES {
            _ = cl.remove_1(p.class());
        }
        _ = cl.add_1(phase.class());
        if phase == OverlayPhase::Cleared {
            _ = cl.add_1(HIDDEN_CLASS);
        }
    }
    dom::set_text(document, OVERLAY_TEXT_ID, text);
}

pub fn set_status(document: &web::Document, status: ModelStatus) {
    dom::set_text(document, STATUS_HOUSE_ID, status.house.label());
    dom::set_text(document, STATUS_CAT_ID, status.cat.label());
}

#[inline]
pub fn set_debug_visible(document: &web::Document, visible: bool) {
    dom::set_class(document, DEBUG_OVERLAY_ID, HIDDEN_CLASS, !visible);
}

#[inline]
pub fn render_debug_log(document: &web::Document, log: &DebugLog) {
    dom::set_text(document, DEBUG_LOG_ID, &log.text());
}

#[inline]
pub fn set_hover(document: &web::Document, hovered: bool) {
    if let Some(body) = document.body() {
        let cl = body.class_list();
        _ = if hovered {
            cl.add_1(HOVER_CLASS)
        } else {
            cl.remove_1(HOVER_CLASS)
        };
    }
}

/// The exit control is offered while flying in and once zoomed.
pub fn set_zoom_phase(document: &web::Document, phase: ZoomPhase) {
    let exit_visible = matches!(phase, ZoomPhase::AnimatingIn | ZoomPhase::Zoomed);
    dom::set_class(document, EXIT_BUTTON_ID, HIDDEN_CLASS, !exit_visible);
}

/// Full-page error state; the scene is not recoverable without a reload.
pub fn show_error(document: &web::Document, message: &str, log: &str) {
    dom::set_text(document, ERROR_MESSAGE_ID, message);
    dom::set_text(document, ERROR_LOG_ID, log);
    dom::set_class(document, ERROR_PAGE_ID, HIDDEN_CLASS, false);
    dom::set_class(document, OVERLAY_ID, HIDDEN_CLASS, true);
    dom::set_class(document, SCENE_CANVAS_ID, HIDDEN_CLASS, true);
}

pub fn wire_buttons(document: &web::Document, queue: MessageQueue) {
    dom::add_click_listener(document, RETRY_BUTTON_ID, dom::reload_page);
    dom::add_click_listener(document, EXIT_BUTTON_ID, move || {
        queue.push(SceneMessage::ExitRequested)
    });
}
