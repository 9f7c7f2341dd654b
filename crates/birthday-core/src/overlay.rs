//! Loading overlay sequencing, model status and the in-page debug log.
//!
//! The overlay runs `Initial → Ready → Animate → Cleared`, driven by the same
//! frame clock as everything else instead of independent timers.

use std::collections::VecDeque;

use crate::constants::{OVERLAY_ANIMATE_DELAY_MS, OVERLAY_CLEAR_AFTER_MS, OVERLAY_READY_DELAY_MS};

pub const LOADING_TEXT: &str = "Đang tải nhà hộp sữa 3D...";
pub const READY_TEXT: &str = "Sẵn sàng!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayPhase {
    Initial,
    Ready,
    Animate,
    Cleared,
}

impl OverlayPhase {
    /// CSS class toggled on the overlay root.
    pub fn class(self) -> &'static str {
        match self {
            OverlayPhase::Initial => "initial",
            OverlayPhase::Ready => "ready",
            OverlayPhase::Animate => "animate",
            OverlayPhase::Cleared => "cleared",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModelState {
    #[default]
    Loading,
    Loaded,
    Failed,
}

impl ModelState {
    pub fn label(self) -> &'static str {
        match self {
            ModelState::Loading => "loading",
            ModelState::Loaded => "loaded",
            ModelState::Failed => "failed",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModelStatus {
    pub house: ModelState,
    pub cat: ModelState,
}

impl ModelStatus {
    pub fn settled(&self) -> bool {
        self.house != ModelState::Loading && self.cat != ModelState::Loading
    }
}

#[derive(Clone, Debug)]
pub struct LoadingOverlay {
    phase: OverlayPhase,
    loaded_at: Option<f64>,
    status: ModelStatus,
}

impl LoadingOverlay {
    pub fn new() -> Self {
        Self {
            phase: OverlayPhase::Initial,
            loaded_at: None,
            status: ModelStatus::default(),
        }
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    pub fn status(&self) -> ModelStatus {
        self.status
    }

    pub fn text(&self) -> &'static str {
        if self.loaded_at.is_some() {
            READY_TEXT
        } else {
            LOADING_TEXT
        }
    }

    pub fn set_house(&mut self, state: ModelState, now_ms: f64) {
        self.status.house = state;
        self.start_if_settled(now_ms);
    }

    pub fn set_cat(&mut self, state: ModelState, now_ms: f64) {
        self.status.cat = state;
        self.start_if_settled(now_ms);
    }

    fn start_if_settled(&mut self, now_ms: f64) {
        if self.loaded_at.is_none() && self.status.settled() {
            self.loaded_at = Some(now_ms);
        }
    }

    /// Advance the sequence; returns the new phase when it changed.
    pub fn tick(&mut self, now_ms: f64) -> Option<OverlayPhase> {
        let t0 = self.loaded_at?;
        let ready = t0 + OVERLAY_READY_DELAY_MS;
        let animate = ready + OVERLAY_ANIMATE_DELAY_MS;
        let cleared = animate + OVERLAY_CLEAR_AFTER_MS;
        let next = if now_ms >= cleared {
            OverlayPhase::Cleared
        } else if now_ms >= animate {
            OverlayPhase::Animate
        } else if now_ms >= ready {
            OverlayPhase::Ready
        } else {
            OverlayPhase::Initial
        };
        (next != self.phase).then(|| {
            self.phase = next;
            next
        })
    }
}

impl Default for LoadingOverlay {
    fn default() -> Self {
        Self::new()
    }
}

/// Bounded list of user-visible log lines.
#[derive(Clone, Debug)]
pub struct DebugLog {
    lines: VecDeque<String>,
    cap: usize,
}

impl DebugLog {
    pub fn new(cap: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(cap.max(1)),
            cap: cap.max(1),
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        if self.lines.len() == self.cap {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    pub fn text(&self) -> String {
        self.lines.iter().map(String::as_str).collect::<Vec<_>>().join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_waits_for_both_models() {
        let mut o = LoadingOverlay::new();
        o.set_house(ModelState::Loaded, 10.0);
        assert_eq!(o.tick(10_000.0), None);
        assert_eq!(o.text(), LOADING_TEXT);
        o.set_cat(ModelState::Loaded, 1000.0);
        assert_eq!(o.text(), READY_TEXT);
        assert_eq!(o.tick(1400.0), None);
        assert_eq!(o.tick(1500.0), Some(OverlayPhase::Ready));
        assert_eq!(o.tick(1550.0), None);
        assert_eq!(o.tick(1600.0), Some(OverlayPhase::Animate));
        assert_eq!(o.tick(4600.0), Some(OverlayPhase::Cleared));
    }

    #[test]
    fn a_failed_model_still_settles() {
        let mut o = LoadingOverlay::new();
        o.set_house(ModelState::Failed, 0.0);
        o.set_cat(ModelState::Loaded, 0.0);
        assert_eq!(o.tick(10_000.0), Some(OverlayPhase::Cleared));
        assert_eq!(o.status().house.label(), "failed");
    }

    #[test]
    fn debug_log_drops_oldest() {
        let mut log = DebugLog::new(2);
        log.push("a");
        log.push("b");
        log.push("c");
        assert_eq!(log.text(), "b\nc");
        log.push("d");
        assert_eq!(log.text(), "c\nd");
    }
}
