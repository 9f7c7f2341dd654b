//! Click-to-zoom camera flight.
//!
//! `Idle → AnimatingIn → Zoomed → AnimatingOut → Idle`. All transitions go
//! through [`ZoomController::handle`], which also moves camera ownership in
//! the same step.

use crate::camera::CameraPose;
use crate::constants::SceneConfig;
use crate::rig::{CameraOwner, CameraRig};
use crate::tween::{CameraTween, TweenSample};
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomPhase {
    Idle,
    AnimatingIn,
    Zoomed,
    AnimatingOut,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomEvent {
    HouseClicked,
    ExitRequested,
    /// Resize or teardown: drop the running flight where it is.
    Cancel,
    Tick,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomTransition {
    Entered(ZoomPhase),
    /// Re-click while zoomed: straight back to idle, camera untouched.
    Reset,
}

#[derive(Clone, Copy, Debug)]
enum State {
    Idle,
    AnimatingIn(CameraTween),
    Zoomed,
    AnimatingOut(CameraTween),
}

/// Where the camera was, and what orbit looked at, before zooming.
#[derive(Clone, Copy, Debug, PartialEq)]
struct HomeView {
    pose: CameraPose,
    target: Vec3,
}

#[derive(Debug)]
pub struct ZoomController {
    state: State,
    home: Option<HomeView>,
    zoom_pose: CameraPose,
    zoom_focus: Vec3,
    fallback_home: HomeView,
    duration_ms: f64,
}

impl ZoomController {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            state: State::Idle,
            home: None,
            zoom_pose: CameraPose::looking_at(config.zoom_position, config.zoom_focus),
            zoom_focus: config.zoom_focus,
            fallback_home: HomeView {
                pose: CameraPose::looking_at(config.home_position, config.home_target),
                target: config.home_target,
            },
            duration_ms: config.zoom_duration_ms,
        }
    }

    pub fn phase(&self) -> ZoomPhase {
        match self.state {
            State::Idle => ZoomPhase::Idle,
            State::AnimatingIn(_) => ZoomPhase::AnimatingIn,
            State::Zoomed => ZoomPhase::Zoomed,
            State::AnimatingOut(_) => ZoomPhase::AnimatingOut,
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, State::AnimatingIn(_) | State::AnimatingOut(_))
    }

    /// The single transition function. `now_ms` is the frame timestamp.
    pub fn handle(
        &mut self,
        event: ZoomEvent,
        now_ms: f64,
        rig: &mut CameraRig,
    ) -> Option<ZoomTransition> {
        match (self.state, event) {
            (State::Idle, ZoomEvent::HouseClicked) => {
                self.home = Some(HomeView {
                    pose: rig.pose(),
                    target: rig.orbit_target(),
                });
                Some(self.fly_in(now_ms, rig))
            }
            (State::AnimatingOut(_), ZoomEvent::HouseClicked) => {
                // new request mid-flight: restart from wherever the camera is
                Some(self.fly_in(now_ms, rig))
            }
            (State::Zoomed, ZoomEvent::HouseClicked) => {
                log::warn!("[zoom] click while zoomed, forcing reset to idle");
                self.home = None;
                rig.hand_to_orbit(self.zoom_focus);
                self.state = State::Idle;
                Some(ZoomTransition::Reset)
            }
            (State::Zoomed | State::AnimatingIn(_), ZoomEvent::ExitRequested) => {
                let home = self.home.unwrap_or(self.fallback_home);
                let tween = CameraTween::new(rig.pose(), home.pose, now_ms, self.duration_ms);
                rig.hand_over(CameraOwner::Tween);
                self.state = State::AnimatingOut(tween);
                log::info!("[zoom] flying back");
                Some(ZoomTransition::Entered(ZoomPhase::AnimatingOut))
            }
            (State::AnimatingIn(_), ZoomEvent::Cancel) => {
                self.cancel_towards(self.zoom_focus, rig);
                Some(ZoomTransition::Entered(ZoomPhase::Idle))
            }
            (State::AnimatingOut(_), ZoomEvent::Cancel) => {
                let focus = self.home.unwrap_or(self.fallback_home).target;
                self.cancel_towards(focus, rig);
                Some(ZoomTransition::Entered(ZoomPhase::Idle))
            }
            (State::AnimatingIn(tween), ZoomEvent::Tick) => {
                if let TweenSample::Finished(_) = self.step(&tween, now_ms, rig) {
                    rig.hand_over(CameraOwner::Locked);
                    self.state = State::Zoomed;
                    log::info!("[zoom] arrived");
                    return Some(ZoomTransition::Entered(ZoomPhase::Zoomed));
                }
                None
            }
            (State::AnimatingOut(tween), ZoomEvent::Tick) => {
                if let TweenSample::Finished(_) = self.step(&tween, now_ms, rig) {
                    let target = self.home.take().unwrap_or(self.fallback_home).target;
                    rig.hand_to_orbit(target);
                    self.state = State::Idle;
                    log::info!("[zoom] back home");
                    return Some(ZoomTransition::Entered(ZoomPhase::Idle));
                }
                None
            }
            _ => None,
        }
    }

    fn fly_in(&mut self, now_ms: f64, rig: &mut CameraRig) -> ZoomTransition {
        let tween = CameraTween::new(rig.pose(), self.zoom_pose, now_ms, self.duration_ms);
        rig.hand_over(CameraOwner::Tween);
        self.state = State::AnimatingIn(tween);
        log::info!("[zoom] flying in");
        ZoomTransition::Entered(ZoomPhase::AnimatingIn)
    }

    fn step(&self, tween: &CameraTween, now_ms: f64, rig: &mut CameraRig) -> TweenSample {
        let sample = tween.sample(now_ms);
        if let Err(e) = rig.write(CameraOwner::Tween, sample.pose()) {
            log::error!("[zoom] {}", e);
        }
        sample
    }

    /// Leave the camera where the flight got to and hand it to orbit, aimed
    /// along the current view direction so nothing snaps.
    fn cancel_towards(&mut self, focus: Vec3, rig: &mut CameraRig) {
        let pose = rig.pose();
        let distance = (focus - pose.position).length().max(1.0);
        let target = pose.position + pose.forward() * distance;
        rig.hand_to_orbit(target);
        self.state = State::Idle;
        log::info!("[zoom] flight cancelled");
    }
}
