use crate::camera::CameraPose;
use crate::easing::{ease_in_out_quint, progress};

/// Result of sampling a tween at a frame timestamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TweenSample {
    Running(CameraPose),
    /// The exact end pose; no interpolation error carried over.
    Finished(CameraPose),
}

impl TweenSample {
    pub fn pose(&self) -> CameraPose {
        match *self {
            TweenSample::Running(p) | TweenSample::Finished(p) => p,
        }
    }
}

/// Scripted camera flight between two poses.
///
/// Position is interpolated linearly and orientation spherically, both
/// through the quintic ease. Time comes from the caller's frame timestamp so
/// the flight lasts the same wall-clock time at any frame rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTween {
    pub from: CameraPose,
    pub to: CameraPose,
    pub start_ms: f64,
    pub duration_ms: f64,
}

impl CameraTween {
    pub fn new(from: CameraPose, to: CameraPose, start_ms: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
        }
    }

    pub fn sample(&self, now_ms: f64) -> TweenSample {
        let p = progress(self.start_ms, now_ms, self.duration_ms);
        if p >= 1.0 {
            return TweenSample::Finished(self.to);
        }
        let k = ease_in_out_quint(p);
        let position = self.from.position.lerp(self.to.position, k);
        let orientation = self.from.orientation.slerp(self.to.orientation, k).normalize();
        TweenSample::Running(CameraPose {
            position,
            orientation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn poses() -> (CameraPose, CameraPose) {
        (
            CameraPose::looking_at(Vec3::new(100.0, 20.0, 10.0), Vec3::ZERO),
            CameraPose::looking_at(Vec3::new(30.0, 0.0, 40.0), Vec3::new(0.0, -10.0, 0.0)),
        )
    }

    #[test]
    fn start_sample_is_start_pose() {
        let (a, b) = poses();
        let tw = CameraTween::new(a, b, 1000.0, 3000.0);
        let s = tw.sample(1000.0).pose();
        assert!(s.position.abs_diff_eq(a.position, 1e-4));
    }

    #[test]
    fn midpoint_position_is_halfway() {
        let (a, b) = poses();
        let tw = CameraTween::new(a, b, 0.0, 3000.0);
        let s = tw.sample(1500.0);
        assert!(matches!(s, TweenSample::Running(_)));
        let mid = (a.position + b.position) * 0.5;
        assert!(s.pose().position.abs_diff_eq(mid, 1e-3));
    }

    #[test]
    fn late_samples_finish_on_the_exact_target() {
        let (a, b) = poses();
        let tw = CameraTween::new(a, b, 0.0, 3000.0);
        assert_eq!(tw.sample(3000.0), TweenSample::Finished(b));
        assert_eq!(tw.sample(9000.0), TweenSample::Finished(b));
    }
}
