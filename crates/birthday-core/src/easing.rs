//! Easing curves for scripted camera motion.

/// Quintic ease-in-out. Input is clamped to `[0, 1]`.
#[inline]
pub fn ease_in_out_quint(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        16.0 * t * t * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u * u * u / 2.0
    }
}

/// Linear progress of `now_ms` through a window starting at `start_ms`.
#[inline]
pub fn progress(start_ms: f64, now_ms: f64, duration_ms: f64) -> f32 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    ((now_ms - start_ms) / duration_ms).clamp(0.0, 1.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quint_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_quint(0.0), 0.0);
        assert_eq!(ease_in_out_quint(1.0), 1.0);
        assert_eq!(ease_in_out_quint(0.5), 0.5);
    }

    #[test]
    fn quint_is_monotone() {
        let mut prev = ease_in_out_quint(0.0);
        for i in 1..=1000 {
            let v = ease_in_out_quint(i as f32 / 1000.0);
            assert!(v >= prev, "ease decreased at step {}: {} < {}", i, v, prev);
            prev = v;
        }
    }

    #[test]
    fn quint_clamps_input() {
        assert_eq!(ease_in_out_quint(-0.3), 0.0);
        assert_eq!(ease_in_out_quint(1.7), 1.0);
    }

    #[test]
    fn progress_handles_zero_duration() {
        assert_eq!(progress(10.0, 5.0, 0.0), 1.0);
        assert_eq!(progress(0.0, 1500.0, 3000.0), 0.5);
        assert_eq!(progress(100.0, 50.0, 3000.0), 0.0);
    }
}
