//! Scroll physics: interpolation helpers and the tunables that shape the
//! smoothing, drag feel, and speed-reactive squash.

/// Linear interpolation from `from` toward `to` by factor `t`.
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    (1.0 - t) * from + t * to
}

/// Clamp `value` into `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics: when `max < min` (content
/// narrower than the viewport) the result collapses onto `min`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    min.max(value.min(max))
}

/// Tunable constants for the scroll loop.  All distances are in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    /// Fraction of the remaining gap closed per frame.
    pub smoothing: f64,
    /// Multiplier applied to pointer travel while dragging.
    pub drag_multiplier: f64,
    /// Upper bound on the per-frame velocity.  Only the positive side is
    /// capped; see `ScrollController::advance`.
    pub velocity_cap: f64,
    /// Progress-bar scale at ratio 0.
    pub bar_baseline: f64,
    /// Item shrink per pixel of velocity.
    pub item_squash: f64,
    /// Image horizontal stretch per pixel of velocity.
    pub image_stretch: f64,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            smoothing: 0.1,
            drag_multiplier: 2.5,
            velocity_cap: 100.0,
            bar_baseline: 0.18,
            item_squash: 0.008,
            image_stretch: 0.004,
        }
    }
}

impl Physics {
    /// Bring user-supplied values back into ranges that keep the loop stable.
    pub fn sanitised(self) -> Self {
        let defaults = Self::default();
        let pick = |v: f64, fallback: f64, lo: f64, hi: f64| {
            if v.is_finite() {
                v.clamp(lo, hi)
            } else {
                fallback
            }
        };
        Self {
            smoothing: pick(self.smoothing, defaults.smoothing, 0.01, 1.0),
            drag_multiplier: pick(self.drag_multiplier, defaults.drag_multiplier, 0.1, 20.0),
            velocity_cap: pick(self.velocity_cap, defaults.velocity_cap, 1.0, 10_000.0),
            bar_baseline: pick(self.bar_baseline, defaults.bar_baseline, 0.0, 1.0),
            item_squash: pick(self.item_squash, defaults.item_squash, 0.0, 0.05),
            image_stretch: pick(self.image_stretch, defaults.image_stretch, 0.0, 0.05),
        }
    }

    /// Progress-bar horizontal scale for a play ratio in `[0, 1]`.
    pub fn bar_scale(&self, ratio: f64) -> f64 {
        self.bar_baseline + ratio * (1.0 - self.bar_baseline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_moves_a_tenth_of_the_gap() {
        assert!((lerp(0.0, 100.0, 0.1) - 10.0).abs() < 1e-12);
        assert!((lerp(50.0, 50.0, 0.1) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn clamp_with_inverted_range_collapses_to_min() {
        assert_eq!(clamp(30.0, 0.0, -120.0), 0.0);
        assert_eq!(clamp(-5.0, 0.0, 400.0), 0.0);
        assert_eq!(clamp(1000.0, 0.0, 400.0), 400.0);
    }

    #[test]
    fn bar_scale_matches_baseline_formula() {
        let p = Physics::default();
        assert!((p.bar_scale(0.0) - 0.18).abs() < 1e-12);
        assert!((p.bar_scale(0.5) - 0.59).abs() < 1e-12);
        assert!((p.bar_scale(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn sanitised_replaces_non_finite_and_clamps() {
        let p = Physics {
            smoothing: f64::NAN,
            drag_multiplier: 500.0,
            ..Physics::default()
        }
        .sanitised();
        assert_eq!(p.smoothing, 0.1);
        assert_eq!(p.drag_multiplier, 20.0);
    }
}
