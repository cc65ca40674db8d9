/// How long an animated change takes to complete, in milliseconds.
///
/// A transition only describes the timing; the animated values themselves
/// live in [`Tween`]s that get retargeted when a component re-renders.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Transition {
    millis: f32,
}

impl Transition {
    pub fn new(millis: f32) -> Self {
        Self {
            millis: millis.max(0.0),
        }
    }

    /// Zero-duration transition for an immediate first paint.
    pub fn immediate() -> Self {
        Self { millis: 0.0 }
    }

    pub fn duration_secs(&self) -> f32 {
        self.millis / 1000.0
    }
}

/// A retargetable animated scalar, sampled against a monotonic clock in
/// seconds (egui's frame time in the widget, explicit values in tests).
///
/// Retargeting mid-flight captures the current interpolated value as the
/// new starting point, so a fresh transition interrupts the old one and
/// continues smoothly toward the new end state.
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    start: f64,
    duration_secs: f32,
}

impl Tween {
    /// A tween that has already settled at `value`.
    pub fn fixed(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            start: 0.0,
            duration_secs: 0.0,
        }
    }

    pub fn retarget(&mut self, to: f32, transition: &Transition, now: f64) {
        self.from = self.value_at(now);
        self.to = to;
        self.start = now;
        self.duration_secs = transition.duration_secs();
    }

    pub fn value_at(&self, now: f64) -> f32 {
        if self.duration_secs <= 0.0 {
            return self.to;
        }
        let progress = ((now - self.start) as f32 / self.duration_secs).clamp(0.0, 1.0);
        egui::lerp(self.from..=self.to, ease_in_out_cubic(progress))
    }

    /// End state of the animation, independent of the clock.
    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_settled(&self, now: f64) -> bool {
        self.duration_secs <= 0.0 || (now - self.start) as f32 >= self.duration_secs
    }
}

fn ease_in_out_cubic(p: f32) -> f32 {
    if p < 0.5 {
        4.0 * p * p * p
    } else {
        let q = -2.0 * p + 2.0;
        1.0 - q * q * q / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immediate_transition_settles_instantly() {
        let mut tween = Tween::fixed(0.0);
        tween.retarget(10.0, &Transition::immediate(), 5.0);
        assert_eq!(tween.value_at(5.0), 10.0);
        assert!(tween.is_settled(5.0));
    }

    #[test]
    fn tween_reaches_target_after_duration() {
        let mut tween = Tween::fixed(0.0);
        tween.retarget(10.0, &Transition::new(500.0), 0.0);
        assert_eq!(tween.value_at(0.0), 0.0);
        assert_eq!(tween.value_at(0.25), 5.0); // ease is symmetric at midpoint
        assert_eq!(tween.value_at(0.5), 10.0);
        assert_eq!(tween.value_at(99.0), 10.0);
    }

    #[test]
    fn retarget_mid_flight_continues_from_current_value() {
        let mut tween = Tween::fixed(0.0);
        tween.retarget(10.0, &Transition::new(1000.0), 0.0);
        let mid = tween.value_at(0.5);
        assert_eq!(mid, 5.0);

        // Interrupt halfway and head somewhere else.
        tween.retarget(-10.0, &Transition::new(1000.0), 0.5);
        assert_eq!(tween.value_at(0.5), mid);
        assert_eq!(tween.value_at(1.5), -10.0);
        assert_eq!(tween.target(), -10.0);
    }

    #[test]
    fn negative_duration_is_clamped() {
        let transition = Transition::new(-200.0);
        assert_eq!(transition.duration_secs(), 0.0);
    }
}
