use std::f64::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    /// Seconds for one undamped oscillation.
    pub response: f64,
    pub damping_fraction: f64,
}

impl Spring {
    pub const fn new(response: f64, damping_fraction: f64) -> Self {
        Spring {
            response,
            damping_fraction,
        }
    }

    /// Progress from 0 toward 1 after `t` seconds. Underdamped springs
    /// overshoot past 1 before settling.
    pub fn sample(self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        let omega = TAU / self.response.max(f64::EPSILON);
        let zeta = self.damping_fraction.max(0.0);
        if zeta >= 1.0 {
            return 1.0 - (-omega * t).exp() * (1.0 + omega * t);
        }
        let damped = omega * (1.0 - zeta * zeta).sqrt();
        let decay = (-zeta * omega * t).exp();
        1.0 - decay * ((damped * t).cos() + (zeta * omega / damped) * (damped * t).sin())
    }
}

/// Fraction of `duration` elapsed since `start`, clamped to `0..=1`.
pub fn progress(elapsed: f64, start: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return if elapsed >= start { 1.0 } else { 0.0 };
    }
    ((elapsed - start) / duration).clamp(0.0, 1.0)
}

pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spring_starts_at_zero_and_settles_at_one() {
        let spring = Spring::new(0.6, 0.6);
        assert_eq!(spring.sample(0.0), 0.0);
        assert_eq!(spring.sample(-1.0), 0.0);
        assert!((spring.sample(5.0) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn underdamped_spring_overshoots() {
        let spring = Spring::new(0.6, 0.5);
        let peak = (1..200)
            .map(|i| spring.sample(i as f64 * 0.005))
            .fold(0.0_f64, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn critically_damped_spring_does_not_overshoot() {
        let spring = Spring::new(0.5, 1.0);
        for i in 0..400 {
            assert!(spring.sample(i as f64 * 0.01) <= 1.0);
        }
    }

    #[test]
    fn easing_endpoints() {
        assert_eq!(ease_out(0.0), 0.0);
        assert_eq!(ease_out(1.0), 1.0);
        assert!((ease_out(0.5) - 0.875).abs() < 1e-9);
    }

    #[test]
    fn progress_clamps() {
        assert_eq!(progress(0.0, 1.2, 0.8), 0.0);
        assert!((progress(1.6, 1.2, 0.8) - 0.5).abs() < 1e-9);
        assert_eq!(progress(3.0, 1.2, 0.8), 1.0);
        assert_eq!(progress(1.2, 1.2, 0.0), 1.0);
    }
}
