use rand::Rng;

/// Cycle length of the vertical drift, in scaled time units.
pub const DRIFT_CYCLE: f64 = 1.3;
pub const PROPOSAL_DRIFT_COUNT: usize = 15;
pub const CELEBRATION_DRIFT_COUNT: usize = 30;
pub const DRIFT_GLYPHS: [&str; 4] = ["💗", "💕", "💜", "💖"];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriftParticle {
    pub normalized_x: f64,
    pub speed: f64,
    pub size: f64,
    pub base_opacity: f64,
    pub wobble_amplitude: f64,
    pub wobble_frequency: f64,
    pub color_index: usize,
    pub phase_offset: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriftSample {
    pub x: f64,
    pub y: f64,
    pub normalized_y: f64,
    pub opacity: f64,
}

impl DriftParticle {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        DriftParticle {
            normalized_x: rng.random_range(0.05..=0.95),
            speed: rng.random_range(0.08..=0.2),
            size: rng.random_range(12.0..=28.0),
            base_opacity: rng.random_range(0.15..=0.4),
            wobble_amplitude: rng.random_range(10.0..=30.0),
            wobble_frequency: rng.random_range(0.5..=2.0),
            color_index: rng.random_range(0..=3),
            phase_offset: rng.random_range(0.0..=100.0),
        }
    }

    pub fn glyph(&self) -> &'static str {
        DRIFT_GLYPHS[self.color_index % DRIFT_GLYPHS.len()]
    }

    /// Height fraction of the cycle, 0 at the bottom edge rising toward 1.
    pub fn normalized_y(&self, t: f64) -> f64 {
        ((t * self.speed + self.phase_offset) / DRIFT_CYCLE).rem_euclid(1.0)
    }

    /// Position and opacity at time `t` in a `width` × `height` area. Depends on
    /// nothing but its arguments, so any `t` can be rendered without history.
    pub fn sample(&self, t: f64, width: f64, height: f64) -> DriftSample {
        let normalized_y = self.normalized_y(t);
        let wobble = (t * self.wobble_frequency + self.phase_offset).sin() * self.wobble_amplitude;
        DriftSample {
            x: self.normalized_x * width + wobble,
            y: height * (1.0 - normalized_y) + self.size,
            normalized_y,
            opacity: self.base_opacity * (1.0 - normalized_y * 0.5),
        }
    }
}

pub fn generate_field<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<DriftParticle> {
    (0..count).map(|_| DriftParticle::random(rng)).collect()
}
