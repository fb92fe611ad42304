use rand::Rng;

use super::motion::{self, Spring};

pub const BURST_COUNT: usize = 50;
pub const BURST_GLYPH: &str = "❤️";
/// Seconds after entry when the particles leave the centre.
pub const BURST_START: f64 = 0.2;
/// Seconds after entry when the particles start flying off screen.
pub const BURST_EXIT_START: f64 = 1.2;
pub const BURST_EXIT_DURATION: f64 = 0.8;
pub const BURST_EXIT_SPREAD: f64 = 2.5;
pub const BURST_MAX_STAGGER: f64 = 0.1;
const BURST_SPRING: Spring = Spring::new(0.6, 0.6);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstParticle {
    pub normalized_x: f64,
    pub normalized_y: f64,
    pub target_scale: f64,
    pub target_rotation: f64,
    pub target_opacity: f64,
    pub reveal_delay: f64,
    pub glyph_size: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstSample {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub rotation_degrees: f64,
    pub opacity: f64,
}

impl BurstSample {
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0 && self.scale > 0.0
    }
}

impl BurstParticle {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        BurstParticle {
            normalized_x: rng.random_range(0.05..=0.95),
            normalized_y: rng.random_range(0.05..=0.95),
            target_scale: rng.random_range(0.6..=1.2),
            target_rotation: rng.random_range(-30.0..=30.0),
            target_opacity: rng.random_range(0.6..=1.0),
            reveal_delay: rng.random_range(0.0..=BURST_MAX_STAGGER),
            glyph_size: rng.random_range(20.0..=44.0),
        }
    }

    fn exit_position(&self) -> (f64, f64) {
        (
            0.5 + (self.normalized_x - 0.5) * BURST_EXIT_SPREAD,
            0.5 + (self.normalized_y - 0.5) * BURST_EXIT_SPREAD,
        )
    }

    /// State `elapsed` seconds after the celebration started: hidden at the
    /// centre, springing out to its spot, then flung past the edges while
    /// fading.
    pub fn sample(&self, elapsed: f64, width: f64, height: f64) -> BurstSample {
        let spring = BURST_SPRING.sample(elapsed - BURST_START - self.reveal_delay);
        let mut nx = motion::lerp(0.5, self.normalized_x, spring);
        let mut ny = motion::lerp(0.5, self.normalized_y, spring);
        let mut opacity = (self.target_opacity * spring).clamp(0.0, 1.0);

        let exit = motion::ease_out(motion::progress(
            elapsed,
            BURST_EXIT_START,
            BURST_EXIT_DURATION,
        ));
        if exit > 0.0 {
            let (ex, ey) = self.exit_position();
            nx = motion::lerp(nx, ex, exit);
            ny = motion::lerp(ny, ey, exit);
            opacity = motion::lerp(opacity, 0.0, exit);
        }

        BurstSample {
            x: nx * width,
            y: ny * height,
            scale: (self.target_scale * spring).max(0.0),
            rotation_degrees: self.target_rotation * spring,
            opacity,
        }
    }
}

pub fn generate_burst<R: Rng + ?Sized>(rng: &mut R) -> Vec<BurstParticle> {
    (0..BURST_COUNT).map(|_| BurstParticle::random(rng)).collect()
}

/// Seconds after entry past which no burst particle is visible.
pub fn burst_finished_at() -> f64 {
    BURST_EXIT_START + BURST_EXIT_DURATION
}
