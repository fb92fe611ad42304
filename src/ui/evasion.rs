use rand::Rng;
use rand::seq::IndexedRandom;

/// Horizontal margin kept between the reject button centre and the container edge.
pub const ENVELOPE_MARGIN_X: f64 = 60.0;
/// Vertical margin kept between the reject button centre and the container edge.
pub const ENVELOPE_MARGIN_Y: f64 = 30.0;
pub const SHRINK_STEP: f64 = 0.04;
pub const SHRINK_FLOOR: f64 = 0.4;
const EXTRA_SHRINK: f64 = 0.8;
const SPIN_DEGREES: f64 = 360.0;
const FLIP_DEGREES: f64 = 180.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvasionTrick {
    Reposition,
    ShrinkAndReposition,
    SpinAndReposition,
    FadeAndReappear,
    JumpToCorner,
    FlipAndReposition,
}

impl EvasionTrick {
    pub const ALL: [EvasionTrick; 6] = [
        EvasionTrick::Reposition,
        EvasionTrick::ShrinkAndReposition,
        EvasionTrick::SpinAndReposition,
        EvasionTrick::FadeAndReappear,
        EvasionTrick::JumpToCorner,
        EvasionTrick::FlipAndReposition,
    ];

    /// Uniform pick; the same trick may come up twice in a row.
    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL
            .choose(rng)
            .unwrap_or(&EvasionTrick::Reposition)
    }

    pub fn name(self) -> &'static str {
        match self {
            EvasionTrick::Reposition => "reposition",
            EvasionTrick::ShrinkAndReposition => "shrink",
            EvasionTrick::SpinAndReposition => "spin",
            EvasionTrick::FadeAndReappear => "fade",
            EvasionTrick::JumpToCorner => "corner",
            EvasionTrick::FlipAndReposition => "flip",
        }
    }

    pub fn hides_button(self) -> bool {
        self == EvasionTrick::FadeAndReappear
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Bounds { width, height }
    }

    /// Half extents the button centre may move within. Containers smaller than
    /// the margins collapse to a zero envelope instead of an inverted one.
    pub fn envelope(self) -> (f64, f64) {
        (
            (self.width / 2.0 - ENVELOPE_MARGIN_X).max(0.0),
            (self.height / 2.0 - ENVELOPE_MARGIN_Y).max(0.0),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonEvasionState {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
    pub rotation_degrees: f64,
    pub opacity: f64,
}

impl Default for ButtonEvasionState {
    fn default() -> Self {
        ButtonEvasionState {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
            rotation_degrees: 0.0,
            opacity: 1.0,
        }
    }
}

pub fn shrink_factor(rejection_count: u32) -> f64 {
    (1.0 - rejection_count as f64 * SHRINK_STEP).max(SHRINK_FLOOR)
}

fn random_offset<R: Rng + ?Sized>(rng: &mut R, bounds: Bounds) -> (f64, f64) {
    let (max_x, max_y) = bounds.envelope();
    (
        rng.random_range(-max_x..=max_x),
        rng.random_range(-max_y..=max_y),
    )
}

fn random_corner<R: Rng + ?Sized>(rng: &mut R, bounds: Bounds) -> (f64, f64) {
    let (max_x, max_y) = bounds.envelope();
    let corners = [
        (max_x, max_y),
        (-max_x, max_y),
        (max_x, -max_y),
        (-max_x, -max_y),
    ];
    *corners.choose(rng).unwrap_or(&corners[0])
}

/// Computes the next button state for `trick`. Rotation accumulates across
/// calls. Opacity is left to the caller except for the fade trick, which
/// starts fully transparent; the caller schedules the restore.
pub fn apply_trick<R: Rng + ?Sized>(
    current: &ButtonEvasionState,
    trick: EvasionTrick,
    bounds: Bounds,
    rejection_count: u32,
    rng: &mut R,
) -> ButtonEvasionState {
    let shrink = shrink_factor(rejection_count);
    let mut next = *current;
    next.scale = shrink;

    let (x, y) = match trick {
        EvasionTrick::JumpToCorner => random_corner(rng, bounds),
        _ => random_offset(rng, bounds),
    };
    next.offset_x = x;
    next.offset_y = y;

    match trick {
        EvasionTrick::Reposition | EvasionTrick::JumpToCorner => {}
        EvasionTrick::ShrinkAndReposition => next.scale = shrink * EXTRA_SHRINK,
        EvasionTrick::SpinAndReposition => next.rotation_degrees += SPIN_DEGREES,
        EvasionTrick::FlipAndReposition => next.rotation_degrees += FLIP_DEGREES,
        EvasionTrick::FadeAndReappear => next.opacity = 0.0,
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn shrink_factor_endpoints() {
        assert_eq!(shrink_factor(0), 1.0);
        assert!((shrink_factor(5) - 0.8).abs() < 1e-9);
        assert_eq!(shrink_factor(15), SHRINK_FLOOR);
        assert_eq!(shrink_factor(25), SHRINK_FLOOR);
        assert_eq!(shrink_factor(u32::MAX), SHRINK_FLOOR);
    }

    #[test]
    fn shrink_factor_never_increases() {
        let mut previous = shrink_factor(0);
        for count in 1..100 {
            let current = shrink_factor(count);
            assert!(current <= previous);
            assert!(current >= SHRINK_FLOOR);
            previous = current;
        }
    }

    #[test]
    fn offsets_stay_inside_envelope() {
        let mut rng = StdRng::seed_from_u64(7);
        let sizes = [(120.0, 60.0), (390.0, 200.0), (1024.0, 200.0), (200.0, 400.0)];
        for (width, height) in sizes {
            let bounds = Bounds::new(width, height);
            let (max_x, max_y) = bounds.envelope();
            let mut state = ButtonEvasionState::default();
            for count in 1..200 {
                let trick = EvasionTrick::pick(&mut rng);
                state = apply_trick(&state, trick, bounds, count, &mut rng);
                assert!(state.offset_x.abs() <= max_x, "{trick:?} x={}", state.offset_x);
                assert!(state.offset_y.abs() <= max_y, "{trick:?} y={}", state.offset_y);
            }
        }
    }

    #[test]
    fn tiny_container_pins_button_to_centre() {
        let mut rng = StdRng::seed_from_u64(1);
        let bounds = Bounds::new(40.0, 20.0);
        assert_eq!(bounds.envelope(), (0.0, 0.0));
        let state = apply_trick(
            &ButtonEvasionState::default(),
            EvasionTrick::JumpToCorner,
            bounds,
            1,
            &mut rng,
        );
        assert_eq!((state.offset_x, state.offset_y), (0.0, 0.0));
    }

    #[test]
    fn corner_jump_lands_on_a_corner() {
        let mut rng = StdRng::seed_from_u64(3);
        let bounds = Bounds::new(390.0, 200.0);
        for _ in 0..20 {
            let state = apply_trick(
                &ButtonEvasionState::default(),
                EvasionTrick::JumpToCorner,
                bounds,
                2,
                &mut rng,
            );
            assert_eq!(state.offset_x.abs(), 135.0);
            assert_eq!(state.offset_y.abs(), 70.0);
            assert_eq!(state.scale, shrink_factor(2));
        }
    }

    #[test]
    fn rotation_accumulates() {
        let mut rng = StdRng::seed_from_u64(11);
        let bounds = Bounds::new(390.0, 200.0);
        let start = ButtonEvasionState::default();
        let spun = apply_trick(&start, EvasionTrick::SpinAndReposition, bounds, 1, &mut rng);
        let spun_again = apply_trick(&spun, EvasionTrick::SpinAndReposition, bounds, 2, &mut rng);
        let flipped = apply_trick(&spun_again, EvasionTrick::FlipAndReposition, bounds, 3, &mut rng);
        let moved = apply_trick(&flipped, EvasionTrick::Reposition, bounds, 4, &mut rng);
        assert_eq!(spun.rotation_degrees, 360.0);
        assert_eq!(spun_again.rotation_degrees, 720.0);
        assert_eq!(flipped.rotation_degrees, 900.0);
        assert_eq!(moved.rotation_degrees, 900.0);
    }

    #[test]
    fn shrink_trick_applies_extra_factor() {
        let mut rng = StdRng::seed_from_u64(5);
        let bounds = Bounds::new(390.0, 200.0);
        let state = apply_trick(
            &ButtonEvasionState::default(),
            EvasionTrick::ShrinkAndReposition,
            bounds,
            5,
            &mut rng,
        );
        assert!((state.scale - 0.8 * 0.8).abs() < 1e-9);
    }

    #[test]
    fn only_fade_touches_opacity() {
        let mut rng = StdRng::seed_from_u64(9);
        let bounds = Bounds::new(390.0, 200.0);
        for trick in EvasionTrick::ALL {
            let state = apply_trick(&ButtonEvasionState::default(), trick, bounds, 1, &mut rng);
            let expected = if trick.hides_button() { 0.0 } else { 1.0 };
            assert_eq!(state.opacity, expected, "{}", trick.name());
        }
    }

    #[test]
    fn pick_reaches_every_trick() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = Vec::new();
        for _ in 0..500 {
            let trick = EvasionTrick::pick(&mut rng);
            if !seen.contains(&trick) {
                seen.push(trick);
            }
        }
        assert_eq!(seen.len(), EvasionTrick::ALL.len());
    }
}
