use super::burst;
use super::motion::{self, Spring};

pub const HERO_GLYPH: &str = "💕";
pub const HERO_START_SCALE: f64 = 0.1;
const HERO_SPRING: Spring = Spring::new(0.6, 0.5);

pub const HEART_ROW: [&str; 5] = ["💕", "💗", "💜", "💖", "💝"];
pub const HEART_ROW_START: f64 = 1.8;
pub const HEART_ROW_STEP: f64 = 0.15;
/// Length of every text and heart entrance once its cue fires.
pub const REVEAL_DURATION: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Hero,
    Burst,
    BurstExit,
    Headline,
    Message,
    Closing,
    Heart(usize),
}

impl Cue {
    /// Seconds after entry at which the cue fires.
    pub fn at(self) -> f64 {
        match self {
            Cue::Hero => 0.0,
            Cue::Burst => burst::BURST_START,
            Cue::BurstExit => burst::BURST_EXIT_START,
            Cue::Headline => 0.4,
            Cue::Message => 0.9,
            Cue::Closing => 1.4,
            Cue::Heart(index) => HEART_ROW_START + HEART_ROW_STEP * index as f64,
        }
    }

    /// Cue name used as the CSS hook on the revealed widget.
    pub fn css_name(self) -> &'static str {
        match self {
            Cue::Hero => "hero",
            Cue::Burst => "burst",
            Cue::BurstExit => "burst-exit",
            Cue::Headline => "headline",
            Cue::Message => "message",
            Cue::Closing => "closing",
            Cue::Heart(_) => "heart",
        }
    }

    pub fn all() -> impl Iterator<Item = Cue> {
        [
            Cue::Hero,
            Cue::Burst,
            Cue::Headline,
            Cue::Message,
            Cue::BurstExit,
            Cue::Closing,
        ]
        .into_iter()
        .chain((0..HEART_ROW.len()).map(Cue::Heart))
    }
}

/// Fixed, non-looping choreography of the celebration screen, measured from
/// the moment it was shown.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CelebrationTimeline;

impl CelebrationTimeline {
    pub fn is_visible(&self, cue: Cue, elapsed: f64) -> bool {
        elapsed >= cue.at()
    }

    /// Cues that fire in the half-open window `(previous, now]`, in order.
    /// A negative `previous` includes the cues at time zero.
    pub fn fired_between(&self, previous: f64, now: f64) -> Vec<Cue> {
        let mut fired: Vec<Cue> = Cue::all()
            .filter(|cue| !self.is_visible(*cue, previous) && self.is_visible(*cue, now))
            .collect();
        fired.sort_by(|a, b| a.at().total_cmp(&b.at()));
        fired
    }

    pub fn hero_scale(&self, elapsed: f64) -> f64 {
        motion::lerp(HERO_START_SCALE, 1.0, HERO_SPRING.sample(elapsed))
    }

    /// Seconds after entry when the last entrance and the burst exit are done.
    pub fn finished_at(&self) -> f64 {
        let last_heart = Cue::Heart(HEART_ROW.len() - 1).at() + REVEAL_DURATION;
        last_heart.max(burst::burst_finished_at())
    }

    pub fn is_finished(&self, elapsed: f64) -> bool {
        elapsed >= self.finished_at()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn headline_boundary() {
        let timeline = CelebrationTimeline;
        assert!(!timeline.is_visible(Cue::Headline, 0.399));
        assert!(timeline.is_visible(Cue::Headline, 0.4));

        assert!(!timeline.fired_between(0.3, 0.399).contains(&Cue::Headline));
        assert_eq!(timeline.fired_between(0.399, 0.4), vec![Cue::Headline]);
        assert!(timeline.fired_between(0.4, 0.5).is_empty());
    }

    #[test]
    fn cue_schedule() {
        assert_eq!(Cue::Hero.at(), 0.0);
        assert_eq!(Cue::Burst.at(), 0.2);
        assert_eq!(Cue::Message.at(), 0.9);
        assert_eq!(Cue::BurstExit.at(), 1.2);
        assert_eq!(Cue::Closing.at(), 1.4);
        assert_eq!(Cue::Heart(0).at(), 1.8);
        assert!((Cue::Heart(4).at() - 2.4).abs() < 1e-9);
    }

    #[test]
    fn hearts_appear_left_to_right() {
        let timeline = CelebrationTimeline;
        let elapsed = Cue::Heart(2).at() + 0.01;
        let visible: Vec<bool> = (0..HEART_ROW.len())
            .map(|i| timeline.is_visible(Cue::Heart(i), elapsed))
            .collect();
        assert_eq!(visible, vec![true, true, true, false, false]);
    }

    #[test]
    fn fired_between_walks_every_cue_once() {
        let timeline = CelebrationTimeline;
        let mut fired = Vec::new();
        let mut previous = -1.0;
        let mut now = 0.0;
        while now < 4.0 {
            fired.extend(timeline.fired_between(previous, now));
            previous = now;
            now += 1.0 / 60.0;
        }
        let expected: Vec<Cue> = vec![
            Cue::Hero,
            Cue::Burst,
            Cue::Headline,
            Cue::Message,
            Cue::BurstExit,
            Cue::Closing,
            Cue::Heart(0),
            Cue::Heart(1),
            Cue::Heart(2),
            Cue::Heart(3),
            Cue::Heart(4),
        ];
        assert_eq!(fired, expected);
    }

    #[test]
    fn hero_grows_from_a_tenth() {
        let timeline = CelebrationTimeline;
        assert_eq!(timeline.hero_scale(0.0), HERO_START_SCALE);
        assert!((timeline.hero_scale(4.0) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn finishes_after_last_heart() {
        let timeline = CelebrationTimeline;
        assert!(!timeline.is_finished(2.5));
        assert!(timeline.is_finished(2.95));
        assert!(timeline.is_finished(100.0));
    }
}
