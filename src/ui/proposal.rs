use rand::Rng;

use super::evasion::{self, Bounds, ButtonEvasionState, EvasionTrick};
use super::feedback::FeedbackSignal;

pub const MESSAGE_FADE_OUT_MS: u64 = 150;
pub const BUTTON_FADE_OUT_MS: u64 = 200;
pub const BUTTON_RESTORE_DELAY_MS: u64 = 350;
pub const BUTTON_FADE_IN_MS: u64 = 250;
pub const LOWERCASE_THRESHOLD: u32 = 15;
pub const ACCEPT_SCALE_CAP: f64 = 2.5;
pub const REJECT_FONT_FLOOR: f64 = 10.0;
/// Height of the strip the reject button dodges around in.
pub const REJECT_CONTAINER_HEIGHT: f64 = 200.0;

pub fn accept_scale(count: u32) -> f64 {
    (1.0 + 0.12 * count as f64).min(ACCEPT_SCALE_CAP)
}

pub fn accept_font_size(count: u32) -> f64 {
    20.0 + count as f64
}

pub fn accept_padding(count: u32) -> f64 {
    40.0 + 3.0 * count as f64
}

pub fn accept_glow_radius(count: u32) -> f64 {
    5.0 + 2.0 * count as f64
}

pub fn reject_font_size(count: u32) -> f64 {
    (20.0 - 0.5 * count as f64).max(REJECT_FONT_FLOOR)
}

pub fn reject_label(count: u32) -> &'static str {
    if count >= LOWERCASE_THRESHOLD { "no" } else { "No" }
}

/// `min(count - 1, len - 1)`; `None` before the first rejection or with no messages.
pub fn message_index(count: u32, len: usize) -> Option<usize> {
    if count == 0 || len == 0 {
        return None;
    }
    Some((count as usize - 1).min(len - 1))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Asking,
    Celebrating,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MessageSwap {
    epoch: u64,
    index: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpacityRestore {
    epoch: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RejectOutcome {
    pub count: u32,
    pub trick: EvasionTrick,
    pub message_swap: MessageSwap,
    pub opacity_restore: Option<OpacityRestore>,
    pub feedback: FeedbackSignal,
}

/// Rejection counter, message and evasion state of the proposal screen.
/// Delayed effects are returned as tokens; the view schedules them and hands
/// them back, and a token superseded by a later rejection is ignored.
#[derive(Clone, Debug)]
pub struct ProposalController {
    phase: Phase,
    rejection_count: u32,
    evasion: ButtonEvasionState,
    messages: Vec<String>,
    message_text: Option<String>,
    message_opacity: f64,
    message_epoch: u64,
    opacity_epoch: u64,
}

impl ProposalController {
    pub fn new(messages: Vec<String>) -> Self {
        ProposalController {
            phase: Phase::Asking,
            rejection_count: 0,
            evasion: ButtonEvasionState::default(),
            messages,
            message_text: None,
            message_opacity: 0.0,
            message_epoch: 0,
            opacity_epoch: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn rejection_count(&self) -> u32 {
        self.rejection_count
    }

    pub fn evasion(&self) -> &ButtonEvasionState {
        &self.evasion
    }

    pub fn message_text(&self) -> Option<&str> {
        self.message_text.as_deref()
    }

    pub fn message_opacity(&self) -> f64 {
        self.message_opacity
    }

    pub fn on_reject<R: Rng + ?Sized>(&mut self, bounds: Bounds, rng: &mut R) -> Option<RejectOutcome> {
        if self.phase != Phase::Asking {
            return None;
        }

        self.rejection_count = self.rejection_count.saturating_add(1);
        let count = self.rejection_count;

        self.message_opacity = 0.0;
        self.message_epoch = self.message_epoch.wrapping_add(1);
        let message_swap = MessageSwap {
            epoch: self.message_epoch,
            index: message_index(count, self.messages.len()),
        };

        let trick = EvasionTrick::pick(rng);
        let mut next = evasion::apply_trick(&self.evasion, trick, bounds, count, rng);

        // Any rejection invalidates an outstanding restore. Tricks that keep the
        // button visible bring it back immediately so a cancelled restore can't
        // strand it at zero opacity.
        self.opacity_epoch = self.opacity_epoch.wrapping_add(1);
        let opacity_restore = if trick.hides_button() {
            Some(OpacityRestore {
                epoch: self.opacity_epoch,
            })
        } else {
            next.opacity = 1.0;
            None
        };
        self.evasion = next;

        Some(RejectOutcome {
            count,
            trick,
            message_swap,
            opacity_restore,
            feedback: FeedbackSignal::Impact,
        })
    }

    /// Swaps in the message selected at rejection time and fades it back in.
    pub fn complete_message_swap(&mut self, swap: MessageSwap) -> bool {
        if swap.epoch != self.message_epoch || self.phase != Phase::Asking {
            return false;
        }
        self.message_text = swap.index.and_then(|idx| self.messages.get(idx).cloned());
        self.message_opacity = 1.0;
        true
    }

    pub fn restore_opacity(&mut self, restore: OpacityRestore) -> bool {
        if restore.epoch != self.opacity_epoch || self.phase != Phase::Asking {
            return false;
        }
        self.evasion.opacity = 1.0;
        true
    }

    /// One-way switch to the celebration. Returns `false` once already there.
    pub fn on_accept(&mut self) -> bool {
        if self.phase == Phase::Celebrating {
            return false;
        }
        self.phase = Phase::Celebrating;
        true
    }

    pub fn accept_scale(&self) -> f64 {
        accept_scale(self.rejection_count)
    }

    pub fn accept_font_size(&self) -> f64 {
        accept_font_size(self.rejection_count)
    }

    pub fn accept_padding(&self) -> f64 {
        accept_padding(self.rejection_count)
    }

    pub fn accept_glow_radius(&self) -> f64 {
        accept_glow_radius(self.rejection_count)
    }

    pub fn reject_font_size(&self) -> f64 {
        reject_font_size(self.rejection_count)
    }

    pub fn reject_label(&self) -> &'static str {
        reject_label(self.rejection_count)
    }
}
