use gtk4::gdk;
use gtk4::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackSignal {
    Success,
    Impact,
}

impl FeedbackSignal {
    pub fn name(self) -> &'static str {
        match self {
            FeedbackSignal::Success => "success",
            FeedbackSignal::Impact => "impact",
        }
    }
}

pub trait Feedback {
    fn pulse(&self, signal: FeedbackSignal);
}

/// Desktop stand-in for tactile feedback: logs every pulse and optionally
/// rings the display bell on success.
pub struct DisplayFeedback {
    success_beep: bool,
}

impl DisplayFeedback {
    pub fn new(success_beep: bool) -> Self {
        DisplayFeedback { success_beep }
    }
}

impl Feedback for DisplayFeedback {
    fn pulse(&self, signal: FeedbackSignal) {
        log::debug!("feedback pulse: {}", signal.name());
        if signal == FeedbackSignal::Success && self.success_beep {
            if let Some(display) = gdk::Display::default() {
                display.beep();
            }
        }
    }
}
