use gtk4 as gtk;
use libadwaita as adw;

use crate::config::AppConfig;

use super::feedback::{DisplayFeedback, Feedback, FeedbackSignal};
use super::proposal::ProposalController;
use super::timers::ScreenTimers;

/// Widgets and logic of the proposal screen. Dropped as a whole when the
/// celebration takes over.
pub struct ProposalScreen {
    pub controller: ProposalController,
    pub timers: ScreenTimers,
    pub page: gtk::Widget,
    pub message_label: gtk::Label,
    pub accept_button: gtk::Button,
    pub reject_button: gtk::Button,
    pub reject_label: gtk::Label,
    pub reject_strip: gtk::Box,
}

pub struct CelebrationScreen {
    pub timers: ScreenTimers,
}

pub struct AppState {
    pub config: AppConfig,
    pub feedback: Box<dyn Feedback>,
    pub view_stack: Option<gtk::Stack>,
    pub title: Option<adw::WindowTitle>,
    pub dynamic_css_provider: Option<gtk::CssProvider>,
    pub proposal: Option<ProposalScreen>,
    pub celebration: Option<CelebrationScreen>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let feedback = Box::new(DisplayFeedback::new(config.success_beep));
        AppState {
            config,
            feedback,
            view_stack: None,
            title: None,
            dynamic_css_provider: None,
            proposal: None,
            celebration: None,
        }
    }

    pub fn pulse(&self, signal: FeedbackSignal) {
        self.feedback.pulse(signal);
    }

    /// Cancels everything the screens still have scheduled.
    pub fn shutdown(&mut self) {
        if let Some(proposal) = &self.proposal {
            proposal.timers.cancel_all();
        }
        if let Some(celebration) = &self.celebration {
            celebration.timers.cancel_all();
        }
    }
}
