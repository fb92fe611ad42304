use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gettextrs::gettext;
use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;

use super::celebration_view::build_celebration_view;
use super::proposal_view::build_proposal_view;
use super::state::AppState;

pub const PROPOSAL_PAGE: &str = "proposal";
pub const CELEBRATION_PAGE: &str = "celebration";
const TRANSITION_MS: u32 = 400;

pub(super) fn build_view_stack(state: &Rc<RefCell<AppState>>) -> gtk::Stack {
    let view_stack = gtk::Stack::new();
    view_stack.set_hexpand(true);
    view_stack.set_vexpand(true);
    view_stack.set_transition_type(gtk::StackTransitionType::Crossfade);
    view_stack.set_transition_duration(TRANSITION_MS);

    let proposal_page = build_proposal_view(state);
    view_stack.add_named(&proposal_page, Some(PROPOSAL_PAGE));
    view_stack.set_visible_child_name(PROPOSAL_PAGE);

    state.borrow_mut().view_stack = Some(view_stack.clone());
    view_stack
}

/// Swaps the proposal for the celebration. The proposal screen is detached
/// from the state right away and its page removed once the crossfade ends.
pub(super) fn show_celebration(state: &Rc<RefCell<AppState>>) {
    let Some(proposal) = state.borrow_mut().proposal.take() else {
        return;
    };
    log::info!("switching to celebration");

    let page = build_celebration_view(state);

    let st = state.borrow();
    if let Some(title) = &st.title {
        title.set_subtitle(&gettext("Yes!"));
    }
    let Some(stack) = &st.view_stack else {
        proposal.timers.cancel_all();
        return;
    };
    stack.add_named(&page, Some(CELEBRATION_PAGE));
    stack.set_visible_child_name(CELEBRATION_PAGE);

    let stack_weak = stack.downgrade();
    glib::timeout_add_local_once(
        Duration::from_millis(stack.transition_duration() as u64 + 50),
        move || {
            proposal.timers.cancel_all();
            if let Some(stack) = stack_weak.upgrade() {
                stack.remove(&proposal.page);
            }
        },
    );
}
