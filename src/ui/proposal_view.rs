use std::cell::RefCell;
use std::rc::Rc;

use gettextrs::gettext;
use gtk4 as gtk;
use gtk4::prelude::*;

use super::drift::PROPOSAL_DRIFT_COUNT;
use super::drift_view::build_drift_background;
use super::evasion::Bounds;
use super::proposal::{
    BUTTON_FADE_IN_MS,
    BUTTON_FADE_OUT_MS,
    BUTTON_RESTORE_DELAY_MS,
    MESSAGE_FADE_OUT_MS,
    MessageSwap,
    OpacityRestore,
    ProposalController,
    REJECT_CONTAINER_HEIGHT,
};
use super::scene::show_celebration;
use super::state::{AppState, ProposalScreen};
use super::theme;
use super::timers::ScreenTimers;

/// Styles that follow the rejection count. Loaded into the window's dynamic
/// provider after every rejection; the static sheet supplies the transitions
/// for everything except the reject button's opacity.
pub fn escalation_css(controller: &ProposalController) -> String {
    let evasion = controller.evasion();
    let (opacity_ms, opacity_curve) = if evasion.opacity < 1.0 {
        (BUTTON_FADE_OUT_MS, "ease-out")
    } else {
        (BUTTON_FADE_IN_MS, "ease-in")
    };
    format!(
        ".accept-button {{ \
            font-size: {accept_font:.1}px; \
            padding: 16px {accept_padding:.1}px; \
            transform: scale({accept_scale:.3}); \
            box-shadow: 0 0 {glow:.1}px alpha(@deep_rose, 0.4); }} \
         .reject-button {{ \
            font-size: {reject_font:.1}px; \
            transform: translate({x:.1}px, {y:.1}px) scale({scale:.3}) rotate({rotation:.1}deg); \
            opacity: {opacity:.2}; \
            transition: transform 500ms cubic-bezier(0.34, 1.4, 0.64, 1), \
                        opacity {opacity_ms}ms {opacity_curve}, \
                        font-size 200ms ease-out; }}",
        accept_font = controller.accept_font_size(),
        accept_padding = controller.accept_padding(),
        accept_scale = controller.accept_scale(),
        glow = controller.accept_glow_radius(),
        reject_font = controller.reject_font_size(),
        x = evasion.offset_x,
        y = evasion.offset_y,
        scale = evasion.scale,
        rotation = evasion.rotation_degrees,
        opacity = evasion.opacity,
    )
}

fn sync_proposal_widgets(st: &AppState) {
    let Some(screen) = &st.proposal else {
        return;
    };
    let controller = &screen.controller;

    screen.reject_label.set_text(&gettext(controller.reject_label()));

    if controller.rejection_count() > 0 {
        screen.message_label.set_visible(true);
    }
    if let Some(text) = controller.message_text() {
        screen.message_label.set_text(text);
    }
    if controller.message_opacity() < 1.0 {
        screen.message_label.add_css_class("message-hidden");
    } else {
        screen.message_label.remove_css_class("message-hidden");
    }

    if let Some(provider) = &st.dynamic_css_provider {
        provider.load_from_data(&escalation_css(controller));
    }
}

fn complete_message_swap(state: &Rc<RefCell<AppState>>, swap: MessageSwap) {
    let mut st = state.borrow_mut();
    let swapped = st
        .proposal
        .as_mut()
        .is_some_and(|screen| screen.controller.complete_message_swap(swap));
    if swapped {
        sync_proposal_widgets(&st);
    }
}

fn restore_reject_opacity(state: &Rc<RefCell<AppState>>, restore: OpacityRestore) {
    let mut st = state.borrow_mut();
    let restored = st
        .proposal
        .as_mut()
        .is_some_and(|screen| screen.controller.restore_opacity(restore));
    if restored {
        sync_proposal_widgets(&st);
    }
}

pub fn handle_reject(state: &Rc<RefCell<AppState>>) {
    let mut st = state.borrow_mut();
    let (outcome, timers) = {
        let Some(screen) = st.proposal.as_mut() else {
            return;
        };
        let width = screen.reject_strip.width().max(screen.page.width()) as f64;
        let bounds = Bounds::new(width, REJECT_CONTAINER_HEIGHT);
        let mut rng = rand::rng();
        let Some(outcome) = screen.controller.on_reject(bounds, &mut rng) else {
            return;
        };
        (outcome, screen.timers.clone())
    };
    log::info!(
        "rejection #{} dodged with trick '{}'",
        outcome.count,
        outcome.trick.name()
    );

    let swap = outcome.message_swap;
    timers.schedule_once(MESSAGE_FADE_OUT_MS, {
        let state_weak = Rc::downgrade(state);
        move || {
            if let Some(state) = state_weak.upgrade() {
                complete_message_swap(&state, swap);
            }
        }
    });

    if let Some(restore) = outcome.opacity_restore {
        timers.schedule_once(BUTTON_RESTORE_DELAY_MS, {
            let state_weak = Rc::downgrade(state);
            move || {
                if let Some(state) = state_weak.upgrade() {
                    restore_reject_opacity(&state, restore);
                }
            }
        });
    }

    sync_proposal_widgets(&st);
    st.pulse(outcome.feedback);
}

pub fn handle_accept(state: &Rc<RefCell<AppState>>) {
    let accepted = {
        let mut st = state.borrow_mut();
        let Some(screen) = st.proposal.as_mut() else {
            return;
        };
        let accepted = screen.controller.on_accept();
        if accepted {
            log::info!(
                "accepted after {} rejections",
                screen.controller.rejection_count()
            );
            screen.accept_button.set_sensitive(false);
            screen.reject_button.set_sensitive(false);
        }
        accepted
    };
    if !accepted {
        return;
    }
    state.borrow().pulse(super::feedback::FeedbackSignal::Success);
    show_celebration(state);
}

fn text_label(text: &str, css_class: &str) -> gtk::Label {
    let label = gtk::Label::builder()
        .label(text)
        .wrap(true)
        .justify(gtk::Justification::Center)
        .halign(gtk::Align::Center)
        .css_classes(vec![css_class])
        .build();
    label.set_margin_start(30);
    label.set_margin_end(30);
    label
}

pub fn build_proposal_view(state: &Rc<RefCell<AppState>>) -> gtk::Widget {
    let timers = ScreenTimers::new();
    let (question, messages) = {
        let st = state.borrow();
        (st.config.question(), st.config.rejection_messages.clone())
    };

    let overlay = gtk::Overlay::new();
    overlay.set_hexpand(true);
    overlay.set_vexpand(true);
    overlay.add_css_class("proposal-root");
    overlay.set_child(Some(&build_drift_background(
        theme::PROPOSAL_BACKGROUND,
        PROPOSAL_DRIFT_COUNT,
        &timers,
    )));

    let content = gtk::Box::new(gtk::Orientation::Vertical, 20);
    content.set_hexpand(true);
    content.set_vexpand(true);
    content.set_valign(gtk::Align::Center);

    let emoji = text_label("💗💕💜", "proposal-emoji");
    let question_label = text_label(&question, "proposal-question");

    let message_label = text_label("", "proposal-message");
    message_label.add_css_class("message-hidden");
    message_label.set_visible(false);

    let bear = text_label("🧸", "proposal-bear");
    bear.set_margin_top(8);
    bear.set_margin_bottom(8);

    let accept_label = gtk::Label::new(Some(&gettext("Yes! 💕")));
    let accept_button = gtk::Button::builder()
        .child(&accept_label)
        .halign(gtk::Align::Center)
        .css_classes(vec!["accept-button"])
        .build();
    accept_button.connect_clicked({
        let state = state.clone();
        move |_| handle_accept(&state)
    });

    let accept_pulse = gtk::Box::new(gtk::Orientation::Horizontal, 0);
    accept_pulse.set_halign(gtk::Align::Center);
    accept_pulse.set_margin_bottom(8);
    accept_pulse.add_css_class("accept-pulse");
    accept_pulse.append(&accept_button);

    let reject_label = gtk::Label::new(Some(&gettext("No")));
    let reject_button = gtk::Button::builder()
        .child(&reject_label)
        .halign(gtk::Align::Center)
        .valign(gtk::Align::Center)
        .hexpand(true)
        .vexpand(true)
        .css_classes(vec!["reject-button"])
        .build();
    reject_button.connect_clicked({
        let state = state.clone();
        move |_| handle_reject(&state)
    });

    let reject_strip = gtk::Box::new(gtk::Orientation::Vertical, 0);
    reject_strip.set_hexpand(true);
    reject_strip.set_height_request(REJECT_CONTAINER_HEIGHT as i32);
    reject_strip.set_overflow(gtk::Overflow::Hidden);
    reject_strip.add_css_class("reject-strip");
    reject_strip.append(&reject_button);

    content.append(&emoji);
    content.append(&question_label);
    content.append(&message_label);
    content.append(&bear);
    content.append(&accept_pulse);
    content.append(&reject_strip);
    overlay.add_overlay(&content);

    let page = overlay.upcast::<gtk::Widget>();
    {
        let mut st = state.borrow_mut();
        st.proposal = Some(ProposalScreen {
            controller: ProposalController::new(messages),
            timers,
            page: page.clone(),
            message_label,
            accept_button,
            reject_button,
            reject_label,
            reject_strip,
        });
        sync_proposal_widgets(&st);
    }

    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn initial_css_is_at_rest() {
        let controller = ProposalController::new(Vec::new());
        let css = escalation_css(&controller);
        assert!(css.contains("font-size: 20.0px"));
        assert!(css.contains("padding: 16px 40.0px"));
        assert!(css.contains("transform: scale(1.000)"));
        assert!(css.contains("translate(0.0px, 0.0px) scale(1.000) rotate(0.0deg)"));
        assert!(css.contains("opacity: 1.00"));
        assert!(css.contains("opacity 250ms ease-in"));
    }

    #[test]
    fn css_tracks_escalation() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut controller = ProposalController::new(Vec::new());
        for _ in 0..20 {
            controller.on_reject(Bounds::new(390.0, REJECT_CONTAINER_HEIGHT), &mut rng);
        }
        let css = escalation_css(&controller);
        assert!(css.contains("transform: scale(2.500)"));
        assert!(css.contains("font-size: 40.0px"));
        assert!(css.contains("font-size: 10.0px"));
        assert!(css.contains("padding: 16px 100.0px"));
    }
}
