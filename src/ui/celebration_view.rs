use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gettextrs::gettext;
use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;

use super::burst::{self, BURST_GLYPH, BurstParticle};
use super::celebration::{CelebrationTimeline, Cue, HEART_ROW, HERO_GLYPH, HERO_START_SCALE};
use super::drift::CELEBRATION_DRIFT_COUNT;
use super::drift_view::{build_drift_background, clock_seconds, draw_glyph};
use super::feedback::FeedbackSignal;
use super::state::{AppState, CelebrationScreen};
use super::theme;
use super::timers::ScreenTimers;

const HERO_GLYPH_SIZE: f64 = 100.0;
const HERO_AREA_SIZE: i32 = 150;

/// Entry time shared by the frame callback and the draw functions. Unset
/// until the first frame of the screen is produced.
#[derive(Clone, Default)]
struct Clock {
    started_at: Rc<Cell<Option<f64>>>,
}

impl Clock {
    fn elapsed(&self, widget: &impl IsA<gtk::Widget>) -> Option<f64> {
        self.started_at
            .get()
            .map(|start| (clock_seconds(widget) - start).max(0.0))
    }
}

struct RevealTargets {
    headline: gtk::Label,
    message: gtk::Label,
    closing: gtk::Box,
    hearts: Vec<gtk::Label>,
}

impl RevealTargets {
    fn widget_for(&self, cue: Cue) -> Option<gtk::Widget> {
        match cue {
            Cue::Headline => Some(self.headline.clone().upcast()),
            Cue::Message => Some(self.message.clone().upcast()),
            Cue::Closing => Some(self.closing.clone().upcast()),
            Cue::Heart(index) => self.hearts.get(index).map(|h| h.clone().upcast()),
            Cue::Hero | Cue::Burst | Cue::BurstExit => None,
        }
    }
}

fn reveal(widget: &gtk::Widget) {
    widget.remove_css_class("pending");
    widget.add_css_class("revealed");
}

fn pending_label(text: &str, classes: &[&str]) -> gtk::Label {
    let label = gtk::Label::builder()
        .label(text)
        .wrap(true)
        .justify(gtk::Justification::Center)
        .halign(gtk::Align::Center)
        .build();
    label.add_css_class("reveal");
    label.add_css_class("pending");
    for class in classes {
        label.add_css_class(class);
    }
    label
}

fn build_burst_layer(clock: &Clock, particles: Rc<Vec<BurstParticle>>) -> gtk::DrawingArea {
    let area = gtk::DrawingArea::builder()
        .hexpand(true)
        .vexpand(true)
        .can_target(false)
        .build();
    let clock = clock.clone();
    area.set_draw_func(move |area, cr, width, height| {
        let Some(elapsed) = clock.elapsed(area) else {
            return;
        };
        if elapsed >= burst::burst_finished_at() {
            return;
        }
        let (width, height) = (width as f64, height as f64);
        cr.set_antialias(gtk::cairo::Antialias::Best);
        for particle in particles.iter() {
            let sample = particle.sample(elapsed, width, height);
            if !sample.is_visible() || cr.save().is_err() {
                continue;
            }
            cr.translate(sample.x, sample.y);
            cr.rotate(sample.rotation_degrees.to_radians());
            cr.scale(sample.scale, sample.scale);
            cr.push_group();
            theme::set_source(cr, &theme::DEEP_ROSE);
            draw_glyph(cr, BURST_GLYPH, particle.glyph_size, 0.0, 0.0);
            if cr.pop_group_to_source().is_ok() {
                let _ = cr.paint_with_alpha(sample.opacity);
            }
            let _ = cr.restore();
        }
    });
    area
}

fn build_hero(clock: &Clock) -> gtk::DrawingArea {
    let area = gtk::DrawingArea::builder()
        .content_width(HERO_AREA_SIZE)
        .content_height(HERO_AREA_SIZE)
        .halign(gtk::Align::Center)
        .can_target(false)
        .build();
    area.add_css_class("celebration-hero");
    let clock = clock.clone();
    area.set_draw_func(move |area, cr, width, height| {
        let timeline = CelebrationTimeline;
        let scale = clock
            .elapsed(area)
            .map(|elapsed| timeline.hero_scale(elapsed))
            .unwrap_or(HERO_START_SCALE);
        let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
        if cr.save().is_err() {
            return;
        }
        cr.translate(cx, cy);
        cr.scale(scale, scale);
        draw_glyph(cr, HERO_GLYPH, HERO_GLYPH_SIZE, 0.0, 0.0);
        let _ = cr.restore();
    });
    area
}

/// Drives the choreography from the frame clock: fires each cue once, keeps
/// the hero and burst layers redrawing, and stops when nothing moves anymore.
fn start_timeline(
    state: &Rc<RefCell<AppState>>,
    timers: &ScreenTimers,
    clock: Clock,
    hero: &gtk::DrawingArea,
    burst_layer: gtk::DrawingArea,
    targets: RevealTargets,
) {
    let timeline = CelebrationTimeline;
    let last_elapsed = Cell::new(f64::NEG_INFINITY);
    let state_weak = Rc::downgrade(state);

    timers.add_tick(hero, move |widget, frame_clock| {
        let now = frame_clock.frame_time() as f64 / 1_000_000.0;
        // Entry is taken as the first frame the screen draws, at most one
        // frame after it was shown.
        let start = match clock.started_at.get() {
            Some(start) => start,
            None => {
                clock.started_at.set(Some(now));
                now
            }
        };
        let elapsed = (now - start).max(0.0);

        for cue in timeline.fired_between(last_elapsed.get(), elapsed) {
            log::debug!("celebration cue '{}' at {:.3}s", cue.css_name(), elapsed);
            if cue == Cue::Hero {
                if let Some(state) = state_weak.upgrade() {
                    state.borrow().pulse(FeedbackSignal::Success);
                }
            }
            if let Some(target) = targets.widget_for(cue) {
                reveal(&target);
            }
        }
        last_elapsed.set(elapsed);

        widget.queue_draw();
        burst_layer.queue_draw();

        if timeline.is_finished(elapsed) {
            log::info!("celebration finished");
            glib::ControlFlow::Break
        } else {
            glib::ControlFlow::Continue
        }
    });
}

pub fn build_celebration_view(state: &Rc<RefCell<AppState>>) -> gtk::Widget {
    let timers = ScreenTimers::new();
    let clock = Clock::default();
    let closing_lines = state.borrow().config.closing_lines.clone();

    let mut rng = rand::rng();
    let particles = Rc::new(burst::generate_burst(&mut rng));

    let overlay = gtk::Overlay::new();
    overlay.set_hexpand(true);
    overlay.set_vexpand(true);
    overlay.add_css_class("celebration-root");
    overlay.set_child(Some(&build_drift_background(
        theme::CELEBRATION_BACKGROUND,
        CELEBRATION_DRIFT_COUNT,
        &timers,
    )));

    let burst_layer = build_burst_layer(&clock, particles);
    overlay.add_overlay(&burst_layer);

    let content = gtk::Box::new(gtk::Orientation::Vertical, 24);
    content.set_hexpand(true);
    content.set_vexpand(true);
    content.set_margin_start(12);
    content.set_margin_end(12);
    content.set_can_target(false);

    let top_spacer = gtk::Box::new(gtk::Orientation::Vertical, 0);
    top_spacer.set_vexpand(true);
    let bottom_spacer = gtk::Box::new(gtk::Orientation::Vertical, 0);
    bottom_spacer.set_vexpand(true);
    bottom_spacer.set_height_request(80);

    let hero = build_hero(&clock);
    let headline = pending_label(&gettext("YAAAY! 🎉"), &["celebration-headline"]);
    let message = pending_label(
        &gettext("heheh I knew you'd say yes 🥰"),
        &["celebration-message"],
    );

    let closing = gtk::Box::new(gtk::Orientation::Vertical, 8);
    closing.add_css_class("reveal");
    closing.add_css_class("pending");
    closing.add_css_class("celebration-closing");
    for (idx, line) in closing_lines.iter().enumerate() {
        let label = gtk::Label::builder()
            .label(line.as_str())
            .wrap(true)
            .justify(gtk::Justification::Center)
            .halign(gtk::Align::Center)
            .build();
        label.add_css_class(if idx == 0 { "closing-primary" } else { "closing-secondary" });
        closing.append(&label);
    }

    let heart_row = gtk::Box::new(gtk::Orientation::Horizontal, 16);
    heart_row.set_halign(gtk::Align::Center);
    heart_row.set_height_request(50);
    let hearts: Vec<gtk::Label> = HEART_ROW
        .iter()
        .map(|glyph| pending_label(glyph, &["celebration-heart"]))
        .collect();
    for heart in &hearts {
        heart_row.append(heart);
    }

    content.append(&top_spacer);
    content.append(&hero);
    content.append(&headline);
    content.append(&message);
    content.append(&closing);
    content.append(&heart_row);
    content.append(&bottom_spacer);
    overlay.add_overlay(&content);

    let targets = RevealTargets {
        headline,
        message,
        closing,
        hearts,
    };
    start_timeline(state, &timers, clock, &hero, burst_layer, targets);

    state.borrow_mut().celebration = Some(CelebrationScreen { timers });
    overlay.upcast()
}
