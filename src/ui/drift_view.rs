use std::rc::Rc;

use gtk4 as gtk;
use gtk4::glib;
use gtk4::pango;
use gtk4::prelude::*;

use super::drift::{self, DriftParticle};
use super::theme::{self, Gradient};
use super::timers::ScreenTimers;

pub const EMOJI_FONT_FAMILY: &str = "Noto Color Emoji, Apple Color Emoji, Segoe UI Emoji, sans";

/// Seconds on the monotonic clock, taken from the widget's frame clock when
/// it has one.
pub fn clock_seconds(widget: &impl IsA<gtk::Widget>) -> f64 {
    let micros = widget
        .frame_clock()
        .map(|clock| clock.frame_time())
        .unwrap_or_else(glib::monotonic_time);
    micros as f64 / 1_000_000.0
}

/// Draws `glyph` centred on `(x, y)`.
pub fn draw_glyph(cr: &gtk::cairo::Context, glyph: &str, size: f64, x: f64, y: f64) {
    let layout = pangocairo::functions::create_layout(cr);
    let mut font_desc = pango::FontDescription::new();
    font_desc.set_family(EMOJI_FONT_FAMILY);
    font_desc.set_absolute_size(size * pango::SCALE as f64);
    layout.set_font_description(Some(&font_desc));
    layout.set_text(glyph);

    let (text_width, text_height) = layout.pixel_size();
    cr.move_to(x - text_width as f64 / 2.0, y - text_height as f64 / 2.0);
    pangocairo::functions::show_layout(cr, &layout);
}

/// Gradient backdrop with hearts drifting upward. Positions come straight
/// from the clock each frame; the batch itself never changes.
pub fn build_drift_background(
    gradient: Gradient,
    count: usize,
    timers: &ScreenTimers,
) -> gtk::DrawingArea {
    let mut rng = rand::rng();
    let particles: Rc<Vec<DriftParticle>> = Rc::new(drift::generate_field(count, &mut rng));

    let area = gtk::DrawingArea::builder()
        .hexpand(true)
        .vexpand(true)
        .can_target(false)
        .build();
    area.add_css_class("drift-field");

    area.set_draw_func(move |area, cr, width, height| {
        let (width, height) = (width as f64, height as f64);
        cr.set_antialias(gtk::cairo::Antialias::Best);
        theme::paint_gradient(cr, &gradient, width, height);

        let now = clock_seconds(area);
        for particle in particles.iter() {
            let sample = particle.sample(now, width, height);
            if cr.save().is_err() {
                continue;
            }
            theme::set_source(
                cr,
                &theme::with_alpha(theme::heart_color(particle.color_index), sample.opacity * 0.25),
            );
            cr.arc(sample.x, sample.y, particle.size * 0.6, 0.0, std::f64::consts::TAU);
            let _ = cr.fill();

            cr.push_group();
            draw_glyph(cr, particle.glyph(), particle.size, sample.x, sample.y);
            if cr.pop_group_to_source().is_ok() {
                let _ = cr.paint_with_alpha(sample.opacity);
            }
            let _ = cr.restore();
        }
    });

    timers.add_tick(&area, |widget, _| {
        widget.queue_draw();
        glib::ControlFlow::Continue
    });

    area
}
