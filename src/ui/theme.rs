//! Named palette shared by the CSS (`data/style.vars.css`) and the cairo
//! drawing code.

use gtk4::gdk;

// #ffd6e0
pub const SOFT_BLUSH: gdk::RGBA = gdk::RGBA::new(1.0, 0.839, 0.878, 1.0);
// #f78fb3
pub const ROSE_PINK: gdk::RGBA = gdk::RGBA::new(0.969, 0.561, 0.702, 1.0);
// #d6336c
pub const DEEP_ROSE: gdk::RGBA = gdk::RGBA::new(0.839, 0.2, 0.424, 1.0);
// #9b59b6
pub const ROMANTIC_PURPLE: gdk::RGBA = gdk::RGBA::new(0.608, 0.349, 0.714, 1.0);
// #e0d4f7
pub const SOFT_LAVENDER: gdk::RGBA = gdk::RGBA::new(0.878, 0.831, 0.969, 1.0);

#[derive(Clone, Debug)]
pub struct Gradient {
    pub stops: [gdk::RGBA; 3],
}

pub const PROPOSAL_BACKGROUND: Gradient = Gradient {
    stops: [
        gdk::RGBA::new(1.0, 0.839, 0.878, 0.6),
        gdk::RGBA::new(0.878, 0.831, 0.969, 0.5),
        gdk::RGBA::new(0.969, 0.561, 0.702, 0.3),
    ],
};

pub const CELEBRATION_BACKGROUND: Gradient = Gradient {
    stops: [
        gdk::RGBA::new(0.969, 0.561, 0.702, 0.4),
        gdk::RGBA::new(0.608, 0.349, 0.714, 0.4),
        gdk::RGBA::new(1.0, 0.839, 0.878, 0.5),
    ],
};

pub static HEART_COLORS: [gdk::RGBA; 4] = [ROSE_PINK, DEEP_ROSE, ROMANTIC_PURPLE, SOFT_LAVENDER];

pub fn heart_color(index: usize) -> &'static gdk::RGBA {
    &HEART_COLORS[index % HEART_COLORS.len()]
}

pub fn with_alpha(color: &gdk::RGBA, alpha: f64) -> gdk::RGBA {
    gdk::RGBA::new(
        color.red(),
        color.green(),
        color.blue(),
        alpha.clamp(0.0, 1.0) as f32,
    )
}

pub fn set_source(cr: &cairo::Context, color: &gdk::RGBA) {
    cr.set_source_rgba(
        color.red() as f64,
        color.green() as f64,
        color.blue() as f64,
        color.alpha() as f64,
    );
}

/// Fills `width` × `height` with `gradient`, top-left to bottom-right.
pub fn paint_gradient(cr: &cairo::Context, gradient: &Gradient, width: f64, height: f64) {
    let pattern = cairo::LinearGradient::new(0.0, 0.0, width, height);
    let last = (gradient.stops.len() - 1) as f64;
    for (idx, stop) in gradient.stops.iter().enumerate() {
        pattern.add_color_stop_rgba(
            idx as f64 / last,
            stop.red() as f64,
            stop.green() as f64,
            stop.blue() as f64,
            stop.alpha() as f64,
        );
    }
    cr.rectangle(0.0, 0.0, width, height);
    if cr.set_source(&pattern).is_ok() {
        let _ = cr.fill();
    }
}
