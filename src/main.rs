mod config;
mod ui;

use gettextrs::{LocaleCategory, bindtextdomain, setlocale, textdomain};

const GETTEXT_PACKAGE: &str = "valentine";
const LOCALEDIR: &str = "/usr/share/locale";

fn init_i18n() {
    setlocale(LocaleCategory::LcAll, "");
    if let Err(err) = bindtextdomain(GETTEXT_PACKAGE, LOCALEDIR) {
        log::warn!("could not bind text domain: {err}");
    }
    if let Err(err) = textdomain(GETTEXT_PACKAGE) {
        log::warn!("could not switch text domain: {err}");
    }
}

fn main() -> gtk4::glib::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("starting valentine {}", env!("CARGO_PKG_VERSION"));

    init_i18n();
    ui::app::run()
}
