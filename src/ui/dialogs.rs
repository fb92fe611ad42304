use gettextrs::gettext;
use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;

pub fn show_about_dialog(app: &adw::Application) -> adw::AboutDialog {
    let dialog = adw::AboutDialog::builder()
        .application_name("Valentine")
        .application_icon(super::app::APP_ID)
        .developer_name("Valentine contributors")
        .version(env!("CARGO_PKG_VERSION"))
        .comments(gettext("A question with only one right answer."))
        .build();
    dialog.add_legal_section(
        "Valentine",
        Some("© 2026 Valentine contributors"),
        gtk::License::MitX11,
        None,
    );
    dialog.present(app.active_window().as_ref());
    dialog
}
