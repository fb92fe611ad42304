use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use gettextrs::gettext;
use gio::SimpleAction;
use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use adw::prelude::*;

use crate::config::AppConfig;

use super::dialogs::show_about_dialog;
use super::scene::build_view_stack;
use super::state::AppState;

pub const APP_ID: &str = "io.github.valentine.Proposal";

pub fn run() -> glib::ExitCode {
    glib::set_prgname(Some(APP_ID));
    let app = adw::Application::builder().application_id(APP_ID).build();

    app.connect_activate(move |app| {
        if let Some(window) = app.active_window() {
            window.present();
            return;
        }
        load_css();

        let state = Rc::new(RefCell::new(AppState::new(AppConfig::load())));

        let about_action = SimpleAction::new("about", None);
        about_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_about_dialog(&app);
            }
        });
        app.add_action(&about_action);

        let quit_action = SimpleAction::new("quit", None);
        quit_action.connect_activate({
            let app = app.clone();
            move |_, _| app.quit()
        });
        app.add_action(&quit_action);
        app.set_accels_for_action("app.quit", &["<Control>q"]);

        let dynamic_css_provider = gtk::CssProvider::new();
        if let Some(display) = gtk::gdk::Display::default() {
            gtk::style_context_add_provider_for_display(
                &display,
                &dynamic_css_provider,
                gtk::STYLE_PROVIDER_PRIORITY_APPLICATION + 1,
            );
        }
        state.borrow_mut().dynamic_css_provider = Some(dynamic_css_provider);

        let title = adw::WindowTitle::new("Valentine", &gettext("A little question"));

        let menu_model = gio::Menu::new();
        menu_model.append(Some(&gettext("About Valentine")), Some("app.about"));
        menu_model.append(Some(&gettext("Quit")), Some("app.quit"));
        let menu_button = gtk::MenuButton::builder()
            .icon_name("open-menu-symbolic")
            .menu_model(&menu_model)
            .build();

        let header = adw::HeaderBar::builder().title_widget(&title).build();
        header.add_css_class("flat");
        header.add_css_class("app-header");
        header.pack_end(&menu_button);

        state.borrow_mut().title = Some(title);
        let view_stack = build_view_stack(&state);

        let toolbar = adw::ToolbarView::new();
        toolbar.set_hexpand(true);
        toolbar.set_vexpand(true);
        toolbar.set_extend_content_to_top_edge(true);
        toolbar.add_top_bar(&header);
        toolbar.set_content(Some(&view_stack));

        let win = adw::ApplicationWindow::builder()
            .application(app)
            .title("Valentine")
            .icon_name(APP_ID)
            .default_width(390)
            .default_height(780)
            .content(&toolbar)
            .build();
        win.set_size_request(360, 560);
        win.add_css_class("app-window");

        let style_manager = adw::StyleManager::default();
        if style_manager.is_dark() {
            win.add_css_class("theme-dark");
        }
        style_manager.connect_notify_local(Some("dark"), {
            let win = win.clone();
            move |manager, _| {
                if manager.is_dark() {
                    win.add_css_class("theme-dark");
                } else {
                    win.remove_css_class("theme-dark");
                }
            }
        });

        win.connect_close_request({
            let state = state.clone();
            move |_| {
                state.borrow_mut().shutdown();
                glib::Propagation::Proceed
            }
        });

        log::info!("window ready");
        win.present();
    });

    app.run()
}

fn load_css() {
    static RESOURCES_INIT: Once = Once::new();
    RESOURCES_INIT.call_once(|| {
        gio::resources_register_include!("valentine.gresource")
            .expect("failed to register embedded resources");
    });

    let Some(display) = gtk::gdk::Display::default() else {
        log::warn!("no default display, skipping stylesheets");
        return;
    };

    for resource_path in [
        "/io/github/valentine/Proposal/style.vars.css",
        "/io/github/valentine/Proposal/style.css",
        "/io/github/valentine/Proposal/style.dark.css",
    ] {
        let provider = gtk::CssProvider::new();
        provider.load_from_resource(resource_path);
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
