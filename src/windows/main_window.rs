use crate::*;
use gtk::PopoverMenuBar;
use widgets::clock::Clock;

fn menu_bar() -> PopoverMenuBar {
    let clock_menu = gio::Menu::new();
    clock_menu.append(Some("Show Clock"), Some("app.show-clock"));
    clock_menu.append(Some("Quit"), Some("app.quit"));
    let model = gio::Menu::new();
    model.append_submenu(Some("Clock"), &clock_menu);
    PopoverMenuBar::from_model(Some(&model))
}

fn install_actions(app: &Application, clock: &Clock) {
    let show_clock = clock.show_clock_action();
    app.add_action(&show_clock);

    let quit = gio::SimpleAction::new("quit", None);
    quit.connect_activate(clone!(
        #[weak] app,
        move |_, _| app.quit()
    ));
    app.add_action(&quit);
    app.set_accels_for_action("app.quit", &["<Ctrl>q"]);
}

/// Pins the window to the desktop background when the compositor allows it.
fn desktop_layer(window: &ApplicationWindow) {
    if !layer_shell::is_supported() {
        log::warn!("compositor has no layer-shell support, using a normal window");
        return;
    }
    window.init_layer_shell();
    window.set_layer(Layer::Background);
    window.set_anchor(Edge::Top, true);
    window.set_anchor(Edge::Right, true);
    window.set_margin(Edge::Top, 40);
    window.set_margin(Edge::Right, 40);
}

pub fn new(app: &Application, config: &Config, clock: &Clock) -> ApplicationWindow {
    let content = Box::new(Orientation::Vertical, 0);
    content.append(&menu_bar());
    content.append(&clock.widget());

    let window = ApplicationWindow::builder()
        .application(app)
        .title("Clock")
        .css_classes(["clock-window"])
        .resizable(false)
        .child(&content)
        .build();
    install_actions(app, clock);
    if config.layer_shell {
        desktop_layer(&window);
    }
    window
}
