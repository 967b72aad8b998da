use anyhow::{anyhow, Context, Result};
use chrono::Local;
use env_logger::Env;
use gdk::Display;
use gtk::gdk;
use gtk::prelude::*;
use gtk::{
    gio,
    glib::{self, clone},
    Application, ApplicationWindow, Box, CssProvider, DrawingArea, Label, Orientation, Overlay,
    Revealer, RevealerTransitionType,
};
use gtk4 as gtk;
use gtk4_layer_shell as layer_shell;
use layer_shell::{Edge, Layer, LayerShell};
use sass_rs::{compile_string, Options};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

mod libs;
mod widgets;
mod windows;
use libs::clock_state::ClockViewModel;
use libs::config::Config;
use libs::ticker::Ticker;
use widgets::clock;
use windows::main_window;

fn build_ui(app: &Application, config: &Config, ticker: &Rc<RefCell<Option<Ticker>>>) {
    if let Some(window) = app.active_window() {
        window.present();
        return;
    }
    let model = Rc::new(ClockViewModel::new(Local::now().naive_local()));
    let clock = clock::new(config, model.clone());
    let window = main_window::new(app, config, &clock);

    ticker.replace(Some(Ticker::start(
        config.tick_source,
        config.interval(),
        move |now| {
            model.update(now);
        },
    )));
    window.present();
}

fn load_css() -> Result<()> {
    let provider = CssProvider::new();
    let css = compile_string(include_str!("style.scss"), Options::default())
        .map_err(|err| anyhow!(err))
        .context("error compiling scss")?;
    provider.load_from_string(&css);

    gtk::style_context_add_provider_for_display(
        &Display::default().context("could not connect to a display")?,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_USER,
    );
    Ok(())
}

#[tokio::main]
async fn main() -> glib::ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let config = Rc::new(Config::load());
    let ticker: Rc<RefCell<Option<Ticker>>> = Rc::new(RefCell::new(None));

    let app = Application::builder()
        .application_id("io.github.gtk_clock")
        .build();

    app.connect_startup(|_| {
        if let Err(err) = load_css() {
            log::warn!("{err:#}");
        }
    });
    app.connect_activate(clone!(
        #[strong] ticker,
        move |app| build_ui(app, &config, &ticker)
    ));
    app.connect_shutdown(move |_| {
        if let Some(ticker) = ticker.take() {
            ticker.stop();
        }
    });

    log::info!("starting clock");
    app.run()
}
