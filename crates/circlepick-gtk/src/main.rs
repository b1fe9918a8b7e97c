use circlepick::config;
use circlepick_gtk::gui::app::{self, AppInit, AppModel};
use circlepick_gtk::sys::runtime;
use relm4::prelude::*;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // the only argument is an optional config file; GTK gets none
    let config_path = match std::env::args_os().nth(1) {
        Some(p) => PathBuf::from(p),
        None => config::get_config_path()?,
    };

    let config = config::load_or_default(Some(&config_path));
    let main = app::build_main_picker(&config)?;
    let rotation = app::rotation_picker(config.wheel_rotation)?;

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx, config_path.clone());

    let app = RelmApp::new("org.circlepick.demo").with_args(Vec::new());

    app.run::<AppModel>(AppInit {
        main,
        rotation,
        config_path,
        rx,
    });
    Ok(())
}
