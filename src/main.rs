mod config;
mod game;
mod ui;

use config::Settings;

fn main() {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("pairs: {err}");
            std::process::exit(1);
        }
    };
    ui::app::run(settings);
}
