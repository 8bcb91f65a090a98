// What you SEE:
// • A borderless cartoon face whose pupils follow the mouse anywhere on screen.
// • Hold Left Mouse on the face and drag to move it.
// • Right click opens the menu: pick another face, or Quit. ESC closes the menu.

mod app;
mod assets;
mod config;
mod cursor;
mod draw;
mod error;
mod eye;
mod faces;
mod logging;
mod mask;
mod menu;
mod types;
mod widget;

use app::AppContext;
use config::Config;
use cursor::DeviceCursor;
use error::Error;
use logging::{init_tracing, LogConfig};

fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    init_tracing(&LogConfig { log_level: config.log_level.clone() });
    tracing::info!(?config, "starting keyes");

    // Missing artwork ends the program here.
    let ctx = AppContext::load(config)?;
    let cursor = DeviceCursor::new()?;
    app::run(&ctx, &cursor)
}
