use clap::Parser;
use std::process::ExitCode;

mod app;
mod config;
mod error;
mod portrait;
mod state;

use app::CharacterViewer;
use config::{Args, Config};
use error::ViewerError;
use state::store::CharacterStore;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("❌ {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ViewerError> {
    let config = Config::from_args(Args::parse())?;

    // The identity list is loaded once; without it there is nothing to show
    let store = CharacterStore::new(&config.database);
    let identities = store.list_identities()?;
    log::info!(
        "📁 {} characters loaded from {}",
        identities.len(),
        store.path().display()
    );

    iced::application(app::TITLE, CharacterViewer::update, CharacterViewer::view)
        .theme(CharacterViewer::theme)
        .window_size((800.0, 600.0))
        .centered()
        .run_with(move || CharacterViewer::new(config, identities))?;

    Ok(())
}
