#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod audio;
mod config;
mod error;
mod game;
mod player;

use error::AppError;

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = config::Settings::default();
    let audio = audio::KiraOutput::new()?;
    app::run(audio, settings)?;
    Ok(())
}
