use anyhow::{Context, Result};
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use boardbot::app::{insert_mode, BoardLogicPlugin, BoardViewPlugin};
use boardbot::core::{load_settings, Cli, CorePlugin, ModeSetup, WindowConfig};
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings();
    cli.apply(&mut settings);

    if cli.headless {
        return boardbot::headless::run(&settings);
    }

    let setup = ModeSetup::from_settings(&settings).context("setting up the board")?;
    let window_config = WindowConfig::for_board(settings.board_size);

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(window_config.to_window()),
                ..default()
            })
            .set(LogPlugin {
                filter: settings.log_filter.clone(),
                level: Level::INFO,
                ..default()
            }),
    )
    .add_plugins(EguiPlugin::default())
    .insert_resource(window_config)
    .insert_resource(settings)
    .add_plugins((CorePlugin, BoardLogicPlugin, BoardViewPlugin));
    insert_mode(&mut app, setup);

    match app.run() {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => anyhow::bail!("exited with code {code}"),
    }
}
