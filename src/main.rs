//! Bread Slicer - a one-screen arcade game.
//!
//! A loaf scrolls past a fixed knife; each click cuts off whatever lies right of the
//! blade. The session ends when a cut would leave the loaf too thin. Built with Bevy 0.18.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

mod bread;
mod config;
mod game;
mod hud;
mod input;
mod knife;
mod persistence;
mod slices;

const SKY_BLUE: Color = Color::srgb(135.0 / 255.0, 206.0 / 255.0, 235.0 / 255.0);

fn main() {
    let defaults = config::GameConfig::default();
    App::new()
        .add_plugins(DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Bread Slicer".into(),
                    resolution: (defaults.screen_width as u32, defaults.screen_height as u32).into(),
                    resizable: false,
                    ..default()
                }),
                ..default()
            })
        )
        .add_plugins(EguiPlugin::default())
        .insert_resource(ClearColor(SKY_BLUE))
        .add_plugins((
            config::ConfigPlugin,
            persistence::PersistencePlugin,
            game::GamePlugin,
            bread::BreadPlugin,
            slices::SlicesPlugin,
            knife::KnifePlugin,
            input::InputPlugin,
            hud::HudPlugin,
        ))
        .add_systems(Startup, setup)
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}
