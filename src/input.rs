//! Mouse and keyboard input.
//!
//! Left click cuts, R restarts after game over. Commands are queued as messages and
//! applied at the start of the next fixed tick; the game ignores whichever one does
//! not fit the current phase.

use bevy::prelude::*;

use crate::game::GameCommand;

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_systems(Update, handle_input)
            ;
    }
}

fn handle_input(
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut commands: MessageWriter<GameCommand>,
) {
    // Left click: cut at the knife
    if mouse.just_pressed(MouseButton::Left) {
        commands.write(GameCommand::Slice);
    }

    // R: restart
    if keyboard.just_pressed(KeyCode::KeyR) {
        commands.write(GameCommand::Restart);
    }
}
