//! Session state machine: cutting while playing, game over, restart.
//!
//! Every fixed tick runs `TickSet::Input` (queued player commands), then
//! `TickSet::Advance` (motion), then `TickSet::Resolve` (culling and game-over checks).

use bevy::log::{debug, info, warn};
use bevy::prelude::*;

use crate::bread::{Bread, SliceOutcome, spawn_bread};
use crate::config::GameConfig;
use crate::knife::Knife;
use crate::persistence::{HighScore, HighScoreStore};
use crate::slices::{SliceBody, spawn_slice};

pub struct GamePlugin;
impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GamePhase>()
            .init_resource::<Score>()
            .add_message::<GameCommand>()
            .configure_sets(FixedUpdate, (
                TickSet::Input,
                TickSet::Advance,
                TickSet::Resolve,
            ).chain())
            .add_systems(OnEnter(GamePhase::Playing), start_session)
            .add_systems(FixedUpdate, (
                GameCommand::process.in_set(TickSet::Input),
                check_game_over
                    .in_set(TickSet::Resolve)
                    .run_if(in_state(GamePhase::Playing)),
            ))
            ;
    }
}

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    Playing,
    GameOver,
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TickSet {
    Input,
    Advance,
    Resolve,
}

/// Slices cut in the current session.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score(pub u32);
impl Score {
    pub fn record(&mut self, outcome: &SliceOutcome) {
        if matches!(outcome, SliceOutcome::Cut(_)) {
            self.0 += 1;
        }
    }
}

/// Marks a loaf that refused a cut because the piece left behind would be thinner than
/// `min_sliceable_width`; the session ends on the same tick.
///
/// This happens whenever the knife comes down within that distance of the loaf's left
/// end, however wide the loaf still is: a cut that close would leave an unsliceable heel.
#[derive(Component)]
pub struct Exhausted;

// ============================================================================
// Game Commands
// ============================================================================

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    Slice,
    Restart,
}
impl GameCommand {
    fn process(
        mut commands: Commands,
        mut messages: MessageReader<GameCommand>,
        phase: Res<State<GamePhase>>,
        mut next_phase: ResMut<NextState<GamePhase>>,
        config: Res<GameConfig>,
        mut score: ResMut<Score>,
        mut breads: Query<(Entity, &mut Bread), Without<Exhausted>>,
        mut knives: Query<&mut Knife>,
    ) {
        for command in messages.read() {
            match (command, phase.get()) {
                (GameCommand::Slice, GamePhase::Playing) => {
                    // The chop plays whether or not anything gets cut.
                    for mut knife in &mut knives {
                        knife.start_slice_animation();
                    }
                    let Ok((entity, mut bread)) = breads.single_mut() else { continue };
                    let outcome = bread.slice(config.knife_x, config.min_sliceable_width);
                    score.record(&outcome);
                    match outcome {
                        SliceOutcome::Cut(cut) => {
                            let body = SliceBody::from_cut(&cut, config.slice_gravity, &mut rand::rng());
                            spawn_slice(&mut commands, body, &config);
                            debug!("Cut {:.0}px slice, {:.0}px left", cut.width, bread.width);
                        }
                        SliceOutcome::TooThin => {
                            // Too close to the heel: no cut, and the session is over.
                            commands.entity(entity).insert(Exhausted);
                        }
                        SliceOutcome::Missed => {}
                    }
                }
                (GameCommand::Restart, GamePhase::GameOver) => {
                    next_phase.set(GamePhase::Playing);
                }
                _ => {}
            }
        }
    }
}

// ============================================================================
// Systems
// ============================================================================

fn start_session(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut score: ResMut<Score>,
    leftovers: Query<Entity, Or<(With<Bread>, With<SliceBody>)>>,
) {
    for entity in &leftovers {
        commands.entity(entity).despawn();
    }
    *score = Score::default();
    spawn_bread(&mut commands, &config);
    info!("New session started");
}

fn check_game_over(
    mut commands: Commands,
    config: Res<GameConfig>,
    score: Res<Score>,
    store: Res<HighScoreStore>,
    mut high_score: ResMut<HighScore>,
    mut next_phase: ResMut<NextState<GamePhase>>,
    breads: Query<(Entity, &Bread, Has<Exhausted>)>,
) {
    let Ok((entity, bread, exhausted)) = breads.single() else { return };
    if !exhausted && !bread.is_spent(config.min_sliceable_width) {
        return;
    }

    // Gone before any further tick this frame can see it.
    commands.entity(entity).despawn();
    next_phase.set(GamePhase::GameOver);
    info!("Game over with {} slices", score.0);
    match high_score.commit(score.0, &store) {
        Ok(true) => info!("New high score: {}", high_score.0),
        Ok(false) => {}
        Err(e) => warn!("Failed to save high score: {}", e),
    }
}
