//! Score read-outs and the game-over overlay, drawn with bevy_egui.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

use crate::game::{GamePhase, Score};
use crate::persistence::HighScore;

pub struct HudPlugin;
impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_systems(EguiPrimaryContextPass, (
                score_panel,
                game_over_overlay.run_if(in_state(GamePhase::GameOver)),
            ).chain())
            ;
    }
}

const SCORE_FONT_SIZE: f32 = 32.0;
const TITLE_FONT_SIZE: f32 = 56.0;
const INFO_FONT_SIZE: f32 = 24.0;
const HUD_MARGIN: f32 = 10.0;
const SCORE_COLOR: egui::Color32 = egui::Color32::BLACK;
const HIGH_SCORE_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 215, 0);
const GAME_OVER_COLOR: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);

fn score_panel(
    mut contexts: EguiContexts,
    score: Res<Score>,
    high_score: Res<HighScore>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    hud_area(ctx, "score", egui::Align2::LEFT_TOP, egui::vec2(HUD_MARGIN, HUD_MARGIN), |ui| {
        ui.label(egui::RichText::new(format!("Slices: {}", score.0))
            .size(SCORE_FONT_SIZE)
            .color(SCORE_COLOR));
    });
    hud_area(ctx, "high_score", egui::Align2::RIGHT_TOP, egui::vec2(-HUD_MARGIN, HUD_MARGIN), |ui| {
        ui.label(egui::RichText::new(format!("Best: {}", high_score.0))
            .size(SCORE_FONT_SIZE)
            .color(HIGH_SCORE_COLOR));
    });
}

fn game_over_overlay(mut contexts: EguiContexts, score: Res<Score>) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    hud_area(ctx, "game_over", egui::Align2::CENTER_CENTER, egui::Vec2::ZERO, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new("GAME OVER")
                .size(TITLE_FONT_SIZE)
                .color(GAME_OVER_COLOR)
                .strong());
            ui.label(egui::RichText::new("That cut would have left too thin a heel")
                .size(INFO_FONT_SIZE)
                .color(SCORE_COLOR));
            ui.add_space(12.0);
            ui.label(egui::RichText::new(format!("Total slices: {}", score.0))
                .size(INFO_FONT_SIZE)
                .color(SCORE_COLOR));
            ui.add_space(8.0);
            ui.label(egui::RichText::new("Press 'R' to play again")
                .size(INFO_FONT_SIZE)
                .color(SCORE_COLOR));
        });
    });
}

/// Click-through text area pinned to a screen anchor.
fn hud_area(
    ctx: &egui::Context,
    id: &str,
    anchor: egui::Align2,
    offset: egui::Vec2,
    add_contents: impl FnOnce(&mut egui::Ui),
) {
    egui::Area::new(egui::Id::new(id))
        .anchor(anchor, offset)
        .interactable(false)
        .order(egui::Order::Foreground)
        .show(ctx, add_contents);
}
