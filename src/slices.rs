//! Cut-off slices: launched with a small random kick, then falling and spinning
//! until they drop below the bottom of the screen.

use bevy::prelude::*;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::bread::{BREAD_COLOR, Cut, crust_bundle};
use crate::config::GameConfig;
use crate::game::TickSet;

pub struct SlicesPlugin;
impl Plugin for SlicesPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_systems(FixedUpdate, (
                fall_slices.in_set(TickSet::Advance),
                cull_slices.in_set(TickSet::Resolve),
            ))
            .add_systems(Update, sync_slice_transforms)
            ;
    }
}

/// Spin rates in degrees per tick. Zero is left out so every slice visibly turns.
pub const ROTATION_SPEEDS: [f32; 4] = [-2.0, -1.0, 1.0, 2.0];
const SLICE_Z: f32 = 1.0;

/// A falling slice. Position is the unrotated rectangle's top-left corner in screen space.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SliceBody {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels per tick, y down.
    pub velocity: Vec2,
    pub gravity: f32,
    /// Degrees, counter-clockwise.
    pub angle: f32,
    pub rotation_speed: f32,
}

impl SliceBody {
    pub fn from_cut(cut: &Cut, gravity: f32, rng: &mut impl Rng) -> Self {
        Self {
            x: cut.x,
            y: cut.y,
            width: cut.width,
            height: cut.height,
            velocity: Vec2::new(rng.random_range(-1.5..1.5), rng.random_range(-3.0..-1.0)),
            gravity,
            angle: 0.0,
            rotation_speed: *ROTATION_SPEEDS.choose(rng).unwrap_or(&1.0),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// One tick of gravity, drift and spin.
    pub fn update(&mut self) {
        self.velocity.y += self.gravity;
        self.y += self.velocity.y;
        self.x += self.velocity.x;
        self.angle += self.rotation_speed;
    }

    pub fn is_below(&self, screen_height: f32) -> bool {
        self.y >= screen_height
    }

    fn transform(&self, config: &GameConfig) -> Transform {
        Transform::from_translation(config.to_world(self.center()).extend(SLICE_Z))
            .with_rotation(Quat::from_rotation_z(self.angle.to_radians()))
    }
}

pub fn spawn_slice(commands: &mut Commands, body: SliceBody, config: &GameConfig) {
    commands
        .spawn((
            body,
            Sprite::from_color(BREAD_COLOR, Vec2::new(body.width, body.height)),
            body.transform(config),
        ))
        .with_children(|parent| {
            parent.spawn(crust_bundle(body.width, body.height));
        });
}

fn fall_slices(mut slices: Query<&mut SliceBody>) {
    for mut slice in &mut slices {
        slice.update();
    }
}

fn cull_slices(
    mut commands: Commands,
    config: Res<GameConfig>,
    slices: Query<(Entity, &SliceBody)>,
) {
    for (entity, slice) in &slices {
        if slice.is_below(config.screen_height) {
            commands.entity(entity).despawn();
        }
    }
}

fn sync_slice_transforms(
    config: Res<GameConfig>,
    mut slices: Query<(&SliceBody, &mut Transform), Changed<SliceBody>>,
) {
    for (slice, mut transform) in &mut slices {
        *transform = slice.transform(&config);
    }
}
