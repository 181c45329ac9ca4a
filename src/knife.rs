//! The stationary knife and its short chop animation.
//!
//! The animation is cosmetic only; cuts are resolved the moment the player clicks.

use bevy::prelude::*;

use crate::config::GameConfig;
use crate::game::TickSet;

pub struct KnifePlugin;
impl Plugin for KnifePlugin {
    fn build(&self, app: &mut App) {
        app
            .add_systems(Startup, spawn_knife)
            .add_systems(FixedUpdate, tick_knife.in_set(TickSet::Advance))
            .add_systems(Update, sync_knife_transform)
            ;
    }
}

const BLADE_COLOR: Color = Color::srgb(100.0 / 255.0, 100.0 / 255.0, 100.0 / 255.0);
const HANDLE_COLOR: Color = Color::BLACK;
const BLADE_WIDTH: f32 = 10.0;
const HANDLE_HEIGHT: f32 = 100.0;
const CHOP_DROP: f32 = 20.0;
const KNIFE_Z: f32 = 2.0;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Knife {
    pub x: f32,
    pub is_slicing: bool,
    pub animation_timer: u32,
    chop_ticks: u32,
}

impl Knife {
    pub fn new(x: f32, chop_ticks: u32) -> Self {
        Self { x, is_slicing: false, animation_timer: 0, chop_ticks }
    }

    pub fn start_slice_animation(&mut self) {
        self.is_slicing = true;
        self.animation_timer = self.chop_ticks;
    }

    pub fn update(&mut self) {
        if self.is_slicing {
            self.animation_timer = self.animation_timer.saturating_sub(1);
            if self.animation_timer == 0 {
                self.is_slicing = false;
            }
        }
    }

    /// Screen-space point at the top of the blade.
    fn anchor(&self) -> Vec2 {
        let drop = if self.is_slicing { CHOP_DROP } else { 0.0 };
        Vec2::new(self.x, drop)
    }
}

fn spawn_knife(mut commands: Commands, config: Res<GameConfig>) {
    let knife = Knife::new(config.knife_x, config.knife_chop_ticks);
    let blade_length = config.screen_height;
    commands
        .spawn((
            Transform::from_translation(config.to_world(knife.anchor()).extend(KNIFE_Z)),
            Visibility::default(),
            knife,
        ))
        .with_children(|parent| {
            parent.spawn((
                Sprite::from_color(BLADE_COLOR, Vec2::new(BLADE_WIDTH, blade_length)),
                Transform::from_xyz(0.0, -blade_length * 0.5, 0.0),
            ));
            parent.spawn((
                Sprite::from_color(HANDLE_COLOR, Vec2::new(BLADE_WIDTH * 2.0, HANDLE_HEIGHT)),
                Transform::from_xyz(0.0, -HANDLE_HEIGHT * 0.5, 0.1),
            ));
        });
}

fn tick_knife(mut knives: Query<&mut Knife>) {
    for mut knife in &mut knives {
        knife.update();
    }
}

fn sync_knife_transform(
    config: Res<GameConfig>,
    mut knives: Query<(&Knife, &mut Transform), Changed<Knife>>,
) {
    for (knife, mut transform) in &mut knives {
        transform.translation = config.to_world(knife.anchor()).extend(KNIFE_Z);
    }
}
