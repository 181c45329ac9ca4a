//! The scrolling loaf and the cut that takes off its right-hand end.

use bevy::prelude::*;

use crate::config::GameConfig;
use crate::game::{GamePhase, TickSet};

pub struct BreadPlugin;
impl Plugin for BreadPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_systems(FixedUpdate, scroll_bread
                .in_set(TickSet::Advance)
                .run_if(in_state(GamePhase::Playing)))
            .add_systems(Update, (sync_bread_sprite, sync_crust))
            ;
    }
}

pub const BREAD_COLOR: Color = Color::srgb(139.0 / 255.0, 69.0 / 255.0, 19.0 / 255.0);
pub const CRUST_COLOR: Color = Color::srgb(210.0 / 255.0, 180.0 / 255.0, 140.0 / 255.0);
pub const CRUST_HEIGHT: f32 = 20.0;
const BREAD_Z: f32 = 0.0;

// ============================================================================
// Components
// ============================================================================

/// Remaining loaf as a screen-space rectangle. `x`/`y` are the top-left corner.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Bread {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed_x: f32,
}

/// Light strip along the top edge of a loaf or slice sprite.
#[derive(Component)]
pub struct Crust;

/// Geometry of the piece removed by a successful cut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cut {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliceOutcome {
    Cut(Cut),
    /// The knife is not over the loaf.
    Missed,
    /// The cut would leave less than the minimum sliceable width.
    TooThin,
}

impl Bread {
    /// Fresh loaf sitting just off the left edge of the screen.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: -config.bread_width,
            y: config.bread_start_y,
            width: config.bread_width,
            height: config.bread_height,
            speed_x: config.bread_speed,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn contains_x(&self, x: f32) -> bool {
        self.x <= x && x < self.right()
    }

    pub fn is_spent(&self, min_width: f32) -> bool {
        self.width < min_width
    }

    /// Moves one tick to the right, re-entering from the left once fully past `screen_width`.
    pub fn update(&mut self, screen_width: f32) {
        self.x += self.speed_x;
        if self.x > screen_width {
            self.x = -self.width;
        }
    }

    /// Cuts at `knife_x`, removing everything right of it. Only `Cut` changes the loaf.
    pub fn slice(&mut self, knife_x: f32, min_width: f32) -> SliceOutcome {
        if !self.contains_x(knife_x) {
            return SliceOutcome::Missed;
        }
        let slice_width = self.right() - knife_x;
        let remaining_width = self.width - slice_width;
        if remaining_width < min_width {
            return SliceOutcome::TooThin;
        }
        self.width = remaining_width;
        SliceOutcome::Cut(Cut {
            x: knife_x,
            y: self.y,
            width: slice_width,
            height: self.height,
        })
    }
}

// ============================================================================
// Spawning
// ============================================================================

pub fn crust_bundle(width: f32, height: f32) -> impl Bundle {
    let crust_height = CRUST_HEIGHT.min(height);
    (
        Crust,
        Sprite::from_color(CRUST_COLOR, Vec2::new(width, crust_height)),
        Transform::from_xyz(0.0, (height - crust_height) * 0.5, 0.1),
    )
}

pub fn spawn_bread(commands: &mut Commands, config: &GameConfig) {
    let bread = Bread::new(config);
    commands
        .spawn((
            bread,
            Sprite::from_color(BREAD_COLOR, Vec2::new(bread.width, bread.height)),
            Transform::from_translation(config.to_world(bread.center()).extend(BREAD_Z)),
        ))
        .with_children(|parent| {
            parent.spawn(crust_bundle(bread.width, bread.height));
        });
}

// ============================================================================
// Systems
// ============================================================================

fn scroll_bread(config: Res<GameConfig>, mut breads: Query<&mut Bread>) {
    for mut bread in &mut breads {
        bread.update(config.screen_width);
    }
}

fn sync_bread_sprite(
    config: Res<GameConfig>,
    mut breads: Query<(&Bread, &mut Sprite, &mut Transform), Changed<Bread>>,
) {
    for (bread, mut sprite, mut transform) in &mut breads {
        sprite.custom_size = Some(Vec2::new(bread.width, bread.height));
        transform.translation = config.to_world(bread.center()).extend(BREAD_Z);
    }
}

fn sync_crust(
    breads: Query<&Bread, Changed<Bread>>,
    mut crusts: Query<(&ChildOf, &mut Sprite), With<Crust>>,
) {
    for (child_of, mut sprite) in &mut crusts {
        let Ok(bread) = breads.get(child_of.parent()) else { continue };
        if let Some(size) = sprite.custom_size.as_mut() {
            size.x = bread.width;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MIN_WIDTH: f32 = 15.0;

    fn bread_at(x: f32, width: f32) -> Bread {
        Bread { x, y: 200.0, width, height: 100.0, speed_x: 3.0 }
    }

    #[test]
    fn new_bread_starts_just_off_screen_left() {
        let config = GameConfig::default();
        let bread = Bread::new(&config);

        assert_eq!(bread.x, -300.0);
        assert_eq!(bread.right(), 0.0);
        assert_eq!(bread.width, 300.0);
        assert_eq!(bread.y, 200.0);
    }

    #[test]
    fn bread_wraps_after_leaving_right_edge() {
        let mut bread = bread_at(798.0, 120.0);

        bread.update(800.0);
        assert_eq!(bread.x, -120.0);
        assert_eq!(bread.right(), 0.0);

        let mut on_screen = bread_at(700.0, 120.0);
        on_screen.update(800.0);
        assert_eq!(on_screen.x, 703.0);
    }

    #[test]
    fn cut_keeps_left_part_and_returns_right_part() {
        let mut bread = bread_at(300.0, 200.0);

        let outcome = bread.slice(400.0, MIN_WIDTH);

        assert_eq!(
            outcome,
            SliceOutcome::Cut(Cut { x: 400.0, y: 200.0, width: 100.0, height: 100.0 })
        );
        assert_eq!(bread.width, 100.0);
        assert_eq!(bread.x, 300.0);
    }

    #[test]
    fn cut_near_left_edge_is_refused() {
        let mut bread = bread_at(390.0, 200.0);
        let before = bread;

        assert_eq!(bread.slice(400.0, MIN_WIDTH), SliceOutcome::TooThin);
        assert_eq!(bread, before);
    }

    #[test]
    fn knife_on_right_edge_misses() {
        let mut bread = bread_at(200.0, 200.0);
        assert_eq!(bread.slice(400.0, MIN_WIDTH), SliceOutcome::Missed);
        assert_eq!(bread.width, 200.0);
    }

    proptest! {
        #[test]
        fn cut_within_span_leaves_knife_to_left_edge(
            x in -400.0f32..800.0,
            width in 1.0f32..600.0,
            offset in 0.0f32..1.0,
        ) {
            let mut bread = bread_at(x, width);
            let knife_x = x + offset * width;
            prop_assume!(bread.contains_x(knife_x));
            let before = bread;
            let remaining = before.width - (before.right() - knife_x);

            match bread.slice(knife_x, MIN_WIDTH) {
                SliceOutcome::Cut(cut) => {
                    prop_assert!(remaining >= MIN_WIDTH);
                    prop_assert_eq!(bread.width, remaining);
                    prop_assert_eq!(bread.x, before.x);
                    prop_assert_eq!(cut.x, knife_x);
                    prop_assert_eq!(cut.width, before.right() - knife_x);
                    prop_assert_eq!(cut.height, before.height);
                }
                SliceOutcome::TooThin => {
                    prop_assert!(remaining < MIN_WIDTH);
                    prop_assert_eq!(bread, before);
                }
                SliceOutcome::Missed => prop_assert!(false, "knife was inside the loaf"),
            }
        }

        #[test]
        fn knife_outside_span_never_cuts(
            x in -400.0f32..800.0,
            width in 1.0f32..600.0,
            gap in 0.0f32..500.0,
            left_side in any::<bool>(),
        ) {
            let mut bread = bread_at(x, width);
            let knife_x = if left_side { x - gap - 0.5 } else { bread.right() + gap };
            prop_assume!(!bread.contains_x(knife_x));
            let before = bread;

            prop_assert_eq!(bread.slice(knife_x, MIN_WIDTH), SliceOutcome::Missed);
            prop_assert_eq!(bread, before);
        }
    }
}
