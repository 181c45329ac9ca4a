//! Game tuning values and the screen-to-world projection.
//!
//! Defaults give the classic 800x600 game. A `config.ron` in the user's config
//! directory may override any subset of the fields.

use bevy::log::{debug, info, warn};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use serde::{Deserialize, Serialize};

pub struct ConfigPlugin;
impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        let config = GameConfig::load();
        app
            .insert_resource(Time::<Fixed>::from_hz(config.tick_rate_hz))
            .insert_resource(config)
            .add_systems(Startup, apply_window_size)
            ;
    }
}

#[cfg(not(target_arch = "wasm32"))]
const CONFIG_FILE: &str = "config.ron";

/// All distances are in screen pixels (origin top-left, y down) and all rates are per tick.
#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub tick_rate_hz: f64,
    pub bread_width: f32,
    pub bread_height: f32,
    pub bread_start_y: f32,
    pub bread_speed: f32,
    pub knife_x: f32,
    /// Narrowest loaf the knife may leave behind.
    pub min_sliceable_width: f32,
    pub slice_gravity: f32,
    pub knife_chop_ticks: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            tick_rate_hz: 60.0,
            bread_width: 300.0,
            bread_height: 100.0,
            bread_start_y: 200.0,
            bread_speed: 3.0,
            knife_x: 400.0,
            min_sliceable_width: 15.0,
            slice_gravity: 0.25,
            knife_chop_ticks: 5,
        }
    }
}

impl GameConfig {
    pub fn from_ron(content: &str) -> Result<Self, String> {
        let config: Self = ron::from_str(content).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the game cannot run with, such as a zero tick rate or an empty screen.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("tick_rate_hz", self.tick_rate_hz),
            ("screen_width", self.screen_width as f64),
            ("screen_height", self.screen_height as f64),
            ("bread_width", self.bread_width as f64),
            ("bread_height", self.bread_height as f64),
            ("min_sliceable_width", self.min_sliceable_width as f64),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{} must be a positive number, got {}", name, value));
            }
        }
        let finite = [
            ("bread_start_y", self.bread_start_y),
            ("bread_speed", self.bread_speed),
            ("knife_x", self.knife_x),
            ("slice_gravity", self.slice_gravity),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(format!("{} must be a finite number, got {}", name, value));
            }
        }
        Ok(())
    }

    /// Maps a point from screen space to Bevy's centred, y-up world space.
    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            screen.x - self.screen_width * 0.5,
            self.screen_height * 0.5 - screen.y,
        )
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn load() -> Self {
        let Some(config_dir) = crate::persistence::config_dir() else {
            warn!("Could not determine config directory, using default tuning");
            return Self::default();
        };
        let path = config_dir.join(CONFIG_FILE);
        if !path.exists() {
            debug!("No tuning file at {:?}, using defaults", path);
            return Self::default();
        }
        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_ron(&content) {
                Ok(config) => {
                    info!("Loaded tuning from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Invalid tuning file, using defaults: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read tuning file: {}", e);
                Self::default()
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn load() -> Self {
        Self::default()
    }
}

fn apply_window_size(
    config: Res<GameConfig>,
    mut window: Single<&mut Window, With<PrimaryWindow>>,
) {
    window.resolution.set(config.screen_width, config.screen_height);
}
