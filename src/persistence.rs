//! High score persistence as a plain decimal integer.
//!
//! Native builds keep `high_score.txt` in the user's config directory; wasm builds
//! keep the same value in localStorage. A missing or unreadable record counts as 0.

use bevy::log::{debug, info, warn};
use bevy::prelude::*;
use std::io;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

pub struct PersistencePlugin;
impl Plugin for PersistencePlugin {
    fn build(&self, app: &mut App) {
        let store = HighScoreStore::in_config_dir();
        let high_score = HighScore(store.load());
        debug!("Starting with high score {}", high_score.0);
        app
            .insert_resource(store)
            .insert_resource(high_score)
            ;
    }
}

#[cfg(not(target_arch = "wasm32"))]
const APP_DIR: &str = "bread-slicer";
const HIGH_SCORE_FILE: &str = "high_score.txt";

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_DIR))
}

/// Anything that is not a non-negative decimal integer reads as 0.
pub fn parse_high_score(content: &str) -> u32 {
    content.trim().parse().unwrap_or(0)
}

/// Best score across all sessions.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighScore(pub u32);
impl HighScore {
    /// Raises the record to `score` if it beats it. Returns whether it did.
    pub fn submit(&mut self, score: u32) -> bool {
        if score > self.0 {
            self.0 = score;
            true
        } else {
            false
        }
    }

    /// Submits a final session score and writes the record through when it improves.
    pub fn commit(&mut self, score: u32, store: &HighScoreStore) -> io::Result<bool> {
        if !self.submit(score) {
            return Ok(false);
        }
        store.save(self.0)?;
        Ok(true)
    }
}

#[derive(Resource, Clone, Debug)]
pub struct HighScoreStore {
    #[cfg(not(target_arch = "wasm32"))]
    path: Option<PathBuf>,
}

#[cfg(not(target_arch = "wasm32"))]
impl HighScoreStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: Some(path.into()) }
    }

    fn in_config_dir() -> Self {
        let Some(dir) = config_dir() else {
            warn!("Could not determine config directory, high score will not be kept");
            return Self { path: None };
        };
        Self::at(dir.join(HIGH_SCORE_FILE))
    }

    pub fn load(&self) -> u32 {
        let Some(path) = &self.path else { return 0 };
        std::fs::read_to_string(path)
            .map(|content| parse_high_score(&content))
            .unwrap_or(0)
    }

    pub fn save(&self, score: u32) -> io::Result<()> {
        let Some(path) = &self.path else {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no config directory"));
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, score.to_string())?;
        info!("Saved high score {} to {:?}", score, path);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore {
    fn in_config_dir() -> Self {
        Self {}
    }

    pub fn load(&self) -> u32 {
        use gloo_storage::Storage;
        gloo_storage::LocalStorage::get::<String>(HIGH_SCORE_FILE)
            .map(|content| parse_high_score(&content))
            .unwrap_or(0)
    }

    pub fn save(&self, score: u32) -> io::Result<()> {
        use gloo_storage::Storage;
        gloo_storage::LocalStorage::set(HIGH_SCORE_FILE, score.to_string())
            .map_err(|e| io::Error::other(format!("{:?}", e)))?;
        info!("Saved high score {} to localStorage", score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(content: Option<&str>) -> (tempfile::TempDir, HighScoreStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(HIGH_SCORE_FILE);
        if let Some(content) = content {
            std::fs::write(&path, content).unwrap();
        }
        (dir, HighScoreStore::at(path))
    }

    #[test]
    fn missing_file_loads_as_zero() {
        let (_dir, store) = store_with(None);
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn corrupt_file_loads_as_zero() {
        for content in ["", "abc", "-3", "12.5", "7 slices"] {
            let (_dir, store) = store_with(Some(content));
            assert_eq!(store.load(), 0, "content {:?}", content);
        }
    }

    #[test]
    fn surrounding_whitespace_is_accepted() {
        let (_dir, store) = store_with(Some(" 42\n"));
        assert_eq!(store.load(), 42);
    }

    #[test]
    fn better_final_score_is_written_through() {
        let (_dir, store) = store_with(Some("5"));
        let mut high_score = HighScore(store.load());

        assert!(high_score.commit(7, &store).unwrap());
        assert_eq!(high_score, HighScore(7));
        assert_eq!(store.load(), 7);
    }

    #[test]
    fn worse_final_score_leaves_record_untouched() {
        let (_dir, store) = store_with(Some("5"));
        let mut high_score = HighScore(store.load());

        assert!(!high_score.commit(3, &store).unwrap());
        assert!(!high_score.commit(5, &store).unwrap());
        assert_eq!(high_score, HighScore(5));
        assert_eq!(store.load(), 5);
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = HighScoreStore::at(dir.path().join(APP_DIR).join(HIGH_SCORE_FILE));

        store.save(11).unwrap();
        assert_eq!(store.load(), 11);
    }
}
