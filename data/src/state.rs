use std::fs;
use std::path::PathBuf;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::{InternalError, get_data_path};

const STATE_FILE: &str = "state.json";

/// Persisted application state, written on exit and read at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct State {
    /// Autoplay interval handed to the carousel, in milliseconds.
    pub autoplay_interval_ms: u64,
    /// When set, the gallery serves existing images but rejects writes.
    pub read_only: bool,
    pub window_size: Option<(f32, f32)>,
    pub window_position: Option<(f32, f32)>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: 4000,
            read_only: false,
            window_size: None,
            window_position: None,
        }
    }
}

impl State {
    /// Read the saved state, falling back to defaults when the file is
    /// missing or unreadable.  A corrupt file is logged, not fatal.
    pub fn load() -> Self {
        let path = Self::path();

        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(state) => state,
                Err(err) => {
                    warn!("failed to parse {}: {err}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<(), InternalError> {
        let path = Self::path();

        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        Ok(())
    }

    fn path() -> PathBuf {
        get_data_path(STATE_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let state = State::default();
        assert_eq!(state.autoplay_interval_ms, 4000);
        assert!(!state.read_only);
    }

    #[test]
    fn round_trips_through_json() {
        let state = State {
            autoplay_interval_ms: 2500,
            read_only: true,
            window_size: Some((1280.0, 720.0)),
            window_position: Some((120.0, 64.0)),
        };

        let json = serde_json::to_string(&state).unwrap();
        let back: State = serde_json::from_str(&json).unwrap();
        assert_eq!(back.autoplay_interval_ms, 2500);
        assert!(back.read_only);
        assert_eq!(back.window_size, Some((1280.0, 720.0)));
        assert_eq!(back.window_position, Some((120.0, 64.0)));
    }

    #[test]
    fn unknown_fields_fall_back_to_defaults() {
        let back: State = serde_json::from_str("{}").unwrap();
        assert_eq!(back.autoplay_interval_ms, 4000);
    }
}
