//! Optional TOML configuration.
//!
//! A `sensmatch.toml` next to the process can rebind the command keys and
//! pick the key-repeat policy. A missing file means defaults; an unreadable
//! or invalid file is a startup error.
//!
//! ```toml
//! repeat_policy = "pass_through"
//!
//! [keys]
//! reset = [46, 13]   # virtual-key codes: Delete, Enter
//! pause = 32         # Space
//! quit = 27          # Escape
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Virtual-key codes for the default bindings, as delivered by the event
/// source (Win32 `VK_*` values on the Windows backend).
pub mod vk {
    pub const RETURN: u16 = 0x0D;
    pub const ESCAPE: u16 = 0x1B;
    pub const SPACE: u16 = 0x20;
    pub const DELETE: u16 = 0x2E;
}

/// What to do with key-down events for a key that is already held.
///
/// The platform fires key-down repeatedly while a key is held; whether a held
/// reset/pause/report key should re-trigger is a policy choice, so it is
/// configuration rather than hard-coded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatPolicy {
    /// Only the first key-down of a press triggers; repeats are ignored
    /// until the key is released.
    #[default]
    Suppress,
    /// Held keys re-fire their command on every repeat.
    PassThrough,
}

/// Command key bindings, by virtual-key code.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeyMap {
    /// Keys that reset accumulated motion history.
    pub reset: Vec<u16>,
    /// Toggles the pause state.
    pub pause: u16,
    /// Ends the run.
    pub quit: u16,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            reset: vec![vk::DELETE, vk::RETURN],
            pause: vk::SPACE,
            quit: vk::ESCAPE,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub repeat_policy: RepeatPolicy,
    pub keys: KeyMap,
}

impl Config {
    pub const DEFAULT_PATH: &'static str = "sensmatch.toml";

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => toml::from_str(&text).map_err(|source| Error::ConfigParse {
                path: path.to_path_buf(),
                source,
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(Error::ConfigIo {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.repeat_policy, RepeatPolicy::Suppress);
        assert_eq!(config.keys.reset, vec![vk::DELETE, vk::RETURN]);
        assert_eq!(config.keys.pause, vk::SPACE);
        assert_eq!(config.keys.quit, vk::ESCAPE);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str("repeat_policy = \"pass_through\"").unwrap();
        assert_eq!(config.repeat_policy, RepeatPolicy::PassThrough);
        assert_eq!(config.keys, KeyMap::default());
    }

    #[test]
    fn test_full_file() {
        let config: Config = toml::from_str(
            "repeat_policy = \"suppress\"\n[keys]\nreset = [8]\npause = 80\nquit = 81\n",
        )
        .unwrap();
        assert_eq!(config.keys.reset, vec![8]);
        assert_eq!(config.keys.pause, 80);
        assert_eq!(config.keys.quit, 81);
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        assert!(toml::from_str::<Config>("repeat_policy = \"sometimes\"").is_err());
    }

    #[test]
    fn test_missing_file_is_defaults() {
        let config = Config::load(Path::new("definitely/not/here/sensmatch.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
