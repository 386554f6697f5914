#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Storage of the player profile between sessions.
//!
//! A [`Profile`] bundles the high score, lifetime statistics, and achievement
//! progress. [`TomlFileStore`] keeps it in a human-readable TOML file inside a
//! data directory; [`MemoryStore`] keeps it in memory for tests and for
//! sessions that should not touch the disk.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::debug;
use serde::{Deserialize, Serialize};
use snake_arcade_system_achievements::{AchievementProgress, Achievements, GameStats};
use thiserror::Error;

/// File name of the profile inside the data directory.
pub const PROFILE_FILE_NAME: &str = "profile.toml";

/// Everything remembered about the player between sessions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Best score ever reached.
    pub high_score: u64,
    /// Aggregated statistics across games.
    pub stats: GameStats,
    /// Progress of every achievement.
    pub achievements: Vec<AchievementProgress>,
}

impl Profile {
    /// Captures the current high score and achievement state.
    #[must_use]
    pub fn capture(high_score: u64, achievements: &Achievements) -> Self {
        Self {
            high_score: high_score.max(achievements.stats().high_score),
            stats: *achievements.stats(),
            achievements: achievements.progress().to_vec(),
        }
    }

    /// Rebuilds the achievement system from the stored progress.
    #[must_use]
    pub fn achievements(&self) -> Achievements {
        Achievements::restore(self.stats, &self.achievements)
    }
}

/// Errors raised while loading or saving a profile.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The profile file exists but could not be read.
    #[error("failed to read profile from {}", path.display())]
    Read {
        /// Location of the profile.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The profile file or its directory could not be written.
    #[error("failed to write profile to {}", path.display())]
    Write {
        /// Location of the profile.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The profile file does not contain a valid profile.
    #[error("profile at {} is malformed", path.display())]
    Parse {
        /// Location of the profile.
        path: PathBuf,
        /// Underlying decoding failure.
        #[source]
        source: toml::de::Error,
    },
    /// The profile could not be encoded.
    #[error("failed to encode profile")]
    Encode(#[from] toml::ser::Error),
}

/// Backing storage for the player profile.
pub trait ProfileStore {
    /// Loads the stored profile, returning the default profile when none exists.
    fn load(&self) -> Result<Profile, PersistenceError>;

    /// Replaces the stored profile.
    fn save(&mut self, profile: &Profile) -> Result<(), PersistenceError>;
}

/// Profile store that writes TOML into a data directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TomlFileStore {
    path: PathBuf,
}

impl TomlFileStore {
    /// Creates a store for `<data_dir>/profile.toml`.
    #[must_use]
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(PROFILE_FILE_NAME),
        }
    }

    /// Location of the profile file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileStore for TomlFileStore {
    fn load(&self) -> Result<Profile, PersistenceError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!("no profile at {}, starting fresh", self.path.display());
                return Ok(Profile::default());
            }
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        toml::from_str(&contents).map_err(|source| PersistenceError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&mut self, profile: &Profile) -> Result<(), PersistenceError> {
        let encoded = toml::to_string_pretty(profile)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| PersistenceError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        fs::write(&self.path, encoded).map_err(|source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!("saved profile to {}", self.path.display());
        Ok(())
    }
}

/// Profile store that lives only as long as the process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    profile: Option<Profile>,
    saves: usize,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful saves.
    #[must_use]
    pub const fn saves(&self) -> usize {
        self.saves
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self) -> Result<Profile, PersistenceError> {
        Ok(self.profile.clone().unwrap_or_default())
    }

    fn save(&mut self, profile: &Profile) -> Result<(), PersistenceError> {
        self.profile = Some(profile.clone());
        self.saves += 1;
        Ok(())
    }
}

impl<S: ProfileStore + ?Sized> ProfileStore for Box<S> {
    fn load(&self) -> Result<Profile, PersistenceError> {
        (**self).load()
    }

    fn save(&mut self, profile: &Profile) -> Result<(), PersistenceError> {
        (**self).save(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_starts_empty_and_remembers_saves() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().expect("load"), Profile::default());

        let profile = Profile {
            high_score: 420,
            ..Profile::default()
        };
        store.save(&profile).expect("save");
        assert_eq!(store.load().expect("load"), profile);
        assert_eq!(store.saves(), 1);
    }

    #[test]
    fn capture_keeps_the_larger_high_score() {
        let achievements = Achievements::restore(
            GameStats {
                high_score: 900,
                ..GameStats::default()
            },
            &[],
        );
        assert_eq!(Profile::capture(300, &achievements).high_score, 900);
        assert_eq!(Profile::capture(1_300, &achievements).high_score, 1_300);
    }

    #[test]
    fn boxed_store_forwards_to_inner_store() {
        let mut store: Box<dyn ProfileStore> = Box::new(MemoryStore::new());
        let profile = Profile {
            high_score: 12,
            ..Profile::default()
        };
        store.save(&profile).expect("save");
        assert_eq!(store.load().expect("load").high_score, 12);
    }
}
