//! Process-wide profile store
//!
//! Populated at startup from an optional multi-profile file and a scan of
//! the models directory, then refreshed per request from companion files.

use std::collections::HashMap;
use std::path::Path;

use parking_lot::RwLock;
use serde::Deserialize;

use super::Profile;
use crate::error::{Error, Result};

/// Filename marker for profile files found by a directory scan.
const PROFILE_MARKER: &str = ".yaml";

/// A list of profiles, bare or under a `configs:` key.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProfileList {
    Bare(Vec<Profile>),
    Wrapped { configs: Vec<Profile> },
}

impl ProfileList {
    fn into_profiles(self) -> Vec<Profile> {
        match self {
            ProfileList::Bare(profiles) => profiles,
            ProfileList::Wrapped { configs } => configs,
        }
    }
}

/// Any shape accepted for a model companion file.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProfileFile {
    Many(ProfileList),
    One(Profile),
}

/// Profiles keyed by name.
///
/// Entries are replaced whole on reload and never removed.
#[derive(Debug, Default)]
pub struct ProfileStore {
    profiles: RwLock<HashMap<String, Profile>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a profile, replacing any entry with the same name.
    ///
    /// Returns `false` (and stores nothing) if the profile has no name.
    pub fn insert(&self, profile: Profile) -> bool {
        if !profile.is_named() {
            tracing::debug!("Ignoring profile without a name (model: {})", profile.model);
            return false;
        }
        self.profiles.write().insert(profile.name.clone(), profile);
        true
    }

    /// Get a copy of the named profile
    pub fn get(&self, name: &str) -> Option<Profile> {
        self.profiles.read().get(name).cloned()
    }

    /// Sorted profile names
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.profiles.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.profiles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.read().is_empty()
    }

    /// Load a file holding a single profile.
    ///
    /// An empty document loads nothing.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(profile) = read_yaml::<Profile>(path.as_ref())? {
            self.insert(profile);
        }
        Ok(())
    }

    /// Load a file holding a list of profiles, either a bare YAML sequence
    /// or a mapping with a `configs` sequence.
    ///
    /// Returns the number of profiles stored.
    pub fn load_list<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let count = match read_yaml::<ProfileList>(path.as_ref())? {
            Some(list) => self.insert_all(list.into_profiles()),
            None => 0,
        };
        Ok(count)
    }

    /// Load a model companion file, which may hold one profile or a list.
    pub fn load_companion<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let count = match read_yaml(path.as_ref())? {
            Some(ProfileFile::Many(list)) => self.insert_all(list.into_profiles()),
            Some(ProfileFile::One(profile)) => usize::from(self.insert(profile)),
            None => 0,
        };
        Ok(count)
    }

    /// Load every profile file in a directory.
    ///
    /// Files that fail to parse are skipped. Only a failure to list the
    /// directory is returned as an error.
    pub fn load_dir<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let entries = std::fs::read_dir(path).map_err(|source| Error::ConfigDir {
            path: path.to_path_buf(),
            source,
        })?;

        let mut loaded = 0;
        for entry in entries {
            let entry = entry.map_err(|source| Error::ConfigDir {
                path: path.to_path_buf(),
                source,
            })?;
            let file_name = entry.file_name().to_string_lossy().to_string();
            if !file_name.contains(PROFILE_MARKER) {
                continue;
            }

            match read_yaml::<Profile>(&entry.path()) {
                Ok(Some(profile)) => {
                    if self.insert(profile) {
                        loaded += 1;
                    }
                }
                Ok(None) => tracing::debug!("Skipping empty profile {}", file_name),
                Err(e) => tracing::warn!("Skipping profile {}: {}", file_name, e),
            }
        }

        tracing::debug!("Loaded {} profiles from {}", loaded, path.display());
        Ok(loaded)
    }

    fn insert_all(&self, profiles: Vec<Profile>) -> usize {
        profiles
            .into_iter()
            .map(|profile| self.insert(profile))
            .filter(|stored| *stored)
            .count()
    }
}

/// Parse a YAML file; `None` for an empty (or comment-only) document.
fn read_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_error = |source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    };

    let value: serde_yaml::Value = serde_yaml::from_str(&content).map_err(parse_error)?;
    if value.is_null() {
        return Ok(None);
    }
    serde_yaml::from_value(value).map(Some).map_err(parse_error)
}
