// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::read_to_string;
use std::fs::write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use tokio::sync::watch;

use crate::error::Fallible;
use crate::types::language::Language;
use crate::types::language::Theme;

/// The name of the preferences file inside the data directory.
pub const PREFERENCES_FILE: &str = "preferences.toml";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Preferences {
    pub language: Language,
    pub theme: Theme,
}

/// The on-disk form. Both fields are free-form strings so that a bad value
/// in one does not discard the other.
#[derive(Serialize, Deserialize, Default)]
struct PreferencesFile {
    language: Option<String>,
    theme: Option<String>,
}

impl From<PreferencesFile> for Preferences {
    fn from(file: PreferencesFile) -> Self {
        let language = file.language.as_deref().and_then(Language::parse);
        let theme = file.theme.as_deref().and_then(Theme::parse);
        if language.is_none() && file.language.is_some() {
            log::warn!("Ignoring invalid language preference: {:?}", file.language);
        }
        if theme.is_none() && file.theme.is_some() {
            log::warn!("Ignoring invalid theme preference: {:?}", file.theme);
        }
        Self {
            language: language.unwrap_or_default(),
            theme: theme.unwrap_or_default(),
        }
    }
}

/// The process-wide language and theme. Cheap to clone; all clones share the
/// same value. Every change is persisted and published to subscribers before
/// the toggle returns.
#[derive(Clone)]
pub struct PreferenceStore {
    path: PathBuf,
    sender: Arc<watch::Sender<Preferences>>,
}

impl PreferenceStore {
    /// Load the preferences from the data directory. A missing or malformed
    /// file yields the defaults.
    pub fn load(directory: &Path) -> Self {
        let path = directory.join(PREFERENCES_FILE);
        let preferences = if path.exists() {
            match read_preferences(&path) {
                Ok(preferences) => preferences,
                Err(e) => {
                    log::warn!("Could not read preferences, using defaults: {e}");
                    Preferences::default()
                }
            }
        } else {
            log::debug!("No preferences file, using defaults.");
            Preferences::default()
        };
        let (sender, _) = watch::channel(preferences);
        Self {
            path,
            sender: Arc::new(sender),
        }
    }

    pub fn get(&self) -> Preferences {
        *self.sender.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Preferences> {
        self.sender.subscribe()
    }

    pub fn toggle_language(&self) -> Preferences {
        self.update(|preferences| preferences.language = preferences.language.toggle())
    }

    pub fn toggle_theme(&self) -> Preferences {
        self.update(|preferences| preferences.theme = preferences.theme.toggle())
    }

    /// Modify and persist under the channel's write lock, so concurrent
    /// toggles write the file in the same order they change the value.
    fn update(&self, modify: impl FnOnce(&mut Preferences)) -> Preferences {
        let mut updated = Preferences::default();
        self.sender.send_modify(|preferences| {
            modify(preferences);
            updated = *preferences;
            if let Err(e) = write_preferences(&self.path, updated) {
                log::warn!("Could not persist preferences: {e}");
            }
        });
        updated
    }
}

fn read_preferences(path: &Path) -> Fallible<Preferences> {
    let content = read_to_string(path)?;
    let file: PreferencesFile = toml::from_str(&content)?;
    Ok(file.into())
}

fn write_preferences(path: &Path, preferences: Preferences) -> Fallible<()> {
    let file = PreferencesFile {
        language: Some(preferences.language.code().to_string()),
        theme: Some(preferences.theme.as_str().to_string()),
    };
    write(path, toml::to_string(&file)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_defaults_without_file() -> Fallible<()> {
        let directory = create_tmp_directory()?;
        let store = PreferenceStore::load(&directory);
        assert_eq!(store.get(), Preferences::default());
        assert_eq!(store.get().language, Language::Ka);
        assert_eq!(store.get().theme, Theme::Light);
        Ok(())
    }

    #[test]
    fn test_toggle_persists() -> Fallible<()> {
        let directory = create_tmp_directory()?;
        let store = PreferenceStore::load(&directory);
        store.toggle_language();
        store.toggle_theme();
        let reloaded = PreferenceStore::load(&directory);
        assert_eq!(
            reloaded.get(),
            Preferences {
                language: Language::En,
                theme: Theme::Dark,
            }
        );
        Ok(())
    }

    #[test]
    fn test_malformed_file_uses_defaults() -> Fallible<()> {
        let directory = create_tmp_directory()?;
        write(directory.join(PREFERENCES_FILE), "this is = = not toml")?;
        let store = PreferenceStore::load(&directory);
        assert_eq!(store.get(), Preferences::default());
        Ok(())
    }

    #[test]
    fn test_invalid_values_fall_back_per_field() -> Fallible<()> {
        let directory = create_tmp_directory()?;
        write(
            directory.join(PREFERENCES_FILE),
            "language = \"fr\"\ntheme = \"dark\"\n",
        )?;
        let store = PreferenceStore::load(&directory);
        assert_eq!(store.get().language, Language::Ka);
        assert_eq!(store.get().theme, Theme::Dark);
        Ok(())
    }

    #[test]
    fn test_subscribers_see_changes_immediately() -> Fallible<()> {
        let directory = create_tmp_directory()?;
        let store = PreferenceStore::load(&directory);
        let mut first = store.subscribe();
        let second = store.clone().subscribe();
        store.toggle_language();
        assert!(first.has_changed().unwrap_or(false));
        assert_eq!(first.borrow_and_update().language, Language::En);
        assert_eq!(second.borrow().language, Language::En);
        Ok(())
    }

    #[test]
    fn test_concurrent_toggles_persist_the_final_value() -> Fallible<()> {
        let directory = create_tmp_directory()?;
        let store = PreferenceStore::load(&directory);
        std::thread::scope(|scope| {
            for _ in 0..8 {
                let store = store.clone();
                scope.spawn(move || {
                    for _ in 0..25 {
                        store.toggle_language();
                        store.toggle_theme();
                    }
                });
            }
        });
        let reloaded = PreferenceStore::load(&directory);
        assert_eq!(reloaded.get(), store.get());
        Ok(())
    }

    #[test]
    fn test_unwritable_directory_is_not_fatal() {
        let store = PreferenceStore::load(Path::new("./does/not/exist"));
        let preferences = store.toggle_theme();
        assert_eq!(preferences.theme, Theme::Dark);
        assert_eq!(store.get().theme, Theme::Dark);
    }
}
