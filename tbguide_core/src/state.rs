//! Viewer state persistence with file locking.
//!
//! The only persisted state in the system is the "last viewed section"
//! marker. Saves are atomic (locked temp file, fsync, rename); a missing or
//! corrupted file degrades to the default state rather than failing.

use crate::{Error, Result, SectionId, ViewerState};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

impl ViewerState {
    /// Record a section visit
    pub fn mark_viewed(&mut self, section: SectionId) {
        self.last_section = Some(section);
        self.viewed_at = Some(chrono::Utc::now());
    }

    /// Load viewer state from a file with shared locking
    ///
    /// Returns default state if the file doesn't exist or cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No viewer state file found, using default state");
            return Ok(Self::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open viewer state {:?}: {}. Using defaults.",
                    path,
                    e
                );
                return Ok(Self::default());
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock viewer state {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(Self::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!(
                "Failed to read viewer state {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(Self::default());
        }

        file.unlock()?;

        match serde_json::from_str::<ViewerState>(&contents) {
            Ok(state) => Ok(state),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse viewer state {:?}: {}. Using defaults.",
                    path,
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Save viewer state atomically
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Unique temp file in the same directory so the rename stays atomic
        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            Error::State("viewer state path missing parent".to_string())
        })?)?;

        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved viewer state to {:?}", path);
        Ok(())
    }

    /// Load state, modify it, and save it back atomically
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut ViewerState) -> Result<()>,
    {
        let mut state = Self::load(path)?;
        f(&mut state)?;
        state.save(path)?;
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let state_path = temp_dir.path().join("viewer.json");

        let mut state = ViewerState::default();
        state.mark_viewed(SectionId::Calculateur);
        state.save(&state_path).unwrap();

        let loaded = ViewerState::load(&state_path).unwrap();
        assert_eq!(loaded.last_section, Some(SectionId::Calculateur));
        assert!(loaded.viewed_at.is_some());
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let state_path = temp_dir.path().join("nonexistent.json");

        let state = ViewerState::load(&state_path).unwrap();
        assert_eq!(state.last_section, None);
        assert_eq!(state.viewed_at, None);
    }

    #[test]
    fn test_corrupted_state_returns_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let state_path = temp_dir.path().join("corrupted.json");

        std::fs::write(&state_path, "{ invalid json }").unwrap();

        let state = ViewerState::load(&state_path).unwrap();
        assert_eq!(state.last_section, None);
    }

    #[test]
    fn test_update_pattern() {
        let temp_dir = tempfile::tempdir().unwrap();
        let state_path = temp_dir.path().join("viewer.json");

        ViewerState::default().save(&state_path).unwrap();

        ViewerState::update(&state_path, |state| {
            state.mark_viewed(SectionId::Quiz);
            Ok(())
        })
        .unwrap();

        let loaded = ViewerState::load(&state_path).unwrap();
        assert_eq!(loaded.last_section, Some(SectionId::Quiz));
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let state_path = temp_dir.path().join("viewer.json");

        ViewerState::default().save(&state_path).unwrap();

        assert!(state_path.exists());
        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "viewer.json")
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only viewer.json, found extras: {:?}",
            extras
        );
    }

    #[test]
    fn test_slug_stored_in_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let state_path = temp_dir.path().join("viewer.json");

        let mut state = ViewerState::default();
        state.mark_viewed(SectionId::CasParticuliers);
        state.save(&state_path).unwrap();

        let raw = std::fs::read_to_string(&state_path).unwrap();
        assert!(raw.contains("cas-particuliers"));
    }
}
