use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};

use crate::store::schema::{CandidateWordsData, SessionData};

/// JSON persistence for session resume data and candidate words. Saves are
/// atomic: write to a temp file, fsync, rename over the target.
pub struct SessionStore {
    base_dir: PathBuf,
}

impl SessionStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordmix");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => T::default(),
            }
        } else {
            T::default()
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Load the saved session. Returns None when no save exists, when the
    /// file cannot be parsed (corruption / schema drift), or when the
    /// schema version is stale, all cases where resume must not proceed.
    pub fn load_session(&self) -> Option<SessionData> {
        let path = self.file_path("session.json");
        let content = fs::read_to_string(&path).ok()?;
        let data: SessionData = serde_json::from_str(&content).ok()?;
        if data.needs_reset() {
            return None;
        }
        Some(data)
    }

    pub fn save_session(&self, data: &SessionData) -> Result<()> {
        self.save("session.json", data)
    }

    pub fn clear_session(&self) -> Result<()> {
        let path = self.file_path("session.json");
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    pub fn load_candidates(&self) -> CandidateWordsData {
        self.load("candidates.json")
    }

    pub fn save_candidates(&self, data: &CandidateWordsData) -> Result<()> {
        self.save("candidates.json", data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, SessionStore) {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_session_save_load_roundtrip() {
        let (_dir, store) = store();
        let data = SessionData::new(1234, 7, "arcade", 450);
        store.save_session(&data).unwrap();
        let loaded = store.load_session().unwrap();
        assert_eq!(loaded.seed, 1234);
        assert_eq!(loaded.offset, 7);
        assert_eq!(loaded.mode, "arcade");
        assert_eq!(loaded.score, 450);
    }

    #[test]
    fn test_missing_session_is_none() {
        let (_dir, store) = store();
        assert!(store.load_session().is_none());
    }

    #[test]
    fn test_corrupt_session_is_none() {
        let (dir, store) = store();
        fs::write(dir.path().join("session.json"), "{not json").unwrap();
        assert!(store.load_session().is_none());
    }

    #[test]
    fn test_stale_schema_is_none() {
        let (dir, store) = store();
        let mut data = SessionData::new(1, 0, "classic", 0);
        data.schema_version = 999;
        let json = serde_json::to_string(&data).unwrap();
        fs::write(dir.path().join("session.json"), json).unwrap();
        assert!(store.load_session().is_none());
    }

    #[test]
    fn test_clear_session() {
        let (_dir, store) = store();
        store
            .save_session(&SessionData::new(1, 0, "classic", 0))
            .unwrap();
        store.clear_session().unwrap();
        assert!(store.load_session().is_none());
        // Clearing twice is fine
        store.clear_session().unwrap();
    }

    #[test]
    fn test_candidates_roundtrip_and_default() {
        let (_dir, store) = store();
        assert!(store.load_candidates().words.is_empty());
        let data = CandidateWordsData {
            words: vec!["ZORB".to_string(), "FLEEP".to_string()],
        };
        store.save_candidates(&data).unwrap();
        assert_eq!(store.load_candidates().words, data.words);
    }
}
