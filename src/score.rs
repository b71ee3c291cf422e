use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::game::GameMode;

#[derive(thiserror::Error, Debug)]
pub enum ScoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed score file: {0}")]
    Csv(#[from] csv::Error),
}

/// One user's best scores, one column per mode. Username is the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub username: String,
    pub normal_score: u32,
    pub easy_score: u32,
    pub competition_score: u32,
}

impl ScoreRecord {
    pub fn new(username: &str) -> Self {
        ScoreRecord {
            username: username.to_string(),
            normal_score: 0,
            easy_score: 0,
            competition_score: 0,
        }
    }

    pub fn best_for(&self, mode: GameMode) -> u32 {
        match mode {
            GameMode::Normal => self.normal_score,
            GameMode::Easy => self.easy_score,
            GameMode::Competition => self.competition_score,
        }
    }

    /// Raise `mode`'s column to `candidate` if it beats the stored value.
    /// Other columns are untouched.
    pub fn raise_to(&mut self, mode: GameMode, candidate: u32) {
        let slot = match mode {
            GameMode::Normal => &mut self.normal_score,
            GameMode::Easy => &mut self.easy_score,
            GameMode::Competition => &mut self.competition_score,
        };
        *slot = (*slot).max(candidate);
    }
}

/// Per-user best scores over a flat CSV file with header
/// `username,normal_score,easy_score,competition_score`.
///
/// The record set is read fully into memory and rewritten fully on every
/// save; a missing file reads as an empty set, not an error.
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        ScoreStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored best for a user/mode pair; 0 when the file or the user's
    /// row is absent.
    pub fn load(&self, username: &str, mode: GameMode) -> Result<u32, ScoreError> {
        let records = self.read_all()?;
        Ok(records
            .iter()
            .find(|r| r.username == username)
            .map(|r| r.best_for(mode))
            .unwrap_or(0))
    }

    /// Record `candidate` as the user's score for `mode`, keeping the larger
    /// of it and any stored value. Absent users get a fresh row with zeros
    /// in the other columns.
    pub fn save(&self, username: &str, mode: GameMode, candidate: u32) -> Result<(), ScoreError> {
        let mut records = self.read_all()?;
        match records.iter_mut().find(|r| r.username == username) {
            Some(record) => record.raise_to(mode, candidate),
            None => {
                let mut record = ScoreRecord::new(username);
                record.raise_to(mode, candidate);
                records.push(record);
            }
        }
        self.write_all(&records)
    }

    fn read_all(&self) -> Result<Vec<ScoreRecord>, ScoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        let mut reader = csv::Reader::from_reader(file);
        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }

    fn write_all(&self, records: &[ScoreRecord]) -> Result<(), ScoreError> {
        let mut writer = csv::Writer::from_path(&self.path)?;
        // serialize() emits the header from the first record's field names;
        // keep the header even for an empty set.
        if records.is_empty() {
            writer.write_record([
                "username",
                "normal_score",
                "easy_score",
                "competition_score",
            ])?;
        }
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn store_in(dir: &tempfile::TempDir) -> ScoreStore {
        ScoreStore::new(dir.path().join("best_scores.csv"))
    }

    #[test]
    fn missing_file_reads_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load("ana", GameMode::Normal).unwrap(), 0);
    }

    #[test]
    fn save_writes_header_and_row() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save("ana", GameMode::Normal, 512).unwrap();
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with("username,normal_score,easy_score,competition_score"));
        assert!(text.contains("ana,512,0,0"));
        assert_eq!(store.load("ana", GameMode::Normal).unwrap(), 512);
    }

    #[test]
    fn lower_candidate_keeps_stored_best() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save("ana", GameMode::Easy, 256).unwrap();
        store.save("ana", GameMode::Easy, 64).unwrap();
        assert_eq!(store.load("ana", GameMode::Easy).unwrap(), 256);
    }

    #[test]
    fn save_touches_only_one_column() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save("ana", GameMode::Normal, 128).unwrap();
        store.save("ana", GameMode::Competition, 1024).unwrap();
        assert_eq!(store.load("ana", GameMode::Normal).unwrap(), 128);
        assert_eq!(store.load("ana", GameMode::Easy).unwrap(), 0);
        assert_eq!(store.load("ana", GameMode::Competition).unwrap(), 1024);
    }

    #[test]
    fn other_users_survive_a_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save("ana", GameMode::Normal, 128).unwrap();
        store.save("belle", GameMode::Normal, 2048).unwrap();
        store.save("ana", GameMode::Normal, 256).unwrap();
        assert_eq!(store.load("belle", GameMode::Normal).unwrap(), 2048);
        assert_eq!(store.load("ana", GameMode::Normal).unwrap(), 256);
        // Still exactly one row per user.
        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn unknown_user_in_existing_file_reads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save("ana", GameMode::Normal, 128).unwrap();
        assert_eq!(store.load("belle", GameMode::Easy).unwrap(), 0);
    }
}
