//! Persistence hooks for conversation memory.
//!
//! The store itself is purely in-process. The coach actor calls these hooks to reload a
//! user's memory the first time it is needed and to save it after every exchange.

use async_trait::async_trait;
use std::fmt::Write as _;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::store::MemorySnapshot;
use crate::error::CoachError;
use crate::models::UserId;

/// Load/save seam for an external persistence layer.
#[async_trait]
pub trait MemoryHooks: Send + Sync + 'static {
    /// Load a previously saved memory. `Ok(None)` means nothing was saved for this user.
    async fn load(&self, user_id: &UserId) -> Result<Option<MemorySnapshot>, CoachError>;

    /// Persist the user's current memory, replacing any previous save.
    async fn save(&self, user_id: &UserId, snapshot: &MemorySnapshot) -> Result<(), CoachError>;
}

/// Hooks that persist nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

#[async_trait]
impl MemoryHooks for NoopHooks {
    async fn load(&self, _user_id: &UserId) -> Result<Option<MemorySnapshot>, CoachError> {
        Ok(None)
    }

    async fn save(&self, _user_id: &UserId, _snapshot: &MemorySnapshot) -> Result<(), CoachError> {
        Ok(())
    }
}

/// One JSON file per user under a base directory.
#[derive(Debug, Clone)]
pub struct JsonFileHooks {
    dir: PathBuf,
}

impl JsonFileHooks {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// User ids are arbitrary strings, so they are hex-encoded into the file name.
    pub fn path_for(&self, user_id: &UserId) -> PathBuf {
        let mut name = String::with_capacity(user_id.as_str().len() * 2 + 5);
        for byte in user_id.as_str().bytes() {
            let _ = write!(name, "{:02x}", byte);
        }
        name.push_str(".json");
        self.dir.join(name)
    }
}

#[async_trait]
impl MemoryHooks for JsonFileHooks {
    async fn load(&self, user_id: &UserId) -> Result<Option<MemorySnapshot>, CoachError> {
        let path = self.path_for(user_id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot: MemorySnapshot = serde_json::from_slice(&bytes)?;
        debug!(user = %user_id, turns = snapshot.turns.len(), "Loaded memory snapshot");
        Ok(Some(snapshot))
    }

    async fn save(&self, user_id: &UserId, snapshot: &MemorySnapshot) -> Result<(), CoachError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(user_id);
        let tmp = path.with_extension("json.tmp");

        let json = serde_json::to_vec_pretty(snapshot)?;
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &path).await?;

        debug!(user = %user_id, turns = snapshot.turns.len(), "Saved memory snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::Analysis;
    use crate::memory::turn::Turn;
    use crate::respond::Tone;

    #[test]
    fn test_path_is_hex_encoded() {
        let hooks = JsonFileHooks::new("/data");
        let path = hooks.path_for(&UserId::new("a/b").unwrap());
        assert_eq!(path, PathBuf::from("/data/612f62.json"));
    }

    #[tokio::test]
    async fn test_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let hooks = JsonFileHooks::new(dir.path());
        let loaded = hooks.load(&UserId::new("ghost").unwrap()).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let hooks = JsonFileHooks::new(dir.path().join("nested"));
        let user = UserId::new("пользователь").unwrap();

        let snapshot = MemorySnapshot {
            turns: vec![Turn::from_person("привет", Analysis::default())],
            tone: Some(Tone::Practical),
        };
        hooks.save(&user, &snapshot).await.unwrap();

        let loaded = hooks.load(&user).await.unwrap().unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let hooks = JsonFileHooks::new(dir.path());
        let user = UserId::new("broken").unwrap();
        std::fs::write(hooks.path_for(&user), b"{not json").unwrap();

        assert!(matches!(hooks.load(&user).await, Err(CoachError::Validation(_))));
    }
}
