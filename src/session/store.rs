use crate::session::{StoredSession, SCHEMA_VERSION};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

fn default_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".hostdesk")
}

fn read_session_file(path: &Path) -> Result<StoredSession, String> {
    let data = fs::read(path).map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    let stored: StoredSession = serde_json::from_slice(&data)
        .map_err(|err| format!("failed to parse {}: {err}", path.display()))?;

    if stored.schema_version != SCHEMA_VERSION {
        return Err(format!(
            "unknown schema_version in {}: {}",
            path.display(),
            stored.schema_version
        ));
    }
    Ok(stored)
}

/// On-disk home of the stored session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn at_default_location() -> Self {
        Self::new(default_dir().join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file means a fresh install; anything unreadable is reported as a
    /// warning and replaced by an empty session.
    pub fn load(&self) -> (StoredSession, Option<String>) {
        if !self.path.exists() {
            return (StoredSession::default(), None);
        }

        match read_session_file(&self.path) {
            Ok(stored) => (stored, None),
            Err(err) => (StoredSession::default(), Some(err)),
        }
    }

    pub fn save(&self, stored: &StoredSession) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(stored)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?;

        fs::write(&tmp_path, bytes)?;
        match fs::rename(&tmp_path, &self.path) {
            Ok(()) => Ok(()),
            Err(rename_err) => {
                if self.path.exists() {
                    fs::remove_file(&self.path)?;
                    fs::rename(&tmp_path, &self.path)?;
                    Ok(())
                } else {
                    Err(rename_err)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SessionStore;
    use crate::session::StoredSession;
    use std::fs;

    #[test]
    fn missing_file_loads_empty_session_without_warning() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let store = SessionStore::new(dir.path().join("session.json"));

        let (stored, warning) = store.load();
        assert_eq!(stored, StoredSession::default());
        assert!(warning.is_none());
    }

    #[test]
    fn saved_thread_survives_reload() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let store = SessionStore::new(dir.path().join("nested").join("session.json"));
        let stored = StoredSession {
            token: Some("abc".to_string()),
            thread_id: Some("thread_42".to_string()),
            ..StoredSession::default()
        };

        store.save(&stored).expect("session should save");
        let (loaded, warning) = store.load();
        assert!(warning.is_none());
        assert_eq!(loaded.thread_id.as_deref(), Some("thread_42"));
        assert_eq!(loaded.session().map(|s| s.token().to_string()).as_deref(), Some("abc"));
    }

    #[test]
    fn unknown_schema_is_reported_and_ignored() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("session.json");
        fs::write(
            &path,
            r#"{ "schema_version": 99, "token": "abc", "thread_id": null }"#,
        )
        .expect("fixture should write");

        let (loaded, warning) = SessionStore::new(path).load();
        assert!(loaded.token.is_none());
        assert!(warning
            .expect("warning expected")
            .contains("unknown schema_version"));
    }

    #[test]
    fn corrupt_file_is_reported_and_ignored() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("session.json");
        fs::write(&path, "{ not json").expect("fixture should write");

        let (loaded, warning) = SessionStore::new(path).load();
        assert_eq!(loaded, StoredSession::default());
        assert!(warning.expect("warning expected").contains("failed to parse"));
    }
}
