//! Per-login-session key/value storage for the shell.

use std::collections::HashMap;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

/// Key under which the boot gate records a completed first visit.
pub const VISITED_KEY: &str = "visited";

/// Minimal session storage: values live until the user's session ends.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// Picks the store for this login session.
///
/// Without a per-login runtime directory the flag lives as long as the
/// process; temp dirs survive logout and would make it permanent.
pub fn login_session() -> Box<dyn SessionStore> {
    match RuntimeDirSession::from_runtime_dir(std::env::var_os("XDG_RUNTIME_DIR")) {
        Some(store) => Box::new(store),
        None => {
            log::info!("XDG_RUNTIME_DIR not set; session state kept in memory");
            Box::new(MemorySession::default())
        }
    }
}

/// Files under the user's runtime directory, which the OS clears at logout.
#[derive(Debug, Clone)]
pub struct RuntimeDirSession {
    dir: PathBuf,
}

impl RuntimeDirSession {
    /// `None` unless `runtime_dir` names a directory.
    pub fn from_runtime_dir(runtime_dir: Option<OsString>) -> Option<Self> {
        let base = runtime_dir.filter(|d| !d.is_empty())?;
        Some(Self::at(PathBuf::from(base).join("muu-studio").join("session")))
    }

    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(safe)
    }
}

impl SessionStore for RuntimeDirSession {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)
    }
}

/// In-process store; forgets everything when dropped.
#[derive(Debug, Default, Clone)]
pub struct MemorySession {
    values: HashMap<String, String>,
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_round_trip() {
        let mut s = MemorySession::default();
        assert_eq!(s.get(VISITED_KEY), None);
        s.set(VISITED_KEY, "true").unwrap();
        assert_eq!(s.get(VISITED_KEY).as_deref(), Some("true"));
    }

    #[test]
    fn runtime_dir_persists_across_instances() {
        let dir = std::env::temp_dir().join(format!("muu-session-test-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let mut a = RuntimeDirSession::at(&dir);
        a.set(VISITED_KEY, "true").unwrap();

        let b = RuntimeDirSession::at(&dir);
        assert_eq!(b.get(VISITED_KEY).as_deref(), Some("true"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn no_runtime_dir_means_no_file_store() {
        assert!(RuntimeDirSession::from_runtime_dir(None).is_none());
        assert!(RuntimeDirSession::from_runtime_dir(Some(OsString::new())).is_none());
    }

    #[test]
    fn runtime_dir_store_lives_under_the_app_subdir() {
        let s = RuntimeDirSession::from_runtime_dir(Some("/run/user/1000".into())).unwrap();
        assert_eq!(s.dir, PathBuf::from("/run/user/1000/muu-studio/session"));
    }

    #[test]
    fn keys_cannot_escape_the_directory() {
        let s = RuntimeDirSession::at("/tmp/muu");
        assert_eq!(s.path_for("../etc/passwd"), PathBuf::from("/tmp/muu/___etc_passwd"));
    }
}
