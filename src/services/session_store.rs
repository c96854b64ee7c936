//! Persistence for the session so it survives restarts.
//!
//! Two backends: a JSON file next to the user's other config, and the OS
//! keychain (Keychain on macOS, Credential Manager on Windows, Secret
//! Service on Linux).

use super::session::Session;
use crate::config::normalize_url;
use crate::error::{AppError, AppResult};
use keyring::Entry;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Service name used in the keychain.
const SERVICE_NAME: &str = "docudash";

/// Where a [`Session`] is kept between runs.
pub trait SessionPersistence: Send + Sync {
    /// Load the stored session, `None` when nothing is stored.
    fn load(&self) -> AppResult<Option<Session>>;

    fn save(&self, session: &Session) -> AppResult<()>;

    /// Remove the stored session. Idempotent.
    fn clear(&self) -> AppResult<()>;
}

/// JSON file session store.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionPersistence for FileSessionStore {
    fn load(&self) -> AppResult<Option<Session>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::session_storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                // A corrupt file is treated as logged out rather than fatal.
                log::warn!(
                    "Discarding unreadable session file {}: {}",
                    self.path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    /// Writes a sibling temp file that is private from creation, then
    /// renames it over the target so the token is never readable by others.
    fn save(&self, session: &Session) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(session)?;
        let tmp = temp_path(&self.path);
        let written = write_private(&tmp, json.as_bytes()).and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(AppError::session_storage(format!(
                "Failed to write {}: {}",
                self.path.display(),
                e
            )));
        }
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::session_storage(format!(
                "Failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

/// `session.json` -> `.session.json.tmp` in the same directory.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = std::ffi::OsString::from(".");
    name.push(path.file_name().unwrap_or_else(|| "session".as_ref()));
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    // `mode` only applies on creation; a leftover temp file keeps its own bits.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(contents)?;
    file.sync_all()
}

/// OS keychain session store, one entry per server.
#[derive(Debug, Clone)]
pub struct KeyringSessionStore {
    account: String,
}

impl KeyringSessionStore {
    /// # Arguments
    /// * `server_url` - The DocuDash server URL (used as the account identifier)
    pub fn new(server_url: &str) -> Self {
        Self {
            account: account_name(server_url),
        }
    }

    fn entry(&self) -> AppResult<Entry> {
        Entry::new(SERVICE_NAME, &self.account).map_err(|e| {
            AppError::credential_storage(format!("Failed to create keyring entry: {}", e))
        })
    }
}

impl SessionPersistence for KeyringSessionStore {
    fn load(&self) -> AppResult<Option<Session>> {
        let entry = self.entry()?;

        match entry.get_password() {
            Ok(secret) => Ok(serde_json::from_str(&secret).ok()),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(AppError::credential_storage(format!(
                "Failed to retrieve session: {}",
                e
            ))),
        }
    }

    fn save(&self, session: &Session) -> AppResult<()> {
        let secret = serde_json::to_string(session)?;
        self.entry()?
            .set_password(&secret)
            .map_err(|e| AppError::credential_storage(format!("Failed to store session: {}", e)))
    }

    fn clear(&self) -> AppResult<()> {
        match self.entry()?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Idempotent: already deleted
            Err(e) => Err(AppError::credential_storage(format!(
                "Failed to delete session: {}",
                e
            ))),
        }
    }
}

/// Normalize a server URL for use as a keychain account name.
fn account_name(url: &str) -> String {
    normalize_url(url).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthUser, UserRole};
    use tempfile::tempdir;

    fn session() -> Session {
        Session::new(
            "abc",
            AuthUser {
                id: "u1".to_string(),
                email: "qa@docudash.com".to_string(),
                first_name: "Q".to_string(),
                last_name: "A".to_string(),
                role: UserRole::User,
            },
        )
    }

    #[test]
    fn test_account_name() {
        assert_eq!(account_name("HTTPS://Docudash.Example.COM/"), "https://docudash.example.com");
    }

    #[test]
    fn test_file_store_save_load_clear() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));

        assert!(store.load().unwrap().is_none());

        let saved = session();
        store.save(&saved).unwrap();
        assert_eq!(store.load().unwrap(), Some(saved));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_ignores_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileSessionStore::new(&path);
        assert!(store.load().unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store.save(&session()).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_replaces_world_readable_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
        // A stale temp file from an interrupted save must not leak either.
        let tmp = temp_path(&path);
        fs::write(&tmp, "").unwrap();
        fs::set_permissions(&tmp, fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileSessionStore::new(&path);
        let saved = session();
        store.save(&saved).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().unwrap(), Some(saved));
        assert!(!tmp.exists());
    }

    #[test]
    fn test_temp_path_is_a_hidden_sibling() {
        let tmp = temp_path(Path::new("/home/qa/.config/docudash/session.json"));
        assert_eq!(tmp, Path::new("/home/qa/.config/docudash/.session.json.tmp"));
    }

    // Note: keychain round trips need a real or mock credential service and
    // are left to manual testing.
}
