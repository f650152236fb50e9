//! JSON-file token store; the on-disk stand-in for browser local storage.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::errors::Error;

use super::{StoredTokens, TokenPair, TokenStore};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Loads once on open and rewrites the whole file after every mutation.
#[derive(Clone, Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    inner: Arc<RwLock<StoredTokens>>,
}

impl FileTokenStore {
    /// Opens the store at `path`. A missing or empty file means no tokens.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let tokens = Self::load(&path)?;
        debug!(path = %path.display(), has_access = tokens.access.is_some(), "token_store.open");
        Ok(Self {
            path,
            inner: Arc::new(RwLock::new(tokens)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<StoredTokens, Error> {
        if !path.exists() {
            return Ok(StoredTokens::default());
        }
        let bytes = fs::read(path)?;
        if bytes.is_empty() {
            return Ok(StoredTokens::default());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn persist(&self, tokens: &StoredTokens) -> Result<(), Error> {
        if tokens.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            };
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_vec_pretty(tokens)?;
        let mut tmp_path = self.path.clone();
        tmp_path.set_extension("tmp");
        {
            let mut file = File::create(&tmp_path)?;
            #[cfg(unix)]
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
            file.write_all(&serialized)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        self.inner.read().access.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.inner.read().refresh.clone()
    }

    fn set(&self, access: &str) -> Result<(), Error> {
        let mut guard = self.inner.write();
        let mut next = guard.clone();
        next.access = Some(access.to_string());
        self.persist(&next)?;
        *guard = next;
        Ok(())
    }

    fn set_pair(&self, pair: TokenPair) -> Result<(), Error> {
        let mut guard = self.inner.write();
        let next = StoredTokens::from(pair);
        self.persist(&next)?;
        *guard = next;
        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        let mut guard = self.inner.write();
        self.persist(&StoredTokens::default())?;
        *guard = StoredTokens::default();
        Ok(())
    }
}
