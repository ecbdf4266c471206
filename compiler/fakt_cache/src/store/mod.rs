//! The persisted signature store.
//!
//! File format, one entry per line:
//!
//! ```text
//! # comment
//! com.example.UserService=3f2a...
//! ```
//!
//! Later lines win, which is what makes append-only persistence work.
//! Malformed lines are skipped.
//!
//! One store is created per generation session and shared by reference
//! across workers. The entry map and the backing file have separate locks,
//! so lookups never wait on disk writes.

use std::fs::{self, OpenOptions};
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use fakt_ir::DeclarationId;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::{CacheError, StructuralSignature};

const HEADER: &str = "# Fakt structural signatures: <declaration>=<sha256>";

/// When recorded signatures reach the disk.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PersistMode {
    /// Rewrite the whole file atomically on [`SignatureStore::flush`].
    #[default]
    OnFlush,
    /// Append one line per [`SignatureStore::record_generation`].
    PerEntry,
}

/// Declaration identity to last-generated digest.
pub struct SignatureStore {
    path: PathBuf,
    mode: PersistMode,
    entries: Mutex<FxHashMap<String, String>>,
    /// Serializes every access to the backing file.
    file: Mutex<()>,
    /// Set after any I/O failure; every lookup then says "regenerate".
    degraded: AtomicBool,
    errors: Mutex<Vec<CacheError>>,
}

impl SignatureStore {
    /// Load the store at `path`. A missing file is an empty store; an
    /// unreadable one is a degraded store.
    pub fn load(path: impl Into<PathBuf>, mode: PersistMode) -> Self {
        let path = path.into();
        let store = SignatureStore {
            entries: Mutex::new(FxHashMap::default()),
            file: Mutex::new(()),
            degraded: AtomicBool::new(false),
            errors: Mutex::new(Vec::new()),
            path,
            mode,
        };

        let read = {
            let _guard = store.file.lock();
            fs::read_to_string(&store.path)
        };
        match read {
            Ok(text) => {
                let entries = parse(&text);
                tracing::debug!(
                    path = %store.path.display(),
                    entries = entries.len(),
                    "loaded signature cache"
                );
                *store.entries.lock() = entries;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %store.path.display(), "no signature cache yet");
            }
            Err(source) => store.degrade(CacheError::Read {
                path: store.path.clone(),
                source,
            }),
        }
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> PersistMode {
        self.mode
    }

    /// Whether an I/O failure switched the store to "always regenerate".
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Last recorded digest for `id`.
    pub fn digest(&self, id: &DeclarationId) -> Option<String> {
        self.entries.lock().get(id.as_str()).cloned()
    }

    /// `false` only when the recorded digest matches and the store is healthy.
    pub fn needs_regeneration(&self, id: &DeclarationId, signature: &StructuralSignature) -> bool {
        if self.is_degraded() {
            return true;
        }
        self.entries
            .lock()
            .get(id.as_str())
            .map_or(true, |digest| digest != signature.digest())
    }

    /// Remember that `id` was generated from `signature`.
    pub fn record_generation(&self, id: &DeclarationId, signature: &StructuralSignature) {
        self.entries
            .lock()
            .insert(id.as_str().to_string(), signature.digest().to_string());

        if self.mode == PersistMode::PerEntry {
            let line = format!("{}={}\n", id.as_str(), signature.digest());
            if let Err(source) = self.append(&line) {
                self.degrade(CacheError::Write {
                    path: self.path.clone(),
                    source,
                });
            }
        }
    }

    /// Persist all entries. A no-op in [`PersistMode::PerEntry`].
    pub fn flush(&self) -> Result<(), CacheError> {
        if self.mode == PersistMode::PerEntry {
            return Ok(());
        }
        let text = {
            let entries = self.entries.lock();
            render(&entries)
        };
        self.write_atomically(&text).map_err(|source| {
            let error = CacheError::Write {
                path: self.path.clone(),
                source,
            };
            tracing::warn!(error = %error, "signature cache not saved");
            self.degraded.store(true, Ordering::Release);
            error
        })
    }

    /// Errors recorded since the last call.
    pub fn take_errors(&self) -> Vec<CacheError> {
        std::mem::take(&mut *self.errors.lock())
    }

    fn degrade(&self, error: CacheError) {
        tracing::warn!(error = %error, "signature cache unavailable; regenerating everything");
        self.degraded.store(true, Ordering::Release);
        self.errors.lock().push(error);
    }

    fn append(&self, line: &str) -> io::Result<()> {
        let _guard = self.file.lock();
        ensure_parent(&self.path)?;
        let is_new = !self.path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        if is_new {
            writeln!(file, "{HEADER}")?;
        }
        file.write_all(line.as_bytes())
    }

    fn write_atomically(&self, text: &str) -> io::Result<()> {
        let _guard = self.file.lock();
        ensure_parent(&self.path)?;
        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        let temp = PathBuf::from(temp);
        fs::write(&temp, text)?;
        fs::rename(&temp, &self.path)
    }
}

fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

fn parse(text: &str) -> FxHashMap<String, String> {
    let mut entries = FxHashMap::default();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() && !value.trim().is_empty() => {
                entries.insert(key.trim().to_string(), value.trim().to_string());
            }
            _ => tracing::debug!(line = number + 1, "skipping malformed signature cache line"),
        }
    }
    entries
}

/// Sorted for stable diffs.
fn render(entries: &FxHashMap<String, String>) -> String {
    let mut keys: Vec<&String> = entries.keys().collect();
    keys.sort_unstable();
    let mut out = String::with_capacity(32 + entries.len() * 96);
    out.push_str(HEADER);
    out.push('\n');
    for key in keys {
        out.push_str(key);
        out.push('=');
        out.push_str(&entries[key]);
        out.push('\n');
    }
    out
}
