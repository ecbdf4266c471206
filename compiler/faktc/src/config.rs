//! Generation settings.

use std::path::PathBuf;

use fakt_cache::{PersistMode, SignatureStore};

/// Settings for one generation session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Root under which `<package path>/Fake<Name>Impl.kt` files are written.
    pub output_dir: PathBuf,
    /// Signature store location. `None` disables change detection.
    pub cache_file: Option<PathBuf>,
    pub persist_mode: PersistMode,
    /// Generate declarations on a worker pool.
    pub parallel: bool,
    /// Regenerate everything regardless of recorded signatures.
    pub force: bool,
    /// Simple name of the marker annotation.
    pub annotation: String,
    /// Write the "generated, do not edit" banner.
    pub banner: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            output_dir: PathBuf::from("build/generated/fakt"),
            cache_file: None,
            persist_mode: PersistMode::OnFlush,
            parallel: true,
            force: false,
            annotation: "Fake".to_string(),
            banner: true,
        }
    }
}

impl GenerationConfig {
    /// Load the configured signature store, if caching is enabled.
    pub fn open_store(&self) -> Option<SignatureStore> {
        self.cache_file
            .as_ref()
            .map(|path| SignatureStore::load(path, self.persist_mode))
    }
}
