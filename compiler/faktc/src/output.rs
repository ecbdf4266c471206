//! Output placement.
//!
//! Where a declaration's fake goes is decided by the build integration
//! (source-set mapping and the like); the driver only asks.

use std::path::PathBuf;

use fakt_ir::SourceDeclaration;

use crate::PipelineError;

/// Resolves the output root for a declaration.
///
/// A failure aborts the whole pass.
pub trait OutputLocator: Sync {
    fn output_dir(&self, declaration: &SourceDeclaration) -> Result<PathBuf, PipelineError>;
}

/// Every declaration goes under one directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedOutputDir(pub PathBuf);

impl OutputLocator for FixedOutputDir {
    fn output_dir(&self, declaration: &SourceDeclaration) -> Result<PathBuf, PipelineError> {
        if self.0.as_os_str().is_empty() {
            return Err(PipelineError::OutputLocation {
                declaration: declaration.qualified_name(),
                reason: "no output directory configured".to_string(),
            });
        }
        Ok(self.0.clone())
    }
}
