//! The per-declaration generation loop.
//!
//! Every declaration is processed independently: a failure is recorded in its
//! outcome and the pass moves on. Only output-location failures abort the
//! pass, and they are resolved for every declaration before anything is
//! written.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fakt_analysis::analyze;
use fakt_cache::{SignatureStore, StructuralSignature};
use fakt_codegen::{naming, CodegenOptions, GENERATOR_VERSION};
use fakt_diagnostic::{Diagnostic, DiagnosticSink, ErrorCode};
use fakt_ir::{DeclarationAnalysis, DeclarationId, SourceDeclaration};
use rayon::prelude::*;

use crate::{GenerateError, GenerationConfig, OutputLocator, PipelineError};

/// What happened to one declaration.
#[derive(Debug)]
pub enum Outcome {
    /// The fake was (re)written.
    Generated { path: PathBuf },
    /// The recorded signature matched and the file is still on disk.
    UpToDate { path: PathBuf },
    /// The declaration cannot be faked; reported as a warning.
    Skipped { reason: String },
    /// Generation failed; reported as an error.
    Failed { error: GenerateError },
}

#[derive(Debug)]
pub struct DeclarationOutcome {
    pub declaration: DeclarationId,
    pub outcome: Outcome,
}

/// Outcomes of one pass, in input order.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub outcomes: Vec<DeclarationOutcome>,
}

impl GenerationReport {
    pub fn generated(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Generated { .. }))
    }

    pub fn up_to_date(&self) -> usize {
        self.count(|o| matches!(o, Outcome::UpToDate { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&Outcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(&o.outcome)).count()
    }

    /// Outcome for one declaration, by identity.
    pub fn outcome(&self, declaration: &str) -> Option<&Outcome> {
        self.outcomes
            .iter()
            .find(|o| o.declaration.as_str() == declaration)
            .map(|o| &o.outcome)
    }

    /// Fails the pass when any declaration failed.
    pub fn into_result(self) -> Result<GenerationReport, PipelineError> {
        let failed: Vec<String> = self
            .outcomes
            .iter()
            .filter(|o| matches!(o.outcome, Outcome::Failed { .. }))
            .map(|o| o.declaration.as_str().to_string())
            .collect();
        if failed.is_empty() {
            Ok(self)
        } else {
            Err(PipelineError::DeclarationsFailed {
                failed,
                total: self.outcomes.len(),
            })
        }
    }
}

/// A declaration paired with its resolved output root.
struct Job<'d> {
    declaration: &'d SourceDeclaration,
    output_dir: PathBuf,
}

/// Runs generation passes.
pub struct Orchestrator<'a> {
    config: &'a GenerationConfig,
    locator: &'a dyn OutputLocator,
    sink: &'a dyn DiagnosticSink,
    store: Option<&'a SignatureStore>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        config: &'a GenerationConfig,
        locator: &'a dyn OutputLocator,
        sink: &'a dyn DiagnosticSink,
    ) -> Self {
        Orchestrator {
            config,
            locator,
            sink,
            store: None,
        }
    }

    /// Enable change detection against `store`.
    #[must_use]
    pub fn with_store(mut self, store: &'a SignatureStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Generate fakes for every annotated declaration.
    pub fn run(
        &self,
        declarations: &[SourceDeclaration],
    ) -> Result<GenerationReport, PipelineError> {
        let jobs = declarations
            .iter()
            .filter(|d| d.has_annotation(&self.config.annotation))
            .map(|declaration| -> Result<_, PipelineError> {
                Ok(Job {
                    output_dir: self.locator.output_dir(declaration)?,
                    declaration,
                })
            })
            .collect::<Result<Vec<_>, PipelineError>>()?;

        tracing::debug!(
            annotated = jobs.len(),
            ignored = declarations.len() - jobs.len(),
            parallel = self.config.parallel,
            "starting generation pass"
        );

        let outcomes = if self.config.parallel && jobs.len() > 1 {
            self.run_parallel(&jobs)
        } else {
            jobs.iter().map(|job| self.process(job)).collect()
        };

        self.finish_cache();

        let report = GenerationReport { outcomes };
        tracing::debug!(
            generated = report.generated(),
            up_to_date = report.up_to_date(),
            skipped = report.skipped(),
            failed = report.failed(),
            "generation pass finished"
        );
        Ok(report)
    }

    /// Runs on a scoped pool so no global rayon threads outlive the pass.
    fn run_parallel(&self, jobs: &[Job<'_>]) -> Vec<DeclarationOutcome> {
        rayon::ThreadPoolBuilder::new()
            .build_scoped(rayon::ThreadBuilder::run, |pool| {
                pool.install(|| jobs.par_iter().map(|job| self.process(job)).collect())
            })
            .unwrap_or_else(|e| {
                tracing::warn!("failed to create thread pool ({e}), running sequentially");
                jobs.iter().map(|job| self.process(job)).collect()
            })
    }

    fn process(&self, job: &Job<'_>) -> DeclarationOutcome {
        let name = job.declaration.qualified_name();
        let _span = tracing::debug_span!("declaration", name = %name).entered();

        let outcome = match self.generate(job) {
            Ok(outcome) => outcome,
            Err(GenerateError::Extract(error)) if error.is_skip() => {
                self.sink.report(error.to_diagnostic());
                Outcome::Skipped {
                    reason: error.to_string(),
                }
            }
            Err(error) => {
                self.sink.report(error.to_diagnostic(&name));
                Outcome::Failed { error }
            }
        };
        DeclarationOutcome {
            declaration: job.declaration.id(),
            outcome,
        }
    }

    fn generate(&self, job: &Job<'_>) -> Result<Outcome, GenerateError> {
        let analysis = analyze(job.declaration, self.sink)?;
        let options = CodegenOptions {
            banner: self.config.banner,
        };
        let signature =
            StructuralSignature::compute(&analysis, GENERATOR_VERSION, &options.fingerprint());
        let path = target_path(&job.output_dir, &analysis);

        if let Some(store) = self.store.filter(|_| !self.config.force) {
            if !store.needs_regeneration(&analysis.id, &signature) {
                if path.is_file() {
                    tracing::debug!(path = %path.display(), "up to date");
                    return Ok(Outcome::UpToDate { path });
                }
                tracing::debug!(path = %path.display(), "signature unchanged but output is missing");
            }
        }

        let text = fakt_codegen::generate(&analysis, &options)?.assemble();
        write_file(&path, &text).map_err(|source| GenerateError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "wrote fake");

        if let Some(store) = self.store {
            store.record_generation(&analysis.id, &signature);
        }
        Ok(Outcome::Generated { path })
    }

    /// Persist the store and surface its I/O failures.
    fn finish_cache(&self) {
        let Some(store) = self.store else {
            return;
        };
        let mut errors = store.take_errors();
        if let Err(error) = store.flush() {
            errors.push(error);
        }
        for error in errors {
            self.sink.report(
                Diagnostic::warning(ErrorCode::F0004)
                    .with_message(error.to_string())
                    .with_note("every declaration is regenerated until the cache is usable"),
            );
        }
    }
}

/// `<output>/<package dirs>/Fake<Name>Impl.kt`
fn target_path(output_dir: &Path, analysis: &DeclarationAnalysis) -> PathBuf {
    let mut path = output_dir.to_path_buf();
    path.extend(analysis.package.split('.').filter(|s| !s.is_empty()));
    path.push(format!("{}.kt", naming::impl_class(&analysis.name)));
    path
}

/// Write through a sibling temp file so a failed write leaves no partial fake.
fn write_file(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut temp = path.as_os_str().to_owned();
    temp.push(".tmp");
    let temp = PathBuf::from(temp);
    fs::write(&temp, text)?;
    fs::rename(&temp, path).inspect_err(|_| {
        let _ = fs::remove_file(&temp);
    })
}
