//! The `generate` command: write fakes for every annotated declaration in a
//! manifest.

use std::path::PathBuf;

use fakt_cache::PersistMode;
use fakt_diagnostic::DiagnosticQueue;

use super::emit_diagnostics;
use crate::{load_manifest, FixedOutputDir, GenerationConfig, Orchestrator, PipelineError};

/// Parsed `fakt generate` arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateOptions {
    pub manifest: PathBuf,
    pub config: GenerationConfig,
    pub verbose: bool,
}

/// Parse the arguments following `generate`.
///
/// Value options accept both `--out <dir>` and `--out=<dir>`.
pub fn parse_generate_options(args: &[String]) -> Result<GenerateOptions, String> {
    let mut manifest = None;
    let mut output_dir = None;
    let mut config = GenerationConfig::default();
    let mut verbose = false;

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag, Some(value.to_string())),
            _ => (arg, None),
        };
        let mut value = |name: &str| -> Result<String, String> {
            if let Some(value) = inline.clone() {
                return Ok(value);
            }
            i += 1;
            args.get(i)
                .cloned()
                .ok_or_else(|| format!("missing value for {name}"))
        };

        match flag {
            "--out" | "-o" => output_dir = Some(PathBuf::from(value("--out")?)),
            "--cache" => config.cache_file = Some(PathBuf::from(value("--cache")?)),
            "--annotation" => config.annotation = value("--annotation")?,
            "--force" => config.force = true,
            "--no-parallel" => config.parallel = false,
            "--per-entry" => config.persist_mode = PersistMode::PerEntry,
            "--no-banner" => config.banner = false,
            "--verbose" | "-v" => verbose = true,
            _ if flag.starts_with('-') => return Err(format!("unknown option '{arg}'")),
            _ if manifest.is_none() => manifest = Some(PathBuf::from(arg)),
            _ => return Err(format!("unexpected argument '{arg}'")),
        }
        i += 1;
    }

    config.output_dir = output_dir.ok_or("missing --out <dir>")?;
    Ok(GenerateOptions {
        manifest: manifest.ok_or("missing manifest path")?,
        config,
        verbose,
    })
}

/// Run one generation pass and print a summary.
pub fn run_generate(options: &GenerateOptions) -> bool {
    let declarations = match load_manifest(&options.manifest) {
        Ok(declarations) => declarations,
        Err(e) => {
            emit_diagnostics(&[PipelineError::from(e).to_diagnostic()]);
            return false;
        }
    };

    let queue = DiagnosticQueue::new();
    let store = options.config.open_store();
    let locator = FixedOutputDir(options.config.output_dir.clone());
    let mut orchestrator = Orchestrator::new(&options.config, &locator, &queue);
    if let Some(store) = &store {
        orchestrator = orchestrator.with_store(store);
    }

    let result = orchestrator.run(&declarations);
    emit_diagnostics(&queue.flush());

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            emit_diagnostics(&[e.to_diagnostic()]);
            return false;
        }
    };
    println!(
        "{} generated, {} up to date, {} skipped, {} failed",
        report.generated(),
        report.up_to_date(),
        report.skipped(),
        report.failed()
    );
    match report.into_result() {
        Ok(_) => true,
        Err(e) => {
            eprintln!("error: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn minimal_arguments_use_defaults() {
        let options = parse_generate_options(&args("fakes.json --out build/fakes"));
        assert_eq!(
            options,
            Ok(GenerateOptions {
                manifest: PathBuf::from("fakes.json"),
                config: GenerationConfig {
                    output_dir: PathBuf::from("build/fakes"),
                    ..GenerationConfig::default()
                },
                verbose: false,
            })
        );
    }

    #[test]
    fn every_option() {
        let options = parse_generate_options(&args(
            "--force --out=gen fakes.json --cache .fakt/sig.txt --no-parallel --per-entry \
             --annotation Stub --no-banner -v",
        ));
        assert_eq!(
            options,
            Ok(GenerateOptions {
                manifest: PathBuf::from("fakes.json"),
                config: GenerationConfig {
                    output_dir: PathBuf::from("gen"),
                    cache_file: Some(PathBuf::from(".fakt/sig.txt")),
                    persist_mode: PersistMode::PerEntry,
                    parallel: false,
                    force: true,
                    annotation: "Stub".to_string(),
                    banner: false,
                },
                verbose: true,
            })
        );
    }

    #[test]
    fn errors() {
        assert_eq!(
            parse_generate_options(&args("fakes.json")),
            Err("missing --out <dir>".to_string())
        );
        assert_eq!(
            parse_generate_options(&args("--out gen")),
            Err("missing manifest path".to_string())
        );
        assert_eq!(
            parse_generate_options(&args("fakes.json --out")),
            Err("missing value for --out".to_string())
        );
        assert_eq!(
            parse_generate_options(&args("fakes.json --out gen --fast")),
            Err("unknown option '--fast'".to_string())
        );
        assert_eq!(
            parse_generate_options(&args("a.json b.json --out gen")),
            Err("unexpected argument 'b.json'".to_string())
        );
    }
}
