//! Fakt CLI
//!
//! Generates Kotlin fakes from a declaration manifest.

use std::path::Path;

use fakt_codegen::CodegenOptions;
use faktc::commands::{explain_error, parse_generate_options, print_signatures, run_generate};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let ok = match command.as_str() {
        "generate" => {
            let options = match parse_generate_options(&args[2..]) {
                Ok(options) => options,
                Err(message) => {
                    eprintln!("error: {message}");
                    eprintln!();
                    eprintln!("Usage: fakt generate <manifest.json> --out <dir> [options]");
                    eprintln!();
                    eprintln!("Options:");
                    eprintln!("  --out <dir>          Output root for generated fakes");
                    eprintln!("  --cache <file>       Signature cache; unchanged declarations are skipped");
                    eprintln!("  --force              Regenerate everything");
                    eprintln!("  --no-parallel        Generate declarations sequentially");
                    eprintln!("  --per-entry          Append to the cache after every declaration");
                    eprintln!("  --annotation <Name>  Marker annotation (default: Fake)");
                    eprintln!("  --no-banner          Omit the generated-file banner");
                    eprintln!("  -v, --verbose        Debug logging");
                    std::process::exit(1);
                }
            };
            faktc::init_tracing(options.verbose);
            run_generate(&options)
        }
        "signature" => {
            if args.len() < 3 || args[3..].iter().any(|a| a != "--no-banner") {
                eprintln!("Usage: fakt signature <manifest.json> [--no-banner]");
                std::process::exit(1);
            }
            faktc::init_tracing(false);
            let options = CodegenOptions {
                banner: args.len() == 3,
            };
            print_signatures(Path::new(&args[2]), &options)
        }
        "explain" | "--explain" => {
            if args.len() < 3 {
                eprintln!("Usage: fakt explain <CODE>");
                eprintln!("Example: fakt explain F0002");
                std::process::exit(1);
            }
            explain_error(&args[2])
        }
        "help" | "--help" | "-h" => {
            print_usage();
            true
        }
        "version" | "--version" | "-V" => {
            println!("fakt {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            false
        }
    };

    if !ok {
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("Fakt: compile-time fakes for Kotlin interfaces and classes");
    println!();
    println!("Usage: fakt <command> [options]");
    println!();
    println!("Commands:");
    println!("  generate <manifest.json> --out <dir>  Generate fakes");
    println!("  signature <manifest.json>             Print structural signatures");
    println!("  explain <code>                        Explain a diagnostic code (e.g., F0002)");
    println!("  help                                  Show this help message");
    println!("  version                               Show version information");
    println!();
    println!("Generate options:");
    println!("  --cache <file>       Signature cache; unchanged declarations are skipped");
    println!("  --force              Regenerate everything");
    println!("  --no-parallel        Generate declarations sequentially");
    println!("  --per-entry          Append to the cache after every declaration");
    println!("  --annotation <Name>  Marker annotation (default: Fake)");
    println!("  --no-banner          Omit the generated-file banner");
    println!("  -v, --verbose        Debug logging (RUST_LOG overrides)");
    println!();
    println!("Examples:");
    println!("  fakt generate fakes.json --out build/generated/fakt");
    println!("  fakt generate fakes.json --out gen --cache build/fakt/signatures.txt");
    println!("  fakt signature fakes.json");
    println!("  fakt explain F0001");
}
