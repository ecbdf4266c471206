//! The `explain` command: display documentation for diagnostic codes.

use fakt_diagnostic::{ErrorCode, ErrorDocs};

/// Display detailed documentation for a given code string.
pub fn explain_error(code_str: &str) -> bool {
    let Ok(code) = code_str.parse::<ErrorCode>() else {
        eprintln!("Unknown diagnostic code: {code_str}");
        eprintln!();
        eprintln!("Codes have the format FXXXX where X is a digit.");
        let known: Vec<&str> = ErrorCode::ALL.iter().map(ErrorCode::as_str).collect();
        eprintln!("Known codes: {}", known.join(", "));
        return false;
    };

    if let Some(doc) = ErrorDocs::get(code) {
        println!("{doc}");
        true
    } else {
        eprintln!("No documentation available for {code}: {}", code.title());
        false
    }
}
