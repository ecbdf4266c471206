//! Diagnostic codes.
//!
//! Format: F####, one code per failure class of the generation pipeline.
//! Used for `fakt explain` lookups.

use std::fmt;

/// Diagnostic codes for the generation pipeline.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum ErrorCode {
    /// Declaration shape cannot be faked (final, sealed, object, ...)
    F0001,
    /// Member type could not be determined
    F0002,
    /// Rendering or writing the generated file failed
    F0003,
    /// Signature cache unavailable; regenerating everything
    F0004,
    /// Type parameter bound could not be resolved
    F0005,
    /// Type parameter is never used
    F0006,
    /// Output location could not be resolved
    F0007,
    /// Open member cannot delegate to its supertype implementation
    F0008,
    /// Declaration manifest is invalid
    F0009,
}

impl ErrorCode {
    /// All codes, for exhaustive testing and `explain` listings.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::F0001,
        ErrorCode::F0002,
        ErrorCode::F0003,
        ErrorCode::F0004,
        ErrorCode::F0005,
        ErrorCode::F0006,
        ErrorCode::F0007,
        ErrorCode::F0008,
        ErrorCode::F0009,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::F0001 => "F0001",
            ErrorCode::F0002 => "F0002",
            ErrorCode::F0003 => "F0003",
            ErrorCode::F0004 => "F0004",
            ErrorCode::F0005 => "F0005",
            ErrorCode::F0006 => "F0006",
            ErrorCode::F0007 => "F0007",
            ErrorCode::F0008 => "F0008",
            ErrorCode::F0009 => "F0009",
        }
    }

    /// One-line summary.
    pub fn title(&self) -> &'static str {
        match self {
            ErrorCode::F0001 => "unsupported declaration shape",
            ErrorCode::F0002 => "missing type information",
            ErrorCode::F0003 => "generation failed",
            ErrorCode::F0004 => "signature cache unavailable",
            ErrorCode::F0005 => "unresolved type parameter bound",
            ErrorCode::F0006 => "unused type parameter",
            ErrorCode::F0007 => "output location unavailable",
            ErrorCode::F0008 => "cannot delegate to supertype",
            ErrorCode::F0009 => "invalid declaration manifest",
        }
    }

    /// Codes that are only ever reported as warnings.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            ErrorCode::F0004 | ErrorCode::F0005 | ErrorCode::F0006 | ErrorCode::F0008
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a code string like `"F0002"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_code() {
        for code in ErrorCode::ALL {
            assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(*code));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("f0003".parse::<ErrorCode>(), Ok(ErrorCode::F0003));
        assert!("E0001".parse::<ErrorCode>().is_err());
    }

    #[test]
    fn warning_codes() {
        assert!(ErrorCode::F0004.is_warning());
        assert!(!ErrorCode::F0003.is_warning());
    }
}
