//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Codes
//!
//! | Code | Meaning                                                   |
//! |------|-----------------------------------------------------------|
//! | 0    | Success                                                   |
//! | 1    | General error (unspecified)                               |
//! | 2    | CLI usage error (bad args, empty target list, report ext) |
//! | 3    | Input file could not be loaded                            |
//! | 4    | Settings file unreadable or invalid                       |
//! | 5    | Reconciliation found discrepancies (`--fail-on-discrepancy`) |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use orderrecon_io::LoadError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
/// clap exits with the same code for parse failures.
pub const EXIT_USAGE: u8 = 2;

/// Input file missing, unreadable, unsupported or unparseable.
pub const EXIT_LOAD: u8 = 3;

/// Settings file missing (when given explicitly), unparseable or invalid.
pub const EXIT_CONFIG: u8 = 4;

/// Reconciliation completed but not every order matched.
/// Only returned with `--fail-on-discrepancy`.
pub const EXIT_DISCREPANCIES: u8 = 5;

/// Map a load error to its exit code.
pub fn load_exit_code(err: &LoadError) -> u8 {
    match err {
        LoadError::Write { .. } => EXIT_ERROR,
        LoadError::UnsupportedReport(_) => EXIT_USAGE,
        _ => EXIT_LOAD,
    }
}
