//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Scripts (and CI jobs gating on `--fail-below-target`) rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success                                              |
//! | 1    | General error (unspecified)                          |
//! | 2    | Usage error (bad arguments, unknown category)        |
//! | 3    | I/O error (unreadable upload, database, output file) |
//! | 4    | Parse/config error (bad upload, targets, snapshot)   |
//! | 6    | Completion below target (`--fail-below-target`)      |
//! | 7    | Snapshot not found                                   |
//!
//! Code 5 is unassigned.

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// File or database could not be read or written.
pub const EXIT_IO: u8 = 3;

/// Upload, target table or stored snapshot could not be parsed or failed validation.
pub const EXIT_PARSE: u8 = 4;

/// `analyze --fail-below-target` and the overall percentage missed the target.
pub const EXIT_BELOW_TARGET: u8 = 6;

/// No snapshot with the requested id.
pub const EXIT_SNAPSHOT_NOT_FOUND: u8 = 7;
