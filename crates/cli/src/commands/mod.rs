//! Subcommands of the `quote` binary.

pub mod config;
pub mod random;

/// Exit code: the quote service could not deliver a quote (sysexits EX_UNAVAILABLE)
pub const EX_UNAVAILABLE: i32 = 69;

/// Exit code: internal failure (sysexits EX_SOFTWARE)
pub const EX_SOFTWARE: i32 = 70;

/// Exit code: bad configuration (sysexits EX_CONFIG)
pub const EX_CONFIG: i32 = 78;
