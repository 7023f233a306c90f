//! Exit codes for the flowtag CLI.

use crate::commands::CommandError;

/// Exit code constants.
pub mod codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Invalid arguments.
    pub const INVALID_ARGS: i32 = 1;
    /// Input file could not be read.
    pub const IO_ERROR: i32 = 2;
    /// Lookup table is malformed.
    pub const LOOKUP_ERROR: i32 = 3;
    /// Report could not be written.
    pub const OUTPUT_ERROR: i32 = 4;
}

/// Map a CommandError to an exit code.
pub fn exit_code(error: &CommandError) -> i32 {
    use crate::io::LookupLoadError;

    match error {
        CommandError::InvalidArgument(_) => codes::INVALID_ARGS,
        CommandError::Lookup(LookupLoadError::Read { .. }) => codes::IO_ERROR,
        CommandError::Lookup(LookupLoadError::Parse { .. }) => codes::LOOKUP_ERROR,
        CommandError::FlowLog(_) => codes::IO_ERROR,
        CommandError::Output(_) => codes::OUTPUT_ERROR,
    }
}
