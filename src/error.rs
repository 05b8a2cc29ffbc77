//! Host-layer error types.
//!
//! Script-execution failures never appear here: the engine reports those as
//! a raw status code plus captured stderr text. Configuration misses (no
//! prefix, no landmark) are logged and tolerated, not errors.

use thiserror::Error;

/// Errors the host layer can produce on its own.
#[derive(Debug, Error)]
pub enum HostError {
    /// A command-line argument could not be converted to the engine's text
    /// encoding. `position` is 1-based.
    #[error("unable to decode the command line argument #{position}")]
    UndecodableArgument {
        /// 1-based position of the offending argument.
        position: usize,
    },

    /// The program name could not be converted to the engine's text
    /// encoding.
    #[error("unable to decode the program name")]
    UndecodableProgramName,
}
