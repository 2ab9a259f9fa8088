//! Bridge domain module.
//!
//! Connects tool calls to the memory command. The `CommandRunner` trait hides
//! whether a command runs as a child process (`ProcessRunner`, the default)
//! or directly in the server process (`InProcessRunner`).

mod error;
pub mod in_process;
pub mod process;
mod runner;

pub use error::{BridgeError, BridgeResult};
pub use in_process::InProcessRunner;
pub use process::{DEFAULT_MAX_OUTPUT_BYTES, EMPTY_OUTPUT, ProcessRunner};
pub use runner::{CommandRunner, build_runner, process_runner};
