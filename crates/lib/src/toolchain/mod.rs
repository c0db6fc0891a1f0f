//! The external toolchain: the target manager (`rustup`) and the compiler
//! driver (`cargo`), both treated as black-box commands.

pub mod cmd;

pub use cmd::{RunError, ToolFailure, ToolOutput, run_tool};
